use crate::tag::Tag;
use std::error;
use std::fmt;
use std::io;
use std::str;
use std::string;

/// Type alias for the result of tag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of errors that may occur while performing metadata operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// An IO error has occurred. Contains the original io::Error.
    Io(io::Error),
    /// The reader does not start with an ID3v2 tag.
    NoTag,
    /// The tag declares a version which is not supported. Contains the major and minor versions
    /// that were detected in the tag.
    UnsupportedVersion(u8, u8),
    /// A frame header or body is truncated or internally inconsistent.
    MalformedFrame,
    /// Text could not be decoded, uses an unknown encoding marker or can not be represented in
    /// the requested encoding.
    Encoding,
    /// The frame registry does not know how to decode a frame. Frames of this kind are kept
    /// opaque by the container, so this kind is not fatal while reading.
    UnsupportedFrame,
    /// A single-valued accessor was used on a field that has multiple values.
    AmbiguousFrame,
    /// A frame value could not be converted to the requested type.
    Format,
    /// A feature of the format is not supported.
    UnsupportedFeature,
    /// Some input was invalid.
    InvalidInput,
}

/// A structure able to represent any error that may occur while performing metadata operations.
pub struct Error {
    /// The kind of error.
    pub kind: ErrorKind,
    /// A human readable string describing the error.
    pub description: String,
    /// The ID of the frame that was being processed, if any.
    pub frame_id: Option<String>,
    /// The offset of the offending frame, relative to the first byte after the tag header.
    pub offset: Option<u64>,
    /// If any, the part of the tag that was able to be decoded before the error occurred.
    pub partial_tag: Option<Tag>,
}

impl Error {
    /// Creates a new `Error` using the error kind and description.
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Error {
        Error {
            kind,
            description: description.into(),
            frame_id: None,
            offset: None,
            partial_tag: None,
        }
    }

    /// Attaches the ID of the frame that caused the error.
    pub(crate) fn with_frame_id(self, id: impl Into<String>) -> Error {
        Error {
            frame_id: Some(id.into()),
            ..self
        }
    }

    /// Attaches the location of the frame that caused the error.
    pub(crate) fn with_offset(self, offset: u64) -> Error {
        Error {
            offset: Some(offset),
            ..self
        }
    }

    /// Attaches the frames that were decoded before the error occurred.
    pub(crate) fn with_tag(self, tag: Tag) -> Error {
        Error {
            partial_tag: Some(tag),
            ..self
        }
    }

    fn fmt_context(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(id) = &self.frame_id {
            write!(f, " [frame {}", id)?;
            if let Some(offset) = self.offset {
                write!(f, " at offset {}", offset)?;
            }
            write!(f, "]")?;
        } else if let Some(offset) = self.offset {
            write!(f, " [at offset {}]", offset)?;
        }
        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind {
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(ErrorKind::Io(err), "")
    }
}

impl From<string::FromUtf8Error> for Error {
    fn from(_: string::FromUtf8Error) -> Error {
        Error::new(ErrorKind::Encoding, "data is not valid utf-8")
    }
}

impl From<str::Utf8Error> for Error {
    fn from(_: str::Utf8Error) -> Error {
        Error::new(ErrorKind::Encoding, "data is not valid utf-8")
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.description.is_empty() {
            true => write!(f, "{:?}", self.kind)?,
            false => write!(f, "{:?}: {}", self.kind, self.description)?,
        }
        self.fmt_context(f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.description.is_empty() {
            true => write!(f, "{}", self.kind)?,
            false => write!(f, "{}: {}", self.kind, self.description)?,
        }
        self.fmt_context(f)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Io(io_error) => write!(f, "IO: {}", io_error),
            ErrorKind::NoTag => write!(f, "NoTag"),
            ErrorKind::UnsupportedVersion(major, minor) => {
                write!(f, "UnsupportedVersion: 2.{}.{}", major, minor)
            }
            ErrorKind::MalformedFrame => write!(f, "MalformedFrame"),
            ErrorKind::Encoding => write!(f, "Encoding"),
            ErrorKind::UnsupportedFrame => write!(f, "UnsupportedFrame"),
            ErrorKind::AmbiguousFrame => write!(f, "AmbiguousFrame"),
            ErrorKind::Format => write!(f, "Format"),
            ErrorKind::UnsupportedFeature => write!(f, "UnsupportedFeature"),
            ErrorKind::InvalidInput => write!(f, "InvalidInput"),
        }
    }
}
