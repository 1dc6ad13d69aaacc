use crate::stream::encoding::Encoding;
use crate::tag::Version;
use std::fmt;

/// The parsed contents of a text frame.
///
/// A text frame may hold multiple values. Accessors that return a single string use the first
/// value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Text {
    /// The encoding used for all values.
    pub encoding: Encoding,
    /// The values, in the order they appear in the frame.
    pub values: Vec<String>,
}

impl Text {
    /// Creates a text body holding a single value.
    pub fn new(encoding: Encoding, value: impl Into<String>) -> Text {
        Text {
            encoding,
            values: vec![value.into()],
        }
    }

    /// Creates a text body holding multiple values.
    pub fn with_values(
        encoding: Encoding,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Text {
        Text {
            encoding,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first value.
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// The parsed contents of a comment frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Comment {
    /// The encoding of the description and text.
    pub encoding: Encoding,
    /// ISO-639-2 language code, three characters long.
    pub lang: String,
    /// A short description of the comment.
    pub description: String,
    /// The comment itself.
    pub text: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            f.write_str(&self.text)
        } else {
            write!(f, "{}: {}", self.description, self.text)
        }
    }
}

/// Types of pictures used in APIC frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PictureType {
    Other,
    Icon,
    OtherIcon,
    CoverFront,
    CoverBack,
    Leaflet,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    ScreenCapture,
    BrightFish,
    Illustration,
    BandLogo,
    PublisherLogo,
    /// A value outside of the range defined by the standard. Kept so that it survives a rewrite.
    Undefined(u8),
}

impl From<PictureType> for u8 {
    fn from(pt: PictureType) -> Self {
        match pt {
            PictureType::Other => 0,
            PictureType::Icon => 1,
            PictureType::OtherIcon => 2,
            PictureType::CoverFront => 3,
            PictureType::CoverBack => 4,
            PictureType::Leaflet => 5,
            PictureType::Media => 6,
            PictureType::LeadArtist => 7,
            PictureType::Artist => 8,
            PictureType::Conductor => 9,
            PictureType::Band => 10,
            PictureType::Composer => 11,
            PictureType::Lyricist => 12,
            PictureType::RecordingLocation => 13,
            PictureType::DuringRecording => 14,
            PictureType::DuringPerformance => 15,
            PictureType::ScreenCapture => 16,
            PictureType::BrightFish => 17,
            PictureType::Illustration => 18,
            PictureType::BandLogo => 19,
            PictureType::PublisherLogo => 20,
            PictureType::Undefined(b) => b,
        }
    }
}

impl From<u8> for PictureType {
    fn from(b: u8) -> Self {
        match b {
            0 => PictureType::Other,
            1 => PictureType::Icon,
            2 => PictureType::OtherIcon,
            3 => PictureType::CoverFront,
            4 => PictureType::CoverBack,
            5 => PictureType::Leaflet,
            6 => PictureType::Media,
            7 => PictureType::LeadArtist,
            8 => PictureType::Artist,
            9 => PictureType::Conductor,
            10 => PictureType::Band,
            11 => PictureType::Composer,
            12 => PictureType::Lyricist,
            13 => PictureType::RecordingLocation,
            14 => PictureType::DuringRecording,
            15 => PictureType::DuringPerformance,
            16 => PictureType::ScreenCapture,
            17 => PictureType::BrightFish,
            18 => PictureType::Illustration,
            19 => PictureType::BandLogo,
            20 => PictureType::PublisherLogo,
            b => PictureType::Undefined(b),
        }
    }
}

/// The parsed contents of an attached picture frame.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
    /// The encoding of the description.
    pub encoding: Encoding,
    /// The picture's MIME type. Always stored as latin1.
    pub mime_type: String,
    /// The type of picture.
    pub picture_type: PictureType,
    /// A description of the picture's contents.
    pub description: String,
    /// The image data.
    pub data: Vec<u8>,
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("encoding", &self.encoding)
            .field("mime_type", &self.mime_type)
            .field("picture_type", &self.picture_type)
            .field("description", &self.description)
            .field("data", &format_args!("<{} bytes>", self.data.len()))
            .finish()
    }
}

/// The parsed contents of a unique file identifier (UFID) frame.
///
/// A tag may contain several of these frames, each with a distinct owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniqueFileIdentifier {
    /// Identifies the organisation responsible for the identifier, usually a URL or e-mail
    /// address. Always stored as latin1.
    pub owner_identifier: String,
    /// The identifier itself, up to 64 bytes of binary data.
    pub identifier: Vec<u8>,
}

/// The body of a frame which the registry does not decode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Unknown {
    /// The raw, undecoded frame body.
    pub data: Vec<u8>,
    /// The version of the tag the body was read from.
    pub version: Version,
}
