use crate::frame::{Encoding, Frame};
use crate::storage::PlainStorage;
use crate::stream;
use crate::stream::tag::{Decoder, Encoder, SkippedFrame};
use crate::taglike::TagLike;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// Denotes the version of a tag.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Version {
    /// ID3v2.2
    Id3v22,
    /// ID3v2.3
    Id3v23,
    /// ID3v2.4
    #[default]
    Id3v24,
}

impl Version {
    /// Returns the minor version.
    ///
    /// # Example
    /// ```
    /// use easyid3::Version;
    ///
    /// assert_eq!(Version::Id3v24.minor(), 4);
    /// ```
    pub fn minor(self) -> u8 {
        match self {
            Version::Id3v22 => 2,
            Version::Id3v23 => 3,
            Version::Id3v24 => 4,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Id3v22 => write!(f, "ID3v2.2"),
            Version::Id3v23 => write!(f, "ID3v2.3"),
            Version::Id3v24 => write!(f, "ID3v2.4"),
        }
    }
}

/// An ID3 tag containing zero or more [`Frame`]s.
#[derive(Clone, Debug, Eq)]
pub struct Tag {
    /// A vector of frames included in the tag.
    pub(crate) frames: Vec<Frame>,
    /// ID3 Tag version
    version: Version,
    /// The raw header flags of a decoded tag.
    pub(crate) flags: u8,
    /// The size declared in the header of a decoded tag.
    pub(crate) size: u32,
    /// Frames that were left out by a lenient decoder.
    pub(crate) skipped: Vec<SkippedFrame>,
    /// The encoding used by setters to build new frames.
    text_encoding: Encoding,
}

impl Default for Tag {
    fn default() -> Self {
        Tag {
            frames: Vec::new(),
            version: Version::default(),
            flags: 0,
            size: 0,
            skipped: Vec::new(),
            text_encoding: Encoding::UTF16,
        }
    }
}

impl<'a> Tag {
    /// Creates a new ID3v2.4 tag with no frames.
    pub fn new() -> Tag {
        Tag::default()
    }

    /// Used for creating new tag with a specific version.
    pub fn with_version(version: Version) -> Tag {
        Tag {
            version,
            ..Tag::default()
        }
    }

    /// Removes an ID3v2 tag from the file at the specified path.
    ///
    /// Returns true if the file initially contained a tag.
    pub fn remove_from_path(path: impl AsRef<Path>) -> crate::Result<bool> {
        let mut file = fs::OpenOptions::new().read(true).write(true).open(path)?;
        let location = match stream::tag::locate_id3v2(&mut file)? {
            Some(l) => l,
            None => return Ok(false),
        };
        PlainStorage::new(file, location).remove()?;
        Ok(true)
    }

    /// Attempts to read an ID3 tag from the reader.
    ///
    /// The first broken frame aborts the read, use [`Decoder`] to skip broken frames instead.
    pub fn read_from(reader: impl io::Read) -> crate::Result<Tag> {
        Decoder::new().decode(reader)
    }

    /// Attempts to read an ID3 tag from the file at the indicated path.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Tag> {
        let file = BufReader::new(File::open(path)?);
        Tag::read_from(file)
    }

    /// Attempts to write the ID3 tag to the writer using the specified version.
    ///
    /// Note that the plain tag is written, regardless of the original contents. To safely encode a
    /// tag to an MP3 file, use `Tag::write_to_path`.
    pub fn write_to(&self, writer: impl io::Write, version: Version) -> crate::Result<()> {
        Encoder::new().version(version).encode(self, writer)
    }

    /// Attempts to write the ID3 tag to the file at the indicated path, replacing any tag that is
    /// already present. The existing tag region is reused if the new tag fits in it.
    ///
    /// A tag without frames removes the tag from the file.
    pub fn write_to_path(&self, path: impl AsRef<Path>, version: Version) -> crate::Result<()> {
        Encoder::new().version(version).encode_to_path(self, path)
    }

    /// Returns version of the read tag.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the flags byte of the header the tag was decoded from.
    pub fn header_flags(&self) -> u8 {
        self.flags
    }

    /// Returns the size declared by the header the tag was decoded from, excluding the header.
    pub fn declared_size(&self) -> u32 {
        self.size
    }

    /// Returns the frames that were skipped while decoding with [`crate::ParseMode::Lenient`].
    pub fn skipped_frames(&self) -> &[SkippedFrame] {
        &self.skipped
    }

    /// Returns the encoding used by setters such as [`TagLike::set_title`].
    pub fn text_encoding(&self) -> Encoding {
        self.text_encoding
    }

    /// Sets the encoding used by setters to build new frames. Frames already in the tag are left
    /// untouched.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    /// use easyid3::frame::Encoding;
    ///
    /// let mut tag = Tag::new();
    /// tag.set_text_encoding(Encoding::UTF8);
    /// tag.set_title("Title");
    /// assert_eq!(tag.get("TIT2").unwrap().content().text(), Some("Title"));
    /// ```
    pub fn set_text_encoding(&mut self, encoding: Encoding) {
        self.text_encoding = encoding;
    }

    /// Returns an iterator over the all frames in the tag.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Frame, Tag, TagLike};
    /// use easyid3::frame::Encoding;
    ///
    /// let mut tag = Tag::new();
    ///
    /// tag.add_frame(Frame::text("TPE1", Encoding::UTF8, "Artist"));
    /// tag.add_frame(Frame::text("TALB", Encoding::UTF8, "Album"));
    ///
    /// assert_eq!(tag.frames().count(), 2);
    /// ```
    pub fn frames(&'a self) -> impl Iterator<Item = &'a Frame> + 'a {
        self.frames.iter()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Tag) -> bool {
        self.frames == other.frames
    }
}

impl FromIterator<Frame> for Tag {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: Vec::from_iter(iter),
            ..Self::default()
        }
    }
}

impl Extend<Frame> for Tag {
    fn extend<I: IntoIterator<Item = Frame>>(&mut self, iter: I) {
        self.frames.extend(iter)
    }
}

impl TagLike for Tag {
    fn frames_vec(&self) -> &Vec<Frame> {
        &self.frames
    }

    fn frames_vec_mut(&mut self) -> &mut Vec<Frame> {
        &mut self.frames
    }

    fn text_encoding(&self) -> Encoding {
        self.text_encoding
    }
}
