pub use self::content::{
    Comment, Picture, PictureType, Text, UniqueFileIdentifier, Unknown,
};
pub use self::registry::FrameKind;
pub use crate::stream::encoding::{self, Encoding};

mod content;
pub mod registry;

/// A structure representing an ID3 frame.
///
/// Format flags such as compression and unsynchronisation are handled while decoding and
/// encoding and are not stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    id: String,
    content: Content,
    tag_alter_preservation: bool,
    file_alter_preservation: bool,
    read_only: bool,
}

impl Frame {
    /// Creates a frame with the specified ID and content.
    ///
    /// # Example
    /// ```
    /// use easyid3::frame::{Content, Encoding, Frame, Text};
    ///
    /// let frame = Frame::with_content("TALB", Content::Text(Text::new(Encoding::UTF8, "Album")));
    /// assert_eq!(frame.id(), "TALB");
    /// assert_eq!(frame.content().text(), Some("Album"));
    /// ```
    pub fn with_content(id: impl AsRef<str>, content: Content) -> Frame {
        Frame {
            id: id.as_ref().to_string(),
            content,
            tag_alter_preservation: false,
            file_alter_preservation: false,
            read_only: false,
        }
    }

    /// Creates a text frame holding a single value.
    pub fn text(id: impl AsRef<str>, encoding: Encoding, text: impl Into<String>) -> Frame {
        Frame::with_content(id, Content::Text(Text::new(encoding, text)))
    }

    /// Returns the ID of this frame.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the content of the frame.
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Returns the kind of frame the content belongs to.
    pub fn kind(&self) -> FrameKind {
        self.content.kind()
    }

    /// Returns whether the tag_alter_preservation flag is set.
    pub fn tag_alter_preservation(&self) -> bool {
        self.tag_alter_preservation
    }

    /// Sets the tag_alter_preservation flag.
    pub fn set_tag_alter_preservation(&mut self, tag_alter_preservation: bool) {
        self.tag_alter_preservation = tag_alter_preservation;
    }

    /// Returns whether the file_alter_preservation flag is set.
    pub fn file_alter_preservation(&self) -> bool {
        self.file_alter_preservation
    }

    /// Sets the file_alter_preservation flag.
    pub fn set_file_alter_preservation(&mut self, file_alter_preservation: bool) {
        self.file_alter_preservation = file_alter_preservation;
    }

    /// Returns whether the read_only flag is set.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Sets the read_only flag.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

/// The decoded contents of a frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Content {
    /// A value containing the parsed contents of a text frame.
    Text(Text),
    /// A value containing the parsed contents of a comment frame (COMM).
    Comment(Comment),
    /// A value containing the parsed contents of a picture frame (APIC).
    Picture(Picture),
    /// A value containing the parsed contents of a unique file identifier frame (UFID).
    UniqueFileIdentifier(UniqueFileIdentifier),
    /// A value containing the bytes of a frame the registry does not decode.
    Unknown(Unknown),
}

impl Content {
    /// Returns the kind of frame which holds this content.
    pub fn kind(&self) -> FrameKind {
        match self {
            Content::Text(_) => FrameKind::Text,
            Content::Comment(_) => FrameKind::Comment,
            Content::Picture(_) => FrameKind::Picture,
            Content::UniqueFileIdentifier(_) => FrameKind::UniqueFileIdentifier,
            Content::Unknown(_) => FrameKind::Unknown,
        }
    }

    /// Returns the first value of the `Text` or None if the value is not `Text` or is empty.
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => text.first(),
            _ => None,
        }
    }

    /// Returns all values of the `Text` or None if the value is not `Text`.
    pub fn text_values(&self) -> Option<&[String]> {
        match self {
            Content::Text(text) => Some(&text.values),
            _ => None,
        }
    }

    /// Returns the `Comment` or None if the value is not `Comment`.
    pub fn comment(&self) -> Option<&Comment> {
        match self {
            Content::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Returns the `Picture` or None if the value is not `Picture`.
    pub fn picture(&self) -> Option<&Picture> {
        match self {
            Content::Picture(picture) => Some(picture),
            _ => None,
        }
    }

    /// Returns the `UniqueFileIdentifier` or None if the value is not `UniqueFileIdentifier`.
    pub fn unique_file_identifier(&self) -> Option<&UniqueFileIdentifier> {
        match self {
            Content::UniqueFileIdentifier(ufid) => Some(ufid),
            _ => None,
        }
    }

    /// Returns the `Unknown` or None if the value is not `Unknown`.
    pub fn unknown(&self) -> Option<&Unknown> {
        match self {
            Content::Unknown(unknown) => Some(unknown),
            _ => None,
        }
    }
}

impl From<Comment> for Frame {
    fn from(c: Comment) -> Self {
        Self::with_content("COMM", Content::Comment(c))
    }
}

impl From<Picture> for Frame {
    fn from(p: Picture) -> Self {
        Self::with_content("APIC", Content::Picture(p))
    }
}

impl From<UniqueFileIdentifier> for Frame {
    fn from(ufid: UniqueFileIdentifier) -> Self {
        Self::with_content("UFID", Content::UniqueFileIdentifier(ufid))
    }
}
