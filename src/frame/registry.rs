//! Maps frame identifiers to the frame kinds that decode them.

use crate::{Error, ErrorKind};

/// The kinds of frame bodies this crate knows how to decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// An encoding marker followed by one or more strings.
    Text,
    /// COMM.
    Comment,
    /// APIC.
    Picture,
    /// UFID.
    UniqueFileIdentifier,
    /// Any other frame. The body is kept as raw bytes.
    Unknown,
}

static REGISTRY: &[(&str, FrameKind)] = &[
    ("TIT2", FrameKind::Text),
    ("TALB", FrameKind::Text),
    ("TYER", FrameKind::Text),
    ("TPE1", FrameKind::Text),
    ("TLAN", FrameKind::Text),
    ("COMM", FrameKind::Comment),
    ("APIC", FrameKind::Picture),
    ("UFID", FrameKind::UniqueFileIdentifier),
];

/// Returns the kind of frame that decodes the frame with the specified ID.
///
/// Fails with [`ErrorKind::UnsupportedFrame`] if the ID is not recognized. Callers reading a tag
/// keep such frames as [`crate::frame::Unknown`] content.
pub fn lookup(id: &str) -> crate::Result<FrameKind> {
    REGISTRY
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::UnsupportedFrame,
                "no decoder is registered for this frame id",
            )
            .with_frame_id(id)
        })
}

/// Like [`lookup`], but maps unrecognized IDs to [`FrameKind::Unknown`].
pub fn kind_of(id: &str) -> FrameKind {
    lookup(id).unwrap_or(FrameKind::Unknown)
}

/// Returns true if the ID consists of 3 (ID3v2.2) or 4 characters in the range A-Z and 0-9.
pub fn is_valid_id(id: &str) -> bool {
    (id.len() == 3 || id.len() == 4)
        && id
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
