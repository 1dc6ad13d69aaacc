use crate::frame::registry::{self, FrameKind};
use crate::frame::{Content, Frame};
use crate::stream::unsynch;
use crate::tag::Version;
use crate::{Error, ErrorKind};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

pub mod content;
pub mod v2;
pub mod v3;
pub mod v4;

/// The outcome of decoding one frame from the start of a byte slice.
///
/// `None` means padding or the end of the frame data was reached. The outer error is returned
/// when the frame header itself is unusable, which means the position of the next frame is
/// unknown. The inner result carries errors that are confined to the frame body; the number of
/// bytes occupied by the frame is known in that case and scanning may continue after it.
pub type Decoded = crate::Result<Option<(usize, crate::Result<Frame>)>>;

/// Decodes the frame at the start of `data`.
pub fn decode(data: &[u8], version: Version, tag_unsynchronisation: bool) -> Decoded {
    match version {
        Version::Id3v22 => v2::decode(data),
        Version::Id3v23 => v3::decode(data),
        Version::Id3v24 => v4::decode(data, tag_unsynchronisation),
    }
}

/// Appends the encoded frame to the writer and returns the number of bytes written.
pub fn encode(
    writer: &mut Vec<u8>,
    frame: &Frame,
    version: Version,
    unsynchronisation: bool,
    compression: bool,
) -> crate::Result<usize> {
    let expected = registry::kind_of(frame.id());
    if frame.kind() != FrameKind::Unknown && frame.kind() != expected {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("{:?} content can not be stored in this frame", frame.kind()),
        )
        .with_frame_id(frame.id()));
    }
    if frame.id().len() != 4 || !registry::is_valid_id(frame.id()) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("frame id is not valid for {}", version),
        )
        .with_frame_id(frame.id()));
    }
    let rs = match version {
        Version::Id3v22 => Err(Error::new(
            ErrorKind::UnsupportedFeature,
            "writing ID3v2.2 tags is not supported",
        )),
        Version::Id3v23 => v3::encode(writer, frame, compression),
        Version::Id3v24 => v4::encode(writer, frame, unsynchronisation, compression),
    };
    rs.map_err(|err| match err.frame_id {
        Some(_) => err,
        None => err.with_frame_id(frame.id()),
    })
}

/// Returns an error if the declared body size does not fit in the remaining data.
fn check_body_len(id: &str, body_len: usize, available: usize) -> crate::Result<()> {
    if body_len > available {
        return Err(Error::new(
            ErrorKind::MalformedFrame,
            format!(
                "frame declares {} bytes but only {} remain in the tag",
                body_len, available
            ),
        )
        .with_frame_id(id));
    }
    Ok(())
}

/// Returns the frame ID from the raw header bytes, or an error if it contains characters that
/// are not allowed.
fn decode_id(raw: &[u8]) -> crate::Result<&str> {
    let id = std::str::from_utf8(raw)
        .ok()
        .filter(|id| registry::is_valid_id(id))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::MalformedFrame,
                format!("invalid frame id {:?}", String::from_utf8_lossy(raw)),
            )
        })?;
    Ok(id)
}

/// Splits `len` bytes off the front of the body.
fn take<'a>(body: &mut &'a [u8], len: usize, what: &str) -> crate::Result<&'a [u8]> {
    if body.len() < len {
        return Err(Error::new(
            ErrorKind::MalformedFrame,
            format!("frame is too short to hold the {}", what),
        ));
    }
    let (head, tail) = body.split_at(len);
    *body = tail;
    Ok(head)
}

/// Undoes the format flags of a frame body and decodes the resulting content.
fn decode_content(
    id: &str,
    body: &[u8],
    version: Version,
    compression: bool,
    unsynchronisation: bool,
) -> crate::Result<Content> {
    let mut data = body.to_vec();
    if unsynchronisation {
        unsynch::decode_vec(&mut data);
    }
    if compression {
        log::debug!("[{}] decompressing frame content", id);
        let mut inflated = Vec::new();
        ZlibDecoder::new(&data[..])
            .read_to_end(&mut inflated)
            .map_err(|err| {
                Error::new(
                    ErrorKind::MalformedFrame,
                    format!("compressed frame could not be inflated: {}", err),
                )
            })?;
        data = inflated;
    }

    let kind = match registry::lookup(id) {
        Ok(kind) => kind,
        Err(err) => {
            log::debug!("{}, keeping the body opaque", err);
            FrameKind::Unknown
        }
    };
    content::decode(kind, &data, version)
}

fn compress(data: &[u8]) -> crate::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Encoding, Text};

    #[test]
    fn rejects_content_of_wrong_kind() {
        let frame = Frame::with_content("TIT2", Content::Comment(crate::frame::Comment {
            encoding: Encoding::Latin1,
            lang: "eng".to_string(),
            description: String::new(),
            text: "x".to_string(),
        }));
        let err = encode(&mut Vec::new(), &frame, Version::Id3v24, false, false).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidInput));
        assert_eq!(err.frame_id.as_deref(), Some("TIT2"));
    }

    #[test]
    fn rejects_v22_ids() {
        let frame = Frame::text("TT2", Encoding::Latin1, "x");
        assert!(encode(&mut Vec::new(), &frame, Version::Id3v23, false, false).is_err());
    }

    #[test]
    fn refuses_to_write_v22() {
        let frame = Frame::text("TIT2", Encoding::Latin1, "x");
        let err = encode(&mut Vec::new(), &frame, Version::Id3v22, false, false).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedFeature));
    }

    #[test]
    fn compressed_round_trip() {
        let frame = Frame::with_content(
            "TALB",
            Content::Text(Text::new(Encoding::Latin1, "album ".repeat(64))),
        );
        for version in [Version::Id3v23, Version::Id3v24] {
            let mut buf = Vec::new();
            let n = encode(&mut buf, &frame, version, false, true).unwrap();
            assert_eq!(n, buf.len());
            assert!(buf.len() < 200);
            let (len, decoded) = decode(&buf, version, false).unwrap().unwrap();
            assert_eq!(len, buf.len());
            assert_eq!(decoded.unwrap(), frame);
        }
    }

    #[test]
    fn unknown_frames_are_opaque() {
        let data = b"PRIV\x00\x00\x00\x03\x00\x00abc";
        let (len, frame) = decode(data, Version::Id3v23, false).unwrap().unwrap();
        let frame = frame.unwrap();
        assert_eq!(len, data.len());
        assert_eq!(frame.id(), "PRIV");
        assert_eq!(frame.content().unknown().unwrap().data, b"abc");
    }
}
