use crate::frame::Frame;
use crate::stream::frame::{self, content};
use crate::tag::Version;
use crate::{Error, ErrorKind};
use bitflags::bitflags;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::Write;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Flags: u16 {
        const TAG_ALTER_PRESERVATION  = 0x8000;
        const FILE_ALTER_PRESERVATION = 0x4000;
        const READ_ONLY               = 0x2000;
        const COMPRESSION             = 0x0080;
        const ENCRYPTION              = 0x0040;
        const GROUPING_IDENTITY       = 0x0020;
    }
}

pub fn decode(data: &[u8]) -> frame::Decoded {
    if data.len() < 10 || data[0] == 0x00 {
        return Ok(None);
    }
    let id = frame::decode_id(&data[0..4])?;
    let body_len = BigEndian::read_u32(&data[4..8]) as usize;
    frame::check_body_len(id, body_len, data.len() - 10)?;
    let flags = Flags::from_bits_truncate(BigEndian::read_u16(&data[8..10]));

    let rs = decode_body(id, &data[10..10 + body_len], flags).map(|content| {
        let mut frame = Frame::with_content(id, content);
        frame.set_tag_alter_preservation(flags.contains(Flags::TAG_ALTER_PRESERVATION));
        frame.set_file_alter_preservation(flags.contains(Flags::FILE_ALTER_PRESERVATION));
        frame.set_read_only(flags.contains(Flags::READ_ONLY));
        frame
    });
    Ok(Some((10 + body_len, rs.map_err(|err| err.with_frame_id(id)))))
}

fn decode_body(id: &str, mut body: &[u8], flags: Flags) -> crate::Result<crate::frame::Content> {
    if flags.contains(Flags::COMPRESSION) {
        let _decompressed_size = frame::take(&mut body, 4, "decompressed size")?;
    }
    if flags.contains(Flags::ENCRYPTION) {
        return Err(Error::new(
            ErrorKind::UnsupportedFeature,
            "encryption is not supported",
        ));
    }
    if flags.contains(Flags::GROUPING_IDENTITY) {
        let _group_id = frame::take(&mut body, 1, "group identifier")?;
    }
    frame::decode_content(
        id,
        body,
        Version::Id3v23,
        flags.contains(Flags::COMPRESSION),
        false,
    )
}

pub fn encode(writer: &mut Vec<u8>, frame: &Frame, compression: bool) -> crate::Result<usize> {
    let mut content_bytes = content::encode(frame.content(), Version::Id3v23)?;
    let decompressed_size = content_bytes.len() as u32;

    let mut flags = Flags::empty();
    flags.set(Flags::TAG_ALTER_PRESERVATION, frame.tag_alter_preservation());
    flags.set(Flags::FILE_ALTER_PRESERVATION, frame.file_alter_preservation());
    flags.set(Flags::READ_ONLY, frame.read_only());
    if compression {
        log::debug!("[{}] compressing frame content", frame.id());
        flags.insert(Flags::COMPRESSION);
        content_bytes = frame::compress(&content_bytes)?;
    }
    let mut content_size = content_bytes.len() as u32;
    if compression {
        content_size += 4;
    }

    writer.write_all(frame.id().as_bytes())?;
    writer.write_u32::<BigEndian>(content_size)?;
    writer.write_u16::<BigEndian>(flags.bits())?;
    if compression {
        writer.write_u32::<BigEndian>(decompressed_size)?;
    }
    writer.write_all(&content_bytes)?;
    Ok(10 + content_size as usize)
}
