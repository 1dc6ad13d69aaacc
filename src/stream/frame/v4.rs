use crate::frame::{Content, Frame};
use crate::stream::frame::{self, content};
use crate::stream::unsynch;
use crate::tag::Version;
use crate::{Error, ErrorKind};
use bitflags::bitflags;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::Write;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Flags: u16 {
        const TAG_ALTER_PRESERVATION  = 0x4000;
        const FILE_ALTER_PRESERVATION = 0x2000;
        const READ_ONLY               = 0x1000;
        const GROUPING_IDENTITY       = 0x0040;
        const COMPRESSION             = 0x0008;
        const ENCRYPTION              = 0x0004;
        const UNSYNCHRONISATION       = 0x0002;
        const DATA_LENGTH_INDICATOR   = 0x0001;
    }
}

/// The largest value a synchsafe 32-bit integer can hold.
const MAX_SYNCHSAFE: usize = 0x0FFF_FFFF;

pub fn decode(data: &[u8], tag_unsynchronisation: bool) -> frame::Decoded {
    if data.len() < 10 || data[0] == 0x00 {
        return Ok(None);
    }
    let id = frame::decode_id(&data[0..4])?;
    let raw_size = BigEndian::read_u32(&data[4..8]);
    let body_len = if unsynch::is_synchsafe(raw_size) {
        unsynch::decode_u32(raw_size)
    } else {
        // Some writers store plain integers in ID3v2.4 frame headers.
        log::debug!("[{}] frame size is not synchsafe, reading it as-is", id);
        raw_size
    } as usize;
    frame::check_body_len(id, body_len, data.len() - 10)?;
    let flags = Flags::from_bits_truncate(BigEndian::read_u16(&data[8..10]));

    let rs = decode_body(id, &data[10..10 + body_len], flags, tag_unsynchronisation).map(
        |content| {
            let mut frame = Frame::with_content(id, content);
            frame.set_tag_alter_preservation(flags.contains(Flags::TAG_ALTER_PRESERVATION));
            frame.set_file_alter_preservation(flags.contains(Flags::FILE_ALTER_PRESERVATION));
            frame.set_read_only(flags.contains(Flags::READ_ONLY));
            frame
        },
    );
    Ok(Some((10 + body_len, rs.map_err(|err| err.with_frame_id(id)))))
}

fn decode_body(
    id: &str,
    mut body: &[u8],
    flags: Flags,
    tag_unsynchronisation: bool,
) -> crate::Result<Content> {
    if flags.contains(Flags::GROUPING_IDENTITY) {
        let _group_id = frame::take(&mut body, 1, "group identifier")?;
    }
    if flags.contains(Flags::ENCRYPTION) {
        return Err(Error::new(
            ErrorKind::UnsupportedFeature,
            "encryption is not supported",
        ));
    }
    if flags.contains(Flags::DATA_LENGTH_INDICATOR) {
        let _data_length = frame::take(&mut body, 4, "data length indicator")?;
    }
    frame::decode_content(
        id,
        body,
        Version::Id3v24,
        flags.contains(Flags::COMPRESSION),
        flags.contains(Flags::UNSYNCHRONISATION) || tag_unsynchronisation,
    )
}

pub fn encode(
    writer: &mut Vec<u8>,
    frame: &Frame,
    unsynchronisation: bool,
    compression: bool,
) -> crate::Result<usize> {
    let mut content_bytes = content::encode(frame.content(), Version::Id3v24)?;
    let decompressed_size = content_bytes.len();

    let mut flags = Flags::empty();
    flags.set(Flags::TAG_ALTER_PRESERVATION, frame.tag_alter_preservation());
    flags.set(Flags::FILE_ALTER_PRESERVATION, frame.file_alter_preservation());
    flags.set(Flags::READ_ONLY, frame.read_only());
    if compression {
        log::debug!("[{}] compressing frame content", frame.id());
        flags.insert(Flags::COMPRESSION | Flags::DATA_LENGTH_INDICATOR);
        content_bytes = frame::compress(&content_bytes)?;
    }
    if unsynchronisation {
        flags.insert(Flags::UNSYNCHRONISATION);
        unsynch::encode_vec(&mut content_bytes);
    }
    let mut content_size = content_bytes.len();
    if flags.contains(Flags::DATA_LENGTH_INDICATOR) {
        content_size += 4;
    }
    if content_size > MAX_SYNCHSAFE || decompressed_size > MAX_SYNCHSAFE {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "frame is too large for an ID3v2.4 tag",
        ));
    }

    writer.write_all(frame.id().as_bytes())?;
    writer.write_u32::<BigEndian>(unsynch::encode_u32(content_size as u32))?;
    writer.write_u16::<BigEndian>(flags.bits())?;
    if flags.contains(Flags::DATA_LENGTH_INDICATOR) {
        log::debug!("[{}] adding data length indicator", frame.id());
        writer.write_u32::<BigEndian>(unsynch::encode_u32(decompressed_size as u32))?;
    }
    writer.write_all(&content_bytes)?;
    Ok(10 + content_size)
}
