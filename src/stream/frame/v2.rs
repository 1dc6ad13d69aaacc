use crate::frame::Frame;
use crate::stream::frame;
use crate::tag::Version;
use crate::util;

pub fn decode(data: &[u8]) -> frame::Decoded {
    if data.len() < 6 || data[0] == 0x00 {
        return Ok(None);
    }
    let raw_id = frame::decode_id(&data[0..3])?;
    let sizebytes = &data[3..6];
    let body_len = ((u32::from(sizebytes[0]) << 16)
        | (u32::from(sizebytes[1]) << 8)
        | u32::from(sizebytes[2])) as usize;
    frame::check_body_len(raw_id, body_len, data.len() - 6)?;

    // Frames without an ID3v2.3 counterpart keep their 3-character ID and stay opaque.
    let id = util::convert_id_2_to_3(raw_id).unwrap_or(raw_id);
    let rs = frame::decode_content(id, &data[6..6 + body_len], Version::Id3v22, false, false)
        .map(|content| Frame::with_content(id, content))
        .map_err(|err| err.with_frame_id(id));
    Ok(Some((6 + body_len, rs)))
}
