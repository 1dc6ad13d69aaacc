//! The only purpose of unsynchronisation is to make the ID3v2 tag as compatible as possible with
//! existing software and hardware. There is no use in 'unsynchronising' tags if the file is only
//! to be processed only by ID3v2 aware software and hardware. Unsynchronisation is only useful
//! with tags in MPEG 1/2 layer I, II and III, MPEG 2.5 and AAC files.

/// Returns the synchsafe variant of a `u32` value.
pub fn encode_u32(n: u32) -> u32 {
    let mut x: u32 = n & 0x7F | (n & 0xFFFF_FF80) << 1;
    x = x & 0x7FFF | (x & 0xFFFF_8000) << 1;
    x = x & 0x7F_FFFF | (x & 0xFF80_0000) << 1;
    x
}

/// Returns the unsynchsafe variant of a `u32` value.
pub fn decode_u32(n: u32) -> u32 {
    n & 0xFF | (n & 0xFF00) >> 1 | (n & 0xFF_0000) >> 2 | (n & 0xFF00_0000) >> 3
}

/// Returns true if every byte of the raw value has its high bit cleared.
pub fn is_synchsafe(n: u32) -> bool {
    n & 0x8080_8080 == 0
}

/// Applies the unsynchronization scheme to a byte buffer.
///
/// A zero byte is inserted after every 0xFF that is followed by a zero byte or by a byte with
/// its three high bits set, and after a trailing 0xFF.
pub fn encode_vec(buffer: &mut Vec<u8>) {
    let mut out = Vec::with_capacity(buffer.len() + buffer.len() / 64);
    let mut iter = buffer.iter().copied().peekable();
    while let Some(b) = iter.next() {
        out.push(b);
        if b == 0xFF {
            match iter.peek() {
                Some(next) if *next == 0x00 || *next & 0xE0 == 0xE0 => out.push(0),
                None => out.push(0),
                _ => {}
            }
        }
    }
    *buffer = out;
}

/// Undoes the changes done to a byte buffer by the unsynchronization scheme.
pub fn decode_vec(buffer: &mut Vec<u8>) {
    let mut discard_next_null_byte = false;
    buffer.retain(|b| {
        let keep = !(discard_next_null_byte && *b == 0x00);
        discard_next_null_byte = *b == 0xFF;
        keep
    });
}
