//! Conversion between strings and the text encodings used in ID3 frames.

use crate::util;
use crate::{Error, ErrorKind};

/// Types of text encodings used in ID3 frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// ISO-8859-1 text encoding, also referred to as latin1 encoding.
    Latin1,
    /// UTF-16 text encoding with a byte order mark.
    UTF16,
    /// UTF-16BE text encoding without a byte order mark. This encoding is only used in id3v2.4.
    UTF16BE,
    /// UTF-8 text encoding. This encoding is only used in id3v2.4.
    UTF8,
}

impl Encoding {
    /// Returns the encoding denoted by an encoding marker byte.
    pub fn from_u8(n: u8) -> crate::Result<Encoding> {
        match n {
            0 => Ok(Encoding::Latin1),
            1 => Ok(Encoding::UTF16),
            2 => Ok(Encoding::UTF16BE),
            3 => Ok(Encoding::UTF8),
            _ => Err(Error::new(
                ErrorKind::Encoding,
                format!("unknown text encoding marker {}", n),
            )),
        }
    }

    /// Returns the marker byte written in front of frame bodies using this encoding.
    pub fn marker(self) -> u8 {
        self as u8
    }

    /// Returns the width of the string terminator in this encoding.
    pub fn delim_len(self) -> usize {
        match self {
            Encoding::Latin1 | Encoding::UTF8 => 1,
            Encoding::UTF16 | Encoding::UTF16BE => 2,
        }
    }
}

/// Decodes text stored with the specified encoding.
///
/// The data must not contain a string terminator. UTF-16 data must start with a byte order mark
/// unless it is empty.
///
/// # Example
/// ```
/// use easyid3::frame::Encoding;
/// use easyid3::frame::encoding;
///
/// assert_eq!(encoding::decode(Encoding::UTF16, b"\xFF\xFEh\x00i\x00").unwrap(), "hi");
/// assert!(encoding::decode(Encoding::UTF16, b"h\x00i\x00").is_err());
/// ```
pub fn decode(encoding: Encoding, data: &[u8]) -> crate::Result<String> {
    match encoding {
        Encoding::Latin1 => Ok(util::string_from_latin1(data)),
        Encoding::UTF8 => Ok(String::from_utf8(data.to_vec())?),
        Encoding::UTF16 => util::string_from_utf16(data),
        Encoding::UTF16BE => util::string_from_utf16be(data),
    }
}

/// Encodes text using the specified encoding. No string terminator is appended.
///
/// UTF-16 output always starts with a little endian byte order mark.
///
/// # Example
/// ```
/// use easyid3::frame::Encoding;
/// use easyid3::frame::encoding;
///
/// assert_eq!(encoding::encode(Encoding::Latin1, "Café").unwrap(), b"Caf\xE9");
/// assert!(encoding::encode(Encoding::Latin1, "カフェ").is_err());
/// ```
pub fn encode(encoding: Encoding, text: &str) -> crate::Result<Vec<u8>> {
    match encoding {
        Encoding::Latin1 => util::string_to_latin1(text),
        Encoding::UTF8 => Ok(text.as_bytes().to_vec()),
        Encoding::UTF16 => Ok(util::string_to_utf16(text)),
        Encoding::UTF16BE => Ok(util::string_to_utf16be(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Encoding; 4] = [
        Encoding::Latin1,
        Encoding::UTF16,
        Encoding::UTF16BE,
        Encoding::UTF8,
    ];

    #[test]
    fn markers() {
        for encoding in ALL {
            assert_eq!(Encoding::from_u8(encoding.marker()).unwrap(), encoding);
        }
        let err = Encoding::from_u8(4).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Encoding));
    }

    #[test]
    fn round_trip() {
        for text in ["", "text", "Motörhead", "Sigur Rós - Hoppípolla"] {
            for encoding in ALL {
                let data = encode(encoding, text).unwrap();
                assert_eq!(decode(encoding, &data).unwrap(), text, "{:?}", encoding);
            }
        }
        for text in ["日本語", "🎸 riff", "Sigur Rós – Hoppípolla"] {
            for encoding in [Encoding::UTF16, Encoding::UTF16BE, Encoding::UTF8] {
                let data = encode(encoding, text).unwrap();
                assert_eq!(decode(encoding, &data).unwrap(), text, "{:?}", encoding);
            }
        }
    }

    #[test]
    fn latin1_rejects_wide_chars() {
        let err = encode(Encoding::Latin1, "日本語").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Encoding));
    }

    #[test]
    fn utf16_writes_little_endian_bom() {
        assert_eq!(encode(Encoding::UTF16, "A").unwrap(), b"\xFF\xFEA\x00");
        assert_eq!(encode(Encoding::UTF16BE, "A").unwrap(), b"\x00A");
    }

    #[test]
    fn utf16_requires_bom() {
        let err = decode(Encoding::UTF16, b"A\x00B\x00").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Encoding));
        assert_eq!(decode(Encoding::UTF16, b"\xFE\xFF\x00A").unwrap(), "A");
        assert_eq!(decode(Encoding::UTF16, b"").unwrap(), "");
    }

    #[test]
    fn utf16_rejects_odd_length() {
        assert!(decode(Encoding::UTF16, b"\xFF\xFEA\x00B").is_err());
        assert!(decode(Encoding::UTF16BE, b"\x00A\x00").is_err());
    }

    #[test]
    fn invalid_utf8() {
        let err = decode(Encoding::UTF8, b"\xC3\x28").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Encoding));
    }
}
