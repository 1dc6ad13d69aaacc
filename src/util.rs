use crate::stream::encoding::Encoding;
use crate::{Error, ErrorKind};

/// Returns a string created from the data using Latin1 encoding.
/// Can never fail because all sequences of u8s are valid Latin1 strings.
pub fn string_from_latin1(data: &[u8]) -> String {
    data.iter().map(|b| *b as char).collect()
}

/// Returns a string created from the data using UTF-16 (with byte order mark) encoding.
pub fn string_from_utf16(data: &[u8]) -> crate::Result<String> {
    if data.is_empty() {
        return Ok(String::new());
    }
    match data {
        [0xFF, 0xFE, rest @ ..] => string_from_utf16le(rest),
        [0xFE, 0xFF, rest @ ..] => string_from_utf16be(rest),
        _ => Err(Error::new(
            ErrorKind::Encoding,
            "utf-16 text does not start with a byte order mark",
        )),
    }
}

/// Returns a string created from the data using UTF-16LE encoding.
pub fn string_from_utf16le(data: &[u8]) -> crate::Result<String> {
    let units = utf16_units(data, u16::from_le_bytes)?;
    String::from_utf16(&units)
        .map_err(|_| Error::new(ErrorKind::Encoding, "data is not valid utf16-le"))
}

/// Returns a string created from the data using UTF-16BE encoding.
pub fn string_from_utf16be(data: &[u8]) -> crate::Result<String> {
    let units = utf16_units(data, u16::from_be_bytes)?;
    String::from_utf16(&units)
        .map_err(|_| Error::new(ErrorKind::Encoding, "data is not valid utf16-be"))
}

fn utf16_units(data: &[u8], unit: fn([u8; 2]) -> u16) -> crate::Result<Vec<u16>> {
    if data.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::Encoding,
            "utf-16 data has an odd number of bytes",
        ));
    }
    Ok(data
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect())
}

/// Returns a Latin1 vector representation of the string.
pub fn string_to_latin1(text: &str) -> crate::Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                Error::new(
                    ErrorKind::Encoding,
                    format!("{:?} can not be represented in latin1", c),
                )
            })
        })
        .collect()
}

/// Returns a UTF-16 vector representation of the string, prefixed with a little endian byte
/// order mark.
pub fn string_to_utf16(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend([0xFF, 0xFE]);
    out.extend(string_to_utf16le(text));
    out
}

/// Returns a UTF-16BE vector representation of the string.
pub fn string_to_utf16be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// Returns a UTF-16LE vector representation of the string.
pub fn string_to_utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Returns the index of the first delimiter for the specified encoding, searching from `index`.
///
/// UTF-16 delimiters are only recognized on two byte boundaries relative to `index`.
pub fn find_delim(encoding: Encoding, data: &[u8], index: usize) -> Option<usize> {
    if index >= data.len() {
        return None;
    }
    match encoding {
        Encoding::Latin1 | Encoding::UTF8 => data[index..]
            .iter()
            .position(|b| *b == 0)
            .map(|i| index + i),
        Encoding::UTF16 | Encoding::UTF16BE => data[index..]
            .chunks_exact(2)
            .position(|unit| unit == [0, 0])
            .map(|i| index + i * 2),
    }
}

/// Returns the ID3v2.3/ID3v2.4 ID corresponding to an ID3v2.2 ID.
pub fn convert_id_2_to_3(id: &str) -> Option<&'static str> {
    ID_2_TO_3
        .iter()
        .find(|(v2, _)| *v2 == id)
        .map(|(_, v3)| *v3)
}

static ID_2_TO_3: &[(&str, &str)] = &[
    ("BUF", "RBUF"),
    ("CNT", "PCNT"),
    ("COM", "COMM"),
    ("CRA", "AENC"),
    ("ETC", "ETCO"),
    ("EQU", "EQUA"),
    ("GEO", "GEOB"),
    ("IPL", "IPLS"),
    ("LNK", "LINK"),
    ("MCI", "MCDI"),
    ("MLL", "MLLT"),
    ("PIC", "APIC"),
    ("POP", "POPM"),
    ("REV", "RVRB"),
    ("RVA", "RVAD"),
    ("SLT", "SYLT"),
    ("STC", "SYTC"),
    ("TAL", "TALB"),
    ("TBP", "TBPM"),
    ("TCM", "TCOM"),
    ("TCO", "TCON"),
    ("TCR", "TCOP"),
    ("TDA", "TDAT"),
    ("TDY", "TDLY"),
    ("TEN", "TENC"),
    ("TFT", "TFLT"),
    ("TIM", "TIME"),
    ("TKE", "TKEY"),
    ("TLA", "TLAN"),
    ("TLE", "TLEN"),
    ("TMT", "TMED"),
    ("TOA", "TOPE"),
    ("TOF", "TOFN"),
    ("TOL", "TOLY"),
    ("TOR", "TORY"),
    ("TOT", "TOAL"),
    ("TP1", "TPE1"),
    ("TP2", "TPE2"),
    ("TP3", "TPE3"),
    ("TP4", "TPE4"),
    ("TPA", "TPOS"),
    ("TPB", "TPUB"),
    ("TRC", "TSRC"),
    ("TRD", "TRDA"),
    ("TRK", "TRCK"),
    ("TSI", "TSIZ"),
    ("TSS", "TSSE"),
    ("TT1", "TIT1"),
    ("TT2", "TIT2"),
    ("TT3", "TIT3"),
    ("TXT", "TEXT"),
    ("TXX", "TXXX"),
    ("TYE", "TYER"),
    ("UFI", "UFID"),
    ("ULT", "USLT"),
    ("WAF", "WOAF"),
    ("WAR", "WOAR"),
    ("WAS", "WOAS"),
    ("WCM", "WCOM"),
    ("WCP", "WCOP"),
    ("WPB", "WPUB"),
    ("WXX", "WXXX"),
];
