use crate::storage::{self, PlainStorage};
use crate::stream::{frame, unsynch};
use crate::tag::{Tag, Version};
use crate::{Error, ErrorKind};
use bitflags::bitflags;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::cmp;
use std::fs;
use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::Path;

/// The largest tag body a synchsafe header size can describe.
const MAX_TAG_SIZE: usize = 0x0FFF_FFFF;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Flags: u8 {
        const UNSYNCHRONISATION = 0x80; // All versions
        const COMPRESSION       = 0x40; // =ID3v2.2
        const EXTENDED_HEADER   = 0x40; // >ID3v2.3, duplicate with TAG_COMPRESSION :(
        const EXPERIMENTAL      = 0x20; // >ID3v2.3
        const FOOTER            = 0x10; // >ID3v2.4
    }
}

struct Header {
    version: Version,
    flags: Flags,
    tag_size: u32,
}

impl Header {
    fn decode(reader: impl io::Read) -> crate::Result<Header> {
        let mut header = Vec::with_capacity(10);
        reader.take(10).read_to_end(&mut header)?;
        if header.len() < 10 || &header[0..3] != b"ID3" {
            return Err(Error::new(
                ErrorKind::NoTag,
                "reader does not contain an id3 tag",
            ));
        }

        let (ver_major, ver_minor) = (header[3], header[4]);
        let version = match ver_major {
            2 => Version::Id3v22,
            3 => Version::Id3v23,
            4 => Version::Id3v24,
            _ => {
                return Err(Error::new(
                    ErrorKind::UnsupportedVersion(ver_major, ver_minor),
                    "unsupported id3 tag version",
                ));
            }
        };
        let flags = Flags::from_bits_truncate(header[5]);
        let tag_size = unsynch::decode_u32(BigEndian::read_u32(&header[6..10]));
        Ok(Header {
            version,
            flags,
            tag_size,
        })
    }

    /// The number of bytes the tag occupies, including the header and footer.
    fn total_size(&self) -> u64 {
        let footer = match self.version {
            Version::Id3v24 if self.flags.contains(Flags::FOOTER) => 10,
            _ => 0,
        };
        10 + u64::from(self.tag_size) + footer
    }

    fn has_extended_header(&self) -> bool {
        self.version != Version::Id3v22 && self.flags.contains(Flags::EXTENDED_HEADER)
    }
}

/// Returns the length of the extended header at the start of the tag body.
fn extended_header_len(data: &[u8], version: Version) -> crate::Result<usize> {
    if data.len() < 4 {
        return Err(Error::new(
            ErrorKind::MalformedFrame,
            "tag is too short to hold the extended header",
        ));
    }
    let raw = BigEndian::read_u32(&data[0..4]);
    let len = match version {
        // The ID3v2.3 size excludes the size field itself.
        Version::Id3v23 => raw as usize + 4,
        _ => unsynch::decode_u32(raw) as usize,
    };
    if len < 6 || len > data.len() {
        return Err(Error::new(
            ErrorKind::MalformedFrame,
            format!("extended header declares an invalid size of {} bytes", len),
        ));
    }
    Ok(len)
}

/// Controls how the decoder reacts to frames that can not be decoded.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ParseMode {
    /// Abort at the first broken frame. The returned error carries the frame ID, its offset and
    /// the frames decoded so far.
    #[default]
    Strict,
    /// Record broken frames in [`Tag::skipped_frames`] and continue with the next frame.
    Lenient,
}

/// A frame that was left out of a tag decoded with [`ParseMode::Lenient`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SkippedFrame {
    /// The ID of the frame, if the header was readable.
    pub id: Option<String>,
    /// The offset of the frame header, relative to the first byte after the tag header.
    pub offset: u64,
    /// Why the frame was skipped.
    pub reason: String,
}

/// The `Decoder` may be used to decode tags with custom settings.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    mode: ParseMode,
}

impl Decoder {
    /// Constructs a new `Decoder` which uses [`ParseMode::Strict`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how broken frames are handled.
    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Decodes the tag at the start of the reader.
    ///
    /// Exactly the number of bytes declared by the tag header are consumed, anything following
    /// the tag is never read.
    pub fn decode(&self, mut reader: impl io::Read) -> crate::Result<Tag> {
        let header = Header::decode(&mut reader)?;
        if header.version == Version::Id3v22 && header.flags.contains(Flags::COMPRESSION) {
            return Err(Error::new(
                ErrorKind::UnsupportedFeature,
                "id3v2.2 compression is not supported",
            ));
        }

        let mut data = Vec::new();
        reader
            .take(u64::from(header.tag_size))
            .read_to_end(&mut data)?;
        if data.len() < header.tag_size as usize {
            log::debug!(
                "tag declares {} bytes but only {} could be read",
                header.tag_size,
                data.len()
            );
        }

        let tag_unsynchronisation = header.flags.contains(Flags::UNSYNCHRONISATION);
        // Before ID3v2.4, unsynchronisation is applied to the tag body as a whole.
        if tag_unsynchronisation && header.version != Version::Id3v24 {
            log::debug!("resynchronising {} tag body", header.version);
            unsynch::decode_vec(&mut data);
        }

        let mut tag = Tag::with_version(header.version);
        tag.flags = header.flags.bits();
        tag.size = header.tag_size;

        let mut offset = 0;
        if header.has_extended_header() {
            offset = extended_header_len(&data, header.version)
                .map_err(|err| err.with_offset(0).with_tag(tag.clone()))?;
            log::debug!("skipping {} byte extended header", offset);
        }

        while offset < data.len() {
            let rs = frame::decode(
                &data[offset..],
                header.version,
                tag_unsynchronisation && header.version == Version::Id3v24,
            );
            match rs {
                Ok(None) => break, // Padding.
                Ok(Some((len, Ok(frame)))) => {
                    tag.frames.push(frame);
                    offset += len;
                }
                Ok(Some((len, Err(err)))) => {
                    self.skip_frame(&mut tag, err, offset)?;
                    offset += len;
                }
                Err(err) => {
                    // The end of the frame is unknown, so nothing after it can be trusted.
                    self.skip_frame(&mut tag, err, offset)?;
                    break;
                }
            }
        }
        Ok(tag)
    }

    /// Decodes the tag at the start of the file at the specified path.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> crate::Result<Tag> {
        let file = fs::File::open(path)?;
        self.decode(io::BufReader::new(file))
    }

    fn skip_frame(&self, tag: &mut Tag, err: Error, offset: usize) -> crate::Result<()> {
        let err = err.with_offset(offset as u64);
        match self.mode {
            ParseMode::Strict => Err(err.with_tag(tag.clone())),
            ParseMode::Lenient => {
                log::warn!("skipping frame: {}", err);
                tag.skipped.push(SkippedFrame {
                    id: err.frame_id.clone(),
                    offset: offset as u64,
                    reason: err.to_string(),
                });
                Ok(())
            }
        }
    }
}

/// The `Encoder` may be used to encode tags.
#[derive(Clone, Debug)]
pub struct Encoder {
    version: Version,
    unsynchronisation: bool,
    compression: bool,
    padding: Option<usize>,
    max_padding: Option<usize>,
}

impl Encoder {
    /// Constructs a new `Encoder` with the following configuration:
    ///
    /// * version is ID3v2.4
    /// * unsynchronization is disabled due to compatibility issues
    /// * no compression
    /// * no padding
    pub fn new() -> Self {
        Self {
            version: Version::Id3v24,
            unsynchronisation: false,
            compression: false,
            padding: None,
            max_padding: None,
        }
    }

    /// Sets the padding that is written after the tag.
    ///
    /// When writing to a file, space left over in the existing tag region is always zero-filled,
    /// regardless of this setting.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Sets the largest amount of unused space a tag region in a file may keep after a write.
    ///
    /// When a new tag leaves more than `max_padding` bytes of the existing region unused, the audio
    /// data is moved forward so that at most `max_padding` bytes of padding remain. By default the
    /// region is never shrunk.
    pub fn max_padding(mut self, max_padding: usize) -> Self {
        self.max_padding = Some(max_padding);
        self
    }

    /// Sets the ID3 version. Only ID3v2.3 and ID3v2.4 can be written.
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Enables or disables the unsynchronisation scheme.
    ///
    /// This avoids patterns that resemble MP3-frame headers from being
    /// encoded. If you are encoding to MP3 files and wish to be compatible
    /// with very old tools, you probably want this enabled.
    pub fn unsynchronisation(mut self, unsynchronisation: bool) -> Self {
        self.unsynchronisation = unsynchronisation;
        self
    }

    /// Enables or disables zlib compression of frame bodies.
    pub fn compression(mut self, compression: bool) -> Self {
        self.compression = compression;
        self
    }

    /// Encodes the specified tag using the settings set in the encoder.
    ///
    /// Note that the plain tag is written, regardless of the original contents. To safely encode a
    /// tag to an MP3 file, use `Encoder::encode_to_path`.
    pub fn encode(&self, tag: &Tag, mut writer: impl io::Write) -> crate::Result<()> {
        if self.version == Version::Id3v22 {
            return Err(Error::new(
                ErrorKind::UnsupportedFeature,
                "writing ID3v2.2 tags is not supported",
            ));
        }

        let mut frame_data = Vec::new();
        for frame in tag.frames() {
            let offset = frame_data.len() as u64;
            frame::encode(
                &mut frame_data,
                frame,
                self.version,
                self.unsynchronisation,
                self.compression,
            )
            .map_err(|err| err.with_offset(offset))?;
        }
        // In ID3v2.3, unsynchronisation is applied to the whole tag data at once, not for each
        // frame separately.
        if self.version == Version::Id3v23 && self.unsynchronisation {
            unsynch::encode_vec(&mut frame_data)
        }

        let mut flags = Flags::empty();
        flags.set(Flags::UNSYNCHRONISATION, self.unsynchronisation);
        let padding = self.padding.unwrap_or(0);
        let tag_size = frame_data.len() + padding;
        if tag_size > MAX_TAG_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("tag of {} bytes exceeds the maximum tag size", tag_size),
            ));
        }

        writer.write_all(b"ID3")?;
        writer.write_all(&[self.version.minor(), 0])?;
        writer.write_u8(flags.bits())?;
        writer.write_u32::<BigEndian>(unsynch::encode_u32(tag_size as u32))?;
        writer.write_all(&frame_data[..])?;
        writer.write_all(&vec![0; padding])?;
        Ok(())
    }

    /// Encodes a tag and replaces any existing tag in the file pointed to by the specified path.
    ///
    /// A tag without frames is not written; any existing tag is removed from the file instead.
    pub fn encode_to_path(&self, tag: &Tag, path: impl AsRef<Path>) -> crate::Result<()> {
        let mut file = fs::OpenOptions::new().read(true).write(true).open(path)?;
        // Create a new tag if none could be located.
        let location = locate_id3v2(&mut file)?.unwrap_or(0..0);
        let mut storage = match self.max_padding {
            Some(max) => {
                let max = max as u64;
                let preferred = cmp::min(storage::DEFAULT_PADDING, max);
                PlainStorage::with_padding(file, location, preferred, Some(max))
            }
            None => PlainStorage::new(file, location),
        };

        if tag.frames().next().is_none() {
            log::debug!("tag has no frames, removing the tag region");
            storage.remove()?;
            return Ok(());
        }
        let mut data = Vec::new();
        self.encode(tag, &mut data)?;
        storage.write(&data)?;
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Locates the tag at the start of the reader.
///
/// The returned range covers the tag header, the declared tag size, an optional footer and any
/// zero padding that immediately follows.
pub fn locate_id3v2(mut reader: impl io::Read + io::Seek) -> crate::Result<Option<Range<u64>>> {
    reader.seek(io::SeekFrom::Start(0))?;
    let header = match Header::decode(&mut reader) {
        Ok(v) => v,
        Err(err) => match err.kind {
            ErrorKind::NoTag => return Ok(None),
            _ => return Err(err),
        },
    };

    let tag_size = header.total_size();
    reader.seek(io::SeekFrom::Start(tag_size))?;
    let num_padding = io::BufReader::new(reader)
        .bytes()
        .take_while(|rs| rs.as_ref().map(|b| *b == 0x00).unwrap_or(false))
        .count();
    Ok(Some(0..tag_size + num_padding as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Content, Encoding, Frame, Picture, PictureType, UniqueFileIdentifier};
    use crate::taglike::TagLike;
    use std::io::Cursor;

    fn make_tag() -> Tag {
        let mut tag = Tag::new();
        tag.set_title("Title");
        tag.set_artist("Artist");
        tag.set_album("Album");
        tag.set_year(2015);
        tag.set_language("eng");
        tag.set_comment("A comment");
        tag.set_cover_image("image/jpeg", "an image", vec![0xFF, 0xD8, 0xFF, 0x00, 0x01]);
        tag.set_id("http://musicbrainz.org", "6b3f2ee6");
        tag.add_frame(Frame::with_content(
            "PRIV",
            Content::Unknown(crate::frame::Unknown {
                data: b"private".to_vec(),
                version: Version::Id3v24,
            }),
        ));
        tag
    }

    fn header(version: u8, flags: u8, size: u32) -> Vec<u8> {
        let mut buf = b"ID3".to_vec();
        buf.extend([version, 0, flags]);
        buf.extend(unsynch::encode_u32(size).to_be_bytes());
        buf
    }

    fn text_frame_v3(id: &str, text: &str) -> Vec<u8> {
        let mut buf = id.as_bytes().to_vec();
        buf.extend((text.len() as u32 + 1).to_be_bytes());
        buf.extend([0, 0, 0]);
        buf.extend(text.as_bytes());
        buf
    }

    #[test]
    fn write_read_id3v23() {
        let tag = make_tag();
        let mut buf = Vec::new();
        Encoder::new()
            .version(Version::Id3v23)
            .encode(&tag, &mut buf)
            .unwrap();
        assert_eq!(&buf[0..5], b"ID3\x03\x00");
        let decoded = Decoder::new().decode(&buf[..]).unwrap();
        assert_eq!(decoded.version(), Version::Id3v23);
        assert_eq!(decoded.title(), Some("Title"));
        assert_eq!(decoded.year().unwrap(), Some(2015));
        assert_eq!(decoded.frames().count(), tag.frames().count());
    }

    #[test]
    fn write_read_id3v24() {
        let mut tag = make_tag();
        tag.set_text_encoding(Encoding::UTF8);
        tag.set_title("Tïtle");
        let mut buf = Vec::new();
        Encoder::new().encode(&tag, &mut buf).unwrap();
        let decoded = Decoder::new().decode(&buf[..]).unwrap();
        assert_eq!(decoded, tag);
    }

    #[test]
    fn write_read_unsynchronised() {
        for version in [Version::Id3v23, Version::Id3v24] {
            let tag = make_tag();
            let mut buf = Vec::new();
            Encoder::new()
                .version(version)
                .unsynchronisation(true)
                .encode(&tag, &mut buf)
                .unwrap();
            assert_eq!(buf[5] & 0x80, 0x80);
            let decoded = Decoder::new().decode(&buf[..]).unwrap();
            assert_eq!(decoded.cover_image().unwrap().data, [0xFF, 0xD8, 0xFF, 0x00, 0x01]);
            assert_eq!(decoded.frames().count(), tag.frames().count());
        }
    }

    #[test]
    fn write_read_compressed() {
        let tag = make_tag();
        let mut buf = Vec::new();
        Encoder::new().compression(true).encode(&tag, &mut buf).unwrap();
        let decoded = Decoder::new().decode(&buf[..]).unwrap();
        assert_eq!(decoded, tag);
    }

    #[test]
    fn padding_is_counted_in_size() {
        let mut tag = Tag::new();
        tag.set_text_encoding(Encoding::Latin1);
        tag.set_title("x");
        let mut buf = Vec::new();
        Encoder::new()
            .version(Version::Id3v23)
            .padding(16)
            .encode(&tag, &mut buf)
            .unwrap();
        // Header, TIT2 frame of 10 + 2 bytes and padding.
        assert_eq!(buf.len(), 10 + 12 + 16);
        assert_eq!(&buf[6..10], &[0, 0, 0, 12 + 16]);
        let decoded = Decoder::new().decode(&buf[..]).unwrap();
        assert_eq!(decoded.frames().count(), 1);
    }

    #[test]
    fn refuses_id3v22() {
        let err = Encoder::new()
            .version(Version::Id3v22)
            .encode(&make_tag(), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedFeature));
    }

    #[test]
    fn encode_error_names_frame_and_offset() {
        let mut tag = Tag::new();
        tag.set_text_encoding(Encoding::Latin1);
        tag.set_title("x");
        tag.set_album("日本");
        let err = Encoder::new().encode(&tag, &mut Vec::new()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Encoding));
        assert_eq!(err.frame_id.as_deref(), Some("TALB"));
        // Preceded by the TIT2 frame of 10 + 2 bytes.
        assert_eq!(err.offset, Some(12));
    }

    #[test]
    fn no_tag() {
        let err = Decoder::new().decode(&b"RIFF\x00\x00\x00\x00\x00\x00"[..]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoTag));
        let err = Decoder::new().decode(&b"ID3"[..]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoTag));
    }

    #[test]
    fn unsupported_version() {
        let err = Decoder::new().decode(&header(5, 0, 0)[..]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedVersion(5, 0)));
    }

    #[test]
    fn trailing_data_is_ignored() {
        let frame = text_frame_v3("TIT2", "Title");
        let mut data = header(3, 0, frame.len() as u32);
        data.extend(&frame);
        // Something that looks like another frame follows the tag.
        data.extend(text_frame_v3("TALB", "Not part of the tag"));
        let tag = Decoder::new().decode(&data[..]).unwrap();
        assert_eq!(tag.title(), Some("Title"));
        assert_eq!(tag.album(), None);
        assert_eq!(tag.frames().count(), 1);
    }

    #[test]
    fn stops_at_padding() {
        let frame = text_frame_v3("TIT2", "Title");
        let mut data = header(3, 0, frame.len() as u32 + 32);
        data.extend(&frame);
        data.extend([0; 32]);
        let tag = Decoder::new().decode(&data[..]).unwrap();
        assert_eq!(tag.frames().count(), 1);
        assert!(tag.skipped_frames().is_empty());
    }

    #[test]
    fn skips_extended_header() {
        let frame = text_frame_v3("TIT2", "Title");
        let ext = [0, 0, 0, 6, 0, 0, 0, 0, 0, 0];
        let mut data = header(3, 0x40, (ext.len() + frame.len()) as u32);
        data.extend(ext);
        data.extend(&frame);
        let tag = Decoder::new().decode(&data[..]).unwrap();
        assert_eq!(tag.title(), Some("Title"));
    }

    #[test]
    fn tag_unsynchronisation_id3v23() {
        // UFID body "o\0" followed by the identifier 0xFF 0x00, which is stored unsynchronised.
        let frame = b"UFID\x00\x00\x00\x04\x00\x00o\x00\xFF\x00\x00";
        let mut data = header(3, 0x80, frame.len() as u32);
        data.extend(frame);
        let tag = Decoder::new().decode(&data[..]).unwrap();
        assert_eq!(tag.id_for_owner("o"), Some(&[0xFF, 0x00][..]));
    }

    fn truncated_tag() -> Vec<u8> {
        let first = text_frame_v3("TIT2", "Title");
        let mut second = text_frame_v3("TALB", "Album");
        // Claim a body far larger than the tag.
        second[4..8].copy_from_slice(&100u32.to_be_bytes());
        let mut data = header(3, 0, (first.len() + second.len()) as u32);
        data.extend(&first);
        data.extend(&second);
        data
    }

    #[test]
    fn truncated_frame_strict() {
        let err = Decoder::new().decode(&truncated_tag()[..]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedFrame));
        assert_eq!(err.frame_id.as_deref(), Some("TALB"));
        assert_eq!(err.offset, Some(16));
        let partial = err.partial_tag.unwrap();
        assert_eq!(partial.title(), Some("Title"));
    }

    #[test]
    fn truncated_frame_lenient() {
        let tag = Decoder::new()
            .mode(ParseMode::Lenient)
            .decode(&truncated_tag()[..])
            .unwrap();
        assert_eq!(tag.title(), Some("Title"));
        assert_eq!(tag.album(), None);
        let skipped = tag.skipped_frames();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].id.as_deref(), Some("TALB"));
        assert_eq!(skipped[0].offset, 16);
    }

    #[test]
    fn broken_body_lenient_continues() {
        // A text frame with an invalid encoding marker followed by a valid frame.
        let mut broken = text_frame_v3("TPE1", "Artist");
        broken[10] = 9;
        let good = text_frame_v3("TIT2", "Title");
        let mut data = header(3, 0, (broken.len() + good.len()) as u32);
        data.extend(&broken);
        data.extend(&good);

        let err = Decoder::new().decode(&data[..]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Encoding));

        let tag = Decoder::new()
            .mode(ParseMode::Lenient)
            .decode(&data[..])
            .unwrap();
        assert_eq!(tag.title(), Some("Title"));
        assert_eq!(tag.skipped_frames()[0].id.as_deref(), Some("TPE1"));
    }

    #[test]
    fn read_id3v22() {
        let mut body = b"TT2\x00\x00\x06\x00Title".to_vec();
        body.extend(b"TYE\x00\x00\x05\x002015");
        body.extend(b"PIC\x00\x00\x08\x00JPG\x00\x00\xFF\xD8");
        body.extend(b"UFI\x00\x00\x04o\x00id");
        let mut data = header(2, 0, body.len() as u32);
        data.extend(&body);
        let tag = Decoder::new().decode(&data[..]).unwrap();
        assert_eq!(tag.version(), Version::Id3v22);
        assert_eq!(tag.title(), Some("Title"));
        assert_eq!(tag.year().unwrap(), Some(2015));
        assert_eq!(tag.id().unwrap().as_deref(), Some("id"));
        let picture = tag.get("APIC").unwrap().content().picture().unwrap();
        assert_eq!(
            picture,
            &Picture {
                encoding: Encoding::Latin1,
                mime_type: "image/jpeg".to_string(),
                picture_type: PictureType::Other,
                description: String::new(),
                data: vec![0xFF, 0xD8],
            }
        );
    }

    #[test]
    fn id3v22_compression_is_unsupported() {
        let err = Decoder::new().decode(&header(2, 0x40, 0)[..]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedFeature));
    }

    #[test]
    fn locate() {
        let mut tag = Tag::new();
        tag.add_frame(UniqueFileIdentifier {
            owner_identifier: "o".to_string(),
            identifier: b"id".to_vec(),
        });
        let mut buf = Vec::new();
        Encoder::new().padding(8).encode(&tag, &mut buf).unwrap();
        let tag_len = buf.len() as u64;
        buf.extend([0, 0, 0xFF, 0xFB]);
        let range = locate_id3v2(Cursor::new(&buf)).unwrap().unwrap();
        assert_eq!(range, 0..tag_len + 2);

        assert!(locate_id3v2(Cursor::new(b"\xFF\xFB\x90\x00")).unwrap().is_none());
    }
}
