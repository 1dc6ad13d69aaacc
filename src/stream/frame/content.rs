use crate::frame::{
    Comment, Content, FrameKind, Picture, PictureType, Text, UniqueFileIdentifier, Unknown,
};
use crate::stream::encoding::{self, Encoding};
use crate::tag::Version;
use crate::util;
use crate::{Error, ErrorKind};

/// Decodes a frame body according to the kind of frame.
pub fn decode(kind: FrameKind, data: &[u8], version: Version) -> crate::Result<Content> {
    if data.is_empty() && kind != FrameKind::Unknown {
        return Err(Error::new(
            ErrorKind::MalformedFrame,
            "frame does not contain any data",
        ));
    }
    let decoder = Decoder::new(data);
    match kind {
        FrameKind::Text => decoder.text_content(),
        FrameKind::Comment => decoder.comment_content(),
        FrameKind::Picture if version == Version::Id3v22 => decoder.picture_content_v2(),
        FrameKind::Picture => decoder.picture_content_v3(),
        FrameKind::UniqueFileIdentifier => decoder.ufid_content(),
        FrameKind::Unknown => Ok(Content::Unknown(Unknown {
            data: data.to_vec(),
            version,
        })),
    }
}

/// Encodes a frame body for a tag of the specified version.
pub fn encode(content: &Content, version: Version) -> crate::Result<Vec<u8>> {
    let mut encoder = Encoder {
        buf: Vec::new(),
        version,
    };
    match content {
        Content::Text(c) => encoder.text_content(c)?,
        Content::Comment(c) => encoder.comment_content(c)?,
        Content::Picture(c) => encoder.picture_content(c)?,
        Content::UniqueFileIdentifier(c) => encoder.ufid_content(c)?,
        Content::Unknown(c) => {
            if c.version != version {
                log::debug!(
                    "writing opaque frame body read from {} into a {} tag",
                    c.version,
                    version
                );
            }
            encoder.bytes(&c.data)
        }
    }
    Ok(encoder.buf)
}

/// Returns the encoding that is actually written for a tag version. ID3v2.3 has no markers
/// for UTF-16BE and UTF-8, so those are written as UTF-16 with a byte order mark.
fn effective_encoding(encoding: Encoding, version: Version) -> Encoding {
    match (version, encoding) {
        (Version::Id3v24, enc) => enc,
        (_, Encoding::UTF16BE | Encoding::UTF8) => Encoding::UTF16,
        (_, enc) => enc,
    }
}

struct Encoder {
    buf: Vec<u8>,
    version: Version,
}

impl Encoder {
    fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn byte(&mut self, b: u8) {
        self.buf.push(b)
    }

    fn encoding(&mut self, encoding: Encoding) -> Encoding {
        let encoding = effective_encoding(encoding, self.version);
        self.byte(encoding.marker());
        encoding
    }

    fn delim(&mut self, encoding: Encoding) {
        self.buf
            .extend(std::iter::repeat(0).take(encoding.delim_len()));
    }

    fn string(&mut self, encoding: Encoding, text: &str) -> crate::Result<()> {
        if text.contains('\0') {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "text must not contain null characters",
            ));
        }
        let data = encoding::encode(encoding, text)?;
        self.bytes(&data);
        Ok(())
    }

    fn latin1_delimited(&mut self, text: &str) -> crate::Result<()> {
        self.string(Encoding::Latin1, text)?;
        self.delim(Encoding::Latin1);
        Ok(())
    }

    fn text_content(&mut self, content: &Text) -> crate::Result<()> {
        // Neither can be told apart from a single empty value once written.
        match content.values.as_slice() {
            [] => {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "text frame has no values",
                ))
            }
            [_, .., last] if last.is_empty() => {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "the last of multiple text values is empty",
                ))
            }
            _ => {}
        }
        let encoding = self.encoding(content.encoding);
        for (i, value) in content.values.iter().enumerate() {
            if i > 0 {
                self.delim(encoding);
            }
            self.string(encoding, value)?;
        }
        Ok(())
    }

    fn comment_content(&mut self, content: &Comment) -> crate::Result<()> {
        let encoding = self.encoding(content.encoding);
        let mut lang = util::string_to_latin1(&content.lang)?;
        lang.resize(3, b' ');
        self.bytes(&lang);
        self.string(encoding, &content.description)?;
        self.delim(encoding);
        self.string(encoding, &content.text)
    }

    fn picture_content(&mut self, content: &Picture) -> crate::Result<()> {
        let encoding = self.encoding(content.encoding);
        self.latin1_delimited(&content.mime_type)?;
        self.byte(content.picture_type.into());
        self.string(encoding, &content.description)?;
        self.delim(encoding);
        self.bytes(&content.data);
        Ok(())
    }

    fn ufid_content(&mut self, content: &UniqueFileIdentifier) -> crate::Result<()> {
        self.latin1_delimited(&content.owner_identifier)?;
        self.bytes(&content.identifier);
        Ok(())
    }
}

struct Decoder<'a> {
    r: &'a [u8],
}

impl<'a> Decoder<'a> {
    fn new(r: &'a [u8]) -> Self {
        Self { r }
    }

    fn bytes(&mut self, len: usize) -> crate::Result<&'a [u8]> {
        if len > self.r.len() {
            return Err(Error::new(ErrorKind::MalformedFrame, "insufficient data"));
        }
        let (head, tail) = self.r.split_at(len);
        self.r = tail;
        Ok(head)
    }

    fn byte(&mut self) -> crate::Result<u8> {
        Ok(self.bytes(1)?[0])
    }

    fn encoding(&mut self) -> crate::Result<Encoding> {
        Encoding::from_u8(self.byte()?)
    }

    /// Consumes a string up to and including its terminator.
    fn string_delimited(&mut self, encoding: Encoding) -> crate::Result<String> {
        let end = util::find_delim(encoding, self.r, 0)
            .ok_or_else(|| Error::new(ErrorKind::MalformedFrame, "delimiter not found"))?;
        let text = encoding::decode(encoding, &self.r[..end])?;
        self.r = &self.r[end + encoding.delim_len()..];
        Ok(text)
    }

    /// Consumes the remainder as a string. A single trailing terminator is ignored.
    fn string_until_eof(&mut self, encoding: Encoding) -> crate::Result<String> {
        let delim_len = encoding.delim_len();
        let mut data = self.r;
        if data.len() >= delim_len
            && data.len() % delim_len == 0
            && data[data.len() - delim_len..].iter().all(|b| *b == 0)
        {
            data = &data[..data.len() - delim_len];
        }
        self.r = &[];
        encoding::decode(encoding, data)
    }

    fn text_content(mut self) -> crate::Result<Content> {
        let encoding = self.encoding()?;
        let data = self.r;
        let delim_len = encoding.delim_len();

        let mut fields = Vec::new();
        let mut i = 0;
        loop {
            match util::find_delim(encoding, data, i) {
                Some(end) => {
                    fields.push(&data[i..end]);
                    i = end + delim_len;
                }
                None => {
                    fields.push(&data[i.min(data.len())..]);
                    break;
                }
            }
        }
        // A trailing terminator does not start another value.
        if fields.len() > 1 && fields.last().map_or(false, |f| f.is_empty()) {
            fields.pop();
        }

        let values = fields
            .into_iter()
            .map(|field| encoding::decode(encoding, field))
            .collect::<crate::Result<Vec<String>>>()?;
        Ok(Content::Text(Text { encoding, values }))
    }

    fn comment_content(mut self) -> crate::Result<Content> {
        let encoding = self.encoding()?;
        let lang = util::string_from_latin1(self.bytes(3)?);
        let description = self.string_delimited(encoding)?;
        let text = self.string_until_eof(encoding)?;
        Ok(Content::Comment(Comment {
            encoding,
            lang,
            description,
            text,
        }))
    }

    fn picture_content_v2(mut self) -> crate::Result<Content> {
        let encoding = self.encoding()?;
        let format = util::string_from_latin1(self.bytes(3)?);
        let mime_type = match format.as_str() {
            "JPG" => "image/jpeg".to_string(),
            "PNG" => "image/png".to_string(),
            other => {
                log::debug!("no MIME type known for image format {:?}", other);
                format!("image/{}", other.to_ascii_lowercase())
            }
        };
        let picture_type = PictureType::from(self.byte()?);
        let description = self.string_delimited(encoding)?;
        Ok(Content::Picture(Picture {
            encoding,
            mime_type,
            picture_type,
            description,
            data: self.r.to_vec(),
        }))
    }

    fn picture_content_v3(mut self) -> crate::Result<Content> {
        let encoding = self.encoding()?;
        let mime_type = self.string_delimited(Encoding::Latin1)?;
        let picture_type = PictureType::from(self.byte()?);
        let description = self.string_delimited(encoding)?;
        Ok(Content::Picture(Picture {
            encoding,
            mime_type,
            picture_type,
            description,
            data: self.r.to_vec(),
        }))
    }

    fn ufid_content(mut self) -> crate::Result<Content> {
        let owner_identifier = self.string_delimited(Encoding::Latin1)?;
        Ok(Content::UniqueFileIdentifier(UniqueFileIdentifier {
            owner_identifier,
            identifier: self.r.to_vec(),
        }))
    }
}
