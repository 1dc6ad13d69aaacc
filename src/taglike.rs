use crate::frame::{
    Comment, Content, Encoding, Frame, Picture, PictureType, Text, UniqueFileIdentifier,
};
use crate::{Error, ErrorKind};
use std::collections::BTreeMap;

/// A picture as exposed by [`TagLike::cover_image`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// The type of picture.
    pub picture_type: PictureType,
    /// The picture's MIME type.
    pub mime_type: String,
    /// A description of the picture's contents.
    pub description: String,
    /// The image data.
    pub data: Vec<u8>,
}

impl From<&Picture> for Image {
    fn from(picture: &Picture) -> Image {
        Image {
            picture_type: picture.picture_type,
            mime_type: picture.mime_type.clone(),
            description: picture.description.clone(),
            data: picture.data.clone(),
        }
    }
}

/// TagLike is a trait that provides a set of useful default methods that make manipulation of tag
/// frames easier.
///
/// Setters build whole new frames with the text encoding configured on the tag and replace every
/// frame with the same ID. Getters read the first frame with the ID.
pub trait TagLike: private::Sealed {
    #[doc(hidden)]
    fn frames_vec(&self) -> &Vec<Frame>;
    #[doc(hidden)]
    fn frames_vec_mut(&mut self) -> &mut Vec<Frame>;
    #[doc(hidden)]
    fn text_encoding(&self) -> Encoding;

    /// Returns the first text value of the frame with the specified identifier.
    /// Returns `None` if the frame with the specified ID can't be found or if the content is not
    /// `Content::Text`.
    #[doc(hidden)]
    fn text_for_frame_id(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|frame| frame.content().text())
    }

    /// Returns a reference to the first frame with the specified identifier.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Frame, Tag, TagLike};
    /// use easyid3::frame::Encoding;
    ///
    /// let mut tag = Tag::new();
    ///
    /// tag.add_frame(Frame::text("TIT2", Encoding::UTF8, "Hello"));
    ///
    /// assert!(tag.get("TIT2").is_some());
    /// assert!(tag.get("TALB").is_none());
    /// ```
    fn get(&self, id: impl AsRef<str>) -> Option<&Frame> {
        self.frames_vec()
            .iter()
            .find(|frame| frame.id() == id.as_ref())
    }

    /// Returns all frames with the specified ID, in tag order.
    fn get_all(&self, id: impl AsRef<str>) -> Vec<&Frame> {
        self.frames_vec()
            .iter()
            .filter(|frame| frame.id() == id.as_ref())
            .collect()
    }

    /// Appends the frame to the tag. Frames with the same ID are kept.
    fn add_frame(&mut self, new_frame: impl Into<Frame>) {
        self.frames_vec_mut().push(new_frame.into());
    }

    /// Replaces every frame with the specified ID.
    ///
    /// The new frames take the position of the first frame that was replaced, or are appended if
    /// the tag held no such frame.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Frame, Tag, TagLike};
    /// use easyid3::frame::Encoding;
    ///
    /// let mut tag = Tag::new();
    /// tag.add_frame(Frame::text("TIT2", Encoding::UTF8, "Title"));
    /// tag.add_frame(Frame::text("TALB", Encoding::UTF8, "Album"));
    /// tag.set_all("TIT2", vec![Frame::text("TIT2", Encoding::UTF8, "Other")]);
    ///
    /// let ids: Vec<_> = tag.frames().map(|frame| frame.id()).collect();
    /// assert_eq!(ids, ["TIT2", "TALB"]);
    /// ```
    fn set_all(&mut self, id: impl AsRef<str>, frames: impl IntoIterator<Item = Frame>) {
        let id = id.as_ref();
        let frames_vec = self.frames_vec_mut();
        let position = frames_vec
            .iter()
            .position(|frame| frame.id() == id)
            .unwrap_or(frames_vec.len());
        // Every removed frame is at or after `position`.
        frames_vec.retain(|frame| frame.id() != id);
        frames_vec.splice(position..position, frames);
    }

    /// Removes all frames from the tag.
    fn delete_all(&mut self) {
        self.frames_vec_mut().clear();
    }

    /// Removes all frames with the specified identifier and returns them.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_title("Title");
    ///
    /// let removed = tag.remove("TIT2");
    /// assert_eq!(removed.len(), 1);
    /// assert!(tag.title().is_none());
    /// ```
    fn remove(&mut self, id: impl AsRef<str>) -> Vec<Frame> {
        let mut from = Vec::new();
        std::mem::swap(&mut from, self.frames_vec_mut());
        let (keep, remove): (Vec<Frame>, Vec<Frame>) = from
            .into_iter()
            .partition(|frame| frame.id() != id.as_ref());
        *self.frames_vec_mut() = keep;
        remove
    }

    /// Replaces every frame with the specified ID by a single text frame.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_text("TALB", "Album");
    /// assert_eq!(tag.get("TALB").unwrap().content().text(), Some("Album"));
    /// ```
    fn set_text(&mut self, id: impl AsRef<str>, text: impl Into<String>) {
        let frame = Frame::with_content(
            id.as_ref(),
            Content::Text(Text::new(self.text_encoding(), text)),
        );
        self.set_all(id, vec![frame]);
    }

    /// Returns every text value of every frame with the specified ID, in tag order.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_text_values("TPE1", ["Simon", "Garfunkel"]);
    /// assert_eq!(tag.text_values("TPE1"), ["Simon", "Garfunkel"]);
    /// assert_eq!(tag.artist(), Some("Simon"));
    /// ```
    fn text_values(&self, id: impl AsRef<str>) -> Vec<&str> {
        self.get_all(id)
            .into_iter()
            .filter_map(|frame| frame.content().text_values())
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Replaces every frame with the specified ID by a single text frame holding all values.
    /// Without values, the frames are removed.
    fn set_text_values(
        &mut self,
        id: impl AsRef<str>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let text = Text::with_values(self.text_encoding(), values);
        let frames = if text.values.is_empty() {
            Vec::new()
        } else {
            vec![Frame::with_content(id.as_ref(), Content::Text(text))]
        };
        self.set_all(id, frames);
    }

    /// Appends values to the first text frame with the specified ID, or adds a new frame if
    /// there is none.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_language("eng");
    /// tag.append_text_values("TLAN", ["deu", "nld"]);
    /// assert_eq!(tag.text_values("TLAN"), ["eng", "deu", "nld"]);
    /// assert_eq!(tag.get_all("TLAN").len(), 1);
    /// ```
    fn append_text_values(
        &mut self,
        id: impl AsRef<str>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let id = id.as_ref();
        let position = self.frames_vec().iter().position(|frame| {
            frame.id() == id && frame.content().text_values().is_some()
        });
        match position {
            Some(i) => {
                if let Content::Text(text) = self.frames_vec_mut()[i].content_mut() {
                    text.values.extend(values.into_iter().map(Into::into));
                }
            }
            None => {
                let text = Text::with_values(self.text_encoding(), values);
                if !text.values.is_empty() {
                    self.add_frame(Frame::with_content(id, Content::Text(text)));
                }
            }
        }
    }

    /// Returns the title (TIT2).
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// assert!(tag.title().is_none());
    /// tag.set_title("Title");
    /// assert_eq!(tag.title(), Some("Title"));
    /// ```
    fn title(&self) -> Option<&str> {
        self.text_for_frame_id("TIT2")
    }

    /// Sets the title (TIT2).
    fn set_title(&mut self, title: impl Into<String>) {
        self.set_text("TIT2", title);
    }

    /// Returns the album (TALB).
    fn album(&self) -> Option<&str> {
        self.text_for_frame_id("TALB")
    }

    /// Sets the album (TALB).
    fn set_album(&mut self, album: impl Into<String>) {
        self.set_text("TALB", album);
    }

    /// Returns the artist (TPE1).
    fn artist(&self) -> Option<&str> {
        self.text_for_frame_id("TPE1")
    }

    /// Sets the artist (TPE1).
    fn set_artist(&mut self, artist: impl Into<String>) {
        self.set_text("TPE1", artist);
    }

    /// Returns the language (TLAN).
    fn language(&self) -> Option<&str> {
        self.text_for_frame_id("TLAN")
    }

    /// Sets the language (TLAN).
    fn set_language(&mut self, language: impl Into<String>) {
        self.set_text("TLAN", language);
    }

    /// Returns the year (TYER).
    ///
    /// Returns an error with kind [`ErrorKind::Format`] if the frame does not hold a number.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// assert_eq!(tag.year().unwrap(), None);
    /// tag.set_year(2014);
    /// assert_eq!(tag.year().unwrap(), Some(2014));
    /// tag.set_text("TYER", "last year");
    /// assert!(tag.year().is_err());
    /// ```
    fn year(&self) -> crate::Result<Option<i32>> {
        let text = match self.text_for_frame_id("TYER") {
            Some(text) => text,
            None => return Ok(None),
        };
        let year = text.parse().map_err(|_| {
            Error::new(ErrorKind::Format, format!("{:?} is not a year", text))
                .with_frame_id("TYER")
        })?;
        Ok(Some(year))
    }

    /// Sets the year (TYER).
    fn set_year(&mut self, year: i32) {
        self.set_text("TYER", year.to_string());
    }

    /// Returns the text of the first comment (COMM).
    fn comment(&self) -> Option<&str> {
        self.get("COMM")
            .and_then(|frame| frame.content().comment())
            .map(|comment| comment.text.as_str())
    }

    /// Replaces all comments by a single English comment without description.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_comment("Nice track");
    /// assert_eq!(tag.comment(), Some("Nice track"));
    ///
    /// let comment = tag.get("COMM").unwrap().content().comment().unwrap();
    /// assert_eq!(comment.lang, "eng");
    /// assert_eq!(comment.description, "");
    /// ```
    fn set_comment(&mut self, text: impl Into<String>) {
        let comment = Comment {
            encoding: self.text_encoding(),
            lang: "eng".to_string(),
            description: String::new(),
            text: text.into(),
        };
        self.set_all("COMM", vec![comment.into()]);
    }

    /// Returns the text of every comment (COMM), in tag order.
    fn comments(&self) -> Vec<&str> {
        self.get_all("COMM")
            .into_iter()
            .filter_map(|frame| frame.content().comment())
            .map(|comment| comment.text.as_str())
            .collect()
    }

    /// Returns all pictures (APIC), in tag order.
    fn images(&self) -> Vec<Image> {
        self.get_all("APIC")
            .into_iter()
            .filter_map(|frame| frame.content().picture())
            .map(Image::from)
            .collect()
    }

    /// Returns the first picture of the specified type.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    /// use easyid3::frame::PictureType;
    ///
    /// let mut tag = Tag::new();
    /// tag.add_image(PictureType::Artist, "image/png", "band", vec![1]);
    /// tag.add_image(PictureType::CoverBack, "image/png", "back", vec![2]);
    ///
    /// assert_eq!(tag.images().len(), 2);
    /// assert_eq!(tag.image_by_type(PictureType::CoverBack).unwrap().data, [2]);
    /// assert!(tag.image_by_type(PictureType::CoverFront).is_none());
    /// ```
    fn image_by_type(&self, picture_type: PictureType) -> Option<Image> {
        self.get_all("APIC")
            .into_iter()
            .filter_map(|frame| frame.content().picture())
            .find(|picture| picture.picture_type == picture_type)
            .map(Image::from)
    }

    /// Appends a picture, keeping the pictures already in the tag.
    fn add_image(
        &mut self,
        picture_type: PictureType,
        mime_type: impl Into<String>,
        description: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        let picture = Picture {
            encoding: self.text_encoding(),
            mime_type: mime_type.into(),
            picture_type,
            description: description.into(),
            data: data.into(),
        };
        self.add_frame(picture);
    }

    /// Replaces all pictures by the specified images.
    fn set_images(&mut self, images: impl IntoIterator<Item = Image>) {
        let encoding = self.text_encoding();
        let frames: Vec<Frame> = images
            .into_iter()
            .map(|image| {
                Picture {
                    encoding,
                    mime_type: image.mime_type,
                    picture_type: image.picture_type,
                    description: image.description,
                    data: image.data,
                }
                .into()
            })
            .collect();
        self.set_all("APIC", frames);
    }

    /// Returns the first picture with type [`PictureType::CoverFront`].
    fn cover_image(&self) -> Option<Image> {
        self.image_by_type(PictureType::CoverFront)
    }

    /// Replaces all pictures by a single front cover.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    /// use easyid3::frame::PictureType;
    ///
    /// let mut tag = Tag::new();
    /// tag.set_cover_image("image/png", "cover", vec![0x89, 0x50, 0x4E, 0x47]);
    ///
    /// let image = tag.cover_image().unwrap();
    /// assert_eq!(image.picture_type, PictureType::CoverFront);
    /// assert_eq!(image.mime_type, "image/png");
    /// assert_eq!(image.data, [0x89, 0x50, 0x4E, 0x47]);
    /// ```
    fn set_cover_image(
        &mut self,
        mime_type: impl Into<String>,
        description: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        let picture = Picture {
            encoding: self.text_encoding(),
            mime_type: mime_type.into(),
            picture_type: PictureType::CoverFront,
            description: description.into(),
            data: data.into(),
        };
        self.set_all("APIC", vec![picture.into()]);
    }

    /// Returns the owners of all unique file identifiers (UFID), in tag order.
    fn owners(&self) -> Vec<&str> {
        self.frames_vec()
            .iter()
            .filter_map(|frame| frame.content().unique_file_identifier())
            .map(|ufid| ufid.owner_identifier.as_str())
            .collect()
    }

    /// Returns the identifier stored for the specified owner.
    fn id_for_owner(&self, owner: impl AsRef<str>) -> Option<&[u8]> {
        self.frames_vec()
            .iter()
            .filter_map(|frame| frame.content().unique_file_identifier())
            .find(|ufid| ufid.owner_identifier == owner.as_ref())
            .map(|ufid| ufid.identifier.as_slice())
    }

    /// Returns all unique file identifiers keyed by owner.
    fn ids(&self) -> BTreeMap<&str, &[u8]> {
        self.frames_vec()
            .iter()
            .filter_map(|frame| frame.content().unique_file_identifier())
            .map(|ufid| (ufid.owner_identifier.as_str(), ufid.identifier.as_slice()))
            .collect()
    }

    /// Returns the unique file identifier as text.
    ///
    /// Fails with [`ErrorKind::AmbiguousFrame`] if identifiers of more than one owner are present,
    /// use [`TagLike::id_for_owner`] in that case.
    ///
    /// # Example
    /// ```
    /// use easyid3::{ErrorKind, Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_id("http://musicbrainz.org", "a3b4");
    /// assert_eq!(tag.id().unwrap().as_deref(), Some("a3b4"));
    ///
    /// tag.set_id("CDDB", "0a0b");
    /// assert!(matches!(tag.id().unwrap_err().kind, ErrorKind::AmbiguousFrame));
    /// ```
    fn id(&self) -> crate::Result<Option<String>> {
        let mut ufids = self
            .frames_vec()
            .iter()
            .filter_map(|frame| frame.content().unique_file_identifier());
        let ufid = match ufids.next() {
            Some(ufid) => ufid,
            None => return Ok(None),
        };
        if ufids.any(|other| other.owner_identifier != ufid.owner_identifier) {
            return Err(Error::new(
                ErrorKind::AmbiguousFrame,
                "identifiers of multiple owners are present",
            )
            .with_frame_id("UFID"));
        }
        let id = String::from_utf8(ufid.identifier.clone())
            .map_err(|err| Error::from(err).with_frame_id("UFID"))?;
        Ok(Some(id))
    }

    /// Sets the identifier for the owner, replacing only the identifier of that owner.
    fn set_id(&mut self, owner: impl Into<String>, id: impl AsRef<[u8]>) {
        let frame: Frame = UniqueFileIdentifier {
            owner_identifier: owner.into(),
            identifier: id.as_ref().to_vec(),
        }
        .into();
        let frames_vec = self.frames_vec_mut();
        let same_owner = |f: &Frame| {
            f.content().unique_file_identifier().map(|u| &u.owner_identifier)
                == frame.content().unique_file_identifier().map(|u| &u.owner_identifier)
        };
        match frames_vec.iter().position(|f| same_owner(f)) {
            Some(position) => {
                frames_vec.retain(|f| !same_owner(f));
                frames_vec.insert(position, frame);
            }
            None => frames_vec.push(frame),
        }
    }

    /// Replaces all unique file identifiers by one frame per owner.
    ///
    /// # Example
    /// ```
    /// use easyid3::{Tag, TagLike};
    ///
    /// let mut tag = Tag::new();
    /// tag.set_id("old", "1");
    /// tag.set_ids([("CDDB", "2"), ("http://musicbrainz.org", "3")]);
    /// assert_eq!(tag.owners(), ["CDDB", "http://musicbrainz.org"]);
    /// ```
    fn set_ids<K, V>(&mut self, ids: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: AsRef<[u8]>,
    {
        let frames: Vec<Frame> = ids
            .into_iter()
            .map(|(owner, id)| {
                UniqueFileIdentifier {
                    owner_identifier: owner.into(),
                    identifier: id.as_ref().to_vec(),
                }
                .into()
            })
            .collect();
        self.set_all("UFID", frames);
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    use crate::tag::Tag;

    pub trait Sealed {}

    impl Sealed for Tag {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    #[test]
    fn setters_replace_all_frames() {
        let mut tag = Tag::new();
        tag.add_frame(Frame::text("TIT2", Encoding::UTF8, "a"));
        tag.add_frame(Frame::text("TALB", Encoding::UTF8, "b"));
        tag.add_frame(Frame::text("TIT2", Encoding::UTF8, "c"));
        tag.set_title("Title");
        assert_eq!(tag.get_all("TIT2").len(), 1);
        assert_eq!(tag.frames().next().unwrap().content().text(), Some("Title"));
    }

    #[test]
    fn setters_use_tag_encoding() {
        let mut tag = Tag::new();
        tag.set_artist("Artist");
        assert!(matches!(
            tag.get("TPE1").unwrap().content(),
            Content::Text(Text { encoding: Encoding::UTF16, .. })
        ));
        tag.set_text_encoding(Encoding::Latin1);
        tag.set_comment("Comment");
        assert_eq!(
            tag.get("COMM").unwrap().content().comment().unwrap().encoding,
            Encoding::Latin1
        );
    }

    #[test]
    fn text_getters() {
        let mut tag = Tag::new();
        tag.set_title("Title");
        tag.set_album("Album");
        tag.set_artist("Artist");
        tag.set_language("nld");
        assert_eq!(tag.title(), Some("Title"));
        assert_eq!(tag.album(), Some("Album"));
        assert_eq!(tag.artist(), Some("Artist"));
        assert_eq!(tag.language(), Some("nld"));
        assert_eq!(tag.comment(), None);
    }

    #[test]
    fn year_must_be_numeric() {
        let mut tag = Tag::new();
        tag.set_text("TYER", "20xx");
        let err = tag.year().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Format));
        assert_eq!(err.frame_id.as_deref(), Some("TYER"));
    }

    #[test]
    fn cover_image_ignores_other_types() {
        let mut tag = Tag::new();
        tag.add_frame(Picture {
            encoding: Encoding::Latin1,
            mime_type: "image/png".to_string(),
            picture_type: PictureType::Artist,
            description: String::new(),
            data: vec![1],
        });
        assert!(tag.cover_image().is_none());
        tag.add_frame(Picture {
            encoding: Encoding::Latin1,
            mime_type: "image/jpeg".to_string(),
            picture_type: PictureType::CoverFront,
            description: "front".to_string(),
            data: vec![2],
        });
        assert_eq!(tag.cover_image().unwrap().data, [2]);

        tag.set_cover_image("image/gif", "new", vec![3]);
        assert_eq!(tag.get_all("APIC").len(), 1);
        assert_eq!(tag.cover_image().unwrap().mime_type, "image/gif");
    }

    #[test]
    fn set_id_keeps_other_owners() {
        let mut tag = Tag::new();
        tag.set_title("Title");
        tag.set_id("CDDB", "1");
        tag.set_id("http://musicbrainz.org", "2");
        tag.set_id("CDDB", "3");
        assert_eq!(tag.owners(), ["CDDB", "http://musicbrainz.org"]);
        assert_eq!(tag.id_for_owner("CDDB"), Some(&b"3"[..]));
        assert_eq!(tag.id_for_owner("http://musicbrainz.org"), Some(&b"2"[..]));
        assert_eq!(tag.id_for_owner("nobody"), None);
        let ids = tag.ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids["CDDB"], b"3");
        assert!(matches!(tag.id().unwrap_err().kind, ErrorKind::AmbiguousFrame));
    }

    #[test]
    fn id_single_owner() {
        let mut tag = Tag::new();
        assert_eq!(tag.id().unwrap(), None);
        tag.set_id("CDDB", "4a0b");
        assert_eq!(tag.id().unwrap().as_deref(), Some("4a0b"));
        tag.set_id("CDDB", [0xFF, 0xFE]);
        assert!(matches!(tag.id().unwrap_err().kind, ErrorKind::Encoding));
    }

    #[test]
    fn text_values_span_frames() {
        let mut tag = Tag::new();
        tag.add_frame(Frame::text("TPE1", Encoding::UTF8, "a"));
        tag.add_frame(Frame::text("TALB", Encoding::UTF8, "x"));
        tag.add_frame(Frame::with_content(
            "TPE1",
            Content::Text(Text::with_values(Encoding::UTF8, ["b", "c"])),
        ));
        assert_eq!(tag.text_values("TPE1"), ["a", "b", "c"]);
        assert!(tag.text_values("TIT2").is_empty());

        tag.set_text_values("TPE1", ["d", "e"]);
        assert_eq!(tag.get_all("TPE1").len(), 1);
        assert_eq!(tag.text_values("TPE1"), ["d", "e"]);
        assert_eq!(tag.frames().next().unwrap().id(), "TPE1");

        tag.set_text_values("TPE1", Vec::<String>::new());
        assert!(tag.get("TPE1").is_none());
    }

    #[test]
    fn append_text_values() {
        let mut tag = Tag::new();
        tag.append_text_values("TLAN", Vec::<String>::new());
        assert!(tag.get("TLAN").is_none());
        tag.append_text_values("TLAN", ["eng"]);
        tag.append_text_values("TLAN", ["deu"]);
        assert_eq!(tag.get_all("TLAN").len(), 1);
        assert_eq!(tag.text_values("TLAN"), ["eng", "deu"]);
        assert_eq!(tag.language(), Some("eng"));
    }

    #[test]
    fn comments_in_tag_order() {
        let mut tag = Tag::new();
        assert!(tag.comments().is_empty());
        for text in ["first", "second"] {
            tag.add_frame(Comment {
                encoding: Encoding::UTF8,
                lang: "eng".to_string(),
                description: text.to_string(),
                text: text.to_string(),
            });
        }
        assert_eq!(tag.comments(), ["first", "second"]);
    }

    #[test]
    fn images_by_type() {
        let mut tag = Tag::new();
        tag.add_image(PictureType::Artist, "image/png", "artist", vec![1]);
        tag.add_image(PictureType::CoverFront, "image/jpeg", "front", vec![2]);
        tag.add_image(PictureType::Artist, "image/png", "again", vec![3]);
        let images = tag.images();
        assert_eq!(images.len(), 3);
        assert_eq!(images[2].description, "again");
        assert_eq!(tag.image_by_type(PictureType::Artist).unwrap().data, [1]);
        assert_eq!(tag.cover_image().unwrap().data, [2]);
        assert!(tag.image_by_type(PictureType::Media).is_none());

        let mut kept = images;
        kept.retain(|image| image.picture_type == PictureType::Artist);
        tag.set_images(kept);
        assert_eq!(tag.images().len(), 2);
        assert!(tag.cover_image().is_none());
        tag.set_images(Vec::new());
        assert!(tag.get("APIC").is_none());
    }

    #[test]
    fn set_ids_replaces_all_owners() {
        let mut tag = Tag::new();
        tag.set_id("old", "1");
        tag.set_ids([("CDDB", "2"), ("MB", "3")]);
        assert_eq!(tag.owners(), ["CDDB", "MB"]);
        assert_eq!(tag.id_for_owner("old"), None);
        assert_eq!(tag.id_for_owner("MB"), Some(&b"3"[..]));
    }

    #[test]
    fn remove_returns_frames() {
        let mut tag = Tag::new();
        tag.set_title("Title");
        tag.set_album("Album");
        tag.set_id("CDDB", "1");
        tag.set_id("MB", "2");
        let removed = tag.remove("UFID");
        assert_eq!(removed.len(), 2);
        assert!(tag.owners().is_empty());
        assert_eq!(tag.frames().count(), 2);
    }
}
