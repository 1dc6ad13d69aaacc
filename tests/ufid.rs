use easyid3::frame::UniqueFileIdentifier;
use easyid3::{ErrorKind, Tag, TagLike, Version};

static CDDB: &str = "CDDB";
static MUSICBRAINZ: &str = "http://musicbrainz.org";

fn round_trip(tag: &Tag, version: Version) -> Tag {
    let mut data = Vec::new();
    tag.write_to(&mut data, version).unwrap();
    Tag::read_from(&data[..]).unwrap()
}

#[test]
fn single_owner() {
    let mut tag = Tag::new();
    tag.set_id(MUSICBRAINZ, "f4a1c3a2-6b0f-4c3e-9d52-2a1c8b7e0d11");
    for version in [Version::Id3v23, Version::Id3v24] {
        let tag = round_trip(&tag, version);
        assert_eq!(tag.owners(), [MUSICBRAINZ]);
        assert_eq!(
            tag.id().unwrap().as_deref(),
            Some("f4a1c3a2-6b0f-4c3e-9d52-2a1c8b7e0d11")
        );
    }
}

#[test]
fn multiple_owners() {
    let mut tag = Tag::new();
    tag.set_id(CDDB, "7a0c8e09");
    tag.set_id(MUSICBRAINZ, "mbid");
    let tag = round_trip(&tag, Version::Id3v24);

    // Every UFID frame is read, not only the first one.
    assert_eq!(tag.owners(), [CDDB, MUSICBRAINZ]);
    assert_eq!(tag.id_for_owner(CDDB), Some(&b"7a0c8e09"[..]));
    assert_eq!(tag.id_for_owner(MUSICBRAINZ), Some(&b"mbid"[..]));
    assert_eq!(tag.ids().len(), 2);

    let err = tag.id().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AmbiguousFrame));
    assert_eq!(err.frame_id.as_deref(), Some("UFID"));
}

#[test]
fn replace_one_owner() {
    let mut tag = Tag::new();
    tag.set_id(CDDB, "1");
    tag.set_id(MUSICBRAINZ, "2");
    tag.set_id(CDDB, "3");
    let tag = round_trip(&tag, Version::Id3v23);
    assert_eq!(tag.get_all("UFID").len(), 2);
    assert_eq!(tag.id_for_owner(CDDB), Some(&b"3"[..]));
    assert_eq!(tag.id_for_owner(MUSICBRAINZ), Some(&b"2"[..]));
}

#[test]
fn binary_identifier() {
    let mut tag = Tag::new();
    tag.add_frame(UniqueFileIdentifier {
        owner_identifier: CDDB.to_string(),
        identifier: vec![0x00, 0xFF, 0x10],
    });
    let tag = round_trip(&tag, Version::Id3v24);
    assert_eq!(tag.id_for_owner(CDDB), Some(&[0x00, 0xFF, 0x10][..]));
    assert!(matches!(tag.id().unwrap_err().kind, ErrorKind::Encoding));
}
