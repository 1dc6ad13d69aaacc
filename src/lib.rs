//! A library to read and write ID3v2 tags through simple field accessors. ID3 versions v2.2,
//! v2.3 and v2.4 are read, v2.3 and v2.4 are written.
//!
//! # Modifying an existing tag
//!
//! ```no_run
//! use easyid3::{Tag, TagLike, Version};
//!
//! let mut tag = Tag::read_from_path("music.mp3").unwrap();
//!
//! // print the artist the hard way
//! println!("{}", tag.get("TPE1").unwrap().content().text().unwrap());
//!
//! // or print it the easy way
//! println!("{}", tag.artist().unwrap());
//!
//! tag.set_year(2015);
//! tag.write_to_path("music.mp3", Version::Id3v24).unwrap();
//! ```
//!
//! # Creating a new tag
//!
//! ```no_run
//! use easyid3::{Content, Frame, Tag, TagLike, Version};
//! use easyid3::frame::{Encoding, Text};
//!
//! let mut tag = Tag::with_version(Version::Id3v23);
//!
//! // set the album the hard way
//! let frame = Frame::with_content("TALB", Content::Text(Text::new(Encoding::UTF16, "album")));
//! tag.add_frame(frame);
//!
//! // or set it the easy way
//! tag.set_album("album");
//!
//! tag.write_to_path("music.mp3", Version::Id3v23).unwrap();
//! ```
//!
//! # Reading damaged tags
//!
//! ```no_run
//! use easyid3::{Decoder, ParseMode};
//!
//! let tag = Decoder::new()
//!     .mode(ParseMode::Lenient)
//!     .decode_path("music.mp3")
//!     .unwrap();
//! for skipped in tag.skipped_frames() {
//!     println!("{:?} at {}: {}", skipped.id, skipped.offset, skipped.reason);
//! }
//! ```

#![warn(missing_docs)]

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::frame::{Content, Frame};
pub use crate::stream::tag::{Decoder, Encoder, ParseMode, SkippedFrame};
pub use crate::tag::{Tag, Version};
pub use crate::taglike::{Image, TagLike};

/// Contains types and methods for operating on ID3 frames.
pub mod frame;

mod error;
mod storage;
mod stream;
mod tag;
mod taglike;
mod util;
