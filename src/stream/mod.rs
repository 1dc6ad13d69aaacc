pub mod encoding;
pub mod frame;
pub mod tag;
pub mod unsynch;
