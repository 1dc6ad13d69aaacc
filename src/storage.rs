//! Rewriting of the tag region at the start of a file.
//!
//! A tag that grows beyond its region forces the audio data that follows to be moved. To make
//! future writes cheaper, a zero padding is reserved whenever data is moved.

use std::cmp;
use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops;

/// The number of bytes moved at once while relocating the data after the region.
const CHUNK_SIZE: u64 = 8192;

/// The padding left after the tag when the region has to be grown.
pub(crate) const DEFAULT_PADDING: u64 = 2048;

pub trait StorageFile: io::Read + io::Write + io::Seek {
    fn set_len(&mut self, new_len: u64) -> io::Result<()>;
}

impl StorageFile for fs::File {
    fn set_len(&mut self, new_len: u64) -> io::Result<()> {
        fs::File::set_len(self, new_len)
    }
}

impl StorageFile for io::Cursor<Vec<u8>> {
    fn set_len(&mut self, new_len: u64) -> io::Result<()> {
        self.get_mut().resize(new_len as usize, 0xff);
        Ok(())
    }
}

/// `PlainStorage` keeps track of a writeable region in a file and prevents accidental overwrites
/// of unrelated data.
#[derive(Debug)]
pub struct PlainStorage<F>
where
    F: StorageFile,
{
    /// The backing storage.
    file: F,
    /// The region that may be written to including any padding.
    region: ops::Range<u64>,
    /// Controls how many bytes of padding are reserved when data is moved.
    preferred_padding: u64,
    /// When newly written data is smaller than the region, the region is shrunk if more than
    /// this amount of padding would remain. `None` disables shrinking.
    max_padding: Option<u64>,
}

impl<F> PlainStorage<F>
where
    F: StorageFile,
{
    /// Creates a new storage with a default padding of 2048 bytes and no shrinkage.
    pub fn new(file: F, region: ops::Range<u64>) -> PlainStorage<F> {
        PlainStorage::with_padding(file, region, DEFAULT_PADDING, None)
    }

    /// Creates a new storage with the specified amount of padding. A `max_padding` smaller than
    /// `preferred_padding` is raised to it.
    pub fn with_padding(
        file: F,
        region: ops::Range<u64>,
        preferred_padding: u64,
        max_padding: Option<u64>,
    ) -> PlainStorage<F> {
        PlainStorage {
            file,
            region,
            preferred_padding,
            max_padding: max_padding.map(|max| cmp::max(max, preferred_padding)),
        }
    }

    fn region_len(&self) -> u64 {
        self.region.end - self.region.start
    }

    /// Replaces the contents of the region with `data` and zero-fills what remains of it.
    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        let data_len = data.len() as u64;
        if data_len > self.region_len() {
            // The region is not able to store the data. Grow it by moving the following data
            // towards the end.
            let new_end = self.region.start + data_len + self.preferred_padding;
            self.move_tail(new_end)?;
        } else if let Some(max) = self.max_padding {
            if self.region_len() - data_len > max {
                let new_end = self.region.start + data_len + self.preferred_padding;
                self.move_tail(new_end)?;
            }
        }

        self.file.seek(SeekFrom::Start(self.region.start))?;
        self.file.write_all(data)?;
        // Write padding to erase any old data.
        let padding = self.region_len() - data_len;
        io::copy(&mut io::repeat(0).take(padding), &mut self.file)?;
        self.file.flush()
    }

    /// Removes the region from the file entirely.
    pub fn remove(&mut self) -> io::Result<()> {
        self.move_tail(self.region.start)?;
        self.file.flush()
    }

    /// Moves all data after the region so that the region ends at `new_end`.
    fn move_tail(&mut self, new_end: u64) -> io::Result<()> {
        let old_end = self.region.end;
        let old_file_end = self.file.seek(SeekFrom::End(0))?;
        let tail_len = old_file_end.saturating_sub(old_end);
        let mut buf = vec![0; CHUNK_SIZE as usize];

        if new_end > old_end {
            self.file.set_len(new_end + tail_len)?;
            // Copy back to front so the source is never overwritten before it is read.
            let mut remaining = tail_len;
            while remaining > 0 {
                let n = cmp::min(remaining, CHUNK_SIZE);
                remaining -= n;
                self.copy(old_end + remaining, new_end + remaining, &mut buf[..n as usize])?;
            }
        } else if new_end < old_end {
            let mut copied = 0;
            while copied < tail_len {
                let n = cmp::min(tail_len - copied, CHUNK_SIZE);
                self.copy(old_end + copied, new_end + copied, &mut buf[..n as usize])?;
                copied += n;
            }
            self.file.set_len(new_end + tail_len)?;
        }
        self.region.end = new_end;
        Ok(())
    }

    fn copy(&mut self, from: u64, to: u64, buf: &mut [u8]) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(from))?;
        self.file.read_exact(buf)?;
        self.file.seek(SeekFrom::Start(to))?;
        self.file.write_all(buf)
    }
}
