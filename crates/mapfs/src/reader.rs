//! Readable, seekable stream over a file's content.

use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;

/// Stream returned by [`MapFs::open`](crate::MapFs::open).
///
/// Every call to `open` yields an independent reader with its own position
/// over the same shared buffer. Closing or dropping one reader never
/// affects another.
///
/// # Examples
///
/// ```
/// use mapfs::MapFsBuilder;
/// use chrono::Utc;
/// use std::io::{Read, Seek, SeekFrom};
///
/// let fs = MapFsBuilder::new()
///     .add_file("notes.txt", "hello world", Utc::now())
///     .build()?;
///
/// let mut reader = fs.open("notes.txt")?;
/// reader.seek(SeekFrom::Start(6))?;
///
/// let mut rest = String::new();
/// reader.read_to_string(&mut rest)?;
/// assert_eq!(rest, "world");
/// reader.close();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileReader {
    inner: Cursor<Arc<[u8]>>,
}

impl FileReader {
    pub(crate) const fn new(content: Arc<[u8]>) -> Self {
        Self {
            inner: Cursor::new(content),
        }
    }

    /// Total length of the underlying content in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }

    /// Returns `true` if the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    /// Current read position.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Closes the stream. Never fails for in-memory content.
    pub fn close(self) {
        drop(self);
    }
}

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for FileReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

impl Seek for FileReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(content: &[u8]) -> FileReader {
        FileReader::new(Arc::from(content))
    }

    #[test]
    fn test_read_all() {
        let mut r = reader(b"333");
        let mut buf = Vec::new();
        r.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"333");
        assert_eq!(r.position(), 3);
    }

    #[test]
    fn test_seek_from_end() {
        let mut r = reader(b"abcdef");
        r.seek(SeekFrom::End(-2)).unwrap();
        let mut buf = String::new();
        r.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "ef");
    }

    #[test]
    fn test_seek_before_start_fails() {
        let mut r = reader(b"abc");
        assert!(r.seek(SeekFrom::Current(-1)).is_err());
    }

    #[test]
    fn test_readers_are_independent() {
        let content: Arc<[u8]> = Arc::from(&b"shared"[..]);
        let mut a = FileReader::new(Arc::clone(&content));
        let mut b = FileReader::new(Arc::clone(&content));

        let mut first = [0u8; 3];
        a.read_exact(&mut first).unwrap();
        a.close();

        let mut all = Vec::new();
        b.read_to_end(&mut all).unwrap();
        assert_eq!(&first, b"sha");
        assert_eq!(all, b"shared");
    }

    #[test]
    fn test_lines() {
        let r = reader(b"one\ntwo\n");
        let lines: Vec<String> = r.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_len_and_empty() {
        assert_eq!(reader(b"1234").len(), 4);
        assert!(reader(b"").is_empty());
    }
}
