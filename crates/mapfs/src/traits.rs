//! Read-only hierarchical filesystem contract.
//!
//! Tools that serve content (documentation generators, static site servers)
//! program against [`FileSystem`] so they can run over disk, archives or
//! the in-memory [`MapFs`](crate::MapFs) without change.
//!
//! # Examples
//!
//! ```
//! use mapfs::traits::FileSystem;
//! use mapfs::MapFsBuilder;
//! use chrono::Utc;
//! use std::io::{self, Read};
//!
//! // `mapfs::Error` converts into `io::Error`, so one `?` covers both
//! fn cat(fs: &impl FileSystem, path: &str) -> io::Result<String> {
//!     let mut out = String::new();
//!     fs.open(path)?.read_to_string(&mut out)?;
//!     Ok(out)
//! }
//!
//! let fs = MapFsBuilder::new()
//!     .add_file("doc/index.md", "# Index", Utc::now())
//!     .build()?;
//!
//! assert_eq!(fs.label(), "mapfs");
//! assert_eq!(cat(&fs, "doc/index.md")?, "# Index");
//! # Ok::<(), io::Error>(())
//! ```

use crate::Result;
use crate::node::Metadata;
use std::io::{Read, Seek};

/// Read-only filesystem operations.
///
/// Paths are absolute `/`-separated strings; implementations decide how
/// leniently they normalize them. No operation mutates the filesystem, so
/// implementations are expected to be shareable across threads.
pub trait FileSystem: Send + Sync {
    /// Stream type returned by [`open`](Self::open).
    type File: Read + Seek;

    /// Human-readable identifier of this filesystem instance, for diagnostics.
    fn label(&self) -> &str;

    /// Opens the file at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no file exists at `path`.
    fn open(&self, path: &str) -> Result<Self::File>;

    /// Returns metadata for the node at `path`, following links.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no node exists at `path`.
    fn stat(&self, path: &str) -> Result<Metadata>;

    /// Returns metadata for the node at `path` without following links.
    ///
    /// Defaults to [`stat`](Self::stat) for filesystems without links.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no node exists at `path`.
    fn lstat(&self, path: &str) -> Result<Metadata> {
        self.stat(path)
    }

    /// Lists the immediate children of the directory at `path`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no directory exists at `path`.
    fn read_dir(&self, path: &str) -> Result<Vec<Metadata>>;
}
