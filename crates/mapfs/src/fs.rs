//! The queryable filesystem view.
//!
//! A [`MapFs`] is a single table keyed by normalized path. Directory nodes
//! store each child's name together with its table key; listing a directory
//! resolves those keys in the same table.
//!
//! The view is immutable once built, so it is `Send + Sync` and can be
//! shared freely (for example behind an `Arc`) without locking.
//!
//! # Examples
//!
//! ```
//! use mapfs::{File, Files, MapFs};
//! use chrono::Utc;
//! use std::io::Read;
//!
//! let mut files = Files::new();
//! files.insert("foo/bar/three.txt".to_string(), File::new("333", Utc::now()));
//! let fs = MapFs::new(files)?;
//!
//! let mut content = String::new();
//! fs.open("/foo/bar/three.txt")?.read_to_string(&mut content).unwrap();
//! assert_eq!(content, "333");
//!
//! let names: Vec<_> = fs.read_dir("/foo")?.iter().map(|m| m.name().to_string()).collect();
//! assert_eq!(names, ["bar"]);
//! # Ok::<(), mapfs::Error>(())
//! ```

use crate::builder::{Files, MapFsBuilder};
use crate::error::{Error, Result};
use crate::node::{Metadata, Node};
use crate::path::NormalizedPath;
use crate::reader::FileReader;
use crate::traits::FileSystem;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// In-memory, read-only hierarchical filesystem.
#[derive(Debug, Clone)]
pub struct MapFs {
    nodes: HashMap<NormalizedPath, Node>,
    file_count: usize,
}

impl MapFs {
    /// Identifier reported by [`Display`](fmt::Display) and
    /// [`FileSystem::label`].
    pub const LABEL: &'static str = "mapfs";

    /// Builds a filesystem from a path-to-file mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if two entries normalize to the same
    /// path or if a path is both a file and an ancestor of another entry.
    pub fn new(files: Files) -> Result<Self> {
        MapFsBuilder::new().add_files(files).build()
    }

    /// Returns a builder for incremental construction.
    #[must_use]
    pub fn builder() -> MapFsBuilder {
        MapFsBuilder::new()
    }

    pub(crate) const fn from_nodes(nodes: HashMap<NormalizedPath, Node>, file_count: usize) -> Self {
        Self { nodes, file_count }
    }

    fn lookup(&self, path: &str) -> Result<(NormalizedPath, &Node)> {
        let path = NormalizedPath::new(path);
        match self.nodes.get(&path) {
            Some(node) => Ok((path, node)),
            None => {
                tracing::trace!("Lookup miss: {}", path);
                Err(Error::not_found(path.into_inner()))
            }
        }
    }

    /// Opens a file as an independent readable, seekable stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at `path` or if `path`
    /// is a directory.
    pub fn open(&self, path: &str) -> Result<FileReader> {
        self.read_file(path).map(FileReader::new)
    }

    /// Returns the shared content buffer of a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at `path` or if `path`
    /// is a directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::MapFsBuilder;
    /// use chrono::Utc;
    ///
    /// let fs = MapFsBuilder::new()
    ///     .add_file("a/b.txt", "bee", Utc::now())
    ///     .build()?;
    ///
    /// assert_eq!(&*fs.read_file("a/b.txt")?, b"bee");
    /// assert!(fs.read_file("/a").unwrap_err().is_not_found());
    /// # Ok::<(), mapfs::Error>(())
    /// ```
    pub fn read_file(&self, path: &str) -> Result<Arc<[u8]>> {
        match self.lookup(path)? {
            (_, Node::File { content, .. }) => Ok(Arc::clone(content)),
            (path, Node::Directory { .. }) => Err(Error::not_found(path.into_inner())),
        }
    }

    /// Returns metadata for the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at `path`.
    pub fn stat(&self, path: &str) -> Result<Metadata> {
        self.lookup(path).map(|(_, node)| node.metadata())
    }

    /// Same as [`stat`](Self::stat); the tree contains no links.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at `path`.
    pub fn lstat(&self, path: &str) -> Result<Metadata> {
        self.stat(path)
    }

    /// Lists the immediate children of a directory, sorted ascending by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at `path` or if `path`
    /// is a file.
    pub fn read_dir(&self, path: &str) -> Result<Vec<Metadata>> {
        let children = match self.lookup(path)? {
            (_, Node::Directory { children, .. }) => children,
            (path, Node::File { .. }) => return Err(Error::not_found(path.into_inner())),
        };

        children
            .iter()
            .map(|(_, key)| {
                self.nodes
                    .get(key)
                    .map(Node::metadata)
                    .ok_or_else(|| Error::not_found(key.as_str()))
            })
            .collect()
    }

    /// Returns `true` if any node exists at `path`.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(&NormalizedPath::new(path))
    }

    /// Number of input files in the tree.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of nodes, synthesized directories and the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no files.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// All normalized paths in the tree, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<&NormalizedPath> {
        let mut paths: Vec<_> = self.nodes.keys().collect();
        paths.sort();
        paths
    }
}

impl fmt::Display for MapFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::LABEL)
    }
}

impl FileSystem for MapFs {
    type File = FileReader;

    fn label(&self) -> &str {
        Self::LABEL
    }

    fn open(&self, path: &str) -> Result<FileReader> {
        Self::open(self, path)
    }

    fn stat(&self, path: &str) -> Result<Metadata> {
        Self::stat(self, path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<Metadata>> {
        Self::read_dir(self, path)
    }
}
