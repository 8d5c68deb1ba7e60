//! Tree construction from a flat path-to-file mapping.
//!
//! Each inserted file becomes a leaf node. Its ancestors are walked upward
//! from the immediate parent; missing directories are synthesized until the
//! first directory that already exists, which absorbs the new child and
//! stops the walk.
//!
//! Conflicts are detected whichever entry arrives first: a file under an
//! existing file fails with [`Conflict::ParentIsFile`], and a file placed
//! where a directory was already synthesized fails with
//! [`Conflict::Duplicate`].
//!
//! # Examples
//!
//! ```
//! use mapfs::MapFsBuilder;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let fs = MapFsBuilder::new()
//!     .add_file("foo/bar/three.txt", "333", now)
//!     .add_file("foo/bar.txt", "22", now)
//!     .build()?;
//!
//! assert_eq!(fs.read_dir("/foo")?.len(), 2);
//! # Ok::<(), mapfs::Error>(())
//! ```
//!
//! ```
//! use mapfs::MapFsBuilder;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let result = MapFsBuilder::new()
//!     .add_file("foo/bar", "a", now)
//!     .add_file("foo/bar/three.txt", "3", now)
//!     .build();
//!
//! assert!(result.unwrap_err().is_already_exists());
//! ```

use crate::error::{Conflict, Error, Result};
use crate::fs::MapFs;
use crate::node::Node;
use crate::path::NormalizedPath;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Content and modification time of one input file.
///
/// # Examples
///
/// ```
/// use mapfs::File;
/// use chrono::Utc;
///
/// let file = File::new("hello", Utc::now());
/// assert_eq!(file.content(), b"hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    content: Arc<[u8]>,
    mod_time: DateTime<Utc>,
}

impl File {
    /// Creates a file record, taking ownership of the content.
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>, mod_time: DateTime<Utc>) -> Self {
        Self {
            content: Arc::from(content.into()),
            mod_time,
        }
    }

    /// Creates a file record over an already shared buffer without copying.
    #[must_use]
    pub const fn from_shared(content: Arc<[u8]>, mod_time: DateTime<Utc>) -> Self {
        Self { content, mod_time }
    }

    /// Returns the file content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the modification time.
    #[must_use]
    pub const fn mod_time(&self) -> DateTime<Utc> {
        self.mod_time
    }
}

/// Input mapping from path to file. Only files are listed; directories are
/// created implicitly.
pub type Files = HashMap<String, File>;

/// Builder for a [`MapFs`].
///
/// Insertion errors are collected as files are added and the first one is
/// returned by [`build`](Self::build). A failed build yields no tree.
///
/// # Examples
///
/// ```
/// use mapfs::{File, MapFsBuilder};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let fs = MapFsBuilder::new()
///     .add_files([
///         ("top.txt", File::new("top.txt file", now)),
///         ("other-top.txt", File::new("other-top.txt file", now)),
///     ])
///     .build()?;
///
/// assert_eq!(fs.file_count(), 2);
/// # Ok::<(), mapfs::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MapFsBuilder {
    nodes: HashMap<NormalizedPath, Node>,
    file_count: usize,
    errors: Vec<Error>,
}

impl MapFsBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file built from raw content and a modification time.
    #[must_use]
    pub fn add_file(
        self,
        path: impl AsRef<str>,
        content: impl Into<Vec<u8>>,
        mod_time: DateTime<Utc>,
    ) -> Self {
        self.add(path, File::new(content, mod_time))
    }

    /// Adds a prepared [`File`] record.
    #[must_use]
    pub fn add(mut self, path: impl AsRef<str>, file: File) -> Self {
        if let Err(e) = self.insert(path.as_ref(), file) {
            self.errors.push(e);
        }
        self
    }

    /// Adds every entry of a path-to-file mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::{File, Files, MapFsBuilder};
    /// use chrono::Utc;
    ///
    /// let mut files = Files::new();
    /// files.insert("a/b.txt".to_string(), File::new("b", Utc::now()));
    ///
    /// let fs = MapFsBuilder::new().add_files(files).build()?;
    /// assert!(fs.exists("/a"));
    /// # Ok::<(), mapfs::Error>(())
    /// ```
    #[must_use]
    pub fn add_files<P>(mut self, files: impl IntoIterator<Item = (P, File)>) -> Self
    where
        P: AsRef<str>,
    {
        for (path, file) in files {
            if let Err(e) = self.insert(path.as_ref(), file) {
                self.errors.push(e);
            }
        }
        self
    }

    /// Returns the number of files accepted so far.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Consumes the builder and returns the finished tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::AlreadyExists`] recorded while adding files.
    pub fn build(mut self) -> Result<MapFs> {
        if let Some(error) = self.errors.into_iter().next() {
            tracing::warn!("mapfs construction aborted: {}", error);
            return Err(error);
        }

        self.nodes
            .entry(NormalizedPath::root())
            .or_insert_with(|| Node::directory(NormalizedPath::ROOT, DateTime::<Utc>::UNIX_EPOCH));

        tracing::debug!(
            files = self.file_count,
            directories = self.nodes.len() - self.file_count,
            "mapfs constructed"
        );

        Ok(MapFs::from_nodes(self.nodes, self.file_count))
    }

    fn insert(&mut self, path: &str, file: File) -> Result<()> {
        let path = NormalizedPath::new(path);

        if path.is_root() || self.nodes.contains_key(&path) {
            return Err(Error::already_exists(path.into_inner(), Conflict::Duplicate));
        }

        // Nearest existing ancestor, plus every missing ancestor below it.
        let mut missing = Vec::new();
        let mut anchor = None;
        for ancestor in path.ancestors() {
            match self.nodes.get(&ancestor) {
                Some(Node::File { .. }) => {
                    return Err(Error::already_exists(
                        ancestor.into_inner(),
                        Conflict::ParentIsFile,
                    ));
                }
                Some(Node::Directory { .. }) => {
                    anchor = Some(ancestor);
                    break;
                }
                None => missing.push(ancestor),
            }
        }

        let mod_time = file.mod_time;
        tracing::trace!("Inserting file: {}", path);
        self.nodes.insert(
            path.clone(),
            Node::file(path.file_name(), file.content, mod_time),
        );
        self.file_count += 1;

        let mut child = path;
        for dir in missing {
            tracing::debug!("Synthesizing directory: {}", dir);
            let mut node = Node::directory(dir.file_name(), mod_time);
            attach(&mut node, &child, mod_time);
            self.nodes.insert(dir.clone(), node);
            child = dir;
        }

        if let Some(node) = anchor.and_then(|a| self.nodes.get_mut(&a)) {
            attach(node, &child, mod_time);
        }

        Ok(())
    }
}

/// Links a child name into a directory and raises its watermark.
fn attach(dir: &mut Node, child: &NormalizedPath, child_time: DateTime<Utc>) {
    if let Node::Directory {
        children, mod_time, ..
    } = dir
    {
        children.insert((child.file_name().to_string(), child.clone()));
        if *mod_time < child_time {
            *mod_time = child_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_builder_new_is_empty() {
        let fs = MapFsBuilder::new().build().unwrap();
        assert_eq!(fs.file_count(), 0);
        assert!(fs.is_empty());
        assert!(fs.stat("/").unwrap().is_dir());
    }

    #[test]
    fn test_builder_default() {
        let builder = MapFsBuilder::default();
        assert_eq!(builder.file_count(), 0);
    }

    #[test]
    fn test_add_file_synthesizes_ancestors() {
        let fs = MapFsBuilder::new()
            .add_file("a/b/c.txt", "c", ts(10))
            .build()
            .unwrap();

        assert_eq!(fs.file_count(), 1);
        assert_eq!(fs.node_count(), 4);
        assert!(fs.stat("/a").unwrap().is_dir());
        assert!(fs.stat("/a/b").unwrap().is_dir());
        assert_eq!(fs.stat("/a/b").unwrap().mod_time(), ts(10));
    }

    #[test]
    fn test_duplicate_path_fails() {
        let err = MapFsBuilder::new()
            .add_file("foo/bar.txt", "a", ts(1))
            .add_file("/foo/bar.txt/", "b", ts(2))
            .build()
            .unwrap_err();

        assert!(err.is_already_exists());
        assert_eq!(err.conflict(), Some(Conflict::Duplicate));
        assert_eq!(err.path(), "/foo/bar.txt");
    }

    #[test]
    fn test_file_then_child_fails_with_parent_is_file() {
        let err = MapFsBuilder::new()
            .add_file("foo/bar", "a", ts(1))
            .add_file("foo/bar/three.txt", "3", ts(2))
            .build()
            .unwrap_err();

        assert_eq!(err.conflict(), Some(Conflict::ParentIsFile));
        assert_eq!(err.path(), "/foo/bar");
    }

    #[test]
    fn test_child_then_file_fails_with_duplicate() {
        let err = MapFsBuilder::new()
            .add_file("foo/bar/three.txt", "3", ts(2))
            .add_file("foo/bar", "a", ts(1))
            .build()
            .unwrap_err();

        assert_eq!(err.conflict(), Some(Conflict::Duplicate));
        assert_eq!(err.path(), "/foo/bar");
    }

    #[test]
    fn test_root_key_is_rejected() {
        for key in ["/", ""] {
            let err = MapFsBuilder::new()
                .add_file(key, "x", ts(1))
                .build()
                .unwrap_err();
            assert!(err.is_already_exists());
            assert_eq!(err.path(), "/");
        }
    }

    #[test]
    fn test_failed_insert_leaves_no_partial_node() {
        let builder = MapFsBuilder::new()
            .add_file("foo", "a", ts(1))
            .add_file("foo/bar/baz.txt", "b", ts(2));

        assert_eq!(builder.file_count(), 1);
        assert!(!builder.nodes.contains_key(&NormalizedPath::new("/foo/bar")));
        assert!(!builder.nodes.contains_key(&NormalizedPath::new("/foo/bar/baz.txt")));
    }

    #[test]
    fn test_first_error_is_reported() {
        let err = MapFsBuilder::new()
            .add_file("a", "1", ts(1))
            .add_file("a", "2", ts(1))
            .add_file("a/b", "3", ts(1))
            .build()
            .unwrap_err();

        assert_eq!(err.conflict(), Some(Conflict::Duplicate));
    }

    #[test]
    fn test_existing_directory_watermark_is_raised() {
        let fs = MapFsBuilder::new()
            .add_file("foo/old.txt", "o", ts(5))
            .add_file("foo/new.txt", "n", ts(9))
            .add_file("foo/older.txt", "x", ts(1))
            .build()
            .unwrap();

        assert_eq!(fs.stat("/foo").unwrap().mod_time(), ts(9));
    }

    #[test]
    fn test_watermark_does_not_propagate_past_existing_directory() {
        let fs = MapFsBuilder::new()
            .add_file("a/b/first.txt", "1", ts(1))
            .add_file("a/b/later.txt", "2", ts(50))
            .build()
            .unwrap();

        assert_eq!(fs.stat("/a/b").unwrap().mod_time(), ts(50));
        assert_eq!(fs.stat("/a").unwrap().mod_time(), ts(1));
    }

    #[test]
    fn test_add_shared_file() {
        let shared: Arc<[u8]> = Arc::from(&b"shared"[..]);
        let fs = MapFsBuilder::new()
            .add("s.bin", File::from_shared(Arc::clone(&shared), ts(3)))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(&fs.read_file("/s.bin").unwrap(), &shared));
    }
}
