//! Tree nodes and the metadata reported for them.
//!
//! A [`Node`] is either a file holding an immutable byte buffer or a
//! directory holding the names and table keys of its children. Directories
//! do not own child nodes directly: children are resolved through the path
//! table in [`MapFs`](crate::MapFs).

use crate::path::NormalizedPath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Permission bits and type flag of a node.
///
/// Files are always `0o444`. Directories are `0o755` with the
/// [`FileMode::DIR`] flag set, where the execute bits mean "traversable".
///
/// # Examples
///
/// ```
/// use mapfs::FileMode;
///
/// assert!(FileMode::DIRECTORY.is_dir());
/// assert_eq!(FileMode::FILE.permissions(), 0o444);
/// assert_eq!(FileMode::DIRECTORY.to_string(), "drwxr-xr-x");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMode(u32);

impl FileMode {
    /// Directory type flag, placed above the permission bits.
    pub const DIR: u32 = 1 << 31;

    /// Mode of every file node.
    pub const FILE: Self = Self(0o444);

    /// Mode of every directory node.
    pub const DIRECTORY: Self = Self(Self::DIR | 0o755);

    /// Returns the raw mode value, flag included.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns only the nine permission bits.
    #[must_use]
    pub const fn permissions(self) -> u32 {
        self.0 & 0o777
    }

    /// Returns `true` if the directory flag is set.
    #[must_use]
    pub const fn is_dir(self) -> bool {
        self.0 & Self::DIR != 0
    }

    /// Returns `true` if no write bit is set.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        self.0 & 0o222 == 0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RWX: [char; 3] = ['r', 'w', 'x'];

        let mut out = String::with_capacity(10);
        out.push(if self.is_dir() { 'd' } else { '-' });
        for bit in (0..9_usize).rev() {
            if self.0 & (1 << bit) == 0 {
                out.push('-');
            } else {
                out.push(RWX[2 - bit % 3]);
            }
        }
        f.write_str(&out)
    }
}

/// A file or directory in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf node with content.
    File {
        /// Final path segment
        name: String,
        /// Immutable content shared with open readers
        content: Arc<[u8]>,
        /// Modification time taken from the input
        mod_time: DateTime<Utc>,
    },

    /// Interior node listing its children by name.
    Directory {
        /// Final path segment, `/` for the root
        name: String,
        /// `(name, key)` of each child, sorted by name. Two keys may share a
        /// name (`/x` and `//x`), so the key is kept alongside it.
        children: BTreeSet<(String, NormalizedPath)>,
        /// Latest modification time observed among children as they were added
        mod_time: DateTime<Utc>,
    },
}

impl Node {
    pub(crate) fn file(name: impl Into<String>, content: Arc<[u8]>, mod_time: DateTime<Utc>) -> Self {
        Self::File {
            name: name.into(),
            content,
            mod_time,
        }
    }

    pub(crate) fn directory(name: impl Into<String>, mod_time: DateTime<Utc>) -> Self {
        Self::Directory {
            name: name.into(),
            children: BTreeSet::new(),
            mod_time,
        }
    }

    /// Returns the final path segment.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    /// Returns the modification time.
    #[must_use]
    pub const fn mod_time(&self) -> DateTime<Utc> {
        match self {
            Self::File { mod_time, .. } | Self::Directory { mod_time, .. } => *mod_time,
        }
    }

    /// Returns `true` for directory nodes.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Content length for files, number of immediate children for directories.
    #[must_use]
    pub fn size(&self) -> u64 {
        let size = match self {
            Self::File { content, .. } => content.len(),
            Self::Directory { children, .. } => children.len(),
        };
        size as u64
    }

    /// Returns the fixed mode for this kind of node.
    #[must_use]
    pub const fn mode(&self) -> FileMode {
        if self.is_dir() {
            FileMode::DIRECTORY
        } else {
            FileMode::FILE
        }
    }

    /// Returns a metadata snapshot of this node.
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name().to_string(),
            size: self.size(),
            mod_time: self.mod_time(),
            mode: self.mode(),
        }
    }
}

/// Metadata reported by `stat` and directory listings.
///
/// # Examples
///
/// ```
/// use mapfs::{File, Files, MapFs};
/// use chrono::{TimeZone, Utc};
///
/// let mod_time = Utc.timestamp_opt(1_200_000_000, 0).unwrap();
/// let mut files = Files::new();
/// files.insert("foo/bar.txt".to_string(), File::new("22", mod_time));
/// let fs = MapFs::new(files)?;
///
/// let meta = fs.stat("foo/bar.txt")?;
/// assert_eq!(meta.name(), "bar.txt");
/// assert_eq!(meta.size(), 2);
/// assert_eq!(meta.mod_time(), mod_time);
/// assert!(meta.is_file());
/// # Ok::<(), mapfs::Error>(())
/// ```
///
/// Metadata serializes to a flat record, which content servers can emit
/// directly as a JSON directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    name: String,
    size: u64,
    mod_time: DateTime<Utc>,
    mode: FileMode,
}

impl Metadata {
    /// Final path segment of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte length for files, child count for directories.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Modification time.
    #[must_use]
    pub const fn mod_time(&self) -> DateTime<Utc> {
        self.mod_time
    }

    /// Fixed access mode.
    #[must_use]
    pub const fn mode(&self) -> FileMode {
        self.mode
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// Returns `true` for files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        !self.is_dir()
    }
}
