//! Normalized absolute paths.
//!
//! Every path handed to the filesystem, whether as a construction key or as
//! a query, goes through [`NormalizedPath::new`] so that `foo/bar`,
//! `/foo/bar` and `/foo/bar/` all address the same node.
//!
//! Normalization is intentionally shallow: a single trailing `/` is removed
//! and a leading `/` is added when missing. `.`, `..` and repeated slashes
//! are kept verbatim.
//!
//! # Examples
//!
//! ```
//! use mapfs::NormalizedPath;
//!
//! assert_eq!(NormalizedPath::new("foo/bar").as_str(), "/foo/bar");
//! assert_eq!(NormalizedPath::new("/foo/bar/").as_str(), "/foo/bar");
//! assert_eq!(NormalizedPath::new("").as_str(), "/");
//! ```

use std::fmt;

/// A canonical absolute path inside a [`MapFs`](crate::MapFs).
///
/// Always starts with `/` and never ends with `/` unless it is the root.
/// Paths are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// The root path, `/`.
    pub const ROOT: &'static str = "/";

    /// Normalizes an arbitrary path string.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::NormalizedPath;
    ///
    /// let path = NormalizedPath::new("docs/index.html");
    /// assert_eq!(path.as_str(), "/docs/index.html");
    ///
    /// // Only one trailing slash is stripped
    /// assert_eq!(NormalizedPath::new("/docs//").as_str(), "/docs/");
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path.as_ref();
        let trimmed = path.strip_suffix('/').unwrap_or(path);

        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            let mut normalized = String::with_capacity(trimmed.len() + 1);
            normalized.push('/');
            normalized.push_str(trimmed);
            Self(normalized)
        }
    }

    /// Returns the root path.
    #[must_use]
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the path and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns `true` for `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Returns the parent directory, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::NormalizedPath;
    ///
    /// let path = NormalizedPath::new("/foo/bar/three.txt");
    /// assert_eq!(path.parent().unwrap().as_str(), "/foo/bar");
    /// assert_eq!(NormalizedPath::new("/foo").parent().unwrap().as_str(), "/");
    /// assert!(NormalizedPath::root().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }

        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self::root()
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }

    /// Returns the final path segment, ignoring trailing slashes. A path made
    /// only of slashes is named `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::NormalizedPath;
    ///
    /// assert_eq!(NormalizedPath::new("foo/bar.txt").file_name(), "bar.txt");
    /// assert_eq!(NormalizedPath::root().file_name(), "/");
    ///
    /// // The parent of `/foo//bar` is `/foo/`, which is named `foo`
    /// assert_eq!(NormalizedPath::new("/foo//").file_name(), "foo");
    /// ```
    #[must_use]
    pub fn file_name(&self) -> &str {
        let trimmed = self.0.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::ROOT;
        }
        trimmed.rfind('/').map_or(trimmed, |pos| &trimmed[pos + 1..])
    }

    /// Appends a single segment.
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        if self.is_root() {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    /// Iterates over the proper ancestors, nearest first, ending at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::NormalizedPath;
    ///
    /// let path = NormalizedPath::new("a/b/c");
    /// let ancestors: Vec<_> = path.ancestors().map(|p| p.into_inner()).collect();
    /// assert_eq!(ancestors, ["/a/b", "/a", "/"]);
    /// ```
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        std::iter::successors(self.parent(), Self::parent)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for NormalizedPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
