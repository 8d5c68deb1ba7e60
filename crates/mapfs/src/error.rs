//! Error types for the map-backed filesystem.
//!
//! Construction fails with [`Error::AlreadyExists`]; lookups fail with
//! [`Error::NotFound`]. Both variants carry the normalized path that caused
//! the failure.
//!
//! # Examples
//!
//! ```
//! use mapfs::{Conflict, Error};
//!
//! let error = Error::AlreadyExists {
//!     path: "/foo/bar".to_string(),
//!     conflict: Conflict::ParentIsFile,
//! };
//!
//! assert!(error.is_already_exists());
//! assert_eq!(error.path(), "/foo/bar");
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Reason a path could not be inserted into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conflict {
    /// A node already exists at exactly this path.
    ///
    /// Covers the same path supplied twice as well as a file supplied
    /// where a directory has already been synthesized.
    Duplicate,

    /// An ancestor of the inserted path is a file, and files cannot
    /// contain children.
    ParentIsFile,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => f.write_str("Path already exists"),
            Self::ParentIsFile => f.write_str("Parent is a file"),
        }
    }
}

/// Errors produced while building or querying a [`MapFs`](crate::MapFs).
///
/// # Examples
///
/// ```
/// use mapfs::Error;
///
/// let error = Error::NotFound {
///     path: "/missing.txt".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// assert_eq!(error.to_string(), "File not found: /missing.txt");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The path collides with a node that is already in the tree.
    ///
    /// Raised only during construction. It aborts the whole build.
    #[error("{conflict}: {path}")]
    AlreadyExists {
        /// Normalized path of the conflicting node
        path: String,
        /// What kind of collision was detected
        conflict: Conflict,
    },

    /// No node suitable for the operation exists at the path.
    ///
    /// Also returned when opening a directory or listing a file.
    #[error("File not found: {path}")]
    NotFound {
        /// Normalized path that was looked up
        path: String,
    },
}

impl Error {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub(crate) fn already_exists(path: impl Into<String>, conflict: Conflict) -> Self {
        Self::AlreadyExists {
            path: path.into(),
            conflict,
        }
    }

    /// Returns `true` if this is a construction conflict.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapfs::{Conflict, Error};
    ///
    /// let error = Error::AlreadyExists {
    ///     path: "/a".to_string(),
    ///     conflict: Conflict::Duplicate,
    /// };
    /// assert!(error.is_already_exists());
    /// assert!(!error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` if this is a lookup miss.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the conflict kind for construction errors.
    #[must_use]
    pub const fn conflict(&self) -> Option<Conflict> {
        match self {
            Self::AlreadyExists { conflict, .. } => Some(*conflict),
            Self::NotFound { .. } => None,
        }
    }

    /// Returns the normalized path the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::AlreadyExists { path, .. } | Self::NotFound { path } => path,
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match error {
            Error::AlreadyExists { .. } => io::ErrorKind::AlreadyExists,
            Error::NotFound { .. } => io::ErrorKind::NotFound,
        };
        Self::new(kind, error)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let error = Error::not_found("/missing");
        assert!(error.is_not_found());
        assert!(!error.is_already_exists());
        assert_eq!(error.conflict(), None);
        assert_eq!(error.path(), "/missing");
    }

    #[test]
    fn test_error_is_already_exists() {
        let error = Error::already_exists("/foo", Conflict::Duplicate);
        assert!(error.is_already_exists());
        assert!(!error.is_not_found());
        assert_eq!(error.conflict(), Some(Conflict::Duplicate));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::already_exists("/foo", Conflict::Duplicate).to_string(),
            "Path already exists: /foo"
        );
        assert_eq!(
            Error::already_exists("/foo", Conflict::ParentIsFile).to_string(),
            "Parent is a file: /foo"
        );
        assert_eq!(Error::not_found("/x").to_string(), "File not found: /x");
    }

    #[test]
    fn test_into_io_error_kind() {
        let io_err: io::Error = Error::not_found("/x").into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);

        let io_err: io::Error = Error::already_exists("/x", Conflict::ParentIsFile).into();
        assert_eq!(io_err.kind(), io::ErrorKind::AlreadyExists);
    }
}
