//! In-memory, read-only hierarchical filesystem.
//!
//! `mapfs` turns a flat mapping of paths to file contents into a directory
//! tree, synthesizing every intermediate directory, and answers `open`,
//! `stat` and `read_dir` queries against it. Nothing touches disk.
//!
//! # Features
//!
//! - **Lenient paths**: `foo/bar`, `/foo/bar` and `/foo/bar/` are the same path
//! - **Synthesized directories**: ancestors of input files are created implicitly
//! - **Sorted listings**: directory entries always come back ordered by name
//! - **All-or-nothing construction**: any path conflict aborts the build
//! - **Thread-safe**: the finished tree is immutable and `Send + Sync`
//!
//! # Examples
//!
//! ```
//! use mapfs::{File, Files, MapFs};
//! use chrono::{TimeZone, Utc};
//!
//! let t0 = Utc.timestamp_opt(1_200_000_000, 0).unwrap();
//! let t1 = Utc.timestamp_opt(1_300_000_000, 0).unwrap();
//!
//! let mut files = Files::new();
//! files.insert("foo/bar/three.txt".to_string(), File::new("333", t0));
//! files.insert("foo/bar.txt".to_string(), File::new("22", t1));
//!
//! let fs = MapFs::new(files)?;
//!
//! let entries = fs.read_dir("/foo")?;
//! assert_eq!(entries[0].name(), "bar");
//! assert!(entries[0].is_dir());
//! assert_eq!(entries[1].name(), "bar.txt");
//! assert_eq!(fs.stat("/foo")?.mod_time(), t1);
//! # Ok::<(), mapfs::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod error;
pub mod fs;
pub mod node;
pub mod path;
pub mod reader;
pub mod traits;

pub use builder::{File, Files, MapFsBuilder};
pub use error::{Conflict, Error, Result};
pub use fs::MapFs;
pub use node::{FileMode, Metadata, Node};
pub use path::NormalizedPath;
pub use reader::FileReader;
