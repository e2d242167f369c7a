//! # fsmap
//!
//! Concurrent directory snapshots: map every path in a tree to its metadata.
//!
//! fsmap lists a directory, probes every entry concurrently, recurses into
//! subdirectories within a depth budget, and returns one map from path to
//! [`Metadata`]. One unreadable subdirectory or one dangling symlink shrinks
//! the result instead of failing the scan. Once the configuration is
//! validated, a scan fails only when the root cannot be listed or a
//! [`Filter`] returns an error.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let tmp = tempfile::tempdir().unwrap();
//! fs::write(tmp.path().join("file.txt"), "hello").unwrap();
//! fs::create_dir(tmp.path().join("dir")).unwrap();
//! fs::write(tmp.path().join("dir/file2.txt"), "world").unwrap();
//!
//! let results = fsmap::scan(tmp.path())
//!     .absolute_paths(false)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.len(), 3);
//! assert!(results.get("file.txt").unwrap().is_file());
//! assert!(results.get("dir").unwrap().is_dir());
//! println!("Probed {} entries in {:.3}s",
//!     results.stats.files + results.stats.dirs,
//!     results.stats.duration.as_secs_f64()
//! );
//! ```
//!
//! # Depth and Filters
//!
//! ```rust
//! # use std::fs;
//! # let tmp = tempfile::tempdir().unwrap();
//! # fs::write(tmp.path().join("file.txt"), "hello").unwrap();
//! # fs::create_dir(tmp.path().join("dir")).unwrap();
//! # fs::write(tmp.path().join("dir/file2.txt"), "world").unwrap();
//! // Immediate children only.
//! let shallow = fsmap::scan(tmp.path()).depth(0).run().unwrap();
//! assert_eq!(shallow.len(), 2);
//!
//! // Directories only. Filtering never stops descent.
//! let dirs = fsmap::scan(tmp.path())
//!     .filter(|_path, meta| meta.is_dir())
//!     .run()
//!     .unwrap();
//! assert_eq!(dirs.len(), 1);
//!
//! // Glob shorthand.
//! let text = fsmap::scan(tmp.path()).matching("*.txt").run().unwrap();
//! assert_eq!(text.len(), 2);
//! ```

#![forbid(unsafe_code)]

use std::path::PathBuf;

mod builder;
mod depth;
mod engine;
mod entry;
mod error;
mod local;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ScanBuilder;
pub use depth::Depth;
pub use entry::{EntryKind, Metadata};
pub use error::FsMapError;
pub use local::LocalFs;
pub use results::{Results, ScanStats};
pub use traits::{Filter, Source};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ScanBuilder`] rooted at `root`.
///
/// The root itself is not part of the result; its children are.
///
/// # Example
///
/// ```rust
/// let tmp = tempfile::tempdir().unwrap();
/// std::fs::write(tmp.path().join("a.txt"), "a").unwrap();
///
/// let results = fsmap::scan(tmp.path()).run().unwrap();
///
/// let key = std::path::absolute(tmp.path()).unwrap().join("a.txt");
/// assert!(results.get(&key).unwrap().is_file());
/// ```
pub fn scan(root: impl Into<PathBuf>) -> ScanBuilder {
    ScanBuilder::new(root)
}
