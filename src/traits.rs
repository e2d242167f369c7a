use std::ffi::OsString;
use std::io;
use std::path::Path;

use crate::entry::Metadata;
use crate::error::FsMapError;

/// The filesystem the engine lists and probes.
///
/// The engine only needs two operations: list the names directly inside a
/// directory, and probe one path for its metadata. [`LocalFs`](crate::LocalFs)
/// implements them over `std::fs`; tests and embedders can supply their own.
///
/// # Object Safety
///
/// `Source` is object-safe. The builder stores sources as `Box<dyn Source>`.
///
/// # Thread Safety
///
/// `Send + Sync` are required — one source is called concurrently from every
/// worker of the pool.
///
/// # Error Handling
///
/// Return `Err` for anything that prevents the operation. The engine decides
/// what is fatal: a failed `read_dir` on the root ends the scan, a failed
/// `read_dir` below the root or a failed `stat` only drops that subtree or
/// entry from the result.
///
/// # Example
///
/// ```rust
/// use std::ffi::OsString;
/// use std::io;
/// use std::path::Path;
/// use fsmap::{EntryKind, Metadata, Source};
///
/// /// A root that contains a single empty file.
/// struct OneFile;
///
/// impl Source for OneFile {
///     fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
///         if dir.ends_with("root") {
///             Ok(vec!["only.txt".into()])
///         } else {
///             Err(io::ErrorKind::NotFound.into())
///         }
///     }
///
///     fn stat(&self, _path: &Path) -> io::Result<Metadata> {
///         Ok(Metadata::new(EntryKind::File, 0))
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Names of the entries directly inside `dir`, without `.` and `..`.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Metadata for `path`.
    fn stat(&self, path: &Path) -> io::Result<Metadata>;
}

/// Decides whether a probed entry is recorded in the result.
///
/// A filter only controls inclusion: directories it rejects are still
/// descended into, so their accepted descendants still show up.
///
/// Plain closures `Fn(&Path, &Metadata) -> bool` implement this trait and
/// can be passed straight to [`ScanBuilder::filter`](crate::ScanBuilder::filter).
/// Implement it directly when the decision can fail.
///
/// # Thread Safety
///
/// `Send + Sync` are required — filters are shared across threads and called
/// concurrently on different entries.
///
/// # Errors
///
/// An `Err` aborts the whole scan; it is never suppressed.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use fsmap::{Filter, FsMapError, Metadata};
///
/// struct MaxSize(u64);
///
/// impl Filter for MaxSize {
///     fn accept(&self, _path: &Path, metadata: &Metadata) -> Result<bool, FsMapError> {
///         Ok(metadata.len <= self.0)
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// `path` is always absolute, whatever the key rendering mode.
    fn accept(&self, path: &Path, metadata: &Metadata) -> Result<bool, FsMapError>;
}

impl<F> Filter for F
where
    F: Fn(&Path, &Metadata) -> bool + Send + Sync,
{
    fn accept(&self, path: &Path, metadata: &Metadata) -> Result<bool, FsMapError> {
        Ok(self(path, metadata))
    }
}
