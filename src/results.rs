use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::entry::Metadata;
use crate::error::FsMapError;

/// The output of a completed scan.
///
/// `entries` maps each rendered path (absolute, or relative to the scan root)
/// to the metadata probed for it. The root itself is never a key.
pub struct Results {
    /// Every entry the filter accepted, keyed by rendered path.
    pub entries: HashMap<PathBuf, Metadata>,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Suppressed errors (unreadable subdirectories, failed probes).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<FsMapError>,
}

impl Results {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata recorded under `key`, rendered the same way the scan rendered it.
    pub fn get(&self, key: impl AsRef<Path>) -> Option<&Metadata> {
        self.entries.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<Path>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    /// Rendered paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }
}

/// Statistics for a completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Files probed, whether or not the filter accepted them.
    pub files: usize,

    /// Directories probed, whether or not the filter accepted them.
    pub dirs: usize,

    /// Entries and subtrees dropped because of a suppressed error.
    /// Counted even when errors are not collected.
    pub skipped: usize,

    /// Wall-clock time from scan start to completion.
    pub duration: Duration,

    /// Probed entries per second. Equals
    /// `(files + dirs) / duration.as_secs_f64()`, clamped to 0 on
    /// zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    /// Compute `entries_per_sec` from raw counts and duration.
    pub(crate) fn compute(files: usize, dirs: usize, skipped: usize, duration: Duration) -> Self {
        let total = files + dirs;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            skipped,
            duration,
            entries_per_sec: eps,
        }
    }
}
