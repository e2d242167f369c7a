use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::entry::Metadata;
use crate::traits::Source;

/// The local disk, through `std::fs`.
///
/// `stat` follows symlinks: a link to a directory is traversed like the
/// directory itself and a dangling link fails the probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Source for LocalFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn stat(&self, path: &Path) -> io::Result<Metadata> {
        fs::metadata(path).map(Metadata::from)
    }
}
