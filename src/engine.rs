use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::time::Instant;

use rayon::Scope;
use tracing::{debug, trace};

use crate::depth::Depth;
use crate::entry::Metadata;
use crate::error::FsMapError;
use crate::results::{Results, ScanStats};
use crate::traits::{Filter, Source};

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Validated, immutable configuration handed from the builder to `run()`.
///
/// Shared by reference across every recursion level and worker; only the
/// depth budget changes from one level to the next, and it travels as an
/// argument.
pub(crate) struct EngineOptions {
    /// Absolute scan root. Base for relative key rendering at every level.
    pub root: PathBuf,
    pub depth: Depth,
    pub absolute_paths: bool,
    pub collect_errors: bool,
    pub source: Box<dyn Source>,
    pub filter: Arc<dyn Filter>,
    /// Dedicated pool, or `None` for rayon's global pool.
    pub pool: Option<rayon::ThreadPool>,
}

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Partial result of one entry.
///
/// Every fan-out job sends its own `Level`; the fan-in merges them after
/// the scope joins, so no accumulator is ever shared between workers.
#[derive(Default)]
struct Level {
    entries: HashMap<PathBuf, Metadata>,
    files: usize,
    dirs: usize,
    skipped: usize,
    errors: Vec<FsMapError>,
}

impl Level {
    fn merge(mut self, mut other: Level) -> Level {
        // Extend the larger map with the smaller one.
        if self.entries.len() < other.entries.len() {
            std::mem::swap(&mut self.entries, &mut other.entries);
        }
        self.entries.extend(other.entries);
        self.files += other.files;
        self.dirs += other.dirs;
        self.skipped += other.skipped;
        self.errors.append(&mut other.errors);
        self
    }

    fn count(&mut self, metadata: &Metadata) {
        if metadata.is_dir() {
            self.dirs += 1;
        } else if metadata.is_file() {
            self.files += 1;
        }
    }

    fn suppress(&mut self, err: FsMapError, collect: bool) {
        debug!(error = %err, path = ?err.path(), "skipping");
        self.skipped += 1;
        if collect {
            self.errors.push(err);
        }
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Scan `opts.root` and return the merged result.
///
/// Called by `ScanBuilder::run()` after validating inputs. Fails only when
/// the root cannot be listed or a filter fails.
pub(crate) fn run(opts: EngineOptions) -> Result<Results, FsMapError> {
    let start = Instant::now();

    let level = match &opts.pool {
        Some(pool) => pool.install(|| opts.scan_tree()),
        None => opts.scan_tree(),
    }?;

    let duration = start.elapsed();
    debug!(
        root = %opts.root.display(),
        entries = level.entries.len(),
        files = level.files,
        dirs = level.dirs,
        skipped = level.skipped,
        ?duration,
        "scan complete"
    );

    Ok(Results {
        entries: level.entries,
        stats: ScanStats::compute(level.files, level.dirs, level.skipped, duration),
        errors: level.errors,
    })
}

/// Where every entry task delivers its partial level, or the fatal error
/// that ends the scan.
type Outcomes = Sender<Result<Level, FsMapError>>;

impl EngineOptions {
    /// List the root, fan out over the whole tree inside one rayon scope,
    /// then merge every partial level once the scope has joined.
    ///
    /// Each entry is its own spawned job, so nesting depth never grows the
    /// native stack. The first fatal error sent wins.
    fn scan_tree(&self) -> Result<Level, FsMapError> {
        let names = self.list(&self.root)?;
        let (tx, rx) = mpsc::channel();
        let abort = AtomicBool::new(false);

        rayon::scope(|s| self.fan_out(s, &self.root, names, self.depth, &tx, &abort));
        drop(tx);

        rx.into_iter()
            .try_fold(Level::default(), |acc, part| part.map(|p| acc.merge(p)))
    }

    fn list(&self, dir: &Path) -> Result<Vec<OsString>, FsMapError> {
        let names = self.source.read_dir(dir).map_err(|source| FsMapError::Listing {
            path: dir.to_path_buf(),
            source,
        })?;
        trace!(dir = %dir.display(), entries = names.len(), "listed");
        Ok(names)
    }

    /// Spawn one job per child of `dir`, listed with budget `depth`.
    fn fan_out<'s>(
        &'s self,
        s: &Scope<'s>,
        dir: &Path,
        names: Vec<OsString>,
        depth: Depth,
        tx: &Outcomes,
        abort: &'s AtomicBool,
    ) {
        for name in names {
            let path = dir.join(name);
            let tx = tx.clone();
            s.spawn(move |s| self.visit(s, path, depth, tx, abort));
        }
    }

    /// Probe one entry, record it if the filter accepts it, and fan out over
    /// its children if it is a directory and the budget allows.
    ///
    /// A failed probe or a failed listing of this entry is suppressed here,
    /// where it happened. A filter error is sent as fatal and stops new work.
    fn visit<'s>(
        &'s self,
        s: &Scope<'s>,
        path: PathBuf,
        depth: Depth,
        tx: Outcomes,
        abort: &'s AtomicBool,
    ) {
        if abort.load(Ordering::Relaxed) {
            return;
        }
        let mut level = Level::default();

        let metadata = match self.source.stat(&path) {
            Ok(m) => m,
            Err(source) => {
                level.suppress(FsMapError::Probe { path, source }, self.collect_errors);
                let _ = tx.send(Ok(level));
                return;
            }
        };
        level.count(&metadata);

        let is_dir = metadata.is_dir();
        match self.filter.accept(&path, &metadata) {
            Ok(true) => {
                level.entries.insert(self.render(&path), metadata);
            }
            Ok(false) => {}
            Err(err) => {
                abort.store(true, Ordering::Relaxed);
                let _ = tx.send(Err(err));
                return;
            }
        }

        // The filter decides inclusion only; rejected directories are still walked.
        if let Some(next) = depth.descend().filter(|_| is_dir) {
            match self.list(&path) {
                Ok(names) => self.fan_out(s, &path, names, next, &tx, abort),
                Err(err) => level.suppress(err, self.collect_errors),
            }
        }

        let _ = tx.send(Ok(level));
    }

    fn render(&self, path: &Path) -> PathBuf {
        if self.absolute_paths {
            return path.to_path_buf();
        }
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
