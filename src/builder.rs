use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ignore::overrides::{Override, OverrideBuilder};

use crate::depth::Depth;
use crate::engine::{run, EngineOptions};
use crate::entry::Metadata;
use crate::error::FsMapError;
use crate::local::LocalFs;
use crate::results::Results;
use crate::traits::{Filter, Source};

// ---------------------------------------------------------------------------
// ScanBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a scan.
///
/// Created via [`fsmap::scan()`](crate::scan). Configure with chained
/// builder methods, then call [`run()`](ScanBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = fsmap::scan("src")
///     .absolute_paths(false)
///     .depth(1)
///     .filter(|_path, meta| meta.is_file())
///     .threads(8)
///     .run()?;
/// ```
pub struct ScanBuilder {
    root:           PathBuf,
    source:         Box<dyn Source>,
    selection:      Selection,
    absolute_paths: bool,
    depth:          i64,
    threads:        usize,
    collect_errors: bool,
}

/// What the builder was told to filter with.
enum Selection {
    All,
    Custom(Arc<dyn Filter>),
    Globs(Vec<String>),
}

impl ScanBuilder {
    /// Defaults: absolute keys, unlimited depth, accept everything, local
    /// disk, rayon's global pool, suppressed errors discarded.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:           root.into(),
            source:         Box::new(LocalFs),
            selection:      Selection::All,
            absolute_paths: true,
            depth:          -1,
            threads:        0,
            collect_errors: false,
        }
    }

    // ── Source ────────────────────────────────────────────────────────────

    /// Set the filesystem to scan. Defaults to [`LocalFs`].
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Box::new(s);
        self
    }

    // ── Filter ────────────────────────────────────────────────────────────

    /// Record only entries for which `f(absolute_path, metadata)` is true.
    ///
    /// Directories rejected by the filter are still descended into.
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path, &Metadata) -> bool + Send + Sync + 'static,
    {
        self.selection = Selection::Custom(Arc::new(f));
        self
    }

    /// Set a custom [`Filter`]. Use this when the decision can fail.
    pub fn with_filter(mut self, f: impl Filter + 'static) -> Self {
        self.selection = Selection::Custom(Arc::new(f));
        self
    }

    /// Shorthand for glob filtering with gitignore syntax.
    ///
    /// Patterns are matched against the path below the scan root; a pattern
    /// without a slash matches the file name at any depth (`*.txt`), and a
    /// leading `!` excludes. Repeated calls add patterns; when several match,
    /// the last one added wins. An entry is recorded only when its winning
    /// pattern is an inclusion, so a set made only of `!` patterns records
    /// nothing. Pair exclusions with an inclusion such as `*`.
    ///
    /// Replaces a filter set with `.filter()` or `.with_filter()`.
    pub fn matching(mut self, pattern: impl Into<String>) -> Self {
        match &mut self.selection {
            Selection::Globs(globs) => globs.push(pattern.into()),
            other => *other = Selection::Globs(vec![pattern.into()]),
        }
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Render keys as absolute paths (`true`, the default) or relative to
    /// the scan root.
    pub fn absolute_paths(mut self, yes: bool) -> Self {
        self.absolute_paths = yes;
        self
    }

    /// Depth budget. `-1` (the default) is unlimited, `0` lists the root's
    /// children without descending, `1` adds grandchildren, and so on.
    /// Anything below `-1` is rejected by [`run()`](Self::run).
    pub fn depth(mut self, d: i64) -> Self {
        self.depth = d;
        self
    }

    /// Finite depth budget. Same meaning as [`depth()`](Self::depth).
    pub fn max_depth(mut self, d: usize) -> Self {
        self.depth = i64::try_from(d).unwrap_or(i64::MAX);
        self
    }

    /// Number of threads probing the filesystem.
    ///
    /// `0` (the default) uses rayon's global pool. Any other value builds a
    /// dedicated pool for this scan.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Keep suppressed errors in [`Results::errors`].
    ///
    /// Disabled by default. Suppressed errors are counted in
    /// [`ScanStats::skipped`](crate::ScanStats::skipped) either way.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the scan and return results.
    ///
    /// Blocks until every directory within the depth budget has been listed
    /// and every entry probed.
    ///
    /// # Errors
    ///
    /// Validation errors (empty root, depth below `-1`, bad glob, thread pool
    /// failure) are returned before the filesystem is touched. After that the
    /// scan fails only when the root cannot be listed or a filter fails.
    pub fn run(self) -> Result<Results, FsMapError> {
        let opts = self.validate()?;
        run(opts)
    }

    /// Run the scan on a background thread and hand the outcome to
    /// `on_complete`.
    ///
    /// Validation happens here, on the calling thread: a validation error is
    /// returned directly and `on_complete` is never called.
    pub fn spawn<F>(self, on_complete: F) -> Result<JoinHandle<()>, FsMapError>
    where
        F: FnOnce(Result<Results, FsMapError>) + Send + 'static,
    {
        let opts = self.validate()?;
        thread::Builder::new()
            .name("fsmap-scan".into())
            .spawn(move || on_complete(run(opts)))
            .map_err(|e| FsMapError::ThreadPool(e.to_string()))
    }

    fn validate(self) -> Result<EngineOptions, FsMapError> {
        if self.root.as_os_str().is_empty() {
            return Err(FsMapError::InvalidRoot(self.root));
        }
        let root = std::path::absolute(&self.root)
            .map_err(|_| FsMapError::InvalidRoot(self.root.clone()))?;

        let depth = Depth::try_from(self.depth)?;

        let filter: Arc<dyn Filter> = match self.selection {
            Selection::All => Arc::new(AllFilter),
            Selection::Custom(f) => f,
            Selection::Globs(globs) => Arc::new(GlobFilter::new(&root, &globs)?),
        };

        let pool = match self.threads {
            0 => None,
            n => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("fsmap-{i}"))
                    .build()
                    .map_err(|e| FsMapError::ThreadPool(e.to_string()))?,
            ),
        };

        Ok(EngineOptions {
            root,
            depth,
            absolute_paths: self.absolute_paths,
            collect_errors: self.collect_errors,
            source: self.source,
            filter,
            pool,
        })
    }
}

// ---------------------------------------------------------------------------
// Built-in filters
// ---------------------------------------------------------------------------

/// Accepts every entry. Used when no filter is specified.
struct AllFilter;

impl Filter for AllFilter {
    fn accept(&self, _path: &Path, _metadata: &Metadata) -> Result<bool, FsMapError> {
        Ok(true)
    }
}

/// Accepts entries whose path below the root matches one of the globs.
struct GlobFilter(Override);

impl GlobFilter {
    fn new(root: &Path, globs: &[String]) -> Result<Self, FsMapError> {
        let mut builder = OverrideBuilder::new(root);
        for glob in globs {
            builder
                .add(glob)
                .map_err(|e| FsMapError::InvalidPattern(e.to_string()))?;
        }
        let overrides = builder
            .build()
            .map_err(|e| FsMapError::InvalidPattern(e.to_string()))?;
        Ok(Self(overrides))
    }
}

impl Filter for GlobFilter {
    fn accept(&self, path: &Path, metadata: &Metadata) -> Result<bool, FsMapError> {
        Ok(self.0.matched(path, metadata.is_dir()).is_whitelist())
    }
}
