use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsMapError {
    // Validation
    #[error("invalid root path: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("invalid depth {0}: expected -1 (unlimited) or a non-negative budget")]
    InvalidDepth(i64),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("thread pool failure: {0}")]
    ThreadPool(String),

    // Traversal
    #[error("cannot list directory {}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read metadata of {}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Third-party extensibility
    #[error("filter error: {0}")]
    Filter(String),
}

impl FsMapError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidRoot(p) | Self::Listing { path: p, .. } | Self::Probe { path: p, .. } => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Whether the scan can continue after this error.
    ///
    /// Listing errors below the root and probe errors are absorbed by the
    /// engine; the affected entry or subtree is left out of the result.
    /// Everything else ends the scan.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Listing { .. } | Self::Probe { .. })
    }

    /// Whether this error was raised while validating the configuration,
    /// before any filesystem access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRoot(_)
                | Self::InvalidDepth(_)
                | Self::InvalidPattern(_)
                | Self::ThreadPool(_)
        )
    }
}
