/// Error types for the scan engine.
///
/// Two very different kinds of failure exist:
///
/// - [`ScanError`]: fatal to a scan (missing root, cancellation, pool
///   construction). Returned from `Scanner::scan`; no partial results.
/// - [`SuppressedError`]: a single path could not be read. These never
///   abort anything; the path contributes zero bytes and the error is
///   offered to an [`ErrorObserver`](crate::scanner::ErrorObserver).
use std::path::PathBuf;
use thiserror::Error;

/// Fatal scan errors.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The scan root exists but its entries could not be listed.
    #[error("cannot read {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user interrupted the scan; results were discarded.
    #[error("scan cancelled")]
    Cancelled,

    /// The aggregation worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The background scan thread panicked or could not be spawned.
    #[error("scan thread failed: {0}")]
    Thread(String),
}

/// Where in the pipeline a suppressed failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// A single file or directory entry could not be stat'ed.
    Entry,
    /// A nested directory could not be opened or listed.
    Directory,
    /// A whole top-level unit could not be opened.
    TopDirectory,
    /// The flat file walk could not read an entry.
    Walk,
}

impl ErrorScope {
    /// Short label for logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Directory => "directory",
            Self::TopDirectory => "top-level directory",
            Self::Walk => "walk",
        }
    }
}

/// A per-path failure that was recovered locally and contributes zero.
#[derive(Debug)]
pub struct SuppressedError {
    pub path: PathBuf,
    pub scope: ErrorScope,
    pub error: std::io::Error,
}

impl SuppressedError {
    pub fn new(path: impl Into<PathBuf>, scope: ErrorScope, error: std::io::Error) -> Self {
        Self {
            path: path.into(),
            scope,
            error,
        }
    }
}

impl std::fmt::Display for SuppressedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.scope.label(),
            self.path.display(),
            self.error
        )
    }
}
