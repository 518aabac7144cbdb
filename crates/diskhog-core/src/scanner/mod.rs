/// Scanner module: orchestrates a full scan.
///
/// A scan runs in three stages, all blocking I/O:
///
/// 1. **Enumerate** the root's immediate subdirectories (the top-level
///    units), applying the name filter.
/// 2. **Aggregate** every unit in parallel on a bounded worker pool
///    ([`scheduler::Scheduler`] → [`aggregate::Aggregator`]).
/// 3. **Walk** the whole root once, single-threaded, to rank large files
///    ([`walk::walk_files`]).
///
/// The top-level trees then feed the directory ranking. Results are only
/// returned once every stage has finished; a cancelled scan returns
/// [`ScanError::Cancelled`] and discards everything it had accumulated.
pub mod aggregate;
pub mod filter;
pub mod observer;
pub mod progress;
pub mod scheduler;
pub mod walk;

pub use observer::{CollectingObserver, ErrorObserver, NoopObserver};
pub use progress::{ProgressSink, ScanProgress};

use crate::analysis::hierarchy::{render, HierarchyLine};
use crate::analysis::TopNSelector;
use crate::config::ScanConfig;
use crate::error::{ErrorScope, ScanError, SuppressedError};
use crate::model::{DirRecord, DirectoryNode, FileRecord};
use crate::size::{platform_resolver, SizeResolver};
use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;
use filter::NameFilter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Shared, read-only state for every stage of one scan.
///
/// Cloning is cheap: everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct ScanContext {
    pub config: Arc<ScanConfig>,
    pub resolver: Arc<dyn SizeResolver>,
    pub observer: Arc<dyn ErrorObserver>,
    pub filter: NameFilter,
    pub cancel: Arc<AtomicBool>,
}

impl ScanContext {
    /// Context with the platform resolver and no observer.
    pub fn new(config: ScanConfig) -> Self {
        let filter = NameFilter::new(config.extra_excludes.clone());
        Self {
            config: Arc::new(config),
            resolver: platform_resolver(),
            observer: Arc::new(NoopObserver),
            filter,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn SizeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ErrorObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Forward a recovered failure to the observer.
    pub(crate) fn suppress(
        &self,
        path: impl Into<PathBuf>,
        scope: ErrorScope,
        error: std::io::Error,
    ) {
        self.observer
            .on_suppressed(SuppressedError::new(path, scope, error));
    }
}

/// The three result values of a scan, plus bookkeeping for the report.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub root: PathBuf,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    /// Largest files at or above `min_file_size`, descending.
    pub largest_files: Vec<FileRecord>,
    /// Largest top-level directories, descending.
    pub largest_dirs: Vec<DirRecord>,
    /// One tree per top-level directory, keyed by its path.
    pub trees: HashMap<PathBuf, DirectoryNode>,
    /// Top-level directories that could not be opened (counted as zero).
    pub failed_top_dirs: Vec<PathBuf>,
    /// Files visited by the flat walk.
    pub items_scanned: u64,
    /// Name of the footprint resolver used.
    pub resolver: &'static str,
}

impl ScanReport {
    /// Sum of all top-level directory footprints (excludes files directly
    /// in the root).
    pub fn total_dir_size(&self) -> u64 {
        self.trees.values().map(|t| t.size).sum()
    }

    /// Top-level trees whose size clears `min_size`, largest first.
    pub fn hierarchy_roots(&self, min_size: u64) -> Vec<&DirectoryNode> {
        let mut roots: Vec<&DirectoryNode> = self
            .trees
            .values()
            .filter(|t| t.size >= min_size)
            .collect();
        roots.sort_unstable_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        roots
    }

    /// Pruned hierarchy view for every qualifying top-level tree.
    pub fn hierarchy(&self, min_size: u64) -> Vec<Vec<HierarchyLine>> {
        self.hierarchy_roots(min_size)
            .into_iter()
            .map(|root| render(root, min_size))
            .collect()
    }
}

/// Entry point for scanning. Owns the immutable context for its scans.
#[derive(Clone)]
pub struct Scanner {
    ctx: ScanContext,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            ctx: ScanContext::new(config),
        }
    }

    /// Replace the platform footprint resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn SizeResolver>) -> Self {
        self.ctx = self.ctx.with_resolver(resolver);
        self
    }

    /// Receive every suppressed per-path failure.
    pub fn with_observer(mut self, observer: Arc<dyn ErrorObserver>) -> Self {
        self.ctx = self.ctx.with_observer(observer);
        self
    }

    /// Flag that, once set, makes the running scan stop and return
    /// [`ScanError::Cancelled`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.ctx.cancel.clone()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.ctx.config
    }

    pub fn context(&self) -> &ScanContext {
        &self.ctx
    }

    /// Run a complete scan of `root` on the calling thread.
    pub fn scan(&self, root: &Path, progress: &ProgressSink) -> Result<ScanReport, ScanError> {
        let started_at = Local::now();
        let start = Instant::now();

        check_root(root)?;
        let top_dirs = self.top_level_dirs(root)?;
        info!(
            "Scanning {} ({} top-level directories, {} workers, {})",
            root.display(),
            top_dirs.len(),
            self.ctx.config.max_workers,
            self.ctx.resolver.name()
        );
        progress.send(ScanProgress::Started {
            root: root.to_path_buf(),
            top_dirs: top_dirs.len(),
            workers: self.ctx.config.max_workers,
        });

        let scheduled = scheduler::Scheduler::new(&self.ctx)?.run(&top_dirs, progress)?;
        debug!("Aggregation finished after {:?}", start.elapsed());

        let walked = walk::walk_files(root, &self.ctx, progress)?;
        debug!(
            "Walk finished after {:?}: {} files, {} above floor",
            start.elapsed(),
            walked.items_scanned,
            walked.large_files_seen
        );

        if self.ctx.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        // Rank directories in discovery order so equal sizes stay stable.
        let mut dir_selector = TopNSelector::new(self.ctx.config.max_results);
        for dir in &top_dirs {
            if let Some((size, _)) = scheduled.results.get(dir) {
                dir_selector.push(DirRecord {
                    path: dir.clone(),
                    size: *size,
                });
            }
        }

        let trees = scheduled
            .results
            .into_iter()
            .map(|(path, (_, tree))| (path, tree))
            .collect();

        let duration = start.elapsed();
        info!("Scan of {} complete in {duration:?}", root.display());

        Ok(ScanReport {
            root: root.to_path_buf(),
            started_at,
            duration,
            largest_files: walked.largest_files,
            largest_dirs: dir_selector.into_sorted(),
            trees,
            failed_top_dirs: scheduled.failed,
            items_scanned: walked.items_scanned,
            resolver: self.ctx.resolver.name(),
        })
    }

    /// Immediate, non-excluded subdirectories of `root`, in OS order.
    /// Symlinks to directories are not units.
    fn top_level_dirs(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let entries = std::fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(error) => {
                    self.ctx.suppress(root, ErrorScope::Entry, error);
                    continue;
                }
            };
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => {
                    if !self.ctx.filter.is_excluded(&entry.file_name()) {
                        dirs.push(entry.path());
                    }
                }
                Ok(_) => {}
                Err(error) => self.ctx.suppress(entry.path(), ErrorScope::Entry, error),
            }
        }
        Ok(dirs)
    }
}

/// The root must exist and be a directory; anything else is fatal.
fn check_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ScanError::RootNotFound(root.to_path_buf()))
        }
        Err(source) => Err(ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Maximum number of progress messages that may queue up in the channel.
///
/// The engine never blocks on a full channel; excess ticks are dropped.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Handle to a scan running on a background thread.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    thread: thread::JoinHandle<Result<ScanReport, ScanError>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Block until the scan finishes and take its result.
    pub fn wait(self) -> Result<ScanReport, ScanError> {
        self.thread
            .join()
            .map_err(|_| ScanError::Thread("scanner thread panicked".into()))?
    }
}

/// Start a scan of `root` on a background thread.
///
/// Progress arrives on the handle's channel; the channel disconnects when
/// the scan thread exits, after which [`ScanHandle::wait`] returns at once.
pub fn start_scan(root: PathBuf, scanner: Scanner) -> Result<ScanHandle, ScanError> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = scanner.cancel_flag();

    let thread = thread::Builder::new()
        .name("diskhog-scanner".into())
        .spawn(move || {
            let sink = ProgressSink::new(progress_tx);
            scanner.scan(&root, &sink)
        })
        .map_err(|e| ScanError::Thread(e.to_string()))?;

    Ok(ScanHandle {
        progress_rx,
        cancel_flag,
        thread,
    })
}
