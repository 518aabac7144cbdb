/// Scan configuration: every threshold the engine consults.
///
/// A `ScanConfig` is built once before the scan starts and is never mutated
/// afterwards. The engine holds it behind an `Arc` so workers can read it
/// without synchronisation.
use std::time::Duration;

/// One mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Default inclusion floor for the "largest files" list (10 MiB).
pub const DEFAULT_MIN_FILE_SIZE: u64 = 10 * MIB;

/// Default inclusion floor for the hierarchy report (500 MiB).
pub const DEFAULT_MIN_DIR_SIZE_HIERARCHY: u64 = 500 * MIB;

/// Default top-K cutoff for both ranked lists.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Upper bound on the default worker count regardless of core count.
pub const DEFAULT_WORKER_CAP: usize = 10;

/// Default minimum spacing between walk progress ticks.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(2);

/// Immutable configuration passed into the engine at construction.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Files with a footprint below this are not ranked.
    pub min_file_size: u64,
    /// Top-level directories below this are left out of the hierarchy report.
    pub min_dir_size_hierarchy: u64,
    /// Capacity of each top-N selector.
    pub max_results: usize,
    /// Size of the aggregation worker pool. Always at least 1.
    pub max_workers: usize,
    /// Minimum spacing between `(items_scanned, current_path)` ticks.
    pub progress_interval: Duration,
    /// Directory names skipped in addition to the built-in reserved names.
    pub extra_excludes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_file_size: DEFAULT_MIN_FILE_SIZE,
            min_dir_size_hierarchy: DEFAULT_MIN_DIR_SIZE_HIERARCHY,
            max_results: DEFAULT_MAX_RESULTS,
            max_workers: default_workers(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            extra_excludes: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Override the worker count, clamping to at least one worker.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }
}

/// `min(10, logical CPU count)`, never zero.
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, DEFAULT_WORKER_CAP)
}
