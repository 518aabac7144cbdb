/// diskhog core: footprint resolution, concurrent aggregation, and ranking.
///
/// This crate contains all scanning logic with zero terminal or report-file
/// dependencies. Frontends (the bundled CLI, tests, other tools) drive it
/// through [`scanner::Scanner`] or [`scanner::start_scan`] and consume the
/// resulting [`scanner::ScanReport`].
///
/// # Modules
///
/// - [`config`]: Immutable scan configuration (thresholds, worker cap).
/// - [`error`]: Fatal scan errors and suppressed per-path failures.
/// - [`model`]: `DirectoryNode` trees, ranked records, size formatting.
/// - [`size`]: Platform-specific on-disk footprint resolution.
/// - [`scanner`]: Aggregator, Scheduler, flat file walk, and orchestration.
/// - [`analysis`]: Top-N selection and hierarchy filtering.
/// - [`platform`]: Privilege detection and default scan roots.
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod scanner;
pub mod size;

pub use config::ScanConfig;
pub use error::{ScanError, SuppressedError};
pub use model::{DirRecord, DirectoryNode, FileRecord};
pub use scanner::{start_scan, ScanHandle, ScanReport, Scanner};
