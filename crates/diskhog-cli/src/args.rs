//! Command-line arguments.

use crate::report::ReportFormat;
use clap::Parser;
use diskhog_core::config::{default_workers, MIB};
use diskhog_core::platform::default_root;
use diskhog_core::ScanConfig;
use std::path::PathBuf;

/// Find the largest files and directories under a path
#[derive(Parser, Debug, Clone)]
#[command(
    name = "diskhog",
    version,
    about = "Find the largest files and directories under a path",
    long_about = "Walks a directory tree, measures the on-disk footprint of every file \
                  (allocated blocks, compression and cloud placeholders included) and \
                  reports the largest files, the largest top-level directories, and a \
                  size-filtered hierarchy of the biggest subtrees.",
    after_help = "EXAMPLES:\n    \
        diskhog                          # scan the filesystem root\n    \
        diskhog ~/projects -n 20         # top 20 under a folder\n    \
        diskhog /var --min-dir-size 100  # hierarchy for dirs >= 100 MiB\n    \
        diskhog D:\\ --format json -o report.json"
)]
pub struct CliArgs {
    /// Directory to scan (defaults to the filesystem root)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Smallest file to list, in MiB
    #[arg(long, default_value_t = 10, value_name = "MIB")]
    pub min_file_size: u64,

    /// Smallest top-level directory to include in the hierarchy, in MiB
    #[arg(long, default_value_t = 500, value_name = "MIB")]
    pub min_dir_size: u64,

    /// Number of entries in each ranked list
    #[arg(short = 'n', long, default_value_t = 100, value_name = "NUM")]
    pub max_results: usize,

    /// Number of directories aggregated concurrently
    #[arg(short = 'w', long, default_value_t = default_workers(), value_name = "NUM")]
    pub workers: usize,

    /// Skip directories with this exact name (can be repeated)
    #[arg(long = "exclude", value_name = "NAME", action = clap::ArgAction::Append)]
    pub excludes: Vec<String>,

    /// Measure logical file length instead of allocated space
    #[arg(long)]
    pub apparent_size: bool,

    /// Report file (default: disk_space_report_<timestamp>.<ext>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report file format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Do not write a report file
    #[arg(long, conflicts_with = "output")]
    pub no_report: bool,

    /// Suppress progress and the console summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging, including every unreadable path
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The scan root, falling back to the platform default.
    pub fn root(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_root)
    }

    /// Immutable engine configuration derived from the flags.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_file_size: self.min_file_size.saturating_mul(MIB),
            min_dir_size_hierarchy: self.min_dir_size.saturating_mul(MIB),
            max_results: self.max_results,
            extra_excludes: self.excludes.clone(),
            ..ScanConfig::default()
        }
        .with_workers(self.workers)
    }
}
