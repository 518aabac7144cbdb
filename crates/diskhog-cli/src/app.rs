//! Runs one scan from parsed arguments to written report.

use crate::args::CliArgs;
use crate::progress::{print_header, print_summary, ProgressReporter};
use crate::report::{default_report_path, write_report};
use anyhow::{Context, Result};
use chrono::Local;
use diskhog_core::error::ErrorScope;
use diskhog_core::platform::is_elevated;
use diskhog_core::scanner::ErrorObserver;
use diskhog_core::size::LogicalSizeResolver;
use diskhog_core::{start_scan, ScanError, Scanner, SuppressedError};
use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exit status after Ctrl-C, as a shell would report SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

/// Rows of each ranked list echoed to the terminal.
const SUMMARY_ROWS: usize = 10;

/// Logs every suppressed failure at debug level and keeps per-scope counts.
#[derive(Debug, Default)]
pub struct AuditObserver {
    entries: AtomicU64,
    directories: AtomicU64,
    top_directories: AtomicU64,
    walk: AtomicU64,
}

impl AuditObserver {
    pub fn count(&self, scope: ErrorScope) -> u64 {
        self.counter(scope).load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        [
            ErrorScope::Entry,
            ErrorScope::Directory,
            ErrorScope::TopDirectory,
            ErrorScope::Walk,
        ]
        .into_iter()
        .map(|scope| self.count(scope))
        .sum()
    }

    fn counter(&self, scope: ErrorScope) -> &AtomicU64 {
        match scope {
            ErrorScope::Entry => &self.entries,
            ErrorScope::Directory => &self.directories,
            ErrorScope::TopDirectory => &self.top_directories,
            ErrorScope::Walk => &self.walk,
        }
    }
}

impl ErrorObserver for AuditObserver {
    fn on_suppressed(&self, error: SuppressedError) {
        debug!("{error}");
        self.counter(error.scope).fetch_add(1, Ordering::Relaxed);
    }
}

/// Scan, print, and write the report. Returns the process exit code;
/// `Err` only for failures that prevent a report altogether.
pub fn run(args: CliArgs) -> Result<ExitCode> {
    let root = args.root();
    let config = args.scan_config();

    let audit = Arc::new(AuditObserver::default());
    let mut scanner = Scanner::new(config.clone()).with_observer(audit.clone());
    if args.apparent_size {
        scanner = scanner.with_resolver(Arc::new(LogicalSizeResolver));
    }

    let report_path = if args.no_report {
        None
    } else {
        Some(
            args.output
                .clone()
                .unwrap_or_else(|| default_report_path(args.format, Local::now())),
        )
    };

    if !is_elevated() {
        warn!("Not running with elevated privileges; unreadable directories count as 0 B");
    }

    if !args.quiet {
        print_header(
            &root,
            config.max_workers,
            scanner.context().resolver.name(),
            report_path.as_deref(),
        );
    }

    let cancel = scanner.cancel_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping scan...");
        cancel.store(true, Ordering::SeqCst);
    })
    .context("Failed to set signal handler")?;

    let handle = start_scan(root, scanner).context("Failed to start scan")?;

    let reporter = ProgressReporter::new(args.quiet);
    reporter.set_status("Listing top-level directories...");
    for progress in handle.progress_rx.iter() {
        reporter.update(&progress);
    }

    let report = match handle.wait() {
        Ok(report) => report,
        Err(ScanError::Cancelled) => {
            reporter.finish("Scan cancelled");
            warn!("Scan cancelled; no report written");
            return Ok(ExitCode::from(EXIT_INTERRUPTED));
        }
        Err(e) => {
            reporter.finish_and_clear();
            return Err(e).context("Scan failed");
        }
    };
    reporter.finish_and_clear();

    let unreadable = audit.total();
    if unreadable > 0 {
        info!(
            unreadable,
            top_level = audit.count(ErrorScope::TopDirectory),
            "Some paths could not be read and were counted as 0 B"
        );
    }

    if !args.quiet {
        print_summary(&report, unreadable, SUMMARY_ROWS.min(config.max_results));
    }

    if let Some(path) = report_path {
        write_report(&path, args.format, &report, &config)?;
        info!("Report written to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn audit_counts_per_scope() {
        let audit = AuditObserver::default();
        for scope in [ErrorScope::Entry, ErrorScope::Entry, ErrorScope::TopDirectory] {
            audit.on_suppressed(SuppressedError::new(
                "/x",
                scope,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        assert_eq!(audit.count(ErrorScope::Entry), 2);
        assert_eq!(audit.count(ErrorScope::TopDirectory), 1);
        assert_eq!(audit.count(ErrorScope::Walk), 0);
        assert_eq!(audit.total(), 3);
    }
}
