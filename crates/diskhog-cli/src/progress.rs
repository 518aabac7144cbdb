//! Terminal output around a scan: header, live spinner, and summary.
//!
//! The header and spinner go to stderr; only the summary is printed on
//! stdout.

use console::style;
use diskhog_core::model::size::{format_count, format_size};
use diskhog_core::scanner::ScanProgress;
use diskhog_core::ScanReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Longest path shown on the spinner line before it is shortened.
const MAX_PATH_CHARS: usize = 60;

/// Spinner fed by [`ScanProgress`] messages. Hidden when `quiet`.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    pub fn update(&self, progress: &ScanProgress) {
        match progress {
            ScanProgress::Started { top_dirs, .. } => {
                self.bar
                    .set_message(format!("Aggregating 0/{top_dirs} directories"));
            }
            ScanProgress::Aggregated {
                completed,
                total,
                path,
            } => {
                self.bar.set_message(format!(
                    "Aggregating {completed}/{total} | {}",
                    shorten(path)
                ));
            }
            ScanProgress::Walking {
                items_scanned,
                current_path,
            } => {
                self.bar.set_message(format!(
                    "Files: {} | {}",
                    format_count(*items_scanned),
                    shorten(current_path)
                ));
            }
            ScanProgress::TopDirectoryFailed { path, message } => {
                self.bar.println(format!(
                    "{} {}: {message}",
                    style("Skipped").yellow().bold(),
                    path.display()
                ));
            }
        }
    }

    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Keep the tail of long paths: `...tail/of/the/path`.
fn shorten(path: &Path) -> String {
    let text = path.display().to_string();
    let count = text.chars().count();
    if count <= MAX_PATH_CHARS {
        return text;
    }
    let tail: String = text.chars().skip(count - (MAX_PATH_CHARS - 3)).collect();
    format!("...{tail}")
}

/// Printed before the scan starts.
pub fn print_header(root: &Path, workers: usize, measure: &str, output: Option<&Path>) {
    eprintln!();
    eprintln!(
        "{} {}",
        style("diskhog").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{}", style("─".repeat(50)).dim());
    eprintln!("  {} {}", style("Root:").bold(), root.display());
    eprintln!("  {} {}", style("Workers:").bold(), workers);
    eprintln!("  {} {}", style("Sizes:").bold(), measure);
    if let Some(output) = output {
        eprintln!("  {} {}", style("Report:").bold(), output.display());
    }
    eprintln!();
}

/// Short console digest of a finished scan.
pub fn print_summary(report: &ScanReport, unreadable: u64, shown: usize) {
    println!();
    println!("{}", style("Scan Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Files:").bold(),
        format_count(report.items_scanned)
    );
    println!(
        "  {} {}",
        style("In directories:").bold(),
        format_size(report.total_dir_size())
    );
    println!(
        "  {} {:.1}s",
        style("Duration:").bold(),
        report.duration.as_secs_f64()
    );
    if unreadable > 0 {
        println!(
            "  {} {}",
            style("Unreadable:").yellow().bold(),
            format_count(unreadable)
        );
    }

    if !report.largest_files.is_empty() {
        println!();
        println!("  {}", style("Largest files").bold());
        for file in report.largest_files.iter().take(shown) {
            println!("    {:>12}  {}", format_size(file.size), file.path.display());
        }
    }
    if !report.largest_dirs.is_empty() {
        println!();
        println!("  {}", style("Largest directories").bold());
        for dir in report.largest_dirs.iter().take(shown) {
            println!("    {:>12}  {}", format_size(dir.size), dir.path.display());
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn short_paths_untouched() {
        assert_eq!(shorten(Path::new("/var/log")), "/var/log");
    }

    #[test]
    fn long_paths_keep_tail() {
        let long = PathBuf::from(format!("/{}/file.bin", "x".repeat(100)));
        let short = shorten(&long);
        assert_eq!(short.chars().count(), MAX_PATH_CHARS);
        assert!(short.starts_with("..."));
        assert!(short.ends_with("/file.bin"));
    }

    #[test]
    fn hidden_reporter_accepts_every_message() {
        let reporter = ProgressReporter::new(true);
        reporter.update(&ScanProgress::Started {
            root: PathBuf::from("/"),
            top_dirs: 7,
            workers: 2,
        });
        reporter.update(&ScanProgress::TopDirectoryFailed {
            path: PathBuf::from("/locked"),
            message: "permission denied".into(),
        });
        reporter.finish_and_clear();
        assert!(reporter.bar.is_finished());
    }
}
