/// diskhog CLI: the collaborators around the scan engine.
///
/// - [`args`]: Command-line parsing into a [`ScanConfig`](diskhog_core::ScanConfig).
/// - [`progress`]: Progress spinner, header and summary on the terminal.
/// - [`report`]: Text, JSON and CSV report formatting and persistence.
/// - [`app`]: Wires the above to a background scan with Ctrl-C handling.
pub mod app;
pub mod args;
pub mod progress;
pub mod report;

pub use app::run;
pub use args::CliArgs;
