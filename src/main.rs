//! diskhog - finds what is eating your disk.
//!
//! Thin binary entry point. The scan engine lives in `diskhog-core`, the
//! command-line frontend in `diskhog-cli`.

use clap::Parser;
use diskhog_cli::CliArgs;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    match diskhog_cli::run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` overrides the default filter.
fn setup_logging(verbose: bool) {
    let default = if verbose {
        "diskhog=debug,diskhog_core=debug,diskhog_cli=debug,warn"
    } else {
        "diskhog=info,diskhog_core=info,diskhog_cli=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
