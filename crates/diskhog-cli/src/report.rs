//! Report formatting and persistence.
//!
//! The engine hands over a finished [`ScanReport`]; everything here is pure
//! formatting except [`write_report`], which is the only place the program
//! writes a file.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use diskhog_core::analysis::{format_hierarchy, HierarchyLine};
use diskhog_core::model::size::{format_count, format_size};
use diskhog_core::{DirRecord, FileRecord, ScanConfig, ScanReport};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 80;

/// Output format of the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text, same layout as the console summary
    Text,
    /// Full structured report
    Json,
    /// Ranked files and directories, one row each
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// `disk_space_report_YYYYmmdd_HHMMSS.<ext>` in the working directory.
pub fn default_report_path(format: ReportFormat, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "disk_space_report_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", rule());
}

/// The full text report.
pub fn render_text(report: &ScanReport, config: &ScanConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Disk space report from {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "Scan root: {}", report.root.display());
    let _ = writeln!(
        out,
        "Scan completed in {:.2} seconds ({} files, sizes by {}).",
        report.duration.as_secs_f64(),
        format_count(report.items_scanned),
        report.resolver
    );
    out.push('\n');

    render_files(&mut out, &report.largest_files, config);
    out.push('\n');
    render_dirs(&mut out, &report.largest_dirs, config);
    out.push('\n');
    render_hierarchy(&mut out, &report.hierarchy(config.min_dir_size_hierarchy), config);

    if !report.failed_top_dirs.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Unreadable top-level directories (counted as 0 B):");
        for dir in &report.failed_top_dirs {
            let _ = writeln!(out, "  {}", dir.display());
        }
    }
    out
}

fn render_files(out: &mut String, files: &[FileRecord], config: &ScanConfig) {
    section(
        out,
        &format!(
            "TOP-{} LARGEST FILES (at least {}):",
            config.max_results,
            format_size(config.min_file_size)
        ),
    );
    if files.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for (i, file) in files.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, file.path.display());
        if file.placeholder {
            let _ = writeln!(
                out,
                "   Size: {} (cloud placeholder, not stored locally)",
                format_size(file.size)
            );
        } else {
            let _ = writeln!(out, "   Size: {}", format_size(file.size));
        }
    }
}

fn render_dirs(out: &mut String, dirs: &[DirRecord], config: &ScanConfig) {
    section(
        out,
        &format!("TOP-{} LARGEST DIRECTORIES:", config.max_results),
    );
    if dirs.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for (i, dir) in dirs.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, dir.path.display());
        let _ = writeln!(out, "   Size: {}", format_size(dir.size));
    }
}

fn render_hierarchy(out: &mut String, views: &[Vec<HierarchyLine>], config: &ScanConfig) {
    section(
        out,
        &format!(
            "DIRECTORY HIERARCHY (at least {}):",
            format_size(config.min_dir_size_hierarchy)
        ),
    );
    if views.is_empty() {
        let _ = writeln!(out, "(no directory reaches the threshold)");
    }
    for (i, lines) in views.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_hierarchy(lines));
    }
}

/// Serialised shape of the JSON report.
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Local>,
    root: &'a Path,
    duration_secs: f64,
    items_scanned: u64,
    size_measure: &'static str,
    min_file_size: u64,
    min_dir_size_hierarchy: u64,
    largest_files: &'a [FileRecord],
    largest_dirs: &'a [DirRecord],
    hierarchy: Vec<Vec<HierarchyLine>>,
    failed_top_dirs: &'a [PathBuf],
}

pub fn write_json<W: Write>(report: &ScanReport, config: &ScanConfig, writer: W) -> Result<()> {
    let doc = JsonReport {
        generated_at: report.started_at,
        root: &report.root,
        duration_secs: report.duration.as_secs_f64(),
        items_scanned: report.items_scanned,
        size_measure: report.resolver,
        min_file_size: config.min_file_size,
        min_dir_size_hierarchy: config.min_dir_size_hierarchy,
        largest_files: &report.largest_files,
        largest_dirs: &report.largest_dirs,
        hierarchy: report.hierarchy(config.min_dir_size_hierarchy),
        failed_top_dirs: &report.failed_top_dirs,
    };
    serde_json::to_writer_pretty(writer, &doc).context("Failed to serialise JSON report")
}

#[derive(Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    rank: usize,
    path: &'a Path,
    size_bytes: u64,
    size: String,
    placeholder: bool,
}

/// Both ranked lists as CSV rows: `kind,rank,path,size_bytes,size,placeholder`.
pub fn write_csv<W: Write>(report: &ScanReport, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (i, file) in report.largest_files.iter().enumerate() {
        csv.serialize(CsvRow {
            kind: "file",
            rank: i + 1,
            path: &file.path,
            size_bytes: file.size,
            size: format_size(file.size),
            placeholder: file.placeholder,
        })?;
    }
    for (i, dir) in report.largest_dirs.iter().enumerate() {
        csv.serialize(CsvRow {
            kind: "directory",
            rank: i + 1,
            path: &dir.path,
            size_bytes: dir.size,
            size: format_size(dir.size),
            placeholder: false,
        })?;
    }
    csv.flush().context("Failed to flush CSV report")?;
    Ok(())
}

/// Persist the report in `format` at `path`.
pub fn write_report(
    path: &Path,
    format: ReportFormat,
    report: &ScanReport,
    config: &ScanConfig,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ReportFormat::Text => writer
            .write_all(render_text(report, config).as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?,
        ReportFormat::Json => write_json(report, config, &mut writer)?,
        ReportFormat::Csv => write_csv(report, &mut writer)?,
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}
