//! Scans a real temporary tree and checks every report format end to end.

use diskhog_cli::report::{render_text, write_report, ReportFormat};
use diskhog_core::scanner::ProgressSink;
use diskhog_core::size::LogicalSizeResolver;
use diskhog_core::{ScanConfig, ScanReport, Scanner};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const MIB: u64 = 1024 * 1024;

fn write_bytes(path: &Path, n: u64) {
    fs::File::create(path)
        .unwrap()
        .write_all(&vec![0u8; n as usize])
        .unwrap();
}

/// `media/movie.mkv` 3 MiB, `media/clips/a.mp4` 2 MiB, `docs/notes.txt` 1 KiB.
fn scan_fixture(tmp: &TempDir) -> (ScanReport, ScanConfig) {
    let root = tmp.path();
    fs::create_dir_all(root.join("media/clips")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    write_bytes(&root.join("media/movie.mkv"), 3 * MIB);
    write_bytes(&root.join("media/clips/a.mp4"), 2 * MIB);
    write_bytes(&root.join("docs/notes.txt"), 1024);

    let config = ScanConfig {
        min_file_size: MIB,
        min_dir_size_hierarchy: MIB,
        max_results: 10,
        ..ScanConfig::default()
    };
    let report = Scanner::new(config.clone())
        .with_resolver(Arc::new(LogicalSizeResolver))
        .scan(root, &ProgressSink::none())
        .unwrap();
    (report, config)
}

#[test]
fn text_report_lists_files_dirs_and_hierarchy() {
    let tmp = TempDir::new().unwrap();
    let (report, config) = scan_fixture(&tmp);
    let text = render_text(&report, &config);

    let movie = tmp.path().join("media/movie.mkv");
    let clip = tmp.path().join("media/clips/a.mp4");
    let movie_at = text.find(&movie.display().to_string()).unwrap();
    let clip_at = text.find(&clip.display().to_string()).unwrap();
    assert!(movie_at < clip_at, "files must be listed largest first");
    assert!(!text.contains("notes.txt"));

    assert!(text.contains("   Size: 5.00 MB"));
    assert!(text.contains("media  (5.00 MB)\n  clips  (2.00 MB)\n"));
    assert!(!text.contains("docs  ("));
}

#[test]
fn json_report_round_trips_through_serde() {
    let tmp = TempDir::new().unwrap();
    let (report, config) = scan_fixture(&tmp);
    let path = tmp.path().join("report.json");

    write_report(&path, ReportFormat::Json, &report, &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    let files = value["largest_files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["size"], 3 * MIB);

    let dirs = value["largest_dirs"].as_array().unwrap();
    assert_eq!(dirs[0]["size"], 5 * MIB);
    assert_eq!(dirs[1]["size"], 1024);

    let hierarchy = value["hierarchy"].as_array().unwrap();
    assert_eq!(hierarchy.len(), 1);
    assert_eq!(hierarchy[0][1]["name"], "clips");
    assert_eq!(hierarchy[0][1]["depth"], 1);
}

#[test]
fn csv_report_has_one_row_per_ranked_entry() {
    let tmp = TempDir::new().unwrap();
    let (report, config) = scan_fixture(&tmp);
    let path = tmp.path().join("report.csv");

    write_report(&path, ReportFormat::Csv, &report, &config).unwrap();
    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][0], "file");
    assert_eq!(&rows[0][3], (3 * MIB).to_string());
    assert_eq!(&rows[2][0], "directory");
    assert_eq!(&rows[3][3], "1024");
}

#[test]
fn report_into_missing_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let (report, config) = scan_fixture(&tmp);
    let path = tmp.path().join("no/such/dir/report.txt");
    let err = write_report(&path, ReportFormat::Text, &report, &config).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to create report file"));
}
