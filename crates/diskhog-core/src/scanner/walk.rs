/// Flat file walk that seeds the "largest files" ranking.
///
/// Runs on the calling thread (`jwalk` in serial mode) and applies the same
/// directory exclusions as the Aggregator. Every file's footprint is
/// resolved; files at or above `min_file_size` are offered to a
/// [`TopNSelector`], so memory stays bounded by `max_results` no matter how
/// many large files exist.
use super::progress::{ProgressSink, ScanProgress};
use super::ScanContext;
use crate::analysis::TopNSelector;
use crate::error::{ErrorScope, ScanError};
use crate::model::FileRecord;
use std::path::Path;
use std::time::Instant;

/// Result of the flat walk.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Largest files, descending by footprint.
    pub largest_files: Vec<FileRecord>,
    /// Files visited.
    pub items_scanned: u64,
    /// Files that cleared the size floor (before top-K truncation).
    pub large_files_seen: u64,
}

/// Walk `root` and rank its large files.
pub fn walk_files(
    root: &Path,
    ctx: &ScanContext,
    progress: &ProgressSink,
) -> Result<WalkOutcome, ScanError> {
    let filter = ctx.filter.clone();
    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::Serial)
        .process_read_dir(move |_depth, _path, _state, children| {
            children.retain(|child| match child {
                Ok(entry) => !(entry.file_type().is_dir() && filter.is_excluded(&entry.file_name)),
                Err(_) => true,
            });
        });

    let mut selector = TopNSelector::new(ctx.config.max_results);
    let mut items_scanned: u64 = 0;
    let mut last_tick = Instant::now();

    for entry_result in walker {
        if ctx.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                ctx.suppress(path, ErrorScope::Walk, std::io::Error::other(err.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        items_scanned += 1;

        let path = entry.path();
        let footprint = match entry.metadata() {
            Ok(meta) => ctx.resolver.footprint(&path, &meta),
            Err(err) => {
                ctx.suppress(&path, ErrorScope::Walk, std::io::Error::other(err.to_string()));
                continue;
            }
        };

        if footprint.bytes >= ctx.config.min_file_size {
            selector.push(FileRecord {
                path: path.clone(),
                size: footprint.bytes,
                placeholder: footprint.placeholder,
            });
        }

        if last_tick.elapsed() >= ctx.config.progress_interval {
            last_tick = Instant::now();
            progress.send(ScanProgress::Walking {
                items_scanned,
                current_path: path,
            });
        }
    }

    Ok(WalkOutcome {
        large_files_seen: selector.seen(),
        largest_files: selector.into_sorted(),
        items_scanned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::LogicalSizeResolver;
    use crate::ScanConfig;
    use std::fs;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    fn write_bytes(path: &Path, n: usize) {
        fs::File::create(path)
            .unwrap()
            .write_all(&vec![0u8; n])
            .unwrap();
    }

    fn ctx(min_file_size: u64, max_results: usize) -> ScanContext {
        let config = ScanConfig {
            min_file_size,
            max_results,
            progress_interval: Duration::ZERO,
            ..ScanConfig::default()
        };
        ScanContext::new(config).with_resolver(Arc::new(LogicalSizeResolver))
    }

    #[test]
    fn ranks_files_above_floor() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        write_bytes(&root.join("small"), 10);
        write_bytes(&root.join("a/mid"), 200);
        write_bytes(&root.join("a/b/big"), 300);
        write_bytes(&root.join("a/b/edge"), 100);

        let outcome = walk_files(root, &ctx(100, 10), &ProgressSink::none()).unwrap();
        let sizes: Vec<_> = outcome.largest_files.iter().map(|f| f.size).collect();
        assert_eq!(sizes, [300, 200, 100]);
        assert_eq!(outcome.items_scanned, 4);
        assert_eq!(outcome.large_files_seen, 3);
        assert_eq!(outcome.largest_files[0].path, root.join("a/b/big"));
    }

    #[test]
    fn respects_max_results() {
        let tmp = tempfile::TempDir::new().unwrap();
        for (i, size) in [5usize, 3, 9, 1, 7].into_iter().enumerate() {
            write_bytes(&tmp.path().join(format!("f{i}")), size);
        }
        let outcome = walk_files(tmp.path(), &ctx(0, 2), &ProgressSink::none()).unwrap();
        let sizes: Vec<_> = outcome.largest_files.iter().map(|f| f.size).collect();
        assert_eq!(sizes, [9, 7]);
    }

    #[test]
    fn skips_excluded_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".hidden")).unwrap();
        fs::create_dir_all(tmp.path().join("System Volume Information")).unwrap();
        write_bytes(&tmp.path().join(".hidden/huge"), 5_000);
        write_bytes(&tmp.path().join("System Volume Information/huge"), 5_000);
        write_bytes(&tmp.path().join("visible"), 50);

        let outcome = walk_files(tmp.path(), &ctx(1, 10), &ProgressSink::none()).unwrap();
        assert_eq!(outcome.items_scanned, 1);
        assert_eq!(outcome.largest_files.len(), 1);
    }

    #[test]
    fn emits_walk_ticks() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_bytes(&tmp.path().join("a"), 1);
        write_bytes(&tmp.path().join("b"), 1);
        let (tx, rx) = crossbeam_channel::unbounded();

        walk_files(tmp.path(), &ctx(0, 10), &ProgressSink::new(tx)).unwrap();
        let last = rx.try_iter().last();
        assert!(matches!(
            last,
            Some(ScanProgress::Walking { items_scanned: 2, .. })
        ));
    }
}
