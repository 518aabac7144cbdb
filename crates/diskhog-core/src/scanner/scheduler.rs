/// Fans top-level directories out to a bounded worker pool.
///
/// Work is partitioned by top-level directory only: each worker runs one
/// [`Aggregator`] call to completion, so the number of concurrent
/// aggregations never exceeds `max_workers` however deep the trees are.
/// `run` is a barrier: it returns only after every unit has finished, and
/// the merge into the result map happens on the calling thread afterwards.
use super::aggregate::{AggregateError, Aggregator};
use super::progress::{ProgressSink, ScanProgress};
use super::ScanContext;
use crate::error::{ErrorScope, ScanError};
use crate::model::DirectoryNode;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Everything the Scheduler learned, one entry per input directory.
#[derive(Debug, Default)]
pub struct ScheduleOutcome {
    /// `path → (size, tree)`; failed units map to `(0, empty tree)`.
    pub results: HashMap<PathBuf, (u64, DirectoryNode)>,
    /// Top-level directories that could not be opened at all.
    pub failed: Vec<PathBuf>,
}

pub struct Scheduler<'a> {
    ctx: &'a ScanContext,
    pool: rayon::ThreadPool,
}

impl<'a> Scheduler<'a> {
    /// Build a dedicated pool of `ctx.config.max_workers` threads.
    pub fn new(ctx: &'a ScanContext) -> Result<Self, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(ctx.config.max_workers.max(1))
            .thread_name(|i| format!("diskhog-aggregate-{i}"))
            .build()?;
        Ok(Self { ctx, pool })
    }

    /// Aggregate every directory in `top_dirs` and wait for all of them.
    ///
    /// Returns `Err(ScanError::Cancelled)` if the scan was cancelled while
    /// workers were running; partial results are dropped.
    pub fn run(
        &self,
        top_dirs: &[PathBuf],
        progress: &ProgressSink,
    ) -> Result<ScheduleOutcome, ScanError> {
        let total = top_dirs.len();
        let completed = AtomicUsize::new(0);

        let finished: Vec<(PathBuf, Result<DirectoryNode, AggregateError>)> =
            self.pool.install(|| {
                top_dirs
                    .par_iter()
                    .with_max_len(1)
                    .map(|dir| {
                        let outcome = Aggregator::new(self.ctx).try_aggregate(dir);
                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        progress.send(ScanProgress::Aggregated {
                            completed: done,
                            total,
                            path: dir.clone(),
                        });
                        (dir.clone(), outcome)
                    })
                    .collect()
            });

        if self.ctx.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        // Single-writer merge after the barrier.
        let mut outcome = ScheduleOutcome {
            results: HashMap::with_capacity(total),
            failed: Vec::new(),
        };
        for (dir, result) in finished {
            match result {
                Ok(node) => {
                    debug!(
                        "{}: {} bytes in {} directories",
                        dir.display(),
                        node.size,
                        node.node_count()
                    );
                    outcome.results.insert(dir, (node.size, node));
                }
                Err(AggregateError::Unreadable(error)) => {
                    warn!("Cannot read {}: {error}", dir.display());
                    progress.send(ScanProgress::TopDirectoryFailed {
                        path: dir.clone(),
                        message: error.to_string(),
                    });
                    self.ctx.suppress(&dir, ErrorScope::TopDirectory, error);
                    outcome
                        .results
                        .insert(dir.clone(), (0, DirectoryNode::empty(&dir)));
                    outcome.failed.push(dir);
                }
                Err(AggregateError::Cancelled) => return Err(ScanError::Cancelled),
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::observer::CollectingObserver;
    use crate::size::LogicalSizeResolver;
    use crate::ScanConfig;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;

    fn write_bytes(path: &Path, n: usize) {
        fs::File::create(path)
            .unwrap()
            .write_all(&vec![0u8; n])
            .unwrap();
    }

    fn ctx(workers: usize) -> ScanContext {
        ScanContext::new(ScanConfig::default().with_workers(workers))
            .with_resolver(Arc::new(LogicalSizeResolver))
    }

    #[test]
    fn one_entry_per_top_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dirs: Vec<PathBuf> = (0..12).map(|i| tmp.path().join(format!("d{i}"))).collect();
        for (i, dir) in dirs.iter().enumerate() {
            fs::create_dir_all(dir).unwrap();
            write_bytes(&dir.join("f"), (i + 1) * 10);
        }

        let ctx = ctx(3);
        let outcome = Scheduler::new(&ctx)
            .unwrap()
            .run(&dirs, &ProgressSink::none())
            .unwrap();

        assert_eq!(outcome.results.len(), 12);
        assert!(outcome.failed.is_empty());
        for (i, dir) in dirs.iter().enumerate() {
            let (size, tree) = &outcome.results[dir];
            assert_eq!(*size, ((i + 1) * 10) as u64);
            assert_eq!(tree.size, *size);
        }
    }

    #[test]
    fn failing_unit_is_isolated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let good = tmp.path().join("good");
        let missing = tmp.path().join("missing");
        fs::create_dir_all(&good).unwrap();
        write_bytes(&good.join("f"), 99);

        let observer = Arc::new(CollectingObserver::default());
        let ctx = ctx(2).with_observer(observer.clone());
        let (tx, rx) = crossbeam_channel::unbounded();
        let outcome = Scheduler::new(&ctx)
            .unwrap()
            .run(&[good.clone(), missing.clone()], &ProgressSink::new(tx))
            .unwrap();

        assert_eq!(outcome.results[&good].0, 99);
        assert_eq!(outcome.results[&missing].0, 0);
        assert_eq!(outcome.failed, vec![missing]);
        assert_eq!(observer.count(ErrorScope::TopDirectory), 1);

        let ticks: Vec<_> = rx.try_iter().collect();
        assert!(ticks
            .iter()
            .any(|p| matches!(p, ScanProgress::TopDirectoryFailed { .. })));
        assert_eq!(
            ticks
                .iter()
                .filter(|p| matches!(p, ScanProgress::Aggregated { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn empty_input_returns_empty_map() {
        let ctx = ctx(4);
        let outcome = Scheduler::new(&ctx)
            .unwrap()
            .run(&[], &ProgressSink::none())
            .unwrap();
        assert!(outcome.results.is_empty());
    }
}
