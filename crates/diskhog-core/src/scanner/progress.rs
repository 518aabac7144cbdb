/// Scan progress reporting: lightweight messages sent from the engine to
/// whichever frontend is listening, via a crossbeam channel.
///
/// The engine never waits for the consumer: messages are offered with
/// `try_send` and silently dropped when the channel is full or closed.
use crossbeam_channel::Sender;
use std::path::PathBuf;

/// Progress updates emitted during a scan.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// The root was validated and its top-level directories enumerated.
    Started {
        root: PathBuf,
        top_dirs: usize,
        workers: usize,
    },
    /// Periodic tick from the flat file walk.
    Walking {
        items_scanned: u64,
        current_path: PathBuf,
    },
    /// One top-level aggregation finished (successfully or not).
    Aggregated {
        completed: usize,
        total: usize,
        path: PathBuf,
    },
    /// A whole top-level directory could not be opened; it counts as zero.
    TopDirectoryFailed { path: PathBuf, message: String },
}

/// Non-blocking sending half. A sink without a channel discards everything.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<Sender<ScanProgress>>,
}

impl ProgressSink {
    pub fn new(tx: Sender<ScanProgress>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A sink that drops every message.
    pub fn none() -> Self {
        Self::default()
    }

    /// Offer a message without blocking.
    #[inline]
    pub fn send(&self, progress: ScanProgress) {
        if let Some(tx) = &self.tx {
            let _ = tx.try_send(progress);
        }
    }
}
