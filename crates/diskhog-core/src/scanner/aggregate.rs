/// Recursive directory-size aggregation for a single subtree.
///
/// One `Aggregator` call walks one subtree on the calling thread; all
/// parallelism lives in the [`Scheduler`](super::scheduler::Scheduler)
/// above it. Depth-first traversal uses an explicit stack instead of native
/// recursion, so pathologically deep trees cannot exhaust the thread stack.
///
/// Each directory is listed to completion before any of its subdirectories
/// is opened: files are sized during the listing and only the subdirectory
/// paths are kept on the stack. At most one directory handle is open per
/// worker, whatever the depth.
///
/// # Failure handling
///
/// - An entry that cannot be stat'ed contributes zero.
/// - A nested directory that cannot be listed contributes zero.
/// - Only a failure to list the subtree root itself is reported to the
///   caller, via [`Aggregator::try_aggregate`].
///
/// Every suppressed failure is forwarded to the context's observer.
use super::ScanContext;
use crate::error::ErrorScope;
use crate::model::DirectoryNode;
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;
use thiserror::Error;

/// Why an aggregation produced no tree.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// The subtree root could not be opened or listed.
    #[error("cannot read directory: {0}")]
    Unreadable(#[source] std::io::Error),

    /// The scan was cancelled mid-walk.
    #[error("aggregation cancelled")]
    Cancelled,
}

/// A listed directory: its own files are already counted into `node`,
/// `subdirs` are still to be visited, in name order.
struct Frame {
    node: DirectoryNode,
    subdirs: vec::IntoIter<PathBuf>,
}

pub struct Aggregator<'a> {
    ctx: &'a ScanContext,
}

impl<'a> Aggregator<'a> {
    pub fn new(ctx: &'a ScanContext) -> Self {
        Self { ctx }
    }

    /// Aggregate `path`, degrading any failure to `(0, empty tree)`.
    pub fn aggregate(&self, path: &Path) -> (u64, DirectoryNode) {
        match self.try_aggregate(path) {
            Ok(node) => (node.size, node),
            Err(AggregateError::Unreadable(error)) => {
                self.ctx.suppress(path, ErrorScope::Directory, error);
                (0, DirectoryNode::empty(path))
            }
            Err(AggregateError::Cancelled) => (0, DirectoryNode::empty(path)),
        }
    }

    /// Aggregate `path`, reporting whether the subtree root was readable.
    ///
    /// The returned node is kept even when its size is zero; only nested
    /// empty directories are pruned.
    pub fn try_aggregate(&self, path: &Path) -> Result<DirectoryNode, AggregateError> {
        let mut stack = vec![self.list(path)?];

        while let Some(top) = stack.last_mut() {
            match top.subdirs.next() {
                Some(child) => match self.list(&child) {
                    Ok(frame) => stack.push(frame),
                    Err(AggregateError::Unreadable(error)) => {
                        self.ctx.suppress(child, ErrorScope::Directory, error)
                    }
                    Err(AggregateError::Cancelled) => return Err(AggregateError::Cancelled),
                },
                None => {
                    // All subdirectories adopted: the size is final. Hand it
                    // to the parent, or return it if it is the subtree root.
                    let Some(done) = stack.pop() else { break };
                    match stack.last_mut() {
                        Some(parent) => parent.node.adopt(done.node),
                        None => return Ok(done.node),
                    }
                }
            }
        }

        // Unreachable in practice: the root frame always returns above.
        Ok(DirectoryNode::empty(path))
    }

    /// Read one directory to the end and close it. Files are sized here;
    /// non-excluded subdirectories are returned for later visits.
    fn list(&self, path: &Path) -> Result<Frame, AggregateError> {
        let entries = fs::read_dir(path).map_err(AggregateError::Unreadable)?;
        let mut node = DirectoryNode::empty(path);
        let mut subdirs = Vec::new();

        for entry in entries {
            if self.ctx.is_cancelled() {
                return Err(AggregateError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    self.ctx.suppress(path, ErrorScope::Entry, error);
                    continue;
                }
            };

            // `DirEntry::file_type` does not follow symlinks, so links are
            // neither files nor directories here and contribute nothing.
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(error) => {
                    self.ctx.suppress(entry.path(), ErrorScope::Entry, error);
                    continue;
                }
            };

            if file_type.is_dir() {
                if !self.ctx.filter.is_excluded(&entry.file_name()) {
                    subdirs.push(entry.path());
                }
            } else if file_type.is_file() {
                let file = entry.path();
                match entry.metadata() {
                    Ok(meta) => {
                        let footprint = self.ctx.resolver.footprint(&file, &meta);
                        node.add_file(footprint.bytes);
                    }
                    Err(error) => self.ctx.suppress(file, ErrorScope::Entry, error),
                }
            }
        }

        subdirs.sort_unstable();
        Ok(Frame {
            node,
            subdirs: subdirs.into_iter(),
        })
    }
}
