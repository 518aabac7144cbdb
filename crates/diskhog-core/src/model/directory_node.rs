/// A size-annotated directory subtree.
///
/// Nodes are built bottom-up by the Aggregator and are frozen once the
/// aggregation for their path returns: `size` is never observed partially.
/// Ownership moves Aggregator → Scheduler → report; nothing shares or
/// mutates a finished tree.
use compact_str::CompactString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Full path of this directory.
    pub path: PathBuf,

    /// Sum of all descendant file footprints.
    ///
    /// Invariant: equals the direct file footprints plus the sizes of
    /// every entry in `children`.
    pub size: u64,

    /// Number of files counted into `size`, transitively.
    pub file_count: u64,

    /// Subdirectories with a strictly positive size, keyed by full path.
    /// Empty subtrees are pruned.
    pub children: HashMap<PathBuf, DirectoryNode>,
}

impl DirectoryNode {
    /// A zero-sized node with no children.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: 0,
            file_count: 0,
            children: HashMap::new(),
        }
    }

    /// Last path component, or the whole path for roots such as `/` or `C:\`.
    pub fn name(&self) -> CompactString {
        display_name(&self.path)
    }

    /// `true` if no bytes were counted under this node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Direct children sorted by size descending, ties broken by path so the
    /// order is deterministic regardless of hash-map iteration order.
    pub fn children_by_size(&self) -> Vec<&DirectoryNode> {
        let mut children: Vec<&DirectoryNode> = self.children.values().collect();
        children.sort_unstable_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        children
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }

    /// Count a file's footprint directly under this node.
    pub(crate) fn add_file(&mut self, bytes: u64) {
        self.size += bytes;
        self.file_count += 1;
    }

    /// Attach a finished child. Zero-sized children are dropped.
    pub(crate) fn adopt(&mut self, child: DirectoryNode) {
        if child.size == 0 {
            return;
        }
        self.size += child.size;
        self.file_count += child.file_count;
        self.children.insert(child.path.clone(), child);
    }
}

/// Derive a display name for a path: the file name, or the trimmed path
/// itself when there is none (filesystem roots).
pub fn display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => {
            let s = path.to_string_lossy();
            let trimmed = s.trim_end_matches(['\\', '/']);
            if trimmed.is_empty() {
                CompactString::new(s)
            } else {
                CompactString::new(trimmed)
            }
        }
    }
}
