/// Threshold-pruned, size-descending view of a `DirectoryNode` tree.
///
/// Pruning affects display only: a child below the threshold is neither
/// emitted nor descended into, but its bytes are still part of every
/// ancestor's size. The tree is never mutated, so the same tree can be
/// rendered repeatedly with different thresholds.
use crate::model::size::format_size;
use crate::model::DirectoryNode;
use compact_str::CompactString;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

/// One printable row of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyLine {
    /// Nesting depth (0 = the rendered root).
    pub depth: usize,
    pub name: CompactString,
    pub path: PathBuf,
    pub size: u64,
}

/// Depth-first, largest-first listing of `node` and every descendant whose
/// size is at least `min_size`. The root itself is always emitted.
pub fn render(node: &DirectoryNode, min_size: u64) -> Vec<HierarchyLine> {
    let mut lines = Vec::new();
    let mut stack: Vec<(&DirectoryNode, usize)> = vec![(node, 0)];

    while let Some((current, depth)) = stack.pop() {
        lines.push(HierarchyLine {
            depth,
            name: current.name(),
            path: current.path.clone(),
            size: current.size,
        });

        // Push in reverse so the largest child is popped next.
        let children = current.children_by_size();
        stack.extend(
            children
                .into_iter()
                .filter(|child| child.size >= min_size)
                .rev()
                .map(|child| (child, depth + 1)),
        );
    }

    lines
}

/// Indented text rendering, one row per line: `name  (size)`.
pub fn format_hierarchy(lines: &[HierarchyLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{:indent$}{}  ({})",
            "",
            line.name,
            format_size(line.size),
            indent = line.depth * 2
        );
    }
    out
}
