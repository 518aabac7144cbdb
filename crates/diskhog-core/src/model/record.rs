/// Flat `(path, size)` records produced by the scan and ranked by
/// [`TopNSelector`](crate::analysis::TopNSelector).
use crate::analysis::top_n::Measured;
use serde::Serialize;
use std::path::PathBuf;

/// A file discovered by the flat walk whose footprint cleared the
/// large-file floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Resolved on-disk footprint, not necessarily the logical length.
    pub size: u64,
    /// Advisory: the resolver believes the content is cloud-offloaded.
    pub placeholder: bool,
}

impl Measured for FileRecord {
    #[inline]
    fn size(&self) -> u64 {
        self.size
    }
}

/// A top-level directory and its aggregated footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirRecord {
    pub path: PathBuf,
    pub size: u64,
}

impl Measured for DirRecord {
    #[inline]
    fn size(&self) -> u64 {
        self.size
    }
}
