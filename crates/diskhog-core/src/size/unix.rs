/// Block-allocation footprint for Unix filesystems.
use super::{Footprint, SizeResolver};
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// `st_blocks` is always counted in 512-byte units, independent of the
/// filesystem block size.
pub const STAT_BLOCK_UNIT: u64 = 512;

/// Footprint = allocated blocks × 512. Smaller than the logical length for
/// sparse files, larger for small files rounded up to a whole block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockCountResolver;

impl SizeResolver for BlockCountResolver {
    fn footprint(&self, _path: &Path, metadata: &Metadata) -> Footprint {
        match metadata.blocks().checked_mul(STAT_BLOCK_UNIT) {
            Some(bytes) => Footprint::bytes(bytes),
            None => Footprint::bytes(metadata.len()),
        }
    }

    fn name(&self) -> &'static str {
        "allocated blocks"
    }
}
