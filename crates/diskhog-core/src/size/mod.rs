/// On-disk footprint resolution.
///
/// "Size" is platform dependent: a sparse file allocates less than its
/// logical length, a compressed file less still, and a cloud placeholder
/// nothing at all. Each platform gets one [`SizeResolver`] implementation,
/// chosen once at startup by [`platform_resolver`]; the engine only ever
/// sees the trait.
///
/// Resolvers never fail. When the platform query is unavailable they
/// degrade to the logical length, and when even metadata is unreadable the
/// footprint is zero.
pub mod cloud;
#[cfg(unix)]
pub mod unix;
#[cfg(windows)]
pub mod windows;

use std::fs::Metadata;
use std::path::Path;
use std::sync::Arc;

/// Bytes a file actually consumes, plus an advisory placeholder flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Footprint {
    pub bytes: u64,
    /// Set when the content appears to be offloaded to a cloud provider.
    /// Display only; never affects aggregation.
    pub placeholder: bool,
}

impl Footprint {
    pub const ZERO: Footprint = Footprint {
        bytes: 0,
        placeholder: false,
    };

    #[inline]
    pub fn bytes(bytes: u64) -> Self {
        Self {
            bytes,
            placeholder: false,
        }
    }

    #[inline]
    pub fn placeholder() -> Self {
        Self {
            bytes: 0,
            placeholder: true,
        }
    }
}

/// Capability interface for footprint queries.
///
/// Implementations are stateless and shared across worker threads.
pub trait SizeResolver: Send + Sync {
    /// Footprint of `path`, given metadata the caller already holds
    /// (obtained without following symlinks).
    fn footprint(&self, path: &Path, metadata: &Metadata) -> Footprint;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Footprint of `path`, reading its metadata first. Unreadable paths
    /// resolve to zero.
    fn resolve(&self, path: &Path) -> Footprint {
        match std::fs::symlink_metadata(path) {
            Ok(meta) => self.footprint(path, &meta),
            Err(_) => Footprint::ZERO,
        }
    }
}

/// Reports the logical file length. Used as the universal fallback, for
/// apparent-size scans, and wherever tests need exact byte counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalSizeResolver;

impl SizeResolver for LogicalSizeResolver {
    fn footprint(&self, _path: &Path, metadata: &Metadata) -> Footprint {
        Footprint::bytes(metadata.len())
    }

    fn name(&self) -> &'static str {
        "logical length"
    }
}

/// The best resolver for the platform this binary was built for.
pub fn platform_resolver() -> Arc<dyn SizeResolver> {
    #[cfg(windows)]
    {
        Arc::new(windows::CompressedSizeResolver)
    }
    #[cfg(unix)]
    {
        Arc::new(unix::BlockCountResolver)
    }
    #[cfg(not(any(unix, windows)))]
    {
        Arc::new(LogicalSizeResolver)
    }
}
