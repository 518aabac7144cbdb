/// Platform probes: privilege detection and the default scan root.
///
/// Nothing here changes how a scan behaves; frontends use it for defaults
/// and pre-scan messaging only.

pub mod permissions;

pub use permissions::is_elevated;

use std::path::PathBuf;

/// Filesystem root to scan when no path is given: `%SYSTEMDRIVE%\` on
/// Windows (falling back to `C:\`), `/` elsewhere.
pub fn default_root() -> PathBuf {
    #[cfg(windows)]
    {
        let drive = std::env::var("SYSTEMDRIVE").unwrap_or_else(|_| "C:".to_string());
        PathBuf::from(format!("{}\\", drive.trim_end_matches('\\')))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_is_absolute() {
        assert!(default_root().is_absolute());
    }
}
