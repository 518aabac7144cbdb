/// Directory-name exclusion rules shared by the Aggregator and the flat walk.
///
/// Excluded directories are skipped entirely: not walked, not sized.
use std::ffi::OsStr;

/// Reserved volume-metadata directory names, matched as prefixes.
pub const RESERVED_NAMES: &[&str] = &["System Volume Information"];

/// Leading characters that mark OS bookkeeping or hidden directories.
const EXCLUDED_PREFIXES: &[char] = &['.', '$'];

#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    /// Exact names excluded on top of the built-in rules.
    extra: Vec<String>,
}

impl NameFilter {
    pub fn new(extra: Vec<String>) -> Self {
        Self { extra }
    }

    /// `true` if a directory with this name must not be walked.
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        name.starts_with(EXCLUDED_PREFIXES)
            || RESERVED_NAMES.iter().any(|r| name.starts_with(r))
            || self.extra.iter().any(|e| *e == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluded(filter: &NameFilter, name: &str) -> bool {
        filter.is_excluded(OsStr::new(name))
    }

    #[test]
    fn built_in_rules() {
        let filter = NameFilter::default();
        assert!(excluded(&filter, ".git"));
        assert!(excluded(&filter, "$RECYCLE.BIN"));
        assert!(excluded(&filter, "System Volume Information"));
        assert!(!excluded(&filter, "Users"));
        assert!(!excluded(&filter, "my.dir"));
    }

    #[test]
    fn extra_names_match_exactly() {
        let filter = NameFilter::new(vec!["node_modules".into()]);
        assert!(excluded(&filter, "node_modules"));
        assert!(!excluded(&filter, "node_modules_backup"));
    }
}
