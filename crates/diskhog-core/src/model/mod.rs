/// Data model for scan results.
///
/// Re-exports the size-annotated directory tree and the flat records that
/// feed the ranked lists.
pub mod directory_node;
pub mod record;
pub mod size;

pub use directory_node::DirectoryNode;
pub use record::{DirRecord, FileRecord};
