/// Compressed/allocated footprint for Windows, with cloud placeholder
/// detection for OneDrive-style sync folders.
use super::cloud::is_under_cloud_root;
use super::{Footprint, SizeResolver};
use std::fs::Metadata;
use std::os::windows::ffi::OsStrExt;
use std::os::windows::fs::MetadataExt;
use std::path::Path;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{GetLastError, NO_ERROR};
use windows::Win32::Storage::FileSystem::{GetCompressedFileSizeW, INVALID_FILE_SIZE};

// File attribute bits from the Windows API.
const FILE_ATTRIBUTE_OFFLINE_VAL: u32 = 0x0000_1000;
const FILE_ATTRIBUTE_RECALL_ON_OPEN_VAL: u32 = 0x0004_0000;
const FILE_ATTRIBUTE_RECALL_ON_DATA_ACCESS_VAL: u32 = 0x0040_0000;

const PLACEHOLDER_MASK: u32 = FILE_ATTRIBUTE_OFFLINE_VAL
    | FILE_ATTRIBUTE_RECALL_ON_OPEN_VAL
    | FILE_ATTRIBUTE_RECALL_ON_DATA_ACCESS_VAL;

/// Uses `GetCompressedFileSizeW`, which accounts for NTFS compression and
/// sparse ranges. Falls back to the logical length when the call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressedSizeResolver;

impl SizeResolver for CompressedSizeResolver {
    fn footprint(&self, path: &Path, metadata: &Metadata) -> Footprint {
        if is_under_cloud_root(path) && metadata.file_attributes() & PLACEHOLDER_MASK != 0 {
            return Footprint::placeholder();
        }
        match compressed_size(path) {
            Some(bytes) => Footprint::bytes(bytes),
            None => Footprint::bytes(metadata.len()),
        }
    }

    fn name(&self) -> &'static str {
        "compressed size"
    }
}

/// `None` if the API reports failure.
fn compressed_size(path: &Path) -> Option<u64> {
    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let mut high: u32 = 0;

    // SAFETY: `wide` is NUL-terminated and outlives the call; `high` is a
    // valid out-pointer for the duration of the call.
    let low = unsafe {
        GetCompressedFileSizeW(PCWSTR(wide.as_ptr()), Some(&mut high as *mut u32))
    };

    // INVALID_FILE_SIZE is also a legitimate low dword; only the last error
    // distinguishes the two.
    if low == INVALID_FILE_SIZE && unsafe { GetLastError() } != NO_ERROR {
        return None;
    }
    Some((u64::from(high) << 32) | u64::from(low))
}
