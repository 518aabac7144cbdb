/// Cloud-sync placeholder heuristics.
///
/// Detection is best effort: a path under a known sync root is only a hint
/// that attribute flags are worth checking. A false negative costs an
/// overcount, never a crash.

/// Path components that conventionally name a cloud-sync root.
pub const CLOUD_ROOT_MARKERS: &[&str] = &[
    "OneDrive",
    "iCloudDrive",
    "iCloud Drive",
    "Dropbox",
    "Google Drive",
    "Box",
];

/// `true` if any path component is, or begins with, a known sync-root name
/// (e.g. `OneDrive - Contoso`).
pub fn is_under_cloud_root(path: &std::path::Path) -> bool {
    path.components().any(|component| {
        let name = component.as_os_str().to_string_lossy();
        CLOUD_ROOT_MARKERS
            .iter()
            .any(|marker| match name.get(..marker.len()) {
                Some(prefix) if prefix.eq_ignore_ascii_case(marker) => name[marker.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| !c.is_alphanumeric()),
                _ => false,
            })
    })
}
