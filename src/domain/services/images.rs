use std::path::{Component, Path, PathBuf};

/// Maps a stored `image_path` onto a file below the uploads root.
///
/// Rows written by older deployments carry paths such as
/// `uploads/events/tyre.jpg`; the leading `uploads/` segment is dropped so
/// both forms land in the same place. Anything that would leave the root
/// (`..`, absolute paths, drive prefixes) resolves to `None`.
pub fn resolve_upload_path(root: &Path, stored: &str) -> Option<PathBuf> {
    let trimmed = stored.trim().trim_start_matches(['/', '\\']);
    let relative = trimmed.strip_prefix("uploads/").unwrap_or(trimmed);

    let mut resolved = root.to_path_buf();
    let mut depth = 0usize;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    (depth > 0).then_some(resolved)
}

/// Public URL under which a resource image is served.
pub fn image_url(base_url: &str, resource: &str, id: i64) -> String {
    format!("{}/{}/{}/image", base_url.trim_end_matches('/'), resource, id)
}
