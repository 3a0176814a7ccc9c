use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Split a platform classpath string (`:` on Unix, `;` on Windows) into
/// its entries, dropping empty segments.
pub fn split_classpath(classpath: &str) -> Vec<PathBuf> {
    std::env::split_paths(classpath)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Remove duplicate paths while keeping the first occurrence of each.
pub fn dedup_paths<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// The ancestor `levels` directories above `path`, or `None` when the
/// filesystem root is reached first.
pub fn ancestor(path: &Path, levels: usize) -> Option<&Path> {
    let mut current = path;
    for _ in 0..levels {
        current = current.parent()?;
    }
    Some(current)
}

/// Make `path` absolute against the current directory without touching the
/// filesystem beyond `current_dir`.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            tracing::trace!("cannot read current directory: {e}");
            path.to_path_buf()
        }
    }
}
