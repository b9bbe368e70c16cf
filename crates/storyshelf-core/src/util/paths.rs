//! Path resolution utilities.

use std::path::{Component, Path, PathBuf};

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use storyshelf_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/stories");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Does not touch the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Join `relative` onto `base` and return the result only if it stays inside
/// `base`.
///
/// Returns `None` for absolute inputs and for anything that climbs out of
/// the base directory with `..`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use storyshelf_core::util::paths::resolve_within;
///
/// let base = Path::new("/site/content");
/// assert!(resolve_within(base, "snippets/rebase.sh").is_some());
/// assert!(resolve_within(base, "../../etc/passwd").is_none());
/// ```
pub fn resolve_within(base: &Path, relative: impl AsRef<Path>) -> Option<PathBuf> {
    let relative = relative.as_ref();
    if relative.is_absolute() {
        return None;
    }
    let base = normalize_lexically(base);
    let joined = normalize_lexically(&base.join(relative));
    if joined.starts_with(&base) && joined != base {
        Some(joined)
    } else {
        None
    }
}
