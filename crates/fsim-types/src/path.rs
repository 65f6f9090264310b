//! Path rules for the simulated namespace.
//!
//! Paths are absolute, `/`-delimited strings. A directory's path is both its
//! name and its full route from the root. The rules here are purely
//! syntactic; none of them consult the directory tree.
//!
//! Valid paths:
//! - Must start with `/`
//! - Must not contain whitespace (the journal line format cannot carry it)
//! - Must not contain empty components (`//`) or end with `/`, except `/` itself

use crate::error::TypeError;

/// The root path. Always present, never deleted or renamed.
pub const ROOT: &str = "/";

/// Derive the parent path of `path`.
///
/// The parent is everything before the last `/`. When the last `/` is the
/// leading one, or there is no `/` at all, the parent is the root.
///
/// ```
/// use fsim_types::parent_path;
///
/// assert_eq!(parent_path("/a/b/c"), "/a/b");
/// assert_eq!(parent_path("/a"), "/");
/// assert_eq!(parent_path("/"), "/");
/// assert_eq!(parent_path("a"), "/");
/// ```
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx > 0 => &path[..idx],
        _ => ROOT,
    }
}

/// Validate an absolute directory path.
pub fn validate_absolute(path: &str) -> Result<(), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    };

    if path.is_empty() {
        return Err(invalid("path must not be empty"));
    }
    if !path.starts_with('/') {
        return Err(invalid("path must be absolute"));
    }
    if path.chars().any(char::is_whitespace) {
        return Err(invalid("path must not contain whitespace"));
    }
    if path == ROOT {
        return Ok(());
    }
    if path.ends_with('/') {
        return Err(invalid("path must not end with '/'"));
    }
    if path.contains("//") {
        return Err(invalid("path components must not be empty"));
    }
    Ok(())
}

/// Validate a file name: non-empty, no `/`, no whitespace.
pub fn validate_file_name(name: &str) -> Result<(), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidName {
        name: name.to_string(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(invalid("file name must not be empty"));
    }
    if name.contains('/') {
        return Err(invalid("file name must not contain '/'"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("file name must not contain whitespace"));
    }
    Ok(())
}

/// Join a directory path and a child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// The last component of `path`; `/` for the root.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx + 1 < path.len() => &path[idx + 1..],
        _ => path,
    }
}

/// Rewrite `path` from under `old_prefix` to under `new_prefix`.
///
/// Returns `None` when `path` is neither `old_prefix` itself nor one of its
/// descendants. `/a/bc` is not a descendant of `/a/b`.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if path == old_prefix {
        return Some(new_prefix.to_string());
    }
    let rest = path.strip_prefix(old_prefix)?;
    if rest.starts_with('/') {
        Some(format!("{new_prefix}{rest}"))
    } else {
        None
    }
}
