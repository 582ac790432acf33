use std::path::Path;

/// Normalize a folder path to the canonical table key form.
///
/// - Converts backslashes to forward slashes (Windows compatibility)
/// - Drops empty and `.` segments, so leading, trailing and doubled slashes vanish
/// - The root folder is the empty string
///
/// # Examples
///
/// ```
/// use sigil_core::normalize_folder;
///
/// assert_eq!(normalize_folder("Projects/Active"), "Projects/Active");
/// assert_eq!(normalize_folder("/Projects//Active/"), "Projects/Active");
/// assert_eq!(normalize_folder("./Notes"), "Notes");
/// assert_eq!(normalize_folder("/"), "");
/// ```
pub fn normalize_folder(folder: &str) -> String {
    folder
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Containing folder of a vault-relative file path.
///
/// # Examples
///
/// ```
/// use sigil_core::parent_folder;
///
/// assert_eq!(parent_folder("Projects/Active/Plan.md"), "Projects/Active");
/// assert_eq!(parent_folder("Inbox.md"), "");
/// ```
pub fn parent_folder(file_path: &str) -> &str {
    match file_path.rfind('/') {
        Some(pos) => &file_path[..pos],
        None => "",
    }
}

/// Convert a path under `root` to a vault-relative, `/`-separated path.
/// Returns None when `path` is outside `root`.
pub fn vault_relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut s = relative.to_string_lossy().to_string();
    if std::path::MAIN_SEPARATOR == '\\' {
        s = s.replace('\\', "/");
    }
    Some(s)
}

/// Check if `candidate` lies strictly below `parent` in the folder tree.
/// Every non-root folder is below the root.
pub fn is_descendant(candidate: &str, parent: &str) -> bool {
    if parent.is_empty() {
        return !candidate.is_empty();
    }
    if candidate.len() <= parent.len() {
        return false;
    }
    candidate.starts_with(parent) && candidate.as_bytes()[parent.len()] == b'/'
}

/// Move `key` from under `old_parent` to under `new_parent`.
/// Keys outside `old_parent` are returned unchanged.
pub fn reparent_key(key: &str, old_parent: &str, new_parent: &str) -> String {
    if key == old_parent {
        return new_parent.to_string();
    }
    if !is_descendant(key, old_parent) || old_parent.is_empty() {
        return key.to_string();
    }
    let suffix = &key[old_parent.len()..];
    if new_parent.is_empty() {
        suffix.trim_start_matches('/').to_string()
    } else {
        format!("{}{}", new_parent, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_folder() {
        assert_eq!(normalize_folder(""), "");
        assert_eq!(normalize_folder("a"), "a");
        assert_eq!(normalize_folder("a//b"), "a/b");
        assert_eq!(normalize_folder("\\a\\b\\"), "a/b");
        assert_eq!(normalize_folder("a/./b"), "a/b");
        assert_eq!(normalize_folder("///"), "");
    }

    #[test]
    fn test_parent_folder() {
        assert_eq!(parent_folder("a/b/c.md"), "a/b");
        assert_eq!(parent_folder("c.md"), "");
        assert_eq!(parent_folder(""), "");
    }

    #[test]
    fn test_vault_relative_path() {
        let root = PathBuf::from("/vault");
        assert_eq!(
            vault_relative_path(&root, &root.join("Projects").join("Plan.md")),
            Some("Projects/Plan.md".to_string())
        );
        assert_eq!(vault_relative_path(&root, Path::new("/elsewhere/x.md")), None);
    }

    #[test]
    fn test_is_descendant() {
        assert!(is_descendant("a/b", "a"));
        assert!(is_descendant("a/b/c", "a/b"));
        assert!(!is_descendant("ab", "a"));
        assert!(!is_descendant("a", "a"));
        assert!(is_descendant("a", ""));
        assert!(!is_descendant("", ""));
    }

    #[test]
    fn test_reparent_key() {
        assert_eq!(reparent_key("a", "a", "x"), "x");
        assert_eq!(reparent_key("a/b/c", "a/b", "x/y"), "x/y/c");
        assert_eq!(reparent_key("ab/c", "a", "x"), "ab/c");
        assert_eq!(reparent_key("a/b", "a", ""), "b");
    }
}
