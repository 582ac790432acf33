use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Abstract interface for file system operations.
pub trait FileSystem: Send + Sync {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Replace the contents of a file, creating parent directories as needed.
    fn write_string(&self, path: &Path, content: &str) -> std::io::Result<()>;

    /// Whether `path` names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List all files under the root directory, recursively.
    /// Hidden entries (names starting with '.') are skipped.
    fn list_files(&self, root: &Path) -> Vec<PathBuf>;
}

/// Standard implementation of FileSystem using std::fs and walkdir.
pub struct PhysicalFileSystem;

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

impl FileSystem for PhysicalFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_string(&self, path: &Path, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_skips_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("Projects")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join("Projects/Plan.md"), "").unwrap();
        fs::write(root.join(".obsidian/app.json"), "{}").unwrap();
        fs::write(root.join(".hidden.md"), "").unwrap();
        fs::write(root.join("Inbox.md"), "").unwrap();

        let mut files = PhysicalFileSystem.list_files(root);
        files.sort();
        assert_eq!(
            files,
            vec![root.join("Inbox.md"), root.join("Projects/Plan.md")]
        );
    }

    #[test]
    fn test_write_string_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/settings.yml");
        PhysicalFileSystem.write_string(&path, "enabled: true\n").unwrap();
        assert_eq!(
            PhysicalFileSystem.read_to_string(&path).unwrap(),
            "enabled: true\n"
        );
    }

    #[test]
    fn test_is_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("Projects")).unwrap();
        fs::write(root.join("Inbox.md"), "").unwrap();

        assert!(PhysicalFileSystem.is_dir(&root.join("Projects")));
        assert!(!PhysicalFileSystem.is_dir(&root.join("Inbox.md")));
        assert!(!PhysicalFileSystem.is_dir(&root.join("Missing")));
    }
}
