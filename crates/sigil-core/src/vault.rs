use crate::utils::{is_descendant, parent_folder, reparent_key, vault_relative_path};
use crate::vfs::FileSystem;
use std::collections::BTreeSet;
use std::path::Path;

/// Maps a textual reference to the document it points at
pub trait LinkResolver: Send + Sync {
    /// Resolve `link` found in document `source`.
    /// Both `source` and the result are vault-relative, `/`-separated paths.
    fn resolve_link(&self, link: &str, source: &str) -> Option<String>;
}

/// Set of vault-relative file paths, used to resolve links the way a
/// note vault does: exact path first, then by file name.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    files: BTreeSet<String>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every non-hidden file under `root`
    pub fn scan(root: &Path, fs: &dyn FileSystem) -> Self {
        let files = fs
            .list_files(root)
            .iter()
            .filter_map(|path| vault_relative_path(root, path))
            .collect();
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.files.insert(path.into())
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.files.remove(path)
    }

    pub fn rename(&mut self, old_path: &str, new_path: impl Into<String>) {
        self.files.remove(old_path);
        self.files.insert(new_path.into());
    }

    /// Move every file below folder `old_folder` under `new_folder`.
    /// Returns the number of files moved.
    pub fn rename_folder(&mut self, old_folder: &str, new_folder: &str) -> usize {
        let moving: Vec<String> = self
            .files
            .iter()
            .filter(|f| is_descendant(f, old_folder))
            .cloned()
            .collect();
        for path in &moving {
            self.files.remove(path);
        }
        self.files.extend(
            moving
                .iter()
                .map(|path| reparent_key(path, old_folder, new_folder)),
        );
        moving.len()
    }

    fn find(&self, source: &str, candidates: &[String], case_sensitive: bool) -> Option<String> {
        let eq = |a: &str, b: &str| {
            if case_sensitive {
                a == b
            } else {
                a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
            }
        };
        let source_folder = parent_folder(source);

        for candidate in candidates {
            if candidate.contains('/') {
                // `./` and `../` are anchored at the source folder only
                let explicit = candidate.starts_with("./") || candidate.starts_with("../");
                for base in ["", source_folder].into_iter().skip(usize::from(explicit)) {
                    if let Some(joined) = join_relative(base, candidate) {
                        if let Some(hit) = self.files.iter().find(|f| eq(f.as_str(), &joined)) {
                            return Some(hit.clone());
                        }
                    }
                }
            }

            let suffix = candidate.trim_start_matches("./").trim_start_matches('/');
            if suffix.split('/').any(|s| s == "..") {
                continue;
            }
            let best = self
                .files
                .iter()
                .filter(|f| {
                    eq(f.as_str(), suffix)
                        || (f.len() > suffix.len()
                            && f.is_char_boundary(f.len() - suffix.len() - 1)
                            && f.as_bytes()[f.len() - suffix.len() - 1] == b'/'
                            && eq(&f[f.len() - suffix.len()..], suffix))
                })
                .min_by(|a, b| {
                    let rank = |f: &str| (parent_folder(f) != source_folder, f.len());
                    rank(a.as_str()).cmp(&rank(b.as_str())).then_with(|| a.cmp(b))
                });
            if let Some(hit) = best {
                return Some(hit.clone());
            }
        }

        None
    }
}

impl LinkResolver for VaultIndex {
    fn resolve_link(&self, link: &str, source: &str) -> Option<String> {
        let link = link.trim();
        if link.is_empty() {
            return Some(source.to_string());
        }

        let candidates = candidate_paths(link);
        self.find(source, &candidates, true)
            .or_else(|| self.find(source, &candidates, false))
    }
}

/// `link` as written, and with the implied `.md` extension
fn candidate_paths(link: &str) -> Vec<String> {
    let file_name = link.rsplit('/').next().unwrap_or(link);
    let has_extension = file_name
        .rfind('.')
        .map(|pos| pos > 0 && pos + 1 < file_name.len())
        .unwrap_or(false);
    if has_extension {
        vec![link.to_string(), format!("{}.md", link)]
    } else {
        vec![format!("{}.md", link)]
    }
}

/// Join `relative` onto folder `base`, resolving `.` and `..`.
/// A leading `/` anchors at the vault root. None when `..` escapes the vault.
fn join_relative(base: &str, relative: &str) -> Option<String> {
    let mut segments: Vec<&str> = if relative.starts_with('/') {
        Vec::new()
    } else {
        base.split('/').filter(|s| !s.is_empty()).collect()
    };
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s => segments.push(s),
        }
    }
    Some(segments.join("/"))
}
