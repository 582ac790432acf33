//! Folder -> icon resolution
//!
//! Longest-prefix match over `/`-separated path segments, most specific first,
//! with the root entry (`""`) as the catch-all.

use crate::model::FolderIconMapping;
use crate::table::MappingTable;
use crate::utils::parent_folder;

/// Find the most specific mapping for `folder_path`.
///
/// An exact key match wins outright. Otherwise the longest configured prefix
/// of the path's segments is used, then the root entry. A folder nothing
/// covers resolves to `None`, which means "no icon" rather than an error.
///
/// # Examples
///
/// ```
/// use sigil_core::{resolve, FolderIconMapping, MappingTable};
///
/// let table: MappingTable = [
///     ("Projects".to_string(), FolderIconMapping::new("folder")),
///     ("Projects/Active".to_string(), FolderIconMapping::new("star")),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(resolve("Projects/Active/Sub", &table).unwrap().icon, "star");
/// assert_eq!(resolve("Projects/Archive", &table).unwrap().icon, "folder");
/// assert!(resolve("Other", &table).is_none());
/// ```
pub fn resolve<'a>(folder_path: &str, table: &'a MappingTable) -> Option<&'a FolderIconMapping> {
    if let Some(mapping) = table.get(folder_path) {
        return Some(mapping);
    }

    let segments: Vec<&str> = folder_path.split('/').filter(|s| !s.is_empty()).collect();
    for len in (1..=segments.len()).rev() {
        if let Some(mapping) = table.get(&segments[..len].join("/")) {
            return Some(mapping);
        }
    }

    table.get("")
}

/// Resolver bound to one mapping table
#[derive(Debug, Clone, Copy)]
pub struct FolderIconResolver<'a> {
    table: &'a MappingTable,
}

impl<'a> FolderIconResolver<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        Self { table }
    }

    pub fn resolve(&self, folder_path: &str) -> Option<&'a FolderIconMapping> {
        resolve(folder_path, self.table)
    }

    /// Resolve the folder containing a vault-relative file path
    pub fn resolve_for_file(&self, file_path: &str) -> Option<&'a FolderIconMapping> {
        resolve(parent_folder(file_path), self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_table() -> MappingTable {
        [
            ("".to_string(), FolderIconMapping::new("file")),
            ("Projects".to_string(), FolderIconMapping::new("folder")),
            (
                "Projects/Active".to_string(),
                FolderIconMapping::new("star").with_color("#ff0000"),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = scenario_table();
        assert_eq!(
            resolve("Projects/Active/Sub", &table),
            Some(&FolderIconMapping::new("star").with_color("#ff0000"))
        );
    }

    #[test]
    fn test_falls_back_to_parent() {
        let table = scenario_table();
        assert_eq!(
            resolve("Projects/Archive", &table),
            Some(&FolderIconMapping::new("folder"))
        );
    }

    #[test]
    fn test_root_default() {
        let table = scenario_table();
        assert_eq!(resolve("Other", &table), Some(&FolderIconMapping::new("file")));
        assert_eq!(resolve("", &table), Some(&FolderIconMapping::new("file")));
    }

    #[test]
    fn test_exact_match_beats_prefixes() {
        let table = scenario_table();
        assert_eq!(resolve("Projects", &table).unwrap().icon, "folder");
        assert_eq!(resolve("Projects/Active", &table).unwrap().icon, "star");
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let table = MappingTable::new();
        assert_eq!(resolve("", &table), None);
        assert_eq!(resolve("a/b/c", &table), None);
    }

    #[test]
    fn test_no_root_entry_misses() {
        let table: MappingTable = [("Projects".to_string(), FolderIconMapping::new("folder"))]
            .into_iter()
            .collect();
        assert_eq!(resolve("Other/Projects", &table), None);
        assert_eq!(resolve("", &table), None);
    }

    #[test]
    fn test_stray_slashes_are_normalized() {
        let table = scenario_table();
        assert_eq!(resolve("/Projects//Active/", &table).unwrap().icon, "star");
        assert_eq!(resolve("Projects/", &table).unwrap().icon, "folder");
        assert_eq!(resolve("//", &table).unwrap().icon, "file");
    }

    #[test]
    fn test_segment_boundaries_respected() {
        let table = scenario_table();
        // "ProjectsX" is not below "Projects"
        assert_eq!(resolve("ProjectsX/Active", &table).unwrap().icon, "file");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = scenario_table();
        let first = resolve("Projects/Active/Deep/Deeper", &table).cloned();
        let second = resolve("Projects/Active/Deep/Deeper", &table).cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolver_for_file() {
        let table = scenario_table();
        let resolver = FolderIconResolver::new(&table);
        assert_eq!(resolver.resolve_for_file("Projects/Active/Plan.md").unwrap().icon, "star");
        assert_eq!(resolver.resolve_for_file("Inbox.md").unwrap().icon, "file");
        assert_eq!(resolver.resolve("Projects/Other").unwrap().icon, "folder");
    }
}
