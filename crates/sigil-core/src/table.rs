use crate::error::SettingsError;
use crate::model::FolderIconMapping;
use crate::utils::{is_descendant, normalize_folder, reparent_key};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Folder path -> icon mapping, as authored by the user.
///
/// Keys are canonical folder paths: no leading or trailing `/`, and the
/// empty string for the vault root. Every write normalizes its key first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: BTreeMap<String, FolderIconMapping>,
}

/// Persisted value shapes accepted when loading a table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredMapping {
    /// Older settings stored the icon identifier alone
    Legacy(String),
    Current(FolderIconMapping),
}

/// What changed while upgrading a persisted table to the current shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    /// Keys whose value was a bare icon string
    pub upgraded: Vec<String>,
    /// (stored key, canonical key) pairs for keys that were not canonical
    pub normalized: Vec<(String, String)>,
    /// Keys dropped because their icon was blank
    pub dropped: Vec<String>,
}

impl Migration {
    pub fn is_empty(&self) -> bool {
        self.upgraded.is_empty() && self.normalized.is_empty() && self.dropped.is_empty()
    }
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_stored(stored: BTreeMap<String, StoredMapping>) -> (Self, Migration) {
        let mut entries = BTreeMap::new();
        let mut migration = Migration::default();

        for (key, value) in stored {
            let mapping = match value {
                StoredMapping::Legacy(icon) => {
                    migration.upgraded.push(key.clone());
                    FolderIconMapping::new(icon)
                }
                StoredMapping::Current(mapping) => mapping,
            };
            let icon = mapping.icon.trim();
            if icon.is_empty() {
                migration.dropped.push(key);
                continue;
            }
            let mapping = FolderIconMapping {
                icon: icon.to_string(),
                color: mapping.color,
            };

            let canonical = normalize_folder(&key);
            if canonical == key {
                // Canonical keys win over any alias normalized onto them
                entries.insert(key, mapping);
            } else {
                entries.entry(canonical.clone()).or_insert(mapping);
                migration.normalized.push((key, canonical));
            }
        }

        (Self { entries }, migration)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup of an already canonical key
    pub fn get(&self, folder: &str) -> Option<&FolderIconMapping> {
        self.entries.get(folder)
    }

    pub fn contains(&self, folder: &str) -> bool {
        self.entries.contains_key(&normalize_folder(folder))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FolderIconMapping)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert or replace the mapping for `folder`, returning the previous one
    pub fn set(
        &mut self,
        folder: &str,
        mapping: FolderIconMapping,
    ) -> Result<Option<FolderIconMapping>, SettingsError> {
        let key = normalize_folder(folder);
        if mapping.icon.trim().is_empty() {
            return Err(SettingsError::EmptyIcon(key));
        }
        let mapping = FolderIconMapping {
            icon: mapping.icon.trim().to_string(),
            color: clean_color(mapping.color),
        };
        Ok(self.entries.insert(key, mapping))
    }

    /// Change the icon of `folder`, keeping its color
    pub fn set_icon(&mut self, folder: &str, icon: &str) -> Result<(), SettingsError> {
        let color = self
            .entries
            .get(&normalize_folder(folder))
            .and_then(|m| m.color.clone());
        self.set(
            folder,
            FolderIconMapping {
                icon: icon.to_string(),
                color,
            },
        )?;
        Ok(())
    }

    /// Change or clear the color of an existing mapping
    pub fn set_color(&mut self, folder: &str, color: Option<&str>) -> Result<(), SettingsError> {
        let key = normalize_folder(folder);
        let mapping = self
            .entries
            .get_mut(&key)
            .ok_or(SettingsError::UnknownFolder(key))?;
        mapping.color = clean_color(color.map(str::to_string));
        Ok(())
    }

    pub fn remove(&mut self, folder: &str) -> Option<FolderIconMapping> {
        self.entries.remove(&normalize_folder(folder))
    }

    /// Move the mapping for `from` and all mappings below it under `to`.
    ///
    /// Either every key moves or none does. Returns the number of keys moved.
    pub fn rename_folder(&mut self, from: &str, to: &str) -> Result<usize, SettingsError> {
        let from = normalize_folder(from);
        let to = normalize_folder(to);
        if from.is_empty() {
            return Err(SettingsError::RootRename);
        }

        let moving: Vec<String> = self
            .entries
            .keys()
            .filter(|k| **k == from || is_descendant(k, &from))
            .cloned()
            .collect();
        if moving.is_empty() {
            return Err(SettingsError::UnknownFolder(from));
        }
        if from == to {
            return Ok(0);
        }

        for key in &moving {
            let dest = reparent_key(key, &from, &to);
            if self.entries.contains_key(&dest) && !moving.contains(&dest) {
                return Err(SettingsError::FolderConflict(dest));
            }
        }

        let moved: Vec<(String, FolderIconMapping)> = moving
            .iter()
            .filter_map(|key| {
                let mapping = self.entries.remove(key)?;
                Some((reparent_key(key, &from, &to), mapping))
            })
            .collect();
        let count = moved.len();
        self.entries.extend(moved);
        Ok(count)
    }
}

fn clean_color(color: Option<String>) -> Option<String> {
    color
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

impl<'de> Deserialize<'de> for MappingTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = BTreeMap::<String, StoredMapping>::deserialize(deserializer)?;
        Ok(Self::from_stored(stored).0)
    }
}

impl FromIterator<(String, FolderIconMapping)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (String, FolderIconMapping)>>(iter: I) -> Self {
        let mut table = MappingTable::new();
        for (folder, mapping) in iter {
            let key = normalize_folder(&folder);
            table.entries.insert(key, mapping);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MappingTable {
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
    fn test_deserialize_upgrades_legacy_values() {
        let json = r##"{
            "Notes": "pencil",
            "Projects": { "icon": "folder", "color": "#00ff00" }
        }"##;
        let table: MappingTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.get("Notes"), Some(&FolderIconMapping::new("pencil")));
        assert_eq!(
            table.get("Projects"),
            Some(&FolderIconMapping::new("folder").with_color("#00ff00"))
        );
    }

    #[test]
    fn test_from_stored_reports_migration() {
        let stored: BTreeMap<String, StoredMapping> =
            serde_json::from_str(r#"{"Notes": "pencil", "/Inbox/": {"icon": "inbox"}, "Done": {"icon": "check"}}"#)
                .unwrap();
        let (table, migration) = MappingTable::from_stored(stored);

        assert_eq!(migration.upgraded, vec!["Notes".to_string()]);
        assert_eq!(
            migration.normalized,
            vec![("/Inbox/".to_string(), "Inbox".to_string())]
        );
        assert_eq!(table.get("Inbox"), Some(&FolderIconMapping::new("inbox")));
        assert_eq!(table.get("Done"), Some(&FolderIconMapping::new("check")));
        assert!(!migration.is_empty());
    }

    #[test]
    fn test_blank_icons_are_dropped_on_load() {
        let stored: BTreeMap<String, StoredMapping> = serde_json::from_str(
            r##"{"Notes": "", "Inbox": {"icon": "  ", "color": "#ff0000"}, "Done": " check "}"##,
        )
        .unwrap();
        let (table, migration) = MappingTable::from_stored(stored);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Notes"), None);
        assert_eq!(table.get("Inbox"), None);
        assert_eq!(table.get("Done"), Some(&FolderIconMapping::new("check")));
        assert_eq!(
            migration.dropped,
            vec!["Inbox".to_string(), "Notes".to_string()]
        );
        assert!(!migration.is_empty());

        let table: MappingTable = serde_json::from_str(r#"{"Notes": ""}"#).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let stored: BTreeMap<String, StoredMapping> =
            serde_json::from_str(r#"{"/a": {"icon": "alias"}, "a": {"icon": "canonical"}, "a/": {"icon": "other"}}"#)
                .unwrap();
        let (table, _) = MappingTable::from_stored(stored);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().icon, "canonical");
    }

    #[test]
    fn test_serialize_writes_current_shape() {
        let json = serde_json::to_value(table()).unwrap();
        assert_eq!(json["Projects"]["icon"], "folder");
        assert!(json["Projects"].get("color").is_none());
        assert_eq!(json["Projects/Active"]["color"], "#ff0000");
        assert_eq!(json[""]["icon"], "file");
    }

    #[test]
    fn test_set_normalizes_key_and_rejects_empty_icon() {
        let mut table = MappingTable::new();
        table
            .set("/Areas/Health/", FolderIconMapping::new(" heart "))
            .unwrap();
        assert_eq!(table.get("Areas/Health").unwrap().icon, "heart");
        assert!(table.contains("Areas//Health"));

        let err = table.set("Areas", FolderIconMapping::new("  ")).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyIcon(ref k) if k == "Areas"));
    }

    #[test]
    fn test_set_icon_keeps_color() {
        let mut table = table();
        table.set_icon("Projects/Active", "rocket").unwrap();
        assert_eq!(
            table.get("Projects/Active"),
            Some(&FolderIconMapping::new("rocket").with_color("#ff0000"))
        );

        table.set_icon("New", "sparkles").unwrap();
        assert_eq!(table.get("New"), Some(&FolderIconMapping::new("sparkles")));
    }

    #[test]
    fn test_set_color() {
        let mut table = table();
        table.set_color("Projects", Some("var(--color-red)")).unwrap();
        assert_eq!(
            table.get("Projects").unwrap().color.as_deref(),
            Some("var(--color-red)")
        );

        table.set_color("Projects", Some("   ")).unwrap();
        assert_eq!(table.get("Projects").unwrap().color, None);

        let err = table.set_color("Missing", Some("red")).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownFolder(_)));
    }

    #[test]
    fn test_remove() {
        let mut table = table();
        assert_eq!(table.remove("/Projects/"), Some(FolderIconMapping::new("folder")));
        assert_eq!(table.remove("Projects"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rename_folder_moves_subtree() {
        let mut table = table();
        let moved = table.rename_folder("Projects", "Work/Projects").unwrap();

        assert_eq!(moved, 2);
        assert!(table.get("Projects").is_none());
        assert_eq!(table.get("Work/Projects").unwrap().icon, "folder");
        assert_eq!(table.get("Work/Projects/Active").unwrap().icon, "star");
        assert_eq!(table.get("").unwrap().icon, "file");
    }

    #[test]
    fn test_rename_folder_into_own_subtree() {
        let mut table = table();
        let moved = table.rename_folder("Projects", "Projects/Active").unwrap();

        assert_eq!(moved, 2);
        assert_eq!(table.get("Projects/Active").unwrap().icon, "folder");
        assert_eq!(table.get("Projects/Active/Active").unwrap().icon, "star");
    }

    #[test]
    fn test_rename_folder_conflict_leaves_table_untouched() {
        let mut table = table();
        table.set("Archive/Active", FolderIconMapping::new("box")).unwrap();
        let before = table.clone();

        let err = table.rename_folder("Projects", "Archive").unwrap_err();
        assert!(matches!(err, SettingsError::FolderConflict(ref k) if k == "Archive/Active"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_rename_folder_errors() {
        let mut table = table();
        assert!(matches!(
            table.rename_folder("", "x"),
            Err(SettingsError::RootRename)
        ));
        assert!(matches!(
            table.rename_folder("Nope", "x"),
            Err(SettingsError::UnknownFolder(_))
        ));
        assert_eq!(table.rename_folder("Projects", "/Projects/").unwrap(), 0);
    }
}
