use crate::error::SettingsError;
use crate::table::{MappingTable, Migration, StoredMapping};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level settings for folder icons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconSettings {
    /// Folder path -> icon mapping
    pub folder_icons: MappingTable,
    /// Color used when a mapping has none
    pub default_color: String,
    /// Master switch for link decoration
    pub enabled: bool,
    /// Whether embeds (`![[...]]`) get icons
    pub decorate_embeds: bool,
    /// Whether `[label](path)` links get icons
    pub decorate_markdown_links: bool,
    /// Glyph catalog JSON file, relative to the vault root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_catalog: Option<PathBuf>,
    /// Logging level for the server
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            folder_icons: MappingTable::new(),
            default_color: "currentColor".to_string(),
            enabled: true,
            decorate_embeds: false,
            decorate_markdown_links: true,
            glyph_catalog: None,
            log_level: LogLevel::Info,
        }
    }
}

impl IconSettings {
    /// Parse settings from JSON, upgrading older table shapes
    pub fn load_json(content: &str) -> Result<(Self, Migration), SettingsError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::load_value(value)
    }

    /// Parse settings from YAML, upgrading older table shapes
    pub fn load_yaml(content: &str) -> Result<(Self, Migration), SettingsError> {
        let value: serde_json::Value = serde_yaml::from_str(content)?;
        Self::load_value(value)
    }

    /// Build settings from an already parsed value.
    /// `null` (an empty document) yields the defaults.
    pub fn load_value(value: serde_json::Value) -> Result<(Self, Migration), SettingsError> {
        let mut value = match value {
            serde_json::Value::Null => return Ok((Self::default(), Migration::default())),
            v => v,
        };

        let stored_table = value
            .as_object_mut()
            .and_then(|map| map.remove("folderIcons"));

        let mut settings: IconSettings = serde_json::from_value(value)?;
        let migration = match stored_table {
            Some(serde_json::Value::Null) | None => Migration::default(),
            Some(table) => {
                let stored: BTreeMap<String, StoredMapping> = serde_json::from_value(table)?;
                let (table, migration) = MappingTable::from_stored(stored);
                settings.folder_icons = table;
                migration
            }
        };

        Ok((settings, migration))
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
