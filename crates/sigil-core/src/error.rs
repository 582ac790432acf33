use std::io;
use thiserror::Error;

/// Errors from loading, saving or editing icon settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Settings I/O error: {0}")]
    Io(#[from] io::Error),

    /// Icon identifiers must be non-blank
    #[error("Icon for folder {0:?} is empty")]
    EmptyIcon(String),

    /// No mapping is configured at or below the folder
    #[error("No icon configured for folder {0:?}")]
    UnknownFolder(String),

    /// A rename would overwrite an existing mapping
    #[error("Folder {0:?} already has an icon configured")]
    FolderConflict(String),

    #[error("The root folder cannot be renamed")]
    RootRename,
}

/// Errors from loading a glyph catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Glyph catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glyph catalog I/O error: {0}")]
    Io(#[from] io::Error),
}
