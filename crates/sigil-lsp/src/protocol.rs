use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Position, Range, Url};

pub const CMD_LINK_DECORATIONS: &str = "sigil/linkDecorations";
pub const CMD_RESOLVE_FOLDER_ICON: &str = "sigil/resolveFolderIcon";
pub const CMD_LIST_FOLDER_ICONS: &str = "sigil/listFolderIcons";
pub const CMD_SET_FOLDER_ICON: &str = "sigil/setFolderIcon";
pub const CMD_REMOVE_FOLDER_ICON: &str = "sigil/removeFolderIcon";
pub const CMD_RENAME_FOLDER_ICON: &str = "sigil/renameFolderIcon";

pub fn all_commands() -> Vec<String> {
    [
        CMD_LINK_DECORATIONS,
        CMD_RESOLVE_FOLDER_ICON,
        CMD_LIST_FOLDER_ICONS,
        CMD_SET_FOLDER_ICON,
        CMD_REMOVE_FOLDER_ICON,
        CMD_RENAME_FOLDER_ICON,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkDecorationsParams {
    pub uri: Url,
}

/// One icon for the client to draw
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationItem {
    /// Source range of the link
    pub range: Range,
    /// Where the icon goes
    pub position: Position,
    /// Vault-relative path of the linked document
    pub target: String,
    pub folder: String,
    pub icon: String,
    pub color: String,
    /// SVG markup, when the server has a glyph catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkDecorationsResult {
    pub decorations: Vec<DecorationItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FolderParams {
    pub folder: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetFolderIconParams {
    pub folder: String,
    pub icon: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenameFolderIconParams {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FolderIconEntry {
    pub folder: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListFolderIconsResult {
    pub entries: Vec<FolderIconEntry>,
}

/// Outcome of a configuration edit
#[derive(Debug, Serialize, Deserialize)]
pub struct EditResult {
    /// Number of table entries the edit touched
    pub changed: usize,
    /// Whether the settings file was written
    pub persisted: bool,
}
