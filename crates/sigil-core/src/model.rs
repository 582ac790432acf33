use serde::{Deserialize, Serialize};

/// Icon decoration configured for a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderIconMapping {
    /// Glyph identifier in an external icon catalog (e.g. "folder-open")
    pub icon: String,
    /// Display color token (hex, named or theme variable); None uses the caller's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl FolderIconMapping {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The configured color, or `default` when none is set
    pub fn color_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(default)
    }
}

/// Core internal coordinate system (0-based)
/// Columns are UTF-16 code units, matching LSP positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    WikiLink,         // [[target]]
    EmbeddedWikiLink, // ![[target]]
    MarkdownLink,     // [label](target)
}

/// A cross-reference found in a document, normalized across link syntaxes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSite {
    /// Textual reference with alias and anchor removed
    pub target: String,
    pub kind: LinkKind,
    /// Full source range of the link
    pub range: TextRange,
    /// Where a decoration for this link belongs
    pub insert_at: Point,
}
