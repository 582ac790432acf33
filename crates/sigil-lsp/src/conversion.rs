//! Conversion utilities between Core types and LSP types

use sigil_core::model::{Point, TextRange};
use sigil_core::utils::vault_relative_path;
use sigil_core::LinkDecoration;
use std::path::Path;
use tower_lsp::lsp_types::{Position, Range, Url};

use crate::protocol::DecorationItem;

/// Convert Core Point to LSP Position
/// Both use 0-based lines and UTF-16 columns
pub fn point_to_lsp_position(point: Point) -> Position {
    Position {
        line: point.line,
        character: point.col,
    }
}

/// Convert Core TextRange to LSP Range
pub fn text_range_to_lsp_range(range: TextRange) -> Range {
    Range {
        start: point_to_lsp_position(range.start),
        end: point_to_lsp_position(range.end),
    }
}

/// Vault-relative path of a document URI, None when outside the vault
pub fn uri_to_vault_path(root: &Path, uri: &Url) -> Option<String> {
    let path = uri.to_file_path().ok()?;
    vault_relative_path(root, &path)
}

pub fn decoration_to_item(decoration: LinkDecoration) -> DecorationItem {
    DecorationItem {
        range: text_range_to_lsp_range(decoration.range),
        position: point_to_lsp_position(decoration.insert_at),
        target: decoration.target,
        folder: decoration.folder,
        icon: decoration.icon,
        color: decoration.color,
        svg: decoration.glyph.map(|g| g.svg),
    }
}
