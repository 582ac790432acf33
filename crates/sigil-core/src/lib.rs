//! Sigil Core Library
//!
//! Folder-based link icons: the mapping table, longest-prefix folder
//! resolution, settings migration, link extraction and vault link resolution.
//! No editor or rendering dependencies.
//!

mod config;
pub mod decorate;
mod error;
pub mod glyph;
mod line_map;
pub mod model;
pub mod parser;
pub mod resolver;
mod table;
pub mod utils;
pub mod vault;
pub mod vfs;


pub use config::{IconSettings, LogLevel};
pub use decorate::{Decorator, LinkDecoration};
pub use error::{CatalogError, SettingsError};
pub use glyph::{GlyphCatalog, GlyphShape, NamedGlyphCatalog};
pub use model::{FolderIconMapping, LinkKind, LinkSite, Point, TextRange};
pub use parser::extract_links;
pub use resolver::{resolve, FolderIconResolver};
pub use table::{MappingTable, Migration};
pub use utils::{normalize_folder, parent_folder};
pub use vault::{LinkResolver, VaultIndex};
