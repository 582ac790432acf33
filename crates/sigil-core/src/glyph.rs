use crate::error::CatalogError;
use crate::vfs::FileSystem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Vector outline of a named icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphShape {
    /// SVG markup
    pub svg: String,
}

/// Source of icon glyphs, looked up by the icon id stored in settings
pub trait GlyphCatalog: Send + Sync {
    fn lookup(&self, name: &str) -> Option<GlyphShape>;
}

/// Catalog keyed by PascalCase names, the way icon packs export them
/// ("FolderOpen"). Lookups accept kebab, snake or spaced ids ("folder-open").
#[derive(Debug, Clone, Default)]
pub struct NamedGlyphCatalog {
    glyphs: HashMap<String, GlyphShape>,
}

impl NamedGlyphCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `{ "PascalName": "<svg ...>" }`
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let glyphs: HashMap<String, GlyphShape> = serde_json::from_str(content)?;
        Ok(Self { glyphs })
    }

    pub fn load(path: &Path, fs: &dyn FileSystem) -> Result<Self, CatalogError> {
        let content = fs.read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, name: impl Into<String>, svg: impl Into<String>) {
        self.glyphs.insert(name.into(), GlyphShape { svg: svg.into() });
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphCatalog for NamedGlyphCatalog {
    fn lookup(&self, name: &str) -> Option<GlyphShape> {
        self.glyphs
            .get(&pascal_case(name))
            .or_else(|| self.glyphs.get(name))
            .cloned()
    }
}

/// Convert an icon id to PascalCase.
///
/// # Examples
///
/// ```
/// use sigil_core::glyph::pascal_case;
///
/// assert_eq!(pascal_case("folder-open"), "FolderOpen");
/// assert_eq!(pascal_case("arrow_up_right"), "ArrowUpRight");
/// assert_eq!(pascal_case("FolderOpen"), "FolderOpen");
/// assert_eq!(pascal_case("book open 2"), "BookOpen2");
/// ```
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
