use crate::config::IconSettings;
use crate::glyph::{GlyphCatalog, GlyphShape};
use crate::model::{LinkKind, Point, TextRange};
use crate::parser::extract_links;
use crate::resolver::FolderIconResolver;
use crate::utils::parent_folder;
use crate::vault::LinkResolver;
use serde::{Deserialize, Serialize};

/// Icon to draw next to one link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDecoration {
    pub range: TextRange,
    pub insert_at: Point,
    /// Vault-relative path of the linked document
    pub target: String,
    /// Folder whose mapping applied
    pub folder: String,
    pub icon: String,
    pub color: String,
    /// Present only when a glyph catalog was supplied
    pub glyph: Option<GlyphShape>,
}

/// Decides which links in a document get an icon
pub struct Decorator<'a> {
    settings: &'a IconSettings,
    links: &'a dyn LinkResolver,
    glyphs: Option<&'a dyn GlyphCatalog>,
}

impl<'a> Decorator<'a> {
    pub fn new(settings: &'a IconSettings, links: &'a dyn LinkResolver) -> Self {
        Self {
            settings,
            links,
            glyphs: None,
        }
    }

    pub fn with_glyphs(mut self, glyphs: &'a dyn GlyphCatalog) -> Self {
        self.glyphs = Some(glyphs);
        self
    }

    /// Decorations for every resolvable, mapped link in `text`.
    ///
    /// Links that do not resolve, folders without a mapping and icons missing
    /// from the glyph catalog produce no decoration.
    pub fn decorate(&self, source_path: &str, text: &str) -> Vec<LinkDecoration> {
        if !self.settings.enabled {
            return Vec::new();
        }
        let resolver = FolderIconResolver::new(&self.settings.folder_icons);

        extract_links(text)
            .into_iter()
            .filter(|site| match site.kind {
                LinkKind::WikiLink => true,
                LinkKind::EmbeddedWikiLink => self.settings.decorate_embeds,
                LinkKind::MarkdownLink => self.settings.decorate_markdown_links,
            })
            .filter_map(|site| {
                let target = self.links.resolve_link(&site.target, source_path)?;
                let folder = parent_folder(&target).to_string();
                let mapping = resolver.resolve(&folder)?;

                let glyph = match self.glyphs {
                    Some(catalog) => Some(catalog.lookup(&mapping.icon)?),
                    None => None,
                };

                Some(LinkDecoration {
                    range: site.range,
                    insert_at: site.insert_at,
                    icon: mapping.icon.clone(),
                    color: mapping.color_or(&self.settings.default_color).to_string(),
                    target,
                    folder,
                    glyph,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::NamedGlyphCatalog;
    use crate::model::FolderIconMapping;
    use crate::vault::VaultIndex;

    fn vault() -> VaultIndex {
        let mut index = VaultIndex::new();
        for path in [
            "Inbox.md",
            "Projects/Plan.md",
            "Projects/Active/Launch.md",
            "Assets/diagram.png",
        ] {
            index.insert(path);
        }
        index
    }

    fn settings() -> IconSettings {
        let mut settings = IconSettings::default();
        settings
            .folder_icons
            .set("Projects", FolderIconMapping::new("folder"))
            .unwrap();
        settings
            .folder_icons
            .set(
                "Projects/Active",
                FolderIconMapping::new("star").with_color("#ff0000"),
            )
            .unwrap();
        settings
            .folder_icons
            .set("Assets", FolderIconMapping::new("image"))
            .unwrap();
        settings
    }

    #[test]
    fn test_decorates_mapped_links() {
        let settings = settings();
        let vault = vault();
        let text = "[[Plan]] then [[Launch|go]] and [[Inbox]] and [[Missing]]";

        let decorations = Decorator::new(&settings, &vault).decorate("Inbox.md", text);

        assert_eq!(decorations.len(), 2);
        assert_eq!(decorations[0].target, "Projects/Plan.md");
        assert_eq!(decorations[0].folder, "Projects");
        assert_eq!(decorations[0].icon, "folder");
        assert_eq!(decorations[0].color, "currentColor");
        assert_eq!(decorations[0].glyph, None);

        assert_eq!(decorations[1].target, "Projects/Active/Launch.md");
        assert_eq!(decorations[1].icon, "star");
        assert_eq!(decorations[1].color, "#ff0000");
        assert_eq!(decorations[1].insert_at, Point { line: 0, col: 14 });
    }

    #[test]
    fn test_root_mapping_covers_top_level_notes() {
        let mut settings = settings();
        settings
            .folder_icons
            .set("", FolderIconMapping::new("file"))
            .unwrap();
        let vault = vault();

        let decorations =
            Decorator::new(&settings, &vault).decorate("Projects/Plan.md", "[[Inbox]]");
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations[0].folder, "");
        assert_eq!(decorations[0].icon, "file");
    }

    #[test]
    fn test_disabled_settings_produce_nothing() {
        let mut settings = settings();
        settings.enabled = false;
        let vault = vault();

        assert!(Decorator::new(&settings, &vault)
            .decorate("Inbox.md", "[[Plan]]")
            .is_empty());
    }

    #[test]
    fn test_embed_and_markdown_link_switches() {
        let mut settings = settings();
        let vault = vault();
        let text = "![[diagram.png]] [plan](Projects/Plan.md)";

        let decorations = Decorator::new(&settings, &vault).decorate("Inbox.md", text);
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations[0].target, "Projects/Plan.md");

        settings.decorate_embeds = true;
        settings.decorate_markdown_links = false;
        let decorations = Decorator::new(&settings, &vault).decorate("Inbox.md", text);
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations[0].icon, "image");
    }

    #[test]
    fn test_missing_glyph_skips_decoration() {
        let settings = settings();
        let vault = vault();
        let mut catalog = NamedGlyphCatalog::new();
        catalog.insert("Folder", "<svg>folder</svg>");

        let decorations = Decorator::new(&settings, &vault)
            .with_glyphs(&catalog)
            .decorate("Inbox.md", "[[Plan]] [[Launch]]");

        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations[0].icon, "folder");
        assert_eq!(
            decorations[0].glyph.as_ref().map(|g| g.svg.as_str()),
            Some("<svg>folder</svg>")
        );
    }
}
