use super::line_map::LineMap;
use crate::model::{LinkKind, LinkSite, TextRange};
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};

/// Extract internal links from a markdown document.
///
/// Wiki-links use the `[[target#anchor|alias]]` form. Markdown links with a
/// URI scheme (`https:`, `mailto:`) and in-page `#anchor` links are skipped.
pub fn extract_links(text: &str) -> Vec<LinkSite> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_WIKILINKS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let parser = Parser::new_ext(text, options);
    let line_map = LineMap::new(text);

    let mut links = Vec::new();
    // (target, kind, start offset)
    let mut pending: Option<(String, LinkKind, usize)> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            }) => match link_type {
                LinkType::WikiLink { .. } => {
                    pending = Some((strip_anchor(&dest_url), LinkKind::WikiLink, range.start));
                }
                LinkType::Inline | LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut => {
                    if let Some(target) = internal_markdown_target(&dest_url) {
                        pending = Some((target, LinkKind::MarkdownLink, range.start));
                    }
                }
                _ => {}
            },
            Event::Start(Tag::Image {
                link_type: LinkType::WikiLink { .. },
                dest_url,
                ..
            }) => {
                pending = Some((
                    strip_anchor(&dest_url),
                    LinkKind::EmbeddedWikiLink,
                    range.start,
                ));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                let closes_pending = match pending {
                    Some((_, LinkKind::EmbeddedWikiLink, _)) => end == TagEnd::Image,
                    Some(_) => end == TagEnd::Link,
                    None => false,
                };
                if !closes_pending {
                    continue;
                }
                if let Some((target, kind, start_offset)) = pending.take() {
                    // pulldown_cmark may report a wiki-link range ending before the closing ']'
                    let mut end_offset = range.end;
                    if kind != LinkKind::MarkdownLink {
                        while end_offset < text.len() && text.as_bytes()[end_offset] == b']' {
                            end_offset += 1;
                        }
                    }

                    let start = line_map.offset_to_point(text, start_offset);
                    let end = line_map.offset_to_point(text, end_offset);
                    links.push(LinkSite {
                        target,
                        kind,
                        range: TextRange { start, end },
                        insert_at: start,
                    });
                }
            }
            _ => {}
        }
    }

    links
}

fn strip_anchor(dest: &str) -> String {
    let dest = dest.trim();
    match dest.find('#') {
        Some(pos) => dest[..pos].trim_end().to_string(),
        None => dest.to_string(),
    }
}

/// Vault-internal target of a markdown link destination, if it is one
fn internal_markdown_target(dest: &str) -> Option<String> {
    let dest = dest.trim();
    if dest.is_empty() || dest.starts_with('#') || has_scheme(dest) {
        return None;
    }
    let target = strip_anchor(dest);
    let decoded = urlencoding::decode(&target)
        .map(|s| s.into_owned())
        .unwrap_or(target);
    Some(decoded)
}

fn has_scheme(dest: &str) -> bool {
    match dest.find(':') {
        Some(pos) => {
            let scheme = &dest[..pos];
            // Single letters are Windows drive letters, not schemes
            scheme.len() > 1
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
