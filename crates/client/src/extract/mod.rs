//! Lyric text extraction from song page markup.
//!
//! The official API never returns lyric text, so it is scraped from the public
//! song page.
//!
//! ### Algorithm
//! - Parse the page into a markup tree.
//! - Locate the element with `id="lyrics-root"`. A match prunes its own branch
//!   but the walk keeps going, so with duplicate containers the last one in
//!   document order wins (see [`LocateStrategy`]).
//! - Detach a leading child whose attribute values mention `LyricsHeader` and
//!   a trailing child whose attribute values mention `Footer`.
//! - Emit every text node of the container followed by a newline.
//! - Trim, then drop a trailing `Embed` left by the page's embed widget.

pub mod walk;

use ego_tree::NodeId;
use scraper::{Html, Node};

use crate::genius::GeniusError;
pub use walk::{Visit, walk};

/// Value of the `id` attribute marking the lyric container.
pub const LYRICS_ROOT_ID: &str = "lyrics-root";

const HEADER_MARKER: &str = "LyricsHeader";
const FOOTER_MARKER: &str = "Footer";
const EMBED_SUFFIX: &str = "Embed";

/// Which container wins when a page carries more than one `lyrics-root`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocateStrategy {
    /// Keep walking after a match; the last container in document order wins.
    #[default]
    LastMatch,
    /// Stop at the first container in document order.
    FirstMatch,
}

/// Extracts clean lyric text from a song page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LyricsExtractor {
    strategy: LocateStrategy,
}

impl LyricsExtractor {
    /// Create an extractor with the default last-match-wins strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with an explicit locate strategy.
    pub fn with_strategy(strategy: LocateStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> LocateStrategy {
        self.strategy
    }

    /// Extract lyric text from raw page bytes.
    ///
    /// # Errors
    ///
    /// - [`GeniusError::Parse`] if the bytes are not valid UTF-8
    /// - [`GeniusError::ContainerNotFound`] if no lyric container exists
    pub fn extract(&self, html: &[u8]) -> Result<String, GeniusError> {
        let source = std::str::from_utf8(html).map_err(|e| GeniusError::Parse(format!("page is not UTF-8: {e}")))?;
        let mut document = Html::parse_document(source);

        let container = locate_container(&document, self.strategy).ok_or(GeniusError::ContainerNotFound)?;
        strip_boilerplate(&mut document, container);

        let text = linearize(&document, container);
        Ok(finish(&text).to_string())
    }
}

/// Extract lyric text using the default extractor.
pub fn extract_lyrics(html: &[u8]) -> Result<String, GeniusError> {
    LyricsExtractor::new().extract(html)
}

fn locate_container(document: &Html, strategy: LocateStrategy) -> Option<NodeId> {
    let mut located = None;

    walk(document.tree.root(), |node| {
        if let Node::Element(el) = node.value()
            && el.attr("id") == Some(LYRICS_ROOT_ID)
        {
            located = Some(node.id());
            return match strategy {
                LocateStrategy::LastMatch => Visit::Prune,
                LocateStrategy::FirstMatch => Visit::Stop,
            };
        }
        Visit::Descend
    });

    located
}

fn has_attr_value_containing(node: &Node, needle: &str) -> bool {
    match node {
        Node::Element(el) => el.attrs().any(|(_, value)| value.contains(needle)),
        _ => false,
    }
}

/// Detach the header and footer children of the located container.
fn strip_boilerplate(document: &mut Html, container: NodeId) {
    let header = document
        .tree
        .get(container)
        .and_then(|node| node.first_child())
        .filter(|child| has_attr_value_containing(child.value(), HEADER_MARKER))
        .map(|child| child.id());
    if let Some(id) = header
        && let Some(mut child) = document.tree.get_mut(id)
    {
        child.detach();
    }

    let footer = document
        .tree
        .get(container)
        .and_then(|node| node.last_child())
        .filter(|child| has_attr_value_containing(child.value(), FOOTER_MARKER))
        .map(|child| child.id());
    if let Some(id) = footer
        && let Some(mut child) = document.tree.get_mut(id)
    {
        child.detach();
    }
}

fn linearize(document: &Html, container: NodeId) -> String {
    let mut text = String::new();

    if let Some(root) = document.tree.get(container) {
        walk(root, |node| {
            if let Node::Text(t) = node.value() {
                text.push_str(t);
                text.push('\n');
            }
            Visit::Descend
        });
    }

    text
}

fn finish(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_suffix(EMBED_SUFFIX) {
        Some(stripped) => {
            tracing::debug!("Embed found at end of lyrics");
            stripped
        }
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Vec<u8> {
        format!("<!DOCTYPE html><html><head><title>Song</title></head><body>{body}</body></html>").into_bytes()
    }

    #[test]
    fn test_extract_single_container() {
        let html = page(r#"<nav>Menu</nav><div id="lyrics-root"><p>First line<br>Second line</p><p>Third</p></div>"#);
        let lyrics = extract_lyrics(&html).unwrap();
        assert_eq!(lyrics, "First line\nSecond line\nThird");
    }

    #[test]
    fn test_extract_strips_header_and_footer() {
        let html = page(concat!(
            r#"<div id="lyrics-root">"#,
            r#"<div class="LyricsHeader__Container-sc-1">Song Lyrics</div>"#,
            r#"<div data-lyrics-container="true">Hello<br>World</div>"#,
            r#"<div class="LyricsFooter__Container-sc-2">Share</div>"#,
            "</div>"
        ));
        let lyrics = extract_lyrics(&html).unwrap();
        assert_eq!(lyrics, "Hello\nWorld");
    }

    #[test]
    fn test_extract_markers_match_any_attribute() {
        let html = page(concat!(
            r#"<div id="lyrics-root">"#,
            r#"<span data-role="x-LyricsHeader-y">Header</span>"#,
            r#"<p>Body</p>"#,
            r#"<span aria-label="PageFooter">Footer text</span>"#,
            "</div>"
        ));
        assert_eq!(extract_lyrics(&html).unwrap(), "Body");
    }

    #[test]
    fn test_extract_keeps_unmarked_edges() {
        let html = page(r#"<div id="lyrics-root"><div class="Intro">Intro</div><p>Body</p><div class="Outro">Outro</div></div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "Intro\nBody\nOutro");
    }

    #[test]
    fn test_extract_text_edges_are_not_stripped() {
        let html = page(r#"<div id="lyrics-root">LyricsHeader<p>Body</p>Footer</div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "LyricsHeader\nBody\nFooter");
    }

    #[test]
    fn test_extract_last_match_wins() {
        let html = page(concat!(
            r#"<section><div id="lyrics-root"><p>Old lyrics</p></div></section>"#,
            r#"<section><div id="lyrics-root"><p>New lyrics</p></div></section>"#
        ));
        assert_eq!(extract_lyrics(&html).unwrap(), "New lyrics");
    }

    #[test]
    fn test_extract_first_match_strategy() {
        let html = page(concat!(
            r#"<div id="lyrics-root"><p>Old lyrics</p></div>"#,
            r#"<div id="lyrics-root"><p>New lyrics</p></div>"#
        ));
        let extractor = LyricsExtractor::with_strategy(LocateStrategy::FirstMatch);
        assert_eq!(extractor.strategy(), LocateStrategy::FirstMatch);
        assert_eq!(extractor.extract(&html).unwrap(), "Old lyrics");
    }

    #[test]
    fn test_extract_nested_match_is_pruned() {
        let html = page(r#"<div id="lyrics-root"><p>Outer</p><div id="lyrics-root"><p>Inner</p></div></div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "Outer\nInner");
    }

    #[test]
    fn test_extract_missing_container() {
        let html = page("<div id=\"not-lyrics\"><p>Nothing here</p></div>");
        let result = extract_lyrics(&html);
        assert!(matches!(result, Err(GeniusError::ContainerNotFound)));
    }

    #[test]
    fn test_extract_empty_document() {
        assert!(matches!(extract_lyrics(b""), Err(GeniusError::ContainerNotFound)));
    }

    #[test]
    fn test_extract_invalid_utf8() {
        let result = extract_lyrics(&[0x3c, 0x70, 0x3e, 0xff, 0xfe]);
        assert!(matches!(result, Err(GeniusError::Parse(_))));
    }

    #[test]
    fn test_extract_strips_embed_suffix() {
        let html = page(r#"<div id="lyrics-root"><p>Last line</p><div>12Embed</div></div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "Last line\n12");
    }

    #[test]
    fn test_extract_keeps_embedded_word() {
        let html = page(r#"<div id="lyrics-root"><p>Deeply Embedded</p></div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "Deeply Embedded");
    }

    #[test]
    fn test_extract_skips_comments() {
        let html = page(r#"<div id="lyrics-root"><!-- ad slot --><p>Verse</p></div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "Verse");
    }

    #[test]
    fn test_extract_preserves_inner_text_verbatim() {
        let html = page(r#"<div id="lyrics-root"><p>  Hey,   you!  </p><p>[Chorus]</p></div>"#);
        assert_eq!(extract_lyrics(&html).unwrap(), "Hey,   you!  \n[Chorus]");
    }

    #[test]
    fn test_finish_only_strips_once() {
        assert_eq!(finish("  lyricsEmbedEmbed \n"), "lyricsEmbed");
        assert_eq!(finish("Embedded"), "Embedded");
    }
}
