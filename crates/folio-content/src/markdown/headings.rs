//! Heading interception during rendering.
//!
//! The renderer reports every block-level heading to a [`HeadingHook`] as it
//! streams Markdown events to HTML. The hook sees the heading level, its
//! rendered inline HTML, and its plain text, and may hand back extra
//! attributes (an `id`, classes) for the heading element. It cannot change
//! the heading's visible text.
//!
//! [`Outline`] is the hook used for page extraction: it takes the first
//! level-1 heading as the page title and turns every level-2 heading into a
//! table of contents entry with an anchor id.

use std::collections::VecDeque;

use folio_core::slugify;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Tag, TagEnd};

use crate::document::TocEntry;

/// A block-level heading as seen by a [`HeadingHook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Heading level (`H1` through `H6`).
    pub level: HeadingLevel,
    /// Inline content rendered to HTML.
    pub text: &'a str,
    /// Inline content as plain text, without markup or HTML escaping.
    pub plain: &'a str,
}

impl Heading<'_> {
    /// Heading level as a number from 1 to 6.
    pub fn depth(&self) -> u8 {
        self.level as u8
    }
}

/// Extra attributes a hook attaches to a heading element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingAttrs {
    /// Replaces the heading's `id` attribute.
    pub id: Option<String>,
    /// Appended to the heading's classes.
    pub classes: Vec<String>,
}

impl HeadingAttrs {
    /// Attributes carrying only an `id`.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            classes: Vec::new(),
        }
    }
}

/// Callback invoked once per heading, in document order.
///
/// Closures taking `&Heading<'_>` and returning `Option<HeadingAttrs>`
/// implement this trait.
pub trait HeadingHook {
    /// Observe a heading and optionally return attributes for its element.
    fn on_heading(&mut self, heading: &Heading<'_>) -> Option<HeadingAttrs>;
}

impl<F> HeadingHook for F
where
    F: FnMut(&Heading<'_>) -> Option<HeadingAttrs>,
{
    fn on_heading(&mut self, heading: &Heading<'_>) -> Option<HeadingAttrs> {
        self(heading)
    }
}

/// Title and table of contents collected from a document's headings.
///
/// Build one per document; it only ever accumulates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    title: Option<String>,
    toc: Vec<TocEntry>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline text of the first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Entries for level-2 headings, in document order.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// Split into title and table of contents.
    pub fn into_parts(self) -> (Option<String>, Vec<TocEntry>) {
        (self.title, self.toc)
    }
}

impl HeadingHook for Outline {
    fn on_heading(&mut self, heading: &Heading<'_>) -> Option<HeadingAttrs> {
        match heading.level {
            HeadingLevel::H1 => {
                if self.title.is_none() {
                    self.title = Some(heading.text.to_string());
                }
                None
            }
            HeadingLevel::H2 => {
                let id = slugify(heading.plain);
                if id.is_empty() {
                    log::debug!("Skipping empty level-2 heading in table of contents");
                    return None;
                }
                self.toc.push(TocEntry {
                    text: heading.text.to_string(),
                    id: id.clone(),
                });
                Some(HeadingAttrs::with_id(id))
            }
            _ => None,
        }
    }
}

/// Event adapter that reports headings to a hook and applies its attributes.
///
/// Buffers each heading's inline events until the heading closes, calls the
/// hook once, then replays the heading with the returned attributes. All
/// other events pass through untouched.
pub struct InterceptHeadings<'a, 'h, I> {
    inner: I,
    hook: &'h mut dyn HeadingHook,
    pending: VecDeque<Event<'a>>,
}

impl<'a, 'h, I> InterceptHeadings<'a, 'h, I>
where
    I: Iterator<Item = Event<'a>>,
{
    /// Wrap an event stream.
    pub fn new(inner: I, hook: &'h mut dyn HeadingHook) -> Self {
        Self {
            inner,
            hook,
            pending: VecDeque::new(),
        }
    }

    fn intercept(
        &mut self,
        level: HeadingLevel,
        mut id: Option<CowStr<'a>>,
        mut classes: Vec<CowStr<'a>>,
        attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    ) -> Event<'a> {
        let mut body = Vec::new();
        let mut end = None;
        for event in self.inner.by_ref() {
            if matches!(event, Event::End(TagEnd::Heading(_))) {
                end = Some(event);
                break;
            }
            body.push(event);
        }

        let text = inline_html(&body);
        let plain = plain_text(&body);
        let heading = Heading {
            level,
            text: &text,
            plain: &plain,
        };

        if let Some(extra) = self.hook.on_heading(&heading) {
            if let Some(new_id) = extra.id {
                id = Some(CowStr::from(new_id));
            }
            classes.extend(extra.classes.into_iter().map(CowStr::from));
        }

        self.pending.extend(body);
        self.pending
            .push_back(end.unwrap_or(Event::End(TagEnd::Heading(level))));

        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        })
    }
}

impl<'a, I> Iterator for InterceptHeadings<'a, '_, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => Some(self.intercept(level, id, classes, attrs)),
            event => Some(event),
        }
    }
}

/// Render a heading's inline events to HTML.
fn inline_html(events: &[Event<'_>]) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events.iter().cloned());
    out
}

/// Concatenate the text carried by a heading's inline events.
fn plain_text(events: &[Event<'_>]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            Event::Text(text) | Event::Code(text) | Event::InlineMath(text) => {
                out.push_str(text)
            }
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::Parser;

    fn render_with(markdown: &str, hook: &mut dyn HeadingHook) -> String {
        let mut out = String::new();
        html::push_html(&mut out, InterceptHeadings::new(Parser::new(markdown), hook));
        out
    }

    fn outline_of(markdown: &str) -> (Outline, String) {
        let mut outline = Outline::new();
        let html = render_with(markdown, &mut outline);
        (outline, html)
    }

    // ------------------------------------------------------------------------
    // Hook invocation tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_hook_sees_every_heading_in_order() {
        let mut seen = Vec::new();
        let mut hook = |h: &Heading<'_>| -> Option<HeadingAttrs> {
            seen.push((h.depth(), h.text.to_string()));
            None
        };
        render_with("# One\n## Two\n### Three\n#### Four\n##### Five\n###### Six\n", &mut hook);

        assert_eq!(
            seen,
            vec![
                (1, "One".to_string()),
                (2, "Two".to_string()),
                (3, "Three".to_string()),
                (4, "Four".to_string()),
                (5, "Five".to_string()),
                (6, "Six".to_string()),
            ]
        );
    }

    #[test]
    fn test_hook_gets_rendered_and_plain_text() {
        let mut captured = None;
        let mut hook = |h: &Heading<'_>| -> Option<HeadingAttrs> {
            captured = Some((h.text.to_string(), h.plain.to_string()));
            None
        };
        render_with("## Using `Result` & *friends*\n", &mut hook);

        let (text, plain) = captured.unwrap();
        assert_eq!(text, "Using <code>Result</code> &amp; <em>friends</em>");
        assert_eq!(plain, "Using Result & friends");
    }

    #[test]
    fn test_hook_attributes_are_applied() {
        let mut hook = |h: &Heading<'_>| -> Option<HeadingAttrs> {
            (h.level == HeadingLevel::H3).then(|| HeadingAttrs {
                id: Some("custom".to_string()),
                classes: vec!["anchor".to_string()],
            })
        };
        let html = render_with("### Deep\n\n## Shallow\n", &mut hook);

        assert!(html.contains(r#"<h3 id="custom" class="anchor">Deep</h3>"#));
        assert!(html.contains("<h2>Shallow</h2>"));
    }

    #[test]
    fn test_no_attributes_leaves_output_unchanged() {
        let markdown = "# Title\n\nSome *text*.\n\n## Part\n\n- a\n- b\n";
        let mut plain = String::new();
        html::push_html(&mut plain, Parser::new(markdown));

        let mut hook = |_: &Heading<'_>| -> Option<HeadingAttrs> { None };
        assert_eq!(render_with(markdown, &mut hook), plain);
    }

    #[test]
    fn test_setext_headings_are_intercepted() {
        let (outline, html) = outline_of("Title\n=====\n\nSection\n-------\n");
        assert_eq!(outline.title(), Some("Title"));
        assert_eq!(outline.toc()[0].id, "section");
        assert!(html.contains(r#"<h2 id="section">Section</h2>"#));
    }

    // ------------------------------------------------------------------------
    // Outline tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_outline_first_h1_is_title() {
        let (outline, html) = outline_of("# First\n\n# Second\n");
        assert_eq!(outline.title(), Some("First"));
        assert!(html.contains("<h1>Second</h1>"));
    }

    #[test]
    fn test_outline_no_h1_no_title() {
        let (outline, _) = outline_of("## Only sections\n\ntext\n");
        assert_eq!(outline.title(), None);
    }

    #[test]
    fn test_outline_h1_gets_no_id() {
        let (_, html) = outline_of("# Title\n");
        assert_eq!(html, "<h1>Title</h1>\n");
    }

    #[test]
    fn test_outline_collects_h2_in_order() {
        let (outline, html) = outline_of("## Alpha\n### Skip\n## Beta Two\n");
        let ids: Vec<&str> = outline.toc().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta-two"]);
        assert!(html.contains(r#"<h2 id="alpha">Alpha</h2>"#));
        assert!(html.contains("<h3>Skip</h3>"));
        assert!(html.contains(r#"<h2 id="beta-two">Beta Two</h2>"#));
    }

    #[test]
    fn test_outline_slug_uses_plain_text() {
        let (outline, html) = outline_of("## Tom & Jerry\n");
        let entry = &outline.toc()[0];
        assert_eq!(entry.id, "tom-jerry");
        assert_eq!(entry.text, "Tom &amp; Jerry");
        assert!(html.contains(r#"<h2 id="tom-jerry">Tom &amp; Jerry</h2>"#));
    }

    #[test]
    fn test_outline_duplicate_h2_share_id() {
        let (outline, _) = outline_of("## Examples\n\n## Examples\n");
        assert_eq!(outline.toc().len(), 2);
        assert_eq!(outline.toc()[0].id, outline.toc()[1].id);
    }

    #[test]
    fn test_outline_empty_h2_is_skipped() {
        let (outline, html) = outline_of("##\n\n## Real\n");
        assert_eq!(outline.toc().len(), 1);
        assert_eq!(outline.toc()[0].id, "real");
        assert!(html.contains("<h2></h2>"));
    }

    #[test]
    fn test_outline_image_only_h2_is_skipped() {
        let (outline, html) = outline_of("## ![](x.png)\n\n## Real\n");
        let ids: Vec<&str> = outline.toc().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["real"]);
        assert!(html.contains(r#"<h2><img src="x.png" alt="" /></h2>"#));
        assert_eq!(html.matches(" id=").count(), 1);
    }

    #[test]
    fn test_outline_nested_headings_count() {
        let (outline, _) = outline_of("> ## Quoted\n\n- ## Listed\n");
        let ids: Vec<&str> = outline.toc().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["quoted", "listed"]);
    }

    #[test]
    fn test_outline_into_parts() {
        let (outline, _) = outline_of("# T\n## S\n");
        let (title, toc) = outline.into_parts();
        assert_eq!(title.as_deref(), Some("T"));
        assert_eq!(
            toc,
            vec![TocEntry {
                text: "S".to_string(),
                id: "s".to_string(),
            }]
        );
    }
}
