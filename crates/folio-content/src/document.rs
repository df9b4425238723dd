//! Document extraction.
//!
//! [`DocumentExtractor`] turns the raw bytes of a Markdown page into a
//! [`Document`]: title, description, table of contents, and rendered HTML.
//!
//! The pipeline is: split front matter, decode its metadata, render the body
//! once with a fresh [`Outline`] hook collecting headings, then assemble.
//!
//! # Example
//!
//! ```rust
//! use folio_content::extract;
//!
//! let raw = b"---\ndescription: test\n---\n# Title\n## Section One\ntext";
//! let doc = extract(raw).unwrap();
//!
//! assert_eq!(doc.title(), Some("Title"));
//! assert_eq!(doc.description(), Some("test"));
//! assert_eq!(doc.toc()[0].id, "section-one");
//! assert!(doc.content().contains(r#"<h2 id="section-one">Section One</h2>"#));
//! ```

use std::borrow::Cow;

use folio_core::Result;
use serde::Serialize;

use crate::markdown::frontmatter::extract_frontmatter;
use crate::markdown::headings::Outline;
use crate::markdown::render::{CmarkRenderer, MarkdownRenderer, RenderOptions};

/// Table of contents entry for a level-2 heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading inline content, rendered to HTML.
    pub text: String,
    /// Anchor id, also set as the heading element's `id` attribute.
    pub id: String,
}

/// A rendered Markdown page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    title: Option<String>,
    description: Option<String>,
    content: String,
    toc: Vec<TocEntry>,
}

impl Document {
    /// Inline text of the first level-1 heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The front matter `description`, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Rendered HTML body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Level-2 headings in document order.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }
}

/// Extracts [`Document`]s with a given renderer.
///
/// Holds no per-document state, so one extractor can serve any number of
/// documents, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor<R = CmarkRenderer> {
    renderer: R,
}

impl DocumentExtractor<CmarkRenderer> {
    /// Extractor using `pulldown-cmark` with default extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor using `pulldown-cmark` with the given extensions.
    pub fn with_options(options: RenderOptions) -> Self {
        Self::with_renderer(CmarkRenderer::with_options(options))
    }
}

impl<R: MarkdownRenderer> DocumentExtractor<R> {
    /// Extractor using a custom renderer.
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    /// The renderer in use.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Extract a document from raw file bytes.
    ///
    /// Bytes that are not valid UTF-8 are decoded lossily. Broken front
    /// matter is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`](folio_core::Error::Render) when the renderer
    /// fails.
    pub fn extract(&self, raw: &[u8]) -> Result<Document> {
        let text = decode_utf8(raw);
        self.extract_str(&text)
    }

    /// Extract a document from text.
    pub fn extract_str(&self, text: &str) -> Result<Document> {
        let frontmatter = extract_frontmatter(text);
        let description = frontmatter.metadata().and_then(|m| m.description());

        let mut outline = Outline::new();
        let content = self.renderer.render(frontmatter.body(), &mut outline)?;
        let (title, toc) = outline.into_parts();

        log::debug!(
            "Extracted document: title={:?}, {} toc entries, {} bytes of HTML",
            title,
            toc.len(),
            content.len()
        );

        Ok(Document {
            title,
            description,
            content,
            toc,
        })
    }
}

/// Extract a document with the default renderer.
pub fn extract(raw: &[u8]) -> Result<Document> {
    DocumentExtractor::new().extract(raw)
}

fn decode_utf8(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            log::warn!("Document is not valid UTF-8 ({e}); decoding lossily");
            String::from_utf8_lossy(raw)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
