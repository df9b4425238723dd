//! Markdown to HTML rendering.
//!
//! [`MarkdownRenderer`] is the seam between page extraction and the Markdown
//! engine. The default [`CmarkRenderer`] uses `pulldown-cmark` and reports
//! headings through [`InterceptHeadings`].
//!
//! # Example
//!
//! ```rust
//! use folio_content::markdown::{CmarkRenderer, Heading, HeadingAttrs, MarkdownRenderer};
//!
//! let renderer = CmarkRenderer::new();
//! let mut hook = |h: &Heading<'_>| -> Option<HeadingAttrs> {
//!     Some(HeadingAttrs::with_id(format!("h{}", h.depth())))
//! };
//!
//! let html = renderer.render("## Install\n", &mut hook).unwrap();
//! assert_eq!(html, "<h2 id=\"h2\">Install</h2>\n");
//! ```

use folio_core::util::de::from_str_or_native;
use folio_core::{Error, Result};
use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};

use super::headings::{HeadingHook, InterceptHeadings};

/// Markdown extensions enabled during rendering.
///
/// Flags also accept `"true"`/`"false"` strings, as produced by environment
/// overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// GitHub-style tables.
    #[serde(deserialize_with = "from_str_or_native")]
    pub tables: bool,
    /// `~~strikethrough~~`.
    #[serde(deserialize_with = "from_str_or_native")]
    pub strikethrough: bool,
    /// `[^1]` footnotes.
    #[serde(deserialize_with = "from_str_or_native")]
    pub footnotes: bool,
    /// `- [ ]` task list items.
    #[serde(deserialize_with = "from_str_or_native")]
    pub tasklists: bool,
    /// Curly quotes, dashes, and ellipses.
    #[serde(deserialize_with = "from_str_or_native")]
    pub smart_punctuation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: false,
            tasklists: false,
            smart_punctuation: false,
        }
    }
}

impl RenderOptions {
    /// Translate into `pulldown-cmark` parser options.
    pub fn to_cmark(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// Renders a Markdown body to HTML, reporting headings to a hook.
pub trait MarkdownRenderer {
    /// Render `body` to HTML.
    ///
    /// `hook` is called once per block-level heading, in document order,
    /// before that heading's element is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when no output can be produced.
    fn render(&self, body: &str, hook: &mut dyn HeadingHook) -> Result<String>;
}

/// `pulldown-cmark` backed renderer.
#[derive(Debug, Clone, Default)]
pub struct CmarkRenderer {
    options: RenderOptions,
}

impl CmarkRenderer {
    /// Create a renderer with default extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given extensions.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Extensions in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, body: &str, hook: &mut dyn HeadingHook) -> Result<String> {
        let parser = Parser::new_ext(body, self.options.to_cmark());
        let events = InterceptHeadings::new(parser, hook);

        let mut out = String::with_capacity(body.len() + body.len() / 2);
        html::write_html_fmt(&mut out, events)
            .map_err(|e| Error::render(format!("HTML output failed: {e}")))?;
        Ok(out)
    }
}
