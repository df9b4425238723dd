//! Markdown front matter, heading interception, and rendering.
//!
//! - [`frontmatter`]: Front matter detection and splitting
//! - [`metadata`]: YAML metadata decoding
//! - [`headings`]: Heading hooks and the title/TOC [`Outline`]
//! - [`render`]: The [`MarkdownRenderer`] seam and its `pulldown-cmark` implementation
//!
//! # Example
//!
//! ```rust
//! use folio_content::markdown::{extract_frontmatter, CmarkRenderer, MarkdownRenderer, Outline};
//!
//! let content = "---\ndescription: Filters\n---\n# Filters\n## Built-in filters\n";
//! let frontmatter = extract_frontmatter(content);
//!
//! let mut outline = Outline::new();
//! let html = CmarkRenderer::new().render(frontmatter.body(), &mut outline).unwrap();
//!
//! assert_eq!(outline.title(), Some("Filters"));
//! assert_eq!(outline.toc()[0].id, "built-in-filters");
//! assert!(html.contains("id=\"built-in-filters\""));
//! ```

pub mod frontmatter;
pub mod headings;
pub mod metadata;
pub mod render;

// Re-export key types and functions
pub use frontmatter::{
    extract_frontmatter, split_frontmatter, strip_frontmatter, FrontmatterResult, FrontmatterSplit,
};
pub use headings::{Heading, HeadingAttrs, HeadingHook, InterceptHeadings, Outline};
pub use metadata::{decode_metadata, Metadata};
pub use render::{CmarkRenderer, MarkdownRenderer, RenderOptions};
