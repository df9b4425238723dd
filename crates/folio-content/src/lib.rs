//! Front matter, heading interception, and document extraction.
//!
//! This crate turns the bytes of a Markdown documentation page into a
//! [`Document`] that a page template can consume: the page title, the front
//! matter description, a table of contents with anchor ids, and the rendered
//! HTML body. It does no I/O; callers read files and hand over the bytes.
//!
//! # Modules
//!
//! - [`markdown`]: Front matter, metadata, heading hooks, rendering
//!   - [`markdown::frontmatter`]: Front matter splitting
//!   - [`markdown::metadata`]: YAML metadata decoding
//!   - [`markdown::headings`]: Heading interception and the title/TOC outline
//!   - [`markdown::render`]: Renderer trait and `pulldown-cmark` renderer
//! - [`document`]: The extraction pipeline and its result types
//!
//! # Example
//!
//! ```rust
//! use folio_content::DocumentExtractor;
//!
//! let extractor = DocumentExtractor::new();
//! let doc = extractor
//!     .extract(b"---\ndescription: First steps\n---\n# Installation\n## Requirements\n")
//!     .unwrap();
//!
//! assert_eq!(doc.title(), Some("Installation"));
//! assert_eq!(doc.description(), Some("First steps"));
//! assert_eq!(doc.toc()[0].id, "requirements");
//! ```

pub mod document;
pub mod markdown;

// Re-export commonly used types
pub use document::{extract, Document, DocumentExtractor, TocEntry};
pub use markdown::{
    decode_metadata, extract_frontmatter, split_frontmatter, strip_frontmatter, CmarkRenderer,
    FrontmatterResult, Heading, HeadingAttrs, HeadingHook, MarkdownRenderer, Metadata, Outline,
    RenderOptions,
};

// Re-export HeadingLevel for convenience
pub use pulldown_cmark::HeadingLevel;
