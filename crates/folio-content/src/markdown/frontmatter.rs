//! Front matter detection and splitting.
//!
//! Front matter is a metadata block at the very start of a Markdown file,
//! delimited by `---` lines:
//!
//! ```markdown
//! ---
//! description: How requests are matched to handlers
//! ---
//!
//! # Routing
//!
//! The body of the document starts here.
//! ```
//!
//! The opening `---` must be the first bytes of the file and be followed by a
//! newline; the closing delimiter is the next line consisting of exactly
//! `---`. A file that opens a block but never closes it has no front matter
//! at all: the whole file is body.
//!
//! # Usage
//!
//! ```rust
//! use folio_content::markdown::extract_frontmatter;
//!
//! let content = "---\ndescription: Test\n---\n# Heading";
//! let result = extract_frontmatter(content);
//!
//! assert!(result.has_frontmatter());
//! assert_eq!(result.body(), "# Heading");
//!
//! let description = result.metadata().and_then(|m| m.get_str("description"));
//! assert_eq!(description, Some("Test"));
//! ```

use super::metadata::{decode_metadata, Metadata};

/// Front matter delimiter line.
const DELIMITER: &str = "---";

/// UTF-8 byte order mark, dropped before delimiter detection.
const BOM: char = '\u{feff}';

/// Raw split of a file into its metadata block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Text between the delimiter lines, if a closed block was found.
    block: Option<&'a str>,
    /// Everything after the closing delimiter line, or the whole input.
    body: &'a str,
}

impl<'a> FrontmatterSplit<'a> {
    /// The metadata block, without its delimiter lines.
    pub fn block(&self) -> Option<&'a str> {
        self.block
    }

    /// The document body.
    pub fn body(&self) -> &'a str {
        self.body
    }
}

/// Split content into an optional metadata block and the body.
///
/// A leading byte order mark is ignored. Never fails: input without a
/// complete front matter block is returned whole as the body.
///
/// # Example
///
/// ```rust
/// use folio_content::markdown::split_frontmatter;
///
/// let split = split_frontmatter("---\ndescription: x\n---\nBody");
/// assert_eq!(split.block(), Some("description: x\n"));
/// assert_eq!(split.body(), "Body");
///
/// let split = split_frontmatter("# No metadata");
/// assert_eq!(split.block(), None);
/// assert_eq!(split.body(), "# No metadata");
/// ```
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let whole = FrontmatterSplit {
        block: None,
        body: content,
    };

    let after_opening = match content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return whole,
    };

    let mut offset = 0;
    for line in after_opening.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        let bare = bare.strip_suffix('\r').unwrap_or(bare);
        if bare == DELIMITER {
            return FrontmatterSplit {
                block: Some(&after_opening[..offset]),
                body: &after_opening[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    log::warn!("Front matter opening delimiter found but no closing delimiter; treating whole file as body");
    whole
}

/// Result of front matter extraction.
///
/// Contains the decoded metadata (if present and valid) and the body content
/// after the front matter.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    /// Decoded metadata, if a block was present and valid.
    metadata: Option<Metadata>,
    /// Body content after the front matter.
    body: &'a str,
    /// Whether a closed block was found (even if decoding failed).
    had_delimiters: bool,
}

impl<'a> FrontmatterResult<'a> {
    /// Check if valid front matter was found and decoded.
    pub fn has_frontmatter(&self) -> bool {
        self.metadata.is_some()
    }

    /// Check if front matter delimiters were present (even if decoding failed).
    pub fn had_delimiters(&self) -> bool {
        self.had_delimiters
    }

    /// Get the decoded metadata, if present.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Take ownership of the metadata, if present.
    pub fn into_metadata(self) -> Option<Metadata> {
        self.metadata
    }

    /// Get the body content (everything after front matter).
    pub fn body(&self) -> &'a str {
        self.body
    }
}

/// Split and decode front matter.
///
/// # Behavior
///
/// - No front matter block: body is the whole input, `has_frontmatter() == false`
/// - Block present but not decodable: logs a warning, body is the text after
///   the closing delimiter, `has_frontmatter() == false`
/// - Valid block: decoded metadata and body
///
/// # Example
///
/// ```rust
/// use folio_content::markdown::extract_frontmatter;
///
/// let result = extract_frontmatter("---\n{{not yaml\n---\n# Heading");
/// assert!(!result.has_frontmatter());
/// assert!(result.had_delimiters());
/// assert_eq!(result.body(), "# Heading");
/// ```
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    let split = split_frontmatter(content);

    let block = match split.block() {
        Some(block) => block,
        None => {
            return FrontmatterResult {
                metadata: None,
                body: split.body(),
                had_delimiters: false,
            };
        }
    };

    let metadata = match decode_metadata(block) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            log::warn!("Ignoring front matter: {e}");
            None
        }
    };

    FrontmatterResult {
        metadata,
        body: split.body(),
        had_delimiters: true,
    }
}

/// Strip front matter from content, returning only the body.
///
/// # Example
///
/// ```rust
/// use folio_content::markdown::strip_frontmatter;
///
/// let content = "---\ndescription: Test\n---\n\n# Heading";
/// assert_eq!(strip_frontmatter(content).trim(), "# Heading");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    split_frontmatter(content).body()
}

// ============================================================================
// Tests
// ============================================================================
