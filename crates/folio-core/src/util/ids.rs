//! Anchor id generation.
//!
//! Headings that appear in a page's table of contents get an `id` attribute
//! derived from their text, so that `#fragment` links resolve. Changing the
//! rule changes published anchor URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Any run of characters that may not appear in an anchor id.
static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]+").expect("Invalid anchor slug regex"));

/// Convert heading text to an anchor id.
///
/// Every maximal run of characters outside `[a-zA-Z0-9-]` collapses into a
/// single hyphen and the result is lowercased. Nothing is trimmed, so
/// trailing punctuation leaves a trailing hyphen, and hyphens already in the
/// text are kept as they are.
///
/// Ids are not made unique: two headings with the same text get the same id.
///
/// # Examples
///
/// ```
/// use folio_core::util::ids::slugify;
///
/// assert_eq!(slugify("Section One"), "section-one");
/// assert_eq!(slugify("Getting Started!"), "getting-started-");
/// assert_eq!(slugify("What's new in 2.0?"), "what-s-new-in-2-0-");
/// assert_eq!(slugify("Café"), "caf-");
/// ```
pub fn slugify(text: &str) -> String {
    DISALLOWED_RUN
        .replace_all(text, "-")
        .to_ascii_lowercase()
}

/// Check whether a string is a well-formed anchor id.
///
/// Well-formed ids are non-empty and contain only lowercase ASCII letters,
/// digits, and hyphens.
pub fn is_valid_anchor(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
