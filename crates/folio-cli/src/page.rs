//! Page-level metadata for a rendered document.
//!
//! Combines a [`Document`] with the site identity into the `<title>`,
//! description, and social preview tags a page layout emits.

use folio_content::Document;
use serde::Serialize;

use crate::config::SiteConfig;

/// Which attribute a `<meta>` tag is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKey {
    /// `<meta name="...">`
    Name,
    /// `<meta property="...">`
    Property,
}

/// A single `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub key: MetaKey,
    pub name: String,
    pub content: String,
}

impl MetaTag {
    fn property(name: &str, content: impl Into<String>) -> Self {
        Self {
            key: MetaKey::Property,
            name: name.to_string(),
            content: content.into(),
        }
    }

    fn name(name: &str, content: impl Into<String>) -> Self {
        Self {
            key: MetaKey::Name,
            name: name.to_string(),
            content: content.into(),
        }
    }

    /// The tag as HTML.
    pub fn to_html(&self) -> String {
        let attr = match self.key {
            MetaKey::Name => "name",
            MetaKey::Property => "property",
        };
        format!(
            r#"<meta {attr}="{}" content="{}">"#,
            escape_attr(&self.name),
            escape_attr(&self.content)
        )
    }
}

/// Title, description, canonical URL, and meta tags for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub url: String,
    pub meta: Vec<MetaTag>,
}

impl PageMeta {
    /// Build page metadata for `doc` served at `request_path`.
    pub fn from_document(doc: &Document, site: &SiteConfig, request_path: &str) -> Self {
        let title = match doc.title() {
            Some(title) => format!("{title} | {}", site.name),
            None => site.name.clone(),
        };
        let description = doc
            .description()
            .unwrap_or(&site.default_description)
            .to_string();
        let url = format!("{}{request_path}", site.base_url);

        let meta = vec![
            MetaTag::property("og:url", &url),
            MetaTag::property("og:type", "website"),
            MetaTag::property("og:title", &title),
            MetaTag::property("og:description", &description),
            MetaTag::property("og:image", &site.og_image),
            MetaTag::property("og:image:width", site.og_image_width.to_string()),
            MetaTag::property("og:image:height", site.og_image_height.to_string()),
            MetaTag::name("twitter:card", "summary_large_image"),
            MetaTag::property("twitter:domain", domain_of(&site.base_url)),
            MetaTag::property("twitter:url", &url),
            MetaTag::name("twitter:title", &title),
            MetaTag::name("twitter:description", &description),
            MetaTag::name("twitter:image", &site.og_image),
        ];

        Self {
            title,
            description,
            url,
            meta,
        }
    }

    /// Look up a tag's content by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.content.as_str())
    }
}

/// Host part of a base URL.
fn domain_of(base_url: &str) -> &str {
    let rest = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
