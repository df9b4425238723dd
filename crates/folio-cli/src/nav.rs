//! Sidebar navigation for a rendered page.
//!
//! The configured [`NavSection`]s are copied into a [`SidebarSection`] list
//! with the entries matching the current request path marked active.

use serde::Serialize;

use crate::config::NavSection;

/// A sidebar section as laid out on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    pub label: String,
    pub slug: String,
    /// The request path is the section itself or one of its pages.
    pub active: bool,
    pub links: Vec<SidebarLink>,
}

/// A sidebar link as laid out on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarLink {
    pub label: String,
    pub url: String,
    /// The link points at the current page.
    pub active: bool,
}

/// Build the sidebar for the page served at `request_path`.
pub fn sidebar(nav: &[NavSection], request_path: &str) -> Vec<SidebarSection> {
    let current = normalize(request_path);

    nav.iter()
        .map(|section| {
            let slug = normalize(&section.slug);
            let in_section = current == slug
                || (slug != "/" && current.starts_with(&format!("{slug}/")));

            let links = section
                .links
                .iter()
                .map(|link| SidebarLink {
                    label: link.label.clone(),
                    url: link.url.clone(),
                    active: normalize(&link.url) == current,
                })
                .collect::<Vec<_>>();

            SidebarSection {
                label: section.label.clone(),
                slug: section.slug.clone(),
                active: in_section || links.iter().any(|l| l.active),
                links,
            }
        })
        .collect()
}

/// `/a/b/` and `a/b` both become `/a/b`; the root is `/`.
fn normalize(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}
