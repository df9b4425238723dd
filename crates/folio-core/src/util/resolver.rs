//! Request path resolution for a docs tree.
//!
//! `DocResolver` maps a page request path such as `/routing/introduction`
//! onto a Markdown file under a docs root. A path resolves to
//! `<root>/<path>.md` when that file exists, otherwise to the section index
//! `<root>/<path>/_index.md`.
//!
//! # Example
//!
//! ```no_run
//! use folio_core::util::resolver::DocResolver;
//!
//! let resolver = DocResolver::new("docs");
//!
//! // docs/routing/introduction.md, or docs/routing/introduction/_index.md
//! let file = resolver.resolve("/routing/introduction").unwrap();
//! println!("Serving {}", file.display());
//! ```

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Default file name of a section index page.
pub const DEFAULT_INDEX_FILE: &str = "_index.md";

/// Markdown source extension.
const MARKDOWN_EXT: &str = "md";

/// Resolves request paths to Markdown files under a docs root.
#[derive(Debug, Clone)]
pub struct DocResolver {
    /// Directory holding the Markdown sources
    root: PathBuf,
    /// File name used for section index pages
    index_file: String,
}

impl DocResolver {
    /// Create a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }

    /// Set the file name used for section index pages.
    pub fn with_index_file(mut self, index_file: &str) -> Self {
        self.index_file = index_file.to_string();
        self
    }

    /// The docs root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The section index file name.
    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    /// List the files a request path may resolve to, in lookup order.
    ///
    /// Returns `NotFound` for request paths that try to leave the docs root.
    pub fn candidates(&self, request_path: &str) -> Result<Vec<PathBuf>> {
        let relative = sanitize(request_path)?;

        if relative.as_os_str().is_empty() {
            return Ok(vec![self.root.join(&self.index_file)]);
        }

        let mut page = self.root.join(&relative);
        page.as_mut_os_string().push(".");
        page.as_mut_os_string().push(MARKDOWN_EXT);

        Ok(vec![page, self.root.join(&relative).join(&self.index_file)])
    }

    /// Resolve a request path to an existing Markdown file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no candidate file exists or when the
    /// path contains `..` or other components that would escape the root.
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf> {
        let candidates = self.candidates(request_path)?;

        for candidate in &candidates {
            if candidate.is_file() {
                log::debug!("Resolved '{request_path}' to {}", candidate.display());
                return Ok(candidate.clone());
            }
        }

        let last = candidates
            .last()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| request_path.to_string());
        Err(Error::not_found(last))
    }
}

/// Path of the Markdown source for a request path, as linked from a page.
///
/// # Example
///
/// ```
/// use folio_core::util::resolver::markdown_path;
///
/// assert_eq!(markdown_path("/routing/introduction"), "/routing/introduction.md");
/// ```
pub fn markdown_path(request_path: &str) -> String {
    format!("{request_path}.{MARKDOWN_EXT}")
}

/// Turn a request path into a relative path with only normal components.
fn sanitize(request_path: &str) -> Result<PathBuf> {
    let trimmed = request_path.trim_matches('/');
    let mut relative = PathBuf::new();

    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => {
                return Err(Error::not_found(format!(
                    "Invalid document path: {request_path}"
                )));
            }
        }
    }

    Ok(relative)
}
