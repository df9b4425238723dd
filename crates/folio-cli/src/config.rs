//! Configuration for the `folio` command.
//!
//! [`FolioConfig`] is loaded from TOML files, environment variables, and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FOLIO_CONFIG` environment variable
//! 3. XDG default: `~/.config/folio/config.toml`
//! 4. Built-in defaults

use confyg::{env, Confygery};
use folio_content::RenderOptions;
use folio_core::util::de::from_str_or_native;
use folio_core::{DocResolver, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

const ENV_PREFIX: &str = "FOLIO";

/// Sections that `FOLIO_<SECTION>_<KEY>` variables overlay and that
/// `config export` emits. Keep every field in them scalar.
const ENV_SECTIONS: [&str; 3] = ["docs", "site", "markdown"];

// ============================================================================
// Configuration structs
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Where pages live on disk.
    pub docs: DocsConfig,

    /// Site identity used for page metadata.
    pub site: SiteConfig,

    /// Markdown extensions.
    pub markdown: RenderOptions,

    /// Sidebar navigation, in display order. A config file that declares
    /// any `[[nav]]` entries replaces the built-in list.
    pub nav: Vec<NavSection>,
}

/// Documentation tree location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Root directory of the Markdown tree.
    pub root: String,

    /// File name served for section requests.
    pub index_file: String,
}

/// Site identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name, appended to page titles.
    pub name: String,

    /// Absolute base URL, without a trailing slash.
    pub base_url: String,

    /// Description for pages that declare none.
    pub default_description: String,

    /// Social preview image URL.
    pub og_image: String,

    /// Social preview image width in pixels.
    #[serde(deserialize_with = "from_str_or_native")]
    pub og_image_width: u32,

    /// Social preview image height in pixels.
    #[serde(deserialize_with = "from_str_or_native")]
    pub og_image_height: u32,
}

/// A titled group of sidebar links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub label: String,

    /// Request path prefix shared by the section's pages.
    pub slug: String,

    #[serde(default)]
    pub links: Vec<NavLink>,
}

/// A single sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            docs: DocsConfig::default(),
            site: SiteConfig::default(),
            markdown: RenderOptions::default(),
            nav: default_nav(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root: "docs".to_string(),
            index_file: folio_core::util::resolver::DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Newtron Docs".to_string(),
            base_url: "https://docs.newtron.app".to_string(),
            default_description: "Learn Newtron: routing, templates, forms, database, \
                                  and everything else you need to build something great."
                .to_string(),
            og_image: "https://docs.newtron.app/images/newtron-og.jpg".to_string(),
            og_image_width: 1200,
            og_image_height: 630,
        }
    }
}

impl NavSection {
    fn new(label: &str, slug: &str, links: &[(&str, &str)]) -> Self {
        Self {
            label: label.to_string(),
            slug: slug.to_string(),
            links: links
                .iter()
                .map(|(label, url)| NavLink {
                    label: label.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

/// Built-in sidebar for the Newtron documentation.
pub fn default_nav() -> Vec<NavSection> {
    vec![
        NavSection::new(
            "Getting Started",
            "/getting-started",
            &[
                ("Installation", "/getting-started/installation"),
                ("Your First Application", "/getting-started/first-app"),
                ("Configuration", "/getting-started/configuration"),
            ],
        ),
        NavSection::new(
            "Routing",
            "/routing",
            &[
                ("Introduction", "/routing/introduction"),
                ("File-based Routing", "/routing/file-based"),
                ("Declarative Routing", "/routing/declarative"),
            ],
        ),
        NavSection::new(
            "Quark Templates",
            "/quark",
            &[
                ("Template Basics", "/quark/template-basics"),
                ("Layouts and Inheritance", "/quark/layouts-inheritance"),
                ("Filters", "/quark/filters"),
                ("Directives", "/quark/directives"),
            ],
        ),
        NavSection::new(
            "Document and Assets",
            "/document",
            &[
                ("Document Management", "/document/document-management"),
                ("Asset Management", "/document/asset-management"),
            ],
        ),
        NavSection::new(
            "HTTP",
            "/http",
            &[
                ("Request Handling", "/http/request-handling"),
                ("Generating Responses", "/http/generating-responses"),
                ("Middleware", "/http/middleware"),
            ],
        ),
        NavSection::new(
            "Architecture",
            "/architecture",
            &[
                ("Application Lifecycle", "/architecture/lifecycle"),
                ("Service Providers", "/architecture/service-providers"),
            ],
        ),
    ]
}

impl DocsConfig {
    /// Resolver for this documentation tree.
    pub fn resolver(&self) -> DocResolver {
        DocResolver::new(&self.root).with_index_file(&self.index_file)
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FolioConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped, leaving the defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        for section in ENV_SECTIONS {
            env_opts.add_section(section);
        }
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten the env-overlayable sections into `FOLIO_` variable pairs.
    ///
    /// Loading with exactly these variables set reproduces those sections.
    /// `nav` has no env form and is left out.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        for section in ENV_SECTIONS {
            if let Some(table) = value.get(section) {
                let prefix = format!("{ENV_PREFIX}_{}", section.to_uppercase());
                flatten_toml_value(table, &prefix, &mut vars);
            }
        }
        Ok(vars)
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes tests that touch process environment variables.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// RAII guard for env var manipulation in tests.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: env-mutating tests hold `ENV_LOCK`.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: env-mutating tests hold `ENV_LOCK`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: env-mutating tests hold `ENV_LOCK`.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_default() {
        let config = FolioConfig::default();
        assert_eq!(config.docs.root, "docs");
        assert_eq!(config.docs.index_file, "_index.md");
        assert_eq!(config.site.name, "Newtron Docs");
        assert_eq!(config.site.base_url, "https://docs.newtron.app");
        assert_eq!(config.site.og_image_width, 1200);
        assert_eq!(config.site.og_image_height, 630);
        assert_eq!(config.markdown, RenderOptions::default());
        assert_eq!(config.nav, default_nav());
    }

    #[test]
    fn test_default_nav_sections() {
        let nav = default_nav();
        let slugs: Vec<&str> = nav.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "/getting-started",
                "/routing",
                "/quark",
                "/document",
                "/http",
                "/architecture",
            ]
        );
        assert_eq!(nav[0].links[1].label, "Your First Application");
        assert_eq!(nav[0].links[1].url, "/getting-started/first-app");
        assert_eq!(nav[2].links.len(), 4);
        for section in &nav {
            for link in &section.links {
                assert!(link.url.starts_with(&format!("{}/", section.slug)));
            }
        }
    }

    #[test]
    fn test_nav_from_toml_replaces_default() {
        let toml_str = r#"
            [[nav]]
            label = "Guides"
            slug = "/guides"

            [[nav.links]]
            label = "Intro"
            url = "/guides/intro"

            [[nav]]
            label = "Empty"
            slug = "/empty"
        "#;

        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.nav[0].links[0].url, "/guides/intro");
        assert!(config.nav[1].links.is_empty());
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn test_docs_config_resolver() {
        let docs = DocsConfig {
            root: "/srv/docs".into(),
            index_file: "index.md".into(),
        };
        let resolver = docs.resolver();
        assert_eq!(resolver.root(), std::path::Path::new("/srv/docs"));
        assert_eq!(resolver.index_file(), "index.md");
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_from_toml() {
        let toml_str = r#"
            [docs]
            root = "/srv/docs"

            [site]
            name = "Acme Docs"
            og_image_width = 800

            [markdown]
            footnotes = true
        "#;

        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.docs.root, "/srv/docs");
        assert_eq!(config.docs.index_file, "_index.md");
        assert_eq!(config.site.name, "Acme Docs");
        assert_eq!(config.site.og_image_width, 800);
        assert_eq!(config.site.og_image_height, 630);
        assert!(config.markdown.footnotes);
        assert!(config.markdown.tables);
    }

    #[test]
    fn test_folio_config_to_toml() {
        let config = FolioConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[docs]"));
        assert!(toml_str.contains("[site]"));
        assert!(toml_str.contains("[markdown]"));
        assert!(toml_str.contains("[[nav]]"));
        assert!(toml_str.contains("root = \"docs\""));

        let parsed: FolioConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_load_from_file() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [docs]
                root = "/data/docs"
                [site]
                name = "Loaded"
            "#,
        )
        .unwrap();

        let config = FolioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.docs.root, "/data/docs");
        assert_eq!(config.site.name, "Loaded");
        assert_eq!(config.site.og_image_width, 1200);
    }

    #[test]
    fn test_folio_config_load_defaults() {
        let _lock = env_lock();
        let config = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.docs.root, "docs");
        assert_eq!(config.site.name, "Newtron Docs");
    }

    #[test]
    fn test_folio_config_load_env_overlay() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[docs]\nroot = \"from-file\"\n").unwrap();

        let _guard = EnvGuard::new("FOLIO_DOCS_ROOT", "from-env");
        let config = FolioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.docs.root, "from-env");
    }

    #[test]
    fn test_folio_config_load_env_non_string_fields() {
        let _lock = env_lock();
        let _tables = EnvGuard::new("FOLIO_MARKDOWN_TABLES", "false");
        let _footnotes = EnvGuard::new("FOLIO_MARKDOWN_FOOTNOTES", "true");
        let _width = EnvGuard::new("FOLIO_SITE_OG_IMAGE_WIDTH", "800");

        let config = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert!(!config.markdown.tables);
        assert!(config.markdown.footnotes);
        assert!(config.markdown.strikethrough);
        assert_eq!(config.site.og_image_width, 800);
        assert_eq!(config.site.og_image_height, 630);
    }

    #[test]
    fn test_folio_config_load_env_bad_value_is_error() {
        let _lock = env_lock();
        let _guard = EnvGuard::new("FOLIO_SITE_OG_IMAGE_HEIGHT", "tall");
        let err = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("tall"));
    }

    #[test]
    fn test_exported_env_vars_load_back() {
        let _lock = env_lock();
        let mut config = FolioConfig::default();
        config.docs.root = "/srv/docs".into();
        config.site.name = "Acme Docs".into();
        config.site.og_image_height = 512;
        config.markdown.tables = false;
        config.markdown.smart_punctuation = true;

        let vars = config.to_env_vars().unwrap();
        let _guards: Vec<EnvGuard> = vars.iter().map(|(k, v)| EnvGuard::new(k, v)).collect();

        let loaded = FolioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(loaded.docs, config.docs);
        assert_eq!(loaded.site, config.site);
        assert_eq!(loaded.markdown, config.markdown);
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = FolioConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _lock = env_lock();
        let _guard = EnvGuard::new(CONFIG_ENV_VAR, "/env/config.toml");
        let path = FolioConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _lock = env_lock();
        let _guard = EnvGuard::remove(CONFIG_ENV_VAR);
        if let Some(p) = FolioConfig::resolve_config_path(None) {
            assert!(p.ends_with("folio/config.toml"));
        }
    }

    // ------------------------------------------------------------------------
    // to_env_vars tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_folio_config_to_env_vars() {
        let config = FolioConfig::default();
        let vars = config.to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("FOLIO_DOCS_ROOT").unwrap(), "docs");
        assert_eq!(map.get("FOLIO_DOCS_INDEX_FILE").unwrap(), "_index.md");
        assert_eq!(map.get("FOLIO_SITE_OG_IMAGE_WIDTH").unwrap(), "1200");
        assert_eq!(map.get("FOLIO_MARKDOWN_TABLES").unwrap(), "true");
        assert!(map.keys().all(|k| !k.starts_with("FOLIO_NAV")));
    }

    #[test]
    fn test_folio_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FolioConfig>();
    }
}
