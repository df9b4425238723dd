//! The `folio` application.
//!
//! [`FolioCli`] owns the loaded configuration, a [`DocResolver`] for the docs
//! tree, and a [`DocumentExtractor`], and dispatches parsed [`CliArgs`].

use std::path::{Path, PathBuf};

use folio_content::{Document, DocumentExtractor};
use folio_core::util::resolver::markdown_path;
use folio_core::{DocResolver, Error, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command, OutputFormat};
use crate::config::FolioConfig;
use crate::config_handlers;
use crate::nav::{sidebar, SidebarSection};
use crate::page::PageMeta;

/// Everything a page template needs to lay out one page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub page: PageMeta,
    pub document: Document,
    pub nav: Vec<SidebarSection>,
    pub markdown_path: String,
}

// ============================================================================
// FolioCli
// ============================================================================

/// CLI application.
pub struct FolioCli {
    name: String,
    version: String,
    config: FolioConfig,
    resolver: DocResolver,
    extractor: DocumentExtractor,
}

impl FolioCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FolioConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: FolioConfig) -> Self {
        let resolver = config.docs.resolver();
        let extractor = DocumentExtractor::with_options(config.markdown);
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            resolver,
            extractor,
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Records from the `log` facade used by the library crates are captured too.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Render { path, format }) => {
                let page = self.render_page(&path).await?;
                println!("{}", format_page(&page, format)?);
                Ok(())
            }
            Some(Command::Extract { file, format }) => {
                let document = self.extract_file(Path::new(&file)).await?;
                println!("{}", format_document(&document, format)?);
                Ok(())
            }
            Some(Command::Toc { path }) => {
                let document = self.load_page(&path).await?;
                for line in toc_lines(&document) {
                    println!("{line}");
                }
                Ok(())
            }
            Some(Command::Resolve { path }) => {
                println!("{}", self.resolve(&path)?.display());
                Ok(())
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Page operations
    // ------------------------------------------------------------------------

    /// Resolve a request path to a file under the docs root.
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf> {
        self.resolver.resolve(request_path)
    }

    /// Read and extract a Markdown file.
    pub async fn extract_file(&self, file: &Path) -> Result<Document> {
        let raw = tokio::fs::read(file)
            .await
            .map_err(|e| Error::io_with_path(e, file))?;
        tracing::debug!(file = %file.display(), bytes = raw.len(), "Read page");
        self.extractor.extract(&raw)
    }

    /// Resolve and extract the page for a request path.
    pub async fn load_page(&self, request_path: &str) -> Result<Document> {
        let file = self.resolve(request_path)?;
        self.extract_file(&file).await
    }

    /// Resolve, extract, and decorate the page for a request path.
    pub async fn render_page(&self, request_path: &str) -> Result<RenderedPage> {
        let document = self.load_page(request_path).await?;
        let page = PageMeta::from_document(&document, &self.config.site, request_path);
        tracing::info!(path = request_path, title = %page.title, "Rendered page");
        Ok(RenderedPage {
            page,
            document,
            nav: sidebar(&self.config.nav, request_path),
            markdown_path: markdown_path(request_path),
        })
    }
}

// ============================================================================
// Output formatting
// ============================================================================

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

/// Format a rendered page for stdout.
pub fn format_page(page: &RenderedPage, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(page),
        OutputFormat::Html => Ok(page.document.content().to_string()),
    }
}

/// Format an extracted document for stdout.
pub fn format_document(document: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(document),
        OutputFormat::Html => Ok(document.content().to_string()),
    }
}

/// One `id<TAB>text` line per table of contents entry.
pub fn toc_lines(document: &Document) -> Vec<String> {
    document
        .toc()
        .iter()
        .map(|entry| format!("{}\t{}", entry.id, entry.text))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
