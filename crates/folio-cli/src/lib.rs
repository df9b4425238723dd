//! Command-line front end for Folio.
//!
//! - [`cli`]: argument parsing
//! - [`config`]: [`FolioConfig`] loading via `confyg`
//! - [`app`]: [`FolioCli`], which resolves, extracts, and prints pages
//! - [`page`]: [`PageMeta`] title, description, and social tags
//! - [`nav`]: sidebar navigation with the current page marked

#![doc = include_str!("../README.md")]
#![warn(clippy::all)]
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod nav;
pub mod page;

pub use app::{FolioCli, RenderedPage};
pub use cli::CliArgs;
pub use config::{FolioConfig, NavLink, NavSection};
pub use nav::{SidebarLink, SidebarSection};
pub use page::{MetaTag, PageMeta};
