//! Utility modules for anchor ids and document path handling.
//!
//! # Modules
//!
//! - [`de`]: Lenient deserializers for string-typed config sources
//! - [`ids`]: Heading anchor slug generation
//! - [`resolver`]: Request path to Markdown file resolution

pub mod de;
pub mod ids;
pub mod resolver;

#[cfg(test)]
mod proptests;
