//! Lenient field deserializers.
//!
//! Environment overlays hand every value over as a string, so `FOO_PORT=8080`
//! arrives as `"8080"` rather than `8080`. Fields that may come from such a
//! source use [`from_str_or_native`] to accept either form.
//!
//! # Example
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Section {
//!     #[serde(deserialize_with = "folio_core::util::de::from_str_or_native")]
//!     enabled: bool,
//! }
//!
//! let native: Section = toml::from_str("enabled = true").unwrap();
//! let text: Section = toml::from_str("enabled = 'false'").unwrap();
//! assert!(native.enabled);
//! assert!(!text.enabled);
//! ```

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NativeOrText<T> {
    Native(T),
    Text(String),
}

/// Deserialize `T` from its native form or from a string that parses as `T`.
///
/// Surrounding whitespace in the string form is ignored.
pub fn from_str_or_native<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NativeOrText::<T>::deserialize(deserializer)? {
        NativeOrText::Native(value) => Ok(value),
        NativeOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid value {text:?}: {e}"))),
    }
}
