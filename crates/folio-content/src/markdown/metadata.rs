//! Front matter metadata decoding.
//!
//! The metadata block is YAML. Pages normally use flat `key: value` pairs;
//! nested values are accepted and kept as-is for callers that want them.

use folio_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// Key holding the page description.
pub const DESCRIPTION_KEY: &str = "description";

/// Decoded front matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: Mapping,
}

impl Metadata {
    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the block declared no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the string keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().filter_map(Value::as_str)
    }

    /// Raw YAML value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value for a key. Non-string values yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Scalar value for a key, rendered as text.
    ///
    /// Strings are returned as-is, numbers and booleans in their YAML form.
    /// Null, sequences, and mappings yield `None`.
    pub fn get_scalar(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Get a string list field.
    ///
    /// Returns an empty vec if the field is missing or not a sequence.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The page description, if declared as a scalar.
    pub fn description(&self) -> Option<String> {
        self.get_scalar(DESCRIPTION_KEY)
    }

    /// Deserialize the metadata into a caller-defined type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use folio_content::markdown::decode_metadata;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct PageMeta {
    ///     description: String,
    ///     #[serde(default)]
    ///     draft: bool,
    /// }
    ///
    /// let metadata = decode_metadata("description: Hello\ndraft: true\n").unwrap();
    /// let meta: PageMeta = metadata.deserialize().unwrap();
    /// assert_eq!(meta.description, "Hello");
    /// assert!(meta.draft);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(Value::Mapping(self.fields.clone()))
            .map_err(|e| Error::serialization(format!("Failed to deserialize front matter: {e}")))
    }
}

/// Decode a metadata block.
///
/// An empty (or whitespace-only) block decodes to empty metadata.
///
/// # Errors
///
/// Returns [`Error::MetadataParse`] with the offending line when the block is
/// not valid YAML, or when its top level is not a `key: value` mapping.
///
/// # Example
///
/// ```rust
/// use folio_content::markdown::decode_metadata;
///
/// let metadata = decode_metadata("description: Routing basics\n").unwrap();
/// assert_eq!(metadata.description().as_deref(), Some("Routing basics"));
///
/// assert!(decode_metadata("just a sentence").is_err());
/// ```
pub fn decode_metadata(block: &str) -> Result<Metadata> {
    if block.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let value: Value = serde_yaml::from_str(block).map_err(|e| {
        let line = e.location().map(|loc| loc.line()).unwrap_or(1).max(1);
        Error::metadata_parse(line, line_at(block, line), e.to_string())
    })?;

    match value {
        Value::Mapping(fields) => Ok(Metadata { fields }),
        Value::Null => Ok(Metadata::default()),
        other => Err(Error::metadata_parse(
            1,
            line_at(block, 1),
            format!("expected `key: value` pairs, found {}", kind(&other)),
        )),
    }
}

/// Text of a 1-based line of the block.
fn line_at(block: &str, line: usize) -> &str {
    block
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or_default()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
