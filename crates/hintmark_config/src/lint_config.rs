//! Resolved JSHint options for one document.

use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde_json::{Map, Value};

use crate::ConfigError;

/// Key JSHint's own loader injects to remember where a config came from.
/// The linter rejects it as an unknown option, so it never leaves this crate.
const DIRNAME_KEY: &str = "dirname";

/// JSHint options resolved for a file, plus where they were found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintConfig {
    options: Map<String, Value>,
    source: Option<PathBuf>,
}

impl LintConfig {
    /// Creates an empty configuration with no source ("lint with defaults").
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from raw options, stripping internal keys.
    pub fn from_options(mut options: Map<String, Value>) -> Self {
        options.remove(DIRNAME_KEY);
        Self {
            options,
            source: None,
        }
    }

    /// Parses options from JSON text. Comments are allowed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse_object(json).map(Self::from_options)
    }

    /// Records the file this configuration was discovered in.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The options to hand to the linter.
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// The `globals` sub-object, if declared.
    pub fn globals(&self) -> Option<&Map<String, Value>> {
        self.options.get("globals").and_then(Value::as_object)
    }

    /// The file the configuration came from, if one was discovered.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns true if a configuration file was discovered for the document.
    pub fn is_discovered(&self) -> bool {
        self.source.is_some()
    }

    /// Returns true if there are no options at all.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Serializes the options as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.options.clone())
    }
}

/// Parses JSONC text whose root must be an object.
pub(crate) fn parse_object(content: &str) -> Result<Map<String, Value>, ConfigError> {
    let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| ConfigError::parse(e.to_string()))?;

    match value {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ConfigError::invalid("root must be an object")),
        None => Ok(Map::new()),
    }
}
