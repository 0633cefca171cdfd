//! Plugin settings.

use std::fs;
use std::path::Path;
use std::time::Duration;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default delay before an edit triggers a lint pass.
pub const DEFAULT_LINT_DEBOUNCE_MS: u64 = 50;

/// Default delay before a scroll triggers a re-render.
pub const DEFAULT_RENDER_DEBOUNCE_MS: u64 = 200;

/// Default delay before a cursor move refreshes the status bar.
pub const DEFAULT_STATUS_DEBOUNCE_MS: u64 = 100;

/// User-facing plugin options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginSettings {
    /// Skip linting when no configuration file was discovered.
    pub only_config: bool,

    /// Lint on save only; edits do not trigger a pass.
    pub validate_only_on_save: bool,

    /// Use the JSX-aware linter and the pragma transform for JSX documents.
    #[serde(alias = "transformJsx")]
    pub support_linting_jsx: bool,

    /// Debounce windows for the event triggers.
    pub debounce: DebounceSettings,
}

impl PluginSettings {
    /// Loads settings from a JSON file. Comments are allowed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::from_json(&content)
    }

    /// Parses settings from JSON text. Comments are allowed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| ConfigError::parse(e.to_string()))?;

        match value {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ConfigError::invalid(format!("Invalid settings: {}", e))),
            None => Ok(Self::default()),
        }
    }
}

/// Debounce windows, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebounceSettings {
    /// Edit/save -> lint pass.
    pub lint_ms: u64,
    /// Scroll -> render pass.
    pub render_ms: u64,
    /// Cursor move -> status update.
    pub status_ms: u64,
}

impl DebounceSettings {
    pub fn lint(&self) -> Duration {
        Duration::from_millis(self.lint_ms)
    }

    pub fn render(&self) -> Duration {
        Duration::from_millis(self.render_ms)
    }

    pub fn status(&self) -> Duration {
        Duration::from_millis(self.status_ms)
    }
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            lint_ms: DEFAULT_LINT_DEBOUNCE_MS,
            render_ms: DEFAULT_RENDER_DEBOUNCE_MS,
            status_ms: DEFAULT_STATUS_DEBOUNCE_MS,
        }
    }
}
