//! # hintmark_config
//!
//! Configuration layer for hintmark.
//!
//! This crate provides:
//! - JSHint configuration discovery (`package.json`, `.jshintrc`, `~/.jshintrc`)
//! - `extends` chains between `.jshintrc` files
//! - `.jshintignore` matching
//! - Plugin settings (`onlyConfig`, `validateOnlyOnSave`, `supportLintingJsx`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use hintmark_config::ConfigLoader;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.resolve("src/app.js");
//! if let Some(globals) = config.globals() {
//!     println!("{} globals declared", globals.len());
//! }
//! ```

mod error;
mod ignore_rules;
mod lint_config;
mod loader;
mod settings;

pub use error::ConfigError;
pub use ignore_rules::IgnoreRules;
pub use lint_config::LintConfig;
pub use loader::ConfigLoader;
pub use settings::{DebounceSettings, PluginSettings};
