//! # hintmark_core
//!
//! Incremental JSHint diagnostics for editor hosts.
//!
//! This crate provides:
//! - Issue aggregation into per-row line groups
//! - A diagnostic store keyed by document
//! - Anchor reconciliation that never recreates a still-diagnosed row
//! - Decoration, tooltip and status bar rendering through an [`EditorHost`]
//! - The debounced [`LintOrchestrator`] that ties them together
//!
//! ## Example
//!
//! ```rust,ignore
//! use hintmark_core::{ConfigLoader, LintOrchestrator, Linters, PluginSettings};
//!
//! let mut orchestrator = LintOrchestrator::new(
//!     host,
//!     Linters::new(jshint, jsxhint),
//!     ConfigLoader::new(),
//!     PluginSettings::default(),
//! );
//!
//! orchestrator.on_document_activated(doc);
//! for (row, group) in orchestrator.diagnostics().get_diagnostics(doc) {
//!     println!("{}: {}", row + 1, group.tooltip_text());
//! }
//! ```

mod aggregate;
mod anchors;
mod config_source;
pub mod debounce;
mod error;
pub mod host;
mod issue;
mod linter;
mod orchestrator;
mod pragma;
mod render;
mod store;
mod subscription;

pub use aggregate::{aggregate, compensate_line_shift};
pub use anchors::AnchorManager;
pub use config_source::ConfigSource;
pub use debounce::Debouncer;
pub use error::LintError;
pub use host::{
    AnchorHost, Decoration, DecorationKind, DocumentEvent, DocumentSnapshot, EditorHost, Tooltip,
    TooltipPlacement,
};
pub use issue::{DocumentId, Issue, LineGroup, LineGroups, Position, normalize_line};
pub use linter::{LinterAdapter, LinterFlavor, Linters};
pub use orchestrator::{DocumentState, LintOrchestrator, PassOutcome, SkipReason, TickReport};
pub use pragma::{JSX_PRAGMA, Transformed, add_jsx_pragma};
pub use render::Renderer;
pub use store::DiagnosticStore;
pub use subscription::{Subscription, SubscriptionGroup};

pub use hintmark_config::{ConfigLoader, DebounceSettings, LintConfig, PluginSettings};
