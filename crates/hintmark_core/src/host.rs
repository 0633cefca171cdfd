//! Host editor capabilities.
//!
//! The core never touches buffers, pixels or widgets directly. Everything it
//! needs from the editor goes through [`AnchorHost`] and [`EditorHost`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::issue::{DocumentId, Position};
use crate::subscription::Subscription;

/// Grammar scopes the JavaScript linter understands.
pub const SUPPORTED_GRAMMARS: &[&str] = &["source.js", "source.jsx", "source.js.jsx"];

/// Grammar scopes that get the JSX pragma transform.
pub const JSX_GRAMMARS: &[&str] = &["source.jsx", "source.js.jsx"];

/// CSS-style class for the line body decoration.
pub const LINE_CLASS: &str = "hint-line";

/// CSS-style class for the gutter decoration.
pub const LINE_NUMBER_CLASS: &str = "hint-line-number";

/// Delay before a gutter tooltip appears.
pub const TOOLTIP_SHOW_DELAY: Duration = Duration::from_millis(200);

pub fn is_supported_grammar(scope: &str) -> bool {
    SUPPORTED_GRAMMARS.contains(&scope)
}

pub fn is_jsx_grammar(scope: &str) -> bool {
    JSX_GRAMMARS.contains(&scope)
}

/// What the host reports about a document at the start of a lint pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub text: String,
    /// `None` for unsaved buffers.
    pub path: Option<PathBuf>,
    /// Grammar scope name, e.g. `source.js`.
    pub grammar: String,
}

/// Where a decoration is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// The line body.
    Line,
    /// The gutter line number.
    LineNumber,
}

/// A visual tag attached to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub class: &'static str,
}

impl Decoration {
    pub fn line() -> Self {
        Self {
            kind: DecorationKind::Line,
            class: LINE_CLASS,
        }
    }

    pub fn line_number() -> Self {
        Self {
            kind: DecorationKind::LineNumber,
            class: LINE_NUMBER_CLASS,
        }
    }
}

/// Where a tooltip opens relative to its gutter glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPlacement {
    Top,
    Bottom,
}

/// A hover tooltip over a row's gutter glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub row: u32,
    pub text: String,
    pub placement: TooltipPlacement,
    pub show_delay: Duration,
}

impl Tooltip {
    /// A tooltip below the gutter glyph with the standard show delay.
    pub fn below_gutter(row: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            text: text.into(),
            placement: TooltipPlacement::Bottom,
            show_delay: TOOLTIP_SHOW_DELAY,
        }
    }
}

/// Document events the orchestrator listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentEvent {
    Modified,
    Saved,
    Scrolled,
    CursorMoved,
}

/// Row-bound markers.
pub trait AnchorHost {
    /// Opaque handle that follows its row across edits elsewhere in the buffer.
    type Anchor: Clone + PartialEq + fmt::Debug;

    /// Binds a new anchor to `row` of `doc`.
    fn mark_row(&mut self, doc: DocumentId, row: u32) -> Self::Anchor;

    /// Destroys an anchor and every decoration attached to it.
    fn destroy_anchor(&mut self, doc: DocumentId, anchor: Self::Anchor);

    /// Attaches a decoration to an anchor.
    fn decorate(&mut self, doc: DocumentId, anchor: &Self::Anchor, decoration: Decoration);
}

/// Everything else the core needs from the editor.
pub trait EditorHost: AnchorHost {
    /// The document with focus, if any.
    fn active_document(&self) -> Option<DocumentId>;

    /// Text, path and grammar of `doc`; `None` if it is not open.
    fn snapshot(&self, doc: DocumentId) -> Option<DocumentSnapshot>;

    fn cursor(&self, doc: DocumentId) -> Option<Position>;

    fn set_cursor(&mut self, doc: DocumentId, position: Position);

    /// Shows a tooltip until the returned subscription is released.
    fn show_tooltip(&mut self, doc: DocumentId, tooltip: Tooltip) -> Subscription;

    /// Starts delivering `event` for `doc` until the returned subscription is released.
    fn subscribe(&mut self, doc: DocumentId, event: DocumentEvent) -> Subscription;

    /// Sets the status bar text; `None` clears it.
    fn set_status_text(&mut self, text: Option<String>);
}
