#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use hintmark_core::{
    AnchorHost, ConfigSource, Decoration, DocumentEvent, DocumentId, DocumentSnapshot, EditorHost,
    Issue, LintConfig, LintError, LinterAdapter, Position, Subscription, Tooltip,
};
use serde_json::{Map, Value};

/// An in-memory editor that records everything the core asks of it.
#[derive(Default)]
pub struct MockHost {
    pub documents: HashMap<DocumentId, DocumentSnapshot>,
    pub active: Option<DocumentId>,
    pub cursors: HashMap<DocumentId, Position>,
    pub status: Option<String>,
    pub anchors: BTreeMap<u64, (DocumentId, u32)>,
    pub marked: Vec<(DocumentId, u32)>,
    pub destroyed: Vec<(DocumentId, u32)>,
    pub decorations: Vec<(u64, Decoration)>,
    tooltips: Rc<RefCell<Vec<(u64, DocumentId, Tooltip)>>>,
    subscriptions: Rc<RefCell<Vec<(u64, DocumentId, DocumentEvent)>>>,
    next_id: u64,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a document and focuses it.
    pub fn open(&mut self, doc: DocumentId, text: &str, path: Option<&Path>, grammar: &str) {
        self.documents.insert(
            doc,
            DocumentSnapshot {
                text: text.to_string(),
                path: path.map(Path::to_path_buf),
                grammar: grammar.to_string(),
            },
        );
        self.active = Some(doc);
    }

    pub fn close(&mut self, doc: DocumentId) {
        self.documents.remove(&doc);
        if self.active == Some(doc) {
            self.active = None;
        }
    }

    pub fn move_cursor(&mut self, doc: DocumentId, row: u32, column: u32) {
        self.cursors.insert(doc, Position::new(row, column));
    }

    pub fn cursor_at(&self, doc: DocumentId) -> Option<Position> {
        self.cursors.get(&doc).copied()
    }

    /// Rows of `doc` that currently hold a live anchor.
    pub fn anchored_rows(&self, doc: DocumentId) -> Vec<u32> {
        let mut rows: Vec<u32> = self
            .anchors
            .values()
            .filter(|(owner, _)| *owner == doc)
            .map(|(_, row)| *row)
            .collect();
        rows.sort_unstable();
        rows
    }

    pub fn anchor_at(&self, doc: DocumentId, row: u32) -> Option<u64> {
        self.anchors
            .iter()
            .find(|(_, (owner, anchored))| *owner == doc && *anchored == row)
            .map(|(id, _)| *id)
    }

    /// Tooltips of `doc` that have not been released, in row order.
    pub fn live_tooltips(&self, doc: DocumentId) -> Vec<Tooltip> {
        let mut tooltips: Vec<Tooltip> = self
            .tooltips
            .borrow()
            .iter()
            .filter(|(_, owner, _)| *owner == doc)
            .map(|(_, _, tooltip)| tooltip.clone())
            .collect();
        tooltips.sort_by_key(|tooltip| tooltip.row);
        tooltips
    }

    /// Events `doc` is currently subscribed to.
    pub fn live_subscriptions(&self, doc: DocumentId) -> Vec<DocumentEvent> {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|(_, owner, _)| *owner == doc)
            .map(|(_, _, event)| *event)
            .collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl AnchorHost for MockHost {
    type Anchor = u64;

    fn mark_row(&mut self, doc: DocumentId, row: u32) -> u64 {
        let id = self.next_id();
        self.anchors.insert(id, (doc, row));
        self.marked.push((doc, row));
        id
    }

    fn destroy_anchor(&mut self, _doc: DocumentId, anchor: u64) {
        if let Some(entry) = self.anchors.remove(&anchor) {
            self.destroyed.push(entry);
        }
        self.decorations.retain(|(owner, _)| *owner != anchor);
    }

    fn decorate(&mut self, _doc: DocumentId, anchor: &u64, decoration: Decoration) {
        self.decorations.push((*anchor, decoration));
    }
}

impl EditorHost for MockHost {
    fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    fn snapshot(&self, doc: DocumentId) -> Option<DocumentSnapshot> {
        self.documents.get(&doc).cloned()
    }

    fn cursor(&self, doc: DocumentId) -> Option<Position> {
        self.cursors.get(&doc).copied()
    }

    fn set_cursor(&mut self, doc: DocumentId, position: Position) {
        self.cursors.insert(doc, position);
    }

    fn show_tooltip(&mut self, doc: DocumentId, tooltip: Tooltip) -> Subscription {
        let id = self.next_id();
        self.tooltips.borrow_mut().push((id, doc, tooltip));
        let tooltips = Rc::clone(&self.tooltips);
        Subscription::new(move || tooltips.borrow_mut().retain(|(live, _, _)| *live != id))
    }

    fn subscribe(&mut self, doc: DocumentId, event: DocumentEvent) -> Subscription {
        let id = self.next_id();
        self.subscriptions.borrow_mut().push((id, doc, event));
        let subscriptions = Rc::clone(&self.subscriptions);
        Subscription::new(move || subscriptions.borrow_mut().retain(|(live, _, _)| *live != id))
    }

    fn set_status_text(&mut self, text: Option<String>) {
        self.status = text;
    }
}

/// What a [`ScriptedLinter`] was asked to lint.
#[derive(Debug, Clone)]
pub struct LintCall {
    pub source: String,
    pub globals: Option<Map<String, Value>>,
}

/// Test-side handle to a [`ScriptedLinter`].
#[derive(Clone, Default)]
pub struct Script {
    response: Rc<RefCell<Option<Vec<Option<Issue>>>>>,
    calls: Rc<RefCell<Vec<LintCall>>>,
}

impl Script {
    /// The next invocations report `issues`.
    pub fn respond(&self, issues: Vec<Option<Issue>>) {
        *self.response.borrow_mut() = Some(issues);
    }

    /// The next invocations fail.
    pub fn fail(&self) {
        *self.response.borrow_mut() = None;
    }

    pub fn calls(&self) -> Vec<LintCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

/// A linter whose report is set by the test.
pub struct ScriptedLinter {
    name: &'static str,
    script: Script,
}

impl ScriptedLinter {
    pub fn new(name: &'static str) -> (Self, Script) {
        let script = Script::default();
        script.respond(Vec::new());
        (
            Self {
                name,
                script: script.clone(),
            },
            script,
        )
    }
}

impl LinterAdapter for ScriptedLinter {
    fn name(&self) -> &str {
        self.name
    }

    fn lint(
        &self,
        source: &str,
        _config: &LintConfig,
        globals: Option<&Map<String, Value>>,
    ) -> Result<Vec<Option<Issue>>, LintError> {
        self.script.calls.borrow_mut().push(LintCall {
            source: source.to_string(),
            globals: globals.cloned(),
        });
        self.script
            .response
            .borrow()
            .clone()
            .ok_or_else(|| LintError::failed("scripted failure"))
    }
}

/// A fixed configuration for every file.
#[derive(Clone, Default)]
pub struct StaticConfig {
    pub config: LintConfig,
    pub ignored: Vec<PathBuf>,
    pub invalidations: Rc<Cell<usize>>,
}

impl StaticConfig {
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }
}

impl ConfigSource for StaticConfig {
    fn resolve(&self, _path: &Path) -> LintConfig {
        self.config.clone()
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignored.iter().any(|ignored| ignored == path)
    }

    fn invalidate(&self) {
        self.invalidations.set(self.invalidations.get() + 1);
    }
}
