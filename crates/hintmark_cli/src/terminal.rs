//! A headless editor host that prints annotations to the terminal.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use hintmark_core::{
    AnchorHost, Decoration, DecorationKind, DocumentEvent, DocumentId, DocumentSnapshot,
    EditorHost, Position, Subscription, Tooltip,
};

/// Maps a file extension to the grammar scope an editor would assign.
pub fn grammar_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("js" | "mjs" | "cjs") => "source.js",
        Some("jsx") => "source.jsx",
        _ => "text.plain",
    }
}

struct Buffer {
    path: PathBuf,
    text: String,
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    doc: DocumentId,
    row: u32,
    gutter: bool,
}

type Tooltips = Rc<RefCell<BTreeMap<u64, (DocumentId, Tooltip)>>>;
type Listeners = Rc<RefCell<HashMap<u64, (DocumentId, DocumentEvent)>>>;

/// Keeps documents, markers and tooltips in memory and renders them as text.
#[derive(Default)]
pub struct TerminalHost {
    buffers: HashMap<DocumentId, Buffer>,
    active: Option<DocumentId>,
    cursors: HashMap<DocumentId, Position>,
    markers: HashMap<u64, Marker>,
    tooltips: Tooltips,
    listeners: Listeners,
    status: Option<String>,
    next_id: u64,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` with `text` and focuses it.
    pub fn open(&mut self, doc: DocumentId, path: impl Into<PathBuf>, text: String) {
        self.buffers.insert(
            doc,
            Buffer {
                path: path.into(),
                text,
            },
        );
        self.active = Some(doc);
    }

    /// Replaces the text of an open document.
    pub fn update_text(&mut self, doc: DocumentId, text: String) {
        if let Some(buffer) = self.buffers.get_mut(&doc) {
            buffer.text = text;
        }
    }

    pub fn close(&mut self, doc: DocumentId) {
        self.buffers.remove(&doc);
        self.cursors.remove(&doc);
        if self.active == Some(doc) {
            self.active = None;
        }
    }

    /// Returns true if something asked to hear about `event` on `doc`.
    pub fn is_subscribed(&self, doc: DocumentId, event: DocumentEvent) -> bool {
        self.listeners
            .borrow()
            .values()
            .any(|listener| *listener == (doc, event))
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Annotated rows of `doc`, each with its source line and tooltip.
    pub fn report(&self, doc: DocumentId) -> String {
        let Some(buffer) = self.buffers.get(&doc) else {
            return String::new();
        };

        let gutter: HashSet<u32> = self
            .markers
            .values()
            .filter(|marker| marker.doc == doc && marker.gutter)
            .map(|marker| marker.row)
            .collect();
        let lines: Vec<&str> = buffer.text.lines().collect();
        let tooltips = self.tooltips.borrow();

        let mut out = String::new();
        let _ = writeln!(out, "{}:", buffer.path.display());
        for (_, tooltip) in tooltips.values().filter(|(owner, _)| *owner == doc) {
            let mark = if gutter.contains(&tooltip.row) { '>' } else { ' ' };
            let source = lines.get(tooltip.row as usize).copied().unwrap_or_default();
            let _ = writeln!(out, "{mark}{:>5} | {}", tooltip.row + 1, source);
            for entry in tooltip.text.lines() {
                let _ = writeln!(out, "        {entry}");
            }
        }
        if let Some(status) = &self.status {
            let _ = writeln!(out, "status: {status}");
        }
        out
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl AnchorHost for TerminalHost {
    type Anchor = u64;

    fn mark_row(&mut self, doc: DocumentId, row: u32) -> u64 {
        let id = self.next_id();
        self.markers.insert(
            id,
            Marker {
                doc,
                row,
                gutter: false,
            },
        );
        id
    }

    fn destroy_anchor(&mut self, _doc: DocumentId, anchor: u64) {
        self.markers.remove(&anchor);
    }

    fn decorate(&mut self, _doc: DocumentId, anchor: &u64, decoration: Decoration) {
        if decoration.kind == DecorationKind::LineNumber
            && let Some(marker) = self.markers.get_mut(anchor)
        {
            marker.gutter = true;
        }
    }
}

impl EditorHost for TerminalHost {
    fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    fn snapshot(&self, doc: DocumentId) -> Option<DocumentSnapshot> {
        self.buffers.get(&doc).map(|buffer| DocumentSnapshot {
            text: buffer.text.clone(),
            path: Some(buffer.path.clone()),
            grammar: grammar_for(&buffer.path).to_string(),
        })
    }

    fn cursor(&self, doc: DocumentId) -> Option<Position> {
        self.cursors.get(&doc).copied()
    }

    fn set_cursor(&mut self, doc: DocumentId, position: Position) {
        self.cursors.insert(doc, position);
    }

    fn show_tooltip(&mut self, doc: DocumentId, tooltip: Tooltip) -> Subscription {
        let id = self.next_id();
        self.tooltips.borrow_mut().insert(id, (doc, tooltip));
        let tooltips = Rc::clone(&self.tooltips);
        Subscription::new(move || {
            tooltips.borrow_mut().remove(&id);
        })
    }

    fn subscribe(&mut self, doc: DocumentId, event: DocumentEvent) -> Subscription {
        let id = self.next_id();
        self.listeners.borrow_mut().insert(id, (doc, event));
        let listeners = Rc::clone(&self.listeners);
        Subscription::new(move || {
            listeners.borrow_mut().remove(&id);
        })
    }

    fn set_status_text(&mut self, text: Option<String>) {
        self.status = text;
    }
}
