//! Per-document diagnostics.

use std::collections::{BTreeSet, HashMap};

use crate::issue::{DocumentId, LineGroup, LineGroups};

static EMPTY: LineGroups = LineGroups::new();

/// Current diagnostics of every open document.
///
/// Each lint pass replaces a document's entry wholesale.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    documents: HashMap<DocumentId, LineGroups>,
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything known about `doc`.
    pub fn set_diagnostics(&mut self, doc: DocumentId, groups: LineGroups) {
        self.documents.insert(doc, groups);
    }

    /// Diagnostics for `doc`; empty if it was never linted or was cleared.
    pub fn get_diagnostics(&self, doc: DocumentId) -> &LineGroups {
        self.documents.get(&doc).unwrap_or(&EMPTY)
    }

    /// Forgets `doc`. Clearing an unknown document is a no-op.
    pub fn clear_diagnostics(&mut self, doc: DocumentId) {
        self.documents.remove(&doc);
    }

    /// Rows of `doc` that have at least one issue, ascending.
    pub fn rows(&self, doc: DocumentId) -> BTreeSet<u32> {
        self.get_diagnostics(doc).keys().copied().collect()
    }

    pub fn group(&self, doc: DocumentId, row: u32) -> Option<&LineGroup> {
        self.get_diagnostics(doc).get(&row)
    }

    /// The group on the lowest diagnosed row.
    pub fn first_group(&self, doc: DocumentId) -> Option<(u32, &LineGroup)> {
        self.get_diagnostics(doc)
            .iter()
            .next()
            .map(|(row, group)| (*row, group))
    }

    /// Returns true if `doc` has an entry, even an empty one.
    pub fn contains(&self, doc: DocumentId) -> bool {
        self.documents.contains_key(&doc)
    }

    /// Number of documents with an entry.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
