//! Per-row anchors of every open document.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::host::AnchorHost;
use crate::issue::DocumentId;

/// Tracks at most one anchor per (document, row).
///
/// Anchors are only destroyed when their row stops being diagnosed, never to
/// be recreated in the same pass: recreating one would reset the host's hover
/// state and flicker the gutter.
#[derive(Debug)]
pub struct AnchorManager<A> {
    documents: HashMap<DocumentId, BTreeMap<u32, A>>,
}

impl<A: Clone> AnchorManager<A> {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Destroys every anchor of `doc` whose row is not in `diagnosed_rows`.
    ///
    /// Rows that are diagnosed but have no anchor are left to
    /// [`AnchorManager::create_anchor`]. Returns the number of anchors destroyed.
    pub fn reconcile<H>(
        &mut self,
        host: &mut H,
        doc: DocumentId,
        diagnosed_rows: &BTreeSet<u32>,
    ) -> usize
    where
        H: AnchorHost<Anchor = A>,
    {
        let Some(anchors) = self.documents.get_mut(&doc) else {
            return 0;
        };

        let stale: Vec<u32> = anchors
            .keys()
            .filter(|row| !diagnosed_rows.contains(row))
            .copied()
            .collect();

        for row in &stale {
            if let Some(anchor) = anchors.remove(row) {
                host.destroy_anchor(doc, anchor);
            }
        }

        if anchors.is_empty() {
            self.documents.remove(&doc);
        }

        if !stale.is_empty() {
            debug!("Destroyed {} anchors in {}", stale.len(), doc);
        }
        stale.len()
    }

    /// Returns the anchor at `row`, asking the host for a new one if needed.
    ///
    /// The flag is true when the anchor was created by this call.
    pub fn create_anchor<H>(&mut self, host: &mut H, doc: DocumentId, row: u32) -> (A, bool)
    where
        H: AnchorHost<Anchor = A>,
    {
        match self.documents.entry(doc).or_default().entry(row) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => (entry.insert(host.mark_row(doc, row)).clone(), true),
        }
    }

    pub fn get_anchor(&self, doc: DocumentId, row: u32) -> Option<&A> {
        self.documents.get(&doc).and_then(|anchors| anchors.get(&row))
    }

    /// Destroys every anchor of `doc`. Unknown documents are a no-op.
    pub fn remove_all_for_document<H>(&mut self, host: &mut H, doc: DocumentId)
    where
        H: AnchorHost<Anchor = A>,
    {
        let Some(anchors) = self.documents.remove(&doc) else {
            return;
        };

        debug!("Destroying {} anchors of closed {}", anchors.len(), doc);
        for anchor in anchors.into_values() {
            host.destroy_anchor(doc, anchor);
        }
    }

    /// Anchored rows of `doc`, ascending.
    pub fn rows(&self, doc: DocumentId) -> BTreeSet<u32> {
        self.documents
            .get(&doc)
            .map(|anchors| anchors.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of anchors held for `doc`.
    pub fn count(&self, doc: DocumentId) -> usize {
        self.documents.get(&doc).map_or(0, BTreeMap::len)
    }

    /// Returns true if no document holds any anchor.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<A: Clone> Default for AnchorManager<A> {
    fn default() -> Self {
        Self::new()
    }
}
