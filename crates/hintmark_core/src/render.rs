//! Turns stored diagnostics into decorations, tooltips and status text.

use std::collections::HashMap;

use tracing::debug;

use crate::anchors::AnchorManager;
use crate::host::{Decoration, EditorHost, Tooltip};
use crate::issue::{DocumentId, Issue};
use crate::store::DiagnosticStore;
use crate::subscription::SubscriptionGroup;

/// Draws diagnostics for one document at a time.
///
/// Anchors (and the decorations on them) persist across passes; tooltips are
/// cheap and are replaced wholesale on every render.
#[derive(Debug, Default)]
pub struct Renderer {
    tooltips: HashMap<DocumentId, SubscriptionGroup>,
    displayed: Option<(DocumentId, Issue)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the host's view of `doc` in line with the store.
    pub fn render<H: EditorHost>(
        &mut self,
        host: &mut H,
        store: &DiagnosticStore,
        anchors: &mut AnchorManager<H::Anchor>,
        doc: DocumentId,
    ) {
        let groups = store.get_diagnostics(doc);
        let rows = store.rows(doc);

        // Destroy before creating, so a row that stays diagnosed keeps its anchor.
        anchors.reconcile(host, doc, &rows);

        let tooltips = self.tooltips.entry(doc).or_default();
        tooltips.dispose();

        let mut created = 0;
        for (row, group) in groups {
            let (anchor, is_new) = anchors.create_anchor(host, doc, *row);
            if is_new {
                host.decorate(doc, &anchor, Decoration::line());
                host.decorate(doc, &anchor, Decoration::line_number());
                created += 1;
            }

            let tooltip = Tooltip::below_gutter(*row, group.tooltip_text());
            tooltips.add(host.show_tooltip(doc, tooltip));
        }

        if tooltips.is_empty() {
            self.tooltips.remove(&doc);
        }

        debug!(
            "Rendered {}: {} rows, {} new anchors",
            doc,
            groups.len(),
            created
        );

        self.update_status(host, store);
    }

    /// Shows the active document's most relevant issue in the status bar.
    ///
    /// Prefers the group on the cursor row, then the first group in row order.
    /// Clears the status bar when there is nothing to show.
    pub fn update_status<H: EditorHost>(&mut self, host: &mut H, store: &DiagnosticStore) {
        let shown = host.active_document().and_then(|doc| {
            let groups = store.get_diagnostics(doc);
            let cursor_row = host.cursor(doc).map(|position| position.row);
            cursor_row
                .and_then(|row| groups.get(&row))
                .or_else(|| groups.values().next())
                .map(|group| (doc, group.first().clone()))
        });

        host.set_status_text(shown.as_ref().map(|(_, issue)| issue.status_text()));
        self.displayed = shown;
    }

    /// The issue currently shown in the status bar and its document.
    pub fn displayed(&self) -> Option<(DocumentId, &Issue)> {
        self.displayed.as_ref().map(|(doc, issue)| (*doc, issue))
    }

    /// Releases the tooltips of `doc` and forgets its status entry.
    pub fn clear_document(&mut self, doc: DocumentId) {
        if let Some(mut tooltips) = self.tooltips.remove(&doc) {
            tooltips.dispose();
        }
        if self.displayed.as_ref().is_some_and(|(shown, _)| *shown == doc) {
            self.displayed = None;
        }
    }

    /// Number of live tooltips held for `doc`.
    pub fn tooltip_count(&self, doc: DocumentId) -> usize {
        self.tooltips.get(&doc).map_or(0, SubscriptionGroup::len)
    }
}
