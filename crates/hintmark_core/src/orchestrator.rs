//! The lint control loop.
//!
//! The host forwards editor events to a [`LintOrchestrator`] and calls
//! [`LintOrchestrator::tick`] whenever it wakes up. Edits and saves go
//! through the lint debouncer, scrolling through the render debouncer and
//! cursor moves through the status debouncer, so scrolling never re-lints and
//! cursor moves never touch anchors.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use hintmark_config::{LintConfig, PluginSettings};

use crate::aggregate::{aggregate, compensate_line_shift};
use crate::anchors::AnchorManager;
use crate::config_source::ConfigSource;
use crate::debounce::Debouncer;
use crate::host::{DocumentEvent, EditorHost, is_jsx_grammar, is_supported_grammar};
use crate::issue::{DocumentId, Position};
use crate::linter::{LinterFlavor, Linters};
use crate::pragma::{Transformed, add_jsx_pragma};
use crate::render::Renderer;
use crate::store::DiagnosticStore;
use crate::subscription::SubscriptionGroup;

/// Lint state of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Nothing pending and nothing rendered.
    Clean,
    /// A linter invocation is in flight.
    Linting,
    /// The last pass has been rendered.
    Annotated,
}

/// Why a lint pass did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host does not know the document.
    NoDocument,
    /// The document's grammar is not JavaScript.
    UnsupportedGrammar,
    /// `onlyConfig` is set and no configuration file was found.
    NoConfig,
}

/// What a call to [`LintOrchestrator::run_lint_pass`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Nothing changed.
    Skipped(SkipReason),
    /// The file is excluded by `.jshintignore`; its diagnostics were cleared.
    Ignored,
    /// The linter ran and `rows` rows are now diagnosed.
    Linted { rows: usize },
}

/// Work fired by one [`LintOrchestrator::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub linted: Vec<DocumentId>,
    pub rendered: Vec<DocumentId>,
    pub status_updated: bool,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.linted.is_empty() && self.rendered.is_empty() && !self.status_updated
    }
}

/// Owns the diagnostic state of every open document and drives the host.
pub struct LintOrchestrator<H: EditorHost> {
    host: H,
    linters: Linters,
    config: Box<dyn ConfigSource>,
    settings: PluginSettings,
    store: DiagnosticStore,
    anchors: AnchorManager<H::Anchor>,
    renderer: Renderer,
    states: HashMap<DocumentId, DocumentState>,
    triggers: HashMap<DocumentId, SubscriptionGroup>,
    lint_debounce: Debouncer<DocumentId>,
    render_debounce: Debouncer<DocumentId>,
    status_debounce: Debouncer<()>,
}

impl<H: EditorHost> LintOrchestrator<H> {
    pub fn new(
        host: H,
        linters: Linters,
        config: impl ConfigSource + 'static,
        settings: PluginSettings,
    ) -> Self {
        Self {
            host,
            linters,
            config: Box::new(config),
            store: DiagnosticStore::new(),
            anchors: AnchorManager::new(),
            renderer: Renderer::new(),
            states: HashMap::new(),
            triggers: HashMap::new(),
            lint_debounce: Debouncer::new(settings.debounce.lint()),
            render_debounce: Debouncer::new(settings.debounce.render()),
            status_debounce: Debouncer::new(settings.debounce.status()),
            settings,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn diagnostics(&self) -> &DiagnosticStore {
        &self.store
    }

    pub fn anchors(&self) -> &AnchorManager<H::Anchor> {
        &self.anchors
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn state(&self, doc: DocumentId) -> Option<DocumentState> {
        self.states.get(&doc).copied()
    }

    // ---- events -------------------------------------------------------

    /// A document was opened: wire its triggers and lint it soon.
    pub fn on_document_opened(&mut self, doc: DocumentId, now: Instant) {
        self.register_triggers(doc);
        self.states.entry(doc).or_insert(DocumentState::Clean);
        self.lint_debounce.schedule(doc, now);
    }

    /// Focus moved to `doc`: lint it right away.
    pub fn on_document_activated(&mut self, doc: DocumentId) -> PassOutcome {
        if !self.triggers.contains_key(&doc) {
            self.register_triggers(doc);
        }
        self.lint_debounce.cancel(doc);

        let outcome = self.run_lint_pass(doc);
        if let PassOutcome::Skipped(_) = outcome {
            self.renderer.update_status(&mut self.host, &self.store);
        }
        outcome
    }

    /// The buffer changed. Ignored when linting on save only.
    pub fn on_edit(&mut self, doc: DocumentId, now: Instant) {
        if self.settings.validate_only_on_save {
            debug!("Edit in {} ignored: linting on save only", doc);
            return;
        }
        self.lint_debounce.schedule(doc, now);
    }

    pub fn on_save(&mut self, doc: DocumentId, now: Instant) {
        self.lint_debounce.schedule(doc, now);
    }

    /// The view scrolled; gutter elements may have been recycled.
    pub fn on_scroll(&mut self, doc: DocumentId, now: Instant) {
        self.render_debounce.schedule(doc, now);
    }

    pub fn on_cursor_moved(&mut self, _doc: DocumentId, now: Instant) {
        self.status_debounce.schedule((), now);
    }

    /// Purges everything held for `doc`. Safe to call more than once.
    pub fn on_document_closed(&mut self, doc: DocumentId) {
        if let Some(mut triggers) = self.triggers.remove(&doc) {
            triggers.dispose();
        }
        self.lint_debounce.cancel(doc);
        self.render_debounce.cancel(doc);
        self.forget_diagnostics(doc);
        self.states.remove(&doc);
        self.renderer.update_status(&mut self.host, &self.store);
    }

    /// Applies new settings, re-wires every document and re-lints the active one.
    pub fn on_config_changed(&mut self, settings: PluginSettings) -> Option<PassOutcome> {
        self.settings = settings;
        self.lint_debounce.set_delay(settings.debounce.lint());
        self.render_debounce.set_delay(settings.debounce.render());
        self.status_debounce.set_delay(settings.debounce.status());
        self.config.invalidate();

        let mut docs: Vec<DocumentId> = self.triggers.keys().copied().collect();
        docs.sort_unstable();
        for doc in docs {
            self.register_triggers(doc);
        }

        self.lint_now()
    }

    /// Runs whatever the debouncers say is due.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        for doc in self.lint_debounce.take_due(now) {
            if matches!(self.run_lint_pass(doc), PassOutcome::Linted { .. }) {
                report.linted.push(doc);
            }
        }

        for doc in self.render_debounce.take_due(now) {
            // A pass in this tick already rendered it.
            if report.linted.contains(&doc) {
                continue;
            }
            self.renderer
                .render(&mut self.host, &self.store, &mut self.anchors, doc);
            report.rendered.push(doc);
        }

        if !self.status_debounce.take_due(now).is_empty() {
            self.renderer.update_status(&mut self.host, &self.store);
            report.status_updated = true;
        }

        report
    }

    /// When the host should call [`LintOrchestrator::tick`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.lint_debounce.next_deadline(),
            self.render_debounce.next_deadline(),
            self.status_debounce.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // ---- commands -----------------------------------------------------

    /// Lints the active document immediately.
    pub fn lint_now(&mut self) -> Option<PassOutcome> {
        let doc = self.host.active_document()?;
        self.lint_debounce.cancel(doc);
        Some(self.run_lint_pass(doc))
    }

    /// Moves the cursor to the first diagnosed row at or after it, wrapping
    /// around to the first diagnosed row.
    pub fn go_to_next_diagnostic(&mut self) -> Option<Position> {
        let doc = self.host.active_document()?;
        let cursor_row = self.host.cursor(doc).map_or(0, |position| position.row);
        let groups = self.store.get_diagnostics(doc);

        let (_, group) = groups
            .range(cursor_row..)
            .next()
            .or_else(|| groups.iter().next())?;
        let target = group.first().position();

        self.host.set_cursor(doc, target);
        self.renderer.update_status(&mut self.host, &self.store);
        Some(target)
    }

    /// Moves the cursor onto the issue shown in the status bar.
    pub fn go_to_displayed_diagnostic(&mut self) -> Option<Position> {
        let (doc, issue) = self.renderer.displayed()?;
        if self.host.active_document() != Some(doc) {
            return None;
        }

        let target = issue.position();
        self.host.set_cursor(doc, target);
        Some(target)
    }

    // ---- lint pass ----------------------------------------------------

    /// Resolves configuration, lints, aggregates, stores and renders `doc`.
    pub fn run_lint_pass(&mut self, doc: DocumentId) -> PassOutcome {
        let Some(snapshot) = self.host.snapshot(doc) else {
            debug!("Skipping {}: not open", doc);
            return PassOutcome::Skipped(SkipReason::NoDocument);
        };

        if !is_supported_grammar(&snapshot.grammar) {
            debug!("Skipping {}: grammar {}", doc, snapshot.grammar);
            return PassOutcome::Skipped(SkipReason::UnsupportedGrammar);
        }

        if let Some(path) = snapshot.path.as_deref()
            && self.config.is_ignored(path)
        {
            debug!("Skipping {}: {} is ignored", doc, path.display());
            self.forget_diagnostics(doc);
            self.renderer.update_status(&mut self.host, &self.store);
            self.states.insert(doc, DocumentState::Clean);
            return PassOutcome::Ignored;
        }

        let config = snapshot
            .path
            .as_deref()
            .map(|path| self.config.resolve(path))
            .unwrap_or_else(LintConfig::new);

        if self.settings.only_config && !config.is_discovered() {
            debug!("Skipping {}: no config file and onlyConfig is set", doc);
            return PassOutcome::Skipped(SkipReason::NoConfig);
        }

        self.states.insert(doc, DocumentState::Linting);

        let (flavor, transformed) = if self.settings.support_linting_jsx {
            let transformed = if is_jsx_grammar(&snapshot.grammar) {
                add_jsx_pragma(&snapshot.text)
            } else {
                Transformed::identity(&snapshot.text)
            };
            (LinterFlavor::Jsx, transformed)
        } else {
            (LinterFlavor::Plain, Transformed::identity(&snapshot.text))
        };

        let linter = self.linters.get(flavor);
        let mut issues = match linter.lint(&transformed.source, &config, config.globals()) {
            Ok(issues) => issues,
            Err(e) => {
                debug!("{} failed on {}: {}", linter.name(), doc, e);
                Vec::new()
            }
        };
        compensate_line_shift(&mut issues, transformed.added_lines);

        let groups = aggregate(issues);
        let rows = groups.len();
        self.store.set_diagnostics(doc, groups);
        self.renderer
            .render(&mut self.host, &self.store, &mut self.anchors, doc);
        self.states.insert(doc, DocumentState::Annotated);

        PassOutcome::Linted { rows }
    }

    // ---- internals ----------------------------------------------------

    fn register_triggers(&mut self, doc: DocumentId) {
        if let Some(mut previous) = self.triggers.remove(&doc) {
            previous.dispose();
        }

        let mut events = vec![
            DocumentEvent::Saved,
            DocumentEvent::Scrolled,
            DocumentEvent::CursorMoved,
        ];
        if !self.settings.validate_only_on_save {
            events.insert(0, DocumentEvent::Modified);
        }

        let mut group = SubscriptionGroup::new();
        for event in events {
            group.add(self.host.subscribe(doc, event));
        }
        self.triggers.insert(doc, group);
    }

    fn forget_diagnostics(&mut self, doc: DocumentId) {
        self.store.clear_diagnostics(doc);
        self.anchors.remove_all_for_document(&mut self.host, doc);
        self.renderer.clear_document(doc);
    }
}
