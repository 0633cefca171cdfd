//! `watch` command: re-lint a file every time it is saved.
//!
//! Saves are detected by polling the file's modification time. Each change is
//! fed to the orchestrator as a save event, and the debouncers decide when the
//! lint pass actually runs.

use std::future::Future;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

use miette::{IntoDiagnostic, Result, WrapErr};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use hintmark_core::{DocumentEvent, DocumentId, LintOrchestrator};

use crate::terminal::TerminalHost;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

const DOC: DocumentId = DocumentId(1);

pub fn run(file: &Path, orchestrator: LintOrchestrator<TerminalHost>) -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?
        .block_on(watch_file(file, orchestrator, tokio::signal::ctrl_c()))
        .map(|_| ())
}

/// Watches `file` until `shutdown` resolves, then closes the document.
async fn watch_file(
    file: &Path,
    mut orchestrator: LintOrchestrator<TerminalHost>,
    shutdown: impl Future<Output = io::Result<()>>,
) -> Result<LintOrchestrator<TerminalHost>> {
    let text = tokio::fs::read_to_string(file)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;

    orchestrator.host_mut().open(DOC, file, text);
    orchestrator.on_document_activated(DOC);
    print!("{}", orchestrator.host().report(DOC));
    info!("Watching {} (Ctrl-C to stop)", file.display());

    let mut last_modified = modified_time(file).await;
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        let deadline = orchestrator
            .next_deadline()
            .map(tokio::time::Instant::from_std);

        tokio::select! {
            _ = poll.tick() => {
                let modified = modified_time(file).await;
                if modified != last_modified {
                    last_modified = modified;
                    reload(file, &mut orchestrator).await;
                }
            }
            _ = sleep_until(deadline) => {
                let report = orchestrator.tick(Instant::now());
                if !report.is_empty() {
                    print!("{}", orchestrator.host().report(DOC));
                }
            }
            result = &mut shutdown => {
                result.into_diagnostic()?;
                info!("Stopped watching {}", file.display());
                break;
            }
        }
    }

    orchestrator.on_document_closed(DOC);
    orchestrator.host_mut().close(DOC);
    Ok(orchestrator)
}

async fn reload(file: &Path, orchestrator: &mut LintOrchestrator<TerminalHost>) {
    match tokio::fs::read_to_string(file).await {
        Ok(text) => {
            orchestrator.host_mut().update_text(DOC, text);
            if orchestrator.host().is_subscribed(DOC, DocumentEvent::Saved) {
                orchestrator.on_save(DOC, Instant::now());
            }
        }
        Err(e) => warn!("Failed to read {}: {}", file.display(), e),
    }
}

async fn modified_time(file: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(file).await.ok()?.modified().ok()
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
