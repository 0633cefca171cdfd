//! hintmark CLI
//!
//! Lints JavaScript files with JSHint and prints the annotated rows.

mod jshint;
mod terminal;
mod watch;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hintmark_core::{
    ConfigLoader, DocumentId, LintOrchestrator, Linters, PassOutcome, PluginSettings,
};

use crate::jshint::JshintCommand;
use crate::terminal::TerminalHost;

/// hintmark - JSHint annotations, one row at a time
#[derive(Parser)]
#[command(name = "hintmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files and print their annotations
    Lint {
        /// Files to lint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: LintOptions,
    },

    /// Re-lint a file every time it is saved
    Watch {
        /// File to watch
        file: PathBuf,

        #[command(flatten)]
        options: LintOptions,
    },
}

#[derive(Args)]
struct LintOptions {
    /// Use the JSX-aware linter and add the JSX pragma to .jsx files
    #[arg(long)]
    jsx: bool,

    /// Skip files not covered by a JSHint configuration file
    #[arg(long)]
    only_config: bool,

    /// Plugin settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// JSHint executable
    #[arg(long, value_name = "PROGRAM", default_value = "jshint")]
    jshint: String,

    /// JSX-aware JSHint executable
    #[arg(long, value_name = "PROGRAM", default_value = "jsxhint")]
    jsxhint: String,
}

impl LintOptions {
    fn settings(&self) -> Result<PluginSettings> {
        let mut settings = match &self.settings {
            Some(path) => PluginSettings::from_file(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to load settings {}", path.display()))?,
            None => PluginSettings::default(),
        };

        settings.only_config |= self.only_config;
        settings.support_linting_jsx |= self.jsx;
        Ok(settings)
    }

    fn orchestrator(&self) -> Result<LintOrchestrator<TerminalHost>> {
        let linters = Linters::new(
            JshintCommand::new(&self.jshint),
            JshintCommand::new(&self.jsxhint),
        );

        Ok(LintOrchestrator::new(
            TerminalHost::new(),
            linters,
            ConfigLoader::new(),
            self.settings()?,
        ))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_issues) => {
            if has_issues {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint { files, options } => run_lint(files, options),
        Commands::Watch { file, options } => {
            watch::run(file, options.orchestrator()?).map(|_| false)
        }
    }
}

fn run_lint(files: &[PathBuf], options: &LintOptions) -> Result<bool> {
    let mut orchestrator = options.orchestrator()?;
    let mut has_issues = false;

    for (index, file) in files.iter().enumerate() {
        let doc = DocumentId(index as u64 + 1);
        let text = fs::read_to_string(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", file.display()))?;

        orchestrator.host_mut().open(doc, file, text);
        match orchestrator.on_document_activated(doc) {
            PassOutcome::Linted { rows } => {
                if rows > 0 {
                    has_issues = true;
                    print!("{}", orchestrator.host().report(doc));
                }
            }
            PassOutcome::Ignored => info!("{} is ignored", file.display()),
            PassOutcome::Skipped(reason) => info!("Skipped {}: {:?}", file.display(), reason),
        }

        orchestrator.on_document_closed(doc);
        orchestrator.host_mut().close(doc);
    }

    Ok(has_issues)
}
