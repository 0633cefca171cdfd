//! Linter adapter abstraction.

use serde_json::{Map, Value};

use hintmark_config::LintConfig;

use crate::LintError;
use crate::issue::Issue;

/// Which linter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinterFlavor {
    /// Plain JSHint.
    Plain,
    /// JSX-aware JSHint.
    Jsx,
}

/// Trait for running an external JavaScript linter.
///
/// Implementations hand `source` to the real linter and translate its report.
/// The report may contain `None` placeholders for entries the linter could not
/// describe; callers filter them.
pub trait LinterAdapter {
    /// Returns the name of this linter, for logs.
    fn name(&self) -> &str;

    /// Lints `source` with the given options and predefined globals.
    fn lint(
        &self,
        source: &str,
        config: &LintConfig,
        globals: Option<&Map<String, Value>>,
    ) -> Result<Vec<Option<Issue>>, LintError>;
}

impl<L: LinterAdapter + ?Sized> LinterAdapter for Box<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lint(
        &self,
        source: &str,
        config: &LintConfig,
        globals: Option<&Map<String, Value>>,
    ) -> Result<Vec<Option<Issue>>, LintError> {
        (**self).lint(source, config, globals)
    }
}

/// The plain and JSX linters, one of which runs per pass.
pub struct Linters {
    plain: Box<dyn LinterAdapter>,
    jsx: Box<dyn LinterAdapter>,
}

impl Linters {
    pub fn new(plain: impl LinterAdapter + 'static, jsx: impl LinterAdapter + 'static) -> Self {
        Self {
            plain: Box::new(plain),
            jsx: Box::new(jsx),
        }
    }

    pub fn get(&self, flavor: LinterFlavor) -> &dyn LinterAdapter {
        match flavor {
            LinterFlavor::Plain => self.plain.as_ref(),
            LinterFlavor::Jsx => self.jsx.as_ref(),
        }
    }
}

impl std::fmt::Debug for Linters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linters")
            .field("plain", &self.plain.name())
            .field("jsx", &self.jsx.name())
            .finish()
    }
}
