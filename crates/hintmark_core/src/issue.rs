//! Issue and line group types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an open document, assigned by the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A 0-based buffer position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// One problem reported by the linter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based line. `0` marks a configuration-level error.
    #[serde(default)]
    pub line: u32,

    /// 1-based column.
    #[serde(default)]
    pub character: u32,

    /// Human-readable message.
    pub reason: String,

    /// Machine-readable classification, e.g. `W033`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Issue {
    /// Creates a new issue without a code.
    pub fn new(line: u32, character: u32, reason: impl Into<String>) -> Self {
        Self {
            line,
            character,
            reason: reason.into(),
            code: None,
        }
    }

    /// Sets the code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The line with configuration-level errors folded onto line 1.
    pub fn normalized_line(&self) -> u32 {
        normalize_line(self.line)
    }

    /// The 0-based row this issue is displayed on.
    pub fn row(&self) -> u32 {
        self.normalized_line() - 1
    }

    /// The 0-based buffer position of this issue.
    pub fn position(&self) -> Position {
        Position::new(self.row(), self.character.saturating_sub(1))
    }

    /// Tooltip entry: `"<character>: <reason>"`, plus ` (<code>)` when known.
    pub fn tooltip_entry(&self) -> String {
        match &self.code {
            Some(code) => format!("{}: {} ({})", self.character, self.reason, code),
            None => format!("{}: {}", self.character, self.reason),
        }
    }

    /// Status bar text: `"<line>:<character> <reason>"`.
    pub fn status_text(&self) -> String {
        format!(
            "{}:{} {}",
            self.normalized_line(),
            self.character,
            self.reason
        )
    }
}

/// Line `0` means "no line"; it is shown on line 1.
pub fn normalize_line(line: u32) -> u32 {
    if line == 0 { 1 } else { line }
}

/// Issues sharing one row, ordered by `character`.
///
/// A group always holds at least one issue; a row without issues has no group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    issues: Vec<Issue>,
}

impl LineGroup {
    /// Starts a group with its first issue.
    pub fn new(first: Issue) -> Self {
        Self {
            issues: vec![first],
        }
    }

    pub(crate) fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Stable sort by column; equal columns keep the order they were reported in.
    pub(crate) fn sort(&mut self) {
        self.issues.sort_by_key(|issue| issue.character);
    }

    /// The leftmost issue, the one shown in the status bar.
    pub fn first(&self) -> &Issue {
        &self.issues[0]
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Tooltip body: one entry per issue, newline separated.
    pub fn tooltip_text(&self) -> String {
        self.issues
            .iter()
            .map(Issue::tooltip_entry)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a LineGroup {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row -> issues for one document. Rows without issues are absent.
pub type LineGroups = BTreeMap<u32, LineGroup>;
