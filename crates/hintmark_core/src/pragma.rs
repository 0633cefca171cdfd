//! JSX pragma transform.
//!
//! JSX-aware JSHint only transforms files that declare a JSX pragma. Files
//! without one get a pragma line prepended before linting, and reported line
//! numbers are shifted back by the number of added lines.

use std::borrow::Cow;

/// The line prepended to JSX sources lacking a pragma.
pub const JSX_PRAGMA: &str = "/** @jsx React.DOM */";

/// A source ready for linting and the number of lines added in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed<'a> {
    pub source: Cow<'a, str>,
    pub added_lines: u32,
}

impl<'a> Transformed<'a> {
    /// The source unchanged.
    pub fn identity(source: &'a str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            added_lines: 0,
        }
    }
}

/// Prepends [`JSX_PRAGMA`] unless the source already declares `@jsx`.
pub fn add_jsx_pragma(source: &str) -> Transformed<'_> {
    if has_jsx_pragma(source) {
        return Transformed::identity(source);
    }

    Transformed {
        source: Cow::Owned(format!("{JSX_PRAGMA}\n{source}")),
        added_lines: 1,
    }
}

/// True when a block comment before the first token declares `@jsx`.
fn has_jsx_pragma(source: &str) -> bool {
    let mut rest = source.trim_start();
    loop {
        if let Some(comment) = rest.strip_prefix("/*") {
            let Some(end) = comment.find("*/") else {
                return false;
            };
            if comment[..end].contains("@jsx") {
                return true;
            }
            rest = comment[end + 2..].trim_start();
        } else if let Some(comment) = rest.strip_prefix("//") {
            rest = comment
                .find('\n')
                .map_or("", |end| comment[end + 1..].trim_start());
        } else {
            return false;
        }
    }
}
