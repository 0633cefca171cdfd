//! Adapter for the external `jshint` executable.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use hintmark_core::{Issue, LintConfig, LintError, LinterAdapter};

/// JSHint's exit status when the source has problems.
const EXIT_ISSUES_FOUND: i32 = 2;

/// Runs `jshint` (or a JSX-aware drop-in such as `jsxhint`) on stdin.
#[derive(Debug, Clone)]
pub struct JshintCommand {
    program: String,
}

impl JshintCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn write_config(
        config: &LintConfig,
        globals: Option<&Map<String, Value>>,
    ) -> Result<NamedTempFile, LintError> {
        let mut options = config.options().clone();
        if let Some(globals) = globals {
            options.insert("globals".to_string(), Value::Object(globals.clone()));
        }

        let mut file = NamedTempFile::new()?;
        serde_json::to_writer(&mut file, &options)?;
        file.flush()?;
        Ok(file)
    }
}

impl LinterAdapter for JshintCommand {
    fn name(&self) -> &str {
        &self.program
    }

    fn lint(
        &self,
        source: &str,
        config: &LintConfig,
        globals: Option<&Map<String, Value>>,
    ) -> Result<Vec<Option<Issue>>, LintError> {
        let config_file = Self::write_config(config, globals)?;

        let mut child = Command::new(&self.program)
            .arg("--reporter=unix")
            .arg("--verbose")
            .arg("--config")
            .arg(config_file.path())
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(LintError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        match output.status.code() {
            Some(0) | Some(EXIT_ISSUES_FOUND) => {}
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(LintError::failed(format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim_end()
                )));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let issues = parse_report(&stdout);
        debug!("{} reported {} lines", self.program, issues.len());
        Ok(issues)
    }
}

/// Maps each non-blank report line to an issue.
pub fn parse_report(report: &str) -> Vec<Option<Issue>> {
    report
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Parses one `unix` reporter line: `<file>:<line>:<col>: <reason>[ (<code>)]`.
///
/// Summary lines and anything else unexpected yield `None`.
pub fn parse_line(line: &str) -> Option<Issue> {
    let mut parts = line.splitn(4, ':');
    let _file = parts.next()?;
    let line_no: u32 = parts.next()?.trim().parse().ok()?;
    let character: u32 = parts.next()?.trim().parse().ok()?;
    let message = parts.next()?.trim();
    if message.is_empty() {
        return None;
    }

    match split_code(message) {
        Some((reason, code)) => Some(Issue::new(line_no, character, reason).with_code(code)),
        None => Some(Issue::new(line_no, character, message)),
    }
}

/// Splits a trailing `(W033)` style code off a verbose message.
fn split_code(message: &str) -> Option<(&str, &str)> {
    let body = message.strip_suffix(')')?;
    let open = body.rfind(" (")?;
    let code = &body[open + 2..];

    let is_code = code.len() > 1
        && code.starts_with(['E', 'W', 'I'])
        && code[1..].bytes().all(|b| b.is_ascii_digit());

    is_code.then(|| (&body[..open], code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::with_code(
        "stdin:3:5: Missing semicolon. (W033)",
        Some(Issue::new(3, 5, "Missing semicolon.").with_code("W033"))
    )]
    #[case::without_code(
        "stdin:7:1: 'x' is not defined.",
        Some(Issue::new(7, 1, "'x' is not defined."))
    )]
    #[case::colon_in_reason(
        "stdin:2:10: Expected '{a}' and instead saw ':'. (E001)",
        Some(Issue::new(2, 10, "Expected '{a}' and instead saw ':'.").with_code("E001"))
    )]
    #[case::parenthesized_reason(
        "stdin:4:2: Unexpected use of '++' (plusplus)",
        Some(Issue::new(4, 2, "Unexpected use of '++' (plusplus)"))
    )]
    #[case::config_error(
        "stdin:0:0: Bad option: 'esversoin'. (E001)",
        Some(Issue::new(0, 0, "Bad option: 'esversoin'.").with_code("E001"))
    )]
    #[case::summary("2 errors", None)]
    #[case::missing_column("stdin:3: Missing semicolon.", None)]
    fn test_parse_line(#[case] line: &str, #[case] expected: Option<Issue>) {
        assert_eq!(parse_line(line), expected);
    }

    #[test]
    fn test_parse_report_keeps_placeholders() {
        let report = "stdin:1:1: Use the function form of \"use strict\". (W097)\n\n1 error\n";
        let issues = parse_report(report);

        assert_eq!(issues.len(), 2);
        assert!(issues[0].is_some());
        assert_eq!(issues[1], None);
    }

    #[test]
    fn test_config_file_carries_globals() {
        let config = LintConfig::from_json(r#"{ "undef": true }"#).unwrap();
        let mut globals = Map::new();
        globals.insert("$".to_string(), Value::Bool(false));

        let file = JshintCommand::write_config(&config, Some(&globals)).unwrap();
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();

        assert_eq!(written["undef"], Value::Bool(true));
        assert_eq!(written["globals"]["$"], Value::Bool(false));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let adapter = JshintCommand::new("hintmark-no-such-jshint");
        let result = adapter.lint("var a;", &LintConfig::new(), None);
        assert!(matches!(result, Err(LintError::Spawn(_))));
    }
}
