//! `.jshintignore` matching.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::ConfigError;

/// Compiled patterns from one `.jshintignore` file.
///
/// Patterns use gitignore syntax and are rooted at the directory containing
/// the ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    root: PathBuf,
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Compiles the ignore file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut builder = GitignoreBuilder::new(&root);
        if let Some(e) = builder.add(path) {
            return Err(e.into());
        }
        let matcher = builder.build()?;

        Ok(Self { root, matcher })
    }

    /// Returns true if `path` (absolute) or one of its parent directories is ignored.
    ///
    /// Paths outside the ignore file's directory are never ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if !path.starts_with(&self.root) {
            return false;
        }

        self.matcher
            .matched_path_or_any_parents(path, false)
            .is_ignore()
    }

    /// Directory the patterns are rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[rstest]
    #[case::directory("build/", "build/app.js", true)]
    #[case::nested_directory("build/", "build/js/app.js", true)]
    #[case::extension("*.min.js", "lib/jquery.min.js", true)]
    #[case::negation("*.js\n!keep.js", "keep.js", false)]
    #[case::unmatched("vendor/", "src/app.js", false)]
    fn test_is_ignored(#[case] patterns: &str, #[case] file: &str, #[case] expected: bool) {
        let dir = tempdir().unwrap();
        let ignore_path = dir.path().join(".jshintignore");
        fs::write(&ignore_path, patterns).unwrap();

        let rules = IgnoreRules::from_file(&ignore_path).unwrap();
        assert_eq!(rules.is_ignored(&dir.path().join(file)), expected);
    }

    #[test]
    fn test_paths_outside_root_are_not_ignored() {
        let dir = tempdir().unwrap();
        let other = tempdir().unwrap();
        let ignore_path = dir.path().join(".jshintignore");
        fs::write(&ignore_path, "*.js").unwrap();

        let rules = IgnoreRules::from_file(&ignore_path).unwrap();
        assert!(!rules.is_ignored(&other.path().join("app.js")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(IgnoreRules::from_file(dir.path().join(".jshintignore")).is_err());
    }
}
