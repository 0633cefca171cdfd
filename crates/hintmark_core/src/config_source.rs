//! Where lint configuration comes from.

use std::path::Path;

use hintmark_config::{ConfigLoader, LintConfig};

/// Resolves per-file lint configuration.
///
/// Resolution never fails: anything unreadable is "no configuration".
pub trait ConfigSource {
    /// Configuration for the file at `path`.
    fn resolve(&self, path: &Path) -> LintConfig;

    /// Returns true if the file is excluded from linting.
    fn is_ignored(&self, _path: &Path) -> bool {
        false
    }

    /// Forgets anything cached from earlier lookups.
    fn invalidate(&self) {}
}

impl ConfigSource for ConfigLoader {
    fn resolve(&self, path: &Path) -> LintConfig {
        ConfigLoader::resolve(self, path)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        ConfigLoader::is_ignored(self, path)
    }

    fn invalidate(&self) {
        self.clear_cache();
    }
}
