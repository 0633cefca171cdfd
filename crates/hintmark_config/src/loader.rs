//! JSHint configuration discovery.
//!
//! Lookup order for a file being linted:
//! 1. `jshintConfig` in the nearest `package.json` walking up from the file
//! 2. the nearest `.jshintrc` walking up from the file
//! 3. `~/.jshintrc`
//!
//! Anything unreadable or malformed resolves to an empty configuration.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::lint_config::parse_object;
use crate::{ConfigError, IgnoreRules, LintConfig};

const JSHINTRC: &str = ".jshintrc";
const PACKAGE_JSON: &str = "package.json";
const JSHINTIGNORE: &str = ".jshintignore";

/// Maximum number of `extends` hops followed from one `.jshintrc`.
const MAX_EXTENDS_DEPTH: usize = 16;

/// Resolves JSHint configuration for files on disk.
///
/// `find_file` lookups are memoized for the lifetime of the loader; call
/// [`ConfigLoader::clear_cache`] after configuration files change.
#[derive(Debug)]
pub struct ConfigLoader {
    home_dir: Option<PathBuf>,
    found: Mutex<HashMap<PathBuf, Option<PathBuf>>>,
    ignores: Mutex<HashMap<PathBuf, IgnoreRules>>,
}

impl ConfigLoader {
    /// Creates a loader that falls back to the user's home directory.
    pub fn new() -> Self {
        Self::with_home_dir(dirs::home_dir())
    }

    /// Creates a loader with an explicit home directory (or none).
    pub fn with_home_dir(home_dir: Option<PathBuf>) -> Self {
        Self {
            home_dir,
            found: Mutex::new(HashMap::new()),
            ignores: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the configuration for `file`.
    ///
    /// Never fails: a missing or broken configuration yields an empty,
    /// undiscovered [`LintConfig`].
    pub fn resolve(&self, file: impl AsRef<Path>) -> LintConfig {
        let dir = match parent_dir(file.as_ref()) {
            Some(dir) => dir,
            None => return LintConfig::new(),
        };

        if let Some(config) = self.load_npm_config(&dir) {
            return config;
        }

        let Some(path) = self.find_config(&dir) else {
            debug!("No JSHint config found for {}", dir.display());
            return LintConfig::new();
        };

        match self.load_file(&path) {
            Ok(config) => {
                info!("Found config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                LintConfig::new()
            }
        }
    }

    /// Loads a `.jshintrc` file, following its `extends` chain.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LintConfig, ConfigError> {
        let path = path.as_ref();
        let mut visited = HashSet::new();
        let options = load_chain(path, &mut visited)?;
        Ok(LintConfig::from_options(options).with_source(path))
    }

    /// Returns true if `file` matches the nearest `.jshintignore`.
    pub fn is_ignored(&self, file: impl AsRef<Path>) -> bool {
        let file = file.as_ref();
        let Some(dir) = parent_dir(file) else {
            return false;
        };
        let Some(ignore_path) = self.find_file(JSHINTIGNORE, &dir) else {
            return false;
        };

        let mut ignores = self.ignores.lock();
        if !ignores.contains_key(&ignore_path) {
            match IgnoreRules::from_file(&ignore_path) {
                Ok(rules) => {
                    ignores.insert(ignore_path.clone(), rules);
                }
                Err(e) => {
                    warn!("Ignoring {}: {}", ignore_path.display(), e);
                    return false;
                }
            }
        }

        let absolute = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
        ignores
            .get(&ignore_path)
            .is_some_and(|rules| rules.is_ignored(&absolute))
    }

    /// Searches for `name` in `dir` and each of its ancestors.
    pub fn find_file(&self, name: &str, dir: &Path) -> Option<PathBuf> {
        let mut visited = Vec::new();
        let mut result = None;

        for ancestor in dir.ancestors() {
            let candidate = ancestor.join(name);
            if let Some(cached) = self.found.lock().get(&candidate) {
                result = cached.clone();
                break;
            }
            let exists = candidate.exists();
            visited.push(candidate.clone());
            if exists {
                result = Some(candidate);
                break;
            }
        }

        let mut found = self.found.lock();
        for candidate in visited {
            found.insert(candidate, result.clone());
        }
        result
    }

    /// Drops memoized lookups and compiled ignore files.
    pub fn clear_cache(&self) {
        self.found.lock().clear();
        self.ignores.lock().clear();
    }

    fn find_config(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(project) = self.find_file(JSHINTRC, dir) {
            return Some(project);
        }

        self.home_dir
            .as_ref()
            .map(|home| home.join(JSHINTRC))
            .filter(|home| home.is_file())
    }

    fn load_npm_config(&self, dir: &Path) -> Option<LintConfig> {
        let path = self.find_file(PACKAGE_JSON, dir)?;
        let content = fs::read_to_string(&path).ok()?;
        let mut package: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(package) => package,
            Err(e) => {
                debug!("Unreadable {}: {}", path.display(), e);
                return None;
            }
        };

        match package.remove("jshintConfig") {
            Some(Value::Object(options)) => {
                info!("Found jshintConfig in {}", path.display());
                Some(LintConfig::from_options(options).with_source(path))
            }
            _ => None,
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_dir(file: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(file).ok()?;
    absolute.parent().map(Path::to_path_buf)
}

/// Loads `path` and everything it extends, base options first.
fn load_chain(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<Map<String, Value>, ConfigError> {
    if visited.len() >= MAX_EXTENDS_DEPTH || !visited.insert(path.to_path_buf()) {
        return Err(ConfigError::Extends(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    let mut options = parse_object(&content)?;

    let Some(extends) = options.remove("extends") else {
        return Ok(options);
    };
    let Some(base_name) = extends.as_str() else {
        return Err(ConfigError::invalid("`extends` must be a path string"));
    };

    let base_path = path
        .parent()
        .map(|dir| dir.join(base_name))
        .unwrap_or_else(|| PathBuf::from(base_name));
    let base = load_chain(&base_path, visited)?;

    Ok(merge(base, options))
}

/// Child options override the base; `globals` are merged key by key.
fn merge(mut base: Map<String, Value>, child: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in child {
        if key == "globals"
            && let (Some(Value::Object(base_globals)), Value::Object(child_globals)) =
                (base.get_mut("globals"), &value)
        {
            base_globals.extend(child_globals.clone());
            continue;
        }
        base.insert(key, value);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn loader() -> ConfigLoader {
        ConfigLoader::with_home_dir(None)
    }

    #[test]
    fn test_resolve_without_config_is_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.js");

        let config = loader().resolve(&file);
        assert!(config.is_empty());
        assert!(!config.is_discovered());
    }

    #[test]
    fn test_resolve_finds_jshintrc_in_ancestor() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".jshintrc"), r#"{ "esversion": 6 }"#).unwrap();

        let config = loader().resolve(nested.join("app.js"));
        assert!(config.is_discovered());
        assert_eq!(config.options().get("esversion"), Some(&json!(6)));
        assert_eq!(config.source(), Some(dir.path().join(".jshintrc").as_path()));
    }

    #[test]
    fn test_package_json_takes_priority() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".jshintrc"), r#"{ "esversion": 6 }"#).unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "demo", "jshintConfig": { "undef": true } }"#,
        )
        .unwrap();

        let config = loader().resolve(dir.path().join("app.js"));
        assert_eq!(config.to_json(), json!({ "undef": true }));
        assert!(config.source().unwrap().ends_with("package.json"));
    }

    #[test]
    fn test_package_json_without_jshint_config_falls_through() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".jshintrc"), r#"{ "esversion": 6 }"#).unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "demo" }"#).unwrap();

        let config = loader().resolve(dir.path().join("app.js"));
        assert!(config.source().unwrap().ends_with(".jshintrc"));
    }

    #[test]
    fn test_malformed_jshintrc_resolves_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".jshintrc"), "{ not json").unwrap();

        let config = loader().resolve(dir.path().join("app.js"));
        assert!(config.is_empty());
        assert!(!config.is_discovered());
    }

    #[test]
    fn test_home_config_fallback() {
        let project = tempdir().unwrap();
        let home = tempdir().unwrap();
        fs::write(home.path().join(".jshintrc"), r#"{ "node": true }"#).unwrap();

        let loader = ConfigLoader::with_home_dir(Some(home.path().to_path_buf()));
        let config = loader.resolve(project.path().join("app.js"));
        assert_eq!(config.options().get("node"), Some(&json!(true)));
    }

    #[test]
    fn test_extends_merges_globals() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("base.json"),
            r#"{ "undef": true, "strict": true, "globals": { "jQuery": false } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(".jshintrc"),
            r#"{ "extends": "base.json", "strict": false, "globals": { "angular": true } }"#,
        )
        .unwrap();

        let config = loader().load_file(dir.path().join(".jshintrc")).unwrap();
        assert_eq!(
            config.to_json(),
            json!({
                "undef": true,
                "strict": false,
                "globals": { "jQuery": false, "angular": true }
            })
        );
    }

    #[test]
    fn test_extends_cycle_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{ "extends": "b.json" }"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{ "extends": "a.json" }"#).unwrap();

        let err = loader().load_file(dir.path().join("a.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Extends(_)));
    }

    #[test]
    fn test_find_file_is_memoized_until_cleared() {
        let dir = tempdir().unwrap();
        let loader = loader();

        assert_eq!(loader.find_file(".jshintrc", dir.path()), None);

        fs::write(dir.path().join(".jshintrc"), "{}").unwrap();
        assert_eq!(loader.find_file(".jshintrc", dir.path()), None);

        loader.clear_cache();
        assert_eq!(
            loader.find_file(".jshintrc", dir.path()),
            Some(dir.path().join(".jshintrc"))
        );
    }

    #[test]
    fn test_is_ignored_uses_nearest_jshintignore() {
        let dir = tempdir().unwrap();
        let vendor = dir.path().join("vendor");
        fs::create_dir_all(&vendor).unwrap();
        fs::write(dir.path().join(".jshintignore"), "vendor/\n*.min.js\n").unwrap();

        let loader = loader();
        assert!(loader.is_ignored(vendor.join("lib.js")));
        assert!(loader.is_ignored(dir.path().join("app.min.js")));
        assert!(!loader.is_ignored(dir.path().join("app.js")));
    }

    #[test]
    fn test_is_ignored_without_ignore_file() {
        let dir = tempdir().unwrap();
        assert!(!loader().is_ignored(dir.path().join("app.js")));
    }
}
