//! Git configuration loaded through `git config`.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::error::GitError;
use crate::ports::{CommandRunner, ConfigStore};

/// A snapshot of the git configuration visible from one directory.
///
/// Loaded once with `git config --list -z`, which merges the system,
/// global, repository and worktree files the way git resolves them. When a
/// key is set more than once, the last value wins, matching `git config --get`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    entries: BTreeMap<String, String>,
}

impl GitConfig {
    /// Loads the configuration visible from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or fails to list its configuration.
    pub fn load(runner: &dyn CommandRunner, dir: &Path) -> Result<Self, GitError> {
        match runner.run(Some(dir), &["config", "--list", "-z"]) {
            Ok(output) => {
                let config = Self::parse(&output);
                debug!("loaded {} config entries for {}", config.entries.len(), dir.display());
                Ok(config)
            }
            // no configuration files at all
            Err(GitError::Execution { status: Some(1), ref stderr, .. }) if stderr.is_empty() => {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Parses the NUL-separated output of `git config --list -z`.
    ///
    /// Each record is `key\nvalue`; a record without a newline is a key set
    /// with no value, which git reads as boolean true.
    #[must_use]
    pub fn parse(output: &[u8]) -> Self {
        let text = String::from_utf8_lossy(output);
        let entries = text
            .split('\0')
            .filter(|record| !record.is_empty())
            .map(|record| match record.split_once('\n') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (record.to_string(), "true".to_string()),
            })
            .collect();
        Self { entries }
    }

    /// Creates a configuration from explicit entries.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries =
            entries.into_iter().map(|(k, v)| (normalize_key(k.as_ref()), v.into())).collect();
        Self { entries }
    }
}

/// Lower-cases the section and variable name of a key, as git does.
/// A subsection (`remote.Origin.url`) keeps its case.
fn normalize_key(key: &str) -> String {
    match (key.find('.'), key.rfind('.')) {
        (Some(first), Some(last)) => format!(
            "{}{}{}",
            key[..first].to_lowercase(),
            &key[first..last],
            key[last..].to_lowercase()
        ),
        _ => key.to_lowercase(),
    }
}

impl ConfigStore for GitConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(&normalize_key(key)).cloned()
    }

    fn entries(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }
}
