//! Git information frozen into a flat map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::commit::Commit;
use crate::error::GitError;
use crate::fields;
use crate::info::GitInfo;
use crate::user::User;

/// Git information rebuilt from a previously captured [`GitInfo::map`].
///
/// A snapshot never runs git or reads the environment, so it can be
/// embedded into a program that has neither. Its accessors never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    branch: String,
    commit: Option<Commit>,
    editor: String,
    modified: bool,
    path: PathBuf,
    root: Option<PathBuf>,
    user_name: String,
    user_email: String,
    version: String,
}

impl Snapshot {
    /// Builds a snapshot from field/value pairs.
    ///
    /// Missing fields are empty; unknown fields are ignored. `modified`
    /// is set only by the literal value `"true"`.
    pub fn build<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut snapshot = Self::default();
        for (key, value) in entries {
            let value = value.into();
            match key.as_ref() {
                fields::BRANCH => snapshot.branch = value,
                fields::COMMIT => snapshot.commit = (!value.is_empty()).then(|| Commit::new(value)),
                fields::EDITOR => snapshot.editor = value,
                fields::MODIFIED => snapshot.modified = value == "true",
                fields::PATH => snapshot.path = PathBuf::from(value),
                fields::ROOT => snapshot.root = (!value.is_empty()).then(|| PathBuf::from(value)),
                fields::USER_EMAIL => snapshot.user_email = value,
                fields::USER_NAME => snapshot.user_name = value,
                fields::VERSION => snapshot.version = value,
                _ => {}
            }
        }
        snapshot
    }

    /// Captures the current state of any [`GitInfo`].
    pub fn capture(info: &dyn GitInfo) -> Self {
        Self::build(info.map())
    }
}

impl GitInfo for Snapshot {
    fn path(&self) -> &Path {
        &self.path
    }

    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn branch(&self) -> Result<String, GitError> {
        Ok(self.branch.clone())
    }

    fn commit(&self) -> Result<Option<Commit>, GitError> {
        Ok(self.commit.clone())
    }

    fn modified(&self) -> Result<bool, GitError> {
        Ok(self.modified)
    }

    fn editor(&self) -> String {
        self.editor.clone()
    }

    fn user(&self) -> User<'_> {
        User::frozen(&self.user_name, &self.user_email)
    }

    fn version(&self) -> Result<String, GitError> {
        Ok(self.version.clone())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl From<&BTreeMap<String, String>> for Snapshot {
    fn from(map: &BTreeMap<String, String>) -> Self {
        Self::build(map)
    }
}
