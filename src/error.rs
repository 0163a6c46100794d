//! Error types for git queries.
//!
//! Every port and facade operation reports failures through [`GitError`].
//! The variants separate the conditions callers treat differently:
//!
//! - [`GitError::MissingExecutable`]: `git` could not be started at all
//! - [`GitError::NotAWorkingCopy`]: the query needs a working copy and there is none
//! - [`GitError::Execution`]: `git` ran but reported a failure
//!
//! `GitError` is serializable so that recorded cassettes can carry failures
//! and replay them faithfully.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from git queries.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GitError {
    /// The git executable could not be located or started.
    #[error("git executable not found: {program}")]
    MissingExecutable {
        /// The program that was invoked
        program: String,
    },

    /// The location is not inside a git working copy.
    #[error("not a git working copy: {}", path.display())]
    NotAWorkingCopy {
        /// The path that was inspected
        path: PathBuf,
    },

    /// The location of the caller could not be determined.
    #[error("unable to determine caller")]
    UnresolvableCaller,

    /// The current working directory could not be resolved.
    #[error("unable to resolve working directory: {message}")]
    WorkingDirectory {
        /// Description of the underlying failure
        message: String,
    },

    /// git ran but exited unsuccessfully.
    #[error("`{command}` failed{}: {stderr}", describe_status(*status))]
    Execution {
        /// The command line that failed, without the program name
        command: String,
        /// Exit status, if the process exited normally
        status: Option<i32>,
        /// Trimmed standard error output
        stderr: String,
    },
}

impl GitError {
    /// Returns true if this error means "there is no working copy here".
    #[must_use]
    pub fn is_not_a_working_copy(&self) -> bool {
        matches!(self, Self::NotAWorkingCopy { .. })
    }
}

fn describe_status(status: Option<i32>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_mentions_command_and_status() {
        let err = GitError::Execution {
            command: "rev-parse HEAD".into(),
            status: Some(128),
            stderr: "fatal: bad revision".into(),
        };
        assert_eq!(err.to_string(), "`rev-parse HEAD` failed with status 128: fatal: bad revision");
    }

    #[test]
    fn execution_error_without_status() {
        let err =
            GitError::Execution { command: "status".into(), status: None, stderr: "killed".into() };
        assert_eq!(err.to_string(), "`status` failed: killed");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let err = GitError::NotAWorkingCopy { path: PathBuf::from("/tmp/x") };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["kind"], "not_a_working_copy");
        let back: GitError = serde_json::from_value(value).unwrap();
        assert_eq!(back, err);
        assert!(back.is_not_a_working_copy());
    }
}
