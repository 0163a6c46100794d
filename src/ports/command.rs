//! Command runner port for invoking the git executable.

use std::path::Path;

use crate::error::GitError;

/// Runs git subcommands.
///
/// Abstracting execution allows deterministic replay of recorded command
/// output without a git installation.
pub trait CommandRunner: Send + Sync {
    /// Runs git with `args`, in `dir` when given, and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::MissingExecutable`] if git cannot be started,
    /// [`GitError::NotAWorkingCopy`] if git reports that `dir` is outside a
    /// working copy, and [`GitError::Execution`] for any other failure.
    fn run(&self, dir: Option<&Path>, args: &[&str]) -> Result<Vec<u8>, GitError>;
}
