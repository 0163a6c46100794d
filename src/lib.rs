//! Git working copy information.
//!
//! [`LiveInfo`] answers questions about the working copy containing a path
//! (branch, HEAD commit, uncommitted changes, configured user and editor)
//! by running `git`. [`Snapshot`] holds the same answers frozen into a map,
//! which the `gitinfo` command can emit as Rust source for embedding build
//! information into a program.
//!
//! All access to the outside world goes through the traits in [`ports`],
//! so a [`ServiceContext`] can swap live adapters for recorded ones.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod commit;
pub mod context;
pub mod error;
pub mod fields;
pub mod gitconfig;
pub mod info;
pub mod ports;
pub mod snapshot;
pub mod user;

use std::ffi::OsString;
use std::io::Write;

pub use commands::CliError;
pub use commit::Commit;
pub use context::ServiceContext;
pub use error::GitError;
pub use fields::FieldError;
pub use gitconfig::GitConfig;
pub use info::{GitInfo, LiveInfo, DEFAULT_EDITOR};
pub use snapshot::Snapshot;
pub use user::User;

/// Run the CLI with the provided arguments, writing to `stdout`.
///
/// # Errors
///
/// Returns the failure of the run; [`CliError::exit_code`] gives the
/// process exit code.
pub fn run<I, T>(args: I, stdout: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    commands::dispatch(args, stdout)
}
