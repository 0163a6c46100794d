//! Live command runner that spawns the git executable.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::GitError;
use crate::ports::command::CommandRunner;

/// Program name used when no override is configured.
pub const DEFAULT_PROGRAM: &str = "git";

/// Live command runner that shells out to git.
#[derive(Debug, Clone)]
pub struct LiveCommandRunner {
    program: String,
}

impl LiveCommandRunner {
    /// Creates a runner for the given git executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for LiveCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CommandRunner for LiveCommandRunner {
    fn run(&self, dir: Option<&Path>, args: &[&str]) -> Result<Vec<u8>, GitError> {
        let command_line = args.join(" ");
        let mut command = Command::new(&self.program);
        // git's error messages are matched below; keep them untranslated
        command.args(args).env("LC_ALL", "C");

        if let Some(dir) = dir {
            if !dir.is_dir() {
                return Err(GitError::Execution {
                    command: command_line,
                    status: None,
                    stderr: format!("{}: no such directory", dir.display()),
                });
            }
            command.current_dir(dir);
        }

        debug!("running {} {command_line} in {dir:?}", self.program);
        let output = command.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                GitError::MissingExecutable { program: self.program.clone() }
            } else {
                GitError::Execution {
                    command: command_line.clone(),
                    status: None,
                    stderr: e.to_string(),
                }
            }
        })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("{} {command_line} exited with {:?}: {stderr}", self.program, output.status.code());
        if stderr.contains("not a git repository") {
            let path = dir.map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf);
            return Err(GitError::NotAWorkingCopy { path });
        }
        Err(GitError::Execution { command: command_line, status: output.status.code(), stderr })
    }
}

/// Returns true if the git executable can be run.
#[must_use]
pub fn has_git() -> bool {
    LiveCommandRunner::default().run(None, &["--version"]).is_ok()
}
