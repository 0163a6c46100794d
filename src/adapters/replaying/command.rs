//! Replaying adapter for the `CommandRunner` port.

use std::path::Path;
use std::sync::Mutex;

use log::debug;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::GitError;
use crate::ports::command::CommandRunner;

/// Replays recorded git command results from a cassette.
///
/// Outputs are `{"ok": "<stdout>"}` or `{"err": <GitError>}`. Calls are
/// served in recording order; the directory and arguments are not checked.
pub struct ReplayingCommandRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCommandRunner {
    /// Creates a new replaying command runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

/// Extracts a command result from a cassette output JSON value.
fn extract_result(output: &serde_json::Value, command: &str) -> Result<Vec<u8>, GitError> {
    if let Some(err) = output.get("err") {
        return Err(serde_json::from_value(err.clone()).unwrap_or_else(|e| GitError::Execution {
            command: command.to_string(),
            status: None,
            stderr: format!("unreadable recorded error: {e}"),
        }));
    }
    let stdout = output.get("ok").and_then(serde_json::Value::as_str).unwrap_or_default();
    Ok(stdout.as_bytes().to_vec())
}

impl CommandRunner for ReplayingCommandRunner {
    fn run(&self, _dir: Option<&Path>, args: &[&str]) -> Result<Vec<u8>, GitError> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction("git", "run");
            interaction.output.clone()
        };
        let command = args.join(" ");
        debug!("replaying git {command}");
        extract_result(&output, &command)
    }
}
