//! Recording adapter for the `CommandRunner` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::GitError;
use crate::ports::CommandRunner;

/// Records git command interactions while delegating to an inner implementation.
pub struct RecordingCommandRunner {
    inner: Box<dyn CommandRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCommandRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn CommandRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RunInput<'a> {
    dir: Option<&'a Path>,
    args: &'a [&'a str],
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, dir: Option<&Path>, args: &[&str]) -> Result<Vec<u8>, GitError> {
        let result = self.inner.run(dir, args);
        // stdout is stored as text so cassettes stay readable
        let recorded = result.as_ref().map(|out| String::from_utf8_lossy(out).into_owned());
        record_result(&self.recorder, "git", "run", &RunInput { dir, args }, &recorded);
        result
    }
}
