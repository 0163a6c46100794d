//! Recording adapter for the `Environment` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Environment;

/// Records environment lookups while delegating to an inner implementation.
pub struct RecordingEnvironment {
    inner: Box<dyn Environment>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingEnvironment {
    /// Creates a new recording environment wrapping the given implementation.
    pub fn new(inner: Box<dyn Environment>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct VarInput<'a> {
    name: &'a str,
}

impl Environment for RecordingEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        let result = self.inner.var(name);
        record_interaction(&self.recorder, "env", "var", &VarInput { name }, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingEnvironment;
    use crate::cassette::config::CassetteConfig;

    #[test]
    fn recorded_lookups_replay_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));

        {
            let inner = ReplayingEnvironment::from_pairs([("EDITOR", "nano")]);
            let env = RecordingEnvironment::new(Box::new(inner), Arc::clone(&recorder));
            assert_eq!(env.var("EDITOR").as_deref(), Some("nano"));
            assert_eq!(env.var("VISUAL"), None);
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let replayer = CassetteConfig::load_monolithic(&path).unwrap();
        let env = ReplayingEnvironment::new(&replayer);
        assert_eq!(env.var("EDITOR").as_deref(), Some("nano"));
        assert_eq!(env.var("VISUAL"), None);
    }
}
