//! Replaying adapter for the `Clock` port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Serves recorded times in the order they were read.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a clock reading the `clock::now` interactions of `replayer`.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_interaction("clock", "now")
            .output
            .clone();
        serde_json::from_value(output).expect("clock::now: recorded value is not a UTC timestamp")
    }
}
