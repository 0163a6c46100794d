//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays the interactions of one cassette.
///
/// Each port/method pair has its own queue, so interactions of different
/// ports may be consumed in any interleaving while each port still sees
/// its own calls in recording order.
#[derive(Debug)]
pub struct CassetteReplayer {
    recorded: Vec<Interaction>,
    pending: HashMap<(String, String), VecDeque<usize>>,
}

impl CassetteReplayer {
    /// Indexes the interactions of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let recorded = cassette.interactions.clone();
        let mut pending: HashMap<(String, String), VecDeque<usize>> = HashMap::new();
        for (index, interaction) in recorded.iter().enumerate() {
            pending
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(index);
        }
        Self { recorded, pending }
    }

    /// Every interaction recorded for `port`/`method`, consumed or not.
    pub fn all<'a>(
        &'a self,
        port: &'a str,
        method: &'a str,
    ) -> impl Iterator<Item = &'a Interaction> {
        self.recorded.iter().filter(move |i| i.port == port && i.method == method)
    }

    /// Number of interactions for `port`/`method` not yet served.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        self.pending.get(&(port.to_string(), method.to_string())).map_or(0, VecDeque::len)
    }

    /// Serves the next interaction for `port`/`method`.
    ///
    /// # Panics
    ///
    /// Panics with the requested pair and what the cassette holds when
    /// there is no interaction left to serve.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        if !self.pending.contains_key(&key) {
            let mut available: Vec<String> =
                self.pending.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for {port}::{method}; \
                 cassette holds [{}]",
                available.join(", ")
            );
        }
        let next = self.pending.get_mut(&key).and_then(VecDeque::pop_front);
        let Some(index) = next else {
            let count = self.all(port, method).count();
            panic!(
                "Cassette exhausted: all {count} interactions for {port}::{method} were consumed"
            );
        };
        &self.recorded[index]
    }
}
