//! Replaying adapter for the `Environment` port.

use std::collections::HashMap;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::environment::Environment;

/// Serves environment variables captured in a cassette.
///
/// Unlike the other replaying adapters, lookups are answered by variable
/// name rather than in call order, so callers may consult variables in any
/// order. Names that were never recorded are unset.
#[derive(Debug, Clone, Default)]
pub struct ReplayingEnvironment {
    vars: HashMap<String, String>,
}

impl ReplayingEnvironment {
    /// Creates a replaying environment from the `env::var` interactions of a replayer.
    #[must_use]
    pub fn new(replayer: &CassetteReplayer) -> Self {
        let vars = replayer
            .all("env", "var")
            .filter_map(|interaction| {
                let name = interaction.input.get("name")?.as_str()?;
                let value = interaction.output.as_str()?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        Self { vars }
    }

    /// Creates an environment holding exactly the given variables.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl Environment for ReplayingEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|value| !value.is_empty()).cloned()
    }
}
