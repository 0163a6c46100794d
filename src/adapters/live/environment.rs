//! Live environment backed by the process environment.

use crate::ports::environment::Environment;

/// Live environment that reads `std::env`.
pub struct LiveEnvironment;

impl Environment for LiveEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}
