//! Environment port for variable lookups.

/// Provides read access to environment variables.
///
/// Precedence rules (editor, identity) are resolved through this port so
/// they can be exercised without touching the real process environment.
pub trait Environment: Send + Sync {
    /// Returns the value of `name`, or `None` if it is unset or empty.
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the first of `names` that has a value.
    fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.var(name))
    }
}
