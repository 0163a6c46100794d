//! Configuration store port.

use std::collections::BTreeMap;

/// Read access to a key/value configuration store such as git config.
pub trait ConfigStore: Send + Sync {
    /// Returns the value for `key`, or `None` if it is not configured.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns every configured entry, keyed by its full name.
    fn entries(&self) -> BTreeMap<String, String>;
}
