//! Time source for generated source headers.

use chrono::{DateTime, Utc};

/// Format of the timestamp written into generated source headers.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Provides the current time.
///
/// Only the generated source header reads the clock; replaying a fixed
/// time keeps that output stable under test.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// The current time rendered for a generated header.
    fn stamp(&self) -> String {
        self.now().format(STAMP_FORMAT).to_string()
    }
}
