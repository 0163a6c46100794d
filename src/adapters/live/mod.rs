//! Live adapters for real external interactions.

pub mod clock;
pub mod command;
pub mod environment;

pub use clock::LiveClock;
pub use command::{has_git, LiveCommandRunner};
pub use environment::LiveEnvironment;
