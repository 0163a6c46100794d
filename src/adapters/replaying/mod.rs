//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod command;
pub mod environment;

pub use clock::ReplayingClock;
pub use command::ReplayingCommandRunner;
pub use environment::ReplayingEnvironment;
