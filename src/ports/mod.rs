//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the git information facade and
//! an external system (the git executable, its configuration, the process
//! environment, time). Implementations live in `src/adapters/`.

pub mod clock;
pub mod command;
pub mod config;
pub mod environment;

pub use clock::Clock;
pub use command::CommandRunner;
pub use config::ConfigStore;
pub use environment::Environment;
