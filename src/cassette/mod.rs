//! Cassettes: YAML files of recorded port interactions.
//!
//! A recording session wraps the live adapters and appends every git
//! invocation, environment lookup and clock reading to one cassette per
//! port (`git.cassette.yaml`, `env.cassette.yaml`, `clock.cassette.yaml`).
//! Replaying serves those interactions back so the facade and the CLI can
//! be exercised without a git installation.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

pub use config::CassetteConfig;
pub use format::{Cassette, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
pub use session::RecordingSession;
