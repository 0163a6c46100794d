//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::adapters::live::command::DEFAULT_PROGRAM;
use crate::adapters::live::{LiveClock, LiveCommandRunner, LiveEnvironment};
use crate::adapters::recording::{RecordingClock, RecordingCommandRunner, RecordingEnvironment};
use crate::adapters::replaying::{ReplayingClock, ReplayingCommandRunner, ReplayingEnvironment};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::error::GitError;
use crate::ports::{Clock, CommandRunner, Environment};

/// Environment variable naming the git executable to run.
pub const GIT_PROGRAM_VAR: &str = "GITINFO_GIT";
/// Environment variable naming a directory to record cassettes into.
pub const RECORD_VAR: &str = "GITINFO_RECORD";
/// Environment variable naming a cassette file or directory to replay.
pub const REPLAY_VAR: &str = "GITINFO_REPLAY";

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
/// Clones share the same adapters.
#[derive(Clone)]
pub struct ServiceContext {
    /// Runner for git subcommands.
    pub git: Arc<dyn CommandRunner>,
    /// Environment variable lookups.
    pub env: Arc<dyn Environment>,
    /// Clock for obtaining the current time.
    pub clock: Arc<dyn Clock>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    pub fn new(
        git: impl CommandRunner + 'static,
        env: impl Environment + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self { git: Arc::new(git), env: Arc::new(env), clock: Arc::new(clock) }
    }

    /// Creates a live context running the given git executable.
    #[must_use]
    pub fn live(program: &str) -> Self {
        Self::new(LiveCommandRunner::new(program), LiveEnvironment, LiveClock)
    }

    /// Creates a live context whose interactions are captured by `session`.
    #[must_use]
    pub fn recording(program: &str, session: &RecordingSession) -> Self {
        Self::new(
            RecordingCommandRunner::new(
                Box::new(LiveCommandRunner::new(program)),
                Arc::clone(&session.git),
            ),
            RecordingEnvironment::new(Box::new(LiveEnvironment), Arc::clone(&session.env)),
            RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock)),
        )
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer from the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::new(
            ReplayingCommandRunner::new(CassetteConfig::load_monolithic(path)?),
            ReplayingEnvironment::new(&CassetteConfig::load_monolithic(path)?),
            ReplayingClock::new(CassetteConfig::load_monolithic(path)?),
        ))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// A missing git or clock cassette yields an adapter that panics when
    /// called. A missing environment cassette leaves every variable unset.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            git: match replayers.git {
                Some(r) => Arc::new(ReplayingCommandRunner::new(r)),
                None => Arc::new(PanickingCommandRunner),
            },
            env: match replayers.env {
                Some(r) => Arc::new(ReplayingEnvironment::new(&r)),
                None => Arc::new(ReplayingEnvironment::default()),
            },
            clock: match replayers.clock {
                Some(r) => Arc::new(ReplayingClock::new(r)),
                None => Arc::new(PanickingClock),
            },
        })
    }

    /// Builds the context selected by the process environment.
    ///
    /// - `GITINFO_REPLAY=<file>` replays a monolithic cassette;
    ///   `GITINFO_REPLAY=<dir>` replays the per-port cassettes in it.
    /// - `GITINFO_RECORD=<dir>` records every interaction into `<dir>`;
    ///   the returned session must be finished once the context is dropped.
    /// - Otherwise the context is live. `GITINFO_GIT` overrides the git executable.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be loaded or the recording
    /// directory cannot be created.
    pub fn from_env() -> Result<(Self, Option<RecordingSession>), String> {
        let program =
            std::env::var(GIT_PROGRAM_VAR).unwrap_or_else(|_| DEFAULT_PROGRAM.to_string());

        if let Ok(replay) = std::env::var(REPLAY_VAR) {
            let path = PathBuf::from(replay);
            debug!("replaying interactions from {}", path.display());
            let ctx = if path.is_dir() {
                Self::replaying_from(&CassetteConfig::from_dir(&path))?
            } else {
                Self::replaying(&path)?
            };
            return Ok((ctx, None));
        }

        if let Ok(record) = std::env::var(RECORD_VAR) {
            debug!("recording interactions into {record}");
            let session = RecordingSession::new(record)?;
            return Ok((Self::recording(&program, &session), Some(session)));
        }

        Ok((Self::live(&program), None))
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::live(DEFAULT_PROGRAM)
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingCommandRunner;
impl CommandRunner for PanickingCommandRunner {
    fn run(&self, _dir: Option<&Path>, _args: &[&str]) -> Result<Vec<u8>, GitError> {
        panic!("CommandRunner port not configured in CassetteConfig: no cassette loaded for git");
    }
}

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}
