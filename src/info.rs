//! The git information facade.
//!
//! [`GitInfo`] is the capability shared by the two ways of answering
//! questions about a working copy:
//!
//! - [`LiveInfo`] asks git, every time an accessor is called
//! - [`Snapshot`](crate::Snapshot) answers from a previously captured map
//!
//! # Example
//!
//! ```no_run
//! use gitinfo::{GitInfo, LiveInfo};
//!
//! let info = LiveInfo::new()?;
//! println!("{} at {:?}", info.branch()?, info.commit()?.map(|c| c.prefix(10).to_string()));
//! # Ok::<(), gitinfo::GitError>(())
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::commit::Commit;
use crate::context::ServiceContext;
use crate::error::GitError;
use crate::fields;
use crate::gitconfig::GitConfig;
use crate::ports::ConfigStore;
use crate::user::User;

/// Editor used when neither the environment nor git config names one.
pub const DEFAULT_EDITOR: &str = "vi";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)*").expect("version pattern is valid"));

/// High-level information about a git working copy.
pub trait GitInfo {
    /// The absolute location this information was resolved for.
    fn path(&self) -> &Path;

    /// The root of the working copy, or `None` outside a working copy.
    fn root(&self) -> Option<&Path>;

    /// The current branch, or the empty string outside a working copy.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails for a reason other than the absence of
    /// a working copy.
    fn branch(&self) -> Result<String, GitError>;

    /// The HEAD commit, or `None` outside a working copy or before the first commit.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails for a reason other than the absence of
    /// a working copy.
    fn commit(&self) -> Result<Option<Commit>, GitError>;

    /// Whether the working copy has uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotAWorkingCopy`] outside a working copy, or any
    /// failure from git.
    fn modified(&self) -> Result<bool, GitError>;

    /// The editor git would launch; never empty.
    fn editor(&self) -> String;

    /// The configured git user.
    fn user(&self) -> User<'_>;

    /// The version of the git executable, e.g. `2.43.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run.
    fn version(&self) -> Result<String, GitError>;

    /// Every field as a flat string map.
    ///
    /// All keys in [`fields::ALL`] are present. Failing accessors contribute
    /// an empty value (`"false"` for `modified`).
    fn map(&self) -> BTreeMap<String, String> {
        let user = self.user();
        let entries = [
            (fields::BRANCH, self.branch().unwrap_or_default()),
            (
                fields::COMMIT,
                self.commit().ok().flatten().map(|c| c.to_string()).unwrap_or_default(),
            ),
            (fields::EDITOR, self.editor()),
            (fields::MODIFIED, self.modified().unwrap_or(false).to_string()),
            (fields::PATH, self.path().display().to_string()),
            (fields::ROOT, self.root().map(|r| r.display().to_string()).unwrap_or_default()),
            (fields::USER_EMAIL, user.email()),
            (fields::USER_NAME, user.name()),
            (fields::VERSION, self.version().unwrap_or_default()),
        ];
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

/// Git information resolved by running git.
///
/// The working copy root and configuration are captured at construction;
/// every other accessor runs git when called.
pub struct LiveInfo {
    ctx: ServiceContext,
    config: GitConfig,
    path: PathBuf,
    dir: PathBuf,
    root: Option<PathBuf>,
    user_name: String,
    user_email: String,
}

impl LiveInfo {
    /// Resolves information for the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory or git configuration cannot be read.
    pub fn new() -> Result<Self, GitError> {
        Self::with_path("")
    }

    /// Resolves information for `path`; an empty path means the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be made absolute or the git
    /// configuration cannot be read. A path outside any working copy is not
    /// an error.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, GitError> {
        Self::with_context(ServiceContext::default(), path)
    }

    /// Resolves information for `path` using the given adapters.
    ///
    /// # Errors
    ///
    /// See [`LiveInfo::with_path`].
    pub fn with_context(ctx: ServiceContext, path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = absolute(path.as_ref())?;
        let dir = match path.parent() {
            Some(parent) if path.is_file() => parent.to_path_buf(),
            _ => path.clone(),
        };

        let config = GitConfig::load(ctx.git.as_ref(), &dir)?;
        let root = discover_root(&ctx, &dir)?;
        debug!("resolved {} with root {root:?}", path.display());

        let user_name = config.get("user.name").unwrap_or_default();
        let user_email = config.get("user.email").unwrap_or_default();
        Ok(Self { ctx, config, path, dir, root, user_name, user_email })
    }

    /// Resolves information for the source file that calls [`here!`](crate::here).
    ///
    /// `file` is taken relative to `manifest_dir` unless absolute. When the
    /// file no longer exists (e.g. a binary run away from its sources) the
    /// manifest directory is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::UnresolvableCaller`] if neither location is known,
    /// otherwise as [`LiveInfo::with_path`].
    pub fn here_in(ctx: ServiceContext, manifest_dir: &str, file: &str) -> Result<Self, GitError> {
        let caller = match (manifest_dir.is_empty(), file.is_empty()) {
            (true, true) => return Err(GitError::UnresolvableCaller),
            (true, false) => PathBuf::from(file),
            (false, true) => PathBuf::from(manifest_dir),
            (false, false) => {
                let source = Path::new(manifest_dir).join(file);
                if source.exists() {
                    source
                } else {
                    PathBuf::from(manifest_dir)
                }
            }
        };
        Self::with_context(ctx, caller)
    }

    /// The git configuration captured at construction.
    #[must_use]
    pub fn config(&self) -> &GitConfig {
        &self.config
    }

    fn run_in_root(&self, root: &Path, args: &[&str]) -> Result<String, GitError> {
        let output = self.ctx.git.run(Some(root), args)?;
        Ok(String::from_utf8_lossy(&output).trim().to_string())
    }
}

impl GitInfo for LiveInfo {
    fn path(&self) -> &Path {
        &self.path
    }

    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn branch(&self) -> Result<String, GitError> {
        let Some(root) = self.root() else {
            return Ok(String::new());
        };
        match self.run_in_root(root, &["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(branch) => Ok(branch),
            Err(e) if e.is_not_a_working_copy() => Ok(String::new()),
            // HEAD names a branch with no commits yet
            Err(e @ GitError::Execution { .. }) => {
                self.run_in_root(root, &["symbolic-ref", "--short", "-q", "HEAD"]).map_err(|_| e)
            }
            Err(e) => Err(e),
        }
    }

    fn commit(&self) -> Result<Option<Commit>, GitError> {
        let Some(root) = self.root() else {
            return Ok(None);
        };
        match self.run_in_root(root, &["rev-parse", "--verify", "-q", "HEAD"]) {
            Ok(hash) if hash.is_empty() => Ok(None),
            Ok(hash) => Ok(Some(Commit::new(hash))),
            Err(e) if e.is_not_a_working_copy() => Ok(None),
            Err(GitError::Execution { status: Some(1), ref stderr, .. }) if stderr.is_empty() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn modified(&self) -> Result<bool, GitError> {
        let Some(root) = self.root() else {
            return Err(GitError::NotAWorkingCopy { path: self.path.clone() });
        };
        let status = self.run_in_root(root, &["status", "--porcelain"])?;
        Ok(status.lines().any(|line| !line.trim().is_empty()))
    }

    fn editor(&self) -> String {
        self.ctx
            .env
            .first_of(&["GIT_EDITOR", "EDITOR", "VISUAL"])
            .or_else(|| self.config.get("core.editor").filter(|editor| !editor.is_empty()))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    fn user(&self) -> User<'_> {
        User::with_env(&self.user_name, &self.user_email, self.ctx.env.as_ref())
    }

    fn version(&self) -> Result<String, GitError> {
        let output = self.ctx.git.run(Some(&self.dir), &["--version"])?;
        let text = String::from_utf8_lossy(&output);
        Ok(VERSION_PATTERN.find(&text).map(|m| m.as_str().to_string()).unwrap_or_default())
    }
}

/// Resolves information for the source file in which it is invoked.
///
/// `here!()` uses live adapters; `here!(ctx)` uses the given
/// [`ServiceContext`](crate::ServiceContext).
#[macro_export]
macro_rules! here {
    () => {
        $crate::here!($crate::ServiceContext::default())
    };
    ($ctx:expr) => {
        $crate::LiveInfo::here_in($ctx, env!("CARGO_MANIFEST_DIR"), file!())
    };
}

fn absolute(path: &Path) -> Result<PathBuf, GitError> {
    let resolved = if path.as_os_str().is_empty() {
        std::env::current_dir()
    } else {
        std::path::absolute(path)
    };
    resolved.map_err(|e| GitError::WorkingDirectory { message: e.to_string() })
}

fn discover_root(ctx: &ServiceContext, dir: &Path) -> Result<Option<PathBuf>, GitError> {
    match ctx.git.run(Some(dir), &["rev-parse", "--show-toplevel"]) {
        Ok(output) => {
            let root = String::from_utf8_lossy(&output).trim().to_string();
            Ok((!root.is_empty()).then(|| PathBuf::from(root)))
        }
        Err(e @ GitError::MissingExecutable { .. }) => Err(e),
        Err(e) => {
            debug!("no working copy at {}: {e}", dir.display());
            Ok(None)
        }
    }
}
