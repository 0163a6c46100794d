//! Command dispatch and handlers.

pub mod display;
pub mod generate;
pub mod tag;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use log::debug;
use thiserror::Error;

use crate::cassette::session::RecordingSession;
use crate::cli::{normalize_args, Cli};
use crate::context::ServiceContext;
use crate::error::GitError;
use crate::fields::{self, FieldError};
use crate::info::{GitInfo, LiveInfo};
use generate::{Header, InvalidSymbol, Symbol};

/// Errors from a `gitinfo` run, each mapped to a process exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// The `-o` output file could not be created.
    #[error("cannot create {}: {source}", path.display())]
    Output {
        /// The requested output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The `-X` argument is malformed.
    #[error(transparent)]
    Symbol(#[from] InvalidSymbol),

    /// The working copy could not be inspected.
    #[error(transparent)]
    Resolve(#[from] GitError),

    /// A field selector matched nothing.
    #[error(transparent)]
    Fields(#[from] FieldError),

    /// The command line could not be parsed.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Writing the output failed.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),

    /// The service context could not be built or finished.
    #[error("{0}")]
    Context(String),
}

impl CliError {
    /// The exit code the process should end with.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Output { .. } | Self::Symbol(_) | Self::Write(_) | Self::Context(_) => 1,
            Self::Resolve(_) => 2,
            Self::Fields(_) => 3,
            Self::Usage(err) => u8::try_from(err.exit_code()).unwrap_or(2),
        }
    }
}

/// Run with the context selected by the process environment.
///
/// When `GITINFO_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns the first failure of the run; see [`CliError::exit_code`].
pub fn dispatch<I, T>(args: I, stdout: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let (ctx, session) = ServiceContext::from_env().map_err(CliError::Context)?;

    let result = dispatch_with_context(args, &ctx, stdout);

    // Finish recording after the run completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Run with the given service context, writing to `stdout` unless `-o` is given.
///
/// # Errors
///
/// Returns the first failure of the run; see [`CliError::exit_code`].
pub fn dispatch_with_context<I, T>(
    args: I,
    ctx: &ServiceContext,
    stdout: &mut dyn Write,
) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let typed: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let cli = match Cli::try_parse_from(normalize_args(typed.iter().cloned())) {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            write!(stdout, "{}", err.render())?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if cli.short_version {
        writeln!(stdout, "{}", tag::tag(None))?;
        return Ok(());
    }
    if cli.long_version {
        let own = crate::here!(ctx.clone()).ok();
        writeln!(stdout, "{}", tag::tag(own.as_ref().map(|info| info as &dyn GitInfo)))?;
        return Ok(());
    }

    let mut file;
    let out: &mut dyn Write = match &cli.output {
        Some(path) => {
            let created = File::create(path)
                .map_err(|source| CliError::Output { path: path.clone(), source })?;
            file = BufWriter::new(created);
            &mut file
        }
        None => stdout,
    };

    let selectors = cli.selectors();
    let symbol = cli.symbol.as_deref().map(str::parse::<Symbol>).transpose()?;

    let info = LiveInfo::with_context(ctx.clone(), cli.path.clone().unwrap_or_default())?;
    let map = fields::select(info.map(), selectors.as_deref())?;
    debug!("selected {} of {} fields", map.len(), fields::ALL.len());

    match symbol {
        None => display::display(out, &map, cli.short, selectors.as_deref())?,
        Some(symbol) => {
            let header = Header {
                generator: tag::tag(None),
                timestamp: ctx.clock.stamp(),
                command: command_line(&typed),
            };
            generate::generate(out, &map, &symbol, cli.runtime, &header)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn command_line(args: &[OsString]) -> String {
    let mut words: Vec<String> =
        args.iter().map(|arg| arg.to_string_lossy().into_owned()).collect();
    if let Some(program) = words.first_mut() {
        if let Some(name) = std::path::Path::new(program.as_str()).file_name() {
            *program = name.to_string_lossy().into_owned();
        }
    }
    words.join(" ")
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), CliError> {
    let output_dir = session.finish().map_err(CliError::Context)?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::fixtures::make_replayer;
    use crate::adapters::replaying::{ReplayingClock, ReplayingCommandRunner, ReplayingEnvironment};
    use serde_json::{json, Value};

    fn ok(stdout: &str) -> Value {
        json!({ "ok": stdout })
    }

    fn context(outputs: Vec<Value>, env: &[(&str, &str)]) -> ServiceContext {
        let git = outputs.into_iter().map(|output| ("git", "run", json!({}), output)).collect();
        ServiceContext::new(
            ReplayingCommandRunner::new(make_replayer(git)),
            ReplayingEnvironment::from_pairs(env.iter().copied()),
            ReplayingClock::new(make_replayer(vec![(
                "clock",
                "now",
                json!(null),
                json!("2024-06-15T10:30:00Z"),
            )])),
        )
    }

    /// Answers for a working copy at `/work` on `main`, in accessor order.
    fn working_copy() -> Vec<Value> {
        vec![
            ok("user.name\nAda\0user.email\nada@example.com\0"),
            ok("/work\n"),
            ok("main\n"),
            ok("abc123def\n"),
            ok(""),
            ok("git version 2.43.0\n"),
        ]
    }

    fn run(args: &[&str], ctx: &ServiceContext) -> Result<String, CliError> {
        let mut out = Vec::new();
        let mut argv = vec!["gitinfo"];
        argv.extend_from_slice(args);
        dispatch_with_context(argv, ctx, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn displays_selected_fields() {
        let ctx = context(working_copy(), &[("EDITOR", "nano")]);
        let text = run(&["-f", "branch,user.*,modified", "/work"], &ctx).unwrap();
        assert_eq!(
            text,
            "branch     = main\n\
             user.email = ada@example.com\n\
             user.name  = Ada\n\
             modified   = false\n"
        );
    }

    #[test]
    fn short_display_of_source_fields() {
        let ctx = context(working_copy(), &[]);
        assert_eq!(run(&["-src", "-s", "/work"], &ctx).unwrap(), "main\nabc123def\nfalse\n");
    }

    #[test]
    fn empty_field_list_falls_back_to_env_shortcut() {
        let ctx = context(working_copy(), &[("EDITOR", "nano")]);
        let text = run(&["-f", "", "-env", "/work"], &ctx).unwrap();
        assert_eq!(
            text,
            "editor     = nano\n\
             path       = /work\n\
             root       = /work\n\
             user.email = ada@example.com\n\
             user.name  = Ada\n\
             version    = 2.43.0\n"
        );
    }

    #[test]
    fn header_records_the_command_as_typed() {
        let ctx = context(working_copy(), &[]);
        let text = run(&["-X", "build.GIT", "-runtime", "-short", "/work"], &ctx).unwrap();
        assert!(text.contains("//   % gitinfo -X build.GIT -runtime -short /work\n"));
    }

    #[test]
    fn non_identifier_symbol_exits_with_one() {
        let err = run(&["-X", "my-pkg.v"], &context(vec![], &[])).unwrap_err();
        assert!(matches!(err, CliError::Symbol(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_field_exits_with_three() {
        let ctx = context(working_copy(), &[]);
        let err = run(&["-f", "bogus", "/work"], &ctx).unwrap_err();
        assert!(matches!(err, CliError::Fields(FieldError::UnknownField(_))));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn malformed_symbol_exits_with_one_before_running_git() {
        let ctx = context(vec![], &[]);
        let err = run(&["-X", "nodot"], &ctx).unwrap_err();
        assert_eq!(err.to_string(), "invalid symbol \"nodot\"; expected pkg.var");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_git_exits_with_two() {
        let missing = json!({"err": {"kind": "missing_executable", "program": "git"}});
        let ctx = context(vec![missing], &[]);
        let err = run(&["/work"], &ctx).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "git executable not found: git");
    }

    #[test]
    fn generates_source_with_clock_timestamp() {
        let ctx = context(working_copy(), &[]);
        let text = run(&["-X", "build.GIT", "-src", "/work"], &ctx).unwrap();
        assert!(text.starts_with("// generated by gitinfo v"));
        assert!(text.contains("//           on 2024-06-15 10:30:00 UTC\n"));
        assert!(text.contains("//   % gitinfo -X build.GIT -src /work\n"));
        assert!(text.contains("let fields: [(&str, &str); 3] = ["));
        assert!(text.contains("(\"branch\", \"main\"),"));
        assert!(text.contains("(\"commit\", \"abc123def\"),"));
    }

    #[test]
    fn writes_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.txt");
        let ctx = context(working_copy(), &[]);
        let text = run(&["-o", path.to_str().unwrap(), "-f", "branch", "/work"], &ctx).unwrap();
        assert_eq!(text, "");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "branch = main\n");
    }

    #[test]
    fn output_file_failure_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("info.txt");
        let err = run(&["-o", path.to_str().unwrap()], &context(vec![], &[])).unwrap_err();
        assert!(matches!(err, CliError::Output { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn short_version_needs_no_git() {
        let text = run(&["-v"], &context(vec![], &[])).unwrap();
        assert_eq!(text, format!("gitinfo v{}\n", tag::VERSION));
    }

    #[test]
    fn long_version_describes_own_checkout() {
        let outputs = vec![
            ok(""),
            json!({"err": {"kind": "not_a_working_copy", "path": "/gitinfo"}}),
            ok("git version 2.43.0\n"),
        ];
        let text = run(&["-version"], &context(outputs, &[])).unwrap();
        assert_eq!(text, format!("gitinfo v{} git v2.43.0\n", tag::VERSION));
    }

    #[test]
    fn help_lists_selectable_fields() {
        let text = run(&["--help"], &context(vec![], &[])).unwrap();
        assert!(text.contains("user.*"));
        assert!(run(&["-h"], &context(vec![], &[])).unwrap().contains("Usage:"));
    }

    #[test]
    fn bad_flag_uses_clap_exit_code() {
        let err = run(&["--bogus"], &context(vec![], &[])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
