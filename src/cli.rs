//! CLI argument definitions.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::fields;

/// Long options that may also be spelled with a single dash (`-env`).
const SINGLE_DASH_LONGS: [&str; 6] = ["env", "help", "runtime", "short", "src", "version"];

/// Top-level CLI parser for `gitinfo`.
#[derive(Debug, Parser)]
#[command(
    name = "gitinfo",
    about = "Display git working copy information, or generate Rust source embedding it",
    override_usage = "gitinfo [options]\n       gitinfo [options] <path>",
    disable_version_flag = true
)]
pub struct Cli {
    /// Display the command version.
    #[arg(short = 'v', action = ArgAction::SetTrue)]
    pub short_version: bool,

    /// Display the detailed command version.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    pub long_version: bool,

    /// Output just the given comma-separated fields.
    #[arg(short = 'f', value_name = "fields", long_help = fields_long_help())]
    pub fields: Option<String>,

    /// Environment information only; equivalent to -f editor,path,root,user.*,version.
    #[arg(long)]
    pub env: bool,

    /// Source information only; equivalent to -f branch,commit,modified.
    #[arg(long)]
    pub src: bool,

    /// Short display; only output field values.
    #[arg(short, long)]
    pub short: bool,

    /// Output to path instead of stdout.
    #[arg(short = 'o', value_name = "path")]
    pub output: Option<PathBuf>,

    /// Generate Rust source defining the static `pkg.var` instead of displaying.
    #[arg(short = 'X', value_name = "pkg.var")]
    pub symbol: Option<String>,

    /// With -X, resolve live git information at runtime, falling back to
    /// the generated values when it cannot be determined.
    #[arg(short, long)]
    pub runtime: bool,

    /// Location to inspect; defaults to the current directory.
    pub path: Option<PathBuf>,
}

impl Cli {
    /// The field selectors requested, if any.
    ///
    /// An explicit `-f` list wins over `--env`, which wins over `--src`.
    /// An empty `-f` counts as not given.
    #[must_use]
    pub fn selectors(&self) -> Option<Vec<String>> {
        if let Some(list) = self.fields.as_deref().filter(|list| !list.is_empty()) {
            Some(list.split(',').map(ToString::to_string).collect())
        } else if self.env {
            Some(fields::ENV_FIELDS.iter().map(ToString::to_string).collect())
        } else if self.src {
            Some(fields::SRC_FIELDS.iter().map(ToString::to_string).collect())
        } else {
            None
        }
    }
}

fn fields_long_help() -> String {
    let choices: Vec<String> = fields::selectable().iter().map(|f| format!("  {f}")).collect();
    format!("Output just the given comma-separated fields; choose from:\n{}", choices.join("\n"))
}

/// Rewrites single-dash long options (`-env`) into their double-dash form.
///
/// Arguments after `--` are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut done = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if done {
                return arg;
            }
            if arg == "--" {
                done = true;
                return arg;
            }
            let rewritten = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| SINGLE_DASH_LONGS.contains(name))
                .map(|name| format!("--{name}"));
            rewritten.map_or(arg, OsString::from)
        })
        .collect()
}
