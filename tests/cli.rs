//! Integration tests for top-level CLI behavior.
//!
//! The binary runs against replayed cassettes (`GITINFO_REPLAY`) so the
//! results do not depend on the git installation or the host checkout.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};

use gitinfo::cassette::recorder::CassetteRecorder;

const HASH: &str = "abc123def4567890abc123def4567890abc123de";

fn ok(stdout: &str) -> Value {
    json!({ "ok": stdout })
}

/// Git answers for a clean checkout of `main` at `/work`, in the order the
/// facade asks for them.
fn working_copy() -> Vec<Value> {
    vec![
        ok("user.name\nAda Lovelace\0user.email\nada@example.com\0"),
        ok("/work\n"),
        ok("main\n"),
        ok(&format!("{HASH}\n")),
        ok(" M src/lib.rs\n"),
        ok("git version 2.43.0\n"),
    ]
}

fn write_cassette(dir: &Path, git: Vec<Value>, env: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("session.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&path, "cli-test");
    for output in git {
        recorder.record("git", "run", json!({}), output);
    }
    for (name, value) in env {
        recorder.record("env", "var", json!({ "name": name }), json!(value));
    }
    recorder.record("clock", "now", json!(null), json!("2024-06-15T10:30:00Z"));
    recorder.finish().expect("cassette should be written")
}

fn run_gitinfo(cassette: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_gitinfo");
    Command::new(bin)
        .args(args)
        .env("GITINFO_REPLAY", cassette)
        .env_remove("GITINFO_RECORD")
        .output()
        .expect("failed to run gitinfo binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn displays_every_field_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), working_copy(), &[("EDITOR", "nano")]);
    let output = run_gitinfo(&cassette, &["/work"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "branch     = main\n\
             commit     = {HASH}\n\
             editor     = nano\n\
             modified   = true\n\
             path       = /work\n\
             root       = /work\n\
             user.email = ada@example.com\n\
             user.name  = Ada Lovelace\n\
             version    = 2.43.0\n"
        )
    );
}

#[test]
fn short_display_of_user_fields() {
    let dir = tempfile::tempdir().unwrap();
    let cassette =
        write_cassette(dir.path(), working_copy(), &[("GIT_AUTHOR_NAME", "Grace Hopper")]);
    let output = run_gitinfo(&cassette, &["-short", "-f", "user.*", "/work"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "ada@example.com\nGrace Hopper\n");
}

#[test]
fn env_shortcut_selects_environment_fields() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), working_copy(), &[]);
    let output = run_gitinfo(&cassette, &["-env", "/work"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("editor     = vi\n"));
    assert!(text.ends_with("version    = 2.43.0\n"));
    assert!(!text.contains("branch"));
}

#[test]
fn unmatched_wildcard_exits_with_three() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), working_copy(), &[]);
    let output = run_gitinfo(&cassette, &["-f", "bogus.*", "/work"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("gitinfo: error: no match for pattern \"bogus.*\""));
    assert!(stdout(&output).is_empty());
}

#[test]
fn malformed_symbol_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), vec![], &[]);
    let output = run_gitinfo(&cassette, &["-X", "a.b.c"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid symbol"));
}

#[test]
fn missing_git_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    let missing = json!({"err": {"kind": "missing_executable", "program": "git"}});
    let cassette = write_cassette(dir.path(), vec![missing], &[]);
    let output = run_gitinfo(&cassette, &["/work"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("git executable not found"));
}

#[test]
fn generates_runtime_source() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), working_copy(), &[]);
    let output = run_gitinfo(&cassette, &["-X", "build.GIT", "-runtime", "-src", "/work"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("//           on 2024-06-15 10:30:00 UTC\n"));
    assert!(text.contains("//   DO NOT EDIT; local changes will be overridden\n"));
    assert!(text.contains("pub mod build {"));
    assert!(text.contains("pub static GIT: LazyLock<Box<dyn GitInfo + Send + Sync>>"));
    assert!(text.contains("if let Ok(info) = gitinfo::here!() {"));
    let payload = format!(
        "            (\"branch\", \"main\"),\n\
         \x20           (\"commit\", \"{HASH}\"),\n\
         \x20           (\"modified\", \"true\"),\n"
    );
    assert!(text.contains(&payload));
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), working_copy(), &[]);
    let target = dir.path().join("git_info.rs");
    let output =
        run_gitinfo(&cassette, &["-o", target.to_str().unwrap(), "-X", "build.GIT", "/work"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("let fields: [(&str, &str); 9] = ["));
}

#[test]
fn unwritable_output_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), vec![], &[]);
    let target = dir.path().join("no-such-dir").join("out.txt");
    let output = run_gitinfo(&cassette, &["-o", target.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot create"));
}

#[test]
fn short_version_and_help_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), vec![], &[]);

    let output = run_gitinfo(&cassette, &["-v"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("gitinfo v{}\n", env!("CARGO_PKG_VERSION")));

    let output = run_gitinfo(&cassette, &["-help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("user.*"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = write_cassette(dir.path(), vec![], &[]);
    let output = run_gitinfo(&cassette, &["--bogus"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--bogus"));
}
