//! Binary entrypoint for the `gitinfo` CLI.

use std::process::ExitCode;

use gitinfo::CliError;

fn main() -> ExitCode {
    env_logger::init();

    // Recording and replay are selected in commands::dispatch via GITINFO_RECORD / GITINFO_REPLAY.
    let mut stdout = std::io::stdout().lock();
    match gitinfo::run(std::env::args_os(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                CliError::Usage(usage) => {
                    let _ = usage.print();
                }
                _ => eprintln!("gitinfo: error: {err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}
