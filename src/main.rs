//! coco-bridge: run the coco agent CLI and normalize its output to JSON.
//!
//! This is the main entry point. Control flow is linear: parse arguments,
//! validate the workspace directory, assemble the coco argv, launch the
//! process, normalize its output, print one JSON envelope.
//!
//! The bridge exits 0 for every envelope outcome, including failures
//! reported inside the envelope; only platform-level faults (the coco
//! process could not be created at all) exit nonzero.

mod cli;
mod command;
mod envelope;
mod error;
mod exit_codes;
mod launcher;
mod response;

use cli::Cli;
use envelope::Envelope;
use error::Result;
use launcher::platform::Platform;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let platform = launcher::platform::current();
    let cli = Cli::parse_args();

    match run(&cli, platform).and_then(|envelope| envelope.to_json()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::from(exit_codes::SUCCESS as u8)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Execute one bridge invocation and produce the envelope.
///
/// Workspace validation happens before anything is launched: a missing
/// directory is a terminal, non-executing failure envelope.
fn run(cli: &Cli, platform: &dyn Platform) -> Result<Envelope> {
    if !cli.cd.is_dir() {
        let shown = std::path::absolute(&cli.cd).unwrap_or_else(|_| cli.cd.clone());
        return Ok(Envelope::failure(format!(
            "The workspace root directory `{}` does not exist. \
             Please check the path and try again.",
            shown.display()
        )));
    }

    let argv = command::build_argv(cli, platform);
    let cwd = std::path::absolute(&cli.cd).unwrap_or_else(|_| cli.cd.clone());
    let result = launcher::run_command(platform, &argv, Path::new(&cwd))?;

    Ok(response::normalize(&result, cli.return_all_messages))
}
