//! Coco subprocess launcher.
//!
//! Resolves the coco executable, augments the child environment, wraps
//! script-type executables in the platform's command interpreter, and runs
//! the process synchronously with full output capture.
//!
//! The launcher does not classify failures: a nonzero exit code is data in
//! the [`LaunchResult`], and only the inability to create the process at all
//! is an error. Timeouts are not enforced here either; timeout strings ride
//! along as coco arguments and coco honors them itself.

pub mod escape;
pub mod platform;

use crate::error::{BridgeError, Result};
use crate::launcher::platform::{EnvMap, Platform};
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of one coco run. Immutable once produced.
#[derive(Debug, Clone)]
pub struct LaunchResult {
    /// Exit code of the process. A signal-killed child (no code) surfaces
    /// as -1.
    pub exit_code: i32,
    /// Captured stdout, lossily decoded as UTF-8.
    pub stdout: String,
    /// Captured stderr, lossily decoded as UTF-8.
    pub stderr: String,
}

/// Execute `argv` in `cwd`, capturing both streams.
///
/// The child receives a copy of the current environment with the platform's
/// install directories prepended to PATH; the parent environment is never
/// touched. Stdin is closed so any read by the child fails immediately
/// instead of blocking.
pub fn run_command(
    platform: &dyn Platform,
    argv: &[String],
    cwd: &Path,
) -> Result<LaunchResult> {
    // vars() panics on non-Unicode values, which are legal on Unix; a stray
    // ambient variable must not take the bridge down before launch.
    let mut env: EnvMap = std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect();
    platform.augment_path(&mut env);

    let exe = platform.resolve_executable(&argv[0], &env);

    let mut command = if platform.wraps_in_shell(&exe) {
        // cmd.exe re-parses the command line, so each argument is quoted for
        // its grammar and the interpreter is invoked with /d (skip AutoRun),
        // /s (strict quote handling), /c (run and exit).
        let mut line_argv = argv.to_vec();
        line_argv[0] = exe.clone();
        let line = escape::command_line(&line_argv);
        let comspec = env
            .get("COMSPEC")
            .cloned()
            .unwrap_or_else(|| "cmd.exe".to_string());
        let mut command = Command::new(&comspec);
        shell_args(&mut command, &line);
        command
    } else {
        let mut command = Command::new(&exe);
        command.args(&argv[1..]);
        command
    };

    let output = command
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env_clear()
        .envs(&env)
        .output()
        .map_err(|e| BridgeError::Launch {
            program: exe.clone(),
            source: e,
        })?;

    Ok(LaunchResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Attach the assembled cmd.exe line to the interpreter invocation.
///
/// On Windows the line must reach CreateProcess verbatim; letting `Command`
/// re-quote it would corrupt the caret escapes.
#[cfg(windows)]
fn shell_args(command: &mut Command, line: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(format!("/d /s /c \"{line}\""));
}

#[cfg(not(windows))]
fn shell_args(command: &mut Command, line: &str) {
    command.args(["/d", "/s", "/c", line]);
}
