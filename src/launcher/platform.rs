//! Platform strategy for launching the coco executable.
//!
//! npm installs coco as a `.cmd` shim on Windows, so that platform family
//! needs PATH augmentation, extension-aware executable resolution, and a
//! cmd.exe wrapper. Everywhere else the bare name is handed straight to the
//! OS. The two behaviors live behind one trait, selected once at startup, so
//! the launcher itself stays free of platform checks.
//!
//! All `CmdShell` logic operates on an explicit environment map and real
//! filesystem probes, never on process-global state, so it is unit-testable
//! on any host.

use crate::launcher::escape;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Copied child-process environment. Mutations here never touch the parent.
pub type EnvMap = HashMap<String, String>;

/// Extension probe order when resolving an npm-style executable. Script
/// shims first: an extensionless hit next to a `.cmd` is usually a POSIX
/// shell script that cmd.exe cannot run.
const PROBE_EXTS: &[&str] = &[".cmd", ".bat", ".exe", ".com"];

/// Extensions that require the cmd.exe wrapper instead of direct execution.
const SCRIPT_EXTS: &[&str] = &["cmd", "bat"];

/// Platform-specific launch behavior.
pub trait Platform {
    /// Prepend any missing well-known install directories to the PATH entry
    /// of the child environment.
    fn augment_path(&self, env: &mut EnvMap);

    /// Resolve a bare command name to a concrete executable path, or return
    /// the name unchanged if nothing better is found (process creation then
    /// fails naturally).
    fn resolve_executable(&self, name: &str, env: &EnvMap) -> String;

    /// Whether the resolved executable must be run through the platform's
    /// command interpreter.
    fn wraps_in_shell(&self, exe: &str) -> bool;

    /// Pre-escape prompt text for this platform's command line.
    fn escape_prompt(&self, prompt: &str) -> String;
}

/// Select the strategy for the current host. Done once at startup.
pub fn current() -> &'static dyn Platform {
    if cfg!(windows) { &CmdShell } else { &DirectExec }
}

/// Windows family: npm install-dir probing, extension resolution, cmd.exe
/// quoting. PATH entries are `;`-separated and compared case-insensitively.
pub struct CmdShell;

impl CmdShell {
    const PATH_SEP: char = ';';

    /// Candidate directories for npm global installs, derived from the
    /// environment. Order matters: explicit prefix first, then per-user
    /// locations, then the system nodejs directory.
    pub fn install_dirs(env: &EnvMap) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(prefix) = env
            .get("NPM_CONFIG_PREFIX")
            .or_else(|| env.get("npm_config_prefix"))
            .filter(|v| !v.is_empty())
        {
            dirs.push(PathBuf::from(prefix));
        }
        if let Some(appdata) = env.get("APPDATA").filter(|v| !v.is_empty()) {
            dirs.push(Path::new(appdata).join("npm"));
        }
        if let Some(local) = env.get("LOCALAPPDATA").filter(|v| !v.is_empty()) {
            dirs.push(Path::new(local).join("npm"));
        }
        if let Some(pf) = env.get("ProgramFiles").filter(|v| !v.is_empty()) {
            dirs.push(Path::new(pf).join("nodejs"));
        }
        dirs
    }

    /// Find the PATH key with a case-insensitive match ("Path" is common).
    fn path_key(env: &EnvMap) -> String {
        env.keys()
            .find(|k| k.eq_ignore_ascii_case("PATH"))
            .cloned()
            .unwrap_or_else(|| "PATH".to_string())
    }

    /// Search PATH entries for the named command, trying the bare name first
    /// and then each probe extension per directory.
    fn search_path(name: &str, path_value: &str) -> Option<PathBuf> {
        for dir in path_value.split(Self::PATH_SEP).filter(|d| !d.is_empty()) {
            let dir = Path::new(dir);
            let exact = dir.join(name);
            if exact.is_file() {
                return Some(exact);
            }
            for ext in PROBE_EXTS {
                let candidate = dir.join(format!("{name}{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn has_path_separator(name: &str) -> bool {
        name.contains('\\') || name.contains('/')
    }
}

impl Platform for CmdShell {
    fn augment_path(&self, env: &mut EnvMap) {
        let key = Self::path_key(env);
        let mut entries: Vec<String> = env
            .get(&key)
            .map(|v| {
                v.split(Self::PATH_SEP)
                    .filter(|e| !e.is_empty())
                    .map(|e| e.to_string())
                    .collect()
            })
            .unwrap_or_default();
        let mut seen: Vec<String> = entries.iter().map(|e| e.to_lowercase()).collect();
        for candidate in Self::install_dirs(env) {
            let text = candidate.to_string_lossy().to_string();
            let lower = text.to_lowercase();
            if candidate.is_dir() && !seen.contains(&lower) {
                entries.insert(0, text);
                seen.push(lower);
            }
        }
        let sep = Self::PATH_SEP.to_string();
        env.insert(key, entries.join(sep.as_str()));
    }

    fn resolve_executable(&self, name: &str, env: &EnvMap) -> String {
        // Explicit paths are the caller's business; resolution only applies
        // to bare names.
        if Self::has_path_separator(name) || Path::new(name).is_absolute() {
            return name.to_string();
        }

        let key = Self::path_key(env);
        let path_value = env.get(&key).map(String::as_str).unwrap_or("");

        if let Some(found) = Self::search_path(name, path_value) {
            // An extensionless hit is likely a POSIX shim; prefer a sibling
            // with a runnable extension when one exists.
            if found.extension().is_none() {
                if let Some(dir) = found.parent() {
                    for ext in PROBE_EXTS {
                        let sibling = dir.join(format!("{name}{ext}"));
                        if sibling.is_file() {
                            return sibling.to_string_lossy().into_owned();
                        }
                    }
                }
            }
            return found.to_string_lossy().into_owned();
        }

        // PATH search failed entirely; probe the install dirs directly.
        for base in Self::install_dirs(env) {
            for ext in PROBE_EXTS {
                let candidate = base.join(format!("{name}{ext}"));
                if candidate.is_file() {
                    return candidate.to_string_lossy().into_owned();
                }
            }
        }

        name.to_string()
    }

    fn wraps_in_shell(&self, exe: &str) -> bool {
        Path::new(exe)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let lower = e.to_lowercase();
                SCRIPT_EXTS.iter().any(|s| *s == lower)
            })
            .unwrap_or(false)
    }

    fn escape_prompt(&self, prompt: &str) -> String {
        escape::escape_control_chars(prompt)
    }
}

/// Everything that is not the Windows family: no PATH games, no shell
/// wrapper, the OS resolves the bare name itself.
pub struct DirectExec;

impl Platform for DirectExec {
    fn augment_path(&self, _env: &mut EnvMap) {}

    fn resolve_executable(&self, name: &str, _env: &EnvMap) -> String {
        name.to_string()
    }

    fn wraps_in_shell(&self, _exe: &str) -> bool {
        false
    }

    fn escape_prompt(&self, prompt: &str) -> String {
        prompt.to_string()
    }
}
