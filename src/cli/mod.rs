//! CLI argument parsing for coco-bridge.
//!
//! Uses clap derive macros for declarative argument definitions. The bridge
//! has a single command surface (no subcommands): every invocation runs one
//! coco query and prints one JSON envelope.
//!
//! Flag names are part of the orchestrator-facing contract and keep the
//! original casing (`--PROMPT`, `--SESSION_ID`) so existing call sites
//! continue to work.

use clap::Parser;
use std::path::PathBuf;

/// Coco Bridge: run the coco agent CLI and normalize its output to JSON.
///
/// The bridge launches `coco --print --json` with the given prompt inside
/// the workspace directory, parses whatever coco prints (single JSON,
/// line-delimited JSON, or raw text), and emits exactly one JSON object on
/// stdout describing the outcome.
#[derive(Parser, Debug)]
#[command(name = "coco-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Instruction for the task to send to coco.
    #[arg(long = "PROMPT")]
    pub prompt: String,

    /// Workspace root for coco; the task executes with this as its working
    /// directory. Must exist.
    #[arg(long)]
    pub cd: PathBuf,

    /// Resume the specified coco session. Empty (the default) starts a new
    /// session.
    #[arg(long = "SESSION_ID", default_value = "")]
    pub session_id: String,

    /// Return all messages (reasoning, tool calls, etc.) from the coco
    /// session instead of only the agent's final reply text.
    #[arg(long)]
    pub return_all_messages: bool,

    /// Model for the coco session; forwarded only when non-empty. Leave unset
    /// unless the caller explicitly asked for a specific model.
    #[arg(long, default_value = "")]
    pub model: String,

    /// Enable YOLO mode: bypass tool permission checks.
    #[arg(long)]
    pub yolo: bool,

    /// Auto-approve this tool (e.g. 'Bash', 'Edit', 'Write'); repeatable.
    #[arg(long)]
    pub allowed_tool: Vec<String>,

    /// Auto-reject this tool; repeatable.
    #[arg(long)]
    pub disallowed_tool: Vec<String>,

    /// Timeout for the bash tool, forwarded verbatim (e.g. '30s', '5m', '1h').
    #[arg(long, default_value = "")]
    pub bash_tool_timeout: String,

    /// Timeout for a single query, forwarded verbatim (e.g. '30s', '5m', '1h').
    #[arg(long, default_value = "")]
    pub query_timeout: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
