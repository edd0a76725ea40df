//! Coco command-line assembly.
//!
//! Builds the argv forwarded to the coco CLI from the parsed bridge flags.
//! The base invocation is `coco --print --json <PROMPT>`; every optional
//! flag is front-inserted after the program name, so later insertions end
//! up earlier in the final argv. Coco accepts its flags in any position;
//! the ordering is kept stable anyway so logs and tests are deterministic.

use crate::cli::Cli;
use crate::launcher::platform::Platform;

/// The external tool this bridge wraps.
pub const COCO_PROGRAM: &str = "coco";

/// Assemble the coco argv for one invocation.
///
/// The prompt is pre-escaped by the platform strategy (control characters
/// become literal two-character sequences on the cmd.exe family).
pub fn build_argv(args: &Cli, platform: &dyn Platform) -> Vec<String> {
    let prompt = platform.escape_prompt(&args.prompt);

    let mut cmd: Vec<String> = vec![
        COCO_PROGRAM.to_string(),
        "--print".to_string(),
        "--json".to_string(),
        prompt,
    ];

    if args.yolo {
        cmd.insert(1, "--yolo".to_string());
    }

    if !args.model.is_empty() {
        cmd.insert(1, format!("model.name={}", args.model));
        cmd.insert(1, "-c".to_string());
    }

    if !args.session_id.is_empty() {
        cmd.insert(1, args.session_id.clone());
        cmd.insert(1, "--resume".to_string());
    }

    for tool in &args.allowed_tool {
        cmd.insert(1, tool.clone());
        cmd.insert(1, "--allowed-tool".to_string());
    }

    for tool in &args.disallowed_tool {
        cmd.insert(1, tool.clone());
        cmd.insert(1, "--disallowed-tool".to_string());
    }

    if !args.bash_tool_timeout.is_empty() {
        cmd.insert(1, args.bash_tool_timeout.clone());
        cmd.insert(1, "--bash-tool-timeout".to_string());
    }

    if !args.query_timeout.is_empty() {
        cmd.insert(1, args.query_timeout.clone());
        cmd.insert(1, "--query-timeout".to_string());
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::platform::{CmdShell, DirectExec};
    use clap::Parser;

    fn parse(extra: &[&str]) -> Cli {
        let mut argv = vec!["coco-bridge", "--PROMPT", "do it", "--cd", "/tmp"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn base_invocation() {
        let cli = parse(&[]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(argv, vec!["coco", "--print", "--json", "do it"]);
    }

    #[test]
    fn yolo_flag_is_prepended() {
        let cli = parse(&["--yolo"]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(argv, vec!["coco", "--yolo", "--print", "--json", "do it"]);
    }

    #[test]
    fn model_becomes_config_override_pair() {
        let cli = parse(&["--model", "big-model"]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(
            argv,
            vec!["coco", "-c", "model.name=big-model", "--print", "--json", "do it"]
        );
    }

    #[test]
    fn session_id_becomes_resume_pair() {
        let cli = parse(&["--SESSION_ID", "sess-42"]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(
            argv,
            vec!["coco", "--resume", "sess-42", "--print", "--json", "do it"]
        );
    }

    #[test]
    fn empty_session_and_model_are_omitted() {
        let cli = parse(&["--SESSION_ID", "", "--model", ""]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(argv, vec!["coco", "--print", "--json", "do it"]);
    }

    #[test]
    fn tool_lists_front_insert_in_reverse() {
        let cli = parse(&["--allowed-tool", "Bash", "--allowed-tool", "Edit"]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(
            argv,
            vec![
                "coco",
                "--allowed-tool",
                "Edit",
                "--allowed-tool",
                "Bash",
                "--print",
                "--json",
                "do it"
            ]
        );
    }

    #[test]
    fn timeouts_are_forwarded_verbatim() {
        let cli = parse(&["--bash-tool-timeout", "30s", "--query-timeout", "5m"]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(
            argv,
            vec![
                "coco",
                "--query-timeout",
                "5m",
                "--bash-tool-timeout",
                "30s",
                "--print",
                "--json",
                "do it"
            ]
        );
    }

    #[test]
    fn all_options_combined_keep_front_insert_order() {
        let cli = parse(&[
            "--yolo",
            "--model",
            "m1",
            "--SESSION_ID",
            "s1",
            "--allowed-tool",
            "Bash",
            "--disallowed-tool",
            "Write",
            "--bash-tool-timeout",
            "30s",
            "--query-timeout",
            "5m",
        ]);
        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(
            argv,
            vec![
                "coco",
                "--query-timeout",
                "5m",
                "--bash-tool-timeout",
                "30s",
                "--disallowed-tool",
                "Write",
                "--allowed-tool",
                "Bash",
                "--resume",
                "s1",
                "-c",
                "model.name=m1",
                "--yolo",
                "--print",
                "--json",
                "do it"
            ]
        );
    }

    #[test]
    fn cmd_shell_platform_escapes_prompt_controls() {
        let cli = Cli::try_parse_from([
            "coco-bridge",
            "--PROMPT",
            "line1\nline2\ttab",
            "--cd",
            "/tmp",
        ])
        .unwrap();
        let argv = build_argv(&cli, &CmdShell);
        assert_eq!(argv[3], "line1\\nline2\\ttab");

        let argv = build_argv(&cli, &DirectExec);
        assert_eq!(argv[3], "line1\nline2\ttab");
    }
}
