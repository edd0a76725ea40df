//! cmd.exe argument quoting.
//!
//! Running a `.cmd`/`.bat` wrapper means the argument vector is re-parsed by
//! cmd.exe, so arguments must be quoted for cmd.exe's grammar, not for
//! CreateProcess. This module implements the narrow subset the bridge needs:
//!
//! - empty arguments become `""`
//! - `%` and `^` are doubled so cmd.exe does not expand or consume them
//! - any argument containing a metacharacter or whitespace is wrapped in
//!   quotes, with embedded quotes escaped as `"^""`
//!
//! This is not a general shell grammar; it covers one interpreter's
//! command-line invocation and nothing more.

/// Characters that force an argument to be quoted. Checked after `%`/`^`
/// doubling, so a doubled caret still triggers quoting via `^`.
const METACHARS: &[char] = &['&', '|', '<', '>', '(', ')', '^', '"', ' ', '\t'];

/// Quote a single argument for cmd.exe.
pub fn cmd_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    let arg = arg.replace('%', "%%").replace('^', "^^");
    if arg.contains(METACHARS) {
        format!("\"{}\"", arg.replace('"', "\"^\"\""))
    } else {
        arg
    }
}

/// Assemble a full cmd.exe command line from an argument vector.
pub fn command_line(args: &[String]) -> String {
    args.iter()
        .map(|a| cmd_quote(a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape newline, carriage return, and tab in prompt text to literal
/// two-character sequences. cmd.exe command lines are single-line; control
/// characters would otherwise truncate the prompt.
pub fn escape_control_chars(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reverse of `cmd_quote` for round-trip tests: tokenizes a quoted
    /// argument the way cmd.exe hands it to a batch file, undoing the
    /// quote-wrapping, the `"^""` escape, and the `%`/`^` doubling.
    fn cmd_unquote(quoted: &str) -> String {
        let unwrapped = if quoted.starts_with('"') && quoted.len() >= 2 {
            quoted[1..quoted.len() - 1].replace("\"^\"\"", "\"")
        } else {
            quoted.to_string()
        };
        unwrapped.replace("%%", "%").replace("^^", "^")
    }

    #[test]
    fn empty_argument_becomes_quoted_pair() {
        assert_eq!(cmd_quote(""), "\"\"");
    }

    #[test]
    fn plain_argument_passes_through() {
        assert_eq!(cmd_quote("--print"), "--print");
        assert_eq!(cmd_quote("model.name=foo"), "model.name=foo");
    }

    #[test]
    fn percent_is_doubled() {
        assert_eq!(cmd_quote("100%"), "100%%");
    }

    #[test]
    fn caret_is_doubled_and_quoted() {
        // Doubling introduces '^', which is itself a metacharacter, so the
        // result is also quoted.
        assert_eq!(cmd_quote("a^b"), "\"a^^b\"");
    }

    #[test]
    fn whitespace_forces_quoting() {
        assert_eq!(cmd_quote("hello world"), "\"hello world\"");
        assert_eq!(cmd_quote("a\tb"), "\"a\tb\"");
    }

    #[test]
    fn metacharacters_force_quoting() {
        assert_eq!(cmd_quote("a&b"), "\"a&b\"");
        assert_eq!(cmd_quote("a|b"), "\"a|b\"");
        assert_eq!(cmd_quote("(x)"), "\"(x)\"");
        assert_eq!(cmd_quote("a<b>c"), "\"a<b>c\"");
    }

    #[test]
    fn embedded_quote_is_escaped() {
        assert_eq!(cmd_quote("say \"hi\""), "\"say \"^\"\"hi\"^\"\"\"");
    }

    #[test]
    fn space_and_quote_round_trip() {
        for original in [
            "hello world",
            "say \"hi\"",
            "a \"b c\" d",
            "50% off & more",
            "caret ^ here",
        ] {
            let quoted = cmd_quote(original);
            assert_eq!(cmd_unquote(&quoted), original, "round trip of {original:?}");
        }
    }

    #[test]
    fn command_line_joins_with_spaces() {
        let args = vec![
            "coco.cmd".to_string(),
            "--print".to_string(),
            "two words".to_string(),
        ];
        assert_eq!(command_line(&args), "coco.cmd --print \"two words\"");
    }

    #[test]
    fn escape_control_chars_rewrites_all_three() {
        assert_eq!(
            escape_control_chars("line1\nline2\r\tend"),
            "line1\\nline2\\r\\tend"
        );
    }

    #[test]
    fn escape_control_chars_leaves_plain_text() {
        assert_eq!(escape_control_chars("no controls"), "no controls");
    }
}
