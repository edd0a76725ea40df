//! Response normalizer: raw coco output to a bridge envelope.
//!
//! Coco's output shape varies by version and mode: a single JSON object, a
//! JSON array, or line-delimited JSON. The parser tries those in strict
//! fallback order and feeds whichever shape matched through one shared fold,
//! so session-id and text aggregation behave identically regardless of how
//! the output arrived.

use crate::envelope::Envelope;
use crate::launcher::LaunchResult;
use serde_json::Value;

/// How the output text parsed. One variant per accepted shape.
#[derive(Debug)]
enum ParseOutcome {
    /// A single JSON value; treated as the sole message.
    Single(Value),
    /// A JSON array; each element is one message.
    List(Vec<Value>),
    /// Line-delimited JSON; malformed lines already dropped.
    Lines(Vec<Value>),
}

impl ParseOutcome {
    fn into_messages(self) -> Vec<Value> {
        match self {
            ParseOutcome::Single(value) => vec![value],
            ParseOutcome::List(values) => values,
            ParseOutcome::Lines(values) => values,
        }
    }
}

/// Parse coco stdout, trying single-JSON first and falling back to
/// line-delimited. A fallback that yields zero messages returns the original
/// parse error.
fn parse_output(text: &str) -> Result<ParseOutcome, serde_json::Error> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(ParseOutcome::List(items)),
        Ok(value) => Ok(ParseOutcome::Single(value)),
        Err(err) => {
            let parsed: Vec<Value> = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .filter_map(|line| serde_json::from_str(line).ok())
                .collect();
            if parsed.is_empty() {
                Err(err)
            } else {
                Ok(ParseOutcome::Lines(parsed))
            }
        }
    }
}

/// Result of folding the message sequence.
#[derive(Debug, Default, PartialEq)]
struct Aggregate {
    /// Last non-empty `session_id` seen, in message order.
    session_id: Option<String>,
    /// Concatenated assistant text, no separator.
    text: String,
}

/// Fold session id and assistant text out of the parsed messages.
///
/// An explicit fold keeps the ordering guarantees ("last session id wins")
/// testable in isolation. Non-object messages contribute nothing but are
/// still carried in `all_messages`.
fn fold_messages(messages: &[Value]) -> Aggregate {
    messages.iter().fold(Aggregate::default(), |mut acc, msg| {
        if let Some(sid) = msg.get("session_id").and_then(Value::as_str) {
            if !sid.is_empty() {
                acc.session_id = Some(sid.to_string());
            }
        }
        if msg.get("type").and_then(Value::as_str) == Some("assistant") {
            match msg.get("content") {
                Some(Value::String(text)) => acc.text.push_str(text),
                Some(Value::Array(items)) => {
                    for item in items {
                        if item.get("type").and_then(Value::as_str) == Some("text") {
                            if let Some(text) = item.get("text").and_then(Value::as_str) {
                                acc.text.push_str(text);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        acc
    })
}

/// Normalize a launch result into the final envelope.
///
/// Strict order: exit-code check, then parse, then the fold, then the two
/// contract post-conditions (a session id must exist; a success must carry
/// text). The post-conditions can flip an otherwise-successful run to
/// failure but never discard a discovered session id.
pub fn normalize(result: &LaunchResult, verbose: bool) -> Envelope {
    let stdout_text = result.stdout.trim();
    let stderr_text = result.stderr.trim();

    let mut success = true;
    let mut err_message = String::new();
    let mut messages: Vec<Value> = Vec::new();

    if result.exit_code != 0 {
        success = false;
        err_message = format!("Coco exited with code {}.", result.exit_code);
        if !stderr_text.is_empty() {
            err_message.push_str(&format!("\n\nStderr:\n{stderr_text}"));
        }
        if !stdout_text.is_empty() {
            err_message.push_str(&format!("\n\nStdout:\n{stdout_text}"));
        }
    } else {
        match parse_output(stdout_text) {
            Ok(outcome) => messages = outcome.into_messages(),
            Err(parse_err) => {
                success = false;
                err_message = format!(
                    "Failed to parse JSON output: {parse_err}\n\nRaw output:\n{stdout_text}"
                );
            }
        }
    }

    let aggregate = fold_messages(&messages);

    if aggregate.session_id.is_none() && success {
        success = false;
        err_message = "Failed to get `SESSION_ID` from the coco session.".to_string();
    }

    if success && aggregate.text.is_empty() {
        success = false;
        err_message = format!(
            "Failed to retrieve `agent_messages` data from the Coco session. \
             This might be due to Coco performing a tool call. \
             You can continue using the `SESSION_ID` to proceed with the conversation.\n\n{err_message}"
        );
    }

    Envelope {
        session_id: aggregate.session_id,
        agent_messages: success.then(|| aggregate.text),
        error: (!success).then(|| err_message),
        success,
        all_messages: verbose.then_some(messages),
    }
}
