//! The bridge envelope: the single JSON object this tool prints.
//!
//! Field presence is the contract: `success` is always there, `SESSION_ID`
//! whenever one was discovered (even on failure, so the caller can resume),
//! `agent_messages` only on success, `error` only on failure, and
//! `all_messages` only when the caller asked for the full message list.
//! Serialization order matches field order below.

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Final output of one bridge invocation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Envelope {
    /// Session identifier discovered in coco's output, if any.
    #[serde(rename = "SESSION_ID", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Aggregated assistant reply text. Present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_messages: Option<String>,

    /// Human-readable failure description. Present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Whether the invocation produced a usable agent reply.
    pub success: bool,

    /// Every parsed message in output order, untouched. Present only when
    /// verbose output was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_messages: Option<Vec<Value>>,
}

impl Envelope {
    /// A failure envelope with no session and no messages, for errors that
    /// occur before or instead of a launch.
    pub fn failure(error: impl Into<String>) -> Self {
        Envelope {
            session_id: None,
            agent_messages: None,
            error: Some(error.into()),
            success: false,
            all_messages: None,
        }
    }

    /// Pretty-print with non-ASCII characters left unescaped, matching the
    /// output contract.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
