//! Error types for the coco-bridge CLI.
//!
//! Uses thiserror for derive macros. Deliberately tiny: almost every failure
//! mode is reported inside the JSON envelope rather than as a process error.
//! The variants here are the platform-level faults that make producing an
//! envelope impossible.

use crate::exit_codes;
use std::io;
use thiserror::Error;

/// Fatal errors for bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The child process could not be created (executable truly missing,
    /// permission denied, etc.).
    #[error(
        "failed to execute '{program}': {source}\n\
         Fix: ensure the coco CLI is installed and reachable via PATH."
    )]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The final envelope failed to serialize.
    #[error("failed to serialize result envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

impl BridgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Launch { .. } => exit_codes::LAUNCH_FAILURE,
            BridgeError::Envelope(_) => exit_codes::ENVELOPE_FAILURE,
        }
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_has_correct_exit_code() {
        let err = BridgeError::Launch {
            program: "coco".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), exit_codes::LAUNCH_FAILURE);
    }

    #[test]
    fn launch_error_message_names_the_program() {
        let err = BridgeError::Launch {
            program: "coco".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'coco'"));
        assert!(msg.contains("installed"));
    }
}
