//! Exit code constants for the coco-bridge CLI.
//!
//! The bridge's contract is "always emit one JSON envelope", so contract-level
//! failures (missing workspace, nonzero coco exit, unparseable output) still
//! exit with SUCCESS — the failure is a field inside the envelope. Only
//! platform-level faults where no envelope could be produced exit nonzero.

/// Successful execution: one envelope was printed (success or failure inside).
pub const SUCCESS: i32 = 0;

/// The coco child process could not be created at all.
pub const LAUNCH_FAILURE: i32 = 1;

/// The result envelope could not be serialized to JSON.
pub const ENVELOPE_FAILURE: i32 = 2;
