//! Error types for the session cookie codec

use thiserror::Error;

/// Result type for session codec operations
pub type CodecResult<T> = Result<T, SessionCodecError>;

/// Errors raised while encoding, splitting, or reconstructing a session
/// credential.
///
/// Reconstruction failures (`Decode`, `CorruptFragmentSequence`) are
/// consumed at the point of use and degrade to an unauthenticated request;
/// they never propagate out of the request pipeline. `SlotCapacityExceeded`
/// is the one write-path error a caller must surface, since it means the
/// login cannot be persisted without truncation.
#[derive(Debug, Error)]
pub enum SessionCodecError {
    /// Malformed compressed or encoded credential bytes
    #[error("credential decode failed: {0}")]
    Decode(String),

    /// An overflow slot is absent while a later slot is present
    #[error("corrupt fragment sequence: slot {missing_slot} missing before a later fragment")]
    CorruptFragmentSequence {
        /// 1-based index of the first absent slot
        missing_slot: usize,
    },

    /// The compressed credential needs more overflow slots than configured
    #[error("credential requires {required} overflow slots but only {max} are configured")]
    SlotCapacityExceeded { required: usize, max: usize },

    /// Core session cookie serialization failed
    #[error("session cookie encode failed: {0}")]
    Encode(String),
}
