//! Typed errors for the public API.
//!
//! Internally the engine still passes around the `i32` sentinel codes
//! native to the wire format (0 = incompressible/raw-store, negative =
//! error), see `crate::internal_codes`. Only the public entry points
//! in `lib.rs` translate those into `BloscError`.

use thiserror::Error;

/// Errors surfaced by the public compress/decompress entry points.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BloscError {
    #[error("parameter out of range: {what} = {value}")]
    ParameterOutOfRange { what: &'static str, value: i64 },

    #[error("destination buffer too small: need {needed} bytes, have {have}")]
    OutputTooSmall { needed: usize, have: usize },

    #[error("corrupt header: {reason}")]
    HeaderCorrupt { reason: &'static str },

    #[error("entropy codec failure: {reason}")]
    CodecFailure { reason: &'static str },

    #[error("internal invariant violated: {reason}")]
    Internal { reason: &'static str },
}

impl BloscError {
    /// Map an internal negative sentinel code to a typed error.
    ///
    /// Matches the code space in `internal_codes` (itself mirroring
    /// `BLOSC2_ERROR_*` in src/include/blosc2/codecs-registry.h and
    /// blosc2.h).
    pub(crate) fn from_code(code: i32) -> Self {
        match code {
            -1 => BloscError::Internal {
                reason: "generic engine failure",
            },
            -2 => BloscError::CodecFailure {
                reason: "entropy decoder produced an unexpected byte count",
            },
            -5 => BloscError::OutputTooSmall {
                needed: 0,
                have: 0,
            },
            -11 => BloscError::HeaderCorrupt {
                reason: "invalid header field",
            },
            -12 => BloscError::ParameterOutOfRange {
                what: "unspecified",
                value: 0,
            },
            _ => BloscError::Internal {
                reason: "unrecognized engine error code",
            },
        }
    }
}
