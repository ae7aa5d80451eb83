//! Encoder error types
//!
//! The emitter has no recoverable errors of its own: every variant is
//! either a usage error (a bug in the caller, detected before any
//! byte is appended) or a sink that ran out of room mid-message. In
//! the latter case the partial bytes already appended remain and the
//! emitter instance should be discarded.

use thiserror::Error;

use crate::wire::WireType;

/// Errors that can occur during wire-format emission
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Field number outside the legal tag range
    #[error("field number {number} is outside the valid range 1..=536870911")]
    InvalidFieldNumber { number: u32 },

    /// Attempt to emit a deprecated proto2 group tag
    #[error("wire type {0} is a group code and is never emitted")]
    InvalidWireType(WireType),

    /// Fixed-capacity sink exhausted mid-write
    #[error("sink is full: needed {needed} more bytes, {remaining} remaining")]
    SinkFull { needed: usize, remaining: usize },
}

impl EncodeError {
    /// Create an invalid field number error
    #[inline]
    pub fn invalid_field_number(number: u32) -> Self {
        Self::InvalidFieldNumber { number }
    }

    /// Create a sink full error
    #[inline]
    pub fn sink_full(needed: usize, remaining: usize) -> Self {
        Self::SinkFull { needed, remaining }
    }

    /// Check if this error indicates a bug in the caller rather than
    /// an exhausted sink
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFieldNumber { .. } | Self::InvalidWireType(_)
        )
    }
}
