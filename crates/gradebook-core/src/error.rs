//! Error types shared across the gradebook crates.
//!
//! Gateway errors are defined here rather than in `gradebook-gateway` so the
//! `Gateway` trait and the coordinators can classify failures without string
//! matching.

use thiserror::Error;

/// Message shown for failures that are neither validation nor remote errors.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Errors that can occur when talking to the grading backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The request never reached the backend, or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered 2xx but the body could not be decoded.
    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            GatewayError::Api { code, .. } => code,
            GatewayError::Timeout(_) => "TIMEOUT",
            GatewayError::Network(_) => "NETWORK_ERROR",
            GatewayError::Decode(_) => "PARSE_ERROR",
        }
    }

    /// HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for internal faults that should not be shown verbatim.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, GatewayError::Decode(_))
    }

    /// Text suitable for a coordinator's error state.
    pub fn display_message(&self) -> String {
        if self.is_unexpected() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Errors raised by the grading engine.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GradingError {
    /// A total escaped every grade boundary. Only NaN can do this once the
    /// total is clamped, so seeing it means the input was never validated.
    #[error("total {0} does not fall inside any grade boundary")]
    OutsideBoundaries(f64),
}
