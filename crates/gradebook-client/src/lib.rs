//! gradebook-client: Coordinators for the grading workflow.
//!
//! Each coordinator owns one functional area (authentication, rosters, marks,
//! reporting), holds the entities it last loaded, and records a [`Status`]
//! for its most recent action. Inputs are validated locally before any call
//! reaches the [`Gateway`](gradebook_core::traits::Gateway).

pub mod auth;
pub mod marks;
pub mod reporting;
pub mod roster;
pub mod status;

use thiserror::Error;

use gradebook_core::error::{GatewayError, GradingError, UNEXPECTED_ERROR_MESSAGE};
use gradebook_core::validation::ValidationResult;

pub use auth::AuthCoordinator;
pub use marks::MarksCoordinator;
pub use reporting::ReportingCoordinator;
pub use roster::{join_marks, RosterCoordinator};
pub use status::Status;

/// Why a coordinator action failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input was rejected before reaching the backend.
    #[error("{}", .0.summary())]
    Invalid(ValidationResult),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Grading(#[from] GradingError),

    /// Writing an export failed.
    #[error(transparent)]
    Export(#[from] anyhow::Error),
}

impl ClientError {
    /// Internal faults that are reported with a generic message.
    pub fn is_unexpected(&self) -> bool {
        match self {
            ClientError::Invalid(_) => false,
            ClientError::Gateway(err) => err.is_unexpected(),
            ClientError::Grading(_) | ClientError::Export(_) => true,
        }
    }

    /// Text stored in a coordinator's error state.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Invalid(result) => result.summary(),
            ClientError::Gateway(err) => err.display_message(),
            ClientError::Grading(_) | ClientError::Export(_) => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<ValidationResult> for ClientError {
    fn from(result: ValidationResult) -> Self {
        ClientError::Invalid(result)
    }
}

/// Turn a validation outcome into an early return.
pub(crate) fn ensure_valid(result: ValidationResult) -> Result<(), ClientError> {
    if result.is_valid() {
        Ok(())
    } else {
        Err(ClientError::Invalid(result))
    }
}
