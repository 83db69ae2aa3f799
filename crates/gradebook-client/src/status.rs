//! Per-coordinator action status.

use tracing::{debug, error};

use crate::ClientError;

/// Busy/error/success flags for the most recent action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

impl Status {
    /// Reset the flags at the start of an action.
    pub(crate) fn begin(&mut self, action: &str) {
        debug!(action, "starting");
        *self = Status {
            loading: true,
            ..Status::default()
        };
    }

    pub(crate) fn succeed(&mut self) {
        self.loading = false;
        self.success = true;
    }

    pub(crate) fn fail(&mut self, action: &str, err: &ClientError) {
        if err.is_unexpected() {
            error!(action, error = %err, "unexpected failure");
        } else {
            debug!(action, error = %err, "failed");
        }
        self.loading = false;
        self.success = false;
        self.error = Some(err.display_message());
    }

    /// Record the outcome of an action and pass it through.
    pub(crate) fn settle<T>(
        &mut self,
        action: &str,
        outcome: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        match &outcome {
            Ok(_) => self.succeed(),
            Err(err) => self.fail(action, err),
        }
        outcome
    }

    pub fn is_idle(&self) -> bool {
        !self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::error::{GatewayError, UNEXPECTED_ERROR_MESSAGE};

    #[test]
    fn begin_clears_previous_outcome() {
        let mut status = Status::default();
        status.fail("x", &ClientError::from(GatewayError::Network("down".into())));
        assert!(status.error.is_some());

        status.begin("x");
        assert!(status.loading);
        assert_eq!(status.error, None);
        assert!(!status.success);
    }

    #[test]
    fn settle_records_both_outcomes() {
        let mut status = Status::default();
        status.begin("ok");
        assert_eq!(status.settle("ok", Ok::<_, ClientError>(3)).unwrap(), 3);
        assert!(status.success && status.is_idle());

        status.begin("bad");
        let outcome: Result<(), _> =
            status.settle("bad", Err(ClientError::from(GatewayError::Decode("x".into()))));
        assert!(outcome.is_err());
        assert!(!status.success && status.is_idle());
        assert_eq!(status.error.as_deref(), Some(UNEXPECTED_ERROR_MESSAGE));
    }
}
