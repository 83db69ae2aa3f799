//! Sign-in state for the current lecturer.

use std::sync::Arc;

use tracing::{info, warn};

use gradebook_core::model::{AuthPayload, Lecturer, LoginRequest, RegisterRequest};
use gradebook_core::session::Session;
use gradebook_core::traits::Gateway;
use gradebook_core::validation::{validate_login, validate_registration};

use crate::{ensure_valid, ClientError, Status};

/// Tracks who is signed in and keeps the shared [`Session`] token in step.
pub struct AuthCoordinator {
    gateway: Arc<dyn Gateway>,
    session: Session,
    lecturer: Option<Lecturer>,
    status: Status,
}

impl AuthCoordinator {
    /// `session` should be the same context the gateway reads its token from.
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            lecturer: None,
            status: Status::default(),
        }
    }

    pub fn lecturer(&self) -> Option<&Lecturer> {
        self.lecturer.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lecturer.is_some() && self.session.is_active()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Sign in. The email is sent trimmed, exactly as it was validated. On
    /// failure the previously held identity is left untouched.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<Lecturer, ClientError> {
        self.status.begin("login");
        let outcome = self.try_login(request).await;
        self.status.settle("login", outcome)
    }

    async fn try_login(&mut self, request: &LoginRequest) -> Result<Lecturer, ClientError> {
        let request = LoginRequest {
            email: request.email.trim().to_string(),
            ..request.clone()
        };
        ensure_valid(validate_login(&request))?;
        let response = self.gateway.login(&request).await?;
        Ok(self.sign_in(response.data))
    }

    /// Create an account and sign it in.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<Lecturer, ClientError> {
        self.status.begin("register");
        let outcome = self.try_register(request).await;
        self.status.settle("register", outcome)
    }

    async fn try_register(&mut self, request: &RegisterRequest) -> Result<Lecturer, ClientError> {
        let request = RegisterRequest {
            email: request.email.trim().to_string(),
            ..request.clone()
        };
        ensure_valid(validate_registration(&request))?;
        let response = self.gateway.register(&request).await?;
        Ok(self.sign_in(response.data))
    }

    fn sign_in(&mut self, payload: AuthPayload) -> Lecturer {
        self.session.begin(payload.token);
        info!(lecturer = %payload.lecturer.email, "signed in");
        self.lecturer = Some(payload.lecturer.clone());
        payload.lecturer
    }

    /// Sign out. The identity and token are dropped even when the backend
    /// call fails, so this never reports an error.
    pub async fn logout(&mut self) {
        self.status.begin("logout");
        if let Err(err) = self.gateway.logout().await {
            warn!(error = %err, "logout request failed; clearing session anyway");
        }
        self.session.clear();
        self.lecturer = None;
        self.status.succeed();
    }

    /// Reload the signed-in lecturer's profile. A failure keeps the
    /// previously loaded profile.
    pub async fn refresh_profile(&mut self) -> Result<Lecturer, ClientError> {
        self.status.begin("refresh_profile");
        let outcome = match self.gateway.profile().await {
            Ok(response) => {
                self.lecturer = Some(response.data.clone());
                Ok(response.data)
            }
            Err(err) => Err(ClientError::from(err)),
        };
        self.status.settle("refresh_profile", outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_gateway::MockGateway;

    fn lecturer() -> Lecturer {
        Lecturer {
            id: "lec-1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@uni.edu".into(),
            phone: None,
            course_id: Some("CSC101".into()),
            department: Some("Computing".into()),
        }
    }

    fn credentials(email: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: "correct horse".into(),
        }
    }

    fn setup() -> (Arc<MockGateway>, Session, AuthCoordinator) {
        let gateway = Arc::new(MockGateway::new().with_lecturer(lecturer(), "tok-1"));
        let session = Session::new();
        let auth = AuthCoordinator::new(gateway.clone(), session.clone());
        (gateway, session, auth)
    }

    #[tokio::test]
    async fn login_replaces_identity_and_starts_session() {
        let (_, session, mut auth) = setup();
        let signed_in = auth.login(&credentials("ada@uni.edu")).await.unwrap();

        assert_eq!(signed_in.id, "lec-1");
        assert!(auth.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert!(auth.status().success);
        assert_eq!(auth.status().error, None);
    }

    #[tokio::test]
    async fn forced_login_failure_keeps_identity_empty_and_message_verbatim() {
        let (gateway, session, mut auth) = setup();
        gateway.fail_with("login", 401, "Account locked. Contact the registry.");

        let err = auth.login(&credentials("ada@uni.edu")).await.unwrap_err();

        assert!(matches!(err, ClientError::Gateway(_)));
        assert!(auth.lecturer().is_none());
        assert!(!session.is_active());
        assert_eq!(
            auth.status().error.as_deref(),
            Some("Account locked. Contact the registry.")
        );
    }

    #[tokio::test]
    async fn failed_login_preserves_prior_identity() {
        let (_, _, mut auth) = setup();
        auth.login(&credentials("ada@uni.edu")).await.unwrap();

        assert!(auth.login(&credentials("eve@uni.edu")).await.is_err());
        assert_eq!(auth.lecturer().map(|l| l.id.as_str()), Some("lec-1"));
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn padded_email_is_sent_trimmed() {
        let (gateway, _, mut auth) = setup();
        let lecturer = auth.login(&credentials("  ada@uni.edu ")).await.unwrap();

        assert_eq!(lecturer.id, "lec-1");
        assert_eq!(gateway.call_count("login"), 1);
    }

    #[tokio::test]
    async fn invalid_login_never_reaches_gateway() {
        let (gateway, _, mut auth) = setup();
        let err = auth
            .login(&LoginRequest {
                email: "not-an-email".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Invalid(_)));
        assert_eq!(gateway.total_calls(), 0);
        assert!(auth.status().error.is_some());
    }

    #[tokio::test]
    async fn registration_signs_in() {
        let gateway = Arc::new(MockGateway::new());
        let session = Session::new();
        let mut auth = AuthCoordinator::new(gateway.clone(), session.clone());

        let request = RegisterRequest {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@uni.edu".into(),
            phone: "08012345678".into(),
            password: "Passw0rd!".into(),
            course_id: "CSC201".into(),
        };
        let lecturer = auth
            .register(&RegisterRequest {
                email: " grace@uni.edu\t".into(),
                ..request
            })
            .await
            .unwrap();

        assert_eq!(lecturer.email, "grace@uni.edu");
        assert!(auth.is_authenticated());
        assert_eq!(gateway.call_count("register"), 1);
    }

    #[tokio::test]
    async fn invalid_registration_never_reaches_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let mut auth = AuthCoordinator::new(gateway.clone(), Session::new());

        let err = auth
            .register(&RegisterRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Invalid(_)));
        assert_eq!(gateway.call_count("register"), 0);
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_backend_fails() {
        let (gateway, session, mut auth) = setup();
        auth.login(&credentials("ada@uni.edu")).await.unwrap();
        gateway.fail_with("logout", 500, "Internal server error");

        auth.logout().await;

        assert!(auth.lecturer().is_none());
        assert!(!session.is_active());
        assert!(!auth.is_authenticated());
        assert_eq!(gateway.call_count("logout"), 1);
    }

    #[tokio::test]
    async fn failed_profile_refresh_keeps_loaded_profile() {
        let (gateway, _, mut auth) = setup();
        auth.login(&credentials("ada@uni.edu")).await.unwrap();
        assert_eq!(
            auth.refresh_profile().await.unwrap().department.as_deref(),
            Some("Computing")
        );

        gateway.fail(
            "profile",
            gradebook_core::error::GatewayError::Network("connection reset".into()),
        );
        assert!(auth.refresh_profile().await.is_err());
        assert_eq!(auth.lecturer().map(|l| l.id.as_str()), Some("lec-1"));
        assert_eq!(
            auth.status().error.as_deref(),
            Some("network error: connection reset")
        );
    }
}
