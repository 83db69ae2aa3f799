//! Subcommand implementations.

pub mod export;
pub mod init;
pub mod preview;
pub mod stats;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use gradebook_client::AuthCoordinator;
use gradebook_core::model::{Lecturer, LoginRequest};
use gradebook_core::session::Session;
use gradebook_core::traits::Gateway;
use gradebook_gateway::{load_config_from, HttpGateway};

use crate::Credentials;

/// Build an HTTP gateway from config and sign in with the given credentials.
pub async fn connect(
    credentials: &Credentials,
    config_path: Option<&Path>,
) -> Result<(Arc<dyn Gateway>, Lecturer)> {
    let config = load_config_from(config_path)?;
    tracing::debug!(base_url = %config.normalized_base_url(), "connecting");

    let session = Session::new();
    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(&config, session.clone())?);
    let mut auth = AuthCoordinator::new(Arc::clone(&gateway), session);

    let request = LoginRequest {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };
    let lecturer = auth
        .login(&request)
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message()))
        .context("login failed")?;

    Ok((gateway, lecturer))
}
