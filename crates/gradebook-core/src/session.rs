//! Explicit session context.
//!
//! Holds the bearer token for the signed-in lecturer. The gateway reads it to
//! authorize requests; the auth coordinator begins and clears it. Clones share
//! the same underlying state.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with a token, replacing any previous one.
    pub fn begin(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    /// Forget the token.
    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_active(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}
