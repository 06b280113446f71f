use std::collections::HashSet;

use axum::{extract::FromRequestParts, http::request::Parts};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Gate for the admin panel. One shared password, opaque per-login tokens.
///
/// Sessions live for the lifetime of the process; logout (or restart) drops
/// them. This is a cosmetic gate, not a security boundary: whoever can reach
/// the service can also reach the record API it fronts.
pub struct SessionGate {
    password: String,
    active: Mutex<HashSet<String>>,
}

impl SessionGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            active: Mutex::new(HashSet::new()),
        }
    }

    /// LoggedOut -> LoggedIn on password match; anything else is rejected.
    pub async fn authenticate(&self, password: &str) -> Result<String, AppError> {
        if password != self.password {
            return Err(AppError::WrongPassword);
        }

        let token = Uuid::new_v4().to_string();
        let mut active = self.active.lock().await;
        active.insert(token.clone());
        Ok(token)
    }

    pub async fn is_active(&self, token: &str) -> bool {
        self.active.lock().await.contains(token)
    }

    /// LoggedIn -> LoggedOut. Returns false for a token that was not active.
    pub async fn logout(&self, token: &str) -> bool {
        self.active.lock().await.remove(token)
    }
}

/// Extractor placed on admin handlers; rejects requests whose token header is
/// missing or no longer active.
pub struct AdminSession {
    pub token: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if !state.gate.is_active(token).await {
            return Err(AppError::Unauthorized);
        }

        Ok(Self {
            token: token.to_string(),
        })
    }
}
