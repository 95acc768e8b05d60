//! Sign-in, registration and logout against the remote auth endpoints.

use std::sync::Arc;

use serde_json::{json, Value};

use gridcast_core::UserId;

use crate::gateway::{GatewayError, RemoteGateway};
use crate::session::{AppUser, REGISTERED_USER_KEY, Session, SessionStore};

/// Spellings of the user id in auth responses, in precedence order.
const USER_ID_KEYS: [&str; 3] = ["user_id", "id", "userId"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Remote(#[from] GatewayError),
    #[error("response did not identify a user")]
    MissingUser,
    #[error(
        "password reset is not available on this server ({0}); ask an administrator to reset the password"
    )]
    ResetUnsupported(String),
    #[error("could not persist session: {0}")]
    Session(String),
}

/// The user described by a login/registration response.
///
/// `null` or empty ids are skipped; the submitted email fills in a missing one.
fn user_from_response(value: &Value, submitted_email: &str) -> Result<AppUser, AuthError> {
    let Value::Object(map) = value else {
        return Err(GatewayError::Malformed("auth response is not a JSON object".into()).into());
    };

    let user_id = USER_ID_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(user_id_of))
        .ok_or(AuthError::MissingUser)?;
    let email = map
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(submitted_email);

    Ok(AppUser {
        user_id,
        email: Some(email.to_string()),
    })
}

fn user_id_of(value: &Value) -> Option<UserId> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(UserId::new(s.trim())),
        Value::Number(n) => Some(UserId::new(n.to_string())),
        _ => None,
    }
}

pub struct AuthClient {
    gateway: Arc<dyn RemoteGateway>,
    session: Arc<dyn SessionStore>,
}

impl AuthClient {
    pub fn new(gateway: Arc<dyn RemoteGateway>, session: Arc<dyn SessionStore>) -> Self {
        Self { gateway, session }
    }

    pub fn current_user(&self) -> Option<AppUser> {
        Session::current(self.session.as_ref())
    }

    /// Sign in and persist the session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AppUser, AuthError> {
        let value = self
            .gateway
            .post("/auth/login", &json!({ "email": email, "password": password }))
            .await?;

        let user = user_from_response(&value, email)?;

        Session::begin(self.session.as_ref(), &user)
            .map_err(|e| AuthError::Session(e.to_string()))?;
        tracing::info!(user_id = %user.user_id, "signed in");
        Ok(user)
    }

    /// Register an account and remember it under [`REGISTERED_USER_KEY`].
    ///
    /// Does not sign in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AppUser, AuthError> {
        let value = self
            .gateway
            .post("/auth/register", &json!({ "email": email, "password": password }))
            .await?;
        let user = user_from_response(&value, email)?;

        let record = serde_json::to_string(&user).map_err(|e| AuthError::Session(e.to_string()))?;
        self.session.set(REGISTERED_USER_KEY, record);
        tracing::info!(user_id = %user.user_id, "registered new account");
        Ok(user)
    }

    pub fn logout(&self) {
        Session::end(self.session.as_ref());
    }

    /// Request a password reset.
    ///
    /// A missing endpoint (404/405) or an unreachable server is reported as
    /// [`AuthError::ResetUnsupported`], never as success.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        match self
            .gateway
            .post("/auth/reset", &json!({ "email": email }))
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.is_transport() || matches!(err.status(), Some(404 | 405)) => {
                tracing::warn!(error = %err, "password reset endpoint unavailable");
                Err(AuthError::ResetUnsupported(err.to_string()))
            }
            Err(err) => Err(AuthError::Remote(err)),
        }
    }
}
