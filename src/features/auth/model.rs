use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity attached to a request by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub account_id: String,
    /// Primary identifier for document ownership and sharing
    pub email: String,
}

/// Claims carried in access tokens issued by [`TokenService`](super::services::TokenService)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Activated account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

/// Account creation awaiting email confirmation
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub routing: String,
    pub token: String,
    pub email: String,
    pub password: PasswordDigest,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Argon2id password hash in PHC string form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(pub String);

impl PasswordDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// True once `now` has reached `expires_at`
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}
