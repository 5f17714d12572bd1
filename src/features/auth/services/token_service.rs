use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Account, Claims};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

/// Issued access token with its lifetime
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Signs HS256 access tokens for logged-in accounts
pub struct TokenService {
    encoding_key: EncodingKey,
    issuer: String,
    expiry_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            expiry_secs: config.jwt_expiry.as_secs() as i64,
        }
    }

    pub fn create_token(&self, account: &Account) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account.id.clone(),
            email: account.email.clone(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.expiry_secs,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign access token: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiry_secs,
        })
    }
}
