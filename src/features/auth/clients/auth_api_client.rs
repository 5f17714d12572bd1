use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::features::auth::dtos::{
    CompleteRegistrationRequestDto, CreateAccountRequestDto, CreateAccountResponseDto,
    ForgotPasswordRequestDto,
};
use crate::shared::constants::{ACCOUNT_UNAVAILABLE_PATH, SESSION_EXPIRED_PATH};
use crate::shared::types::ApiResponse;

/// Outcome of an auth-flow call as seen by the web client
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthFlowError {
    #[error("An account already exists for this email")]
    AccountUnavailable,

    #[error("This link has expired")]
    SessionExpired,

    #[error("Invalid or unknown token")]
    InvalidToken,

    /// Field-level messages to show inline on the form
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Request failed: {0}")]
    Request(String),
}

impl AuthFlowError {
    /// Terminal page the client navigates to, if any
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            AuthFlowError::AccountUnavailable => Some(ACCOUNT_UNAVAILABLE_PATH),
            AuthFlowError::SessionExpired => Some(SESSION_EXPIRED_PATH),
            _ => None,
        }
    }
}

/// The auth calls the web client makes. Failures are reported once; no retries.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn create_account(
        &self,
        request: &CreateAccountRequestDto,
    ) -> Result<CreateAccountResponseDto, AuthFlowError>;

    async fn check_routing(&self, routing: &str) -> Result<(), AuthFlowError>;

    async fn complete_registration(&self, token: &str, routing: &str)
        -> Result<(), AuthFlowError>;

    /// Always succeeds from the caller's point of view
    async fn forgot_password(&self, email: &str);
}

/// [`AuthApi`] over HTTP against a running RedaQt service
pub struct HttpAuthClient {
    base_url: String,
    http_client: reqwest::Client,
}

/// Status and decoded envelope of a response
struct RawResponse<T> {
    status: StatusCode,
    body: Option<ApiResponse<T>>,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse<T>, AuthFlowError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthFlowError::Request(e.to_string()))?;
        Ok(Self::decode(response).await)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<RawResponse<T>, AuthFlowError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AuthFlowError::Request(e.to_string()))?;
        Ok(Self::decode(response).await)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> RawResponse<T> {
        let status = response.status();
        let body = response.json::<ApiResponse<T>>().await.ok();
        RawResponse { status, body }
    }

    /// Generic fallback for any status without a dedicated outcome
    fn fallback<T>(raw: RawResponse<T>) -> AuthFlowError {
        let message = raw
            .body
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {}", raw.status));
        AuthFlowError::Request(message)
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn create_account(
        &self,
        request: &CreateAccountRequestDto,
    ) -> Result<CreateAccountResponseDto, AuthFlowError> {
        let raw = self
            .post::<_, CreateAccountResponseDto>("/api/auth/create-account", request)
            .await?;

        match raw.status {
            s if s.is_success() => raw
                .body
                .and_then(|b| b.data)
                .ok_or_else(|| AuthFlowError::Request("Malformed response".to_string())),
            StatusCode::CONFLICT => Err(AuthFlowError::AccountUnavailable),
            StatusCode::BAD_REQUEST => {
                let errors = raw.body.as_ref().and_then(|b| b.errors.clone());
                match errors {
                    Some(errors) => Err(AuthFlowError::Validation(errors)),
                    None => Err(Self::fallback(raw)),
                }
            }
            _ => Err(Self::fallback(raw)),
        }
    }

    async fn check_routing(&self, routing: &str) -> Result<(), AuthFlowError> {
        let path = format!(
            "/api/auth/check-routing?routing={}",
            urlencoding::encode(routing)
        );
        let raw = self.get::<serde_json::Value>(&path).await?;

        match raw.status {
            s if s.is_success() => Ok(()),
            StatusCode::GONE => Err(AuthFlowError::SessionExpired),
            _ => Err(Self::fallback(raw)),
        }
    }

    async fn complete_registration(
        &self,
        token: &str,
        routing: &str,
    ) -> Result<(), AuthFlowError> {
        let body = CompleteRegistrationRequestDto {
            token: token.to_string(),
            routing: routing.to_string(),
        };
        let raw = self
            .post::<_, serde_json::Value>("/api/auth/complete-registration", &body)
            .await?;

        match raw.status {
            s if s.is_success() => Ok(()),
            StatusCode::GONE => Err(AuthFlowError::SessionExpired),
            _ => Err(AuthFlowError::InvalidToken),
        }
    }

    async fn forgot_password(&self, email: &str) {
        let body = ForgotPasswordRequestDto {
            email: email.to_string(),
        };
        // outcome deliberately ignored so the caller cannot enumerate accounts
        match self
            .post::<_, serde_json::Value>("/api/auth/forgot-password", &body)
            .await
        {
            Ok(raw) if !raw.status.is_success() => {
                tracing::debug!("forgot-password returned HTTP {}", raw.status)
            }
            Err(e) => tracing::debug!("forgot-password failed: {}", e),
            Ok(_) => {}
        }
    }
}
