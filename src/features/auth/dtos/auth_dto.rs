use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::validation::{validate_accepted, validate_password_strength};

/// Request DTO for account creation
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,

    /// Terms of service checkbox
    #[validate(custom(function = "validate_accepted"))]
    pub agreement_terms: bool,

    /// Privacy policy checkbox
    #[validate(custom(function = "validate_accepted"))]
    pub agreement_policy: bool,
}

/// Response DTO for account creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAccountResponseDto {
    /// Identifier of the pending registration; poll it with check-routing
    pub routing: String,
    /// Seconds until the pending registration expires
    pub expires_in: i64,
}

/// Query params for check-routing
#[derive(Debug, Deserialize, IntoParams)]
pub struct CheckRoutingQuery {
    pub routing: String,
}

/// Response DTO for check-routing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoutingStatusDto {
    pub routing: String,
    pub pending: bool,
}

/// Request DTO for completing a registration from the emailed link
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompleteRegistrationRequestDto {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(length(min = 1, message = "Routing is required"))]
    pub routing: String,
}

/// Request DTO for forgot-password
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequestDto {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request DTO for setting a new password with an emailed reset token
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequestDto {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

/// Request DTO for login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// HS256 JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub user: MeResponseDto,
}

/// DTO for /auth/me response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub account_id: String,
    pub email: String,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            account_id: user.account_id,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateAccountRequestDto {
        CreateAccountRequestDto {
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
            agreement_terms: true,
            agreement_policy: true,
        }
    }

    #[test]
    fn test_create_account_valid() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_account_requires_agreements() {
        let mut dto = valid_create();
        dto.agreement_policy = false;
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("agreement_policy"));
    }

    #[test]
    fn test_create_account_rejects_weak_password() {
        let mut dto = valid_create();
        dto.password = "short1".to_string();
        assert!(dto.validate().is_err());

        dto.password = "longenoughbutnodigit".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_account_rejects_bad_email() {
        let mut dto = valid_create();
        dto.email = "not-an-email".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
