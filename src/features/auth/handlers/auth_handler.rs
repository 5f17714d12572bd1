use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppJsonRejection, AppQuery};
use crate::features::auth::dtos::{
    AuthResponseDto, CheckRoutingQuery, CompleteRegistrationRequestDto, CreateAccountRequestDto,
    CreateAccountResponseDto, ForgotPasswordRequestDto, LoginRequestDto, MeResponseDto,
    ResetPasswordRequestDto, RoutingStatusDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::constants::FORGOT_PASSWORD_MESSAGE;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Create an account pending email confirmation
#[utoipa::path(
    post,
    path = "/api/auth/create-account",
    request_body = CreateAccountRequestDto,
    responses(
        (status = 200, description = "Confirmation mail sent", body = ApiResponse<CreateAccountResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Account already exists")
    ),
    tag = "auth"
)]
pub async fn create_account(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<CreateAccountRequestDto>,
) -> Result<Json<ApiResponse<CreateAccountResponseDto>>> {
    dto.validate()?;

    let response = service.create_account(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Check your email to complete registration".to_string()),
        None,
    )))
}

/// Check whether a pending registration is still open
#[utoipa::path(
    get,
    path = "/api/auth/check-routing",
    params(CheckRoutingQuery),
    responses(
        (status = 200, description = "Registration still pending", body = ApiResponse<RoutingStatusDto>),
        (status = 404, description = "Unknown routing"),
        (status = 410, description = "Routing expired")
    ),
    tag = "auth"
)]
pub async fn check_routing(
    State(service): State<Arc<AuthService>>,
    AppQuery(query): AppQuery<CheckRoutingQuery>,
) -> Result<Json<ApiResponse<RoutingStatusDto>>> {
    let status = service.check_routing(&query.routing).await?;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

/// Complete a registration with the emailed token
#[utoipa::path(
    post,
    path = "/api/auth/complete-registration",
    request_body = CompleteRegistrationRequestDto,
    responses(
        (status = 200, description = "Account activated", body = ApiResponse<MeResponseDto>),
        (status = 400, description = "Invalid token"),
        (status = 410, description = "Token expired")
    ),
    tag = "auth"
)]
pub async fn complete_registration(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<CompleteRegistrationRequestDto>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    dto.validate()?;

    let account = service.complete_registration(dto).await?;
    Ok(Json(ApiResponse::success(Some(account), None, None)))
}

/// Request a password reset link
///
/// Responds the same way whether or not the account exists.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Request accepted", body = ApiResponse<String>)
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(service): State<Arc<AuthService>>,
    body: std::result::Result<AppJson<ForgotPasswordRequestDto>, AppJsonRejection>,
) -> Json<ApiResponse<String>> {
    match body {
        Ok(AppJson(dto)) if dto.validate().is_ok() => {
            if let Err(e) = service.forgot_password(dto).await {
                tracing::warn!("Forgot-password request failed: {}", e);
            }
        }
        Ok(_) => tracing::debug!("Ignoring forgot-password request with an invalid email"),
        Err(_) => tracing::debug!("Ignoring unreadable forgot-password body"),
    }
    Json(ApiResponse::success(
        None,
        Some(FORGOT_PASSWORD_MESSAGE.to_string()),
        None,
    ))
}

/// Set a new password with an emailed reset token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Password updated", body = ApiResponse<String>),
        (status = 400, description = "Invalid token or weak password"),
        (status = 410, description = "Token expired")
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ResetPasswordRequestDto>,
) -> Result<Json<ApiResponse<String>>> {
    dto.validate()?;

    service.reset_password(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password updated".to_string()),
        None,
    )))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()?;

    let auth_response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    let user_data = service.get_current_user(user).await?;
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}
