use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, CompleteRegistrationRequestDto, CreateAccountRequestDto,
    CreateAccountResponseDto, ForgotPasswordRequestDto, LoginRequestDto, MeResponseDto,
    ResetPasswordRequestDto, RoutingStatusDto,
};
use crate::features::auth::mailer::{Mailer, OutgoingMail};
use crate::features::auth::model::{
    Account, AuthenticatedUser, PasswordReset, PendingRegistration,
};
use crate::features::auth::services::password::{hash_password, verify_password};
use crate::features::auth::services::token_service::TokenService;
use crate::features::auth::store::{normalize_email, AccountStore, LinkState};

/// Service for account creation, registration completion, password reset and login
pub struct AuthService {
    store: RwLock<AccountStore>,
    token_service: Arc<TokenService>,
    mailer: Arc<dyn Mailer>,
    frontend_url: String,
    registration_ttl: chrono::Duration,
    password_reset_ttl: chrono::Duration,
}

fn to_chrono(ttl: Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365))
}

impl AuthService {
    pub fn new(
        config: &AuthConfig,
        frontend_url: String,
        token_service: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            store: RwLock::new(AccountStore::new()),
            token_service,
            mailer,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            registration_ttl: to_chrono(config.registration_ttl),
            password_reset_ttl: to_chrono(config.password_reset_ttl),
        }
    }

    /// Start a registration: store it as pending and mail the confirmation link
    pub async fn create_account(
        &self,
        dto: CreateAccountRequestDto,
    ) -> Result<CreateAccountResponseDto> {
        let email = normalize_email(&dto.email);
        let now = Utc::now();
        let password = hash_password(&dto.password)?;

        let pending = {
            let mut store = self.store.write().await;
            if store.account(&email).is_some() {
                tracing::debug!("Account creation refused, email in use: {}", email);
                return Err(AppError::Conflict("Account already exists".to_string()));
            }

            let pending = PendingRegistration {
                routing: Uuid::new_v4().to_string(),
                token: Uuid::new_v4().to_string(),
                email: email.clone(),
                password,
                expires_at: now + self.registration_ttl,
            };
            store.replace_pending(pending.clone());
            pending
        };

        let link = format!(
            "{}/complete-registration?token={}&routing={}",
            self.frontend_url,
            urlencoding::encode(&pending.token),
            urlencoding::encode(&pending.routing)
        );
        self.mailer
            .send(OutgoingMail {
                to: email.clone(),
                subject: "Confirm your RedaQt account".to_string(),
                link,
            })
            .await?;

        tracing::info!("Pending registration created: routing={}", pending.routing);

        Ok(CreateAccountResponseDto {
            routing: pending.routing,
            expires_in: self.registration_ttl.num_seconds(),
        })
    }

    /// Report whether a registration started with `routing` is still pending
    pub async fn check_routing(&self, routing: &str) -> Result<RoutingStatusDto> {
        let state = self.store.write().await.routing_state(routing, Utc::now());
        match state {
            LinkState::Live => Ok(RoutingStatusDto {
                routing: routing.to_string(),
                pending: true,
            }),
            LinkState::Expired => Err(AppError::Gone("Routing has expired".to_string())),
            LinkState::Unknown => Err(AppError::NotFound("Unknown routing".to_string())),
        }
    }

    /// Activate the account of a pending registration
    pub async fn complete_registration(
        &self,
        dto: CompleteRegistrationRequestDto,
    ) -> Result<MeResponseDto> {
        let mut store = self.store.write().await;

        match store.routing_state(&dto.routing, Utc::now()) {
            LinkState::Live => {}
            LinkState::Expired => {
                return Err(AppError::Gone("Registration link has expired".to_string()))
            }
            LinkState::Unknown => {
                return Err(AppError::BadRequest("Invalid registration token".to_string()))
            }
        }

        let token_matches = store
            .pending(&dto.routing)
            .is_some_and(|p| p.token == dto.token);
        if !token_matches {
            return Err(AppError::BadRequest("Invalid registration token".to_string()));
        }

        let pending = store
            .take_pending(&dto.routing)
            .ok_or_else(|| AppError::BadRequest("Invalid registration token".to_string()))?;

        if store.account(&pending.email).is_some() {
            return Err(AppError::Conflict("Account already exists".to_string()));
        }

        let account = Account {
            id: Uuid::now_v7().to_string(),
            email: pending.email,
            password: pending.password,
            created_at: Utc::now(),
        };
        tracing::info!("Account activated: id={}", account.id);

        let me = MeResponseDto {
            account_id: account.id.clone(),
            email: account.email.clone(),
        };
        store.insert_account(account);
        Ok(me)
    }

    /// Mail a reset link if the account exists. Never reveals whether it does.
    pub async fn forgot_password(&self, dto: ForgotPasswordRequestDto) -> Result<()> {
        let email = normalize_email(&dto.email);

        let reset = {
            let mut store = self.store.write().await;
            if store.account(&email).is_none() {
                tracing::debug!("Password reset requested for unknown email");
                return Ok(());
            }
            let reset = PasswordReset {
                token: Uuid::new_v4().to_string(),
                email: email.clone(),
                expires_at: Utc::now() + self.password_reset_ttl,
            };
            store.replace_reset(reset.clone());
            reset
        };

        let link = format!(
            "{}/reset-password?token={}",
            self.frontend_url,
            urlencoding::encode(&reset.token)
        );
        if let Err(e) = self
            .mailer
            .send(OutgoingMail {
                to: email,
                subject: "Reset your RedaQt password".to_string(),
                link,
            })
            .await
        {
            tracing::warn!("Failed to send password reset mail: {}", e);
        }

        Ok(())
    }

    /// Replace an account password using an emailed reset token
    pub async fn reset_password(&self, dto: ResetPasswordRequestDto) -> Result<()> {
        let password = hash_password(&dto.password)?;
        let mut store = self.store.write().await;

        match store.reset_state(&dto.token, Utc::now()) {
            LinkState::Live => {}
            LinkState::Expired => {
                return Err(AppError::Gone("Reset link has expired".to_string()))
            }
            LinkState::Unknown => {
                return Err(AppError::BadRequest("Invalid reset token".to_string()))
            }
        }

        let reset = store
            .take_reset(&dto.token)
            .ok_or_else(|| AppError::BadRequest("Invalid reset token".to_string()))?;
        let account = store
            .account_mut(&reset.email)
            .ok_or_else(|| AppError::BadRequest("Invalid reset token".to_string()))?;
        account.password = password;
        tracing::info!("Password reset for account id={}", account.id);
        Ok(())
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let account = {
            let store = self.store.read().await;
            store
                .account(&dto.email)
                .filter(|a| verify_password(&dto.password, &a.password))
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?
        };

        let token = self.token_service.create_token(&account)?;

        Ok(AuthResponseDto {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: MeResponseDto {
                account_id: account.id,
                email: account.email,
            },
        })
    }

    /// Get current user info (for /me endpoint)
    pub async fn get_current_user(&self, user: AuthenticatedUser) -> Result<MeResponseDto> {
        Ok(user.into())
    }

    /// Expire stale pending registrations and reset tokens, and forget
    /// expired links past their retention window
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        self.store.write().await.purge_expired(now)
    }
}
