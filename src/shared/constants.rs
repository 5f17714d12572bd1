/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// AUTH FLOW
// =============================================================================

/// Message returned by forgot-password regardless of whether the account exists
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists for this email, a password reset link has been sent";

/// How long an expired routing id or reset token keeps answering "expired"
/// before it is forgotten
pub const EXPIRED_LINK_RETENTION_HOURS: i64 = 24;

/// Client page shown when account creation hits an existing email
pub const ACCOUNT_UNAVAILABLE_PATH: &str = "/account-unavailable";

/// Client page shown when a routing id or token has expired
pub const SESSION_EXPIRED_PATH: &str = "/session-expired";

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Date format of `last_modified` and `shared_date`
pub const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%d";
