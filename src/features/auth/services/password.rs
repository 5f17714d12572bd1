use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::PasswordDigest;

/// Argon2id cost parameters; tests run with the minimum memory cost
fn argon2_params() -> Params {
    #[cfg(not(test))]
    let params = Params::new(19 * 1024, 2, 1, None);
    #[cfg(test)]
    let params = Params::new(Params::MIN_M_COST, 1, 1, None);
    params.expect("Static Argon2 params are always valid")
}

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params())
}

/// Hash a password under a fresh random salt into a PHC string
pub fn hash_password(password: &str) -> Result<PasswordDigest> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AppError::Internal(format!("Failed to encode password salt: {}", e)))?;
    let hash = hasher()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(PasswordDigest(hash.to_string()))
}

/// Check a password against a stored digest; unparseable digests never match
pub fn verify_password(password: &str, digest: &PasswordDigest) -> bool {
    let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
        return false;
    };
    hasher()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
