use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidateEmail, ValidationError};

lazy_static! {
    /// At least one ASCII or Unicode letter
    pub static ref HAS_LETTER_REGEX: Regex = Regex::new(r"\p{L}").unwrap();

    /// At least one decimal digit
    pub static ref HAS_DIGIT_REGEX: Regex = Regex::new(r"\d").unwrap();
}

/// Password strength rule shared by account creation and password reset.
/// Length is checked separately with `#[validate(length(..))]`.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if !HAS_LETTER_REGEX.is_match(password) || !HAS_DIGIT_REGEX.is_match(password) {
        return Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
            "Password must contain at least one letter and one digit",
        )));
    }
    Ok(())
}

/// Checkbox-style fields (terms, privacy policy) must be ticked
pub fn validate_accepted(value: &bool) -> Result<(), ValidationError> {
    if !*value {
        return Err(ValidationError::new("not_accepted")
            .with_message(Cow::Borrowed("This agreement must be accepted")));
    }
    Ok(())
}

/// Every share recipient must be a well-formed email address
pub fn validate_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    match recipients.iter().find(|r| !r.validate_email()) {
        Some(bad) => Err(ValidationError::new("recipient_email")
            .with_message(Cow::Owned(format!("'{}' is not a valid email address", bad)))),
        None => Ok(()),
    }
}
