//! Client-side input checks performed before any network call.

use crate::{SessionError, SessionResult};

const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an email address
#[track_caller]
pub fn validate_email(email: &str) -> SessionResult<()> {
    if email.is_empty() {
        return Err(SessionError::validation("email cannot be empty"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(SessionError::validation(format!(
            "email must not exceed {} characters",
            MAX_EMAIL_LENGTH
        )));
    }

    // Shape check only; the server owns real address validation
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(SessionError::validation("email address is not valid")),
    }
}

/// Validate a password
#[track_caller]
pub fn validate_password(password: &str) -> SessionResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(SessionError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(SessionError::validation(format!(
            "password must not exceed {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
