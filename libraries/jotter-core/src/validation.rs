//! Local form validation.
//!
//! Anything rejected here is reported inline and never sent to the server.

use crate::error::{CoreError, Result};
use chrono::{NaiveDate, Utc};

/// Accepts `local@domain.tld` with no whitespace
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::validation("email", "email is required"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CoreError::validation("email", "email cannot contain spaces"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::validation("email", "email must contain '@'"));
    };
    if local.is_empty() || domain.contains('@') {
        return Err(CoreError::validation("email", "malformed email address"));
    }
    let labels_ok = domain.split('.').all(|label| !label.is_empty());
    if !domain.contains('.') || !labels_ok {
        return Err(CoreError::validation("email", "malformed email domain"));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("name", "name is required"));
    }
    Ok(())
}

/// Date of birth as `YYYY-MM-DD`, not in the future
pub fn validate_dob(dob: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::validation("dob", "expected a date as YYYY-MM-DD"))?;
    if date > Utc::now().date_naive() {
        return Err(CoreError::validation("dob", "date of birth is in the future"));
    }
    Ok(date)
}

/// The code from the email: digits only
pub fn validate_otp(otp: &str) -> Result<()> {
    let otp = otp.trim();
    if otp.is_empty() {
        return Err(CoreError::validation("otp", "code is required"));
    }
    if !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::validation("otp", "code must be digits only"));
    }
    Ok(())
}

/// A note id must name exactly one path segment
pub fn validate_note_id(id: &str) -> Result<()> {
    match id.trim() {
        "" => Err(CoreError::validation("id", "note id is required")),
        "." | ".." => Err(CoreError::validation("id", "not a note id")),
        _ => Ok(()),
    }
}
