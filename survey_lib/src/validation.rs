//! Input validation for ids, paging, token amounts and email addresses.

use survey_api::types::UserUpdate;

use crate::error::SurveyClientError;

pub const MAX_ID_LENGTH: usize = 128;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_TOKEN_AMOUNT: u32 = 500;

/// Validate an opaque identifier (survey, submission or token id): strip
/// control characters, trim, enforce a byte-length limit, and refuse the
/// dot segments `.` and `..`.
pub fn validate_id(input: &str) -> Result<String, SurveyClientError> {
    if input.len() > MAX_ID_LENGTH {
        return Err(SurveyClientError::InvalidInput(format!(
            "id exceeds maximum length of {} bytes",
            MAX_ID_LENGTH
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(SurveyClientError::InvalidInput(
            "id is empty".to_string(),
        ));
    }
    if sanitized == "." || sanitized == ".." {
        return Err(SurveyClientError::InvalidInput(format!(
            "'{}' is not a valid id",
            sanitized
        )));
    }
    Ok(sanitized)
}

/// Validate page number (0-indexed, must be >= 0).
pub fn validate_page_number(page_number: i64) -> Result<i64, SurveyClientError> {
    if page_number < 0 {
        return Err(SurveyClientError::InvalidInput(
            "page_number must be >= 0".to_string(),
        ));
    }
    Ok(page_number)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<i64, SurveyClientError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(SurveyClientError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate how many access tokens to create at once (1..=500).
pub fn validate_token_amount(amount: u32) -> Result<u32, SurveyClientError> {
    if !(1..=MAX_TOKEN_AMOUNT).contains(&amount) {
        return Err(SurveyClientError::InvalidInput(format!(
            "token amount must be between 1 and {}",
            MAX_TOKEN_AMOUNT
        )));
    }
    Ok(amount)
}

/// Validate an email address: no whitespace, exactly one `@`, and non-empty
/// local and domain parts.
pub fn validate_email(input: &str) -> Result<String, SurveyClientError> {
    let trimmed = input.trim();
    let invalid = || {
        SurveyClientError::InvalidInput(format!("invalid email address '{}'", trimmed))
    };
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_ascii_control()) {
        return Err(invalid());
    }
    let mut parts = trimmed.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if local.is_empty() || domain.is_empty() {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Validate a list of email addresses, rejecting the whole list on the first bad entry.
pub fn validate_emails(inputs: &[String]) -> Result<Vec<String>, SurveyClientError> {
    if inputs.is_empty() {
        return Err(SurveyClientError::InvalidInput(
            "at least one email address is required".to_string(),
        ));
    }
    inputs.iter().map(|e| validate_email(e)).collect()
}

/// Validate an account update: the old password is always required, at
/// least one field must change, a new email must be well formed, and a new
/// password must differ from the old one.
pub fn validate_user_update(update: &UserUpdate) -> Result<(), SurveyClientError> {
    if update.username.is_none() && update.email.is_none() && update.new_password.is_none() {
        return Err(SurveyClientError::InvalidInput(
            "nothing to change".to_string(),
        ));
    }
    if update.old_password.is_empty() {
        return Err(SurveyClientError::InvalidInput(
            "old password is required".to_string(),
        ));
    }
    if let Some(username) = &update.username {
        if username.trim().is_empty() {
            return Err(SurveyClientError::InvalidInput(
                "username is empty".to_string(),
            ));
        }
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(new_password) = &update.new_password {
        if new_password.is_empty() {
            return Err(SurveyClientError::InvalidInput(
                "new password is empty".to_string(),
            ));
        }
        if *new_password == update.old_password {
            return Err(SurveyClientError::InvalidInput(
                "new password must differ from the old one".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
