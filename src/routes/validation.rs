use crate::auth::password::MIN_PASSWORD_LEN;
use crate::errors::ApiError;

pub const MAX_TITLE_LEN: usize = 200;

/// Trims a title and checks it is non-empty and at most `MAX_TITLE_LEN` characters.
pub fn title(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request("Title must not be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::bad_request(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(trimmed.to_string())
}

pub fn username(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(3..=50).contains(&len) {
        return Err(ApiError::bad_request("Username must be between 3 and 50 characters"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.') {
        return Err(ApiError::bad_request(
            "Username may only contain letters, digits, '.', '_' and '-'",
        ));
    }
    Ok(trimmed.to_string())
}

pub fn email(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().to_lowercase();
    let valid = trimmed.len() <= 255
        && matches!(trimmed.split_once('@'), Some((local, domain)) if !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    Ok(trimmed)
}

pub fn password(raw: &str) -> Result<(), ApiError> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
