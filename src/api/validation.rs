use sea_orm::ActiveEnum;

use super::ApiError;
use crate::entities::users::UserRole;

pub fn validate_user_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_category_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid category ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Username cannot be empty"));
    }

    if trimmed.chars().count() > 10 {
        return Err(ApiError::validation(
            "Username must be 10 characters or less",
        ));
    }

    Ok(trimmed)
}

/// Syntactic check only; deliverability is someone else's problem.
pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Email address cannot be empty"));
    }

    if trimmed.len() > 100 {
        return Err(ApiError::validation(
            "Email address must be 100 characters or less",
        ));
    }

    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };

    if !valid {
        return Err(ApiError::validation(format!(
            "'{}' is not a valid email address",
            trimmed
        )));
    }

    Ok(trimmed)
}

pub fn validate_secret_key(hashed_secret_key: &str) -> Result<&str, ApiError> {
    if hashed_secret_key.is_empty() {
        return Err(ApiError::validation("Secret key hash cannot be empty"));
    }

    if hashed_secret_key.len() > 255 {
        return Err(ApiError::validation(
            "Secret key hash must be 255 characters or less",
        ));
    }

    Ok(hashed_secret_key)
}

pub fn validate_role(role: &str) -> Result<UserRole, ApiError> {
    UserRole::try_from_value(&role.to_string()).map_err(|_| {
        ApiError::validation(format!(
            "Unknown role: '{}'. Expected one of: Admin, User",
            role
        ))
    })
}

pub fn validate_failed_attempts(attempts: i32) -> Result<i32, ApiError> {
    if !(0..=5).contains(&attempts) {
        return Err(ApiError::validation(format!(
            "Invalid failed login attempts: {}. Must be between 0 and 5",
            attempts
        )));
    }
    Ok(attempts)
}

pub fn validate_category_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Category name cannot be empty"));
    }

    if trimmed.chars().count() > 50 {
        return Err(ApiError::validation(
            "Category name must be 50 characters or less",
        ));
    }

    Ok(trimmed)
}

/// A system default belongs to everyone; it cannot also have an owner.
pub fn validate_category_ownership(
    user_id: Option<i32>,
    is_default: bool,
) -> Result<(), ApiError> {
    if is_default && user_id.is_some() {
        return Err(ApiError::validation(
            "A default category cannot be owned by a user",
        ));
    }
    Ok(())
}
