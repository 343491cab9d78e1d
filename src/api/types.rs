use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{Category, User};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// User payload. The credential hash deliberately has no field here.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email_address: String,
    pub is_email_verified: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login_date: Option<DateTime<Utc>>,
    pub failed_login_attempts: i32,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email_address: user.email_address,
            is_email_verified: user.is_email_verified,
            role: user.role.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login_date: user.last_login_date,
            failed_login_attempts: user.failed_login_attempts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub is_default: bool,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            user_id: category.user_id,
            name: category.name,
            is_default: category.is_default,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardDto {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedDto {
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub hashed_secret_key: String,
    pub email_address: String,
    /// Defaults to the regular User role when omitted.
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub hashed_secret_key: String,
    pub email_address: String,
    pub is_email_verified: bool,
    pub role: String,
    #[serde(default)]
    pub last_login_date: Option<DateTime<Utc>>,
    pub failed_login_attempts: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub user_id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub user_id: Option<i32>,
    pub name: String,
    pub is_default: bool,
}
