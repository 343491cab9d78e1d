//! User CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::{
    validate_email, validate_failed_attempts, validate_role, validate_secret_key,
    validate_user_id, validate_username,
};
use super::{
    ApiError, ApiResponse, AppState, CreateUserRequest, DeletedDto, UpdateUserRequest, UserDto,
};
use crate::db::{NewUser, UserUpdate};
use crate::entities::users::UserRole;

/// `GET /api/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.users.list_all().await?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_user_id(id)?;

    let user = state
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let username = validate_username(&request.username)?;
    let email = validate_email(&request.email_address)?;
    let secret_key = validate_secret_key(&request.hashed_secret_key)?;
    let role = match request.role.as_deref() {
        Some(role) => validate_role(role)?,
        None => UserRole::User,
    };

    let user = state
        .users
        .add(NewUser {
            username: username.to_string(),
            hashed_secret_key: secret_key.to_string(),
            email_address: email.to_string(),
            role,
        })
        .await?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// `PUT /api/users/{id}`: full-record replace of the mutable fields.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_user_id(id)?;
    let username = validate_username(&request.username)?;
    let email = validate_email(&request.email_address)?;
    let secret_key = validate_secret_key(&request.hashed_secret_key)?;
    let role = validate_role(&request.role)?;
    let failed_login_attempts = validate_failed_attempts(request.failed_login_attempts)?;

    let updated = state
        .users
        .update(UserUpdate {
            id,
            username: username.to_string(),
            hashed_secret_key: secret_key.to_string(),
            email_address: email.to_string(),
            is_email_verified: request.is_email_verified,
            role,
            last_login_date: request.last_login_date,
            failed_login_attempts,
        })
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;

    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

/// `DELETE /api/users/{id}`: removing a missing user is not an error.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DeletedDto>>, ApiError> {
    let id = validate_user_id(id)?;

    let deleted = state.users.delete(id).await?;

    Ok(Json(ApiResponse::success(DeletedDto { deleted })))
}
