//! Category CRUD endpoints, plus the per-user visibility query.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::{
    validate_category_id, validate_category_name, validate_category_ownership, validate_user_id,
};
use super::{
    ApiError, ApiResponse, AppState, CategoryDto, CreateCategoryRequest, DeletedDto,
    UpdateCategoryRequest,
};
use crate::db::{CategoryUpdate, NewCategory};

/// `GET /api/categories`
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state.categories.list_all().await?;

    Ok(Json(ApiResponse::success(
        categories.into_iter().map(CategoryDto::from).collect(),
    )))
}

/// `GET /api/categories/{id}`
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let id = validate_category_id(id)?;

    let category = state
        .categories
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::category_not_found(id))?;

    Ok(Json(ApiResponse::success(CategoryDto::from(category))))
}

/// `GET /api/users/{id}/categories`: categories owned by the user plus
/// every system default.
pub async fn get_user_categories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let id = validate_user_id(id)?;

    let categories = state.categories.get_for_user(id).await?;

    Ok(Json(ApiResponse::success(
        categories.into_iter().map(CategoryDto::from).collect(),
    )))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let name = validate_category_name(&request.name)?;
    validate_category_ownership(request.user_id, request.is_default)?;

    let category = state
        .categories
        .add(NewCategory {
            user_id: request.user_id,
            name: name.to_string(),
            is_default: request.is_default,
        })
        .await?;

    Ok(Json(ApiResponse::success(CategoryDto::from(category))))
}

/// `PUT /api/categories/{id}`
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let id = validate_category_id(id)?;
    let name = validate_category_name(&request.name)?;
    validate_category_ownership(request.user_id, request.is_default)?;

    let updated = state
        .categories
        .update(CategoryUpdate {
            id,
            user_id: request.user_id,
            name: name.to_string(),
            is_default: request.is_default,
        })
        .await?
        .ok_or_else(|| ApiError::category_not_found(id))?;

    Ok(Json(ApiResponse::success(CategoryDto::from(updated))))
}

/// `DELETE /api/categories/{id}`: removing a missing category is not an
/// error.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DeletedDto>>, ApiError> {
    let id = validate_category_id(id)?;

    let deleted = state.categories.delete(id).await?;

    Ok(Json(ApiResponse::success(DeletedDto { deleted })))
}
