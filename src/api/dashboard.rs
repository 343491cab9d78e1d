//! Dashboard lookup: resolves an email address to the owning username.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_email;
use super::{ApiError, ApiResponse, AppState, DashboardDto};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// `GET /dashboard?email=<address>`
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let email = validate_email(query.email.as_deref().unwrap_or_default())?;

    let user = state
        .users
        .get_by_email(email)
        .await?
        .ok_or_else(|| ApiError::not_found("User with email", email))?;

    Ok(Json(ApiResponse::success(DashboardDto {
        username: user.username,
    })))
}
