use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::db::{CategoryRepository, Store, UserRepository};

pub mod categories;
pub mod dashboard;
mod error;
pub mod system;
mod types;
pub mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

/// Shared handler state. Repositories are held behind their traits so
/// handlers depend on the capability, not the SeaORM implementation.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub start_time: Instant,
}

#[must_use]
pub fn create_app_state(config: Config, store: Store) -> Arc<AppState> {
    let users: Arc<dyn UserRepository> = Arc::new(store.users());
    let categories: Arc<dyn CategoryRepository> = Arc::new(store.categories());

    Arc::new(AppState {
        config,
        store,
        users,
        categories,
        start_time: Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::new(&config.database_url()).await?;
    Ok(create_app_state(config, store))
}

pub fn router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/{id}/categories",
            get(categories::get_user_categories),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/system/status", get(system::get_status));

    let cors_layer = if state.config.allowed_origin == "*" {
        CorsLayer::new().allow_origin(Any)
    } else if let Ok(origin) = state.config.allowed_origin.parse::<HeaderValue>() {
        CorsLayer::new().allow_origin(origin)
    } else {
        warn!(
            "Invalid ALLOWED_ORIGIN '{}', falling back to any origin",
            state.config.allowed_origin
        );
        CorsLayer::new().allow_origin(Any)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/dashboard", get(dashboard::get_dashboard))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
