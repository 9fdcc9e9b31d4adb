use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{
    AuthService, CatalogService, EmployeeService, JwtAuthService, SeaOrmCatalogService,
    SeaOrmEmployeeService,
};
use crate::state::SharedState;

pub mod auth;
mod catalogs;
mod employees;
mod error;
mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub shared: Arc<SharedState>,

    pub employee_service: Arc<dyn EmployeeService>,

    pub catalog_service: Arc<dyn CatalogService>,

    pub auth_service: Arc<dyn AuthService>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> anyhow::Result<Arc<AppState>> {
    let (risk_table, jwt_secret, token_ttl_hours) = {
        let config = shared.config.read().await;
        (
            config.risk_table()?,
            config.auth.jwt_secret.clone(),
            config.auth.token_ttl_hours,
        )
    };

    let store = shared.store.clone();

    let employee_service = Arc::new(SeaOrmEmployeeService::new(store.clone(), risk_table));
    let catalog_service = Arc::new(SeaOrmCatalogService::new(store.clone()));
    let auth_service = Arc::new(JwtAuthService::new(store, jwt_secret, token_ttl_hours));

    Ok(Arc::new(AppState {
        shared,
        employee_service,
        catalog_service,
        auth_service,
        start_time: std::time::Instant::now(),
    }))
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared).await
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/login", post(auth::login))
        .route("/health", get(system::health))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/catalogs", get(catalogs::get_catalogs))
        .route("/employees", get(employees::list_employees))
        .route("/employees", post(employees::create_employee))
        .route("/employees/{id}", get(employees::get_employee))
        .route("/employees/{id}", patch(employees::update_employee))
        .route("/employees/{id}", delete(employees::delete_employee))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
