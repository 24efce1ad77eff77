pub mod auth;
pub mod public;
pub mod user;

use axum::{middleware::from_fn, middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::middleware::logging::logging_middleware;
use crate::middleware::session::session_middleware;

use auth::auth_router;
use public::public_api_router;
use user::user_api_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .merge(auth_router(shared_db.clone()))
        .nest("/api", public_api_router(shared_db.clone()))
        .nest("/api", user_api_router(shared_db.clone()))
        .layer(from_fn_with_state(shared_db.clone(), session_middleware))
        .layer(from_fn(logging_middleware))
}
