pub mod cart;
pub mod order;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::middleware::auth::auth_middleware;
use cart::cart_router;
use order::order_router;

/// Shopper-facing routes. Cart routes only need a session; checkout and
/// order history additionally need an authenticated principal.
pub fn user_api_router(db: Arc<DatabaseConnection>) -> Router {
    let gated = order_router(db.clone()).layer(from_fn_with_state(db.clone(), auth_middleware));

    Router::new().merge(cart_router(db.clone())).merge(gated)
}
