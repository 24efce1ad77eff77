pub mod product;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use product::product_router;

pub fn public_api_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new().merge(product_router(db))
}
