use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;
use std::sync::Arc;

use crate::entities::session;
use crate::error::ApiError;
use crate::middleware::auth::Claims;
use crate::services::order as order_service;

//ROUTERS
pub fn order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/orders", get(get_orders))
        .route("/orders/:id", get(get_order))
        .layer(Extension(db))
}

//ROUTES
async fn checkout(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let placed = order_service::checkout(&txn, &session, claims.user_id).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "order": placed.order, "items": placed.items })),
    ))
}

async fn get_orders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = order_service::list_orders(&*db, claims.user_id).await?;
    Ok(Json(orders))
}

async fn get_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let placed = order_service::get_order(&*db, claims.user_id, id).await?;
    Ok(Json(json!({ "order": placed.order, "items": placed.items })))
}
