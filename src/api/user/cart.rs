use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::entities::{cart, session};
use crate::error::ApiError;
use crate::services::{cart as cart_store, session as session_binder};

//ROUTERS
pub fn cart_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_product))
        .route("/cart/count", get(get_cart_count))
        .route("/cart/:id", delete(remove_product))
        .route("/cart/:id/increase", patch(increase_quantity))
        .route("/cart/:id/decrease", patch(decrease_quantity))
        .layer(Extension(db))
}

//ROUTES
async fn get_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
) -> Result<Response, ApiError> {
    let Some(cart) = session_binder::resolve_cart(&*db, &session).await? else {
        return Ok(Json(json!({ "items": [], "total": Decimal::ZERO })).into_response());
    };

    let lines = cart_store::list_lines(&*db, &cart).await?;
    let total = cart_store::total(&lines);
    let items: Vec<CartLineResponse> = lines.into_iter().map(CartLineResponse::new).collect();

    Ok(Json(json!({ "items": items, "total": total })).into_response())
}

async fn add_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
    Json(payload): Json<AddProduct>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let cart = session_binder::get_or_create_cart(&txn, &session).await?;
    let item = cart_store::add_item(&txn, &cart, payload.product_id).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(item)))
}

async fn increase_quantity(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let cart = require_cart(&txn, &session).await?;
    let item = cart_store::increase_quantity(&txn, &cart, id).await?;
    txn.commit().await?;

    Ok(Json(item))
}

async fn decrease_quantity(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;
    let cart = require_cart(&txn, &session).await?;
    let remaining = cart_store::decrease_quantity(&txn, &cart, id).await?;
    txn.commit().await?;

    match remaining {
        Some(item) => Ok(Json(item).into_response()),
        None => Ok(Json(json!({ "message": "Resource deleted successfully" })).into_response()),
    }
}

async fn remove_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let cart = require_cart(&txn, &session).await?;
    cart_store::remove_item(&txn, &cart, id).await?;
    txn.commit().await?;

    Ok(Json(json!({ "message": "Resource deleted successfully" })))
}

async fn get_cart_count(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<session::Model>,
) -> Result<impl IntoResponse, ApiError> {
    let count = cart_store::line_count(&*db, &session).await?;
    Ok(Json(json!({ "count": count })))
}

//utilities
async fn require_cart<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
) -> Result<cart::Model, ApiError> {
    session_binder::resolve_cart(conn, session)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cart is bound to this session yet".to_owned()))
}

//structs
#[derive(Deserialize, Debug)]
struct AddProduct {
    product_id: i32,
}

#[derive(Serialize)]
struct CartLineResponse {
    id: i32,
    product_id: i32,
    name: String,
    price: Decimal,
    quantity: i32,
}

impl CartLineResponse {
    fn new(line: cart_store::CartLine) -> CartLineResponse {
        CartLineResponse {
            id: line.item.id,
            product_id: line.product.id,
            name: line.product.name,
            price: line.product.price,
            quantity: line.item.quantity,
        }
    }
}
