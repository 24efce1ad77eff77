use axum::{
    extract::{Extension, Path, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use std::sync::Arc;

use crate::entities::product::{self, Entity as ProductEntity};
use crate::error::ApiError;

pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", get(get_products))
        .route("/product/:id", get(get_product))
        .layer(Extension(db))
}

async fn get_products(
    Query(params): Query<GetProductsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut half_result = ProductEntity::find().filter(product::Column::IsAvailable.eq(true));

    if let Some(min) = params.min {
        half_result = half_result.filter(product::Column::Price.gte(min));
    }

    if let Some(max) = params.max {
        half_result = half_result.filter(product::Column::Price.lte(max));
    }

    let products = half_result.all(&*db).await?;
    Ok(Json(products))
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let product = ProductEntity::find_by_id(id)
        .filter(product::Column::IsAvailable.eq(true))
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No product with {} id was found", id)))?;

    Ok(Json(product))
}

#[derive(Deserialize)]
struct GetProductsQuery {
    min: Option<Decimal>,
    max: Option<Decimal>,
}
