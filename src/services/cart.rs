use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::{cart, cart_item, product, session};
use crate::error::ApiError;

/// A cart line joined with its catalog record.
pub struct CartLine {
    pub item: cart_item::Model,
    pub product: product::Model,
}

/// Add one unit of a product to the cart: an existing line is incremented,
/// otherwise a new line starts at quantity 1.
pub async fn add_item<C: ConnectionTrait>(
    conn: &C,
    cart: &cart::Model,
    product_id: i32,
) -> Result<cart_item::Model, ApiError> {
    if product::Entity::find_by_id(product_id).one(conn).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "No product with {} id was found",
            product_id
        )));
    }

    let existing = cart_item::Entity::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(conn)
        .await?;

    let item = match existing {
        Some(entry) => {
            let quantity = entry.quantity + 1;
            let mut entry: cart_item::ActiveModel = entry.into();
            entry.quantity = Set(quantity);
            entry.update(conn).await?
        }
        None => {
            cart_item::ActiveModel {
                cart_id: Set(cart.id),
                product_id: Set(product_id),
                quantity: Set(1),
                ..Default::default()
            }
            .insert(conn)
            .await?
        }
    };

    Ok(item)
}

pub async fn increase_quantity<C: ConnectionTrait>(
    conn: &C,
    cart: &cart::Model,
    item_id: i32,
) -> Result<cart_item::Model, ApiError> {
    let entry = find_line(conn, cart, item_id).await?;

    let quantity = entry.quantity + 1;
    let mut entry: cart_item::ActiveModel = entry.into();
    entry.quantity = Set(quantity);
    Ok(entry.update(conn).await?)
}

/// Decrement a line, deleting it outright when the quantity would drop
/// below 1. Returns the surviving line, if any.
pub async fn decrease_quantity<C: ConnectionTrait>(
    conn: &C,
    cart: &cart::Model,
    item_id: i32,
) -> Result<Option<cart_item::Model>, ApiError> {
    let entry = find_line(conn, cart, item_id).await?;

    if entry.quantity > 1 {
        let quantity = entry.quantity - 1;
        let mut entry: cart_item::ActiveModel = entry.into();
        entry.quantity = Set(quantity);
        Ok(Some(entry.update(conn).await?))
    } else {
        entry.delete(conn).await?;
        Ok(None)
    }
}

pub async fn remove_item<C: ConnectionTrait>(
    conn: &C,
    cart: &cart::Model,
    item_id: i32,
) -> Result<(), ApiError> {
    let entry = find_line(conn, cart, item_id).await?;
    entry.delete(conn).await?;
    Ok(())
}

pub async fn list_lines<C: ConnectionTrait>(
    conn: &C,
    cart: &cart::Model,
) -> Result<Vec<CartLine>, ApiError> {
    let rows = cart_item::Entity::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .find_also_related(product::Entity)
        .all(conn)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (item, joined) in rows {
        let Some(product) = joined else {
            return Err(ApiError::NotFound(format!(
                "No product with {} id was found",
                item.product_id
            )));
        };
        lines.push(CartLine { item, product });
    }
    Ok(lines)
}

pub fn total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.product.price * Decimal::from(line.item.quantity))
        .sum()
}

/// Distinct lines bound to the session's cart, not summed units. The
/// storefront badge counts rows; keep it that way.
pub async fn line_count<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
) -> Result<u64, ApiError> {
    let Some(cart_id) = session.cart_id else {
        return Ok(0);
    };

    Ok(cart_item::Entity::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .count(conn)
        .await?)
}

async fn find_line<C: ConnectionTrait>(
    conn: &C,
    cart: &cart::Model,
    item_id: i32,
) -> Result<cart_item::Model, ApiError> {
    cart_item::Entity::find_by_id(item_id)
        .filter(cart_item::Column::CartId.eq(cart.id))
        .one(conn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No cart entry with {} id was found", item_id))
        })
}
