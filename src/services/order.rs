use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{cart, cart_item, order, order_item, session};
use crate::error::ApiError;
use crate::services::{cart as cart_store, session as session_binder};

pub struct PlacedOrder {
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
}

/// Materialize the shopper's cart into an order. The caller is expected to
/// run this inside a transaction: the order, its items and the cart clear
/// must land together or not at all.
pub async fn checkout<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
    user_id: i32,
) -> Result<PlacedOrder, ApiError> {
    let cart = checkout_cart(conn, session, user_id).await?;

    // Claim an anonymous cart for the principal so later visits from other
    // sessions find it again.
    let cart = if cart.user_id.is_none() {
        let mut active: cart::ActiveModel = cart.into();
        active.user_id = Set(Some(user_id));
        active.update(conn).await?
    } else {
        cart
    };

    let lines = cart_store::list_lines(conn, &cart).await?;

    let placed = order::ActiveModel {
        user_id: Set(user_id),
        status: Set(order::Status::Created),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for line in &lines {
        let item = order_item::ActiveModel {
            order_id: Set(placed.id),
            product_id: Set(line.product.id),
            quantity: Set(line.item.quantity),
            // Price is frozen here; catalog changes after this point must
            // not show up on the order.
            price: Set(line.product.price),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        items.push(item);
    }

    cart_item::Entity::delete_many()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .exec(conn)
        .await?;

    Ok(PlacedOrder {
        order: placed,
        items,
    })
}

pub async fn list_orders<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> Result<Vec<order::Model>, ApiError> {
    Ok(order::Entity::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::Id)
        .all(conn)
        .await?)
}

pub async fn get_order<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    order_id: i32,
) -> Result<PlacedOrder, ApiError> {
    let placed = order::Entity::find_by_id(order_id)
        .filter(order::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No order with {} id was found", order_id))
        })?;

    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(placed.id))
        .all(conn)
        .await?;

    Ok(PlacedOrder {
        order: placed,
        items,
    })
}

/// The cart a checkout operates on: the session-bound cart when it belongs
/// to nobody or to this principal, otherwise a cart the principal already
/// owns. A shopper who never added anything has no cart to check out.
async fn checkout_cart<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
    user_id: i32,
) -> Result<cart::Model, ApiError> {
    if let Some(cart) = session_binder::resolve_cart(conn, session).await? {
        if cart.user_id.is_none() || cart.user_id == Some(user_id) {
            return Ok(cart);
        }
    }

    cart::Entity::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| ApiError::NotFound("No cart is bound to this account yet".to_owned()))
}
