use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::{cart, session};
use crate::error::ApiError;

/// Resolve the cart bound to a session, if any. A bound identifier that no
/// longer dereferences means the store lost a row the session still points
/// at, so it surfaces as an error rather than "no cart".
pub async fn resolve_cart<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
) -> Result<Option<cart::Model>, ApiError> {
    let Some(cart_id) = session.cart_id else {
        return Ok(None);
    };

    match cart::Entity::find_by_id(cart_id).one(conn).await? {
        Some(cart) => Ok(Some(cart)),
        None => Err(ApiError::NotFound(format!(
            "No cart with {} id was found",
            cart_id
        ))),
    }
}

/// The session's cart, created and bound on first use.
pub async fn get_or_create_cart<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
) -> Result<cart::Model, ApiError> {
    if let Some(cart) = resolve_cart(conn, session).await? {
        return Ok(cart);
    }

    let cart = cart::ActiveModel {
        user_id: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    bind(conn, session, cart.id).await?;
    Ok(cart)
}

/// Bind a cart identifier into the session.
pub async fn bind<C: ConnectionTrait>(
    conn: &C,
    session: &session::Model,
    cart_id: i32,
) -> Result<(), ApiError> {
    let mut active: session::ActiveModel = session.clone().into();
    active.cart_id = Set(Some(cart_id));
    active.update(conn).await?;
    Ok(())
}
