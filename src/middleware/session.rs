use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::session;
use crate::error::ApiError;

pub const SESSION_HEADER: &str = "x-session-token";

/// Every request runs with a session row. A missing or dangling token gets
/// a fresh session, like a first visit; the token is echoed on the response
/// so the client can hold on to it.
pub async fn session_middleware(
    State(db): State<Arc<DatabaseConnection>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let existing = match presented {
        Some(token) => {
            session::Entity::find()
                .filter(session::Column::Token.eq(token))
                .one(&*db)
                .await?
        }
        None => None,
    };

    let current = match existing {
        Some(model) => model,
        None => {
            session::ActiveModel {
                token: Set(Uuid::new_v4().to_string()),
                cart_id: Set(None),
                ..Default::default()
            }
            .insert(&*db)
            .await?
        }
    };

    let token = current.token.clone();
    req.extensions_mut().insert(current);

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&token) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }
    Ok(response)
}
