use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::user::Entity as UserEntity;
use crate::error::ApiError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub exp: usize,
}

pub async fn auth_middleware(
    State(db): State<Arc<DatabaseConnection>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = auth_header
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_owned()))?;

    let claims = validate_token(db, token).await?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

pub fn generate_token(user_id: i32) -> Result<String, ApiError> {
    let exp = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| ApiError::Internal("Failed to compute token expiry".to_owned()))?
        .timestamp() as usize;

    let claims = Claims { user_id, exp };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret_key().as_bytes()),
    )
    .map_err(|err| ApiError::Internal(format!("Failed to generate token: {}", err)))
}

/// Decode and verify a token, then make sure the user it names still
/// exists. A deleted account does not keep a working token.
pub async fn validate_token(
    db: Arc<DatabaseConnection>,
    token: &str,
) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_key().as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_owned()))?;

    let claims = token_data.claims;

    match UserEntity::find_by_id(claims.user_id).one(&*db).await? {
        Some(_) => Ok(claims),
        None => Err(ApiError::Unauthorized("Invalid or expired token".to_owned())),
    }
}

fn secret_key() -> String {
    dotenvy::dotenv().ok();
    std::env::var("SECRET").expect("SECRET not found in environment")
}
