use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::user::{self, Entity as UserEntity};
use crate::error::ApiError;
use crate::middleware::auth::generate_token;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Failed to compile username regex"));

//ROUTERS
pub fn auth_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login))
        .layer(Extension(db))
}

//ROUTES
async fn register_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<RegisterUser>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    if payload.password1 != payload.password2 {
        return Err(ApiError::Validation("Passwords do not match".to_owned()));
    }

    let txn = db.begin().await?;

    let taken = UserEntity::find()
        .filter(user::Column::Username.eq(&*payload.username))
        .one(&txn)
        .await?
        .is_some();
    if taken {
        return Err(ApiError::Conflict(
            "Username already exists. Please choose another.".to_owned(),
        ));
    }

    let password = hash_password(&payload.password1)?;

    let new_user = user::ActiveModel {
        username: Set(payload.username),
        password: Set(password),
        ..Default::default()
    };
    UserEntity::insert(new_user).exec(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UserLogin>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserEntity::find()
        .filter(user::Column::Username.eq(&*payload.username))
        .one(&*db)
        .await?;

    // Same answer for a missing user and a wrong password.
    let invalid = || ApiError::Unauthorized("Invalid username or password".to_owned());

    let user = user.ok_or_else(invalid)?;
    if user.check_hash(&payload.password).is_err() {
        return Err(invalid());
    }

    let token = generate_token(user.id)?;
    Ok((StatusCode::OK, Json(json!({ "token": token }))))
}

//utilities
fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| ApiError::Internal(format!("Failed to hash password: {}", err)))?
        .to_string();

    Ok(password_hash)
}

//structs
#[derive(Deserialize, Validate, Clone, Debug)]
struct RegisterUser {
    #[validate(length(min = 3, max = 32), regex(path = *USERNAME_REGEX))]
    username: String,
    #[validate(length(min = 8))]
    password1: String,
    password2: String,
}

#[derive(Deserialize, Clone, Debug)]
struct UserLogin {
    username: String,
    password: String,
}
