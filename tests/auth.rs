mod common;

use reqwest::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use shopkart::entities::user;

#[tokio::test]
async fn test_register_user() {
    let (base, _db) = common::spawn_app().await;
    let client = reqwest::Client::new();

    let payload = json!({
        "username": "JohnDoe",
        "password1": "Muzion15",
        "password2": "Muzion15"
    });

    let response = client
        .post(format!("{}/register", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse register response JSON");
    assert_eq!(body["message"].as_str(), Some("User registered successfully"));
}

#[tokio::test]
async fn test_register_password_mismatch_creates_no_user() {
    let (base, db) = common::spawn_app().await;
    let client = reqwest::Client::new();

    let payload = json!({
        "username": "JohnDoe",
        "password1": "Muzion15",
        "password2": "Muzion16"
    });

    let response = client
        .post(format!("{}/register", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse register response JSON");
    assert_eq!(body["error"].as_str(), Some("Passwords do not match"));

    let count = user::Entity::find()
        .filter(user::Column::Username.eq("JohnDoe"))
        .count(&*db)
        .await
        .expect("Failed to count users");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_register_duplicate_username_creates_no_second_user() {
    let (base, db) = common::spawn_app().await;
    let client = reqwest::Client::new();

    let payload = json!({
        "username": "JohnDoe",
        "password1": "Muzion15",
        "password2": "Muzion15"
    });

    let response = client
        .post(format!("{}/register", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send first register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{}/register", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send second register request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse register response JSON");
    assert!(body["error"]
        .as_str()
        .expect("Error message missing")
        .contains("Username already exists"));

    let count = user::Entity::find()
        .filter(user::Column::Username.eq("JohnDoe"))
        .count(&*db)
        .await
        .expect("Failed to count users");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_rejects_malformed_username() {
    let (base, _db) = common::spawn_app().await;
    let client = reqwest::Client::new();

    let payload = json!({
        "username": "a!",
        "password1": "Muzion15",
        "password2": "Muzion15"
    });

    let response = client
        .post(format!("{}/register", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token() {
    let (base, _db) = common::spawn_app().await;
    let client = reqwest::Client::new();

    let token = common::register_and_login(&client, &base, "JohnDoe").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (base, _db) = common::spawn_app().await;
    let client = reqwest::Client::new();

    common::register_and_login(&client, &base, "JohnDoe").await;

    let payload = json!({
        "username": "JohnDoe",
        "password": "WrongPass"
    });

    let response = client
        .post(format!("{}/login", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login response JSON");
    assert_eq!(body["error"].as_str(), Some("Invalid username or password"));
}
