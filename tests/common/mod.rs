#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::json;
use std::sync::{Arc, Once};

use shopkart::api::create_api_router;
use shopkart::entities::{product, setup_schema};

static INIT_ENV: Once = Once::new();

/// Boot the whole application on an ephemeral port with a private
/// in-memory database. Returns the base URL and a handle to the database
/// for direct seeding and assertions.
pub async fn spawn_app() -> (String, Arc<DatabaseConnection>) {
    INIT_ENV.call_once(|| std::env::set_var("SECRET", "shopkart-test-secret"));

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");

    let shared_db = Arc::new(db);
    let app = create_api_router(shared_db.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server crashed");
    });

    (format!("http://{}", addr), shared_db)
}

pub async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    price: &str,
    is_available: bool,
) -> i32 {
    let product = product::ActiveModel {
        name: Set(name.to_owned()),
        price: Set(price.parse::<Decimal>().expect("Bad decimal literal")),
        description: Set(format!("{} for testing", name)),
        is_available: Set(is_available),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert product");

    product.id
}

/// Register a user and log in, returning a bearer token.
pub async fn register_and_login(client: &reqwest::Client, base: &str, username: &str) -> String {
    let register_payload = json!({
        "username": username,
        "password1": "Muzion15",
        "password2": "Muzion15"
    });

    let response = client
        .post(format!("{}/register", base))
        .json(&register_payload)
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let login_payload = json!({
        "username": username,
        "password": "Muzion15"
    });

    let response = client
        .post(format!("{}/login", base))
        .json(&login_payload)
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login response JSON");

    body["token"]
        .as_str()
        .expect("Token not found in login response")
        .to_owned()
}

/// Decimal values serialize as strings; parse them back for comparisons
/// that ignore trailing zeros.
pub fn as_decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("Expected a decimal string")
        .parse()
        .expect("Failed to parse decimal")
}
