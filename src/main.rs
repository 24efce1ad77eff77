use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use shopkart::api::create_api_router;
use shopkart::entities::{seed_catalog, setup_schema};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    setup_schema(&db).await.expect("Failed to create schema");

    let shared_db = Arc::new(db);

    seed_catalog(&shared_db).await.expect("Failed to seed catalog");

    let app = create_api_router(shared_db);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind 0.0.0.0:3000");
    tracing::info!("Running at {:?}", listener.local_addr());
    axum::serve(listener, app).await.expect("Server error");
}
