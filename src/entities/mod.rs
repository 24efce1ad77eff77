pub mod user;
pub mod product;
pub mod session;
pub mod cart;
pub mod cart_item;
pub mod order;
pub mod order_item;

use rust_decimal::Decimal;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Schema, Set,
    TransactionTrait,
};

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Referenced tables first so foreign keys always resolve.
    db.execute(backend.build(&schema.create_table_from_entity(user::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(product::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(cart::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(session::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(cart_item::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(order::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(order_item::Entity)))
        .await?;

    Ok(())
}

/// Put a few products on the shelf when the catalog is empty, so a fresh
/// checkout of the repo serves something.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<(), DbErr> {
    if product::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let plain = product::ActiveModel {
        name: Set("Plain bagel".to_owned()),
        price: Set(Decimal::new(150, 2)),
        description: Set("Boiled, baked, unadorned.".to_owned()),
        is_available: Set(true),
        ..Default::default()
    };

    let sesame = product::ActiveModel {
        name: Set("Sesame bagel".to_owned()),
        price: Set(Decimal::new(175, 2)),
        description: Set("Plain bagel, sesame crust.".to_owned()),
        is_available: Set(true),
        ..Default::default()
    };

    let coffee = product::ActiveModel {
        name: Set("Filter coffee".to_owned()),
        price: Set(Decimal::new(250, 2)),
        description: Set("Twelve ounces, no refills.".to_owned()),
        is_available: Set(true),
        ..Default::default()
    };

    let txn = db.begin().await?;
    product::Entity::insert_many([plain, sesame, coffee])
        .exec(&txn)
        .await?;
    txn.commit().await
}
