//! Shared test utilities for `BrewPOS`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test catalog entries with sensible defaults.

use crate::{
    core::{catalog, checkout::CartLine},
    entities::{Product, product},
    errors::Result,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool is pinned to a single connection: each pooled connection to
/// `sqlite::memory:` would otherwise get its own private database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `price`: 10.0
/// * `category`: "general"
/// * `image`: None
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    stock: i32,
) -> Result<product::Model> {
    catalog::create_product(db, name.to_string(), 10.0, stock, String::new(), None).await
}

/// Creates a test product with custom parameters.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i32,
    category: &str,
    image: Option<String>,
) -> Result<product::Model> {
    catalog::create_product(db, name.to_string(), price, stock, category.to_string(), image).await
}

/// Shorthand for a cart line.
pub fn line(product_id: i64, quantity: i32, unit_price: f64) -> CartLine {
    CartLine {
        product_id,
        quantity,
        unit_price,
    }
}

/// Reads a product's current stock directly.
pub async fn stock_of(db: &DatabaseConnection, product_id: i64) -> Result<i32> {
    let found = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(crate::errors::Error::ProductNotFound {
            ids: vec![product_id],
        })?;
    Ok(found.stock)
}

/// Sets up a complete test environment with one product in stock.
/// Returns (db, product) for common checkout scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Espresso", 10).await?;
    Ok((db, product))
}
