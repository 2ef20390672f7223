//! Catalog business logic - Handles all product management operations.
//!
//! This module provides functions for creating, retrieving, updating, and
//! deleting products in the shop's catalog. Deletion is a hard delete, so
//! historical order line items may reference a product that no longer
//! exists; order readers tolerate those dangling references. Restocking is
//! the only direct stock write and uses an atomic database-level increment,
//! sharing the store's mutual exclusion with the checkout engine.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};

fn validate_product_fields(name: &str, price: f64, stock: i32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    if stock < 0 {
        return Err(Error::InvalidQuantity { quantity: stock });
    }

    Ok(())
}

/// Retrieves all products, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product(db: &DatabaseConnection, product_id: i64) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with the specified parameters, performing input validation.
///
/// A blank category falls back to `"general"`. The image reference is an
/// opaque string supplied by the caller, if any.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The initial stock is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    stock: i32,
    category: String,
    image: Option<String>,
) -> Result<product::Model> {
    validate_product_fields(&name, price, stock)?;

    let category = if category.trim().is_empty() {
        "general".to_string()
    } else {
        category
    };

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        stock: Set(stock),
        category: Set(category),
        image: Set(image),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Updates an existing product, performing input validation.
///
/// Passing `image: None` keeps the stored image reference; a new reference
/// replaces it. Refreshes the updated timestamp.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The stock is negative
/// - The product does not exist
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    name: String,
    price: f64,
    stock: i32,
    category: String,
    image: Option<String>,
) -> Result<product::Model> {
    validate_product_fields(&name, price, stock)?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            ids: vec![product_id],
        })?
        .into();

    product.name = Set(name.trim().to_string());
    product.price = Set(price);
    product.stock = Set(stock);
    product.category = Set(if category.trim().is_empty() {
        "general".to_string()
    } else {
        category
    });
    if let Some(reference) = image {
        product.image = Set(Some(reference));
    }
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Hard deletes a product from the catalog.
///
/// Historical order line items keep their `product_id` and become dangling
/// references, which order readers tolerate.
///
/// # Errors
/// Returns an error if the product does not exist or the delete fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let deleted = Product::delete_by_id(product_id).exec(db).await?;

    if deleted.rows_affected == 0 {
        return Err(Error::ProductNotFound {
            ids: vec![product_id],
        });
    }

    Ok(())
}

/// Atomically increases a product's stock by `amount`.
///
/// Uses a single database-level update (`stock = stock + amount`) rather
/// than read-modify-write, so restocking cannot lose a concurrent
/// checkout's decrement.
///
/// # Errors
/// Returns an error if the amount is not positive, the product does not
/// exist, or the database update fails.
pub async fn restock<C>(db: &C, product_id: i64, amount: i32) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    if amount <= 0 {
        return Err(Error::InvalidQuantity { quantity: amount });
    }

    // First verify the product exists
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            ids: vec![product_id],
        })?;

    Product::update_many()
        .col_expr(
            product::Column::Stock,
            Expr::col(product::Column::Stock).add(amount),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    // Return the updated product
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            ids: vec![product_id],
        })
}
