//! Catalog seed configuration loading from config.toml
//!
//! This module provides functionality to load the initial product catalog
//! from a TOML configuration file. The products defined in config.toml are
//! used to seed an empty store on first run; a store that already has
//! products is never reseeded.

use crate::{
    core,
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of product configurations to seed
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Name of the product
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Initial stock level
    pub stock: i32,
    /// Menu category; blank falls back to "general"
    #[serde(default)]
    pub category: String,
    /// Optional opaque image reference
    #[serde(default)]
    pub image: Option<String>,
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog configuration from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds the catalog from configuration if the store is empty.
///
/// Returns the number of products inserted; zero means the store already
/// had a catalog and was left untouched.
///
/// # Errors
/// Returns an error if a seeded product fails validation or the database
/// insert fails.
pub async fn seed_initial_products(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let existing = crate::entities::Product::find().limit(1).all(db).await?;
    if !existing.is_empty() {
        info!("Catalog already seeded; skipping.");
        return Ok(0);
    }

    for product in &config.products {
        core::catalog::create_product(
            db,
            product.name.clone(),
            product.price,
            product.stock,
            product.category.clone(),
            product.image.clone(),
        )
        .await?;
    }

    Ok(config.products.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn sample_config() -> Config {
        let toml_str = r#"
            [[products]]
            name = "Espresso"
            price = 3.0
            stock = 40
            category = "coffee"

            [[products]]
            name = "Croissant"
            price = 2.5
            stock = 12
            category = "bakery"
            image = "/uploads/croissant.jpg"
        "#;

        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_parse_catalog_config() {
        let config = sample_config();
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].name, "Espresso");
        assert_eq!(config.products[0].price, 3.0);
        assert_eq!(config.products[0].stock, 40);
        assert!(config.products[0].image.is_none());

        assert_eq!(config.products[1].category, "bakery");
        assert_eq!(
            config.products[1].image,
            Some("/uploads/croissant.jpg".to_string())
        );
    }

    #[test]
    fn test_parse_defaults_category_and_image() {
        let toml_str = r#"
            [[products]]
            name = "Water"
            price = 1.0
            stock = 99
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.products[0].category, "");
        assert!(config.products[0].image.is_none());
    }

    #[tokio::test]
    async fn test_seed_initial_products() -> Result<()> {
        let db = setup_test_db().await?;

        let seeded = seed_initial_products(&db, &sample_config()).await?;
        assert_eq!(seeded, 2);

        let products = crate::core::catalog::list_products(&db).await?;
        assert_eq!(products.len(), 2);

        // A populated store is never reseeded
        let seeded_again = seed_initial_products(&db, &sample_config()).await?;
        assert_eq!(seeded_again, 0);
        assert_eq!(crate::core::catalog::list_products(&db).await?.len(), 2);

        Ok(())
    }
}
