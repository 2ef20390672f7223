/// Database configuration and connection management
pub mod database;

/// Initial catalog seed loading from config.toml
pub mod catalog;
