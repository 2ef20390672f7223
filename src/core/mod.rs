/// Checkout engine - atomic order commit and conditional stock decrement
pub mod checkout;

/// Catalog management - product CRUD and atomic restocking
pub mod catalog;

/// Order history reads and age-based retention purge
pub mod order;
