//! Unified error types for the POS backend.
//!
//! Every failure a caller can observe is one of these variants. Store
//! failures are classified on conversion from [`sea_orm::DbErr`]: outright
//! connectivity loss becomes [`Error::StoreUnavailable`], SQLite lock
//! contention becomes [`Error::ConcurrencyConflict`] (safe to retry because
//! the failed attempt is fully rolled back), and everything else stays a
//! generic [`Error::Database`].

use sea_orm::DbErr;
use thiserror::Error;

/// One cart line that could not be satisfied from current stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortage {
    /// Product that is short
    pub product_id: i64,
    /// Total quantity the cart requested for this product
    pub requested: i64,
    /// Stock available at the time of the check
    pub available: i64,
}

/// Unified error enum for all POS operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i32 },

    #[error("Cart must contain at least one line")]
    EmptyCart,

    #[error("Product(s) not found: {ids:?}")]
    ProductNotFound { ids: Vec<i64> },

    #[error("Insufficient stock: {shortages:?}")]
    InsufficientStock { shortages: Vec<StockShortage> },

    #[error("Conflicting concurrent update; retry the checkout")]
    ConcurrencyConflict,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(DbErr),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// SQLite reports lock contention through the error text rather than a
/// dedicated variant, so classification has to match on the message.
fn is_lock_contention(err: &DbErr) -> bool {
    let text = err.to_string();
    text.contains("database is locked") || text.contains("database table is locked")
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Error::StoreUnavailable(err),
            DbErr::Exec(_) | DbErr::Query(_) if is_lock_contention(&err) => {
                Error::ConcurrencyConflict
            }
            _ => Error::Database(err),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn test_locked_database_classified_as_conflict() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "error returned from database: database is locked".to_string(),
        ));
        assert!(matches!(Error::from(err), Error::ConcurrencyConflict));

        let err = DbErr::Query(RuntimeErr::Internal("database table is locked".to_string()));
        assert!(matches!(Error::from(err), Error::ConcurrencyConflict));
    }

    #[test]
    fn test_connection_failure_classified_as_unavailable() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection refused".to_string()));
        assert!(matches!(Error::from(err), Error::StoreUnavailable(_)));
    }

    #[test]
    fn test_other_errors_stay_database() {
        let err = DbErr::Custom("constraint violation".to_string());
        assert!(matches!(Error::from(err), Error::Database(_)));
    }
}
