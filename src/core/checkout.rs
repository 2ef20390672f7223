//! Checkout engine - the atomic order commit at the heart of the POS.
//!
//! A checkout takes a cart of `{product_id, quantity, unit_price}` lines and
//! commits the order row, one line item per cart line, and every stock
//! decrement in a single database transaction. Stock decrements are
//! conditional updates (`stock = stock - q WHERE stock >= q`) so that the
//! availability check and the write are indivisible relative to concurrent
//! checkouts: two carts can never both consume the same unit of stock.
//! Any failure before commit drops the transaction, which rolls everything
//! back; a partially applied checkout is never observable.

use crate::{
    entities::{Product, order, order_item, product},
    errors::{Error, Result, StockShortage},
};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::warn;

/// Half a cent; client totals that differ by more than this are logged.
const TOTAL_TOLERANCE: f64 = 0.005;

/// One requested cart line. Lines are independent: two lines may reference
/// the same product (e.g. hot and iced variants priced upstream) and are
/// recorded as separate line items.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product being purchased
    pub product_id: i64,
    /// Units requested, must be positive
    pub quantity: i32,
    /// Unit price at sale time, must be non-negative and finite
    pub unit_price: f64,
}

/// A committed checkout: the order row and its line items as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// The created order, including generated id and timestamp
    pub order: order::Model,
    /// Line items in cart order
    pub items: Vec<order_item::Model>,
}

/// Validates cart shape before any store interaction.
fn validate_cart(cart: &[CartLine]) -> Result<()> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    for line in cart {
        if line.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }

        if line.unit_price < 0.0 || !line.unit_price.is_finite() {
            return Err(Error::InvalidAmount {
                amount: line.unit_price,
            });
        }
    }

    Ok(())
}

/// Total quantity required per product, in first-seen cart order. Lines
/// sharing a product are summed for the availability check even though they
/// are recorded independently.
fn required_per_product(cart: &[CartLine]) -> Vec<(i64, i64)> {
    let mut required: Vec<(i64, i64)> = Vec::new();
    for line in cart {
        match required.iter_mut().find(|(id, _)| *id == line.product_id) {
            Some((_, quantity)) => *quantity += i64::from(line.quantity),
            None => required.push((line.product_id, i64::from(line.quantity))),
        }
    }
    required
}

/// Commits a cart as a new order, all-or-nothing.
///
/// On success returns the created order and its line items exactly as
/// committed. On any failure the store is left untouched: validation errors
/// are raised before a transaction is opened, and every later error path
/// drops the open transaction, rolling it back.
///
/// `expected_total` is only a client-side consistency check. The order's
/// total is always recomputed server-side as the sum of
/// `quantity * unit_price`; a disagreement is logged and the authoritative
/// total wins.
///
/// Checkout is deliberately not idempotent: submitting the same cart twice
/// creates two orders and decrements stock twice. At-most-once delivery
/// (e.g. against client retries) is the caller's responsibility.
///
/// # Errors
/// - [`Error::EmptyCart`], [`Error::InvalidQuantity`], [`Error::InvalidAmount`]
///   for malformed carts, before any store interaction
/// - [`Error::ProductNotFound`] if any referenced product no longer exists
/// - [`Error::InsufficientStock`] listing every short product with its
///   available quantity
/// - [`Error::ConcurrencyConflict`] if a concurrent checkout consumed stock
///   between the availability check and the decrement; safe to retry
/// - [`Error::StoreUnavailable`] / [`Error::Database`] for store failures
pub async fn checkout(
    db: &DatabaseConnection,
    cart: &[CartLine],
    expected_total: f64,
) -> Result<Receipt> {
    validate_cart(cart)?;

    // Single transaction scoped to the whole operation. Early returns drop
    // `txn`, which rolls back everything done so far.
    let txn = db.begin().await?;

    // Re-read stock inside the transaction, never from a pre-fetched
    // snapshot. Collect every missing product and every shortage so the
    // caller learns about all of them at once.
    let mut missing = Vec::new();
    let mut shortages = Vec::new();
    for (product_id, requested) in required_per_product(cart) {
        match Product::find_by_id(product_id).one(&txn).await? {
            None => missing.push(product_id),
            Some(found) if i64::from(found.stock) < requested => {
                shortages.push(StockShortage {
                    product_id,
                    requested,
                    available: i64::from(found.stock),
                });
            }
            Some(_) => {}
        }
    }

    if !missing.is_empty() {
        return Err(Error::ProductNotFound { ids: missing });
    }

    if !shortages.is_empty() {
        return Err(Error::InsufficientStock { shortages });
    }

    // Authoritative total; the caller's figure is advisory only.
    let total: f64 = cart
        .iter()
        .map(|line| line.unit_price * f64::from(line.quantity))
        .sum();

    if !expected_total.is_finite() || (expected_total - total).abs() > TOTAL_TOLERANCE {
        warn!(
            client_total = expected_total,
            authoritative_total = total,
            "client-submitted total disagrees; using authoritative total"
        );
    }

    let order_row = order::ActiveModel {
        total: Set(total),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(cart.len());
    for line in cart {
        let item = order_item::ActiveModel {
            order_id: Set(order_row.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(line.unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        items.push(item);

        // Conditional decrement: the store evaluates the precondition, so
        // the check and the write are one indivisible step.
        let updated = Product::update_many()
            .col_expr(
                product::Column::Stock,
                Expr::col(product::Column::Stock).sub(line.quantity),
            )
            .filter(product::Column::Id.eq(line.product_id))
            .filter(product::Column::Stock.gte(line.quantity))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            // Availability held moments ago, so another writer got between
            // the check and this decrement.
            return Err(Error::ConcurrencyConflict);
        }
    }

    txn.commit().await?;

    Ok(Receipt {
        order: order_row,
        items,
    })
}
