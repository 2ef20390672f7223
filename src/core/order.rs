//! Order history reads and retention.
//!
//! Orders are immutable once committed by the checkout engine; this module
//! only reads them back and, for retention, purges whole orders by age.
//! Line items may reference products that were since hard deleted from the
//! catalog; readers return those rows as committed rather than failing on
//! the dangling id.

use crate::{
    core::checkout::Receipt,
    entities::{Order, OrderItem, order, order_item},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, TransactionTrait, prelude::*};

/// Retrieves an order together with its line items, or `None` if the order
/// does not exist. Dangling `product_id`s are returned as stored.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_with_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<Receipt>> {
    let Some(found) = Order::find_by_id(order_id).one(db).await? else {
        return Ok(None);
    };

    let items = found.find_related(OrderItem).all(db).await?;

    Ok(Some(Receipt {
        order: found,
        items,
    }))
}

/// Retrieves the most recent orders, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_recent_orders(db: &DatabaseConnection, limit: u64) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes every order created before `cutoff`, line items first, in one
/// transaction. Returns the number of purged orders.
///
/// This age-based purge is the only way orders leave the store; the
/// checkout engine never deletes or edits committed orders.
///
/// # Errors
/// Returns an error if the database transaction fails; a failed purge
/// leaves all history in place.
pub async fn purge_orders_before(
    db: &DatabaseConnection,
    cutoff: chrono::DateTime<chrono::Utc>,
) -> Result<u64> {
    let txn = db.begin().await?;

    let stale: Vec<i64> = Order::find()
        .filter(order::Column::CreatedAt.lt(cutoff))
        .all(&txn)
        .await?
        .iter()
        .map(|found| found.id)
        .collect();

    if stale.is_empty() {
        txn.commit().await?;
        return Ok(0);
    }

    // Line items cannot outlive their order
    OrderItem::delete_many()
        .filter(order_item::Column::OrderId.is_in(stale.clone()))
        .exec(&txn)
        .await?;

    let deleted = Order::delete_many()
        .filter(order::Column::Id.is_in(stale))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(deleted.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{catalog, checkout};
    use crate::test_utils::*;
    use sea_orm::Set;

    #[tokio::test]
    async fn test_get_order_with_items() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let receipt = checkout::checkout(&db, &[line(product.id, 2, 10.0)], 20.0).await?;

        let fetched = get_order_with_items(&db, receipt.order.id).await?.unwrap();
        assert_eq!(fetched.order, receipt.order);
        assert_eq!(fetched.items, receipt.items);

        assert!(get_order_with_items(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_reader_tolerates_dangling_product_reference() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let receipt = checkout::checkout(&db, &[line(product.id, 1, 10.0)], 10.0).await?;

        // Hard delete the product out from under the committed order
        catalog::delete_product(&db, product.id).await?;

        let fetched = get_order_with_items(&db, receipt.order.id).await?.unwrap();
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.items[0].product_id, product.id);
        assert_eq!(fetched.items[0].price, 10.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_recent_orders_limit() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        for _ in 0..3 {
            checkout::checkout(&db, &[line(product.id, 1, 10.0)], 10.0).await?;
        }

        let recent = list_recent_orders(&db, 2).await?;
        assert_eq!(recent.len(), 2);

        let all = list_recent_orders(&db, 10).await?;
        assert_eq!(all.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_purge_orders_before_cutoff() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let old = checkout::checkout(&db, &[line(product.id, 1, 10.0)], 10.0).await?;
        let recent = checkout::checkout(&db, &[line(product.id, 1, 10.0)], 10.0).await?;

        // Backdate the first order past the cutoff
        let mut stale: order::ActiveModel = old.order.clone().into();
        stale.created_at = Set(chrono::Utc::now() - chrono::Duration::days(2));
        stale.update(&db).await?;

        let purged = purge_orders_before(&db, chrono::Utc::now() - chrono::Duration::days(1)).await?;
        assert_eq!(purged, 1);

        // The old order and its items are gone; the recent order survives intact
        assert!(get_order_with_items(&db, old.order.id).await?.is_none());
        let survivor = get_order_with_items(&db, recent.order.id).await?.unwrap();
        assert_eq!(survivor.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_purge_with_no_stale_orders() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        checkout::checkout(&db, &[line(product.id, 1, 10.0)], 10.0).await?;

        let purged = purge_orders_before(&db, chrono::Utc::now() - chrono::Duration::days(1)).await?;
        assert_eq!(purged, 0);
        assert_eq!(list_recent_orders(&db, 10).await?.len(), 1);

        Ok(())
    }
}
