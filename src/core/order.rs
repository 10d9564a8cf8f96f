//! Order ledger operations.
//!
//! Orders are keyed by `(order_id, location_id)` and own their lines: deleting
//! an order removes its lines, while the referenced catalog items stay.

use crate::{
    entities::{CustomerOrder, OrderItem, OrderStatus, customer_order, order_item},
    errors::{Error, Result, WriteKind},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::info;

/// One requested line of a new order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    /// Catalog item
    pub item_id: i64,
    /// Units, must be positive
    pub quantity: i32,
}

/// An order together with its lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The order row
    pub order: customer_order::Model,
    /// Its lines, in request order
    pub lines: Vec<order_item::Model>,
}

fn not_found(order_id: i64, location_id: i64) -> Error {
    Error::NotFound {
        entity: "order",
        key: format!("({order_id}, {location_id})"),
    }
}

/// Places an order at `location_id` with status `Received`.
///
/// The order number is one more than the highest number in use. The order and
/// all of its lines are written in one transaction; any violation leaves
/// nothing behind.
pub async fn place_order<C>(db: &C, location_id: i64, lines: &[OrderLine]) -> Result<PlacedOrder>
where
    C: ConnectionTrait + TransactionTrait,
{
    if lines.is_empty() {
        return Err(Error::EmptyOrder);
    }
    if let Some(line) = lines.iter().find(|line| line.quantity <= 0) {
        return Err(Error::InvalidQuantity {
            quantity: line.quantity,
        });
    }

    let txn = db.begin().await?;

    let highest: Option<i64> = CustomerOrder::find()
        .select_only()
        .column_as(customer_order::Column::OrderId.max(), "highest")
        .into_tuple::<Option<i64>>()
        .one(&txn)
        .await?
        .flatten();
    let order_id = highest.unwrap_or(0) + 1;

    let order = customer_order::ActiveModel {
        order_id: Set(order_id),
        location_id: Set(location_id),
        status: Set(OrderStatus::Received),
        placed_at: Set(chrono::Utc::now()),
    };
    let order = order
        .insert(&txn)
        .await
        .map_err(|e| Error::from_write(e, "order", WriteKind::Insert))?;

    let mut placed = Vec::with_capacity(lines.len());
    for line in lines {
        let row = order_item::ActiveModel {
            item_id: Set(line.item_id),
            order_id: Set(order_id),
            location_id: Set(location_id),
            quantity: Set(line.quantity),
        };
        let row = row
            .insert(&txn)
            .await
            .map_err(|e| Error::from_write(e, "order_item", WriteKind::Insert))?;
        placed.push(row);
    }

    txn.commit().await?;
    info!(order_id, location_id, lines = placed.len(), "Placed order");
    Ok(PlacedOrder {
        order,
        lines: placed,
    })
}

/// Finds an order by its composite key.
pub async fn get_order<C>(
    db: &C,
    order_id: i64,
    location_id: i64,
) -> Result<Option<customer_order::Model>>
where
    C: ConnectionTrait,
{
    CustomerOrder::find_by_id((order_id, location_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lines of one order ordered by item id.
pub async fn order_lines<C>(
    db: &C,
    order_id: i64,
    location_id: i64,
) -> Result<Vec<order_item::Model>>
where
    C: ConnectionTrait,
{
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .filter(order_item::Column::LocationId.eq(location_id))
        .order_by_asc(order_item::Column::ItemId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Orders placed at one location, oldest number first.
pub async fn orders_for_location<C>(
    db: &C,
    location_id: i64,
) -> Result<Vec<customer_order::Model>>
where
    C: ConnectionTrait,
{
    CustomerOrder::find()
        .filter(customer_order::Column::LocationId.eq(location_id))
        .order_by_asc(customer_order::Column::OrderId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks an order as handed over. Fulfilling twice is a no-op.
pub async fn fulfill_order<C>(
    db: &C,
    order_id: i64,
    location_id: i64,
) -> Result<customer_order::Model>
where
    C: ConnectionTrait,
{
    let order = CustomerOrder::find_by_id((order_id, location_id))
        .one(db)
        .await?
        .ok_or_else(|| not_found(order_id, location_id))?;

    if order.status == OrderStatus::Fulfilled {
        return Ok(order);
    }

    let mut order: customer_order::ActiveModel = order.into();
    order.status = Set(OrderStatus::Fulfilled);
    let order = order
        .update(db)
        .await
        .map_err(|e| Error::from_write(e, "order", WriteKind::Update))?;
    info!(order_id, location_id, "Fulfilled order");
    Ok(order)
}

/// Deletes an order and, by cascade, its lines.
pub async fn delete_order<C>(db: &C, order_id: i64, location_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = CustomerOrder::delete_by_id((order_id, location_id))
        .exec(db)
        .await
        .map_err(|e| Error::from_write(e, "order", WriteKind::Delete))?;

    if result.rows_affected == 0 {
        return Err(not_found(order_id, location_id));
    }
    info!(order_id, location_id, "Deleted order");
    Ok(())
}
