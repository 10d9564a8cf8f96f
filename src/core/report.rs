//! Reporting queries.
//!
//! The four listings join the tables into display rows and are recomputed on
//! every call. None of them take parameters or paginate. The `render_*`
//! helpers turn a row into one line of plain text for the binary.

use crate::{
    entities::{
        Availability, ChangeLog, ChangeType, Location, LocationItem, OrderItem, OrderStatus,
        change_log, customer_order, item, location, location_item, order_item,
    },
    errors::Result,
};
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait, prelude::DateTimeUtc,
};
use serde::Serialize;

/// One row of [`show_log`]
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct LogEntry {
    /// Kind of change
    pub change_type: ChangeType,
    /// When the change was recorded
    pub changed_at: DateTimeUtc,
    /// Availability before the change
    pub original_availability: Option<Availability>,
    /// Availability after the change
    pub new_availability: Option<Availability>,
    /// Address before the change
    pub original_address: Option<String>,
    /// Address after the change
    pub new_address: Option<String>,
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Item the change concerns, for menu changes
    pub item_id: Option<i64>,
}

/// One row of [`show_location`]
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct LocationListing {
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Street address
    pub address: String,
    /// Whether the location or menu row is available
    pub availability: Availability,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Opening hours
    pub hours: String,
    /// Contact phone
    pub phone: String,
}

/// One row of [`show_order`], i.e. one order line
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct OrderListing {
    /// Order number
    pub order_id: i64,
    /// Order lifecycle state
    pub status: OrderStatus,
    /// When the order was placed
    pub placed_at: DateTimeUtc,
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Catalog item name
    pub item_name: String,
    /// Units ordered or in stock
    pub quantity: i32,
}

/// One row of [`show_menu`]
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct MenuListing {
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Catalog item name
    pub item_name: String,
    /// Units ordered or in stock
    pub quantity: i32,
    /// Whether the location or menu row is available
    pub availability: Availability,
}

/// Every change log row with its location's vendor name, newest first.
pub async fn show_log<C>(db: &C) -> Result<Vec<LogEntry>>
where
    C: ConnectionTrait,
{
    ChangeLog::find()
        .select_only()
        .column(change_log::Column::ChangeType)
        .column(change_log::Column::ChangedAt)
        .column(change_log::Column::OriginalAvailability)
        .column(change_log::Column::NewAvailability)
        .column(change_log::Column::OriginalAddress)
        .column(change_log::Column::NewAddress)
        .column(location::Column::VendorName)
        .column(change_log::Column::ItemId)
        .join(JoinType::InnerJoin, change_log::Relation::Location.def())
        .order_by_desc(change_log::Column::ChangedAt)
        .order_by_desc(change_log::Column::ChangeId)
        .into_model::<LogEntry>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every location, vendor names in descending order.
pub async fn show_location<C>(db: &C) -> Result<Vec<LocationListing>>
where
    C: ConnectionTrait,
{
    Location::find()
        .select_only()
        .column(location::Column::VendorName)
        .column(location::Column::Address)
        .column(location::Column::Availability)
        .column(location::Column::Latitude)
        .column(location::Column::Longitude)
        .column(location::Column::Hours)
        .column(location::Column::Phone)
        .order_by_desc(location::Column::VendorName)
        .order_by_desc(location::Column::Id)
        .into_model::<LocationListing>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every order line with its order, location and item, by ascending order number.
pub async fn show_order<C>(db: &C) -> Result<Vec<OrderListing>>
where
    C: ConnectionTrait,
{
    OrderItem::find()
        .select_only()
        .column(customer_order::Column::OrderId)
        .column(customer_order::Column::Status)
        .column(customer_order::Column::PlacedAt)
        .column(location::Column::VendorName)
        .column_as(item::Column::Name, "item_name")
        .column(order_item::Column::Quantity)
        .join(JoinType::InnerJoin, order_item::Relation::Order.def())
        .join(JoinType::InnerJoin, customer_order::Relation::Location.def())
        .join(JoinType::InnerJoin, order_item::Relation::Item.def())
        .order_by_asc(customer_order::Column::OrderId)
        .order_by_asc(customer_order::Column::LocationId)
        .order_by_asc(item::Column::Name)
        .into_model::<OrderListing>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every menu row with vendor and item names, by vendor then item name.
pub async fn show_menu<C>(db: &C) -> Result<Vec<MenuListing>>
where
    C: ConnectionTrait,
{
    LocationItem::find()
        .select_only()
        .column(location::Column::VendorName)
        .column_as(item::Column::Name, "item_name")
        .column(location_item::Column::Quantity)
        .column(location_item::Column::Availability)
        .join(JoinType::InnerJoin, location_item::Relation::Location.def())
        .join(JoinType::InnerJoin, location_item::Relation::Item.def())
        .order_by_asc(location::Column::VendorName)
        .order_by_asc(item::Column::Name)
        .into_model::<MenuListing>()
        .all(db)
        .await
        .map_err(Into::into)
}

fn flag(availability: Option<Availability>) -> &'static str {
    match availability {
        Some(Availability::Available) => "Y",
        Some(Availability::Unavailable) => "N",
        None => "-",
    }
}

/// Formats a log row like `2024-05-01 12:00:00 | LOCATION_ADDRESS | Vendor1 | - -> - | 1 Main St -> 2 Side St`.
#[must_use]
pub fn render_log_entry(entry: &LogEntry) -> String {
    let change = match entry.change_type {
        ChangeType::LocationAdd => "LOCATION_ADD",
        ChangeType::LocationAvailability => "LOCATION_AVAILABILITY",
        ChangeType::LocationAddress => "LOCATION_ADDRESS",
        ChangeType::MenuAvailability => "MENU_AVAILABILITY",
    };
    let item = entry
        .item_id
        .map_or_else(String::new, |id| format!(" | item {id}"));
    format!(
        "{} | {change} | {} | {} -> {} | {} -> {}{item}",
        entry.changed_at.format("%Y-%m-%d %H:%M:%S"),
        entry.vendor_name,
        flag(entry.original_availability),
        flag(entry.new_availability),
        entry.original_address.as_deref().unwrap_or("-"),
        entry.new_address.as_deref().unwrap_or("-"),
    )
}

/// Formats a location row.
#[must_use]
pub fn render_location(row: &LocationListing) -> String {
    format!(
        "{} [{}] {} ({:.4}, {:.4}) {} {}",
        row.vendor_name,
        flag(Some(row.availability)),
        row.address,
        row.latitude,
        row.longitude,
        row.hours,
        row.phone
    )
}

/// Formats an order line.
#[must_use]
pub fn render_order(row: &OrderListing) -> String {
    let status = match row.status {
        OrderStatus::Received => "Received",
        OrderStatus::Fulfilled => "Fulfilled",
    };
    format!(
        "#{} {status} {} | {} | {} x{}",
        row.order_id,
        row.placed_at.format("%Y-%m-%d %H:%M:%S"),
        row.vendor_name,
        row.item_name,
        row.quantity
    )
}

/// Formats a menu row.
#[must_use]
pub fn render_menu(row: &MenuListing) -> String {
    format!(
        "{} | {} x{} [{}]",
        row.vendor_name,
        row.item_name,
        row.quantity,
        flag(Some(row.availability))
    )
}
