//! Database configuration module for `VendorMarket`.
//!
//! This module handles `SQLite` connection setup and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so primary keys, composite keys and the
//! cascade/restrict foreign key actions declared on each `Relation` land in the
//! schema without hand-written DDL. Enum columns additionally get `CHECK`
//! constraints listing their allowed values.

use crate::entities::sea_orm_active_enums::allowed_values;
use crate::entities::{
    Availability, ChangeLog, ChangeType, CustomerOrder, Item, Location, LocationItem, OrderItem,
    OrderStatus, Role, User, change_log, customer_order, location, location_item, user,
};
use crate::errors::Result;
use sea_orm::sea_query::{Expr, SimpleExpr, TableCreateStatement};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://vendor_market.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns
/// the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection using the `DATABASE_URL` environment variable.
pub async fn create_connection() -> Result<DatabaseConnection> {
    connect(&get_database_url()).await
}

/// Connects to `url` and switches on foreign key enforcement.
///
/// In-memory databases live and die with their connection, so the pool is
/// pinned to a single connection for them.
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);
    if url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;
    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    debug!(url, "Connected to database");
    Ok(db)
}

/// Creates all tables if they do not exist yet.
///
/// Tables are created parents first: users, items, locations, location items,
/// orders, order items and finally the change log.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut users = schema.create_table_from_entity(User);
    users.check(one_of(user::Column::Role, allowed_values::<Role>()));

    let items = schema.create_table_from_entity(Item);

    let mut locations = schema.create_table_from_entity(Location);
    locations.check(one_of(
        location::Column::Availability,
        allowed_values::<Availability>(),
    ));

    let mut location_items = schema.create_table_from_entity(LocationItem);
    location_items.check(one_of(
        location_item::Column::Availability,
        allowed_values::<Availability>(),
    ));

    let mut orders = schema.create_table_from_entity(CustomerOrder);
    orders.check(one_of(
        customer_order::Column::Status,
        allowed_values::<OrderStatus>(),
    ));

    let order_items = schema.create_table_from_entity(OrderItem);

    let mut change_log = schema.create_table_from_entity(ChangeLog);
    change_log
        .check(one_of(
            change_log::Column::ChangeType,
            allowed_values::<ChangeType>(),
        ))
        .check(one_of(
            change_log::Column::OriginalAvailability,
            allowed_values::<Availability>(),
        ))
        .check(one_of(
            change_log::Column::NewAvailability,
            allowed_values::<Availability>(),
        ));

    let tables: [TableCreateStatement; 7] = [
        users,
        items,
        locations,
        location_items,
        orders,
        order_items,
        change_log,
    ];
    for mut table in tables {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    info!("Database schema ready");
    Ok(())
}

fn one_of<C>(column: C, values: Vec<String>) -> SimpleExpr
where
    C: sea_orm::sea_query::IntoColumnRef,
{
    Expr::col(column).is_in(values)
}
