//! Order entity - a customer order placed at a single location.
//!
//! Orders are keyed by `(order_id, location_id)`; order items reference the full pair.

use super::sea_orm_active_enums::OrderStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Order number
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i64,
    /// Location the order was placed at
    #[sea_orm(primary_key, auto_increment = false)]
    pub location_id: i64,
    /// Lifecycle state
    pub status: OrderStatus,
    /// When the order was placed
    pub placed_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Locations with orders cannot be deleted
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Location,
    /// Line items of this order
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
