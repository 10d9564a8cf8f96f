//! Order-Item entity - one line of an order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line keyed by (item, order, location)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Ordered item
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i64,
    /// Order number
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i64,
    /// Location the order belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub location_id: i64,
    /// Units ordered
    pub quantity: i32,
}

/// Defines relationships between Order-Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Lines die with their order
    #[sea_orm(
        belongs_to = "super::customer_order::Entity",
        from = "(Column::OrderId, Column::LocationId)",
        to = "(super::customer_order::Column::OrderId, super::customer_order::Column::LocationId)",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
    /// Items cannot be deleted while ordered
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Item,
}

impl Related<super::customer_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
