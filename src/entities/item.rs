//! Item entity - the shared catalog of sellable item definitions.
//!
//! Names are not unique; two vendors may publish different items under the same name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Vegan Burger")
    pub name: String,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Menu rows offering this item
    #[sea_orm(has_many = "super::location_item::Entity")]
    LocationItems,
    /// Order lines for this item
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// Change log rows about this item
    #[sea_orm(has_many = "super::change_log::Entity")]
    ChangeLog,
}

impl Related<super::location_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationItems.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::change_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
