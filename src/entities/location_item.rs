//! Location-Item entity - per-location availability and stock of a catalog item.

use super::sea_orm_active_enums::Availability;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu row keyed by (location, item)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location_items")]
pub struct Model {
    /// Offering location
    #[sea_orm(primary_key, auto_increment = false)]
    pub location_id: i64,
    /// Offered item
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i64,
    /// Whether the item is currently on the menu
    pub availability: Availability,
    /// Units in stock
    pub quantity: i32,
}

/// Defines relationships between Location-Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Removed together with its location
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Location,
    /// Items cannot be deleted while offered
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Item,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
