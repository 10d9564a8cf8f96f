//! Location entity - a vendor storefront owned by exactly one user.
//!
//! Deleting a location is restricted while orders or change log rows refer to it;
//! its menu rows are removed with it.

use super::sea_orm_active_enums::Availability;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Location database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    /// Unique identifier for the location
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Vendor display name (e.g., "Vendor1")
    pub vendor_name: String,
    /// Whether the storefront is currently open
    pub availability: Availability,
    /// Street address
    pub address: String,
    /// Owning user
    pub user_id: i64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Free-form opening hours (e.g., "11:00-21:00")
    pub hours: String,
    /// Contact phone number
    pub phone: String,
}

/// Defines relationships between Location and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each location belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    User,
    /// Menu rows of this location
    #[sea_orm(has_many = "super::location_item::Entity")]
    LocationItems,
    /// Orders placed at this location
    #[sea_orm(has_many = "super::customer_order::Entity")]
    Orders,
    /// Change log rows about this location
    #[sea_orm(has_many = "super::change_log::Entity")]
    ChangeLog,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::location_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationItems.def()
    }
}

impl Related<super::customer_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::change_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
