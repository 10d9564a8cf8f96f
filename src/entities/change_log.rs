//! Change log entity - append-only audit trail of location and menu changes.
//!
//! Rows are written by [`crate::core::audit`] in the same transaction as the
//! change they describe and are never updated or deleted by the crate.
//! Availability rows leave the address columns null and vice versa.

use super::sea_orm_active_enums::{Availability, ChangeType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Change log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_log")]
pub struct Model {
    /// Monotonic change identifier
    #[sea_orm(primary_key)]
    pub change_id: i64,
    /// Kind of change
    pub change_type: ChangeType,
    /// Availability before the change
    pub original_availability: Option<Availability>,
    /// Availability after the change
    pub new_availability: Option<Availability>,
    /// Address before the change
    pub original_address: Option<String>,
    /// Address after the change
    pub new_address: Option<String>,
    /// When the change was recorded
    pub changed_at: DateTimeUtc,
    /// Location the change concerns
    pub location_id: i64,
    /// Item the change concerns, for menu changes only
    pub item_id: Option<i64>,
}

/// Defines relationships between change log rows and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Locations with change log rows cannot be deleted
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Location,
    /// Items with change log rows cannot be deleted
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
