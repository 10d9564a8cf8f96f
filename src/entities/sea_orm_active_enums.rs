//! Closed value sets stored as short strings.
//!
//! Each enum maps one-to-one onto the values the schema accepts. The same
//! sets are enforced by `CHECK` constraints when tables are created, see
//! [`crate::config::database::create_tables`].

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Owns storefront locations
    #[sea_orm(string_value = "vendor")]
    Vendor,
    /// Places orders
    #[sea_orm(string_value = "customer")]
    Customer,
}

/// Y/N availability flag used by locations and menu rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Availability {
    /// Open / on the menu
    #[sea_orm(string_value = "Y")]
    #[serde(rename = "Y")]
    Available,
    /// Closed / off the menu
    #[sea_orm(string_value = "N")]
    #[serde(rename = "N")]
    Unavailable,
}

/// Order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OrderStatus {
    /// Placed, not yet handed over
    #[sea_orm(string_value = "Received")]
    Received,
    /// Handed over to the customer
    #[sea_orm(string_value = "Fulfilled")]
    Fulfilled,
}

/// Kind of event recorded in the change log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// A location was registered
    #[sea_orm(string_value = "LOCATION_ADD")]
    LocationAdd,
    /// A location's availability was updated
    #[sea_orm(string_value = "LOCATION_AVAILABILITY")]
    LocationAvailability,
    /// A location's address was updated
    #[sea_orm(string_value = "LOCATION_ADDRESS")]
    LocationAddress,
    /// A menu row's availability was updated
    #[sea_orm(string_value = "MENU_AVAILABILITY")]
    MenuAvailability,
}

/// String values of an enum in declaration order, used to build `CHECK` constraints.
pub fn allowed_values<E>() -> Vec<String>
where
    E: ActiveEnum<Value = String> + Iterable,
{
    E::iter().map(|variant| variant.to_value()).collect()
}
