//! Seed data read from the `[seed]` tables of config.toml.
//!
//! Rows reference each other by natural keys instead of ids: locations name
//! their owner by email, menu rows and orders name their location by vendor
//! name and their items by item name. [`crate::core::seed::apply_seed`] resolves
//! the references while inserting.

use crate::entities::{Availability, Role};
use serde::Deserialize;

/// All seed sections; every section may be omitted
#[derive(Debug, Default, Deserialize, Clone)]
pub struct SeedData {
    /// Accounts to create
    #[serde(default)]
    pub users: Vec<UserSeed>,
    /// Catalog items to create
    #[serde(default)]
    pub items: Vec<ItemSeed>,
    /// Storefronts to register
    #[serde(default)]
    pub locations: Vec<LocationSeed>,
    /// Menu rows to publish
    #[serde(default)]
    pub menu: Vec<MenuSeed>,
    /// Orders to place
    #[serde(default)]
    pub orders: Vec<OrderSeed>,
}

impl SeedData {
    /// True when no section has any rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.items.is_empty()
            && self.locations.is_empty()
            && self.menu.is_empty()
            && self.orders.is_empty()
    }
}

/// A user account
#[derive(Debug, Deserialize, Clone)]
pub struct UserSeed {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email, referenced by `owner_email`
    pub email: String,
    /// Opaque credential string
    pub password: String,
    /// Account role
    pub role: Role,
}

/// A catalog item
#[derive(Debug, Deserialize, Clone)]
pub struct ItemSeed {
    /// Catalog item name, referenced by menu rows and order lines
    pub name: String,
}

/// A storefront, owned by the user with `owner_email`
#[derive(Debug, Deserialize, Clone)]
pub struct LocationSeed {
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Email of the owning user
    pub owner_email: String,
    /// Initial availability
    pub availability: Availability,
    /// Street address
    pub address: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Opening hours
    pub hours: String,
    /// Contact phone
    pub phone: String,
}

/// A menu row of `vendor_name` offering `item`
#[derive(Debug, Deserialize, Clone)]
pub struct MenuSeed {
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Catalog item name
    pub item: String,
    /// Initial availability
    pub availability: Availability,
    /// Units
    pub quantity: i32,
}

/// An order placed at `vendor_name`
#[derive(Debug, Deserialize, Clone)]
pub struct OrderSeed {
    /// Vendor display name of the location
    pub vendor_name: String,
    /// Requested lines
    pub lines: Vec<OrderLineSeed>,
}

/// One line of a seeded order
#[derive(Debug, Deserialize, Clone)]
pub struct OrderLineSeed {
    /// Catalog item name
    pub item: String,
    /// Units
    pub quantity: i32,
}
