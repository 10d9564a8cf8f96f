//! Location registry operations.
//!
//! Every insert and update runs in a transaction together with its change log
//! rows, see [`crate::core::audit`]. A location can only be deleted while no
//! order and no change log row refers to it; its menu rows go with it.

use crate::{
    core::audit::{self, AuditPolicy},
    entities::{Availability, Location, location},
    errors::{Error, Result, WriteKind},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Fields of a new storefront
#[derive(Debug, Clone)]
pub struct NewLocation {
    /// Vendor display name
    pub vendor_name: String,
    /// Initial availability
    pub availability: Availability,
    /// Street address
    pub address: String,
    /// Owning user id
    pub user_id: i64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Opening hours
    pub hours: String,
    /// Contact phone
    pub phone: String,
}

/// Columns to change on an existing location; `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct LocationChanges {
    /// New vendor display name
    pub vendor_name: Option<String>,
    /// New availability
    pub availability: Option<Availability>,
    /// New street address
    pub address: Option<String>,
    /// New latitude
    pub latitude: Option<f64>,
    /// New longitude
    pub longitude: Option<f64>,
    /// New opening hours
    pub hours: Option<String>,
    /// New contact phone
    pub phone: Option<String>,
}

impl LocationChanges {
    /// True when no column would be written
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vendor_name.is_none()
            && self.availability.is_none()
            && self.address.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.hours.is_none()
            && self.phone.is_none()
    }
}

fn validate_vendor_name(vendor_name: &str) -> Result<String> {
    let vendor_name = vendor_name.trim();
    if vendor_name.is_empty() {
        return Err(Error::Config {
            message: "Vendor name cannot be empty".to_string(),
        });
    }
    Ok(vendor_name.to_string())
}

/// Registers a location and records its `LOCATION_ADD` change.
///
/// Fails with [`Error::ForeignKeyViolation`] when the owner does not exist,
/// in which case neither the location nor a log row is written.
pub async fn create_location<C>(db: &C, new_location: NewLocation) -> Result<location::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let vendor_name = validate_vendor_name(&new_location.vendor_name)?;

    let txn = db.begin().await?;

    let location = location::ActiveModel {
        vendor_name: Set(vendor_name),
        availability: Set(new_location.availability),
        address: Set(new_location.address),
        user_id: Set(new_location.user_id),
        latitude: Set(new_location.latitude),
        longitude: Set(new_location.longitude),
        hours: Set(new_location.hours),
        phone: Set(new_location.phone),
        ..Default::default()
    };
    let location = location
        .insert(&txn)
        .await
        .map_err(|e| Error::from_write(e, "location", WriteKind::Insert))?;

    audit::record_location_added(&txn, &location).await?;

    txn.commit().await?;
    info!(location_id = location.id, vendor = %location.vendor_name, "Registered location");
    Ok(location)
}

/// Finds a location by primary key.
pub async fn get_location<C>(db: &C, location_id: i64) -> Result<Option<location::Model>>
where
    C: ConnectionTrait,
{
    Location::find_by_id(location_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All locations ordered by vendor name.
pub async fn list_locations<C>(db: &C) -> Result<Vec<location::Model>>
where
    C: ConnectionTrait,
{
    Location::find()
        .order_by_asc(location::Column::VendorName)
        .order_by_asc(location::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Locations owned by `user_id`.
pub async fn locations_for_user<C>(db: &C, user_id: i64) -> Result<Vec<location::Model>>
where
    C: ConnectionTrait,
{
    Location::find()
        .filter(location::Column::UserId.eq(user_id))
        .order_by_asc(location::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to a location and records availability/address changes
/// according to `policy`.
///
/// An empty change set touches nothing and logs nothing.
pub async fn update_location<C>(
    db: &C,
    location_id: i64,
    changes: LocationChanges,
    policy: AuditPolicy,
) -> Result<location::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let vendor_name = changes
        .vendor_name
        .as_deref()
        .map(validate_vendor_name)
        .transpose()?;

    let txn = db.begin().await?;

    let before = Location::find_by_id(location_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "location",
            key: location_id.to_string(),
        })?;

    if changes.is_empty() {
        return Ok(before);
    }

    let mut location: location::ActiveModel = before.clone().into();
    if let Some(vendor_name) = vendor_name {
        location.vendor_name = Set(vendor_name);
    }
    if let Some(availability) = changes.availability {
        location.availability = Set(availability);
    }
    if let Some(address) = changes.address {
        location.address = Set(address);
    }
    if let Some(latitude) = changes.latitude {
        location.latitude = Set(latitude);
    }
    if let Some(longitude) = changes.longitude {
        location.longitude = Set(longitude);
    }
    if let Some(hours) = changes.hours {
        location.hours = Set(hours);
    }
    if let Some(phone) = changes.phone {
        location.phone = Set(phone);
    }

    let after = location
        .update(&txn)
        .await
        .map_err(|e| Error::from_write(e, "location", WriteKind::Update))?;

    let logged = audit::record_location_update(&txn, &before, &after, policy).await?;

    txn.commit().await?;
    info!(location_id, log_rows = logged.len(), "Updated location");
    Ok(after)
}

/// Opens or closes a location.
pub async fn set_location_availability<C>(
    db: &C,
    location_id: i64,
    availability: Availability,
    policy: AuditPolicy,
) -> Result<location::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let changes = LocationChanges {
        availability: Some(availability),
        ..Default::default()
    };
    update_location(db, location_id, changes, policy).await
}

/// Moves a location to a new address.
pub async fn set_location_address<C>(
    db: &C,
    location_id: i64,
    address: String,
    policy: AuditPolicy,
) -> Result<location::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let changes = LocationChanges {
        address: Some(address),
        ..Default::default()
    };
    update_location(db, location_id, changes, policy).await
}

/// Deletes a location and, by cascade, its menu rows.
///
/// Fails with [`Error::RestrictedDelete`] while orders or change log rows
/// reference the location.
pub async fn delete_location<C>(db: &C, location_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Location::delete_by_id(location_id)
        .exec(db)
        .await
        .map_err(|e| Error::from_write(e, "location", WriteKind::Delete))?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "location",
            key: location_id.to_string(),
        });
    }
    info!(location_id, "Deleted location");
    Ok(())
}
