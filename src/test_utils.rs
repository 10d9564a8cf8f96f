//! Shared test utilities for `VendorMarket`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::settings::parse_config,
    core::{
        location::{self, NewLocation},
        seed,
        user::{self, NewUser},
    },
    entities::{self, Availability, Role},
    errors::{Error, Result, WriteKind},
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set};

/// The shipped config.toml, whose seed data is the sample data set.
pub const SAMPLE_CONFIG: &str = include_str!("../config.toml");

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A [`NewUser`] with placeholder names and password.
#[must_use]
pub fn test_new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: "password".to_string(),
        role,
    }
}

/// Creates a test user with the given email and role.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
    role: Role,
) -> Result<entities::user::Model> {
    user::create_user(db, test_new_user(email, role)).await
}

/// A [`NewLocation`] with sensible defaults.
///
/// # Defaults
/// * `availability`: Y
/// * `address`: "1 Main St"
/// * coordinates: (40.7128, -74.0060)
#[must_use]
pub fn test_new_location(vendor_name: &str, user_id: i64) -> NewLocation {
    NewLocation {
        vendor_name: vendor_name.to_string(),
        availability: Availability::Available,
        address: "1 Main St".to_string(),
        user_id,
        latitude: 40.7128,
        longitude: -74.0060,
        hours: "11:00-21:00".to_string(),
        phone: "555-0100".to_string(),
    }
}

/// Registers a location (audited) owned by a fresh vendor.
pub async fn create_test_location(
    db: &DatabaseConnection,
    vendor_name: &str,
) -> Result<entities::location::Model> {
    let email = format!("{}@example.com", vendor_name.replace(' ', "_").to_lowercase());
    let owner = create_test_user(db, &email, Role::Vendor).await?;
    location::create_location(db, test_new_location(vendor_name, owner.id)).await
}

/// Inserts a location row directly, without a change log row.
///
/// Used to exercise delete behavior on locations no log row refers to.
pub async fn insert_unaudited_location(
    db: &DatabaseConnection,
    vendor_name: &str,
    user_id: i64,
) -> Result<entities::location::Model> {
    let new_location = test_new_location(vendor_name, user_id);
    entities::location::ActiveModel {
        vendor_name: Set(new_location.vendor_name),
        availability: Set(new_location.availability),
        address: Set(new_location.address),
        user_id: Set(new_location.user_id),
        latitude: Set(new_location.latitude),
        longitude: Set(new_location.longitude),
        hours: Set(new_location.hours),
        phone: Set(new_location.phone),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| Error::from_write(e, "location", WriteKind::Insert))
}

/// Sets up a database with one registered location.
/// Returns (db, location) for common test scenarios.
pub async fn setup_with_location() -> Result<(DatabaseConnection, entities::location::Model)> {
    let db = setup_test_db().await?;
    let location = create_test_location(&db, "Test Vendor").await?;
    Ok((db, location))
}

/// Sets up a database seeded with the sample data from config.toml.
pub async fn setup_with_sample_data() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    let settings = parse_config(SAMPLE_CONFIG)?;
    seed::apply_seed(&db, &settings.seed).await?;
    Ok(db)
}

/// Makes every insert into `change_log` abort, so audited writes fail at
/// their log row.
pub async fn reject_change_log_writes(db: &DatabaseConnection) -> Result<()> {
    db.execute_unprepared(
        "CREATE TRIGGER reject_change_log BEFORE INSERT ON change_log \
         BEGIN SELECT RAISE(ABORT, 'change log unavailable'); END",
    )
    .await?;
    Ok(())
}
