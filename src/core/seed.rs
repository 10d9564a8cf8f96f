//! Seeding an empty database from the `[seed]` tables of config.toml.

use crate::{
    config::seed::SeedData,
    core::{
        item,
        location::{self, NewLocation},
        menu,
        order::{self, OrderLine},
        user::{self, NewUser},
    },
    entities::User,
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, PaginatorTrait, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// What [`apply_seed`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The database already had users; nothing was written
    Skipped,
    /// Rows written per table
    Seeded {
        /// Users created
        users: usize,
        /// Items created
        items: usize,
        /// Locations registered
        locations: usize,
        /// Menu rows published
        menu_rows: usize,
        /// Orders placed
        orders: usize,
    },
}

fn lookup(ids: &HashMap<String, i64>, kind: &str, key: &str) -> Result<i64> {
    ids.get(key).copied().ok_or_else(|| Error::Config {
        message: format!("Seed data references unknown {kind} '{key}'"),
    })
}

/// Inserts `seed` into a database without users.
///
/// Everything is written in one transaction, so a bad reference leaves the
/// database untouched. Locations go through the audited path and get their
/// `LOCATION_ADD` rows.
pub async fn apply_seed<C>(db: &C, seed: &SeedData) -> Result<SeedOutcome>
where
    C: ConnectionTrait + TransactionTrait,
{
    if seed.is_empty() || User::find().count(db).await? > 0 {
        info!("Skipping seed data");
        return Ok(SeedOutcome::Skipped);
    }

    let txn = db.begin().await?;

    let mut users = HashMap::new();
    for row in &seed.users {
        let created = user::create_user(
            &txn,
            NewUser {
                first_name: row.first_name.clone(),
                last_name: row.last_name.clone(),
                email: row.email.clone(),
                password: row.password.clone(),
                role: row.role,
            },
        )
        .await?;
        users.entry(created.email).or_insert(created.id);
    }

    let mut items = HashMap::new();
    for row in &seed.items {
        let created = item::create_item(&txn, &row.name).await?;
        items.entry(created.name).or_insert(created.id);
    }

    let mut locations = HashMap::new();
    for row in &seed.locations {
        let created = location::create_location(
            &txn,
            NewLocation {
                vendor_name: row.vendor_name.clone(),
                availability: row.availability,
                address: row.address.clone(),
                user_id: lookup(&users, "user", &row.owner_email)?,
                latitude: row.latitude,
                longitude: row.longitude,
                hours: row.hours.clone(),
                phone: row.phone.clone(),
            },
        )
        .await?;
        locations.entry(created.vendor_name).or_insert(created.id);
    }

    for row in &seed.menu {
        menu::add_menu_item(
            &txn,
            lookup(&locations, "location", &row.vendor_name)?,
            lookup(&items, "item", &row.item)?,
            row.availability,
            row.quantity,
        )
        .await?;
    }

    for row in &seed.orders {
        let lines = row
            .lines
            .iter()
            .map(|line| {
                Ok(OrderLine {
                    item_id: lookup(&items, "item", &line.item)?,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        order::place_order(
            &txn,
            lookup(&locations, "location", &row.vendor_name)?,
            &lines,
        )
        .await?;
    }

    txn.commit().await?;

    let outcome = SeedOutcome::Seeded {
        users: seed.users.len(),
        items: seed.items.len(),
        locations: seed.locations.len(),
        menu_rows: seed.menu.len(),
        orders: seed.orders.len(),
    };
    info!(?outcome, "Seeded database");
    Ok(outcome)
}
