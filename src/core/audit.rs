//! Change log interceptors and reads.
//!
//! Location and menu writes call into this module with the row before and
//! after the write, on the same connection or transaction, so a committed
//! change never exists without its log row. These are the only writers of
//! `change_log`.

use crate::{
    entities::{
        Availability, ChangeLog, ChangeType, change_log, location, location_item,
    },
    errors::{Error, Result, WriteKind},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::debug;

/// Decides when an update writes a log row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditPolicy {
    /// Log a column only when its value actually changed
    #[default]
    ChangedColumns,
    /// Log availability and address on every executed update, changed or not
    EveryUpdate,
}

impl AuditPolicy {
    fn should_log<T: PartialEq>(self, before: &T, after: &T) -> bool {
        match self {
            Self::ChangedColumns => before != after,
            Self::EveryUpdate => true,
        }
    }
}

struct Entry {
    change_type: ChangeType,
    availability: (Option<Availability>, Option<Availability>),
    address: (Option<String>, Option<String>),
    location_id: i64,
    item_id: Option<i64>,
}

async fn append<C>(db: &C, entry: Entry) -> Result<change_log::Model>
where
    C: ConnectionTrait,
{
    let row = change_log::ActiveModel {
        change_type: Set(entry.change_type),
        original_availability: Set(entry.availability.0),
        new_availability: Set(entry.availability.1),
        original_address: Set(entry.address.0),
        new_address: Set(entry.address.1),
        changed_at: Set(chrono::Utc::now()),
        location_id: Set(entry.location_id),
        item_id: Set(entry.item_id),
        ..Default::default()
    };

    let row = row
        .insert(db)
        .await
        .map_err(|e| Error::from_write(e, "change_log", WriteKind::Insert))?;
    debug!(
        change_id = row.change_id,
        change_type = ?row.change_type,
        location_id = row.location_id,
        "Recorded change"
    );
    Ok(row)
}

/// Records a `LOCATION_ADD` row for a freshly inserted location.
pub(crate) async fn record_location_added<C>(
    db: &C,
    location: &location::Model,
) -> Result<change_log::Model>
where
    C: ConnectionTrait,
{
    append(
        db,
        Entry {
            change_type: ChangeType::LocationAdd,
            availability: (None, Some(location.availability)),
            address: (None, Some(location.address.clone())),
            location_id: location.id,
            item_id: None,
        },
    )
    .await
}

/// Records availability and address rows for an executed location update.
///
/// The availability row is written before the address row.
pub(crate) async fn record_location_update<C>(
    db: &C,
    before: &location::Model,
    after: &location::Model,
    policy: AuditPolicy,
) -> Result<Vec<change_log::Model>>
where
    C: ConnectionTrait,
{
    let mut rows = Vec::with_capacity(2);

    if policy.should_log(&before.availability, &after.availability) {
        let entry = Entry {
            change_type: ChangeType::LocationAvailability,
            availability: (Some(before.availability), Some(after.availability)),
            address: (None, None),
            location_id: after.id,
            item_id: None,
        };
        rows.push(append(db, entry).await?);
    }

    if policy.should_log(&before.address, &after.address) {
        let entry = Entry {
            change_type: ChangeType::LocationAddress,
            availability: (None, None),
            address: (Some(before.address.clone()), Some(after.address.clone())),
            location_id: after.id,
            item_id: None,
        };
        rows.push(append(db, entry).await?);
    }

    Ok(rows)
}

/// Records a `MENU_AVAILABILITY` row for an executed menu update.
pub(crate) async fn record_menu_update<C>(
    db: &C,
    before: &location_item::Model,
    after: &location_item::Model,
    policy: AuditPolicy,
) -> Result<Option<change_log::Model>>
where
    C: ConnectionTrait,
{
    if !policy.should_log(&before.availability, &after.availability) {
        return Ok(None);
    }

    let entry = Entry {
        change_type: ChangeType::MenuAvailability,
        availability: (Some(before.availability), Some(after.availability)),
        address: (None, None),
        location_id: after.location_id,
        item_id: Some(after.item_id),
    };
    append(db, entry).await.map(Some)
}

/// Every change log row, newest first.
pub async fn list_changes<C>(db: &C) -> Result<Vec<change_log::Model>>
where
    C: ConnectionTrait,
{
    ChangeLog::find()
        .order_by_desc(change_log::Column::ChangedAt)
        .order_by_desc(change_log::Column::ChangeId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Change log rows of one location in the order they were written.
pub async fn changes_for_location<C>(db: &C, location_id: i64) -> Result<Vec<change_log::Model>>
where
    C: ConnectionTrait,
{
    ChangeLog::find()
        .filter(change_log::Column::LocationId.eq(location_id))
        .order_by_asc(change_log::Column::ChangeId)
        .all(db)
        .await
        .map_err(Into::into)
}
