//! Menu operations on the Location-Item association.
//!
//! A menu row carries a location's availability and stock for one catalog
//! item. Availability updates are recorded in the change log inside the same
//! transaction as the update.

use crate::{
    core::audit::{self, AuditPolicy},
    entities::{Availability, LocationItem, location_item},
    errors::{Error, Result, WriteKind},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Columns to change on a menu row; `None` leaves a column as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuItemChanges {
    /// New availability
    pub availability: Option<Availability>,
    /// New stock level
    pub quantity: Option<i32>,
}

fn validate_stock(quantity: i32) -> Result<i32> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(quantity)
}

fn not_found(location_id: i64, item_id: i64) -> Error {
    Error::NotFound {
        entity: "location_item",
        key: format!("({location_id}, {item_id})"),
    }
}

/// Publishes `item_id` on the menu of `location_id`.
///
/// Stock must be zero or more. Adding the same pair twice fails with
/// [`Error::DuplicateKey`]; unknown locations or items with
/// [`Error::ForeignKeyViolation`].
pub async fn add_menu_item<C>(
    db: &C,
    location_id: i64,
    item_id: i64,
    availability: Availability,
    quantity: i32,
) -> Result<location_item::Model>
where
    C: ConnectionTrait,
{
    let quantity = validate_stock(quantity)?;

    let row = location_item::ActiveModel {
        location_id: Set(location_id),
        item_id: Set(item_id),
        availability: Set(availability),
        quantity: Set(quantity),
    };
    let row = row
        .insert(db)
        .await
        .map_err(|e| Error::from_write(e, "location_item", WriteKind::Insert))?;
    info!(location_id, item_id, quantity, "Added menu item");
    Ok(row)
}

/// Finds a menu row by its composite key.
pub async fn get_menu_item<C>(
    db: &C,
    location_id: i64,
    item_id: i64,
) -> Result<Option<location_item::Model>>
where
    C: ConnectionTrait,
{
    LocationItem::find_by_id((location_id, item_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// The menu of one location ordered by item id.
pub async fn menu_for_location<C>(db: &C, location_id: i64) -> Result<Vec<location_item::Model>>
where
    C: ConnectionTrait,
{
    LocationItem::find()
        .filter(location_item::Column::LocationId.eq(location_id))
        .order_by_asc(location_item::Column::ItemId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to a menu row and records availability per `policy`.
///
/// An empty change set touches nothing and logs nothing.
pub async fn update_menu_item<C>(
    db: &C,
    location_id: i64,
    item_id: i64,
    changes: MenuItemChanges,
    policy: AuditPolicy,
) -> Result<location_item::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    if let Some(quantity) = changes.quantity {
        validate_stock(quantity)?;
    }

    let txn = db.begin().await?;

    let before = LocationItem::find_by_id((location_id, item_id))
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(location_id, item_id))?;

    if changes.availability.is_none() && changes.quantity.is_none() {
        return Ok(before);
    }

    let mut row: location_item::ActiveModel = before.clone().into();
    if let Some(availability) = changes.availability {
        row.availability = Set(availability);
    }
    if let Some(quantity) = changes.quantity {
        row.quantity = Set(quantity);
    }

    let after = row
        .update(&txn)
        .await
        .map_err(|e| Error::from_write(e, "location_item", WriteKind::Update))?;

    audit::record_menu_update(&txn, &before, &after, policy).await?;

    txn.commit().await?;
    info!(location_id, item_id, "Updated menu item");
    Ok(after)
}

/// Puts an item on or takes it off a location's menu.
pub async fn set_menu_availability<C>(
    db: &C,
    location_id: i64,
    item_id: i64,
    availability: Availability,
    policy: AuditPolicy,
) -> Result<location_item::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let changes = MenuItemChanges {
        availability: Some(availability),
        quantity: None,
    };
    update_menu_item(db, location_id, item_id, changes, policy).await
}

/// Sets the stock level of a menu row.
pub async fn set_menu_quantity<C>(
    db: &C,
    location_id: i64,
    item_id: i64,
    quantity: i32,
    policy: AuditPolicy,
) -> Result<location_item::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let changes = MenuItemChanges {
        availability: None,
        quantity: Some(quantity),
    };
    update_menu_item(db, location_id, item_id, changes, policy).await
}

/// Removes a menu row. Change log rows about the item are kept.
pub async fn remove_menu_item<C>(db: &C, location_id: i64, item_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = LocationItem::delete_by_id((location_id, item_id))
        .exec(db)
        .await
        .map_err(|e| Error::from_write(e, "location_item", WriteKind::Delete))?;

    if result.rows_affected == 0 {
        return Err(not_found(location_id, item_id));
    }
    info!(location_id, item_id, "Removed menu item");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::item;
    use crate::entities::ChangeType;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_quantity_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_menu_item(&db, 1, 1, Availability::Available, -1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -1 }
        ));

        let result = set_menu_quantity(&db, 1, 1, -5, AuditPolicy::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -5 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_and_list_menu() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let burger = item::create_item(&db, "Vegan Burger").await?;
        let tea = item::create_item(&db, "Iced Tea").await?;

        let row = add_menu_item(&db, location.id, burger.id, Availability::Available, 10).await?;
        assert_eq!(row.quantity, 10);
        add_menu_item(&db, location.id, tea.id, Availability::Unavailable, 0).await?;

        let menu = menu_for_location(&db, location.id).await?;
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0], row);
        assert_eq!(
            get_menu_item(&db, location.id, tea.id).await?.unwrap().availability,
            Availability::Unavailable
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_menu_row_rejected() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let burger = item::create_item(&db, "Vegan Burger").await?;
        add_menu_item(&db, location.id, burger.id, Availability::Available, 1).await?;

        let result = add_menu_item(&db, location.id, burger.id, Availability::Available, 2).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateKey { entity: "location_item", .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_parent_rejected() -> Result<()> {
        let (db, location) = setup_with_location().await?;

        let result = add_menu_item(&db, location.id, 404, Availability::Available, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ForeignKeyViolation { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_availability_change_logs_menu_availability() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let burger = item::create_item(&db, "Vegan Burger").await?;
        add_menu_item(&db, location.id, burger.id, Availability::Available, 3).await?;

        let updated = set_menu_availability(
            &db,
            location.id,
            burger.id,
            Availability::Unavailable,
            AuditPolicy::ChangedColumns,
        )
        .await?;
        assert_eq!(updated.availability, Availability::Unavailable);

        let changes = audit::changes_for_location(&db, location.id).await?;
        let change = changes.last().unwrap();
        assert_eq!(change.change_type, ChangeType::MenuAvailability);
        assert_eq!(change.original_availability, Some(Availability::Available));
        assert_eq!(change.new_availability, Some(Availability::Unavailable));
        assert_eq!(change.location_id, location.id);
        assert_eq!(change.item_id, Some(burger.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_quantity_change_logging_follows_policy() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let burger = item::create_item(&db, "Vegan Burger").await?;
        add_menu_item(&db, location.id, burger.id, Availability::Available, 3).await?;

        set_menu_quantity(&db, location.id, burger.id, 8, AuditPolicy::ChangedColumns).await?;
        assert_eq!(audit::changes_for_location(&db, location.id).await?.len(), 1);

        let updated =
            set_menu_quantity(&db, location.id, burger.id, 9, AuditPolicy::EveryUpdate).await?;
        assert_eq!(updated.quantity, 9);
        let changes = audit::changes_for_location(&db, location.id).await?;
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].original_availability, changes[1].new_availability);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_log_write_rolls_back_menu_update() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let burger = item::create_item(&db, "Vegan Burger").await?;
        add_menu_item(&db, location.id, burger.id, Availability::Available, 3).await?;
        reject_change_log_writes(&db).await?;

        let result = set_menu_availability(
            &db,
            location.id,
            burger.id,
            Availability::Unavailable,
            AuditPolicy::ChangedColumns,
        )
        .await;
        assert!(result.is_err());

        let stored = get_menu_item(&db, location.id, burger.id).await?.unwrap();
        assert_eq!(stored.availability, Availability::Available);
        assert_eq!(audit::changes_for_location(&db, location.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_menu_item() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let burger = item::create_item(&db, "Vegan Burger").await?;
        add_menu_item(&db, location.id, burger.id, Availability::Available, 3).await?;
        set_menu_availability(
            &db,
            location.id,
            burger.id,
            Availability::Unavailable,
            AuditPolicy::ChangedColumns,
        )
        .await?;

        remove_menu_item(&db, location.id, burger.id).await?;
        assert!(get_menu_item(&db, location.id, burger.id).await?.is_none());
        assert_eq!(audit::changes_for_location(&db, location.id).await?.len(), 2);

        let missing = remove_menu_item(&db, location.id, burger.id).await;
        assert!(matches!(missing.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }
}
