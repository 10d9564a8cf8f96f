//! Item catalog operations.

use crate::{
    entities::{Item, item},
    errors::{Error, Result, WriteKind},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Adds an item to the catalog. Names need not be unique.
pub async fn create_item<C>(db: &C, name: &str) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    let item = item::ActiveModel {
        name: Set(validate_name(name)?),
        ..Default::default()
    };

    let item = item
        .insert(db)
        .await
        .map_err(|e| Error::from_write(e, "item", WriteKind::Insert))?;
    info!(item_id = item.id, name = %item.name, "Created item");
    Ok(item)
}

/// Finds an item by primary key.
pub async fn get_item_by_id<C>(db: &C, item_id: i64) -> Result<Option<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find_by_id(item_id).one(db).await.map_err(Into::into)
}

/// All items called `name`, oldest first.
pub async fn get_items_by_name<C>(db: &C, name: &str) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .filter(item::Column::Name.eq(name))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The whole catalog ordered by name, then id.
pub async fn list_items<C>(db: &C) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .order_by_asc(item::Column::Name)
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renames a catalog item.
pub async fn rename_item<C>(db: &C, item_id: i64, name: &str) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    let name = validate_name(name)?;
    let item = Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "item",
            key: item_id.to_string(),
        })?;

    let mut item: item::ActiveModel = item.into();
    item.name = Set(name);
    item.update(db)
        .await
        .map_err(|e| Error::from_write(e, "item", WriteKind::Update))
}

/// Deletes an item no menu row, order line or log row refers to.
pub async fn delete_item<C>(db: &C, item_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Item::delete_by_id(item_id)
        .exec(db)
        .await
        .map_err(|e| Error::from_write(e, "item", WriteKind::Delete))?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "item",
            key: item_id.to_string(),
        });
    }
    info!(item_id, "Deleted item");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{menu, order};
    use crate::entities::Availability;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_item(&db, "   ").await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_item(&db, "Fries").await?;
        let second = create_item(&db, " Fries ").await?;

        assert_ne!(first.id, second.id);
        assert_eq!(second.name, "Fries");
        let found = get_items_by_name(&db, "Fries").await?;
        assert_eq!(found, vec![first, second]);
        Ok(())
    }

    #[tokio::test]
    async fn test_rename_item() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_item(&db, "Burger").await?;

        let renamed = rename_item(&db, item.id, "Vegan Burger").await?;
        assert_eq!(renamed.name, "Vegan Burger");
        assert_eq!(get_item_by_id(&db, item.id).await?.unwrap().name, "Vegan Burger");

        let missing = rename_item(&db, 999, "Ghost").await;
        assert!(matches!(missing.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unreferenced_item() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_item(&db, "Lemonade").await?;

        delete_item(&db, item.id).await?;
        assert!(get_item_by_id(&db, item.id).await?.is_none());
        assert!(list_items(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_restricted_by_menu_row() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let item = create_item(&db, "Vegan Burger").await?;
        menu::add_menu_item(&db, location.id, item.id, Availability::Available, 5).await?;

        let result = delete_item(&db, item.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::RestrictedDelete { entity: "item", .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_restricted_by_order_line() -> Result<()> {
        let (db, location) = setup_with_location().await?;
        let item = create_item(&db, "Vegan Burger").await?;
        order::place_order(
            &db,
            location.id,
            &[order::OrderLine {
                item_id: item.id,
                quantity: 1,
            }],
        )
        .await?;

        let result = delete_item(&db, item.id).await;
        assert!(matches!(result.unwrap_err(), Error::RestrictedDelete { .. }));
        assert!(get_item_by_id(&db, item.id).await?.is_some());
        Ok(())
    }
}
