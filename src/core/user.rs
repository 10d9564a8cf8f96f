//! User store operations.
//!
//! Roles are fixed at creation and there is no role update;
//! deleting a user is rejected while any location still names them as owner.

use crate::{
    entities::{Role, User, user},
    errors::{Error, Result, WriteKind},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields of a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Opaque credential string
    pub password: String,
    /// Account role
    pub role: Role,
}

/// Creates a user, validating that the email is not blank.
pub async fn create_user<C>(db: &C, new_user: NewUser) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    if new_user.email.trim().is_empty() {
        return Err(Error::Config {
            message: "User email cannot be empty".to_string(),
        });
    }

    let user = user::ActiveModel {
        first_name: Set(new_user.first_name),
        last_name: Set(new_user.last_name),
        email: Set(new_user.email.trim().to_string()),
        password: Set(new_user.password),
        role: Set(new_user.role),
        ..Default::default()
    };

    let user = user
        .insert(db)
        .await
        .map_err(|e| Error::from_write(e, "user", WriteKind::Insert))?;
    info!(user_id = user.id, role = ?user.role, "Created user");
    Ok(user)
}

/// Finds a user by primary key.
pub async fn get_user_by_id<C>(db: &C, user_id: i64) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds the first user registered with `email`.
pub async fn get_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email))
        .order_by_asc(user::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All users ordered by id.
pub async fn list_users<C>(db: &C) -> Result<Vec<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a user that owns no locations.
pub async fn delete_user<C>(db: &C, user_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = User::delete_by_id(user_id)
        .exec(db)
        .await
        .map_err(|e| Error::from_write(e, "user", WriteKind::Delete))?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "user",
            key: user_id.to_string(),
        });
    }
    info!(user_id, "Deleted user");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut new_user = test_new_user("x@example.com", Role::Customer);
        new_user.email = "  ".to_string();
        let result = create_user(&db, new_user).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_find_user() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_user(&db, "vendor@example.com", Role::Vendor).await?;
        assert_eq!(created.role, Role::Vendor);

        let by_id = get_user_by_id(&db, created.id).await?.unwrap();
        assert_eq!(by_id, created);

        let by_email = get_user_by_email(&db, "vendor@example.com").await?.unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(get_user_by_email(&db, "nobody@example.com").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_ordered_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_user(&db, "b@example.com", Role::Customer).await?;
        let second = create_test_user(&db, "a@example.com", Role::Admin).await?;

        let users = list_users(&db).await?;
        assert_eq!(users, vec![first, second]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_restricted_by_location() -> Result<()> {
        let (db, location) = setup_with_location().await?;

        let result = delete_user(&db, location.user_id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::RestrictedDelete { entity: "user", .. }
        ));
        assert!(get_user_by_id(&db, location.user_id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_without_locations() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "c@example.com", Role::Customer).await?;

        delete_user(&db, user.id).await?;
        assert!(get_user_by_id(&db, user.id).await?.is_none());

        let missing = delete_user(&db, user.id).await;
        assert!(matches!(missing.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }
}
