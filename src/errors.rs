//! Unified error type for `VendorMarket`.
//!
//! Engine errors raised by constraint checks are classified into the
//! relational violation kinds callers care about (foreign key, restricted
//! delete, duplicate key, enumeration) so they can be matched without
//! inspecting driver messages.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// All errors surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or seed data
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Any database error that is not a classified constraint violation
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Filesystem error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A row addressed by key does not exist
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Table-level name of the missing row
        entity: &'static str,
        /// Key that was looked up
        key: String,
    },

    /// Insert or update referenced a parent row that does not exist
    #[error("{entity} references a missing parent row: {detail}")]
    ForeignKeyViolation {
        /// Entity being written
        entity: &'static str,
        /// Engine message
        detail: String,
    },

    /// Delete rejected because restricted dependents still reference the row
    #[error("{entity} cannot be deleted while other rows reference it: {detail}")]
    RestrictedDelete {
        /// Entity being deleted
        entity: &'static str,
        /// Engine message
        detail: String,
    },

    /// Primary or composite key already present
    #[error("duplicate {entity} key: {detail}")]
    DuplicateKey {
        /// Entity being written
        entity: &'static str,
        /// Engine message
        detail: String,
    },

    /// Value outside the allowed set of a role, availability, status or change type column
    #[error("value outside the allowed set for {entity}: {detail}")]
    EnumViolation {
        /// Entity being written
        entity: &'static str,
        /// Engine message
        detail: String,
    },

    /// Quantity outside the accepted range for the row kind
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// Rejected quantity
        quantity: i32,
    },

    /// An order was placed without any line items
    #[error("Order must contain at least one line item")]
    EmptyOrder,
}

/// The statement kind an engine error came from.
///
/// `SQLite` reports a failed parent lookup and a restricted delete with the
/// same code, so the caller's intent decides which violation it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
}

impl Error {
    /// Classifies an error returned by a write against `entity`.
    #[must_use]
    pub fn from_write(err: DbErr, entity: &'static str, kind: WriteKind) -> Self {
        let detail = err.to_string();
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::DuplicateKey { entity, detail },
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => foreign_key(entity, kind, detail),
            _ if detail.contains("FOREIGN KEY constraint failed") => {
                foreign_key(entity, kind, detail)
            }
            _ if detail.contains("UNIQUE constraint failed") => {
                Self::DuplicateKey { entity, detail }
            }
            _ if detail.contains("CHECK constraint failed") => {
                Self::EnumViolation { entity, detail }
            }
            _ => Self::Database(err),
        }
    }
}

fn foreign_key(entity: &'static str, kind: WriteKind, detail: String) -> Error {
    match kind {
        WriteKind::Delete => Error::RestrictedDelete { entity, detail },
        WriteKind::Insert | WriteKind::Update => Error::ForeignKeyViolation { entity, detail },
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    fn exec_err(message: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(message.to_string()))
    }

    #[test]
    fn test_foreign_key_failure_depends_on_write_kind() {
        let err = Error::from_write(
            exec_err("FOREIGN KEY constraint failed"),
            "location",
            WriteKind::Delete,
        );
        assert!(matches!(err, Error::RestrictedDelete { entity: "location", .. }));

        let err = Error::from_write(
            exec_err("FOREIGN KEY constraint failed"),
            "location",
            WriteKind::Insert,
        );
        assert!(matches!(err, Error::ForeignKeyViolation { entity: "location", .. }));
    }

    #[test]
    fn test_unique_and_check_failures() {
        let err = Error::from_write(
            exec_err("UNIQUE constraint failed: location_items.location_id"),
            "location_item",
            WriteKind::Insert,
        );
        assert!(matches!(err, Error::DuplicateKey { .. }));

        let err = Error::from_write(
            exec_err("CHECK constraint failed: availability IN ('Y', 'N')"),
            "location",
            WriteKind::Update,
        );
        assert!(matches!(err, Error::EnumViolation { .. }));
    }

    #[test]
    fn test_unclassified_errors_pass_through() {
        let err = Error::from_write(exec_err("disk I/O error"), "item", WriteKind::Insert);
        assert!(matches!(err, Error::Database(_)));
    }
}
