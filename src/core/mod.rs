//! Core operations - framework-agnostic store, audit and reporting logic.
//!
//! Every function takes a `SeaORM` connection or transaction. Functions that
//! write more than one row open their own transaction, which nests as a
//! savepoint when the caller already holds one.

/// Change log interceptors and reads
pub mod audit;
/// Item catalog
pub mod item;
/// Location registry
pub mod location;
/// Location-Item menu rows
pub mod menu;
/// Order ledger
pub mod order;
/// The four reporting listings
pub mod report;
/// Seeding from configuration
pub mod seed;
/// User store
pub mod user;
