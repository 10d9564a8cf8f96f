//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod change_log;
pub mod customer_order;
pub mod item;
pub mod location;
pub mod location_item;
pub mod order_item;
pub mod sea_orm_active_enums;
pub mod user;

// Re-export specific types to avoid conflicts
pub use change_log::{Column as ChangeLogColumn, Entity as ChangeLog, Model as ChangeLogModel};
pub use customer_order::{
    Column as CustomerOrderColumn, Entity as CustomerOrder, Model as CustomerOrderModel,
};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use location::{Column as LocationColumn, Entity as Location, Model as LocationModel};
pub use location_item::{
    Column as LocationItemColumn, Entity as LocationItem, Model as LocationItemModel,
};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use sea_orm_active_enums::{Availability, ChangeType, OrderStatus, Role};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
