//! Lootgen Core - typed item tables and the join engine
//!
//! This crate decodes the base item tables into typed rows and joins them
//! into one denormalized [`UnifiedItem`] per base item.

pub mod item;
pub mod join;
pub mod rows;
pub mod tables;
pub mod version;

pub use item::UnifiedItem;
pub use join::{attacks_per_second, ItemJoiner, JoinConfig, JoinError, KeySource, Satellite};
pub use rows::{JoinKey, StatRange};
pub use tables::ItemTables;
pub use version::{GameVersion, TableName};
