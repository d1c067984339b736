//! Lootgen Sources - table providers
//!
//! This crate provides the table providers the importer reads from:
//! - local JSON exports (one file per table per patch)
//! - the same layout served over HTTP
//!
//! Providers return generic rows; [`load_tables`] decodes them into the typed
//! tables the joiner consumes.

pub mod error;
pub mod factory;
pub mod http;
pub mod json_dir;
pub mod loader;

pub use error::ProviderError;
pub use factory::provider_from_uri;
pub use http::HttpProvider;
pub use json_dir::JsonDirProvider;
pub use loader::{decode_rows, load_tables};

use async_trait::async_trait;
use lootgen_core::{GameVersion, TableName};
use serde_json::Value;

/// Source of decoded table rows.
#[async_trait]
pub trait TableProvider: Send + Sync {
    /// Fetch every row of `table` for the given game version, in table order.
    async fn fetch_table(
        &self,
        table: TableName,
        version: &GameVersion,
    ) -> Result<Vec<Value>, ProviderError>;
}
