//! Provider over an HTTP server exposing the exported JSON tables.

use async_trait::async_trait;
use lootgen_core::{GameVersion, TableName};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ProviderError;
use crate::loader::parse_rows;
use crate::TableProvider;

/// Fetches `<base_url>/<version>/tables/<Table>.json`.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::ConfigError(format!(
                "'{}' cannot be used as a base URL",
                base_url
            )));
        }
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn table_url(&self, table: TableName, version: &GameVersion) -> Result<Url, ProviderError> {
        Ok(self
            .base_url
            .join(&format!("{}/tables/{}.json", version, table))?)
    }
}

#[async_trait]
impl TableProvider for HttpProvider {
    async fn fetch_table(
        &self,
        table: TableName,
        version: &GameVersion,
    ) -> Result<Vec<Value>, ProviderError> {
        let url = self.table_url(table, version)?;
        debug!("Fetching table {} from {}", table, url);

        let response = self.client.get(url.clone()).send().await?;
        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                parse_rows(table, &body)
            }
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(format!(
                "{} for {} ({})",
                table, version, url
            ))),
            status => Err(ProviderError::FetchFailed(format!(
                "GET {} returned {}",
                url, status
            ))),
        }
    }
}
