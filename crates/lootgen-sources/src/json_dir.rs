//! Provider over a local directory of exported JSON tables.

use async_trait::async_trait;
use lootgen_core::{GameVersion, TableName};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ProviderError;
use crate::loader::parse_rows;
use crate::TableProvider;

/// Reads `<root>/<version>/tables/<Table>.json`, the layout written by the
/// table exporter.
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of a table file for a given version.
    pub fn table_path(&self, table: TableName, version: &GameVersion) -> PathBuf {
        self.root
            .join(version.as_str())
            .join("tables")
            .join(format!("{}.json", table))
    }
}

#[async_trait]
impl TableProvider for JsonDirProvider {
    async fn fetch_table(
        &self,
        table: TableName,
        version: &GameVersion,
    ) -> Result<Vec<Value>, ProviderError> {
        let path = self.table_path(table, version);
        debug!("Reading table {} from {:?}", table, path);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProviderError::NotFound(format!(
                    "{} for {} ({})",
                    table,
                    version,
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        parse_rows(table, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_table(root: &Path, version: &str, table: &str, body: &str) {
        let dir = root.join(version).join("tables");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.json", table)), body).unwrap();
    }

    #[test]
    fn test_table_path_layout() {
        let provider = JsonDirProvider::new("/cache");
        let path = provider.table_path(TableName::WeaponTypes, &GameVersion::new("3.25.3.4"));
        assert_eq!(path, PathBuf::from("/cache/3.25.3.4/tables/WeaponTypes.json"));
    }

    #[tokio::test]
    async fn test_fetch_table_reads_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            "3.25.3.4",
            "ItemClasses",
            r#"[{"_index":0,"Id":"Bow","Name":"Bows"},{"_index":1,"Id":"Wand","Name":"Wands"}]"#,
        );

        let provider = JsonDirProvider::new(dir.path());
        let rows = provider
            .fetch_table(TableName::ItemClasses, &GameVersion::new("3.25.3.4"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Id"], "Wand");
    }

    #[tokio::test]
    async fn test_fetch_missing_table_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonDirProvider::new(dir.path());
        let err = provider
            .fetch_table(TableName::ShieldTypes, &GameVersion::new("3.25.3.4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
        assert!(err.to_string().contains("ShieldTypes"));
    }

    #[tokio::test]
    async fn test_fetch_non_array_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "4.1.0.11", "ShieldTypes", r#"{"rows": []}"#);

        let provider = JsonDirProvider::new(dir.path());
        let err = provider
            .fetch_table(TableName::ShieldTypes, &GameVersion::new("4.1.0.11"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedRows { row: None, .. }));
    }
}
