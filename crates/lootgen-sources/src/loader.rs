//! Concurrent table loading and typed decoding.

use std::collections::HashMap;

use futures::future::try_join_all;
use lootgen_core::{GameVersion, ItemTables, TableName};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::TableProvider;

/// Parse a table body into its generic rows. The body must be a JSON array.
pub(crate) fn parse_rows(table: TableName, body: &str) -> Result<Vec<Value>, ProviderError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(other) => Err(ProviderError::MalformedRows {
            table: table.to_string(),
            row: None,
            reason: format!("expected an array of rows, got {}", json_kind(&other)),
        }),
        Err(e) => Err(ProviderError::MalformedRows {
            table: table.to_string(),
            row: None,
            reason: e.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode generic rows into typed rows, failing on the first row that does
/// not fit.
pub fn decode_rows<T: DeserializeOwned>(
    table: TableName,
    rows: Vec<Value>,
) -> Result<Vec<T>, ProviderError> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row).map_err(|e| ProviderError::MalformedRows {
                table: table.to_string(),
                row: Some(i),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Fetch every table `version` needs concurrently and decode them.
///
/// The first failed fetch aborts the load; no partial table set is returned.
pub async fn load_tables(
    provider: &dyn TableProvider,
    version: &GameVersion,
) -> Result<ItemTables, ProviderError> {
    let required = version.required_tables();
    info!("Fetching {} tables for {}", required.len(), version);

    let fetched = try_join_all(required.iter().map(|&table| async move {
        let rows = provider.fetch_table(table, version).await?;
        debug!("Fetched {} rows from {}", rows.len(), table);
        Ok::<_, ProviderError>((table, rows))
    }))
    .await?;
    let mut raw: HashMap<TableName, Vec<Value>> = fetched.into_iter().collect();

    let attribute_table = version.attribute_table();
    let tables = ItemTables {
        base_items: decode_rows(
            TableName::BaseItemTypes,
            take(&mut raw, TableName::BaseItemTypes),
        )?,
        item_classes: decode_rows(
            TableName::ItemClasses,
            take(&mut raw, TableName::ItemClasses),
        )?,
        armour_types: decode_rows(
            TableName::ArmourTypes,
            take(&mut raw, TableName::ArmourTypes),
        )?,
        weapon_types: decode_rows(
            TableName::WeaponTypes,
            take(&mut raw, TableName::WeaponTypes),
        )?,
        shield_types: decode_rows(
            TableName::ShieldTypes,
            take(&mut raw, TableName::ShieldTypes),
        )?,
        attribute_requirements: decode_rows(attribute_table, take(&mut raw, attribute_table))?,
    };

    info!("Loaded {} rows for {}", tables.row_count(), version);
    Ok(tables)
}

fn take(raw: &mut HashMap<TableName, Vec<Value>>, table: TableName) -> Vec<Value> {
    raw.remove(&table).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootgen_core::rows::{ItemClassRow, ShieldTypeRow};
    use serde_json::json;

    #[test]
    fn test_parse_rows_rejects_object() {
        let err = parse_rows(TableName::ItemClasses, r#"{"a": 1}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_parse_rows_rejects_invalid_json() {
        let err = parse_rows(TableName::ItemClasses, "[{").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedRows { row: None, .. }));
    }

    #[test]
    fn test_decode_rows_typed() {
        let rows = vec![json!({"_index": 0, "Id": "Bow", "Name": "Bows"})];
        let decoded: Vec<ItemClassRow> = decode_rows(TableName::ItemClasses, rows).unwrap();
        assert_eq!(decoded[0].name, "Bows");
    }

    #[test]
    fn test_decode_rows_names_offending_row() {
        let rows = vec![
            json!({"BaseItemTypesKey": 1, "Block": 20}),
            json!({"BaseItemTypesKey": 2}),
        ];
        let err = decode_rows::<ShieldTypeRow>(TableName::ShieldTypes, rows).unwrap_err();
        match err {
            ProviderError::MalformedRows { table, row, reason } => {
                assert_eq!(table, "ShieldTypes");
                assert_eq!(row, Some(1));
                assert!(reason.contains("Block"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
