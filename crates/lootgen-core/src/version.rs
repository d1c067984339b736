//! Game versions and the tables each game generation ships.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A game patch tag such as `3.25.3.4` or `4.1.0.11`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameVersion(String);

impl GameVersion {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Patches from the `4.x` line belong to the second game, which renamed
    /// the attribute requirement table.
    pub fn is_second_generation(&self) -> bool {
        self.0.starts_with("4.")
    }

    /// Name of the table holding per-item attribute requirements.
    pub fn attribute_table(&self) -> TableName {
        if self.is_second_generation() {
            TableName::AttributeRequirements
        } else {
            TableName::ComponentAttributeRequirements
        }
    }

    /// Every table the join needs for this version, primary table first.
    pub fn required_tables(&self) -> [TableName; 6] {
        [
            TableName::BaseItemTypes,
            TableName::ItemClasses,
            TableName::ArmourTypes,
            TableName::WeaponTypes,
            TableName::ShieldTypes,
            self.attribute_table(),
        ]
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source tables known to the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableName {
    BaseItemTypes,
    ItemClasses,
    ArmourTypes,
    WeaponTypes,
    ShieldTypes,
    ComponentAttributeRequirements,
    AttributeRequirements,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::BaseItemTypes => "BaseItemTypes",
            TableName::ItemClasses => "ItemClasses",
            TableName::ArmourTypes => "ArmourTypes",
            TableName::WeaponTypes => "WeaponTypes",
            TableName::ShieldTypes => "ShieldTypes",
            TableName::ComponentAttributeRequirements => "ComponentAttributeRequirements",
            TableName::AttributeRequirements => "AttributeRequirements",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
