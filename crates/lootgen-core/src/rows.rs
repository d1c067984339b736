//! Typed row schema for the item tables.
//!
//! Rows arrive from the table provider as generic records. Each table is
//! decoded once into one of these structs. Field names follow the source
//! tables (PascalCase).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A foreign-key value: either a row position or an identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinKey {
    Index(usize),
    Id(String),
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKey::Index(index) => write!(f, "#{}", index),
            JoinKey::Id(id) => write!(f, "'{}'", id),
        }
    }
}

/// Primary table row: one base item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseItemRow {
    #[serde(rename = "_index")]
    pub index: usize,
    pub id: String,
    pub name: String,
    pub drop_level: u32,
    /// Class reference used by older table revisions.
    #[serde(default)]
    pub item_class: Option<usize>,
    /// Class reference used by newer table revisions.
    #[serde(default)]
    pub item_classes_key: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemClassRow {
    #[serde(rename = "_index")]
    pub index: usize,
    pub id: String,
    pub name: String,
}

/// An inclusive `{min, max}` stat pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: i32,
    pub max: i32,
}

impl StatRange {
    /// Older revisions record a single flat value; newer ones an explicit
    /// min/max pair. A missing side takes the other side of the pair, then
    /// the flat value, then 0.
    pub fn from_source(flat: Option<i32>, min: Option<i32>, max: Option<i32>) -> Self {
        let flat = flat.unwrap_or_default();
        Self {
            min: min.or(max).unwrap_or(flat),
            max: max.or(min).unwrap_or(flat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawArmourTypeRow")]
pub struct ArmourTypeRow {
    pub base_item_types_key: JoinKey,
    pub armour: StatRange,
    pub evasion: StatRange,
    pub energy_shield: StatRange,
    pub ward: StatRange,
    pub movement_speed: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawArmourTypeRow {
    base_item_types_key: JoinKey,
    #[serde(default)]
    armour: Option<i32>,
    #[serde(default)]
    armour_min: Option<i32>,
    #[serde(default)]
    armour_max: Option<i32>,
    #[serde(default)]
    evasion: Option<i32>,
    #[serde(default)]
    evasion_min: Option<i32>,
    #[serde(default)]
    evasion_max: Option<i32>,
    #[serde(default)]
    energy_shield: Option<i32>,
    #[serde(default)]
    energy_shield_min: Option<i32>,
    #[serde(default)]
    energy_shield_max: Option<i32>,
    #[serde(default)]
    ward: Option<i32>,
    #[serde(default)]
    ward_min: Option<i32>,
    #[serde(default)]
    ward_max: Option<i32>,
    #[serde(default)]
    increased_movement_speed: i32,
}

impl From<RawArmourTypeRow> for ArmourTypeRow {
    fn from(raw: RawArmourTypeRow) -> Self {
        Self {
            base_item_types_key: raw.base_item_types_key,
            armour: StatRange::from_source(raw.armour, raw.armour_min, raw.armour_max),
            evasion: StatRange::from_source(raw.evasion, raw.evasion_min, raw.evasion_max),
            energy_shield: StatRange::from_source(
                raw.energy_shield,
                raw.energy_shield_min,
                raw.energy_shield_max,
            ),
            ward: StatRange::from_source(raw.ward, raw.ward_min, raw.ward_max),
            movement_speed: raw.increased_movement_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeaponTypeRow {
    pub base_item_types_key: JoinKey,
    pub critical: i32,
    /// Milliseconds between attacks.
    pub speed: f64,
    pub damage_min: i32,
    pub damage_max: i32,
    pub range_max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShieldTypeRow {
    pub base_item_types_key: JoinKey,
    pub block: i32,
}

/// Row of either attribute requirement table; both generations share the
/// same columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeRequirementRow {
    pub base_item_types_key: JoinKey,
    #[serde(default)]
    pub req_str: i32,
    #[serde(default)]
    pub req_dex: i32,
    #[serde(default)]
    pub req_int: i32,
}
