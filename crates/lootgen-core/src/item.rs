//! The denormalized per-item view produced by the join.

use serde::{Deserialize, Serialize};

/// One base item with every satellite fact that matched it.
///
/// Optional sub-records are `None` when no satellite row matched and are
/// left out of the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedItem {
    pub base_item: BaseItemInfo,
    pub item_class: ItemClassInfo,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attribute_requirements: Option<AttributeRequirements>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shield_info: Option<ShieldInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weapon_info: Option<WeaponInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub armour_info: Option<ArmourInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseItemInfo {
    pub id: String,
    pub name: String,
    pub drop_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemClassInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRequirements {
    pub str: i32,
    pub dex: i32,
    pub int: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldInfo {
    pub block: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponInfo {
    pub crit: i32,
    /// Milliseconds between attacks, as recorded in the source table.
    pub speed: f64,
    /// Attacks per second derived from `speed`, rounded to two decimals.
    pub aps: f64,
    pub min: i32,
    pub max: i32,
    pub rng: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmourInfo {
    pub armour_min: i32,
    pub armour_max: i32,
    pub evasion_min: i32,
    pub evasion_max: i32,
    pub energy_shield_min: i32,
    pub energy_shield_max: i32,
    pub movement_speed: i32,
    pub ward_min: i32,
    pub ward_max: i32,
}
