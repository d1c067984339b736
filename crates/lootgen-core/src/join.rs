//! Table joiner - rebuilds one denormalized item per base item row

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::item::{
    ArmourInfo, AttributeRequirements, BaseItemInfo, ItemClassInfo, ShieldInfo, UnifiedItem,
    WeaponInfo,
};
use crate::rows::{
    ArmourTypeRow, AttributeRequirementRow, BaseItemRow, ItemClassRow, JoinKey, ShieldTypeRow,
    WeaponTypeRow,
};
use crate::tables::ItemTables;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("Base item '{id}' (row {index}) does not resolve to any item class")]
    MissingClassification { index: usize, id: String },

    #[error("Weapon '{id}' has invalid attack interval {interval}")]
    InvalidAttackInterval { id: String, interval: f64 },
}

/// Satellite tables that hang off the base item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Satellite {
    Armour,
    Weapon,
    Shield,
    AttributeRequirements,
}

/// Which key of the base item row is probed against a satellite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The row's position in the base item table.
    PrimaryIndex,
    /// The row's `Id` string.
    PrimaryId,
}

impl KeySource {
    pub fn key_of(&self, row: &BaseItemRow) -> JoinKey {
        match self {
            KeySource::PrimaryIndex => JoinKey::Index(row.index),
            KeySource::PrimaryId => JoinKey::Id(row.id.clone()),
        }
    }
}

/// Per-satellite probe configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinConfig {
    pub armour: KeySource,
    pub weapon: KeySource,
    pub shield: KeySource,
    pub attribute_requirements: KeySource,
}

impl JoinConfig {
    pub fn key_source(&self, satellite: Satellite) -> KeySource {
        match satellite {
            Satellite::Armour => self.armour,
            Satellite::Weapon => self.weapon,
            Satellite::Shield => self.shield,
            Satellite::AttributeRequirements => self.attribute_requirements,
        }
    }
}

/// Probe keys used by the shipped tables. Both game generations key their
/// attribute requirements by base item id.
impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            armour: KeySource::PrimaryIndex,
            weapon: KeySource::PrimaryIndex,
            shield: KeySource::PrimaryIndex,
            attribute_requirements: KeySource::PrimaryId,
        }
    }
}

/// Build a lookup index over `rows`. When two rows share a key the later
/// one wins.
pub fn build_index<R>(rows: Vec<R>, key_of: impl Fn(&R) -> JoinKey) -> HashMap<JoinKey, R> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.insert(key_of(&row), row);
    }
    index
}

/// Attacks per second from a per-attack interval in milliseconds, rounded
/// to two decimals.
pub fn attacks_per_second(interval: f64) -> f64 {
    ((1000.0 / interval) * 100.0).round() / 100.0
}

/// Resolves a base item's class, trying the older class reference before
/// the newer one.
pub struct ClassResolver {
    index: HashMap<JoinKey, ItemClassRow>,
}

impl ClassResolver {
    pub fn new(classes: Vec<ItemClassRow>) -> Self {
        Self {
            index: build_index(classes, |c| JoinKey::Index(c.index)),
        }
    }

    pub fn resolve(&self, row: &BaseItemRow) -> Option<&ItemClassRow> {
        [row.item_class, row.item_classes_key]
            .into_iter()
            .flatten()
            .find_map(|class| self.index.get(&JoinKey::Index(class)))
    }
}

struct SatelliteIndexes {
    armour: HashMap<JoinKey, ArmourTypeRow>,
    weapon: HashMap<JoinKey, WeaponTypeRow>,
    shield: HashMap<JoinKey, ShieldTypeRow>,
    attribute_requirements: HashMap<JoinKey, AttributeRequirementRow>,
}

/// Left-joins the satellite tables onto the base item table.
pub struct ItemJoiner {
    config: JoinConfig,
}

impl ItemJoiner {
    pub fn new(config: JoinConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Join every base item with its class and satellite rows.
    ///
    /// Output order follows the base item table. Any base item without a
    /// class fails the whole join.
    pub fn join(&self, tables: ItemTables) -> Result<Vec<UnifiedItem>, JoinError> {
        let ItemTables {
            base_items,
            item_classes,
            armour_types,
            weapon_types,
            shield_types,
            attribute_requirements,
        } = tables;

        let classes = ClassResolver::new(item_classes);
        let satellites = SatelliteIndexes {
            armour: build_index(armour_types, |r| r.base_item_types_key.clone()),
            weapon: build_index(weapon_types, |r| r.base_item_types_key.clone()),
            shield: build_index(shield_types, |r| r.base_item_types_key.clone()),
            attribute_requirements: build_index(attribute_requirements, |r| {
                r.base_item_types_key.clone()
            }),
        };
        debug!(
            "Indexed satellites: {} armour, {} weapon, {} shield, {} attribute rows",
            satellites.armour.len(),
            satellites.weapon.len(),
            satellites.shield.len(),
            satellites.attribute_requirements.len()
        );

        let items = base_items
            .iter()
            .map(|base| self.unify(base, &classes, &satellites))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Joined {} base items", items.len());
        Ok(items)
    }

    fn unify(
        &self,
        base: &BaseItemRow,
        classes: &ClassResolver,
        satellites: &SatelliteIndexes,
    ) -> Result<UnifiedItem, JoinError> {
        let class = classes
            .resolve(base)
            .ok_or_else(|| JoinError::MissingClassification {
                index: base.index,
                id: base.id.clone(),
            })?;

        let probe = |satellite: Satellite| self.config.key_source(satellite).key_of(base);

        let weapon_info = satellites
            .weapon
            .get(&probe(Satellite::Weapon))
            .map(|wt| weapon_info(base, wt))
            .transpose()?;

        Ok(UnifiedItem {
            base_item: BaseItemInfo {
                id: base.id.clone(),
                name: base.name.clone(),
                drop_level: base.drop_level,
            },
            item_class: ItemClassInfo {
                id: class.id.clone(),
                name: class.name.clone(),
            },
            attribute_requirements: satellites
                .attribute_requirements
                .get(&probe(Satellite::AttributeRequirements))
                .map(|car| AttributeRequirements {
                    str: car.req_str,
                    dex: car.req_dex,
                    int: car.req_int,
                }),
            shield_info: satellites
                .shield
                .get(&probe(Satellite::Shield))
                .map(|st| ShieldInfo { block: st.block }),
            weapon_info,
            armour_info: satellites
                .armour
                .get(&probe(Satellite::Armour))
                .map(armour_info),
        })
    }
}

impl Default for ItemJoiner {
    fn default() -> Self {
        Self::new(JoinConfig::default())
    }
}

fn weapon_info(base: &BaseItemRow, wt: &WeaponTypeRow) -> Result<WeaponInfo, JoinError> {
    if !wt.speed.is_finite() || wt.speed <= 0.0 {
        return Err(JoinError::InvalidAttackInterval {
            id: base.id.clone(),
            interval: wt.speed,
        });
    }
    Ok(WeaponInfo {
        crit: wt.critical,
        speed: wt.speed,
        aps: attacks_per_second(wt.speed),
        min: wt.damage_min,
        max: wt.damage_max,
        rng: wt.range_max,
    })
}

fn armour_info(ar: &ArmourTypeRow) -> ArmourInfo {
    ArmourInfo {
        armour_min: ar.armour.min,
        armour_max: ar.armour.max,
        evasion_min: ar.evasion.min,
        evasion_max: ar.evasion.max,
        energy_shield_min: ar.energy_shield.min,
        energy_shield_max: ar.energy_shield.max,
        movement_speed: ar.movement_speed,
        ward_min: ar.ward.min,
        ward_max: ar.ward.max,
    }
}
