//! The decoded table set handed to the joiner.

use crate::rows::{
    ArmourTypeRow, AttributeRequirementRow, BaseItemRow, ItemClassRow, ShieldTypeRow,
    WeaponTypeRow,
};

/// All tables one join needs, already decoded into typed rows.
///
/// `attribute_requirements` holds whichever requirement table the game
/// version ships.
#[derive(Debug, Clone, Default)]
pub struct ItemTables {
    pub base_items: Vec<BaseItemRow>,
    pub item_classes: Vec<ItemClassRow>,
    pub armour_types: Vec<ArmourTypeRow>,
    pub weapon_types: Vec<WeaponTypeRow>,
    pub shield_types: Vec<ShieldTypeRow>,
    pub attribute_requirements: Vec<AttributeRequirementRow>,
}

impl ItemTables {
    /// Total number of rows across every table.
    pub fn row_count(&self) -> usize {
        self.base_items.len()
            + self.item_classes.len()
            + self.armour_types.len()
            + self.weapon_types.len()
            + self.shield_types.len()
            + self.attribute_requirements.len()
    }
}
