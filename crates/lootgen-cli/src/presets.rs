//! Built-in highlight presets over the joined item list.

use lootgen_core::UnifiedItem;
use lootgen_filter::{
    Actions, AlertSound, BlockType, Color, Comparison, Conditions, IconShape, MinimapIcon,
    Operator, Rule, StandardColor,
};

const RED: Color = Color(255, 0, 0, None);

/// Red border and text, a small red circle on the minimap, alert sound 1
/// at volume 100 and font size 35. Other actions already on the rule are kept.
pub fn medium_importance_highlight(mut rule: Rule) -> Rule {
    let existing = rule.actions.take().unwrap_or_default();
    let actions = Actions {
        set_border_color: Some(RED),
        set_text_color: Some(RED),
        minimap_icon: Some(MinimapIcon(0, StandardColor::Red, IconShape::Circle)),
        play_alert_sound: Some(AlertSound(Some(1), 100)),
        set_font_size: Some(35),
        ..existing
    };
    rule.with_actions(actions)
}

/// A `Show` block matching exactly this item's base type.
pub fn show_base_type(item: &UnifiedItem) -> Rule {
    Rule::new(BlockType::Show).with_conditions(Conditions {
        base_type: Some(Comparison::new(
            Operator::Eq,
            [item.base_item.name.clone()],
        )),
        ..Default::default()
    })
}

/// Pure energy shield armour from the "Expert" base tier.
pub fn is_energy_shield_expert_base(item: &UnifiedItem) -> bool {
    let Some(armour) = item.armour_info else {
        return false;
    };
    armour.energy_shield_min > 0
        && armour.evasion_min <= 0
        && armour.armour_min <= 0
        && item.base_item.name.contains("Expert")
}

/// Wand bases, skipping the "Random" placeholder entries.
pub fn is_wand(item: &UnifiedItem) -> bool {
    let name = &item.base_item.name;
    name.contains("Wand") && !name.contains("Random")
}

/// Highlight rules for every preset, energy shield bases first, then wands.
pub fn preset_rules(items: &[UnifiedItem]) -> Vec<Rule> {
    let es_bases = items.iter().filter(|i| is_energy_shield_expert_base(i));
    let wands = items.iter().filter(|i| is_wand(i));

    es_bases
        .chain(wands)
        .map(|item| medium_importance_highlight(show_base_type(item)))
        .collect()
}
