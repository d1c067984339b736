//! Integration tests for compiling rule documents

use lootgen_core::rows::{BaseItemRow, ItemClassRow, WeaponTypeRow};
use lootgen_core::{ItemJoiner, ItemTables};
use lootgen_filter::{
    validate_rules, Actions, AlertSound, BlockType, Color, CompileError, Comparison, Compiler,
    Conditions, IconShape, MinimapIcon, Operator, Rule, StandardColor,
};
use serde_json::json;

#[test]
fn test_joined_item_drives_base_type_rule() {
    let tables = ItemTables {
        base_items: vec![serde_json::from_value::<BaseItemRow>(json!({
            "_index": 0, "Id": "Metadata/Items/Bow1", "Name": "Crude Bow", "DropLevel": 1, "ItemClass": 0
        }))
        .unwrap()],
        item_classes: vec![serde_json::from_value::<ItemClassRow>(json!({
            "_index": 0, "Id": "Bow", "Name": "Bows"
        }))
        .unwrap()],
        weapon_types: vec![serde_json::from_value::<WeaponTypeRow>(json!({
            "BaseItemTypesKey": 0, "Critical": 500, "Speed": 1200, "DamageMin": 5, "DamageMax": 13, "RangeMax": 120
        }))
        .unwrap()],
        ..Default::default()
    };
    let items = ItemJoiner::default().join(tables).unwrap();
    assert_eq!(items.len(), 1);

    let rules: Vec<Rule> = items
        .iter()
        .map(|item| {
            Rule::new(BlockType::Show).with_conditions(Conditions {
                base_type: Some(Comparison::new(
                    Operator::Eq,
                    [item.base_item.name.clone()],
                )),
                ..Default::default()
            })
        })
        .collect();

    let output = Compiler::compile(&rules).unwrap();
    assert_eq!(output, "Show\nBaseType = \"Crude Bow\"");
}

#[test]
fn test_document_from_json_rules() {
    let rules: Vec<Rule> = serde_json::from_value(json!([
        {
            "blockType": "Show",
            "conditions": {
                "itemLevel": { "op": ">=", "values": [75] },
                "rarity": { "op": "=", "values": ["Rare", "Magic"] },
                "identified": false
            },
            "actions": {
                "setBorderColor": [255, 0, 0, null],
                "playAlertSound": [1, 100],
                "minimapIcon": [0, "Gray", "Circle"]
            }
        },
        { "blockType": "Hide" }
    ]))
    .unwrap();

    assert!(validate_rules(&rules).is_ok());
    let output = Compiler::compile(&rules).unwrap();
    assert_eq!(
        output,
        "Show\n\
         ItemLevel >= 75\n\
         Rarity = Rare Magic\n\
         Identified False\n\
         SetBorderColor 255 0 0 \n\
         PlayAlertSound 1 100\n\
         MinimapIcon 0 Grey Circle\n\
         \n\
         Hide"
    );
}

#[test]
fn test_compile_is_deterministic() {
    let rule = Rule::new(BlockType::Show)
        .with_conditions(Conditions {
            class: Some(Comparison::new(Operator::Eq, ["Wands".to_string()])),
            ..Default::default()
        })
        .with_actions(Actions {
            set_text_color: Some(Color(255, 0, 0, None)),
            set_font_size: Some(35),
            minimap_icon: Some(MinimapIcon(0, StandardColor::Red, IconShape::Circle)),
            play_alert_sound: Some(AlertSound(Some(1), 100)),
            ..Default::default()
        });
    let rules = vec![rule.clone(), rule];

    let first = Compiler::compile(&rules).unwrap();
    let second = Compiler::compile(&rules).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compile_fails_on_first_malformed_rule() {
    let rules = vec![
        Rule::new(BlockType::Show).with_actions(Actions {
            set_font_size: Some(0),
            ..Default::default()
        }),
        Rule::new(BlockType::Show).with_actions(Actions {
            set_font_size: Some(99),
            ..Default::default()
        }),
    ];

    let err = Compiler::compile(&rules).unwrap_err();
    assert!(matches!(
        err,
        CompileError::MalformedValue { rule: 0, field: "SetFontSize", .. }
    ));
    assert_eq!(validate_rules(&rules).unwrap_err().len(), 2);
}

#[test]
fn test_base_filter_follows_generated_rules() {
    let rules = vec![Rule::new(BlockType::Show).with_conditions(Conditions {
        base_type: Some(Comparison::new(Operator::Eq, ["Driftwood Wand".to_string()])),
        ..Default::default()
    })];
    let base = "Show\nClass \"Currency\"";

    let output = Compiler::compile_with_base(&rules, base).unwrap();
    assert_eq!(
        output,
        "\nShow\nBaseType = \"Driftwood Wand\"\n\nShow\nClass \"Currency\"\n"
    );
}
