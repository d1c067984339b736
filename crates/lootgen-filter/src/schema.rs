//! Rule schema: block type, condition set and action set

use serde::{Deserialize, Serialize};

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Token written to the filter file.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

keyword_enum! {
    /// Top-level disposition of a rule block.
    BlockType { Show, Hide, Continue }
}

keyword_enum! {
    Rarity { Normal, Magic, Rare, Unique }
}

keyword_enum! {
    GemQualityType { Superior, Anomalous, Divergent, Phantasmal }
}

keyword_enum! {
    Influence { Shaper, Elder, Crusader, Hunter, Redeemer, Warlord }
}

keyword_enum! {
    /// Named colours accepted by minimap icons and beam effects.
    StandardColor {
        Red,
        Green,
        Blue,
        Brown,
        White,
        Yellow,
        Orange,
        Purple,
        Cyan,
        #[serde(alias = "Gray")]
        Grey,
        Black,
        Pink,
    }
}

keyword_enum! {
    IconShape {
        Circle,
        Diamond,
        Hexagon,
        Square,
        Star,
        Triangle,
        Cross,
        Moon,
        Raindrop,
        Kite,
        Pentagon,
        UpsideDownHouse,
    }
}

keyword_enum! {
    EffectDuration { Temp }
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Not => "!",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
        }
    }
}

/// An operator applied to one or more values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison<T> {
    pub op: Operator,
    pub values: Vec<T>,
}

impl<T> Comparison<T> {
    pub fn new(op: Operator, values: impl IntoIterator<Item = T>) -> Self {
        Self {
            op,
            values: values.into_iter().collect(),
        }
    }
}

/// RGBA colour; a missing alpha is left for the client to default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8, pub Option<u8>);

/// Alert sound id (`None` silences the default sound) and volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSound(pub Option<u32>, pub u32);

/// Minimap icon size (0 is largest, 2 smallest), colour and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimapIcon(pub u8, pub StandardColor, pub IconShape);

/// Beam effect colour, optionally only shown while the item drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEffect(pub StandardColor, pub Option<EffectDuration>);

/// Predicates a rule matches items against. Unset predicates are not
/// written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Conditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_level: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waystone_tier: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_level: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_level: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Comparison<Rarity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Comparison<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<Comparison<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prophecy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_sockets: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_group: Option<Comparison<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sockets: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_explicit_mod: Option<Comparison<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_enchantment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_enchantment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchantment_passive_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchantment_passive_num: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_size: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gem_level: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gem_quality_type: Option<GemQualityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_quality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupted_mods: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrored: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elder_item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shaper_item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_influence: Option<Influence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_searing_exarch_implicit: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_eater_of_worlds_implicit: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractured_item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesised_item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elder_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shaper_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blighted_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_tier: Option<Comparison<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_implicit_mod: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_crucible_passive_tree: Option<bool>,
}

/// Styling and sound effects applied to matching items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Actions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_alert_sound: Option<AlertSound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_alert_sound_positional: Option<AlertSound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_drop_sound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_drop_sound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_alert_sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimap_icon: Option<MinimapIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_effect: Option<PlayEffect>,
}

/// One filter block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Actions>,
}

impl Rule {
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            conditions: None,
            actions: None,
        }
    }

    pub fn with_conditions(self, conditions: Conditions) -> Self {
        Self {
            conditions: Some(conditions),
            ..self
        }
    }

    pub fn with_actions(self, actions: Actions) -> Self {
        Self {
            actions: Some(actions),
            ..self
        }
    }
}
