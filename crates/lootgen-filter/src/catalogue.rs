//! Ordered field catalogue for filter blocks.
//!
//! Every keyword a block can carry is listed here once, in the order the
//! filter client expects: conditions first, then actions. Each entry knows
//! how to read its value from a [`Rule`], how text values are quoted, and
//! which numeric range is accepted. Rendering and validation both walk this
//! table.

use std::fmt;

use crate::render::{
    render_comparison, render_quoted, render_scalar, render_scalars, Quoting, Scalar, ToScalar,
};
use crate::schema::{
    Actions, AlertSound, Color, Comparison, Conditions, MinimapIcon, Operator, PlayEffect, Rule,
};

/// Reads one field out of a rule; `None` when the field is unset.
pub type Reader = for<'a> fn(&'a Rule) -> Option<FieldValue<'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Condition,
    Action,
}

/// A set field, reduced to the shape it is written in.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// A flag, number or bare keyword.
    Scalar(Scalar<'a>),
    /// Strings written quoted, with no operator.
    QuotedList(Vec<&'a str>),
    /// An operator followed by its values.
    Comparison(Operator, Vec<Scalar<'a>>),
    /// A fixed-arity tuple written slot by slot.
    Tuple(Vec<Scalar<'a>>),
}

impl<'a> FieldValue<'a> {
    fn scalars(&self) -> Vec<Scalar<'a>> {
        match self {
            FieldValue::Scalar(s) => vec![*s],
            FieldValue::QuotedList(values) => values.iter().copied().map(Scalar::Text).collect(),
            FieldValue::Comparison(_, values) | FieldValue::Tuple(values) => values.clone(),
        }
    }
}

pub struct FieldSpec {
    pub keyword: &'static str,
    pub section: Section,
    /// Quoting of text values inside a comparison.
    pub quoting: Quoting,
    /// Inclusive bounds for every number in the value.
    pub range: Option<(f64, f64)>,
    read: Reader,
}

impl FieldSpec {
    const fn condition(keyword: &'static str, read: Reader) -> Self {
        Self {
            keyword,
            section: Section::Condition,
            quoting: Quoting::Bare,
            range: None,
            read,
        }
    }

    const fn action(keyword: &'static str, read: Reader) -> Self {
        Self {
            keyword,
            section: Section::Action,
            quoting: Quoting::Bare,
            range: None,
            read,
        }
    }

    const fn quoted(self) -> Self {
        Self {
            quoting: Quoting::Quoted,
            ..self
        }
    }

    const fn range(self, min: f64, max: f64) -> Self {
        Self {
            range: Some((min, max)),
            ..self
        }
    }

    pub fn read<'a>(&self, rule: &'a Rule) -> Option<FieldValue<'a>> {
        (self.read)(rule)
    }

    /// Reject values that cannot be written as a well-formed line.
    pub fn check(&self, value: &FieldValue<'_>) -> Result<(), String> {
        match value {
            FieldValue::Comparison(op, values) if values.is_empty() => {
                return Err(format!("operator '{}' has no values", op.as_str()));
            }
            FieldValue::QuotedList(values) if values.is_empty() => {
                return Err("list has no values".to_string());
            }
            _ => {}
        }

        let in_tuple = matches!(value, FieldValue::Tuple(_));
        // Bare text is read back as whitespace-separated tokens.
        let bare_text = self.quoting == Quoting::Bare
            && matches!(value, FieldValue::Scalar(_) | FieldValue::Comparison(..));
        for scalar in value.scalars() {
            match scalar {
                Scalar::Number(n) if !n.is_finite() => {
                    return Err(format!("number {} is not finite", n));
                }
                Scalar::Number(n) => {
                    if let Some((min, max)) = self.range {
                        if n < min || n > max {
                            return Err(format!("{} is outside {}..={}", n, min, max));
                        }
                    }
                }
                Scalar::Text(s) if s.is_empty() && !in_tuple => {
                    return Err("text is empty".to_string());
                }
                Scalar::Text(s) if s.contains('"') => {
                    return Err(format!("text {:?} contains a double quote", s));
                }
                Scalar::Text(s) if s.contains(['\n', '\r']) => {
                    return Err(format!("text {:?} contains a line break", s));
                }
                Scalar::Text(s) if bare_text && s.contains(char::is_whitespace) => {
                    return Err(format!("unquoted text {:?} contains whitespace", s));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Render the value part of the line (everything after the keyword).
    pub fn render(&self, value: &FieldValue<'_>) -> String {
        match value {
            FieldValue::Scalar(s) => render_scalar(*s),
            FieldValue::QuotedList(values) => render_quoted(values),
            FieldValue::Comparison(op, values) => render_comparison(*op, values, self.quoting),
            FieldValue::Tuple(slots) => render_scalars(slots),
        }
    }

    pub fn render_line(&self, value: &FieldValue<'_>) -> String {
        format!("{} {}", self.keyword, self.render(value))
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("keyword", &self.keyword)
            .field("section", &self.section)
            .field("quoting", &self.quoting)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// Every set field of `rule`, in catalogue order.
pub fn fields(rule: &Rule) -> impl Iterator<Item = (&'static FieldSpec, FieldValue<'_>)> + '_ {
    CATALOGUE
        .iter()
        .filter_map(move |spec| spec.read(rule).map(|value| (spec, value)))
}

pub fn lookup(keyword: &str) -> Option<&'static FieldSpec> {
    CATALOGUE.iter().find(|spec| spec.keyword == keyword)
}

fn cond(rule: &Rule) -> Option<&Conditions> {
    rule.conditions.as_ref()
}

fn act(rule: &Rule) -> Option<&Actions> {
    rule.actions.as_ref()
}

fn compare<T: ToScalar>(value: &Option<Comparison<T>>) -> Option<FieldValue<'_>> {
    value.as_ref().map(|c| {
        FieldValue::Comparison(c.op, c.values.iter().map(ToScalar::to_scalar).collect())
    })
}

fn flag(value: Option<bool>) -> Option<FieldValue<'static>> {
    value.map(|b| FieldValue::Scalar(Scalar::Bool(b)))
}

fn number(value: Option<u32>) -> Option<FieldValue<'static>> {
    value.map(|n| FieldValue::Scalar(slot(n)))
}

fn text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(|s| FieldValue::Scalar(Scalar::Text(s)))
}

fn keyword(value: Option<&'static str>) -> Option<FieldValue<'static>> {
    value.map(|s| FieldValue::Scalar(Scalar::Text(s)))
}

fn quoted_list(value: &Option<Vec<String>>) -> Option<FieldValue<'_>> {
    value
        .as_ref()
        .map(|list| FieldValue::QuotedList(list.iter().map(String::as_str).collect()))
}

fn quoted_text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(|s| FieldValue::QuotedList(vec![s]))
}

fn slot(n: impl Into<f64>) -> Scalar<'static> {
    Scalar::Number(n.into())
}

fn color(value: Option<Color>) -> Option<FieldValue<'static>> {
    value.map(|Color(r, g, b, a)| {
        FieldValue::Tuple(vec![slot(r), slot(g), slot(b), a.map_or(Scalar::Absent, slot)])
    })
}

fn sound(value: Option<AlertSound>) -> Option<FieldValue<'static>> {
    value.map(|AlertSound(id, volume)| {
        FieldValue::Tuple(vec![id.map_or(Scalar::Text("None"), slot), slot(volume)])
    })
}

fn minimap_icon(value: Option<MinimapIcon>) -> Option<FieldValue<'static>> {
    value.map(|MinimapIcon(size, color, shape)| {
        FieldValue::Tuple(vec![
            slot(size),
            Scalar::Text(color.as_str()),
            Scalar::Text(shape.as_str()),
        ])
    })
}

fn play_effect(value: Option<PlayEffect>) -> Option<FieldValue<'static>> {
    value.map(|PlayEffect(color, duration)| {
        FieldValue::Tuple(vec![
            Scalar::Text(color.as_str()),
            duration.map_or(Scalar::Absent, |d| Scalar::Text(d.as_str())),
        ])
    })
}

/// Block fields in output order.
pub static CATALOGUE: &[FieldSpec] = &[
    FieldSpec::condition("AreaLevel", |r| compare(&cond(r)?.area_level)),
    FieldSpec::condition("WaystoneTier", |r| compare(&cond(r)?.waystone_tier)),
    FieldSpec::condition("ItemLevel", |r| compare(&cond(r)?.item_level)),
    FieldSpec::condition("DropLevel", |r| compare(&cond(r)?.drop_level)),
    FieldSpec::condition("Quality", |r| compare(&cond(r)?.quality)),
    FieldSpec::condition("Rarity", |r| compare(&cond(r)?.rarity)),
    FieldSpec::condition("Class", |r| compare(&cond(r)?.class)).quoted(),
    FieldSpec::condition("BaseType", |r| compare(&cond(r)?.base_type)).quoted(),
    FieldSpec::condition("Prophecy", |r| quoted_list(&cond(r)?.prophecy)),
    FieldSpec::condition("LinkedSockets", |r| compare(&cond(r)?.linked_sockets)),
    FieldSpec::condition("SocketGroup", |r| compare(&cond(r)?.socket_group)),
    FieldSpec::condition("Sockets", |r| compare(&cond(r)?.sockets)),
    FieldSpec::condition("Height", |r| compare(&cond(r)?.height)),
    FieldSpec::condition("Width", |r| compare(&cond(r)?.width)),
    FieldSpec::condition("HasExplicitMod", |r| compare(&cond(r)?.has_explicit_mod)),
    FieldSpec::condition("AnyEnchantment", |r| flag(cond(r)?.any_enchantment)),
    FieldSpec::condition("HasEnchantment", |r| text(&cond(r)?.has_enchantment)),
    FieldSpec::condition("EnchantmentPassiveNode", |r| {
        text(&cond(r)?.enchantment_passive_node)
    }),
    FieldSpec::condition("EnchantmentPassiveNum", |r| {
        compare(&cond(r)?.enchantment_passive_num)
    }),
    FieldSpec::condition("StackSize", |r| compare(&cond(r)?.stack_size)),
    FieldSpec::condition("GemLevel", |r| compare(&cond(r)?.gem_level)),
    FieldSpec::condition("GemQualityType", |r| {
        keyword(cond(r)?.gem_quality_type.map(|g| g.as_str()))
    }),
    FieldSpec::condition("AlternateQuality", |r| flag(cond(r)?.alternate_quality)),
    FieldSpec::condition("Replica", |r| flag(cond(r)?.replica)),
    FieldSpec::condition("Identified", |r| flag(cond(r)?.identified)),
    FieldSpec::condition("Corrupted", |r| flag(cond(r)?.corrupted)),
    FieldSpec::condition("CorruptedMods", |r| compare(&cond(r)?.corrupted_mods)),
    FieldSpec::condition("Mirrored", |r| flag(cond(r)?.mirrored)),
    FieldSpec::condition("ElderItem", |r| flag(cond(r)?.elder_item)),
    FieldSpec::condition("ShaperItem", |r| flag(cond(r)?.shaper_item)),
    FieldSpec::condition("HasInfluence", |r| {
        keyword(cond(r)?.has_influence.map(|i| i.as_str()))
    }),
    FieldSpec::condition("HasSearingExarchImplicit", |r| {
        compare(&cond(r)?.has_searing_exarch_implicit)
    }),
    FieldSpec::condition("HasEaterOfWorldsImplicit", |r| {
        compare(&cond(r)?.has_eater_of_worlds_implicit)
    }),
    FieldSpec::condition("FracturedItem", |r| flag(cond(r)?.fractured_item)),
    FieldSpec::condition("SynthesisedItem", |r| flag(cond(r)?.synthesised_item)),
    FieldSpec::condition("ElderMap", |r| flag(cond(r)?.elder_map)),
    FieldSpec::condition("ShaperMap", |r| flag(cond(r)?.shaper_map)),
    FieldSpec::condition("BlightedMap", |r| flag(cond(r)?.blighted_map)),
    FieldSpec::condition("MapTier", |r| compare(&cond(r)?.map_tier)),
    FieldSpec::condition("HasImplicitMod", |r| flag(cond(r)?.has_implicit_mod)),
    FieldSpec::condition("HasCruciblePassiveTree", |r| {
        flag(cond(r)?.has_crucible_passive_tree)
    }),
    FieldSpec::action("SetBorderColor", |r| color(act(r)?.set_border_color)),
    FieldSpec::action("SetTextColor", |r| color(act(r)?.set_text_color)),
    FieldSpec::action("SetBackgroundColor", |r| color(act(r)?.set_background_color)),
    FieldSpec::action("SetFontSize", |r| number(act(r)?.set_font_size)).range(1.0, 45.0),
    FieldSpec::action("PlayAlertSound", |r| sound(act(r)?.play_alert_sound)).range(0.0, 300.0),
    FieldSpec::action("PlayAlertSoundPositional", |r| {
        sound(act(r)?.play_alert_sound_positional)
    })
    .range(0.0, 300.0),
    FieldSpec::action("DisableDropSound", |r| flag(act(r)?.disable_drop_sound)),
    FieldSpec::action("EnableDropSound", |r| flag(act(r)?.enable_drop_sound)),
    FieldSpec::action("CustomAlertSound", |r| quoted_text(&act(r)?.custom_alert_sound)),
    FieldSpec::action("MinimapIcon", |r| minimap_icon(act(r)?.minimap_icon)).range(0.0, 2.0),
    FieldSpec::action("PlayEffect", |r| play_effect(act(r)?.play_effect)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BlockType, StandardColor};
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_sizes() {
        let conditions = CATALOGUE
            .iter()
            .filter(|s| s.section == Section::Condition)
            .count();
        let actions = CATALOGUE
            .iter()
            .filter(|s| s.section == Section::Action)
            .count();
        assert_eq!(conditions, 41);
        assert_eq!(actions, 11);
    }

    #[test]
    fn test_conditions_precede_actions() {
        let first_action = CATALOGUE
            .iter()
            .position(|s| s.section == Section::Action)
            .unwrap();
        assert!(CATALOGUE[first_action..]
            .iter()
            .all(|s| s.section == Section::Action));
    }

    #[test]
    fn test_keywords_unique() {
        let keywords: HashSet<&str> = CATALOGUE.iter().map(|s| s.keyword).collect();
        assert_eq!(keywords.len(), CATALOGUE.len());
    }

    #[test]
    fn test_quoting_is_per_field() {
        assert_eq!(lookup("BaseType").unwrap().quoting, Quoting::Quoted);
        assert_eq!(lookup("Class").unwrap().quoting, Quoting::Quoted);
        assert_eq!(lookup("Rarity").unwrap().quoting, Quoting::Bare);
        assert_eq!(lookup("SocketGroup").unwrap().quoting, Quoting::Bare);
        assert_eq!(lookup("HasExplicitMod").unwrap().quoting, Quoting::Bare);
        assert!(lookup("NotAKeyword").is_none());
    }

    #[test]
    fn test_fields_follow_catalogue_order() {
        let rule = Rule::new(BlockType::Show)
            .with_actions(Actions {
                set_font_size: Some(40),
                set_border_color: Some(Color(1, 2, 3, Some(4))),
                ..Default::default()
            })
            .with_conditions(Conditions {
                identified: Some(true),
                area_level: Some(Comparison::new(Operator::Gte, [68])),
                ..Default::default()
            });
        let keywords: Vec<&str> = fields(&rule).map(|(spec, _)| spec.keyword).collect();
        assert_eq!(
            keywords,
            vec!["AreaLevel", "Identified", "SetBorderColor", "SetFontSize"]
        );
    }

    #[test]
    fn test_waystone_tier_reads_its_own_value() {
        let rule = Rule::new(BlockType::Show).with_conditions(Conditions {
            area_level: Some(Comparison::new(Operator::Gte, [65])),
            waystone_tier: Some(Comparison::new(Operator::Gte, [12])),
            ..Default::default()
        });
        let spec = lookup("WaystoneTier").unwrap();
        let value = spec.read(&rule).unwrap();
        assert_eq!(spec.render_line(&value), "WaystoneTier >= 12");
    }

    #[test]
    fn test_check_rejects_empty_comparison() {
        let spec = lookup("ItemLevel").unwrap();
        let value = FieldValue::Comparison(Operator::Eq, vec![]);
        assert!(spec.check(&value).unwrap_err().contains("no values"));
    }

    #[test]
    fn test_check_rejects_embedded_quote() {
        let spec = lookup("BaseType").unwrap();
        let value = FieldValue::Comparison(Operator::Eq, vec![Scalar::Text("Bad \"Name\"")]);
        assert!(spec.check(&value).unwrap_err().contains("double quote"));
    }

    #[test]
    fn test_check_rejects_line_break() {
        let spec = lookup("HasEnchantment").unwrap();
        let value = FieldValue::Scalar(Scalar::Text("Enchantment\nShow"));
        assert!(spec.check(&value).unwrap_err().contains("line break"));
    }

    #[test]
    fn test_has_explicit_mod_renders_bare() {
        let rule = Rule::new(BlockType::Show).with_conditions(Conditions {
            has_explicit_mod: Some(Comparison::new(Operator::Eq, ["Tyrannical".to_string()])),
            ..Default::default()
        });
        let (spec, value) = fields(&rule).next().unwrap();
        assert!(spec.check(&value).is_ok());
        assert_eq!(spec.render_line(&value), "HasExplicitMod = Tyrannical");
    }

    #[test]
    fn test_check_rejects_empty_bare_text() {
        for keyword in ["HasEnchantment", "EnchantmentPassiveNode"] {
            let spec = lookup(keyword).unwrap();
            let value = FieldValue::Scalar(Scalar::Text(""));
            assert!(spec.check(&value).unwrap_err().contains("empty"));
        }
    }

    #[test]
    fn test_check_rejects_whitespace_in_bare_text() {
        let socket_group = lookup("SocketGroup").unwrap();
        let value = FieldValue::Comparison(Operator::Eq, vec![Scalar::Text("R G")]);
        assert!(socket_group.check(&value).unwrap_err().contains("whitespace"));

        let enchantment = lookup("HasEnchantment").unwrap();
        let value = FieldValue::Scalar(Scalar::Text("Foo Bar"));
        assert!(enchantment.check(&value).unwrap_err().contains("whitespace"));
    }

    #[test]
    fn test_check_allows_whitespace_in_quoted_text() {
        let base_type = lookup("BaseType").unwrap();
        let value = FieldValue::Comparison(Operator::Eq, vec![Scalar::Text("Crude Bow")]);
        assert!(base_type.check(&value).is_ok());

        let prophecy = lookup("Prophecy").unwrap();
        let value = FieldValue::QuotedList(vec!["Tattered Robe"]);
        assert!(prophecy.check(&value).is_ok());
    }

    #[test]
    fn test_check_range() {
        let icon = lookup("MinimapIcon").unwrap();
        let ok = minimap_icon(Some(MinimapIcon(
            2,
            StandardColor::Red,
            crate::schema::IconShape::Star,
        )))
        .unwrap();
        assert!(icon.check(&ok).is_ok());
        let out_of_range = minimap_icon(Some(MinimapIcon(
            3,
            StandardColor::Red,
            crate::schema::IconShape::Star,
        )))
        .unwrap();
        assert!(icon.check(&out_of_range).unwrap_err().contains("outside"));
    }

    #[test]
    fn test_check_allows_absent_tuple_slots() {
        let spec = lookup("PlayEffect").unwrap();
        let value = play_effect(Some(PlayEffect(StandardColor::Blue, None))).unwrap();
        assert!(spec.check(&value).is_ok());
        assert_eq!(spec.render_line(&value), "PlayEffect Blue ");
    }

    #[test]
    fn test_alert_sound_none_slot() {
        let spec = lookup("PlayAlertSound").unwrap();
        let value = sound(Some(AlertSound(None, 50))).unwrap();
        assert_eq!(spec.render_line(&value), "PlayAlertSound None 50");
    }
}
