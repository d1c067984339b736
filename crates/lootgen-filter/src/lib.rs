//! Lootgen Filter - rule schema and filter compiler
//!
//! This crate defines the rule model for loot filter blocks and compiles
//! rule sequences into the line-oriented filter text the game client reads.

pub mod catalogue;
pub mod compiler;
pub mod render;
pub mod schema;
pub mod validation;

pub use catalogue::{FieldSpec, FieldValue, Section, CATALOGUE};
pub use compiler::{CompileError, Compiler};
pub use render::{Quoting, Scalar};
pub use schema::{
    Actions, AlertSound, BlockType, Color, Comparison, Conditions, EffectDuration,
    GemQualityType, IconShape, Influence, MinimapIcon, Operator, PlayEffect, Rarity, Rule,
    StandardColor,
};
pub use validation::validate_rules;
