//! Rule compiler - renders rules into filter text

use thiserror::Error;
use tracing::{debug, info};

use crate::catalogue::fields;
use crate::schema::Rule;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Rule {rule}: malformed {field} value: {reason}")]
    MalformedValue {
        rule: usize,
        field: &'static str,
        reason: String,
    },
}

/// Compiler renders rules into the line-oriented filter format
pub struct Compiler;

impl Compiler {
    /// Render one rule as a block: the block type line, then every set
    /// field in catalogue order.
    ///
    /// `index` is the rule's position in its sequence and only appears in
    /// errors.
    pub fn compile_rule(rule: &Rule, index: usize) -> Result<String, CompileError> {
        let mut lines = vec![rule.block_type.as_str().to_string()];

        for (spec, value) in fields(rule) {
            spec.check(&value)
                .map_err(|reason| CompileError::MalformedValue {
                    rule: index,
                    field: spec.keyword,
                    reason,
                })?;
            lines.push(spec.render_line(&value));
        }

        Ok(lines.join("\n"))
    }

    /// Compile rules into a document, one block per rule in input order,
    /// blocks separated by a blank line.
    pub fn compile(rules: &[Rule]) -> Result<String, CompileError> {
        let blocks = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| Self::compile_rule(rule, i))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Compiled {} rules", blocks.len());
        Ok(blocks.join("\n\n"))
    }

    /// Compile rules and place them ahead of a hand-written base filter.
    pub fn compile_with_base(rules: &[Rule], base_filter: &str) -> Result<String, CompileError> {
        let compiled = Self::compile(rules)?;
        debug!("Appending base filter ({} bytes)", base_filter.len());
        Ok(format!("\n{}\n\n{}\n", compiled, base_filter))
    }
}
