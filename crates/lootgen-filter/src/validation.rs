//! Rule validation ahead of compilation

use crate::catalogue::fields;
use crate::compiler::CompileError;
use crate::schema::Rule;

/// Check every field of every rule and report all malformed values at once.
pub fn validate_rules(rules: &[Rule]) -> Result<(), Vec<CompileError>> {
    let mut errors = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        validate_rule(rule, index, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rule(rule: &Rule, index: usize, errors: &mut Vec<CompileError>) {
    for (spec, value) in fields(rule) {
        if let Err(reason) = spec.check(&value) {
            errors.push(CompileError::MalformedValue {
                rule: index,
                field: spec.keyword,
                reason,
            });
        }
    }
}
