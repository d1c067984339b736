//! Value and operator rendering for filter lines

use crate::schema::{Operator, Rarity};

/// A primitive value as written into a filter line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Number(f64),
    Text(&'a str),
    Bool(bool),
    /// A null tuple slot; renders as an empty token.
    Absent,
}

/// Whether text values of a field are written inside double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Bare,
    Quoted,
}

/// Conversion of typed rule values into scalars.
pub trait ToScalar {
    fn to_scalar(&self) -> Scalar<'_>;
}

impl ToScalar for u32 {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Number(f64::from(*self))
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Text(self)
    }
}

impl ToScalar for Rarity {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Text(self.as_str())
    }
}

pub fn render_scalar(value: Scalar<'_>) -> String {
    match value {
        Scalar::Number(n) => format_number(n),
        Scalar::Text(s) => s.to_string(),
        Scalar::Bool(true) => "True".to_string(),
        Scalar::Bool(false) => "False".to_string(),
        Scalar::Absent => String::new(),
    }
}

/// Render a scalar, quoting text when the field asks for it.
pub fn render_scalar_with(value: Scalar<'_>, quoting: Quoting) -> String {
    match (value, quoting) {
        (Scalar::Text(s), Quoting::Quoted) => quote(s),
        (value, _) => render_scalar(value),
    }
}

/// Space-join scalars slot by slot. Absent slots keep their separator.
pub fn render_scalars(values: &[Scalar<'_>]) -> String {
    values
        .iter()
        .map(|v| render_scalar(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote every string and space-join them.
pub fn render_quoted<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<op> <v1> <v2> ...`
pub fn render_comparison(op: Operator, values: &[Scalar<'_>], quoting: Quoting) -> String {
    let rendered = values
        .iter()
        .map(|v| render_scalar_with(*v, quoting))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {}", op.as_str(), rendered)
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s)
}

fn format_number(n: f64) -> String {
    if n == n.floor() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_booleans() {
        assert_eq!(render_scalar(Scalar::Bool(true)), "True");
        assert_eq!(render_scalar(Scalar::Bool(false)), "False");
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(render_scalar(Scalar::Number(42.0)), "42");
        assert_eq!(render_scalar(Scalar::Number(0.0)), "0");
        assert_eq!(render_scalar(Scalar::Number(833.33)), "833.33");
        assert_eq!(render_scalar(Scalar::Number(-3.0)), "-3");
    }

    #[test]
    fn test_render_absent_is_empty() {
        assert_eq!(render_scalar(Scalar::Absent), "");
    }

    #[test]
    fn test_render_scalars_keeps_absent_slot() {
        let slots = [
            Scalar::Number(255.0),
            Scalar::Number(0.0),
            Scalar::Number(0.0),
            Scalar::Absent,
        ];
        assert_eq!(render_scalars(&slots), "255 0 0 ");
    }

    #[test]
    fn test_render_quoted_list() {
        assert_eq!(render_quoted(&["Tattered Robe"]), "\"Tattered Robe\"");
        assert_eq!(render_quoted(&["A", "B C"]), "\"A\" \"B C\"");
    }

    #[test]
    fn test_render_comparison_bare_and_quoted() {
        let values = [Scalar::Text("Rare"), Scalar::Text("Magic")];
        assert_eq!(
            render_comparison(Operator::Eq, &values, Quoting::Bare),
            "= Rare Magic"
        );
        assert_eq!(
            render_comparison(Operator::Eq, &values, Quoting::Quoted),
            "= \"Rare\" \"Magic\""
        );
    }

    #[test]
    fn test_quoting_leaves_numbers_alone() {
        let values = [Scalar::Number(3.0), Scalar::Number(5.0)];
        assert_eq!(
            render_comparison(Operator::Gte, &values, Quoting::Quoted),
            ">= 3 5"
        );
    }
}
