//! Set operations (UNION, EXCEPT, INTERSECT).

use crate::error::{WeaveError, WeaveResult};
use std::fmt;
use std::str::FromStr;

/// Set operation combining two SELECT statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOperator {
    Union,
    Except,
    Intersect,
}

impl fmt::Display for CompoundOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompoundOperator::Union => "UNION",
            CompoundOperator::Except => "EXCEPT",
            CompoundOperator::Intersect => "INTERSECT",
        })
    }
}

/// Duplicate handling for a set operation. `Plain` emits no modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompoundModifier {
    #[default]
    Plain,
    Distinct,
    All,
}

impl FromStr for CompoundModifier {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Ok(CompoundModifier::Plain),
            "DISTINCT" => Ok(CompoundModifier::Distinct),
            "ALL" => Ok(CompoundModifier::All),
            _ => Err(WeaveError::invalid_argument(
                "compound modifier",
                s,
                "empty, DISTINCT or ALL",
            )),
        }
    }
}

/// `UNION ALL <query>` and friends.
pub(crate) fn render_compound(
    operator: CompoundOperator,
    modifier: CompoundModifier,
    query: &str,
) -> String {
    match modifier {
        CompoundModifier::Plain => format!("{operator} {query}"),
        CompoundModifier::Distinct => format!("{operator} DISTINCT {query}"),
        CompoundModifier::All => format!("{operator} ALL {query}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_parse_case_insensitively() {
        assert_eq!("".parse::<CompoundModifier>().unwrap(), CompoundModifier::Plain);
        assert_eq!("all".parse::<CompoundModifier>().unwrap(), CompoundModifier::All);
        assert_eq!(
            "Distinct".parse::<CompoundModifier>().unwrap(),
            CompoundModifier::Distinct
        );
        assert!("any".parse::<CompoundModifier>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn render() {
        assert_eq!(
            render_compound(CompoundOperator::Union, CompoundModifier::All, "SELECT 1"),
            "UNION ALL SELECT 1"
        );
        assert_eq!(
            render_compound(CompoundOperator::Union, CompoundModifier::Plain, "SELECT 1"),
            "UNION SELECT 1"
        );
        assert_eq!(
            render_compound(CompoundOperator::Except, CompoundModifier::Distinct, "SELECT 1"),
            "EXCEPT DISTINCT SELECT 1"
        );
    }
}
