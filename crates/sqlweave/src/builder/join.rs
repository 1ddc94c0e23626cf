//! JOIN clauses and their ON conditions.

use crate::condition::{ConditionList, ConditionSlot};
use crate::error::{WeaveError, WeaveResult};
use std::fmt;
use std::str::FromStr;

/// Join operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Cross,
    LeftOuter,
    RightOuter,
    Natural,
    NaturalLeft,
    NaturalRight,
}

impl JoinType {
    /// Keywords preceding `JOIN`.
    pub fn keyword(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Cross => "CROSS",
            JoinType::LeftOuter => "LEFT OUTER",
            JoinType::RightOuter => "RIGHT OUTER",
            JoinType::Natural => "NATURAL",
            JoinType::NaturalLeft => "NATURAL LEFT",
            JoinType::NaturalRight => "NATURAL RIGHT",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for JoinType {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "" | "INNER" => Ok(JoinType::Inner),
            "LEFT" => Ok(JoinType::Left),
            "RIGHT" => Ok(JoinType::Right),
            "CROSS" => Ok(JoinType::Cross),
            "LEFT OUTER" => Ok(JoinType::LeftOuter),
            "RIGHT OUTER" => Ok(JoinType::RightOuter),
            "NATURAL" => Ok(JoinType::Natural),
            "NATURAL LEFT" => Ok(JoinType::NaturalLeft),
            "NATURAL RIGHT" => Ok(JoinType::NaturalRight),
            _ => Err(WeaveError::invalid_argument(
                "join type",
                s,
                "INNER, LEFT, RIGHT, CROSS, LEFT OUTER, RIGHT OUTER or NATURAL [LEFT|RIGHT]",
            )),
        }
    }
}

/// One joined table with its own ON condition list.
#[derive(Debug, Clone)]
pub(crate) struct JoinClause {
    /// `INNER JOIN t`, or empty for ON conditions given before any join.
    pub(crate) head: String,
    pub(crate) on: ConditionList,
    pub(crate) using: String,
}

impl JoinClause {
    pub(crate) fn new(head: String) -> Self {
        Self {
            head,
            on: ConditionList::new(ConditionSlot::On),
            using: String::new(),
        }
    }

    pub(crate) fn render(&self) -> String {
        let on = if self.on.is_empty() {
            String::new()
        } else {
            format!("ON {}", self.on.render())
        };
        let using = if self.using.is_empty() {
            String::new()
        } else {
            format!("USING ({})", self.using)
        };
        super::join_parts(&[&self.head, &on, &using])
    }
}
