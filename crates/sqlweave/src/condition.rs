//! Predicate accumulation for WHERE, HAVING and ON clauses.
//!
//! A [`ConditionList`] holds the ordered predicate fragments of one clause slot together with
//! the logical connector that will join the next fragment and the current group nesting depth.
//! It never emits the clause keyword itself; that is the assembler's job.
//!
//! # Example
//! ```
//! use sqlweave::{ConditionList, ConditionSlot, Connector};
//!
//! let mut list = ConditionList::new(ConditionSlot::Where);
//! list.add_condition("a", "1", "=");
//! list.set_connector(Connector::Or);
//! list.start_group();
//! list.add_condition("b", "2", "=");
//! list.add_condition("c", "3", "=");
//! list.end_group()?;
//! assert_eq!(list.render(), "a = 1 OR (b = 2 AND c = 3)");
//! # Ok::<(), sqlweave::WeaveError>(())
//! ```

use crate::error::{WeaveError, WeaveResult};
use std::fmt;

/// The clause a condition list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionSlot {
    Where,
    Having,
    On,
}

impl ConditionSlot {
    /// SQL keyword introducing the clause.
    pub fn keyword(self) -> &'static str {
        match self {
            ConditionSlot::Where => "WHERE",
            ConditionSlot::Having => "HAVING",
            ConditionSlot::On => "ON",
        }
    }
}

impl fmt::Display for ConditionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Logical connector placed before the next fragment of a slot.
///
/// `Default` behaves as `And`; it is what a slot returns to after a pending connector has been
/// consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    Default,
    And,
    Or,
}

impl Connector {
    /// SQL keyword for the connector.
    pub fn keyword(self) -> &'static str {
        match self {
            Connector::Default | Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// Predicate forms that carry a negated operator.
///
/// | form      | plain     | negated       |
/// |-----------|-----------|---------------|
/// | `Like`    | `LIKE`    | `NOT LIKE`    |
/// | `In`      | `IN`      | `NOT IN`      |
/// | `Null`    | `IS`      | `IS NOT`      |
/// | `Between` | `BETWEEN` | `NOT BETWEEN` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Like,
    In,
    Null,
    Between,
}

impl Predicate {
    /// Operator token for this form.
    pub fn operator(self, negate: bool) -> &'static str {
        match (self, negate) {
            (Predicate::Like, false) => "LIKE",
            (Predicate::Like, true) => "NOT LIKE",
            (Predicate::In, false) => "IN",
            (Predicate::In, true) => "NOT IN",
            (Predicate::Null, false) => "IS",
            (Predicate::Null, true) => "IS NOT",
            (Predicate::Between, false) => "BETWEEN",
            (Predicate::Between, true) => "NOT BETWEEN",
        }
    }
}

/// Right-hand operand of a BETWEEN predicate.
///
/// The `AND` here is part of the BETWEEN syntax and never a logical connector.
pub fn between_operand(lower: &str, upper: &str) -> String {
    format!("{lower} AND {upper}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Connector(Connector),
    Open,
    Close,
    Fragment(String),
}

/// Ordered predicate fragments and connector state for one clause slot.
#[derive(Debug, Clone)]
pub struct ConditionList {
    slot: ConditionSlot,
    tokens: Vec<Token>,
    connector: Connector,
    depth: usize,
    /// Whether a term precedes the insertion point at the current nesting level.
    follows_term: bool,
}

impl ConditionList {
    /// Create an empty list for `slot`.
    pub fn new(slot: ConditionSlot) -> Self {
        Self {
            slot,
            tokens: Vec::new(),
            connector: Connector::Default,
            depth: 0,
            follows_term: false,
        }
    }

    /// The slot this list accumulates for.
    pub fn slot(&self) -> ConditionSlot {
        self.slot
    }

    /// Check if no fragment or group marker has been added.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Current group nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Connector that the next fragment or group-open will consume.
    pub fn pending_connector(&self) -> Connector {
        self.connector
    }

    /// Record the connector for the next fragment or group-open.
    pub fn set_connector(&mut self, connector: Connector) {
        self.connector = connector;
    }

    /// Append `left operator right`.
    pub fn add_condition(&mut self, left: &str, right: &str, operator: &str) {
        self.consume_connector();
        self.tokens
            .push(Token::Fragment(format!("{left} {operator} {right}")));
        self.follows_term = true;
    }

    /// Append a negatable predicate.
    pub fn add_predicate(&mut self, left: &str, right: &str, predicate: Predicate, negate: bool) {
        self.add_condition(left, right, predicate.operator(negate));
    }

    /// Append `left [NOT] BETWEEN lower AND upper`.
    pub fn add_between(&mut self, left: &str, lower: &str, upper: &str, negate: bool) {
        let right = between_operand(lower, upper);
        self.add_predicate(left, &right, Predicate::Between, negate);
    }

    /// Append `left IS [NOT] NULL`.
    pub fn add_null(&mut self, left: &str, negate: bool) {
        self.add_predicate(left, "NULL", Predicate::Null, negate);
    }

    /// Open a parenthesized group.
    pub fn start_group(&mut self) {
        self.consume_connector();
        self.tokens.push(Token::Open);
        self.depth += 1;
        self.follows_term = false;
    }

    /// Close the innermost open group.
    pub fn end_group(&mut self) -> WeaveResult<()> {
        if self.depth == 0 {
            return Err(WeaveError::UnbalancedGroup { slot: self.slot });
        }
        self.tokens.push(Token::Close);
        self.depth -= 1;
        self.follows_term = true;
        Ok(())
    }

    /// Fail if any group is still open.
    pub fn validate(&self) -> WeaveResult<()> {
        if self.depth > 0 {
            return Err(WeaveError::UnclosedGroup {
                slot: self.slot,
                depth: self.depth,
            });
        }
        Ok(())
    }

    /// Render fragments and group markers in insertion order (without the clause keyword).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Close => out.push(')'),
                Token::Open => {
                    push_separator(&mut out);
                    out.push('(');
                }
                Token::Connector(connector) => {
                    push_separator(&mut out);
                    out.push_str(connector.keyword());
                }
                Token::Fragment(fragment) => {
                    push_separator(&mut out);
                    out.push_str(fragment);
                }
            }
        }
        out
    }

    // The pending connector is spent even when nothing precedes the insertion point.
    fn consume_connector(&mut self) {
        let connector = std::mem::take(&mut self.connector);
        if self.follows_term {
            self.tokens.push(Token::Connector(connector));
        }
    }
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('(') {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ConditionList {
        ConditionList::new(ConditionSlot::Where)
    }

    #[test]
    fn default_connector_is_and() {
        let mut l = list();
        l.add_condition("a", "1", "=");
        l.add_condition("b", "2", "=");
        assert_eq!(l.render(), "a = 1 AND b = 2");
    }

    #[test]
    fn or_connector_applies_once() {
        let mut l = list();
        l.add_condition("a", "1", "=");
        l.set_connector(Connector::Or);
        assert_eq!(l.pending_connector(), Connector::Or);
        l.add_condition("b", "2", "=");
        assert_eq!(l.pending_connector(), Connector::Default);
        l.add_condition("c", "3", "=");
        assert_eq!(l.render(), "a = 1 OR b = 2 AND c = 3");
    }

    #[test]
    fn connector_before_first_fragment_is_dropped() {
        let mut l = list();
        l.set_connector(Connector::Or);
        l.add_condition("a", "1", "=");
        assert_eq!(l.render(), "a = 1");
        assert_eq!(l.pending_connector(), Connector::Default);
    }

    #[test]
    fn group_takes_connector() {
        let mut l = list();
        l.add_condition("a", "1", "=");
        l.set_connector(Connector::Or);
        l.start_group();
        l.add_condition("b", "2", "=");
        l.set_connector(Connector::Or);
        l.add_condition("c", "3", "=");
        l.end_group().unwrap();
        l.add_condition("d", "4", "=");
        assert_eq!(l.render(), "a = 1 OR (b = 2 OR c = 3) AND d = 4");
    }

    #[test]
    fn nested_groups() {
        let mut l = list();
        l.start_group();
        l.start_group();
        l.add_condition("a", "1", "=");
        l.end_group().unwrap();
        l.set_connector(Connector::Or);
        l.add_condition("b", "2", "=");
        l.end_group().unwrap();
        assert_eq!(l.render(), "((a = 1) OR b = 2)");
        assert_eq!(l.depth(), 0);
    }

    #[test]
    fn connector_state_spans_group_boundaries() {
        let mut l = list();
        l.add_condition("a", "1", "=");
        l.start_group();
        l.add_condition("b", "2", "=");
        l.set_connector(Connector::Or);
        l.end_group().unwrap();
        l.add_condition("c", "3", "=");
        assert_eq!(l.render(), "a = 1 AND (b = 2) OR c = 3");
    }

    #[test]
    fn end_group_at_zero_is_rejected() {
        let mut l = list();
        let err = l.end_group().unwrap_err();
        assert_eq!(
            err,
            WeaveError::UnbalancedGroup {
                slot: ConditionSlot::Where
            }
        );
        assert!(l.is_empty());
    }

    #[test]
    fn validate_reports_open_groups() {
        let mut l = ConditionList::new(ConditionSlot::Having);
        assert_eq!(l.slot(), ConditionSlot::Having);
        l.start_group();
        l.add_condition("a", "1", "=");
        assert!(matches!(
            l.validate(),
            Err(WeaveError::UnclosedGroup {
                slot: ConditionSlot::Having,
                depth: 1
            })
        ));
        l.end_group().unwrap();
        assert!(l.validate().is_ok());
    }

    #[test]
    fn negation_table() {
        let cases = [
            (Predicate::Like, "LIKE", "NOT LIKE"),
            (Predicate::In, "IN", "NOT IN"),
            (Predicate::Null, "IS", "IS NOT"),
            (Predicate::Between, "BETWEEN", "NOT BETWEEN"),
        ];
        for (predicate, plain, negated) in cases {
            assert_eq!(predicate.operator(false), plain);
            assert_eq!(predicate.operator(true), negated);
        }
    }

    #[test]
    fn between_and_is_not_a_connector() {
        let mut l = list();
        l.add_condition("a", "1", "=");
        l.set_connector(Connector::Or);
        l.add_between("age", "18", "30", true);
        assert_eq!(l.render(), "a = 1 OR age NOT BETWEEN 18 AND 30");
        assert_eq!(l.pending_connector(), Connector::Default);
    }

    #[test]
    fn null_predicate() {
        let mut l = list();
        l.add_null("deleted_at", false);
        l.add_null("email", true);
        assert_eq!(l.render(), "deleted_at IS NULL AND email IS NOT NULL");
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(list().render(), "");
    }
}
