//! SQLite statement extensions.

use crate::builder::{CompoundModifier, CompoundOperator, DmlBuilder, DmlQueryBuilder};
use crate::error::{WeaveError, WeaveResult};
use crate::escape::SqliteEscaper;
use crate::trace::{SqlTrace, misuse};
use std::fmt;
use std::str::FromStr;

/// Conflict resolution for `INSERT OR <conflict>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    Rollback,
    Abort,
    Replace,
    Fail,
    Ignore,
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictResolution::Rollback => "ROLLBACK",
            ConflictResolution::Abort => "ABORT",
            ConflictResolution::Replace => "REPLACE",
            ConflictResolution::Fail => "FAIL",
            ConflictResolution::Ignore => "IGNORE",
        })
    }
}

impl FromStr for ConflictResolution {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ROLLBACK" => Ok(ConflictResolution::Rollback),
            "ABORT" => Ok(ConflictResolution::Abort),
            "REPLACE" => Ok(ConflictResolution::Replace),
            "FAIL" => Ok(ConflictResolution::Fail),
            "IGNORE" => Ok(ConflictResolution::Ignore),
            _ => Err(WeaveError::invalid_argument(
                "conflict resolution",
                s,
                "ROLLBACK, ABORT, REPLACE, FAIL or IGNORE",
            )),
        }
    }
}

/// Builder for SQLite statements.
#[derive(Debug, Clone, Default)]
pub struct SqliteQueryBuilder {
    base: DmlQueryBuilder,
    escaper: SqliteEscaper,
}

impl SqliteQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace every rendered statement.
    pub fn with_trace(mut self, trace: SqlTrace) -> Self {
        self.base = self.base.with_trace(trace);
        self
    }

    pub fn escaper(&self) -> &SqliteEscaper {
        &self.escaper
    }

    /// `FROM table INDEXED BY index`; `index` must already be escaped.
    pub fn from_indexed_by(&mut self, table_reference: &str, index: &str) -> &mut Self {
        self.base
            .set_from(format!("{table_reference} INDEXED BY {index}"));
        self
    }

    /// `FROM table NOT INDEXED`.
    pub fn from_not_indexed(&mut self, table_reference: &str) -> &mut Self {
        self.base.set_from(format!("{table_reference} NOT INDEXED"));
        self
    }

    /// `INSERT OR <conflict>`. Replaces any previous choice.
    pub fn insert_mode(&mut self, conflict: ConflictResolution) -> &mut Self {
        self.base.set_insert_mode(format!("OR {conflict}"));
        self
    }

    /// Set the `RETURNING` column list of INSERT, REPLACE, UPDATE and DELETE statements.
    pub fn returning(&mut self, columns: &str) -> &mut Self {
        self.base.set_returning(columns);
        self
    }

    /// `REPLACE INTO ...`. SQLite has no `REPLACE OR <conflict>`, so the insert mode is left out.
    pub fn get_replace_query(&self) -> String {
        self.base.render_insert_with_mode("REPLACE", "")
    }

    /// SQLite cannot parenthesize a compound operand, so the first SELECT may not carry
    /// ORDER BY or LIMIT.
    fn check_compound_operand(&self) -> WeaveResult<()> {
        if self.base.has_compound() && self.base.has_order_or_limit() {
            return Err(WeaveError::unsupported(
                "sqlite",
                "ORDER BY or LIMIT on the first SELECT of a compound statement",
            ));
        }
        Ok(())
    }

    fn push_compound(
        &mut self,
        operator: CompoundOperator,
        query: &str,
        modifier: &str,
    ) -> WeaveResult<&mut Self> {
        let modifier: CompoundModifier = modifier.parse()?;
        if self.base.has_order_or_limit() {
            return Err(WeaveError::unsupported(
                "sqlite",
                format!("{operator} after ORDER BY or LIMIT"),
            ));
        }
        self.base.push_compound(operator, modifier, query);
        Ok(self)
    }
}

impl DmlBuilder for SqliteQueryBuilder {
    fn base(&self) -> &DmlQueryBuilder {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DmlQueryBuilder {
        &mut self.base
    }

    /// Fails when ORDER BY or LIMIT was already given.
    fn union(&mut self, query: &str, modifier: &str) -> WeaveResult<&mut Self> {
        self.push_compound(CompoundOperator::Union, query, modifier)
    }

    /// Fails when ORDER BY or LIMIT was already given.
    fn except(&mut self, query: &str, modifier: &str) -> WeaveResult<&mut Self> {
        self.push_compound(CompoundOperator::Except, query, modifier)
    }

    /// Fails when ORDER BY or LIMIT was already given.
    fn intersect(&mut self, query: &str, modifier: &str) -> WeaveResult<&mut Self> {
        self.push_compound(CompoundOperator::Intersect, query, modifier)
    }

    /// Also fails when ORDER BY or LIMIT was added after a compound operand.
    fn validate(&self) -> WeaveResult<()> {
        self.base.validate_groups()?;
        self.check_compound_operand()
    }

    fn get_select_query(&self) -> String {
        if self.check_compound_operand().is_err() {
            misuse!("compound SELECT with ORDER BY or LIMIT on its first operand");
        }
        self.base.render_select()
    }
}
