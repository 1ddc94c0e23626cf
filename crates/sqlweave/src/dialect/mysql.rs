//! MySQL statement extensions.

use crate::builder::{DmlBuilder, DmlQueryBuilder, JoinType};
use crate::error::{WeaveError, WeaveResult};
use crate::escape::MySqlEscaper;
use crate::trace::SqlTrace;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// SELECT modifiers, declared in the order MySQL expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectMode {
    All,
    Distinct,
    DistinctRow,
    HighPriority,
    StraightJoin,
    SqlSmallResult,
    SqlBigResult,
    SqlBufferResult,
    SqlNoCache,
    SqlCalcFoundRows,
}

impl SelectMode {
    pub fn keyword(self) -> &'static str {
        match self {
            SelectMode::All => "ALL",
            SelectMode::Distinct => "DISTINCT",
            SelectMode::DistinctRow => "DISTINCTROW",
            SelectMode::HighPriority => "HIGH_PRIORITY",
            SelectMode::StraightJoin => "STRAIGHT_JOIN",
            SelectMode::SqlSmallResult => "SQL_SMALL_RESULT",
            SelectMode::SqlBigResult => "SQL_BIG_RESULT",
            SelectMode::SqlBufferResult => "SQL_BUFFER_RESULT",
            SelectMode::SqlNoCache => "SQL_NO_CACHE",
            SelectMode::SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS",
        }
    }

    /// Modes that cannot be combined with this one.
    fn conflicts(self) -> &'static [SelectMode] {
        match self {
            SelectMode::All | SelectMode::Distinct | SelectMode::DistinctRow => &[
                SelectMode::All,
                SelectMode::Distinct,
                SelectMode::DistinctRow,
            ],
            SelectMode::SqlSmallResult | SelectMode::SqlBigResult => {
                &[SelectMode::SqlSmallResult, SelectMode::SqlBigResult]
            }
            _ => &[],
        }
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for SelectMode {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        const ALL: [SelectMode; 10] = [
            SelectMode::All,
            SelectMode::Distinct,
            SelectMode::DistinctRow,
            SelectMode::HighPriority,
            SelectMode::StraightJoin,
            SelectMode::SqlSmallResult,
            SelectMode::SqlBigResult,
            SelectMode::SqlBufferResult,
            SelectMode::SqlNoCache,
            SelectMode::SqlCalcFoundRows,
        ];
        let upper = s.trim().to_ascii_uppercase();
        ALL.into_iter()
            .find(|mode| mode.keyword() == upper)
            .ok_or_else(|| {
                WeaveError::invalid_argument("select mode", s, "a MySQL SELECT modifier")
            })
    }
}

/// INSERT / REPLACE / UPDATE / DELETE modifiers, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WriteMode {
    LowPriority,
    Delayed,
    HighPriority,
    Quick,
    Ignore,
}

impl WriteMode {
    pub fn keyword(self) -> &'static str {
        match self {
            WriteMode::LowPriority => "LOW_PRIORITY",
            WriteMode::Delayed => "DELAYED",
            WriteMode::HighPriority => "HIGH_PRIORITY",
            WriteMode::Quick => "QUICK",
            WriteMode::Ignore => "IGNORE",
        }
    }

    fn is_priority(self) -> bool {
        matches!(
            self,
            WriteMode::LowPriority | WriteMode::Delayed | WriteMode::HighPriority
        )
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for WriteMode {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW_PRIORITY" => Ok(WriteMode::LowPriority),
            "DELAYED" => Ok(WriteMode::Delayed),
            "HIGH_PRIORITY" => Ok(WriteMode::HighPriority),
            "QUICK" => Ok(WriteMode::Quick),
            "IGNORE" => Ok(WriteMode::Ignore),
            _ => Err(WeaveError::invalid_argument(
                "write mode",
                s,
                "LOW_PRIORITY, DELAYED, HIGH_PRIORITY, QUICK or IGNORE",
            )),
        }
    }
}

/// Row locking for SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    ForUpdate,
    ForShare,
    LockInShareMode,
}

impl LockMode {
    pub fn keyword(self) -> &'static str {
        match self {
            LockMode::ForUpdate => "FOR UPDATE",
            LockMode::ForShare => "FOR SHARE",
            LockMode::LockInShareMode => "LOCK IN SHARE MODE",
        }
    }
}

impl FromStr for LockMode {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "FOR UPDATE" => Ok(LockMode::ForUpdate),
            "FOR SHARE" => Ok(LockMode::ForShare),
            "LOCK IN SHARE MODE" => Ok(LockMode::LockInShareMode),
            _ => Err(WeaveError::invalid_argument(
                "lock mode",
                s,
                "FOR UPDATE, FOR SHARE or LOCK IN SHARE MODE",
            )),
        }
    }
}

/// Statement modifiers chosen so far.
#[derive(Debug, Clone, Default)]
pub struct MySqlModes {
    select: BTreeSet<SelectMode>,
    insert: BTreeSet<WriteMode>,
    update: BTreeSet<WriteMode>,
    delete: BTreeSet<WriteMode>,
}

impl MySqlModes {
    /// Active SELECT modifiers in rendering order.
    pub fn select_modes(&self) -> impl Iterator<Item = SelectMode> + '_ {
        self.select.iter().copied()
    }

    fn add_select(&mut self, mode: SelectMode) -> String {
        for conflict in mode.conflicts() {
            self.select.remove(conflict);
        }
        self.select.insert(mode);
        render(&self.select, SelectMode::keyword)
    }
}

fn add_write(
    modes: &mut BTreeSet<WriteMode>,
    mode: WriteMode,
    allowed: &[WriteMode],
    statement: &'static str,
) -> WeaveResult<String> {
    if !allowed.contains(&mode) {
        return Err(WeaveError::invalid_argument(
            statement,
            mode.keyword(),
            "a modifier valid for the statement",
        ));
    }
    if mode.is_priority() {
        modes.retain(|m| !m.is_priority());
    }
    modes.insert(mode);
    Ok(render(modes, WriteMode::keyword))
}

fn render<T: Copy>(modes: &BTreeSet<T>, keyword: fn(T) -> &'static str) -> String {
    modes
        .iter()
        .map(|mode| keyword(*mode))
        .collect::<Vec<_>>()
        .join(" ")
}

const INSERT_MODES: &[WriteMode] = &[
    WriteMode::LowPriority,
    WriteMode::Delayed,
    WriteMode::HighPriority,
    WriteMode::Ignore,
];
const UPDATE_MODES: &[WriteMode] = &[WriteMode::LowPriority, WriteMode::Ignore];
const DELETE_MODES: &[WriteMode] = &[WriteMode::LowPriority, WriteMode::Quick, WriteMode::Ignore];

/// MySQL-only clause operations, shared by every MySQL-family builder.
///
/// Everything is layered onto the wrapped base builder's slots; clause ordering stays with
/// [`DmlBuilder`].
pub trait MySqlDml: DmlBuilder {
    fn modes(&self) -> &MySqlModes;

    fn modes_mut(&mut self) -> &mut MySqlModes;

    /// FROM with index hints rendered by [`MySqlEscaper::index_hint`].
    fn from_with_hints(&mut self, table_reference: &str, index_hints: &[String]) -> &mut Self {
        let from = with_hints(table_reference, index_hints);
        self.base_mut().set_from(from);
        self
    }

    /// JOIN with index hints.
    fn join_with_hints(
        &mut self,
        table_reference: &str,
        join_type: JoinType,
        index_hints: &[String],
    ) -> &mut Self {
        let table = with_hints(table_reference, index_hints);
        self.base_mut().push_join(format!("{join_type} JOIN {table}"));
        self
    }

    /// `STRAIGHT_JOIN table`; ON conditions attach as for any other join.
    fn straight_join(&mut self, table_reference: &str, index_hints: &[String]) -> &mut Self {
        let table = with_hints(table_reference, index_hints);
        self.base_mut().push_join(format!("STRAIGHT_JOIN {table}"));
        self
    }

    /// Add a SELECT modifier. Conflicting modifiers (e.g. `ALL` vs `DISTINCT`) replace each other.
    fn select_mode(&mut self, mode: SelectMode) -> &mut Self {
        let rendered = self.modes_mut().add_select(mode);
        self.base_mut().set_select_mode(rendered);
        self
    }

    /// Set the row locking clause. Replaces any previous one.
    fn lock_mode(&mut self, mode: LockMode) -> &mut Self {
        self.base_mut().set_lock_mode(mode.keyword());
        self
    }

    /// Add an INSERT / REPLACE modifier.
    fn insert_mode(&mut self, mode: WriteMode) -> WeaveResult<&mut Self> {
        let rendered = add_write(&mut self.modes_mut().insert, mode, INSERT_MODES, "insert mode")?;
        self.base_mut().set_insert_mode(rendered);
        Ok(self)
    }

    /// Add an UPDATE modifier.
    fn update_mode(&mut self, mode: WriteMode) -> WeaveResult<&mut Self> {
        let rendered = add_write(&mut self.modes_mut().update, mode, UPDATE_MODES, "update mode")?;
        self.base_mut().set_update_mode(rendered);
        Ok(self)
    }

    /// Add a DELETE modifier.
    fn delete_mode(&mut self, mode: WriteMode) -> WeaveResult<&mut Self> {
        let rendered = add_write(&mut self.modes_mut().delete, mode, DELETE_MODES, "delete mode")?;
        self.base_mut().set_delete_mode(rendered);
        Ok(self)
    }

    /// Append `ON DUPLICATE KEY UPDATE` assignments.
    fn on_duplicate_key_update(&mut self, assignments: &[(&str, &str)]) -> &mut Self {
        if assignments.is_empty() {
            return self;
        }
        let body = assignments
            .iter()
            .map(|(column, value)| format!("{column} = {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.base_mut().push_upsert("ON DUPLICATE KEY UPDATE", &body);
        self
    }

    fn get_replace_query(&self) -> String {
        self.base().render_insert("REPLACE")
    }
}

fn with_hints(table_reference: &str, index_hints: &[String]) -> String {
    if index_hints.is_empty() {
        table_reference.to_string()
    } else {
        format!("{table_reference} {}", index_hints.join(", "))
    }
}

/// Builder for MySQL statements.
#[derive(Debug, Clone, Default)]
pub struct MySqlQueryBuilder {
    base: DmlQueryBuilder,
    modes: MySqlModes,
    escaper: MySqlEscaper,
}

impl MySqlQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace every rendered statement.
    pub fn with_trace(mut self, trace: SqlTrace) -> Self {
        self.base = self.base.with_trace(trace);
        self
    }

    /// Escaper matching this dialect.
    pub fn escaper(&self) -> &MySqlEscaper {
        &self.escaper
    }
}

impl DmlBuilder for MySqlQueryBuilder {
    fn base(&self) -> &DmlQueryBuilder {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DmlQueryBuilder {
        &mut self.base
    }
}

impl MySqlDml for MySqlQueryBuilder {
    fn modes(&self) -> &MySqlModes {
        &self.modes
    }

    fn modes_mut(&mut self) -> &mut MySqlModes {
        &mut self.modes
    }
}
