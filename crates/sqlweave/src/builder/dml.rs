use super::compound::{CompoundModifier, CompoundOperator, render_compound};
use super::cte::{CteEntry, render_with};
use super::join::JoinClause;
use super::join_parts;
use crate::condition::{ConditionList, ConditionSlot, Connector};
use crate::error::{WeaveError, WeaveResult};
use crate::trace::{SqlTrace, misuse};

/// Dialect-neutral DML statement builder.
///
/// Every clause lives in its own slot. Exclusive slots (SELECT list, FROM, LIMIT, UPDATE and
/// DELETE targets, INTO, column names, INSERT ... SELECT) keep only the latest value; the other
/// slots accumulate in call order. WHERE, HAVING and every JOIN's ON clause have independent
/// condition lists. The chainable operations live on [`DmlBuilder`](super::DmlBuilder).
#[derive(Debug, Clone)]
pub struct DmlQueryBuilder {
    pub(super) select_mode: String,
    pub(super) select: String,
    pub(super) from: String,
    pub(super) joins: Vec<JoinClause>,
    pub(super) where_conditions: ConditionList,
    pub(super) group_by: Vec<String>,
    pub(super) having_conditions: ConditionList,
    pub(super) order_by: Vec<String>,
    pub(super) limit: String,
    pub(super) lock_mode: String,
    pub(super) compound: Vec<String>,
    pub(super) with: Vec<CteEntry>,
    pub(super) insert_mode: String,
    pub(super) update_mode: String,
    pub(super) delete_mode: String,
    pub(super) delete: String,
    pub(super) update: String,
    pub(super) into: String,
    pub(super) column_names: String,
    pub(super) values: Vec<String>,
    pub(super) set: Vec<String>,
    pub(super) select_statement: String,
    pub(super) upsert: String,
    pub(super) returning: String,
    /// Slot that `and()` / `or()` apply to.
    pub(super) connector_slot: ConditionSlot,
    trace: Option<SqlTrace>,
}

impl Default for DmlQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DmlQueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            select_mode: String::new(),
            select: String::new(),
            from: String::new(),
            joins: Vec::new(),
            where_conditions: ConditionList::new(ConditionSlot::Where),
            group_by: Vec::new(),
            having_conditions: ConditionList::new(ConditionSlot::Having),
            order_by: Vec::new(),
            limit: String::new(),
            lock_mode: String::new(),
            compound: Vec::new(),
            with: Vec::new(),
            insert_mode: String::new(),
            update_mode: String::new(),
            delete_mode: String::new(),
            delete: String::new(),
            update: String::new(),
            into: String::new(),
            column_names: String::new(),
            values: Vec::new(),
            set: Vec::new(),
            select_statement: String::new(),
            upsert: String::new(),
            returning: String::new(),
            connector_slot: ConditionSlot::Where,
            trace: None,
        }
    }

    /// Trace every rendered statement.
    pub fn with_trace(mut self, trace: SqlTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    // ==================== Slot access ====================

    /// Condition list for `slot`; ON targets the most recent join.
    pub(super) fn conditions_mut(&mut self, slot: ConditionSlot) -> &mut ConditionList {
        self.connector_slot = slot;
        match slot {
            ConditionSlot::Where => &mut self.where_conditions,
            ConditionSlot::Having => &mut self.having_conditions,
            ConditionSlot::On => {
                if self.joins.is_empty() {
                    misuse!("ON condition added without a preceding JOIN");
                    self.joins.push(JoinClause::new(String::new()));
                }
                let last = self.joins.len() - 1;
                &mut self.joins[last].on
            }
        }
    }

    #[cfg(any(test, feature = "inspect"))]
    pub(super) fn conditions(&self, slot: ConditionSlot) -> Option<&ConditionList> {
        match slot {
            ConditionSlot::Where => Some(&self.where_conditions),
            ConditionSlot::Having => Some(&self.having_conditions),
            ConditionSlot::On => self.joins.last().map(|join| &join.on),
        }
    }

    /// Condition list for `slot` without creating a join for ON.
    fn existing_conditions_mut(&mut self, slot: ConditionSlot) -> Option<&mut ConditionList> {
        match slot {
            ConditionSlot::Where => Some(&mut self.where_conditions),
            ConditionSlot::Having => Some(&mut self.having_conditions),
            ConditionSlot::On => self.joins.last_mut().map(|join| &mut join.on),
        }
    }

    /// Connectors never create a join; one given for ON before any JOIN is ignored.
    pub(super) fn set_pending_connector(&mut self, connector: Connector, slot: ConditionSlot) {
        self.connector_slot = slot;
        match self.existing_conditions_mut(slot) {
            Some(list) => list.set_connector(connector),
            None => {
                misuse!("{} connector for ON ignored: no preceding JOIN", connector.keyword());
            }
        }
    }

    pub(super) fn end_group(&mut self, slot: ConditionSlot) -> WeaveResult<()> {
        self.connector_slot = slot;
        match self.existing_conditions_mut(slot) {
            Some(list) => list.end_group(),
            None => Err(WeaveError::UnbalancedGroup { slot }),
        }
    }

    /// Whether a real JOIN was added (ON conditions without a join do not count).
    fn has_join_heads(&self) -> bool {
        self.joins.iter().any(|join| !join.head.is_empty())
    }

    pub(crate) fn has_compound(&self) -> bool {
        !self.compound.is_empty()
    }

    /// Whether ORDER BY or LIMIT was given for the (first) SELECT.
    pub(crate) fn has_order_or_limit(&self) -> bool {
        !(self.order_by.is_empty() && self.limit.is_empty())
    }

    /// DELETE with explicit target tables or joined tables.
    pub(crate) fn is_multi_table_delete(&self) -> bool {
        !self.delete.is_empty() || self.has_join_heads()
    }

    pub(crate) fn push_compound(
        &mut self,
        operator: CompoundOperator,
        modifier: CompoundModifier,
        query: &str,
    ) {
        self.compound
            .push(render_compound(operator, modifier, query));
    }

    // ==================== Dialect hooks ====================

    /// Replace the modifiers rendered after `SELECT`.
    pub(crate) fn set_select_mode(&mut self, mode: String) {
        self.select_mode = mode;
    }

    pub(crate) fn set_insert_mode(&mut self, mode: String) {
        self.insert_mode = mode;
    }

    pub(crate) fn set_update_mode(&mut self, mode: String) {
        self.update_mode = mode;
    }

    pub(crate) fn set_delete_mode(&mut self, mode: String) {
        self.delete_mode = mode;
    }

    pub(crate) fn set_lock_mode(&mut self, mode: &str) {
        self.lock_mode = mode.to_string();
    }

    /// Exclusive FROM slot with already formatted table text.
    pub(crate) fn set_from(&mut self, table: String) {
        self.from = table;
    }

    /// Append a join whose head (`LEFT JOIN t USE INDEX (..)`) is already formatted.
    pub(crate) fn push_join(&mut self, head: String) {
        self.joins.push(JoinClause::new(head));
    }

    /// Appendable upsert clause rendered after the inserted rows.
    pub(crate) fn push_upsert(&mut self, prefix: &str, body: &str) {
        if self.upsert.is_empty() {
            self.upsert = format!("{prefix} {body}");
        } else {
            self.upsert.push_str(", ");
            self.upsert.push_str(body);
        }
    }

    pub(crate) fn set_returning(&mut self, columns: &str) {
        self.returning = format!("RETURNING {columns}");
    }

    pub(crate) fn has_returning(&self) -> bool {
        !self.returning.is_empty()
    }

    pub(crate) fn clear_returning(&mut self) {
        self.returning.clear();
    }

    // ==================== Rendering ====================

    pub(crate) fn validate_groups(&self) -> WeaveResult<()> {
        self.where_conditions.validate()?;
        self.having_conditions.validate()?;
        for join in &self.joins {
            join.on.validate()?;
        }
        Ok(())
    }

    #[cfg(feature = "tracing")]
    fn warn_unclosed(&self) {
        if let Err(err) = self.validate_groups() {
            tracing::warn!(
                target: "sqlweave.builder",
                error = %err,
                "rendering a statement with unbalanced groups"
            );
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn warn_unclosed(&self) {}

    pub(super) fn render_select_list(&self) -> String {
        let columns = if self.select.is_empty() {
            "*"
        } else {
            self.select.as_str()
        };
        join_parts(&["SELECT", &self.select_mode, columns])
    }

    pub(super) fn render_from(&self) -> String {
        prefixed("FROM", &self.from)
    }

    pub(super) fn render_joins(&self) -> String {
        self.joins
            .iter()
            .map(JoinClause::render)
            .filter(|join| !join.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(super) fn render_where(&self) -> String {
        prefixed("WHERE", &self.where_conditions.render())
    }

    pub(super) fn render_having(&self) -> String {
        prefixed("HAVING", &self.having_conditions.render())
    }

    pub(super) fn render_group_by(&self) -> String {
        prefixed("GROUP BY", &self.group_by.join(", "))
    }

    pub(super) fn render_order_by(&self) -> String {
        prefixed("ORDER BY", &self.order_by.join(", "))
    }

    pub(super) fn render_set(&self) -> String {
        prefixed("SET", &self.set.join(", "))
    }

    pub(super) fn render_values(&self) -> String {
        prefixed("VALUES", &self.values.join(", "))
    }

    pub(super) fn render_compound(&self) -> String {
        self.compound.join(" ")
    }

    pub(super) fn render_with(&self) -> String {
        render_with(&self.with)
    }

    /// SELECT statement, or an empty string when neither a select list nor FROM was given.
    pub(crate) fn render_select(&self) -> String {
        if self.select.is_empty() && self.from.is_empty() {
            return String::new();
        }
        self.warn_unclosed();

        let mut statement = join_parts(&[
            &self.render_select_list(),
            &self.render_from(),
            &self.render_joins(),
            &self.render_where(),
            &self.render_group_by(),
            &self.render_having(),
            &self.render_order_by(),
            &self.limit,
            &self.lock_mode,
        ]);

        if !self.compound.is_empty() {
            // ORDER BY / LIMIT / locking of the first operand must not bind to the whole set.
            if !(self.order_by.is_empty() && self.limit.is_empty() && self.lock_mode.is_empty()) {
                statement = format!("({statement})");
            }
            statement = join_parts(&[&statement, &self.render_compound()]);
        }

        let sql = join_parts(&[&self.render_with(), &statement]);
        self.trace_rendered("select", &sql);
        sql
    }

    /// INSERT (or REPLACE, via `verb`) statement, or an empty string without a target table.
    pub(crate) fn render_insert(&self, verb: &str) -> String {
        self.render_insert_with_mode(verb, &self.insert_mode)
    }

    /// As [`render_insert`](Self::render_insert) with `mode` in place of the recorded modifiers.
    pub(crate) fn render_insert_with_mode(&self, verb: &str, mode: &str) -> String {
        if self.into.is_empty() {
            return String::new();
        }

        let rows = if !self.select_statement.is_empty() {
            self.select_statement.clone()
        } else if !self.values.is_empty() {
            self.render_values()
        } else {
            self.render_set()
        };

        let sql = join_parts(&[
            verb,
            mode,
            "INTO",
            &self.into,
            &self.column_names,
            &rows,
            &self.upsert,
            &self.returning,
        ]);
        self.trace_rendered(&verb.to_ascii_lowercase(), &sql);
        sql
    }

    /// UPDATE statement, or an empty string without a target table or SET list.
    pub(crate) fn render_update(&self) -> String {
        if self.update.is_empty() || self.set.is_empty() {
            return String::new();
        }
        self.warn_unclosed();

        // MySQL rejects ORDER BY / LIMIT on multi-table updates.
        let (order_by, limit) = if !self.has_join_heads() {
            (self.render_order_by(), self.limit.clone())
        } else {
            (String::new(), String::new())
        };

        let statement = join_parts(&[
            "UPDATE",
            &self.update_mode,
            &self.update,
            &self.render_joins(),
            &self.render_set(),
            &self.render_where(),
            &order_by,
            &limit,
            &self.returning,
        ]);
        let sql = join_parts(&[&self.render_with(), &statement]);
        self.trace_rendered("update", &sql);
        sql
    }

    /// DELETE statement, or an empty string without FROM.
    pub(crate) fn render_delete(&self) -> String {
        if self.from.is_empty() {
            return String::new();
        }
        self.warn_unclosed();

        let (order_by, limit) = if !self.is_multi_table_delete() {
            (self.render_order_by(), self.limit.clone())
        } else {
            (String::new(), String::new())
        };

        let statement = join_parts(&[
            "DELETE",
            &self.delete_mode,
            &self.delete,
            &self.render_from(),
            &self.render_joins(),
            &self.render_where(),
            &order_by,
            &limit,
            &self.returning,
        ]);
        let sql = join_parts(&[&self.render_with(), &statement]);
        self.trace_rendered("delete", &sql);
        sql
    }

    fn trace_rendered(&self, kind: &str, sql: &str) {
        if let Some(trace) = &self.trace {
            trace.emit(kind, sql);
        }
    }
}

/// `KEYWORD body`, or nothing when the body is empty.
fn prefixed(keyword: &str, body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("{keyword} {body}")
    }
}
