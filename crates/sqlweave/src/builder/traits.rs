use super::compound::{CompoundModifier, CompoundOperator};
use super::cte::CteEntry;
use super::dml::DmlQueryBuilder;
use super::join::{JoinClause, JoinType};
use crate::condition::{ConditionSlot, Connector, Predicate};
use crate::error::WeaveResult;
use crate::trace::misuse;

/// Chainable DML clause operations.
///
/// Implementors only expose the [`DmlQueryBuilder`] they wrap; every clause operation and
/// renderer is provided here, so dialect builders inherit clause ordering and connector handling
/// without repeating it. All arguments are SQL fragments that the caller already escaped.
pub trait DmlBuilder {
    /// The wrapped base builder.
    fn base(&self) -> &DmlQueryBuilder;

    /// The wrapped base builder, mutably.
    fn base_mut(&mut self) -> &mut DmlQueryBuilder;

    // ==================== SELECT / FROM / JOIN ====================

    /// Set the SELECT list. Replaces any previous list.
    fn select(&mut self, select: &str) -> &mut Self {
        self.base_mut().select = select.to_string();
        self
    }

    /// Set the FROM table reference. Replaces any previous one.
    fn from(&mut self, table_reference: &str) -> &mut Self {
        self.base_mut().set_from(table_reference.to_string());
        self
    }

    /// Append a JOIN. Subsequent `on*` calls attach to this join.
    fn join(&mut self, table_reference: &str, join_type: JoinType) -> &mut Self {
        self.base_mut()
            .push_join(format!("{join_type} JOIN {table_reference}"));
        self
    }

    /// Set the USING column list of the most recent join.
    fn using(&mut self, column_list: &str) -> &mut Self {
        let base = self.base_mut();
        if base.joins.is_empty() {
            misuse!("USING given without a preceding JOIN");
            base.joins.push(JoinClause::new(String::new()));
        }
        if let Some(join) = base.joins.last_mut() {
            join.using = column_list.to_string();
        }
        self
    }

    // ==================== Conditions ====================

    /// Append `left operator right` to `slot`.
    fn condition(
        &mut self,
        left: &str,
        right: &str,
        operator: &str,
        slot: ConditionSlot,
    ) -> &mut Self {
        self.base_mut()
            .conditions_mut(slot)
            .add_condition(left, right, operator);
        self
    }

    /// Record the connector for the next fragment or group-open of `slot`.
    fn connector(&mut self, connector: Connector, slot: ConditionSlot) -> &mut Self {
        self.base_mut().set_pending_connector(connector, slot);
        self
    }

    /// Join the next predicate with `AND` (the default).
    ///
    /// Applies to the slot that received the most recent condition or group marker.
    fn and(&mut self) -> &mut Self {
        let slot = self.base().connector_slot;
        self.connector(Connector::And, slot)
    }

    /// Join the next predicate with `OR`.
    ///
    /// Applies to the slot that received the most recent condition or group marker.
    fn or(&mut self) -> &mut Self {
        let slot = self.base().connector_slot;
        self.connector(Connector::Or, slot)
    }

    /// Open a group in `slot`.
    fn start_group(&mut self, slot: ConditionSlot) -> &mut Self {
        self.base_mut().conditions_mut(slot).start_group();
        self
    }

    /// Close the innermost group of `slot`.
    fn end_group(&mut self, slot: ConditionSlot) -> WeaveResult<&mut Self> {
        self.base_mut().end_group(slot)?;
        Ok(self)
    }

    // WHERE

    fn where_(&mut self, left: &str, right: &str, operator: &str) -> &mut Self {
        self.condition(left, right, operator, ConditionSlot::Where)
    }

    fn where_like(&mut self, left: &str, right: &str, negate: bool) -> &mut Self {
        self.condition(left, right, Predicate::Like.operator(negate), ConditionSlot::Where)
    }

    fn where_in(&mut self, left: &str, right: &str, negate: bool) -> &mut Self {
        self.condition(left, right, Predicate::In.operator(negate), ConditionSlot::Where)
    }

    fn where_between(&mut self, left: &str, lower: &str, upper: &str, negate: bool) -> &mut Self {
        self.base_mut()
            .conditions_mut(ConditionSlot::Where)
            .add_between(left, lower, upper, negate);
        self
    }

    fn where_null(&mut self, left: &str, negate: bool) -> &mut Self {
        self.base_mut()
            .conditions_mut(ConditionSlot::Where)
            .add_null(left, negate);
        self
    }

    fn start_where_group(&mut self) -> &mut Self {
        self.start_group(ConditionSlot::Where)
    }

    fn end_where_group(&mut self) -> WeaveResult<&mut Self> {
        self.end_group(ConditionSlot::Where)
    }

    // HAVING

    fn having(&mut self, left: &str, right: &str, operator: &str) -> &mut Self {
        self.condition(left, right, operator, ConditionSlot::Having)
    }

    fn having_like(&mut self, left: &str, right: &str, negate: bool) -> &mut Self {
        self.condition(left, right, Predicate::Like.operator(negate), ConditionSlot::Having)
    }

    fn having_in(&mut self, left: &str, right: &str, negate: bool) -> &mut Self {
        self.condition(left, right, Predicate::In.operator(negate), ConditionSlot::Having)
    }

    fn having_between(&mut self, left: &str, lower: &str, upper: &str, negate: bool) -> &mut Self {
        self.base_mut()
            .conditions_mut(ConditionSlot::Having)
            .add_between(left, lower, upper, negate);
        self
    }

    fn having_null(&mut self, left: &str, negate: bool) -> &mut Self {
        self.base_mut()
            .conditions_mut(ConditionSlot::Having)
            .add_null(left, negate);
        self
    }

    fn start_having_group(&mut self) -> &mut Self {
        self.start_group(ConditionSlot::Having)
    }

    fn end_having_group(&mut self) -> WeaveResult<&mut Self> {
        self.end_group(ConditionSlot::Having)
    }

    // ON (most recent join)

    fn on(&mut self, left: &str, right: &str, operator: &str) -> &mut Self {
        self.condition(left, right, operator, ConditionSlot::On)
    }

    fn on_like(&mut self, left: &str, right: &str, negate: bool) -> &mut Self {
        self.condition(left, right, Predicate::Like.operator(negate), ConditionSlot::On)
    }

    fn on_in(&mut self, left: &str, right: &str, negate: bool) -> &mut Self {
        self.condition(left, right, Predicate::In.operator(negate), ConditionSlot::On)
    }

    fn on_between(&mut self, left: &str, lower: &str, upper: &str, negate: bool) -> &mut Self {
        self.base_mut()
            .conditions_mut(ConditionSlot::On)
            .add_between(left, lower, upper, negate);
        self
    }

    fn on_null(&mut self, left: &str, negate: bool) -> &mut Self {
        self.base_mut()
            .conditions_mut(ConditionSlot::On)
            .add_null(left, negate);
        self
    }

    fn start_on_group(&mut self) -> &mut Self {
        self.start_group(ConditionSlot::On)
    }

    fn end_on_group(&mut self) -> WeaveResult<&mut Self> {
        self.end_group(ConditionSlot::On)
    }

    // ==================== GROUP BY / ORDER BY / LIMIT ====================

    /// Append a GROUP BY expression.
    fn group_by(&mut self, expr: &str) -> &mut Self {
        self.base_mut().group_by.push(expr.to_string());
        self
    }

    /// Append an ORDER BY expression.
    fn order_by(&mut self, expr: &str, ascending: bool) -> &mut Self {
        let direction = if ascending { "ASC" } else { "DESC" };
        self.base_mut().order_by.push(format!("{expr} {direction}"));
        self
    }

    /// Set LIMIT; a negative `offset` omits OFFSET.
    fn limit(&mut self, amount: i64, offset: i64) -> &mut Self {
        self.base_mut().limit = if offset < 0 {
            format!("LIMIT {amount}")
        } else {
            format!("LIMIT {amount} OFFSET {offset}")
        };
        self
    }

    // ==================== Write statements ====================

    /// Set the UPDATE table references.
    fn update(&mut self, table_references: &str) -> &mut Self {
        self.base_mut().update = table_references.to_string();
        self
    }

    /// Set the tables to delete from in a multi-table DELETE. Empty for a single-table delete.
    fn delete(&mut self, table_references: &str) -> &mut Self {
        self.base_mut().delete = table_references.to_string();
        self
    }

    /// Set the INSERT target table.
    fn into_table(&mut self, table: &str) -> &mut Self {
        self.base_mut().into = table.to_string();
        self
    }

    /// Set the INSERT column list.
    fn column_names(&mut self, keys: &[&str]) -> &mut Self {
        self.base_mut().column_names = format!("({})", keys.join(", "));
        self
    }

    /// Append one row of values.
    fn values(&mut self, values: &[&str]) -> &mut Self {
        self.base_mut()
            .values
            .push(format!("({})", values.join(", ")));
        self
    }

    /// Append `column = value` assignments.
    fn set(&mut self, assignments: &[(&str, &str)]) -> &mut Self {
        let base = self.base_mut();
        for (column, value) in assignments {
            base.set.push(format!("{column} = {value}"));
        }
        self
    }

    /// Use a SELECT statement as the rows of an INSERT.
    fn select_statement(&mut self, select: &str) -> &mut Self {
        self.base_mut().select_statement = select.to_string();
        self
    }

    // ==================== Set operations / CTE ====================

    /// Append `UNION [DISTINCT|ALL] query`; `modifier` is matched case-insensitively.
    fn union(&mut self, query: &str, modifier: &str) -> WeaveResult<&mut Self> {
        let modifier: CompoundModifier = modifier.parse()?;
        self.base_mut()
            .push_compound(CompoundOperator::Union, modifier, query);
        Ok(self)
    }

    /// Append `EXCEPT [DISTINCT|ALL] query`.
    fn except(&mut self, query: &str, modifier: &str) -> WeaveResult<&mut Self> {
        let modifier: CompoundModifier = modifier.parse()?;
        self.base_mut()
            .push_compound(CompoundOperator::Except, modifier, query);
        Ok(self)
    }

    /// Append `INTERSECT [DISTINCT|ALL] query`.
    fn intersect(&mut self, query: &str, modifier: &str) -> WeaveResult<&mut Self> {
        let modifier: CompoundModifier = modifier.parse()?;
        self.base_mut()
            .push_compound(CompoundOperator::Intersect, modifier, query);
        Ok(self)
    }

    /// Append a CTE.
    fn with(&mut self, alias: &str, query: &str, column_names: Option<&[&str]>) -> &mut Self {
        self.base_mut()
            .with
            .push(CteEntry::new(alias, query, column_names));
        self
    }

    /// Append a recursive CTE joining `anchor` and `recursive` with `UNION ALL` or `UNION`.
    fn with_recursive(
        &mut self,
        alias: &str,
        anchor: &str,
        recursive: &str,
        union_all: bool,
        column_names: Option<&[&str]>,
    ) -> &mut Self {
        self.base_mut().with.push(CteEntry::recursive(
            alias,
            anchor,
            recursive,
            union_all,
            column_names,
        ));
        self
    }

    // ==================== Rendering ====================

    /// Fail if any WHERE, HAVING or ON group is still open.
    fn validate(&self) -> WeaveResult<()> {
        self.base().validate_groups()
    }

    /// Render the SELECT statement.
    ///
    /// Rendering never fails: a group that is still open renders without its closing
    /// parenthesis and only logs a warning. Call [`validate`](Self::validate) first to
    /// reject such a builder.
    fn get_select_query(&self) -> String {
        self.base().render_select()
    }

    /// Render the INSERT statement.
    fn get_insert_query(&self) -> String {
        self.base().render_insert("INSERT")
    }

    /// Render the UPDATE statement. Open groups render unbalanced; call
    /// [`validate`](Self::validate) first.
    fn get_update_query(&self) -> String {
        self.base().render_update()
    }

    /// Render the DELETE statement. Open groups render unbalanced; call
    /// [`validate`](Self::validate) first.
    fn get_delete_query(&self) -> String {
        self.base().render_delete()
    }
}

impl DmlBuilder for DmlQueryBuilder {
    fn base(&self) -> &DmlQueryBuilder {
        self
    }

    fn base_mut(&mut self) -> &mut DmlQueryBuilder {
        self
    }
}
