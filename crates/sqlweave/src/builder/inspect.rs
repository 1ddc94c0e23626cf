//! Read-only view of builder internals for tests.
//!
//! Compiled for unit tests and behind the `inspect` feature; production callers only see
//! rendered statements.

use super::DmlBuilder;
use super::dml::DmlQueryBuilder;
use crate::condition::{ConditionSlot, Connector};

/// Per-slot rendered text and condition state of a builder.
pub struct BuilderInspector<'a> {
    builder: &'a DmlQueryBuilder,
}

impl DmlQueryBuilder {
    /// Inspect this builder's slots.
    pub fn inspect(&self) -> BuilderInspector<'_> {
        BuilderInspector { builder: self }
    }
}

impl<'a> BuilderInspector<'a> {
    /// Inspect any builder, dialect wrappers included.
    pub fn of(builder: &'a impl DmlBuilder) -> Self {
        Self {
            builder: builder.base(),
        }
    }

    /// `SELECT [modes] columns`.
    pub fn select(&self) -> String {
        self.builder.render_select_list()
    }

    pub fn from(&self) -> String {
        self.builder.render_from()
    }

    /// All joins with their ON / USING parts.
    pub fn joins(&self) -> String {
        self.builder.render_joins()
    }

    pub fn where_clause(&self) -> String {
        self.builder.render_where()
    }

    pub fn having_clause(&self) -> String {
        self.builder.render_having()
    }

    /// ON conditions of the most recent join, without the keyword.
    pub fn on_conditions(&self) -> String {
        self.builder
            .conditions(ConditionSlot::On)
            .map(|list| list.render())
            .unwrap_or_default()
    }

    pub fn group_by(&self) -> String {
        self.builder.render_group_by()
    }

    pub fn order_by(&self) -> String {
        self.builder.render_order_by()
    }

    pub fn limit(&self) -> &str {
        &self.builder.limit
    }

    pub fn compound(&self) -> String {
        self.builder.render_compound()
    }

    pub fn with(&self) -> String {
        self.builder.render_with()
    }

    pub fn set(&self) -> String {
        self.builder.render_set()
    }

    pub fn values(&self) -> String {
        self.builder.render_values()
    }

    /// Open groups in `slot` (ON: most recent join).
    pub fn group_depth(&self, slot: ConditionSlot) -> usize {
        self.builder
            .conditions(slot)
            .map(|list| list.depth())
            .unwrap_or(0)
    }

    /// Pending connector of `slot` (ON: most recent join).
    pub fn connector(&self, slot: ConditionSlot) -> Connector {
        self.builder
            .conditions(slot)
            .map(|list| list.pending_connector())
            .unwrap_or_default()
    }

    /// Slot that `and()` / `or()` currently target.
    pub fn connector_slot(&self) -> ConditionSlot {
        self.builder.connector_slot
    }
}
