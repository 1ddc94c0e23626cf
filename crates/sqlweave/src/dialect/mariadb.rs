//! MariaDB statement extensions.

use super::mysql::{MySqlDml, MySqlModes};
use crate::builder::{DmlBuilder, DmlQueryBuilder};
use crate::escape::MySqlEscaper;
use crate::trace::SqlTrace;

/// Builder for MariaDB statements: the MySQL extensions plus `RETURNING`.
#[derive(Debug, Clone, Default)]
pub struct MariaDbQueryBuilder {
    base: DmlQueryBuilder,
    modes: MySqlModes,
    escaper: MySqlEscaper,
}

impl MariaDbQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace every rendered statement.
    pub fn with_trace(mut self, trace: SqlTrace) -> Self {
        self.base = self.base.with_trace(trace);
        self
    }

    pub fn escaper(&self) -> &MySqlEscaper {
        &self.escaper
    }

    /// Set the `RETURNING` column list of INSERT, REPLACE and single-table DELETE statements.
    pub fn returning(&mut self, columns: &str) -> &mut Self {
        self.base.set_returning(columns);
        self
    }
}

impl DmlBuilder for MariaDbQueryBuilder {
    fn base(&self) -> &DmlQueryBuilder {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DmlQueryBuilder {
        &mut self.base
    }

    /// MariaDB has no `UPDATE ... RETURNING`; the clause is left out.
    fn get_update_query(&self) -> String {
        if !self.base.has_returning() {
            return self.base.render_update();
        }
        let mut base = self.base.clone();
        base.clear_returning();
        base.render_update()
    }

    /// `DELETE ... RETURNING` is single-table only; multi-table deletes leave it out.
    fn get_delete_query(&self) -> String {
        if !(self.base.has_returning() && self.base.is_multi_table_delete()) {
            return self.base.render_delete();
        }
        let mut base = self.base.clone();
        base.clear_returning();
        base.render_delete()
    }
}

impl MySqlDml for MariaDbQueryBuilder {
    fn modes(&self) -> &MySqlModes {
        &self.modes
    }

    fn modes_mut(&mut self) -> &mut MySqlModes {
        &mut self.modes
    }
}
