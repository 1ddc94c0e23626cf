//! `tracing` output for rendered statements.

use crate::config::TraceLevel;

/// Emits each rendered statement as a `tracing` event on target `sqlweave.sql`.
///
/// Attach it to a builder with `DmlQueryBuilder::with_trace`. Builders without a trace stay
/// silent apart from misuse warnings.
///
/// Enable via the crate feature: `sqlweave = { features = ["tracing"] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTrace {
    /// Tracing event level to emit at.
    pub level: TraceLevel,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SqlTrace {
    fn default() -> Self {
        Self {
            level: TraceLevel::Debug,
            max_sql_length: Some(200),
        }
    }
}

impl SqlTrace {
    /// Create a new trace with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: TraceLevel) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => {
                let mut end = max;
                while !sql.is_char_boundary(end) {
                    end -= 1;
                }
                format!("{}...", &sql[..end]).into()
            }
            _ => sql.into(),
        }
    }

    /// Emit one event for a rendered statement of `kind`.
    #[cfg(feature = "tracing")]
    pub fn emit(&self, kind: &str, sql: &str) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    TraceLevel::Error => tracing::error!($($field)*),
                    TraceLevel::Warn  => tracing::warn!($($field)*),
                    TraceLevel::Info  => tracing::info!($($field)*),
                    TraceLevel::Debug => tracing::debug!($($field)*),
                    TraceLevel::Trace => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(sql);
        emit_at_level!(self.level, target: "sqlweave.sql", kind, sql = %sql);
    }

    #[cfg(not(feature = "tracing"))]
    pub fn emit(&self, _kind: &str, _sql: &str) {}
}

/// Log builder misuse that is not an error.
macro_rules! misuse {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "sqlweave.builder", $($arg)*);
    };
}

pub(crate) use misuse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        let trace = SqlTrace::new().max_sql_length(5);
        assert_eq!(trace.truncate_sql("SELECT 1"), "SELEC...");
        assert_eq!(trace.truncate_sql("SEL"), "SEL");

        let trace = SqlTrace::new().max_sql_length(2);
        assert_eq!(trace.truncate_sql("'é'"), "'...");
    }

    #[test]
    fn no_truncate_keeps_everything() {
        let trace = SqlTrace::new().no_truncate();
        let sql = "SELECT * FROM t WHERE a = 1".repeat(20);
        assert_eq!(trace.truncate_sql(&sql), sql.as_str());
    }

    #[test]
    fn builder_setters() {
        let trace = SqlTrace::new().level(TraceLevel::Info);
        assert_eq!(trace.level, TraceLevel::Info);
        assert_eq!(trace.max_sql_length, Some(200));
    }
}
