//! Builder configuration.
//!
//! ```toml
//! dialect = "mariadb"
//!
//! [trace]
//! enabled = true
//! level = "info"
//! max_sql_length = 120
//! ```

use crate::error::{WeaveError, WeaveResult};
use crate::escape::{MySqlEscaper, QueryEscaper, SqliteEscaper};
use crate::trace::SqlTrace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    MariaDb,
    Sqlite,
}

impl Dialect {
    /// Escaper for this dialect.
    pub fn escaper(self) -> Box<dyn QueryEscaper> {
        match self {
            Dialect::MySql | Dialect::MariaDb => Box::new(MySqlEscaper::new()),
            Dialect::Sqlite => Box::new(SqliteEscaper::new()),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::Sqlite => "sqlite",
        })
    }
}

impl FromStr for Dialect {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(WeaveError::invalid_argument(
                "dialect",
                s,
                "mysql, mariadb or sqlite",
            )),
        }
    }
}

/// Level at which rendered statements are traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

/// `[trace]` table of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Whether rendered statements are traced at all.
    pub enabled: bool,
    pub level: TraceLevel,
    /// `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

/// Configuration for escapers and builders.
///
/// By default, the dialect is MySQL and tracing is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaveConfig {
    pub dialect: Dialect,
    pub trace: Option<TraceConfig>,
}

impl WeaveConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> WeaveResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Set the dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable tracing of rendered statements at `level`.
    pub fn with_trace_level(mut self, level: TraceLevel) -> Self {
        let trace = self.trace.get_or_insert_with(TraceConfig::default);
        trace.enabled = true;
        trace.level = level;
        self
    }

    /// Escaper for the configured dialect.
    pub fn escaper(&self) -> Box<dyn QueryEscaper> {
        self.dialect.escaper()
    }

    /// Trace settings, when tracing is enabled.
    pub fn sql_trace(&self) -> Option<SqlTrace> {
        let trace = self.trace.as_ref().filter(|t| t.enabled)?;
        let sql_trace = SqlTrace::new().level(trace.level);
        Some(match trace.max_sql_length {
            Some(len) => sql_trace.max_sql_length(len),
            None => sql_trace.no_truncate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WeaveConfig::new();
        assert_eq!(config.dialect, Dialect::MySql);
        assert!(config.sql_trace().is_none());
        assert_eq!(config.escaper().dialect(), "mysql");
    }

    #[test]
    fn parse_toml() {
        let config = WeaveConfig::from_toml_str(
            r#"
            dialect = "sqlite"

            [trace]
            enabled = true
            level = "info"
            max_sql_length = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.escaper().quote_char(), '"');
        assert_eq!(
            config.sql_trace(),
            Some(SqlTrace::new().level(TraceLevel::Info).max_sql_length(120))
        );
    }

    #[test]
    fn disabled_trace_table() {
        let config = WeaveConfig::from_toml_str("[trace]\nlevel = \"warn\"\n").unwrap();
        assert!(config.sql_trace().is_none());
    }

    #[test]
    fn trace_without_length_does_not_truncate() {
        let config = WeaveConfig::new().with_trace_level(TraceLevel::Trace);
        let trace = config.sql_trace().unwrap();
        assert_eq!(trace.level, TraceLevel::Trace);
        assert_eq!(trace.max_sql_length, None);
    }

    #[test]
    fn rejects_unknown_dialect() {
        let err = WeaveConfig::from_toml_str("dialect = \"oracle\"").unwrap_err();
        assert!(matches!(err, WeaveError::Config(_)));
        assert!("postgres".parse::<Dialect>().is_err());
        assert_eq!("MariaDB".parse::<Dialect>().unwrap(), Dialect::MariaDb);
    }
}
