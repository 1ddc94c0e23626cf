//! MySQL / MariaDB escaping.

use super::QueryEscaper;
use super::ident::Ident;
use crate::error::{WeaveError, WeaveResult};
use std::fmt;
use std::str::FromStr;

/// Escaper for MySQL and MariaDB.
///
/// Identifiers are quoted with backticks. String literals use backslash escaping, matching
/// `mysql_real_escape_string` for UTF-8 connection charsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEscaper;

impl MySqlEscaper {
    pub fn new() -> Self {
        Self
    }

    /// Render an index hint, e.g. `USE INDEX FOR JOIN (`idx_a`, `idx_b`)`.
    ///
    /// An empty index list is only meaningful for `USE INDEX ()`.
    pub fn index_hint(
        &self,
        kind: IndexHintKind,
        indices: &[&str],
        scope: Option<IndexHintScope>,
    ) -> WeaveResult<String> {
        if indices.is_empty() && kind != IndexHintKind::Use {
            return Err(WeaveError::invalid_argument(
                "indices",
                "",
                "at least one index name",
            ));
        }

        let names = indices
            .iter()
            .map(|index| Ok(Ident::single(index)?.to_sql('`')))
            .collect::<WeaveResult<Vec<_>>>()?;

        Ok(match scope {
            Some(scope) => format!("{kind} INDEX FOR {scope} ({})", names.join(", ")),
            None => format!("{kind} INDEX ({})", names.join(", ")),
        })
    }
}

impl QueryEscaper for MySqlEscaper {
    fn dialect(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn escape_string(&self, value: &str) -> WeaveResult<String> {
        let mut out = String::with_capacity(value.len() + 2);
        for ch in value.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        Ok(out)
    }
}

/// Index hint keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintKind {
    Use,
    Ignore,
    Force,
}

impl fmt::Display for IndexHintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexHintKind::Use => "USE",
            IndexHintKind::Ignore => "IGNORE",
            IndexHintKind::Force => "FORCE",
        })
    }
}

impl FromStr for IndexHintKind {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USE" => Ok(IndexHintKind::Use),
            "IGNORE" => Ok(IndexHintKind::Ignore),
            "FORCE" => Ok(IndexHintKind::Force),
            _ => Err(WeaveError::invalid_argument(
                "index hint",
                s,
                "USE, IGNORE or FORCE",
            )),
        }
    }
}

/// Part of query processing an index hint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintScope {
    Join,
    OrderBy,
    GroupBy,
}

impl fmt::Display for IndexHintScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexHintScope::Join => "JOIN",
            IndexHintScope::OrderBy => "ORDER BY",
            IndexHintScope::GroupBy => "GROUP BY",
        })
    }
}

impl FromStr for IndexHintScope {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "JOIN" => Ok(IndexHintScope::Join),
            "ORDER BY" => Ok(IndexHintScope::OrderBy),
            "GROUP BY" => Ok(IndexHintScope::GroupBy),
            _ => Err(WeaveError::invalid_argument(
                "index hint scope",
                s,
                "JOIN, ORDER BY or GROUP BY",
            )),
        }
    }
}
