//! SQLite escaping.

use super::QueryEscaper;
use crate::error::{WeaveError, WeaveResult};

/// Escaper for SQLite.
///
/// Identifiers are quoted with double quotes and single quotes in literals are doubled.
/// SQLite has no charset introducers, and a NUL byte cannot appear in a literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEscaper;

impl SqliteEscaper {
    pub fn new() -> Self {
        Self
    }
}

impl QueryEscaper for SqliteEscaper {
    fn dialect(&self) -> &'static str {
        "sqlite"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn escape_string(&self, value: &str) -> WeaveResult<String> {
        if value.contains('\0') {
            return Err(WeaveError::unsupported(
                self.dialect(),
                "NUL character in string literal",
            ));
        }
        Ok(value.replace('\'', "''"))
    }

    fn charset_introducer(&self, charset: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported(
            self.dialect(),
            format!("charset introducer '{charset}'"),
        ))
    }

    /// Blob literal `X'..'`.
    fn hexvalue(&self, value: &str, collation: &str, charset: &str) -> WeaveResult<String> {
        if !charset.is_empty() {
            self.charset_introducer(charset)?;
        }
        self.collate(format!("X'{}'", hex::encode(value.as_bytes())), collation)
    }
}
