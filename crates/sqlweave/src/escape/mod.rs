//! Value and identifier escaping.
//!
//! [`QueryEscaper`] turns raw identifiers and values into tokens that can be embedded directly
//! into SQL text. Dialects supply the identifier quote character and the string-literal escaping
//! rule; every other operation is provided on top of those two primitives and may be overridden
//! where the dialect differs (hex literals, charset introducers).
//!
//! Every method builds its output in a local buffer and only returns it once escaping succeeded,
//! so a failure never leaves a partially escaped token behind.
//!
//! # Example
//! ```
//! use sqlweave::{LikeMatch, MySqlEscaper, QueryEscaper};
//!
//! let e = MySqlEscaper::new();
//! assert_eq!(e.column("u.name", "")?, "`u`.`name`");
//! assert_eq!(e.value("O'Brien", "", "")?, r"'O\'Brien'");
//! assert_eq!(e.likevalue("foo", LikeMatch::Forward, "", "")?, "'foo%'");
//! assert_eq!(e.intvalue("abc"), 0);
//! # Ok::<(), sqlweave::WeaveError>(())
//! ```

pub mod ident;
pub mod mysql;
pub mod sqlite;

pub use ident::{Ident, IdentPart};
pub use mysql::{IndexHintKind, IndexHintScope, MySqlEscaper};
pub use sqlite::SqliteEscaper;

use crate::error::{WeaveError, WeaveResult};
use ident::check_bare_name;
use std::fmt;
use std::str::FromStr;

/// Wildcard placement for [`QueryEscaper::likevalue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeMatch {
    /// `value%`
    Forward,
    /// `%value`
    Backward,
    /// `%value%`
    #[default]
    Both,
}

impl LikeMatch {
    fn wrap(self, escaped: &str) -> String {
        match self {
            LikeMatch::Forward => format!("{escaped}%"),
            LikeMatch::Backward => format!("%{escaped}"),
            LikeMatch::Both => format!("%{escaped}%"),
        }
    }
}

impl FromStr for LikeMatch {
    type Err = WeaveError;

    fn from_str(s: &str) -> WeaveResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(LikeMatch::Forward),
            "backward" => Ok(LikeMatch::Backward),
            "both" => Ok(LikeMatch::Both),
            _ => Err(WeaveError::invalid_argument(
                "match",
                s,
                "forward, backward or both",
            )),
        }
    }
}

impl fmt::Display for LikeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LikeMatch::Forward => "forward",
            LikeMatch::Backward => "backward",
            LikeMatch::Both => "both",
        })
    }
}

/// Escaping primitives for one SQL dialect.
///
/// Empty `collation`, `charset` and `alias` arguments mean "not given".
pub trait QueryEscaper: Send + Sync {
    /// Dialect name used in error messages.
    fn dialect(&self) -> &'static str;

    /// Character that quotes identifiers.
    fn quote_char(&self) -> char;

    /// Escape the body of a string literal (without the surrounding quotes).
    fn escape_string(&self, value: &str) -> WeaveResult<String>;

    /// Prefix that marks a literal with `charset`.
    fn charset_introducer(&self, charset: &str) -> WeaveResult<String> {
        let name = charset.strip_prefix('_').unwrap_or(charset);
        check_bare_name("charset", name)?;
        Ok(format!("_{name}"))
    }

    /// Append ` COLLATE <collation>` when a collation is given.
    fn collate(&self, expr: String, collation: &str) -> WeaveResult<String> {
        if collation.is_empty() {
            return Ok(expr);
        }
        check_bare_name("collation", collation)?;
        Ok(format!("{expr} COLLATE {collation}"))
    }

    /// Escape a (possibly dotted) column name.
    fn column(&self, name: &str, collation: &str) -> WeaveResult<String> {
        let quoted = Ident::parse(name)?.to_sql(self.quote_char());
        self.collate(quoted, collation)
    }

    /// Escape a result column with an optional alias.
    fn result_column(&self, column: &str, alias: &str) -> WeaveResult<String> {
        let quoted = Ident::parse(column)?.to_sql(self.quote_char());
        if alias.is_empty() {
            return Ok(quoted);
        }
        let alias = Ident::single(alias)?.to_sql(self.quote_char());
        Ok(format!("{quoted} AS {alias}"))
    }

    /// Escape a result column read back as hexadecimal.
    ///
    /// Without an alias the column keeps its own name.
    fn hex_result_column(&self, column: &str, alias: &str) -> WeaveResult<String> {
        let ident = Ident::parse(column)?;
        let alias = if alias.is_empty() {
            ident.last_name().ok_or_else(|| {
                WeaveError::invalid_identifier(format!("Cannot hex a wildcard column '{column}'"))
            })?
        } else {
            alias
        };
        let alias = Ident::single(alias)?.to_sql(self.quote_char());
        Ok(format!("HEX({}) AS {alias}", ident.to_sql(self.quote_char())))
    }

    /// Escape a (possibly dotted) table name with an optional alias.
    fn table(&self, table: &str, alias: &str) -> WeaveResult<String> {
        let quoted = Ident::parse(table)?.to_sql(self.quote_char());
        if alias.is_empty() {
            return Ok(quoted);
        }
        let alias = Ident::single(alias)?.to_sql(self.quote_char());
        Ok(format!("{quoted} AS {alias}"))
    }

    /// Escape and quote a literal value.
    fn value(&self, value: &str, collation: &str, charset: &str) -> WeaveResult<String> {
        let literal = format!("'{}'", self.escape_string(value)?);
        self.finish_literal(literal, collation, charset)
    }

    /// Escape a value as hex, unhexed by the server on read.
    fn hexvalue(&self, value: &str, collation: &str, charset: &str) -> WeaveResult<String> {
        let unhex = format!("UNHEX('{}')", hex::encode(value.as_bytes()));
        let converted = if charset.is_empty() {
            unhex
        } else {
            let name = charset.strip_prefix('_').unwrap_or(charset);
            check_bare_name("charset", name)?;
            format!("CONVERT({unhex} USING {name})")
        };
        self.collate(converted, collation)
    }

    /// Escape a value and wrap it with `%` wildcards.
    fn likevalue(
        &self,
        value: &str,
        mode: LikeMatch,
        collation: &str,
        charset: &str,
    ) -> WeaveResult<String> {
        let escaped = self.escape_string(value)?;
        let literal = format!("'{}'", mode.wrap(&escaped));
        self.finish_literal(literal, collation, charset)
    }

    /// Coerce to an integer; input without a leading number becomes `0`.
    fn intvalue(&self, value: &str) -> i64 {
        coerce_int(value)
    }

    /// Wrap raw SQL in parentheses for use as a subquery.
    fn query_value(&self, value: &str) -> String {
        format!("({value})")
    }

    /// Escape every element and join them as a parenthesized list.
    fn list_value(&self, values: &[&str]) -> WeaveResult<String> {
        let escaped = values
            .iter()
            .map(|value| self.value(value, "", ""))
            .collect::<WeaveResult<Vec<_>>>()?;
        Ok(format!("({})", escaped.join(",")))
    }

    #[doc(hidden)]
    fn finish_literal(
        &self,
        literal: String,
        collation: &str,
        charset: &str,
    ) -> WeaveResult<String> {
        let literal = if charset.is_empty() {
            literal
        } else {
            format!("{}{literal}", self.charset_introducer(charset)?)
        };
        self.collate(literal, collation)
    }
}

/// Integer coercion of the leading numeric prefix of `value`.
///
/// Leading whitespace is skipped, then an optional sign, digits, an optional fraction and an
/// optional exponent are read (`"1e3"` is 1000, `"2.5e1"` is 25). Anything after the prefix
/// is ignored; input without a numeric prefix yields `0`. Fractions truncate toward zero and
/// out-of-range values saturate.
pub fn coerce_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end += leading_digits(&bytes[end..]);
    let int_digits = end - int_start;

    let mut fractional = false;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = leading_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
            fractional = true;
        }
    }
    if int_digits == 0 && !fractional {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = leading_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
            fractional = true;
        }
    }

    let number = &trimmed[..end];
    if fractional {
        // `as` truncates toward zero and saturates; NaN cannot occur here.
        return number.parse::<f64>().map_or(0, |f| f as i64);
    }

    let negative = bytes.first() == Some(&b'-');
    number[int_start..].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    })
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests;
