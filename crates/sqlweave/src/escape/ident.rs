//! Dotted identifier splitting and quoting.
//!
//! Raw names such as `db.users.id` are split on `.` and every part is quoted with the
//! dialect's quote character. A quote character inside a part is escaped by doubling it.
//! A trailing `*` part stays unquoted so `users.*` remains a wildcard.

use crate::error::{WeaveError, WeaveResult};

/// A part of a SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// A name to be quoted.
    Name(String),
    /// `*`, only valid as the last part.
    Wildcard,
}

/// A raw SQL identifier (column, table, or schema name) awaiting quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// A single name, dots included, without splitting.
    pub fn single(name: &str) -> WeaveResult<Self> {
        check_part(name)?;
        let part = if name == "*" {
            IdentPart::Wildcard
        } else {
            IdentPart::Name(name.to_string())
        };
        Ok(Self { parts: vec![part] })
    }

    /// Split a raw dotted name into parts.
    pub fn parse(s: &str) -> WeaveResult<Self> {
        if s.is_empty() {
            return Err(WeaveError::invalid_identifier("Identifier cannot be empty"));
        }

        let raw: Vec<&str> = s.split('.').collect();
        let last = raw.len() - 1;
        let mut parts = Vec::with_capacity(raw.len());

        for (i, part) in raw.into_iter().enumerate() {
            check_part(part)?;
            if part == "*" {
                if i != last {
                    return Err(WeaveError::invalid_identifier(format!(
                        "Wildcard must be the last part of '{s}'"
                    )));
                }
                parts.push(IdentPart::Wildcard);
            } else {
                parts.push(IdentPart::Name(part.to_string()));
            }
        }

        Ok(Self { parts })
    }

    /// The last named part, used as a default alias.
    pub fn last_name(&self) -> Option<&str> {
        self.parts.iter().rev().find_map(|part| match part {
            IdentPart::Name(name) => Some(name.as_str()),
            IdentPart::Wildcard => None,
        })
    }

    /// Render the identifier quoted with `quote`.
    pub fn to_sql(&self, quote: char) -> String {
        let cap = self
            .parts
            .iter()
            .map(|part| match part {
                IdentPart::Name(s) => s.len() + 3,
                IdentPart::Wildcard => 2,
            })
            .sum();
        let mut out = String::with_capacity(cap);
        self.write_sql(quote, &mut out);
        out
    }

    pub(crate) fn write_sql(&self, quote: char, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Wildcard => out.push('*'),
                IdentPart::Name(s) => {
                    out.push(quote);
                    for ch in s.chars() {
                        if ch == quote {
                            out.push(quote);
                        }
                        out.push(ch);
                    }
                    out.push(quote);
                }
            }
        }
    }
}

fn check_part(part: &str) -> WeaveResult<()> {
    if part.is_empty() {
        return Err(WeaveError::invalid_identifier("Empty identifier segment"));
    }
    if part.contains('\0') {
        return Err(WeaveError::invalid_identifier(
            "Identifier cannot contain NUL character",
        ));
    }
    Ok(())
}

/// Check a collation or charset name: `[A-Za-z0-9_]+`.
pub(crate) fn check_bare_name(kind: &str, name: &str) -> WeaveResult<()> {
    if name.is_empty() || !name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return Err(WeaveError::invalid_identifier(format!(
            "Invalid {kind} name: '{name}'"
        )));
    }
    Ok(())
}
