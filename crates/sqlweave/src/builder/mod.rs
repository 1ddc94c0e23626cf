//! Fluent DML statement builder.
//!
//! ## Design
//!
//! - SQL is explicit: every argument is a fragment the caller already escaped with a
//!   [`QueryEscaper`](crate::QueryEscaper); the builder only arranges fragments.
//! - Each clause is a slot. Empty slots contribute neither text nor separators.
//! - WHERE, HAVING and each JOIN's ON clause keep independent condition lists, so connector
//!   and group state never leaks between clauses.
//! - Dialect builders wrap [`DmlQueryBuilder`] and implement [`DmlBuilder`]; clause ordering
//!   lives in one place.
//!
//! # Example
//! ```
//! use sqlweave::prelude::*;
//!
//! let mut b = DmlQueryBuilder::new();
//! b.select("id, name")
//!     .from("users")
//!     .where_("id", "5", "=")
//!     .and()
//!     .where_("name", "'x'", "=")
//!     .limit(10, -1);
//! assert_eq!(
//!     b.get_select_query(),
//!     "SELECT id, name FROM users WHERE id = 5 AND name = 'x' LIMIT 10"
//! );
//! ```

pub mod compound;
pub mod cte;
pub mod dml;
pub mod join;
pub mod traits;

#[cfg(any(test, feature = "inspect"))]
pub mod inspect;

pub use compound::{CompoundModifier, CompoundOperator};
pub use dml::DmlQueryBuilder;
pub use join::JoinType;
pub use traits::DmlBuilder;

#[cfg(any(test, feature = "inspect"))]
pub use inspect::BuilderInspector;

/// Join non-empty parts with single spaces.
pub(crate) fn join_parts(parts: &[&str]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
