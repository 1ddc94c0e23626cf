//! # sqlweave
//!
//! A fluent builder for MySQL, MariaDB and SQLite DML statements.
//!
//! ## Features
//!
//! - **Escaping**: [`QueryEscaper`] turns raw identifiers and values into safe SQL tokens
//! - **Condition accumulation**: WHERE, HAVING and every JOIN's ON clause keep their own
//!   predicate list with AND/OR connectors and parenthesized groups
//! - **Clause assembly**: SELECT, INSERT, UPDATE and DELETE in canonical clause order, with
//!   UNION / EXCEPT / INTERSECT and `WITH [RECURSIVE]`
//! - **Dialect extensions**: index hints, statement modifiers, row locking, upserts and
//!   RETURNING layered onto the base builder
//! - **Tracing**: rendered statements and builder misuse reported through `tracing`
//!
//! ## Example
//!
//! ```
//! use sqlweave::prelude::*;
//!
//! let e = MySqlEscaper::new();
//! let mut b = MySqlQueryBuilder::new();
//! b.select(&e.result_column("u.name", "")?)
//!     .from(&e.table("users", "u")?)
//!     .where_(&e.column("u.status", "")?, &e.value("active", "", "")?, "=")
//!     .order_by("u.name", true)
//!     .limit(20, 40);
//!
//! assert_eq!(
//!     b.get_select_query(),
//!     "SELECT `u`.`name` FROM `users` AS `u` WHERE `u`.`status` = 'active' \
//!      ORDER BY u.name ASC LIMIT 20 OFFSET 40"
//! );
//! # Ok::<(), sqlweave::WeaveError>(())
//! ```

pub mod builder;
pub mod condition;
pub mod config;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod prelude;
pub mod trace;

pub use builder::{CompoundModifier, CompoundOperator, DmlBuilder, DmlQueryBuilder, JoinType};
pub use condition::{ConditionList, ConditionSlot, Connector, Predicate};
pub use config::{Dialect, TraceConfig, TraceLevel, WeaveConfig};
pub use dialect::{
    ConflictResolution, LockMode, MariaDbQueryBuilder, MySqlDml, MySqlModes, MySqlQueryBuilder,
    SelectMode, SqliteQueryBuilder, WriteMode,
};
pub use error::{WeaveError, WeaveResult};
pub use escape::{
    Ident, IdentPart, IndexHintKind, IndexHintScope, LikeMatch, MySqlEscaper, QueryEscaper,
    SqliteEscaper, coerce_int,
};
pub use trace::SqlTrace;

#[cfg(any(test, feature = "inspect"))]
pub use builder::BuilderInspector;
