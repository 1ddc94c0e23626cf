//! Engine-specific builders.
//!
//! Each dialect builder wraps a [`DmlQueryBuilder`](crate::DmlQueryBuilder) and layers its
//! extra syntax (index hints, statement modifiers, RETURNING, ...) onto the base slots.

pub mod mariadb;
pub mod mysql;
pub mod sqlite;

pub use mariadb::MariaDbQueryBuilder;
pub use mysql::{LockMode, MySqlDml, MySqlModes, MySqlQueryBuilder, SelectMode, WriteMode};
pub use sqlite::{ConflictResolution, SqliteQueryBuilder};
