//! Convenient imports for typical `sqlweave` usage.
//!
//! ```
//! use sqlweave::prelude::*;
//! ```

pub use crate::{
    DmlBuilder, DmlQueryBuilder, JoinType, LikeMatch, QueryEscaper, WeaveError, WeaveResult,
};

pub use crate::{ConditionSlot, Connector};

pub use crate::{
    ConflictResolution, LockMode, MariaDbQueryBuilder, MySqlDml, MySqlEscaper, MySqlQueryBuilder,
    SelectMode, SqliteEscaper, SqliteQueryBuilder, WriteMode,
};

pub use crate::{IndexHintKind, IndexHintScope};
