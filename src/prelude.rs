pub use chrono::{Months, NaiveDateTime as DateTime, TimeDelta, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
  EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
  Set, TransactionTrait,
};
pub use sea_orm_migration::MigratorTrait;
pub use tracing::{debug, error, info, trace, warn};

pub use crate::error::{Error, Login, Result};
