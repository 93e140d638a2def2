//! SQL `WHERE` clause generation for PostgreSQL and MySQL.

pub mod dialect;
pub mod filter;
pub mod translator;

pub use dialect::{Dialect, MySql, Postgres, dialect_for};
pub use filter::{SqlFilter, condition::Condition, expr::SqlFilterExpr};
pub use translator::SqlTranslator;
