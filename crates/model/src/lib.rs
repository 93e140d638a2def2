pub mod core;
pub mod filter;
pub mod records;

pub use core::value::Value;
pub use filter::{Filter, condition::Condition, error::FilterError, operator::Operator};
pub use records::record::Record;
