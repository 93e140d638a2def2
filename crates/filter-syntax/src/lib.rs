//! Text syntax for filters.
//!
//! ```text
//! userName sw "j" and not (age lt 18 or emails co "@example.org")
//! ```
//!
//! Every [`model::Filter`] renders back into this syntax through its
//! `Display` implementation, and [`parse`] reads that rendering back
//! into an equal filter.

pub mod builder;
pub mod error;
pub mod parser;

pub use builder::{parse, parse_optional};
pub use error::SyntaxError;
