//! Pushes boolean filters down into backends that only understand part of
//! the filter language.
//!
//! Translation runs in three passes: negations are pushed to the leaves,
//! sub-filters the backend cannot express are widened to "everything" (with
//! AND distributed over OR where that helps), and the remaining tree is
//! emitted as one or more backend queries whose results the caller unions.

use model::Filter;

pub mod backend;
mod cache;
pub mod config;
mod emit;
pub mod error;
pub mod normalize;
mod simplify;
pub mod translator;

pub use backend::LeafTranslator;
pub use config::TranslatorConfig;
pub use error::{Inconsistency, TranslateError};
pub use normalize::normalize;
pub use translator::FilterTranslator;

/// Translates with the default configuration.
pub fn translate<B: LeafTranslator>(
    filter: Option<&Filter>,
    backend: &B,
) -> error::Result<Vec<B::Query>> {
    FilterTranslator::new(backend).translate(filter)
}
