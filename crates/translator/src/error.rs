use model::Filter;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    /// The leaf translator answered differently for the same input between
    /// the feasibility pass and emission.
    #[error("Translation is inconsistent at `{filter}`: {kind}")]
    Inconsistent {
        filter: Box<Filter>,
        kind: Inconsistency,
    },
}

impl TranslateError {
    pub fn inconsistent(filter: &Filter, kind: Inconsistency) -> Self {
        TranslateError::Inconsistent {
            filter: Box::new(filter.clone()),
            kind,
        }
    }

    /// The sub-filter the inconsistency was detected at.
    pub fn filter(&self) -> &Filter {
        match self {
            TranslateError::Inconsistent { filter, .. } => filter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A side that was judged expressible emitted no query.
    EmptyProbe,
    /// An AND operand emitted other than exactly one query.
    NotSingleQuery { count: usize },
    /// `combine_and` refused a pair it accepted while simplifying.
    AndRejected,
    /// `translate_leaf` refused a leaf it accepted while simplifying.
    LeafRejected,
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::EmptyProbe => write!(f, "expressible sub-filter emitted no query"),
            Inconsistency::NotSingleQuery { count } => {
                write!(f, "AND operand emitted {count} queries, expected exactly 1")
            }
            Inconsistency::AndRejected => write!(f, "native AND rejected after being accepted"),
            Inconsistency::LeafRejected => write!(f, "leaf rejected after being accepted"),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
