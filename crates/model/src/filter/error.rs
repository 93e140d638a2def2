use super::operator::Operator;
use thiserror::Error;

/// A leaf whose operand does not fit its operator. Raised while the filter is
/// being built, never during translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Filter attribute name must not be empty")]
    EmptyAttribute,

    #[error("Operator '{operator}' on attribute '{attribute}' expects {expected}, found {found}")]
    ValueMismatch {
        attribute: String,
        operator: Operator,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Operator 'ca' on attribute '{0}' needs at least one element")]
    EmptyContainsAll(String),
}
