use super::{error::FilterError, operator::Operator};
use crate::core::value::Value;
use serde::Serialize;
use std::fmt;

/// A single `attribute operator value` comparison.
///
/// Fields are private so every condition in a filter tree has passed
/// [`Condition::new`]'s operand check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Condition {
    attribute: String,
    operator: Operator,
    value: Value,
    ignore_case: bool,
}

impl Condition {
    pub fn new(
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Self, FilterError> {
        let attribute = attribute.into();
        let value = value.into();
        validate(&attribute, operator, &value)?;

        Ok(Condition {
            attribute,
            operator,
            value,
            ignore_case: false,
        })
    }

    pub fn present(attribute: impl Into<String>) -> Result<Self, FilterError> {
        Self::new(attribute, Operator::Present, Value::Null)
    }

    /// Match string operands without regard to case. Has no effect on
    /// non-string operands.
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = matches!(self.value, Value::String(_));
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }
}

fn validate(attribute: &str, operator: Operator, value: &Value) -> Result<(), FilterError> {
    if attribute.trim().is_empty() {
        return Err(FilterError::EmptyAttribute);
    }

    let mismatch = |expected: &'static str| FilterError::ValueMismatch {
        attribute: attribute.to_string(),
        operator,
        expected,
        found: value.kind(),
    };

    match operator {
        Operator::Equal if matches!(value, Value::Null | Value::Array(_)) => {
            Err(mismatch("a scalar value"))
        }
        op if op.is_ordering() && !value.is_orderable() => Err(mismatch("an orderable value")),
        op if op.is_substring() && !matches!(value, Value::String(_)) => {
            Err(mismatch("a string value"))
        }
        Operator::ContainsAll => match value {
            Value::Array(items) if items.is_empty() => {
                Err(FilterError::EmptyContainsAll(attribute.to_string()))
            }
            Value::Array(_) => Ok(()),
            _ => Err(mismatch("an array value")),
        },
        Operator::Present if !value.is_null() => Err(mismatch("no value")),
        _ => Ok(()),
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == Operator::Present {
            return write!(f, "{} pr", self.attribute);
        }
        let suffix = if self.ignore_case { "i" } else { "" };
        write!(
            f,
            "{} {}{} {}",
            self.attribute, self.operator, suffix, self.value
        )
    }
}
