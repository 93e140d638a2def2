use std::fmt;

/// A single rendered column predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub comparator: String,
    pub value: Option<String>,
    /// Wrap the whole predicate in `NOT (...)`.
    pub negated: bool,
}

impl Condition {
    pub fn binary(
        column: impl Into<String>,
        comparator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Condition {
            column: column.into(),
            comparator: comparator.into(),
            value: Some(value.into()),
            negated: false,
        }
    }

    /// A predicate without operand, e.g. `col IS NULL`.
    pub fn unary(column: impl Into<String>, comparator: impl Into<String>) -> Self {
        Condition {
            column: column.into(),
            comparator: comparator.into(),
            value: None,
            negated: false,
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Render just this one condition as SQL
    pub fn to_sql_fragment(&self) -> String {
        let body = match &self.value {
            Some(value) => format!("{} {} {}", self.column, self.comparator, value),
            None => format!("{} {}", self.column, self.comparator),
        };
        if self.negated {
            format!("NOT ({body})")
        } else {
            body
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql_fragment())
    }
}
