use crate::core::value::Value;
use condition::Condition;
use error::FilterError;
use operator::Operator;
use serde::Serialize;
use std::fmt;

pub mod condition;
pub mod error;
pub mod eval;
pub mod operator;

/// A boolean filter tree over attribute comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Leaf(Condition),
    Not(Box<Filter>),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn leaf(condition: Condition) -> Self {
        Filter::Leaf(condition)
    }

    pub fn and(lhs: Filter, rhs: Filter) -> Self {
        Filter::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Filter, rhs: Filter) -> Self {
        Filter::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn not(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Chains any number of filters with AND, left to right.
    /// Returns `None` for an empty input.
    pub fn and_all(filters: impl IntoIterator<Item = Filter>) -> Option<Filter> {
        filters.into_iter().reduce(Filter::and)
    }

    /// Chains any number of filters with OR, left to right.
    /// Returns `None` for an empty input.
    pub fn or_all(filters: impl IntoIterator<Item = Filter>) -> Option<Filter> {
        filters.into_iter().reduce(Filter::or)
    }

    pub fn compare(
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Condition::new(attribute, operator, value).map(Filter::Leaf)
    }

    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::Equal, value)
    }

    pub fn greater_than(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::GreaterThan, value)
    }

    pub fn greater_or_equal(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::GreaterOrEqual, value)
    }

    pub fn less_than(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::LessThan, value)
    }

    pub fn less_or_equal(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::LessOrEqual, value)
    }

    pub fn starts_with(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::StartsWith, value)
    }

    pub fn ends_with(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::EndsWith, value)
    }

    pub fn contains(
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::Contains, value)
    }

    pub fn contains_all(
        attribute: impl Into<String>,
        values: impl Into<Value>,
    ) -> Result<Filter, FilterError> {
        Self::compare(attribute, Operator::ContainsAll, values)
    }

    pub fn present(attribute: impl Into<String>) -> Result<Filter, FilterError> {
        Condition::present(attribute).map(Filter::Leaf)
    }

    /// The condition of a `Leaf`, or of a `Not` directly above a leaf, with
    /// the negation flag.
    pub fn as_literal(&self) -> Option<(&Condition, bool)> {
        match self {
            Filter::Leaf(cond) => Some((cond, false)),
            Filter::Not(inner) => match inner.as_ref() {
                Filter::Leaf(cond) => Some((cond, true)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Filter::Leaf(_) => 1,
            Filter::Not(inner) => 1 + inner.depth(),
            Filter::And(l, r) | Filter::Or(l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// Every condition in the tree, left to right.
    pub fn conditions(&self) -> Vec<&Condition> {
        match self {
            Filter::Leaf(cond) => vec![cond],
            Filter::Not(inner) => inner.conditions(),
            Filter::And(l, r) | Filter::Or(l, r) => {
                let mut conds = l.conditions();
                conds.extend(r.conditions());
                conds
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Filter::Or(..) => 0,
            Filter::And(..) => 1,
            Filter::Not(_) | Filter::Leaf(_) => 2,
        }
    }
}

impl From<Condition> for Filter {
    fn from(condition: Condition) -> Self {
        Filter::Leaf(condition)
    }
}

/// Renders the filter in its text syntax. AND and OR chains are
/// left-associative, so a right operand of the same kind is parenthesized.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(f: &mut fmt::Formatter<'_>, child: &Filter, min: u8) -> fmt::Result {
            if child.precedence() < min {
                write!(f, "({child})")
            } else {
                write!(f, "{child}")
            }
        }

        match self {
            Filter::Leaf(cond) => write!(f, "{cond}"),
            Filter::Not(inner) => {
                write!(f, "not ")?;
                operand(f, inner, 2)
            }
            Filter::And(l, r) => {
                operand(f, l, 1)?;
                write!(f, " and ")?;
                operand(f, r, 2)
            }
            Filter::Or(l, r) => {
                operand(f, l, 0)?;
                write!(f, " or ")?;
                operand(f, r, 1)
            }
        }
    }
}
