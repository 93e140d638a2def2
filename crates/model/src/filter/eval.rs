use super::{Filter, condition::Condition, operator::Operator};
use crate::{core::value::Value, records::record::Record};
use std::cmp::Ordering;

impl Filter {
    /// Evaluates the filter against one in-memory record.
    ///
    /// Callers re-apply the original filter this way when a pushed-down query
    /// fell back to fetching everything for some part of the tree.
    pub fn accept(&self, record: &Record) -> bool {
        match self {
            Filter::Leaf(cond) => cond.matches(record),
            Filter::Not(inner) => !inner.accept(record),
            Filter::And(l, r) => l.accept(record) && r.accept(record),
            Filter::Or(l, r) => l.accept(record) || r.accept(record),
        }
    }
}

impl Condition {
    /// A missing or null attribute matches nothing. A multi-valued attribute
    /// matches if any element does, except for `ca` which needs all operand
    /// elements to be present.
    pub fn matches(&self, record: &Record) -> bool {
        let actual = match record.get(self.attribute()) {
            Some(Value::Null) | None => return false,
            Some(v) => v,
        };

        match (self.operator(), actual) {
            (Operator::Present, Value::Array(items)) => !items.is_empty(),
            (Operator::Present, _) => true,
            (Operator::ContainsAll, actual) => self.contains_all(actual),
            (_, Value::Array(items)) => items.iter().any(|item| self.test(item)),
            (_, scalar) => self.test(scalar),
        }
    }

    fn test(&self, actual: &Value) -> bool {
        let target = self.value();
        match self.operator() {
            Operator::Equal if self.ignore_case() => actual.equal_ignore_case(target),
            Operator::Equal => actual.equal(target),
            Operator::GreaterThan => matches!(actual.compare(target), Some(Ordering::Greater)),
            Operator::GreaterOrEqual => matches!(
                actual.compare(target),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            ),
            Operator::LessThan => matches!(actual.compare(target), Some(Ordering::Less)),
            Operator::LessOrEqual => matches!(
                actual.compare(target),
                Some(Ordering::Less) | Some(Ordering::Equal)
            ),
            Operator::StartsWith | Operator::EndsWith | Operator::Contains => {
                self.test_substring(actual)
            }
            Operator::ContainsAll => self.contains_all(actual),
            Operator::Present => !actual.is_null(),
        }
    }

    fn test_substring(&self, actual: &Value) -> bool {
        let (Some(actual), Some(pattern)) = (actual.as_str(), self.value().as_str()) else {
            return false;
        };

        let (actual, pattern) = if self.ignore_case() {
            (actual.to_lowercase(), pattern.to_lowercase())
        } else {
            (actual.to_string(), pattern.to_string())
        };

        match self.operator() {
            Operator::StartsWith => actual.starts_with(&pattern),
            Operator::EndsWith => actual.ends_with(&pattern),
            _ => actual.contains(&pattern),
        }
    }

    fn contains_all(&self, actual: &Value) -> bool {
        let Value::Array(wanted) = self.value() else {
            return false;
        };
        match actual {
            Value::Array(items) => wanted
                .iter()
                .all(|w| items.iter().any(|item| item.equal(w))),
            scalar => wanted.iter().all(|w| scalar.equal(w)),
        }
    }
}
