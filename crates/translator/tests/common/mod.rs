#![allow(dead_code)]

use model::{Condition, Filter, Operator};
use translator::LeafTranslator;

/// Test backend whose queries are readable strings.
///
/// Leaves render as `attr=value`, negated ones with a leading `!`.
/// Native AND and OR render as `(l AND r)` and `(l OR r)` when enabled.
#[derive(Debug, Clone)]
pub struct StringBackend {
    pub operators: Vec<Operator>,
    pub negation: bool,
    pub and: bool,
    pub or: bool,
}

impl StringBackend {
    pub fn full() -> Self {
        StringBackend {
            operators: Operator::ALL.to_vec(),
            negation: true,
            and: true,
            or: true,
        }
    }

    pub fn equality_only() -> Self {
        StringBackend {
            operators: vec![Operator::Equal],
            ..Self::full()
        }
    }

    pub fn without_and(mut self) -> Self {
        self.and = false;
        self
    }

    pub fn without_or(mut self) -> Self {
        self.or = false;
        self
    }

    pub fn without_negation(mut self) -> Self {
        self.negation = false;
        self
    }
}

impl LeafTranslator for StringBackend {
    type Query = String;

    fn translate_leaf(&self, condition: &Condition, negated: bool) -> Option<String> {
        if !self.operators.contains(&condition.operator()) || (negated && !self.negation) {
            return None;
        }
        let symbol = match condition.operator() {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::StartsWith => " sw ",
            Operator::EndsWith => " ew ",
            Operator::Contains => " co ",
            Operator::ContainsAll => " ca ",
            Operator::Present => return Some(format!("{}{}?", bang(negated), condition.attribute())),
        };
        Some(format!(
            "{}{}{}{}",
            bang(negated),
            condition.attribute(),
            symbol,
            condition.value()
        ))
    }

    fn combine_and(&self, lhs: &String, rhs: &String) -> Option<String> {
        self.and.then(|| format!("({lhs} AND {rhs})"))
    }

    fn combine_or(&self, lhs: &String, rhs: &String) -> Option<String> {
        self.or.then(|| format!("({lhs} OR {rhs})"))
    }
}

fn bang(negated: bool) -> &'static str {
    if negated { "!" } else { "" }
}

/// Refuses every leaf.
pub struct NothingBackend;

impl LeafTranslator for NothingBackend {
    type Query = String;

    fn translate_leaf(&self, _condition: &Condition, _negated: bool) -> Option<String> {
        None
    }
}

pub fn eq(attribute: &str, value: impl Into<model::Value>) -> Filter {
    Filter::equal(attribute, value).unwrap()
}

pub fn gt(attribute: &str, value: i64) -> Filter {
    Filter::greater_than(attribute, value).unwrap()
}
