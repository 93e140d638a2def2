use model::{Condition, Operator};
use serde::{Deserialize, Serialize};

/// What a backend can evaluate natively. Read once and never changed.
///
/// ```toml
/// operators = ["eq", "gt", "sw"]
/// negation = true
/// and = true
/// or = false
/// ignore_case = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub operators: Vec<Operator>,
    pub negation: bool,
    pub and: bool,
    pub or: bool,
    pub ignore_case: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            operators: Operator::ALL.to_vec(),
            negation: true,
            and: true,
            or: true,
            ignore_case: true,
        }
    }
}

impl Capabilities {
    /// Only the listed operators, every combinator.
    pub fn with_operators(operators: impl IntoIterator<Item = Operator>) -> Self {
        Capabilities {
            operators: operators.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    /// Whether a leaf passes the table. Connectors may still refuse a leaf
    /// for reasons of their own, e.g. a value they cannot encode.
    pub fn supports_leaf(&self, condition: &Condition, negated: bool) -> bool {
        self.supports(condition.operator())
            && (!negated || self.negation)
            && (!condition.ignore_case() || self.ignore_case)
    }
}
