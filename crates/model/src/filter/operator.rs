use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Comparison operators a filter leaf can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "eq")]
    Equal,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "ge")]
    GreaterOrEqual,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "le")]
    LessOrEqual,
    #[serde(rename = "sw")]
    StartsWith,
    #[serde(rename = "ew")]
    EndsWith,
    #[serde(rename = "co")]
    Contains,
    /// Multi-valued attribute holds every element of the array operand.
    #[serde(rename = "ca")]
    ContainsAll,
    /// Attribute is present with a non-null value. Takes no operand.
    #[serde(rename = "pr")]
    Present,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Equal,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Contains,
        Operator::ContainsAll,
        Operator::Present,
    ];

    /// The two-letter tag used by the filter text syntax.
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Equal => "eq",
            Operator::GreaterThan => "gt",
            Operator::GreaterOrEqual => "ge",
            Operator::LessThan => "lt",
            Operator::LessOrEqual => "le",
            Operator::StartsWith => "sw",
            Operator::EndsWith => "ew",
            Operator::Contains => "co",
            Operator::ContainsAll => "ca",
            Operator::Present => "pr",
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::GreaterOrEqual
                | Operator::LessThan
                | Operator::LessOrEqual
        )
    }

    /// Prefix, suffix and substring matches.
    pub fn is_substring(&self) -> bool {
        matches!(
            self,
            Operator::StartsWith | Operator::EndsWith | Operator::Contains
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unsupported operator: {s}"))
    }
}
