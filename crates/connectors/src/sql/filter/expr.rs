use super::condition::Condition;
use std::fmt;

/// A full boolean expression for SQL filtering
#[derive(Debug, Clone, PartialEq)]
pub enum SqlFilterExpr {
    /// A single leaf condition
    Leaf(Condition),

    /// An AND of 1+ sub-expressions
    /// (e.g. `WHERE a = 1 AND b = 2`)
    And(Vec<SqlFilterExpr>),

    /// An OR of 1+ sub-expressions
    /// (e.g. `WHERE a = 1 OR b = 2`)
    Or(Vec<SqlFilterExpr>),
}

impl SqlFilterExpr {
    pub fn leaf(cond: Condition) -> Self {
        SqlFilterExpr::Leaf(cond)
    }

    /// Nested ANDs are flattened into one list.
    pub fn and(exprs: Vec<SqlFilterExpr>) -> Self {
        let mut flat = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match expr {
                SqlFilterExpr::And(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        SqlFilterExpr::And(flat)
    }

    /// Nested ORs are flattened into one list.
    pub fn or(exprs: Vec<SqlFilterExpr>) -> Self {
        let mut flat = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match expr {
                SqlFilterExpr::Or(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        SqlFilterExpr::Or(flat)
    }

    /// Render this expression as SQL
    pub fn to_sql(&self) -> String {
        match self {
            SqlFilterExpr::Leaf(cond) => cond.to_sql_fragment(),
            SqlFilterExpr::And(exprs) => {
                let exprs = exprs.iter().map(SqlFilterExpr::to_sql).collect::<Vec<_>>();
                format!("({})", exprs.join(" AND "))
            }
            SqlFilterExpr::Or(exprs) => {
                let exprs = exprs.iter().map(SqlFilterExpr::to_sql).collect::<Vec<_>>();
                format!("({})", exprs.join(" OR "))
            }
        }
    }

    /// Return a deduplicated list of all columns referenced in this filter.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = match self {
            SqlFilterExpr::Leaf(cond) => vec![cond.column.clone()],
            SqlFilterExpr::And(exprs) | SqlFilterExpr::Or(exprs) => {
                exprs.iter().flat_map(|e| e.columns()).collect()
            }
        };
        columns.sort_unstable();
        columns.dedup();
        columns
    }
}

impl fmt::Display for SqlFilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}
