use expr::SqlFilterExpr;

pub mod condition;
pub mod expr;

/// One pushed-down SQL filter; an empty one selects every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFilter {
    pub expr: Option<SqlFilterExpr>,
}

impl SqlFilter {
    pub fn new() -> Self {
        SqlFilter { expr: None }
    }

    pub fn with_expr(expr: SqlFilterExpr) -> Self {
        SqlFilter { expr: Some(expr) }
    }

    /// Render "WHERE ..." or empty string if no expr.
    pub fn to_sql(&self) -> String {
        self.expr
            .as_ref()
            .map(|e| format!(" WHERE {}", e.to_sql()))
            .unwrap_or_default()
    }

    pub fn columns(&self) -> Vec<String> {
        self.expr.as_ref().map(|e| e.columns()).unwrap_or_default()
    }
}
