use super::{
    dialect::Dialect,
    filter::{SqlFilter, condition::Condition, expr::SqlFilterExpr},
};
use crate::capabilities::Capabilities;
use model::{Filter, Operator, Value};
use tracing::trace;
use translator::{FilterTranslator, LeafTranslator, TranslateError, TranslatorConfig};

/// Escape character used in every generated `LIKE` pattern.
const LIKE_ESCAPE: char = '!';

/// Turns filter leaves into SQL predicates for one dialect.
pub struct SqlTranslator {
    dialect: Box<dyn Dialect>,
    capabilities: Capabilities,
    config: TranslatorConfig,
}

impl SqlTranslator {
    pub fn new(dialect: Box<dyn Dialect>, capabilities: Capabilities) -> Self {
        SqlTranslator {
            dialect,
            capabilities,
            config: TranslatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The filters to run, one statement each. Never empty: a filter that
    /// cannot be pushed down at all yields a single unfiltered entry.
    pub fn filters(&self, filter: Option<&Filter>) -> Result<Vec<SqlFilter>, TranslateError> {
        let queries = FilterTranslator::with_config(self, self.config).translate(filter)?;
        if queries.is_empty() {
            return Ok(vec![SqlFilter::new()]);
        }
        Ok(queries.into_iter().map(SqlFilter::with_expr).collect())
    }

    /// `SELECT` statements over `table`; their results must be unioned.
    pub fn select_statements(
        &self,
        table: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<String>, TranslateError> {
        let table = self.dialect.quote_identifier(table);
        Ok(self
            .filters(filter)?
            .iter()
            .map(|f| format!("SELECT * FROM {table}{}", f.to_sql()))
            .collect())
    }

    /// Renders a value as a SQL literal, or `None` if it has no literal form here.
    fn literal(&self, value: &Value) -> Option<String> {
        match value {
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) if v.is_finite() => Some(v.to_string()),
            Value::Float(_) => None,
            Value::String(s) => Some(self.dialect.quote_string(s)),
            Value::Boolean(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Value::Date(d) => Some(format!("DATE '{}'", d.format("%Y-%m-%d"))),
            Value::Timestamp(ts) => Some(format!(
                "TIMESTAMP '{}'",
                ts.format("%Y-%m-%d %H:%M:%S%.f")
            )),
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.literal(item))
                    .collect::<Option<Vec<_>>>()?;
                self.dialect.array_literal(&items)
            }
            Value::Null => None,
        }
    }

    fn like_condition(
        &self,
        column: &str,
        operator: Operator,
        pattern: &str,
        ignore_case: bool,
        negated: bool,
    ) -> Condition {
        let pattern = like_pattern(operator, pattern);
        let quoted = self.dialect.quote_string(&pattern);
        let not = if negated { "NOT " } else { "" };

        match (ignore_case, self.dialect.case_insensitive_like()) {
            (true, Some(ilike)) => Condition::binary(
                column,
                format!("{not}{ilike}"),
                format!("{quoted} ESCAPE '{LIKE_ESCAPE}'"),
            ),
            (true, None) => Condition::binary(
                format!("LOWER({column})"),
                format!("{not}LIKE"),
                format!("LOWER({quoted}) ESCAPE '{LIKE_ESCAPE}'"),
            ),
            (false, _) => Condition::binary(
                column,
                format!("{not}LIKE"),
                format!("{quoted} ESCAPE '{LIKE_ESCAPE}'"),
            ),
        }
    }
}

impl LeafTranslator for SqlTranslator {
    type Query = SqlFilterExpr;

    fn translate_leaf(&self, condition: &model::Condition, negated: bool) -> Option<SqlFilterExpr> {
        if !self.capabilities.supports_leaf(condition, negated) {
            trace!(%condition, negated, "leaf outside the capability table");
            return None;
        }

        let column = self.dialect.quote_identifier(condition.attribute());
        let operator = condition.operator();
        let predicate = match operator {
            Operator::Present => {
                let comparator = if negated { "IS NULL" } else { "IS NOT NULL" };
                return Some(SqlFilterExpr::leaf(Condition::unary(column, comparator)));
            }
            Operator::StartsWith | Operator::EndsWith | Operator::Contains => {
                let pattern = condition.value().as_str()?;
                self.like_condition(&column, operator, pattern, condition.ignore_case(), negated)
            }
            Operator::ContainsAll => {
                let value = self.literal(condition.value())?;
                let predicate = Condition::binary(column.clone(), "@>", value);
                if negated { predicate.negate() } else { predicate }
            }
            Operator::Equal
            | Operator::GreaterThan
            | Operator::GreaterOrEqual
            | Operator::LessThan
            | Operator::LessOrEqual => {
                let value = self.literal(condition.value())?;
                let comparator = comparison_operator(operator, negated)?;
                if condition.ignore_case() {
                    Condition::binary(
                        format!("LOWER({column})"),
                        comparator,
                        format!("LOWER({value})"),
                    )
                } else {
                    Condition::binary(column.clone(), comparator, value)
                }
            }
        };

        if !negated {
            return Some(SqlFilterExpr::leaf(predicate));
        }

        // a negated comparison also holds where the column is NULL, which
        // takes an OR; without one the bare predicate would lose those rows
        if !self.capabilities.or {
            trace!(%condition, "negated leaf needs OR for NULL rows, widening");
            return None;
        }
        Some(SqlFilterExpr::or(vec![
            SqlFilterExpr::leaf(predicate),
            SqlFilterExpr::leaf(Condition::unary(column, "IS NULL")),
        ]))
    }

    fn combine_and(&self, lhs: &SqlFilterExpr, rhs: &SqlFilterExpr) -> Option<SqlFilterExpr> {
        self.capabilities
            .and
            .then(|| SqlFilterExpr::and(vec![lhs.clone(), rhs.clone()]))
    }

    fn combine_or(&self, lhs: &SqlFilterExpr, rhs: &SqlFilterExpr) -> Option<SqlFilterExpr> {
        self.capabilities
            .or
            .then(|| SqlFilterExpr::or(vec![lhs.clone(), rhs.clone()]))
    }
}

/// Negation is folded into the comparator rather than wrapped in `NOT`.
/// `None` for operators that are not plain comparisons.
fn comparison_operator(operator: Operator, negated: bool) -> Option<&'static str> {
    let comparator = match (operator, negated) {
        (Operator::Equal, false) => "=",
        (Operator::Equal, true) => "!=",
        (Operator::GreaterThan, false) | (Operator::LessOrEqual, true) => ">",
        (Operator::GreaterThan, true) | (Operator::LessOrEqual, false) => "<=",
        (Operator::GreaterOrEqual, false) | (Operator::LessThan, true) => ">=",
        (Operator::GreaterOrEqual, true) | (Operator::LessThan, false) => "<",
        (
            Operator::StartsWith
            | Operator::EndsWith
            | Operator::Contains
            | Operator::ContainsAll
            | Operator::Present,
            _,
        ) => return None,
    };
    Some(comparator)
}

fn like_pattern(operator: Operator, raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }

    match operator {
        Operator::StartsWith => format!("{escaped}%"),
        Operator::EndsWith => format!("%{escaped}"),
        _ => format!("%{escaped}%"),
    }
}
