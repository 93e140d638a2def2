use crate::{
    error::SyntaxError,
    parser::{FilterParser, Rule},
};
use chrono::{DateTime, NaiveDate, Utc};
use model::{Condition, Filter, Operator, Value};
use pest::{
    Parser,
    iterators::{Pair, Pairs},
};
use tracing::debug;

pub type BuildResult<T> = Result<T, SyntaxError>;

/// Parse filter text into a validated [`Filter`].
pub fn parse(input: &str) -> BuildResult<Filter> {
    let mut pairs =
        FilterParser::parse(Rule::filter, input).map_err(SyntaxError::from_pest_error)?;
    let filter = pairs.next().ok_or(SyntaxError::Unexpected {
        expected: "a filter",
        line: 1,
        column: 1,
    })?;

    let expr = next_inner(&mut filter.into_inner(), "an expression", (1, 1))?;
    let built = build_or(expr)?;
    debug!(filter = %built, depth = built.depth(), "parsed filter");
    Ok(built)
}

/// Like [`parse`], but blank input means "no filter".
pub fn parse_optional(input: &str) -> BuildResult<Option<Filter>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse(input).map(Some)
}

fn next_inner<'i>(
    pairs: &mut Pairs<'i, Rule>,
    expected: &'static str,
    (line, column): (usize, usize),
) -> BuildResult<Pair<'i, Rule>> {
    pairs.next().ok_or(SyntaxError::Unexpected {
        expected,
        line,
        column,
    })
}

fn build_or(pair: Pair<Rule>) -> BuildResult<Filter> {
    let operands = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::and_expr)
        .map(build_and)
        .collect::<BuildResult<Vec<_>>>()?;
    Filter::or_all(operands).ok_or(SyntaxError::Unexpected {
        expected: "an operand",
        line: 1,
        column: 1,
    })
}

fn build_and(pair: Pair<Rule>) -> BuildResult<Filter> {
    let position = pair.line_col();
    let operands = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::not_expr)
        .map(build_not)
        .collect::<BuildResult<Vec<_>>>()?;
    Filter::and_all(operands).ok_or(SyntaxError::Unexpected {
        expected: "an operand",
        line: position.0,
        column: position.1,
    })
}

fn build_not(pair: Pair<Rule>) -> BuildResult<Filter> {
    let position = pair.line_col();
    let inner = next_inner(&mut pair.into_inner(), "an operand", position)?;

    match inner.as_rule() {
        Rule::negation => {
            let position = inner.line_col();
            let operand = inner
                .into_inner()
                .find(|p| p.as_rule() == Rule::not_expr)
                .ok_or(SyntaxError::Unexpected {
                    expected: "an operand after `not`",
                    line: position.0,
                    column: position.1,
                })?;
            Ok(Filter::not(build_not(operand)?))
        }
        Rule::or_expr => build_or(inner),
        Rule::presence => build_presence(inner),
        Rule::comparison => build_comparison(inner),
        _ => Err(unexpected(&inner, "a comparison or a parenthesized filter")),
    }
}

fn build_presence(pair: Pair<Rule>) -> BuildResult<Filter> {
    let position = pair.line_col();
    let attribute = next_inner(&mut pair.into_inner(), "an attribute", position)?;
    Condition::present(attribute.as_str())
        .map(Filter::leaf)
        .map_err(|source| SyntaxError::Malformed {
            line: position.0,
            column: position.1,
            source,
        })
}

fn build_comparison(pair: Pair<Rule>) -> BuildResult<Filter> {
    let position = pair.line_col();
    let mut inner = pair.into_inner();
    let attribute = next_inner(&mut inner, "an attribute", position)?;
    let comparator = next_inner(&mut inner, "a comparator", position)?;
    let value = build_value(next_inner(&mut inner, "a value", position)?)?;

    let tag = comparator.as_str().to_ascii_lowercase();
    let (tag, ignore_case) = match tag.strip_suffix('i') {
        Some(stripped) if stripped.len() == 2 => (stripped.to_string(), true),
        _ => (tag, false),
    };

    // `ne` is shorthand for a negated `eq`
    let (operator, negated) = match tag.as_str() {
        "ne" => (Operator::Equal, true),
        other => (
            other
                .parse::<Operator>()
                .map_err(|_| unexpected(&comparator, "a comparator"))?,
            false,
        ),
    };

    let mut condition = Condition::new(attribute.as_str(), operator, value).map_err(|source| {
        SyntaxError::Malformed {
            line: position.0,
            column: position.1,
            source,
        }
    })?;
    if ignore_case {
        condition = condition.ignoring_case();
    }

    let leaf = Filter::leaf(condition);
    Ok(if negated { Filter::not(leaf) } else { leaf })
}

fn build_value(pair: Pair<Rule>) -> BuildResult<Value> {
    match pair.as_rule() {
        Rule::array => pair
            .into_inner()
            .map(build_value)
            .collect::<BuildResult<Vec<_>>>()
            .map(Value::Array),
        Rule::string => Ok(Value::String(string_content(pair)?)),
        Rule::date => {
            let (line, column) = pair.line_col();
            let quoted = next_inner(&mut pair.into_inner(), "a string", (line, column))?;
            let literal = string_content(quoted)?;
            NaiveDate::parse_from_str(&literal, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| SyntaxError::InvalidLiteral {
                    kind: "date",
                    literal,
                    reason: e.to_string(),
                    line,
                    column,
                })
        }
        Rule::timestamp => {
            let (line, column) = pair.line_col();
            let quoted = next_inner(&mut pair.into_inner(), "a string", (line, column))?;
            let literal = string_content(quoted)?;
            DateTime::parse_from_rfc3339(&literal)
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|e| SyntaxError::InvalidLiteral {
                    kind: "timestamp",
                    literal,
                    reason: e.to_string(),
                    line,
                    column,
                })
        }
        Rule::float => parse_number(&pair, "float").map(Value::Float),
        Rule::integer => parse_number(&pair, "integer").map(Value::Int),
        Rule::boolean => Ok(Value::Boolean(pair.as_str().eq_ignore_ascii_case("true"))),
        Rule::null => Ok(Value::Null),
        _ => Err(unexpected(&pair, "a value")),
    }
}

fn parse_number<T>(pair: &Pair<Rule>, kind: &'static str) -> BuildResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    pair.as_str().parse::<T>().map_err(|e| {
        let (line, column) = pair.line_col();
        SyntaxError::InvalidLiteral {
            kind,
            literal: pair.as_str().to_string(),
            reason: e.to_string(),
            line,
            column,
        }
    })
}

/// The unescaped content of a `string` pair.
fn string_content(pair: Pair<Rule>) -> BuildResult<String> {
    let position = pair.line_col();
    let chars = next_inner(&mut pair.into_inner(), "string content", position)?;
    Ok(unescape(chars.as_str()))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn unexpected(pair: &Pair<Rule>, expected: &'static str) -> SyntaxError {
    let (line, column) = pair.line_col();
    SyntaxError::Unexpected {
        expected,
        line,
        column,
    }
}
