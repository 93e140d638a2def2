//! Defines the `Dialect` trait for database-specific SQL syntax.

use crate::error::ConnectorError;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier in the correct quotation marks for the dialect.
    /// Dotted names are quoted segment by segment.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Renders a string literal, escaping whatever the dialect requires.
    fn quote_string(&self, raw: &str) -> String;

    /// The case-insensitive `LIKE` keyword, if the dialect has one.
    fn case_insensitive_like(&self) -> Option<&'static str>;

    /// Renders an array literal from already rendered elements.
    fn array_literal(&self, items: &[String]) -> Option<String>;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> &'static str;
}

/// Resolves a dialect from a user-facing name.
pub fn dialect_for(name: &str) -> Result<Box<dyn Dialect>, ConnectorError> {
    match name.to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" | "pg" => Ok(Box::new(Postgres)),
        "mysql" | "mariadb" => Ok(Box::new(MySql)),
        other => Err(ConnectorError::UnsupportedDialect(other.to_string())),
    }
}

fn quote_segments(ident: &str, quote: char) -> String {
    let doubled = format!("{quote}{quote}");
    ident
        .split('.')
        .map(|segment| format!("{quote}{}{quote}", segment.replace(quote, &doubled)))
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_segments(ident, '"')
    }

    fn quote_string(&self, raw: &str) -> String {
        format!("'{}'", raw.replace('\'', "''"))
    }

    fn case_insensitive_like(&self) -> Option<&'static str> {
        Some("ILIKE")
    }

    fn array_literal(&self, items: &[String]) -> Option<String> {
        Some(format!("ARRAY[{}]", items.join(", ")))
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_segments(ident, '`')
    }

    fn quote_string(&self, raw: &str) -> String {
        // backslash is an escape character inside MySQL string literals
        format!("'{}'", raw.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn case_insensitive_like(&self) -> Option<&'static str> {
        None
    }

    fn array_literal(&self, _items: &[String]) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }
}
