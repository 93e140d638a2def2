use crate::parser::Rule;
use model::FilterError;
use pest::error::{Error as PestError, LineColLocation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
        source_snippet: String,
    },

    #[error("Invalid {kind} literal `{literal}` at line {line}, column {column}: {reason}")]
    InvalidLiteral {
        kind: &'static str,
        literal: String,
        reason: String,
        line: usize,
        column: usize,
    },

    #[error("Malformed condition at line {line}, column {column}: {source}")]
    Malformed {
        line: usize,
        column: usize,
        source: FilterError,
    },

    #[error("Expected {expected} at line {line}, column {column}")]
    Unexpected {
        expected: &'static str,
        line: usize,
        column: usize,
    },
}

impl SyntaxError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        SyntaxError::Parse {
            message: err.variant.message().to_string(),
            line,
            column,
            source_snippet: err.line().to_string(),
        }
    }

    /// Where in the input the error was detected.
    pub fn position(&self) -> (usize, usize) {
        match self {
            SyntaxError::Parse { line, column, .. }
            | SyntaxError::InvalidLiteral { line, column, .. }
            | SyntaxError::Malformed { line, column, .. }
            | SyntaxError::Unexpected { line, column, .. } => (*line, *column),
        }
    }

    /// Format error with a caret under the offending column.
    pub fn format_error(&self) -> String {
        match self {
            SyntaxError::Parse {
                message,
                line,
                column,
                source_snippet,
            } => {
                format!(
                    "Parse error at line {}, column {}:\n{}\n{}^\n{}",
                    line,
                    column,
                    source_snippet,
                    " ".repeat(column.saturating_sub(1)),
                    message
                )
            }
            _ => self.to_string(),
        }
    }
}
