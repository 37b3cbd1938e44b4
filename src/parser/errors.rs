//! Error types for the Wisp front end
//!
//! Every failure is fatal: the first [`ParseError`] raised anywhere in the
//! dispatcher or a builder travels unchanged up to the caller of
//! [`generate_ast`](crate::parser::parse::generate_ast). The numeric
//! [`ErrorCode`] doubles as the process exit code of the `wisp` binary.

use crate::parser::ast::SourceLocation;
use colored::Colorize;
use std::fmt;

/// Closed set of failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The source could not be opened or read
    SourceUnavailable,
    /// Digit outside the alphabet of a `0x`/`0b` literal
    InvalidDigit,
    /// Non-digit inside a float literal
    InvalidFloat,
    /// Character with no dispatch rule
    InvalidSymbol,
    /// String literal still open at end of line
    UnterminatedString,
    /// Operand of the wrong kind on either side of an operator
    InvalidOperand,
    /// `.` followed by something other than `& | ^ < >`
    InvalidBitwiseOperator,
    /// Operator with nothing after it
    MissingExpression,
    /// Bad function name, nested `fn`, or bad `::` syntax
    MalformedDeclaration,
    /// Block or group left open, or a malformed parameter
    UnterminatedConstruct,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::SourceUnavailable => 10,
            ErrorCode::InvalidDigit => 20,
            ErrorCode::InvalidFloat => 21,
            ErrorCode::InvalidSymbol => 22,
            ErrorCode::UnterminatedString => 23,
            ErrorCode::InvalidOperand => 24,
            ErrorCode::InvalidBitwiseOperator => 25,
            ErrorCode::MissingExpression => 26,
            ErrorCode::MalformedDeclaration => 27,
            ErrorCode::UnterminatedConstruct => 28,
        }
    }
}

/// Parser error type
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub code: ErrorCode,
    pub location: Option<SourceLocation>,
    pub source_line: Option<String>,
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            code,
            location: None,
            source_line: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_source(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    /// Numeric exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.code.code()
    }

    /// Multi-line diagnostic with the offending line and a caret under the
    /// failing column. Colours follow the `colored` global override.
    pub fn report(&self, path: &str) -> String {
        let mut out = format!(
            "{}: {}\n",
            format!("error[{}]", self.exit_code()).red().bold(),
            self.message.bold()
        );

        let Some(location) = self.location else {
            out.push_str(&format!("  {} {}\n", "-->".bright_blue(), path));
            return out;
        };

        out.push_str(&format!("  {} {}:{}\n", "-->".bright_blue(), path, location));

        if let Some(source) = &self.source_line {
            let gutter = format!("{:3}", location.line);
            out.push_str(&format!("   {}\n", "|".bright_blue()));
            out.push_str(&format!("{} {} {}\n", gutter.bright_blue(), "|".bright_blue(), source));
            out.push_str(&format!(
                "   {} {}{}\n",
                "|".bright_blue(),
                " ".repeat(location.column.saturating_sub(1)),
                "^".red().bold()
            ));
        }

        out
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_taxonomy() {
        let codes: Vec<i32> = [
            ErrorCode::SourceUnavailable,
            ErrorCode::InvalidDigit,
            ErrorCode::InvalidFloat,
            ErrorCode::InvalidSymbol,
            ErrorCode::UnterminatedString,
            ErrorCode::InvalidOperand,
            ErrorCode::InvalidBitwiseOperator,
            ErrorCode::MissingExpression,
            ErrorCode::MalformedDeclaration,
            ErrorCode::UnterminatedConstruct,
        ]
        .iter()
        .map(|c| c.code())
        .collect();

        assert_eq!(codes, vec![10, 20, 21, 22, 23, 24, 25, 26, 27, 28]);
    }

    #[test]
    fn test_display_is_message_only() {
        let err = ParseError::new(ErrorCode::InvalidSymbol, "Invalid symbol: `@`")
            .at(SourceLocation::new(3, 5))
            .with_source("x @ y");
        assert_eq!(err.to_string(), "Invalid symbol: `@`");
        assert_eq!(err.exit_code(), 22);
    }

    #[test]
    fn test_report_points_at_column() {
        colored::control::set_override(false);
        let err = ParseError::new(ErrorCode::InvalidSymbol, "Invalid symbol: `@`")
            .at(SourceLocation::new(3, 3))
            .with_source("x @ y");
        let report = err.report("main.wp");

        assert!(report.starts_with("error[22]: Invalid symbol: `@`"));
        assert!(report.contains("--> main.wp:3:3"));
        assert!(report.contains("  3 | x @ y"));
        assert!(report.contains("|   ^"));
    }
}
