//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the line cursor, the structural context stack, error construction helpers,
//! and the top-level entry points [`generate_ast`] and [`parse_source`].
//!
//! # Parser Architecture
//!
//! Lexing and parsing happen in one pass over the current line:
//! - This module: Parser struct, cursor helpers, and the top-level driver
//! - `expressions`: the character dispatcher and literal scanning
//! - `operators`: infix, postfix, comparison, `!` and `::` builders
//! - `structures`: function declarations, blocks, groups and calls
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::errors::{ErrorCode, ParseError, ParseResult};
use crate::parser::source::{CommentFilter, LineSupplier, TextLines};

/// Structural construct currently open. An empty stack means none is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Function,
    Block,
    Group,
}

/// How many top-level expressions a dispatcher call may still produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Unbounded,
    Limited(usize),
}

impl Budget {
    pub fn is_spent(self) -> bool {
        self == Budget::Limited(0)
    }

    pub fn spend(&mut self) {
        if let Budget::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Single-pass scanner/parser over a [`LineSupplier`]
pub struct Parser<S: LineSupplier> {
    pub(crate) lines: S,
    pub(crate) line: Vec<char>,
    pub(crate) line_number: usize,
    pub(crate) position: usize,
    pub(crate) contexts: Vec<Context>,
}

/// Parse every line `lines` supplies into a `Root` node.
pub fn generate_ast<S: LineSupplier>(lines: S) -> ParseResult<AstNode> {
    Parser::new(lines).parse_program()
}

/// Parse an in-memory source, skipping blank and `//` comment lines.
pub fn parse_source(source: &str) -> ParseResult<AstNode> {
    generate_ast(CommentFilter::new(TextLines::new(source)))
}

impl<S: LineSupplier> Parser<S> {
    pub fn new(lines: S) -> Self {
        Self {
            lines,
            line: Vec::new(),
            line_number: 0,
            position: 0,
            contexts: Vec::new(),
        }
    }

    /// Parse the entire input. Each line is dispatched with an unbounded
    /// budget and its nodes become children of the root.
    pub fn parse_program(&mut self) -> ParseResult<AstNode> {
        let mut root = AstNode::new(AstKind::Root, SourceLocation::new(1, 1));

        while self.next_line()? {
            let nodes = self.parse_expressions(Budget::Unbounded)?;
            root.children.extend(nodes);
        }

        Ok(root)
    }

    // ===== Context stack =====

    pub(crate) fn context(&self) -> Option<Context> {
        self.contexts.last().copied()
    }

    pub(crate) fn in_context(&self, context: Context) -> bool {
        self.contexts.contains(&context)
    }

    /// Run `f` with `context` pushed; the frame is popped on every exit path.
    pub(crate) fn with_context<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.contexts.push(context);
        let result = f(self);
        self.contexts.pop();
        result
    }

    // ===== Line cursor =====

    /// Load the next supplied line. Returns `false` at end of input.
    pub(crate) fn next_line(&mut self) -> ParseResult<bool> {
        if !self.lines.has_next() {
            return Ok(false);
        }

        match self.lines.advance()? {
            Some(line) => {
                self.line = line.text.chars().collect();
                self.line_number = line.number;
                self.position = 0;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Skip whitespace, pulling further lines while the current one is
    /// exhausted. `eof_message` is raised if the input ends first.
    pub(crate) fn skip_to_token(&mut self, eof_message: &str) -> ParseResult<()> {
        loop {
            self.skip_whitespace();
            if !self.is_at_line_end() {
                return Ok(());
            }
            if !self.next_line()? {
                return Err(self.error(ErrorCode::UnterminatedConstruct, eof_message));
            }
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.position += 1;
        }
    }

    pub(crate) fn is_at_line_end(&self) -> bool {
        self.position >= self.line.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.line.get(self.position).copied()
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<char> {
        self.line.get(self.position + n).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Consume `expected` if it is the next character.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line_number, self.position + 1)
    }

    // ===== Errors =====

    /// Build an error located at the cursor, carrying the current line.
    pub(crate) fn error(&self, code: ErrorCode, message: impl Into<String>) -> ParseError {
        self.error_at(code, message, self.current_location())
    }

    pub(crate) fn error_at(
        &self,
        code: ErrorCode,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> ParseError {
        let source: String = self.line.iter().collect();
        ParseError::new(code, message).at(location).with_source(source)
    }
}
