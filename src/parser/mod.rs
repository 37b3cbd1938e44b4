//! Wisp source parser
//!
//! This module turns Wisp source lines into an Abstract Syntax Tree (AST) in
//! a single pass. There is no separate token stream: the dispatcher reads
//! characters straight off the current line.
//! - [`source`]: line suppliers and the comment/blank-line filter
//! - [`parse`]: the [`Parser`](parse::Parser) and the entry points
//! - [`ast`]: AST node definitions
//! - [`errors`]: error codes and diagnostics
//!
//! # Supported Wisp Subset
//!
//! - Literals: identifiers, decimal/hex/binary integers, floats, strings
//! - Keywords: `true`, `false`, `nil`, `fn`
//! - Operators: arithmetic, `.`-prefixed bitwise, comparisons, assignment,
//!   `!`, `!=`, postfix `++`/`--`, `::` type-of and type cast
//! - Structures: function declarations, `{}` blocks, `()` groups, calls
//! - Whole-line `//` comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent. Operators apply strictly left to right with
//! no precedence; the first error aborts the whole parse.

pub mod ast;
pub mod errors;
mod expressions;
mod operators;
pub mod parse;
pub mod source;
mod structures;
