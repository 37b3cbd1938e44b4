//! # Introduction
//!
//! Wisp is the front end of a small expression language: it reads a source
//! file line by line and builds an abstract syntax tree without a separate
//! tokenising pass. The tree can be printed or explored in a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Line Supplier → Comment Filter → Dispatcher ⇄ Builders → AST → Printer / TUI
//! ```
//!
//! 1. [`parser`] — pulls lines, scans literals and builds the AST.
//! 2. [`printer`] — the `Value/Kind` summary, the indented tree dump and a
//!    per-class node histogram.
//! 3. [`ui`] — ratatui-based AST viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use wisp::parser::ast::AstKind;
//! use wisp::parser::parse::parse_source;
//!
//! let root = parse_source("fn add(a int, b int) { a + b }").unwrap();
//! assert_eq!(root.children[0].kind, AstKind::Function);
//! ```

pub mod parser;
pub mod printer;
pub mod ui;
