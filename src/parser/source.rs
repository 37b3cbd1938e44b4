//! Line suppliers
//!
//! The parser never sees a whole file. It pulls one physical line at a time
//! through [`LineSupplier`], both at the top level and whenever a block or
//! group runs out of characters before its closing delimiter.
//!
//! - [`TextLines`]: lines of an in-memory string
//! - [`ReaderLines`]: lines of any [`BufRead`] (an opened file, stdin)
//! - [`CommentFilter`]: decorator that drops blank lines and `//` comment lines

use crate::parser::errors::{ErrorCode, ParseError, ParseResult};
use std::collections::VecDeque;
use std::io::BufRead;

/// One physical source line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Synchronous pull-based source of raw lines.
pub trait LineSupplier {
    /// Returns `true` if [`advance`](LineSupplier::advance) would yield a line
    /// or a read error.
    fn has_next(&mut self) -> bool;

    /// Pulls the next raw line, or `None` at end of input.
    fn advance(&mut self) -> ParseResult<Option<SourceLine>>;
}

/// Lines of an in-memory source string.
pub struct TextLines {
    lines: VecDeque<SourceLine>,
}

impl TextLines {
    pub fn new(source: &str) -> Self {
        let lines = source
            .lines()
            .enumerate()
            .map(|(i, text)| SourceLine {
                number: i + 1,
                text: text.to_string(),
            })
            .collect();
        Self { lines }
    }
}

impl LineSupplier for TextLines {
    fn has_next(&mut self) -> bool {
        !self.lines.is_empty()
    }

    fn advance(&mut self) -> ParseResult<Option<SourceLine>> {
        Ok(self.lines.pop_front())
    }
}

/// Lines of a buffered reader. Read failures surface from `advance` as
/// [`ErrorCode::SourceUnavailable`].
pub struct ReaderLines<R: BufRead> {
    reader: R,
    number: usize,
    peeked: Option<ParseResult<SourceLine>>,
    finished: bool,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            number: 0,
            peeked: None,
            finished: false,
        }
    }

    fn read_line(&mut self) -> Option<ParseResult<SourceLine>> {
        if self.finished {
            return None;
        }

        let mut text = String::new();
        match self.reader.read_line(&mut text) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                while text.ends_with('\n') || text.ends_with('\r') {
                    text.pop();
                }
                self.number += 1;
                Some(Ok(SourceLine {
                    number: self.number,
                    text,
                }))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(ParseError::new(
                    ErrorCode::SourceUnavailable,
                    format!("Failed to read source: {}", e),
                )))
            }
        }
    }
}

impl<R: BufRead> LineSupplier for ReaderLines<R> {
    fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.read_line();
        }
        self.peeked.is_some()
    }

    fn advance(&mut self) -> ParseResult<Option<SourceLine>> {
        match self.peeked.take().or_else(|| self.read_line()) {
            Some(line) => line.map(Some),
            None => Ok(None),
        }
    }
}

/// Returns `true` for lines that never reach the parser: blank lines and
/// lines whose first non-blank characters are `//`.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("//")
}

/// Drops blank and whole-line comment lines from another supplier.
pub struct CommentFilter<S: LineSupplier> {
    inner: S,
    peeked: Option<ParseResult<SourceLine>>,
}

impl<S: LineSupplier> CommentFilter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, peeked: None }
    }

    fn next_kept(&mut self) -> Option<ParseResult<SourceLine>> {
        while self.inner.has_next() {
            match self.inner.advance() {
                Ok(Some(line)) if is_skippable(&line.text) => continue,
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

impl<S: LineSupplier> LineSupplier for CommentFilter<S> {
    fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.next_kept();
        }
        self.peeked.is_some()
    }

    fn advance(&mut self) -> ParseResult<Option<SourceLine>> {
        match self.peeked.take().or_else(|| self.next_kept()) {
            Some(line) => line.map(Some),
            None => Ok(None),
        }
    }
}
