//! Expression dispatching and literal scanning
//!
//! [`Parser::parse_expressions`] is the heart of the front end: it looks at
//! the next character of the current line, scans a literal or identifier
//! itself, or hands over to one of the builders in `operators` and
//! `structures`. Builders call back into it for their operands, so the two
//! recurse into each other until the line is used up.
//!
//! # Literals
//!
//! ```text
//! identifier ::= letter+
//! int        ::= digit+
//! float      ::= digit+ "." digit+
//! hex        ::= "0x" [0-9a-fA-F]*
//! binary     ::= "0b" [01]*
//! string     ::= quote any* quote      (any of ' " ` closes any other)
//! ```
//!
//! A digit run that meets a letter (other than the `0x`/`0b` prefixes)
//! becomes an identifier.

use crate::parser::ast::*;
use crate::parser::errors::{ErrorCode, ParseError, ParseResult};
use crate::parser::parse::{Budget, Context, Parser};
use crate::parser::source::LineSupplier;

pub(crate) fn is_quote(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '`')
}

pub(crate) fn is_arithmetic_symbol(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '%' | '^')
}

/// Second character of a `.`-prefixed bitwise operator.
pub(crate) fn is_bitwise_suffix(ch: char) -> bool {
    matches!(ch, '&' | '|' | '^' | '<' | '>')
}

impl<S: LineSupplier> Parser<S> {
    /// Dispatch characters from the cursor until `budget` expressions have been
    /// produced, the line ends, or a delimiter closing the innermost construct
    /// is reached. The closing delimiter is left unconsumed for the builder
    /// that owns it.
    pub(crate) fn parse_expressions(&mut self, mut budget: Budget) -> ParseResult<Vec<AstNode>> {
        let mut nodes: Vec<AstNode> = Vec::new();

        while !budget.is_spent() {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                break;
            };

            if self.closes_construct(ch) {
                break;
            }

            let node = match ch {
                c if c.is_alphabetic() => self.parse_word()?,
                c if c.is_ascii_digit() => self.parse_number()?,
                c if is_quote(c) => self.parse_string()?,
                '+' | '-' | '*' | '/' | '%' | '^' | '.' => self.parse_operator(&mut nodes)?,
                '=' | '<' | '>' => self.parse_equality(&mut nodes)?,
                '!' => self.parse_not(&mut nodes)?,
                ':' => self.parse_type_op(&mut nodes)?,
                '{' => self.parse_block()?,
                '(' => self.parse_group()?,
                _ => {
                    return Err(self.error(
                        ErrorCode::InvalidSymbol,
                        format!("Invalid symbol: `{}`", ch),
                    ))
                }
            };

            nodes.push(node);
            budget.spend();
        }

        Ok(nodes)
    }

    /// `}` closes a block, `)` and `,` close a group or parameter entry.
    pub(crate) fn closes_construct(&self, ch: char) -> bool {
        match (ch, self.context()) {
            ('}', Some(Context::Block)) => true,
            (')' | ',', Some(Context::Function | Context::Group)) => true,
            _ => false,
        }
    }

    /// Identifier, keyword, `fn` declaration or call.
    fn parse_word(&mut self) -> ParseResult<AstNode> {
        let loc = self.current_location();
        let mut word = String::new();

        while let Some(ch) = self.peek() {
            if !ch.is_alphabetic() {
                break;
            }
            word.push(ch);
            self.advance();
        }

        match word.as_str() {
            "fn" => {
                if self.in_context(Context::Function) {
                    return Err(self.error_at(
                        ErrorCode::MalformedDeclaration,
                        "Functions cannot be declared inside a function",
                        loc,
                    ));
                }
                self.parse_function(loc)
            }
            "true" => Ok(AstNode::new(AstKind::True, loc)),
            "false" => Ok(AstNode::new(AstKind::False, loc)),
            "nil" => Ok(AstNode::new(AstKind::Nil, loc)),
            _ if self.peek() == Some('(') && self.context() != Some(Context::Function) => {
                self.parse_call(word, loc)
            }
            _ => Ok(AstNode::leaf(AstKind::Id, word, loc)),
        }
    }

    /// Numeric literal, or an identifier that happens to start with a digit.
    fn parse_number(&mut self) -> ParseResult<AstNode> {
        let loc = self.current_location();
        let mut kind = AstKind::Int;
        let mut value = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_alphabetic() {
                match kind {
                    AstKind::Int if value == "0" && ch == 'x' => kind = AstKind::Hex,
                    AstKind::Int if value == "0" && ch == 'b' => kind = AstKind::Binary,
                    AstKind::Int => kind = AstKind::Id,
                    AstKind::Hex if !ch.is_ascii_hexdigit() => {
                        return Err(self.error(
                            ErrorCode::InvalidDigit,
                            format!(
                                "Invalid char found in hexadecimal, expected `0-9`, `a-f` or `A-F`: `{}`",
                                ch
                            ),
                        ));
                    }
                    AstKind::Binary => return Err(self.invalid_binary(ch)),
                    AstKind::Float => return Err(self.invalid_float(ch)),
                    _ => {}
                }
            } else if ch.is_ascii_digit() {
                if kind == AstKind::Binary && !matches!(ch, '0' | '1') {
                    return Err(self.invalid_binary(ch));
                }
            } else if ch == '.' {
                match (kind, self.peek_ahead(1)) {
                    // `1.&2`: the dot belongs to the bitwise operator
                    (_, Some(next)) if is_bitwise_suffix(next) => break,
                    // `1.+2`: the dot only terminates the literal
                    (_, Some(next)) if is_arithmetic_symbol(next) => {
                        self.advance();
                        break;
                    }
                    (AstKind::Int, Some(next)) if next.is_ascii_digit() => kind = AstKind::Float,
                    (AstKind::Int | AstKind::Float, _) => return Err(self.invalid_float(ch)),
                    (AstKind::Hex, _) => {
                        return Err(self.error(
                            ErrorCode::InvalidDigit,
                            "Invalid char found in hexadecimal, expected `0-9`, `a-f` or `A-F`: `.`",
                        ))
                    }
                    (AstKind::Binary, _) => return Err(self.invalid_binary(ch)),
                    _ => break,
                }
            } else {
                break;
            }

            value.push(ch);
            self.advance();
        }

        if matches!(kind, AstKind::Hex | AstKind::Binary) && value.len() == 2 {
            return Err(self.error(
                ErrorCode::InvalidDigit,
                format!("Expected digits after `{}`", value),
            ));
        }

        Ok(AstNode::leaf(kind, value, loc))
    }

    fn invalid_binary(&self, ch: char) -> ParseError {
        self.error(
            ErrorCode::InvalidDigit,
            format!("Invalid char found in binary, expected `0` or `1`: `{}`", ch),
        )
    }

    fn invalid_float(&self, ch: char) -> ParseError {
        self.error(
            ErrorCode::InvalidFloat,
            format!("Invalid char in float, expected `0-9`: `{}`", ch),
        )
    }

    /// String literal. No escapes; the first quote of any kind closes it.
    fn parse_string(&mut self) -> ParseResult<AstNode> {
        let loc = self.current_location();
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.advance() {
                Some(ch) if is_quote(ch) => break,
                Some(ch) => value.push(ch),
                None => {
                    return Err(self.error_at(
                        ErrorCode::UnterminatedString,
                        "Missing string terminator",
                        loc,
                    ))
                }
            }
        }

        Ok(AstNode::leaf(AstKind::String, value, loc))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::AstKind;
    use crate::parser::errors::ErrorCode;
    use crate::parser::parse::parse_source;

    fn single(source: &str) -> (AstKind, String) {
        let root = parse_source(source).unwrap();
        assert_eq!(root.children.len(), 1, "expected one node for {:?}", source);
        let node = &root.children[0];
        (node.kind, node.value.clone())
    }

    fn error_code(source: &str) -> ErrorCode {
        parse_source(source).unwrap_err().code
    }

    #[test]
    fn test_integer_keeps_text() {
        for text in ["0", "7", "42", "007", "1234567890123456789012345"] {
            assert_eq!(single(text), (AstKind::Int, text.to_string()));
        }
    }

    #[test]
    fn test_hex_and_binary() {
        assert_eq!(single("0x1F"), (AstKind::Hex, "0x1F".to_string()));
        assert_eq!(single("0xdeadBEEF"), (AstKind::Hex, "0xdeadBEEF".to_string()));
        assert_eq!(single("0b101"), (AstKind::Binary, "0b101".to_string()));
    }

    #[test]
    fn test_invalid_prefixed_digits() {
        assert_eq!(error_code("0b102"), ErrorCode::InvalidDigit);
        assert_eq!(error_code("0b1a"), ErrorCode::InvalidDigit);
        assert_eq!(error_code("0x1G"), ErrorCode::InvalidDigit);
        assert_eq!(error_code("0x"), ErrorCode::InvalidDigit);
    }

    #[test]
    fn test_float() {
        assert_eq!(single("1.5"), (AstKind::Float, "1.5".to_string()));
        assert_eq!(single("10.25"), (AstKind::Float, "10.25".to_string()));
        assert_eq!(error_code("1.5.2"), ErrorCode::InvalidFloat);
        assert_eq!(error_code("1.5e"), ErrorCode::InvalidFloat);
        assert_eq!(error_code("1."), ErrorCode::InvalidFloat);
    }

    #[test]
    fn test_digit_led_identifier() {
        assert_eq!(single("12abc"), (AstKind::Id, "12abc".to_string()));
        assert_eq!(single("10x"), (AstKind::Id, "10x".to_string()));
    }

    #[test]
    fn test_dot_before_arithmetic_ends_literal() {
        let root = parse_source("1.+2").unwrap();
        assert_eq!(root.children.len(), 1);

        let add = &root.children[0];
        assert_eq!(add.kind, AstKind::Add);
        let lhs = add.lhs().unwrap();
        assert_eq!((lhs.kind, lhs.value.as_str()), (AstKind::Int, "1"));
        let rhs = add.rhs().unwrap();
        assert_eq!((rhs.kind, rhs.value.as_str()), (AstKind::Int, "2"));
    }

    #[test]
    fn test_dot_before_bitwise_goes_to_operator() {
        let root = parse_source("6.&3").unwrap();
        let node = &root.children[0];
        assert_eq!(node.kind, AstKind::BAnd);
        assert_eq!(node.lhs().unwrap().value, "6");
        assert_eq!(node.rhs().unwrap().value, "3");
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(single("hello"), (AstKind::Id, "hello".to_string()));
        assert_eq!(single("true"), (AstKind::True, String::new()));
        assert_eq!(single("false"), (AstKind::False, String::new()));
        assert_eq!(single("nil"), (AstKind::Nil, String::new()));
        assert_eq!(single("nothing"), (AstKind::Id, "nothing".to_string()));
    }

    #[test]
    fn test_strings_close_on_any_quote() {
        assert_eq!(single("'x\""), (AstKind::String, "x".to_string()));
        assert_eq!(single("\"x'"), (AstKind::String, "x".to_string()));
        assert_eq!(single("`x'"), (AstKind::String, "x".to_string()));
        assert_eq!(single("\"hello world\""), (AstKind::String, "hello world".to_string()));
        assert_eq!(single("\"\""), (AstKind::String, String::new()));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(error_code("\"x"), ErrorCode::UnterminatedString);
    }

    #[test]
    fn test_several_expressions_per_line() {
        let root = parse_source("a 1 'two' true").unwrap();
        let kinds: Vec<AstKind> = root.children.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![AstKind::Id, AstKind::Int, AstKind::String, AstKind::True]);
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(error_code("a @ b"), ErrorCode::InvalidSymbol);
        assert_eq!(error_code("}"), ErrorCode::InvalidSymbol);
        assert_eq!(error_code(")"), ErrorCode::InvalidSymbol);
        assert_eq!(error_code("a, b"), ErrorCode::InvalidSymbol);
    }
}
