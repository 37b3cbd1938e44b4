//! Operator builders
//!
//! Each builder is entered by the dispatcher with the cursor on the operator's
//! first character and the nodes produced so far on the current line. Binary
//! operators take the most recent node as their left operand; the right
//! operand comes from a nested dispatcher call limited to one expression, so
//! operators chain strictly left to right without precedence:
//!
//! ```text
//! a + b * c   =>   Mul(Add(a, b), c)
//! ```
//!
//! | Builder          | Spellings                                  |
//! |------------------|--------------------------------------------|
//! | `parse_operator` | `+ - * / % ^`, `++ --`, `.& .\| .^ .< .>`  |
//! | `parse_equality` | `= == < <= > >=`                           |
//! | `parse_not`      | `!`, `!=`                                  |
//! | `parse_type_op`  | `::`                                       |

use crate::parser::ast::*;
use crate::parser::errors::{ErrorCode, ParseResult};
use crate::parser::parse::{Budget, Parser};
use crate::parser::source::LineSupplier;

/// Left operand of arithmetic and bitwise operators.
fn is_math_operand(kind: AstKind) -> bool {
    kind.is_value() || kind.is_arithmetic() || kind.is_bitwise()
}

/// Right operand of arithmetic and bitwise operators.
fn is_math_rhs(kind: AstKind) -> bool {
    kind.is_value()
}

fn is_equality_operand(kind: AstKind) -> bool {
    kind.is_value() || kind.is_boolean() || matches!(kind, AstKind::TypeOf | AstKind::TypeCast)
}

fn is_inequality_operand(kind: AstKind) -> bool {
    kind.is_value() || kind.is_boolean()
}

impl<S: LineSupplier> Parser<S> {
    /// Arithmetic and bitwise infix operators, postfix `++`/`--`.
    pub(crate) fn parse_operator(&mut self, nodes: &mut Vec<AstNode>) -> ParseResult<AstNode> {
        let loc = self.current_location();
        let lhs = self.take_lhs(nodes, is_math_operand, "Expected number or string as LHS of operator")?;

        let kind = match self.advance() {
            Some('+') if self.eat('+') => AstKind::Inc,
            Some('+') => AstKind::Add,
            Some('-') if self.eat('-') => AstKind::Dec,
            Some('-') => AstKind::Sub,
            Some('*') => AstKind::Mul,
            Some('/') => AstKind::Div,
            Some('%') => AstKind::Mod,
            Some('^') => AstKind::Pow,
            Some('.') => self.parse_bitwise_suffix()?,
            _ => {
                return Err(self.error_at(ErrorCode::InvalidSymbol, "Expected operator", loc));
            }
        };

        if matches!(kind, AstKind::Inc | AstKind::Dec) {
            if lhs.kind == AstKind::String {
                let what = if kind == AstKind::Inc { "increment" } else { "decrement" };
                return Err(self.error_at(
                    ErrorCode::InvalidOperand,
                    format!("Expected number as LHS of {}", what),
                    loc,
                ));
            }
            return Ok(AstNode::postfix(kind, lhs, loc));
        }

        let rhs = self.parse_rhs(
            is_math_rhs,
            "Expected expression after operator",
            "Expected number or string as RHS of operator",
        )?;

        Ok(AstNode::binary(kind, lhs, rhs, loc))
    }

    /// The character after a `.` that selects the bitwise operator.
    fn parse_bitwise_suffix(&mut self) -> ParseResult<AstKind> {
        let Some(ch) = self.peek() else {
            return Err(self.error(
                ErrorCode::InvalidBitwiseOperator,
                "Expected operator after bitwise initializer",
            ));
        };

        let kind = match ch {
            '&' => AstKind::BAnd,
            '|' => AstKind::BOr,
            '^' => AstKind::BXor,
            '<' => AstKind::BLeft,
            '>' => AstKind::BRight,
            _ => {
                return Err(self.error(
                    ErrorCode::InvalidBitwiseOperator,
                    format!("Invalid operator: `.{}`", ch),
                ))
            }
        };

        self.advance();
        Ok(kind)
    }

    /// Assignment and comparisons.
    pub(crate) fn parse_equality(&mut self, nodes: &mut Vec<AstNode>) -> ParseResult<AstNode> {
        let loc = self.current_location();
        let lhs = self.take_lhs(
            nodes,
            is_equality_operand,
            "Expected type of, type cast, boolean, identifier, number or string as LHS of equality",
        )?;

        let op = self.advance();
        let upgraded = self.eat('=');
        let kind = match (op, upgraded) {
            (Some('='), false) => AstKind::Assign,
            (Some('='), true) => AstKind::Equal,
            (Some('>'), false) => AstKind::Greater,
            (Some('>'), true) => AstKind::GreaterOrEqual,
            (Some('<'), false) => AstKind::Lesser,
            (Some('<'), true) => AstKind::LesserOrEqual,
            _ => {
                return Err(self.error_at(ErrorCode::InvalidSymbol, "Expected equality operator", loc));
            }
        };

        let rhs = self.parse_rhs(
            is_equality_operand,
            "Expected expression after equality",
            "Expected type of, type cast, boolean, identifier, number or string as RHS of equality",
        )?;

        Ok(AstNode::binary(kind, lhs, rhs, loc))
    }

    /// Unary `!` over a boolean, or binary `!=`.
    pub(crate) fn parse_not(&mut self, nodes: &mut Vec<AstNode>) -> ParseResult<AstNode> {
        let loc = self.current_location();
        self.advance(); // '!'

        if self.eat('=') {
            let lhs = self.take_lhs(
                nodes,
                is_inequality_operand,
                "Expected bool, identifier, number or string as LHS of equality",
            )?;
            let rhs = self.parse_rhs(
                is_inequality_operand,
                "Expected expression",
                "Expected bool, identifier, number or string as RHS of equality",
            )?;
            return Ok(AstNode::binary(AstKind::NotEqual, lhs, rhs, loc));
        }

        let operand = self.parse_rhs(
            AstKind::is_boolean,
            "Expected expression",
            "Expected bool as RHS of `not`",
        )?;
        Ok(AstNode::prefix(AstKind::Not, operand, loc))
    }

    /// `x::T` casts; `x::` alone is a type-of, which a following comparison
    /// can take as its left operand (`x:: == int`).
    pub(crate) fn parse_type_op(&mut self, nodes: &mut Vec<AstNode>) -> ParseResult<AstNode> {
        let loc = self.current_location();
        let lhs = self.take_lhs(
            nodes,
            |kind| kind == AstKind::Id,
            "Expected identifier as LHS of type cast or `typeOf`",
        )?;

        self.advance(); // ':'
        if !self.eat(':') {
            return Err(self.error(ErrorCode::MalformedDeclaration, "Expected another `:`"));
        }

        self.skip_whitespace();
        let type_of_only = match self.peek() {
            None => true,
            Some(ch) => matches!(ch, '=' | '<' | '>') || self.closes_construct(ch),
        };
        if type_of_only {
            return Ok(AstNode::postfix(AstKind::TypeOf, lhs, loc));
        }

        let mut rhs = self.parse_expressions(Budget::Limited(1))?;
        match rhs.pop() {
            Some(target) if target.kind == AstKind::Id => {
                Ok(AstNode::binary(AstKind::TypeCast, lhs, target, loc))
            }
            Some(target) => Err(self.error_at(
                ErrorCode::InvalidOperand,
                "Expected identifier as RHS of type cast",
                target.location,
            )),
            None => Ok(AstNode::postfix(AstKind::TypeOf, lhs, loc)),
        }
    }

    // ===== Operand helpers =====

    /// Pop the most recent node as a left operand, checking its kind.
    fn take_lhs(
        &self,
        nodes: &mut Vec<AstNode>,
        accepts: impl Fn(AstKind) -> bool,
        message: &str,
    ) -> ParseResult<AstNode> {
        match nodes.pop() {
            Some(node) if accepts(node.kind) => Ok(node),
            Some(node) => Err(self.error_at(ErrorCode::InvalidOperand, message, node.location)),
            None => Err(self.error(ErrorCode::InvalidOperand, message)),
        }
    }

    /// Parse exactly one expression after the operator as its right operand.
    fn parse_rhs(
        &mut self,
        accepts: impl Fn(AstKind) -> bool,
        missing: &str,
        wrong_kind: &str,
    ) -> ParseResult<AstNode> {
        self.skip_whitespace();
        if self.is_at_line_end() {
            return Err(self.error(ErrorCode::MissingExpression, missing));
        }

        let mut rhs = self.parse_expressions(Budget::Limited(1))?;
        match rhs.pop() {
            Some(node) if accepts(node.kind) => Ok(node),
            Some(node) => Err(self.error_at(ErrorCode::InvalidOperand, wrong_kind, node.location)),
            None => Err(self.error(ErrorCode::MissingExpression, missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{AstKind, AstNode};
    use crate::parser::errors::ErrorCode;
    use crate::parser::parse::parse_source;

    fn single(source: &str) -> AstNode {
        let mut root = parse_source(source).unwrap();
        assert_eq!(root.children.len(), 1, "expected one node for {:?}", source);
        root.children.remove(0)
    }

    fn error_code(source: &str) -> ErrorCode {
        parse_source(source).unwrap_err().code
    }

    fn operands(node: &AstNode) -> (AstKind, &str, AstKind, &str) {
        let lhs = node.lhs().unwrap();
        let rhs = node.rhs().unwrap();
        (lhs.kind, lhs.value.as_str(), rhs.kind, rhs.value.as_str())
    }

    #[test]
    fn test_arithmetic_operators() {
        for (source, kind) in [
            ("a + b", AstKind::Add),
            ("a - b", AstKind::Sub),
            ("a * b", AstKind::Mul),
            ("a / b", AstKind::Div),
            ("a % b", AstKind::Mod),
            ("a ^ b", AstKind::Pow),
            ("a+b", AstKind::Add),
        ] {
            let node = single(source);
            assert_eq!(node.kind, kind, "{}", source);
            assert_eq!(operands(&node), (AstKind::Id, "a", AstKind::Id, "b"));
        }
    }

    #[test]
    fn test_bitwise_operators() {
        for (source, kind) in [
            ("a .& b", AstKind::BAnd),
            ("a .| b", AstKind::BOr),
            ("a .^ b", AstKind::BXor),
            ("a .< b", AstKind::BLeft),
            ("a .> b", AstKind::BRight),
        ] {
            assert_eq!(single(source).kind, kind, "{}", source);
        }
        assert_eq!(error_code("a .% b"), ErrorCode::InvalidBitwiseOperator);
        assert_eq!(error_code("a ."), ErrorCode::InvalidBitwiseOperator);
    }

    #[test]
    fn test_operators_chain_left_to_right() {
        let node = single("a + b * c");
        assert_eq!(node.kind, AstKind::Mul);
        assert_eq!(node.lhs().unwrap().kind, AstKind::Add);
        assert_eq!(node.rhs().unwrap().value, "c");
    }

    #[test]
    fn test_mixed_operands_accepted() {
        let node = single("\"s\" + 1");
        assert_eq!(operands(&node), (AstKind::String, "s", AstKind::Int, "1"));

        let node = single("1.5 * x");
        assert_eq!(operands(&node), (AstKind::Float, "1.5", AstKind::Id, "x"));
    }

    #[test]
    fn test_increment_and_decrement() {
        let node = single("i++");
        assert_eq!(node.kind, AstKind::Inc);
        assert_eq!(node.lhs().unwrap().value, "i");
        assert!(node.rhs().is_none());

        assert_eq!(single("0x1F--").kind, AstKind::Dec);
        assert_eq!(error_code("\"s\"++"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("'s'--"), ErrorCode::InvalidOperand);
    }

    #[test]
    fn test_operator_operand_errors() {
        assert_eq!(error_code("+ 1"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("true + 1"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("a + true"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("a +"), ErrorCode::MissingExpression);
        assert_eq!(error_code("a +   "), ErrorCode::MissingExpression);
    }

    #[test]
    fn test_equality_operators() {
        for (source, kind) in [
            ("a = 1", AstKind::Assign),
            ("a == 1", AstKind::Equal),
            ("a > 1", AstKind::Greater),
            ("a >= 1", AstKind::GreaterOrEqual),
            ("a < 1", AstKind::Lesser),
            ("a <= 1", AstKind::LesserOrEqual),
        ] {
            let node = single(source);
            assert_eq!(node.kind, kind, "{}", source);
            assert_eq!(operands(&node), (AstKind::Id, "a", AstKind::Int, "1"));
        }
    }

    #[test]
    fn test_equality_accepts_booleans() {
        let node = single("done = false");
        assert_eq!(node.kind, AstKind::Assign);
        assert_eq!(node.rhs().unwrap().kind, AstKind::False);
    }

    #[test]
    fn test_equality_errors() {
        assert_eq!(error_code("= 1"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("a ="), ErrorCode::MissingExpression);
        assert_eq!(error_code("a = nil"), ErrorCode::InvalidOperand);
        // Operators do not take an assignment as their left operand
        assert_eq!(error_code("a = 1 + 2"), ErrorCode::InvalidOperand);
    }

    #[test]
    fn test_not_and_not_equal() {
        let node = single("!true");
        assert_eq!(node.kind, AstKind::Not);
        assert!(node.lhs().is_none());
        assert_eq!(node.rhs().unwrap().kind, AstKind::True);

        let node = single("a != 'b'");
        assert_eq!(node.kind, AstKind::NotEqual);
        assert_eq!(operands(&node), (AstKind::Id, "a", AstKind::String, "b"));

        assert_eq!(error_code("!x"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("!"), ErrorCode::MissingExpression);
        assert_eq!(error_code("!= 1"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("a != nil"), ErrorCode::InvalidOperand);
    }

    #[test]
    fn test_type_cast() {
        let node = single("x::int");
        assert_eq!(node.kind, AstKind::TypeCast);
        assert_eq!(operands(&node), (AstKind::Id, "x", AstKind::Id, "int"));

        let node = single("x :: float = 1.5");
        assert_eq!(node.kind, AstKind::Assign);
        assert_eq!(node.lhs().unwrap().kind, AstKind::TypeCast);
    }

    #[test]
    fn test_type_of_feeds_comparison() {
        let node = single("x:: == int");
        assert_eq!(node.kind, AstKind::Equal);

        let type_of = node.lhs().unwrap();
        assert_eq!(type_of.kind, AstKind::TypeOf);
        assert_eq!(type_of.lhs().unwrap().value, "x");
        assert_eq!(node.rhs().unwrap().value, "int");
    }

    #[test]
    fn test_type_of_alone() {
        let node = single("x::");
        assert_eq!(node.kind, AstKind::TypeOf);
        assert!(node.rhs().is_none());
    }

    #[test]
    fn test_type_op_errors() {
        assert_eq!(error_code("::int"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("1::int"), ErrorCode::InvalidOperand);
        assert_eq!(error_code("x:int"), ErrorCode::MalformedDeclaration);
        assert_eq!(error_code("x::5"), ErrorCode::InvalidOperand);
    }
}
