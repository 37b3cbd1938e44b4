//! Structural builders: function declarations, blocks, groups and calls
//!
//! These are the only builders that may read past the end of the current
//! line. When a block or group runs out of characters before its closing
//! delimiter the parser pulls the next line from its supplier and carries on,
//! so a construct can span as many lines as it needs.
//!
//! ```text
//! function ::= "fn" id "(" [param ("," param)*] ")" block
//! param    ::= id id
//! block    ::= "{" expr* "}"
//! group    ::= "(" [expr* ("," expr*)*] ")"
//! call     ::= id group
//! ```

use crate::parser::ast::*;
use crate::parser::errors::{ErrorCode, ParseResult};
use crate::parser::parse::{Budget, Context, Parser};
use crate::parser::source::LineSupplier;

impl<S: LineSupplier> Parser<S> {
    /// Parse a function declaration. The `fn` keyword has already been
    /// consumed and `loc` points at it.
    pub(crate) fn parse_function(&mut self, loc: SourceLocation) -> ParseResult<AstNode> {
        self.with_context(Context::Function, |p| {
            p.skip_whitespace();
            let name_loc = p.current_location();
            let name = match p.parse_expressions(Budget::Limited(1))?.pop() {
                Some(node) if node.kind == AstKind::Id => node.value,
                Some(node) => {
                    return Err(p.error_at(
                        ErrorCode::MalformedDeclaration,
                        format!("Expected function name, found {}", node.kind),
                        node.location,
                    ))
                }
                None => {
                    return Err(p.error_at(
                        ErrorCode::MalformedDeclaration,
                        "Expected function name",
                        name_loc,
                    ))
                }
            };

            p.skip_to_token("Unexpected EOF in function declaration")?;
            let params = p.parse_group()?.params;

            p.skip_to_token("Unexpected EOF in function declaration")?;
            let body = p.parse_block()?;

            let mut function = AstNode::leaf(AstKind::Function, name, loc);
            function.params = params;
            function.children = body.children;
            Ok(function)
        })
    }

    /// Parse a `{ ... }` block whose expressions become the node's children.
    pub(crate) fn parse_block(&mut self) -> ParseResult<AstNode> {
        let loc = self.current_location();
        if !self.eat('{') {
            return Err(self.error(ErrorCode::UnterminatedConstruct, "Expected `{`"));
        }

        let mut block = AstNode::new(AstKind::Block, loc);
        self.with_context(Context::Block, |p| {
            loop {
                p.skip_to_token("Unexpected EOF in block")?;
                if p.eat('}') {
                    break;
                }
                let nodes = p.parse_expressions(Budget::Unbounded)?;
                block.children.extend(nodes);
            }
            Ok(())
        })?;

        self.skip_whitespace();
        Ok(block)
    }

    /// Parse a `( ... )` group. Each comma-separated entry becomes one
    /// `params` entry.
    ///
    /// Directly inside a function declaration the group is the parameter
    /// list: no frame is pushed, and every entry must be a name/type pair.
    pub(crate) fn parse_group(&mut self) -> ParseResult<AstNode> {
        let loc = self.current_location();
        if !self.eat('(') {
            return Err(self.error(ErrorCode::UnterminatedConstruct, "Expected `(`"));
        }

        if self.context() == Some(Context::Function) {
            let params = self.parse_group_entries(true)?;
            let mut group = AstNode::new(AstKind::Group, loc);
            group.params = params;
            return Ok(group);
        }

        let params = self.with_context(Context::Group, |p| p.parse_group_entries(false))?;
        let mut group = AstNode::new(AstKind::Group, loc);
        group.params = params;
        Ok(group)
    }

    fn parse_group_entries(&mut self, is_params: bool) -> ParseResult<Vec<Vec<AstNode>>> {
        let budget = if is_params {
            Budget::Limited(2)
        } else {
            Budget::Unbounded
        };
        let mut entries = Vec::new();

        loop {
            self.skip_to_token("Unexpected EOF in group")?;
            if self.eat(')') {
                break;
            }

            let entry_loc = self.current_location();
            let entry = self.parse_expressions(budget)?;

            if entry.is_empty() {
                // Only a `,` can stop the dispatcher before it produces anything
                return Err(self.error(ErrorCode::UnterminatedConstruct, "Expected expression before `,`"));
            }

            if is_params && !is_parameter(&entry) {
                return Err(self.error_at(
                    ErrorCode::UnterminatedConstruct,
                    "Expected name and type for function parameter",
                    entry_loc,
                ));
            }

            entries.push(entry);

            self.skip_whitespace();
            if is_params && !matches!(self.peek(), None | Some(',') | Some(')')) {
                return Err(self.error(
                    ErrorCode::UnterminatedConstruct,
                    "Expected `,` or `)` after function parameter",
                ));
            }
            self.eat(',');
        }

        Ok(entries)
    }

    /// `name(args...)`: a group tagged with the callee's name.
    pub(crate) fn parse_call(&mut self, name: String, loc: SourceLocation) -> ParseResult<AstNode> {
        let group = self.parse_group()?;

        let mut call = AstNode::leaf(AstKind::Call, name, loc);
        call.params = group.params;
        Ok(call)
    }
}

fn is_parameter(entry: &[AstNode]) -> bool {
    matches!(entry, [name, ty] if name.kind == AstKind::Id && ty.kind == AstKind::Id)
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

    fn param_names(node: &AstNode) -> Vec<Vec<&str>> {
        node.params
            .iter()
            .map(|entry| entry.iter().map(|n| n.value.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_function_declaration() {
        let function = single("fn add(a int, b int) { a + b }");

        assert_eq!(function.kind, AstKind::Function);
        assert_eq!(function.value, "add");
        assert_eq!(param_names(&function), vec![vec!["a", "int"], vec!["b", "int"]]);
        assert_eq!(function.children.len(), 1);

        let body = &function.children[0];
        assert_eq!(body.kind, AstKind::Add);
        assert_eq!(body.lhs().unwrap().value, "a");
        assert_eq!(body.rhs().unwrap().value, "b");
    }

    #[test]
    fn test_function_without_parameters() {
        let function = single("fn main() { 1 }");
        assert!(function.params.is_empty());
        assert_eq!(function.children[0].kind, AstKind::Int);
    }

    #[test]
    fn test_function_spans_lines() {
        let source = "fn scale(x int, k int)\n{\n  // factor\n  x * k\n  x::float\n}";
        let function = single(source);

        assert_eq!(function.value, "scale");
        let kinds: Vec<AstKind> = function.children.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![AstKind::Mul, AstKind::TypeCast]);
    }

    #[test]
    fn test_function_name_errors() {
        assert_eq!(error_code("fn 1() {}"), ErrorCode::MalformedDeclaration);
        assert_eq!(error_code("fn (a int) {}"), ErrorCode::MalformedDeclaration);
        assert_eq!(error_code("fn"), ErrorCode::MalformedDeclaration);
    }

    #[test]
    fn test_nested_function_rejected() {
        assert_eq!(
            error_code("fn outer() { fn inner() {} }"),
            ErrorCode::MalformedDeclaration
        );
        assert_eq!(
            error_code("fn outer(fn int) {}"),
            ErrorCode::MalformedDeclaration
        );
    }

    #[test]
    fn test_malformed_parameters() {
        assert_eq!(error_code("fn f(a) {}"), ErrorCode::UnterminatedConstruct);
        assert_eq!(error_code("fn f(a 1) {}"), ErrorCode::UnterminatedConstruct);
        assert_eq!(error_code("fn f(a int b) {}"), ErrorCode::UnterminatedConstruct);
        assert_eq!(error_code("fn f(a int) a"), ErrorCode::UnterminatedConstruct);
    }

    #[test]
    fn test_block_spans_lines() {
        let block = single("{\n  a = 1\n  b = 2 c\n}");

        assert_eq!(block.kind, AstKind::Block);
        let kinds: Vec<AstKind> = block.children.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![AstKind::Assign, AstKind::Assign, AstKind::Id]);
    }

    #[test]
    fn test_block_followed_by_expression() {
        let root = parse_source("{ a } b").unwrap();
        let kinds: Vec<AstKind> = root.children.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![AstKind::Block, AstKind::Id]);
    }

    #[test]
    fn test_unterminated_block() {
        assert_eq!(error_code("{ a\n b"), ErrorCode::UnterminatedConstruct);
        assert_eq!(error_code("fn f() {"), ErrorCode::UnterminatedConstruct);
    }

    #[test]
    fn test_group_entries() {
        let group = single("(a + 1, 'x' y)");

        assert_eq!(group.kind, AstKind::Group);
        assert_eq!(group.params.len(), 2);
        assert_eq!(group.params[0][0].kind, AstKind::Add);
        let second: Vec<AstKind> = group.params[1].iter().map(|n| n.kind).collect();
        assert_eq!(second, vec![AstKind::String, AstKind::Id]);
    }

    #[test]
    fn test_group_spans_lines() {
        let group = single("(\n  a,\n  b\n)");
        assert_eq!(param_names(&group), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_group_errors() {
        assert_eq!(error_code("(a, b"), ErrorCode::UnterminatedConstruct);
        assert_eq!(error_code("(, a)"), ErrorCode::UnterminatedConstruct);
        assert_eq!(error_code("(a }"), ErrorCode::InvalidSymbol);
    }

    #[test]
    fn test_call() {
        let call = single("print(x, 'done')");

        assert_eq!(call.kind, AstKind::Call);
        assert_eq!(call.value, "print");
        assert_eq!(param_names(&call), vec![vec!["x"], vec!["done"]]);
    }

    #[test]
    fn test_call_as_operand() {
        let node = single("total = sum(a, b)");
        assert_eq!(node.kind, AstKind::Assign);
        assert_eq!(node.rhs().unwrap().kind, AstKind::Call);

        let node = single("max(a, b) + 1");
        assert_eq!(node.kind, AstKind::Add);
        assert_eq!(node.lhs().unwrap().value, "max");
    }

    #[test]
    fn test_space_before_paren_is_not_a_call() {
        let root = parse_source("f (a)").unwrap();
        let kinds: Vec<AstKind> = root.children.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![AstKind::Id, AstKind::Group]);
    }
}
