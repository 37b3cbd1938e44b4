// Parser behaviour tests: literals, operator chaining and structures

use wisp::parser::ast::{AstKind, AstNode};
use wisp::parser::errors::ErrorCode;
use wisp::parser::parse::parse_source;

fn parse_one(source: &str) -> AstNode {
    let mut root = parse_source(source).expect("Parsing failed");
    assert_eq!(root.children.len(), 1, "{:?}", source);
    root.children.remove(0)
}

fn shape(node: &AstNode) -> String {
    match (node.lhs(), node.rhs()) {
        (Some(lhs), Some(rhs)) => format!("{:?}({}, {})", node.kind, shape(lhs), shape(rhs)),
        (Some(operand), None) | (None, Some(operand)) => {
            format!("{:?}({})", node.kind, shape(operand))
        }
        (None, None) if node.value.is_empty() => format!("{:?}", node.kind),
        (None, None) => node.value.clone(),
    }
}

#[test]
fn test_left_to_right_chains() {
    assert_eq!(shape(&parse_one("1 + 2 * 3 - 4")), "Sub(Mul(Add(1, 2), 3), 4)");
    assert_eq!(shape(&parse_one("a .< 2 .| b")), "BOr(BLeft(a, 2), b)");
    assert_eq!(shape(&parse_one("n-- ")), "Dec(n)");
}

#[test]
fn test_dot_terminated_literals() {
    assert_eq!(shape(&parse_one("1.+2")), "Add(1, 2)");
    assert_eq!(shape(&parse_one("1.*x")), "Mul(1, x)");
    assert_eq!(shape(&parse_one("0x1F.&0b1")), "BAnd(0x1F, 0b1)");
}

#[test]
fn test_comparisons() {
    assert_eq!(shape(&parse_one("a >= 1")), "GreaterOrEqual(a, 1)");
    assert_eq!(shape(&parse_one("x:: == int")), "Equal(TypeOf(x), int)");
    assert_eq!(shape(&parse_one("x::int < 3")), "Lesser(TypeCast(x, int), 3)");
    assert_eq!(shape(&parse_one("true != false")), "NotEqual(True, False)");
}

#[test]
fn test_not_puts_operand_on_the_right() {
    let not = parse_one("!false");
    assert!(not.lhs().is_none());
    assert_eq!(not.rhs().unwrap().kind, AstKind::False);
}

#[test]
fn test_nested_groups_and_blocks() {
    let group = parse_one("(a, (b, c), { d e })");
    assert_eq!(group.params.len(), 3);
    assert_eq!(group.params[1][0].kind, AstKind::Group);
    assert_eq!(group.params[1][0].params.len(), 2);

    let block = &group.params[2][0];
    assert_eq!(block.kind, AstKind::Block);
    assert_eq!(block.children.len(), 2);
}

#[test]
fn test_calls_inside_function_bodies() {
    let function = parse_one("fn twice(x int) {\n  apply(x)\n  apply(apply(x))\n}");
    assert_eq!(function.children.len(), 2);

    let outer = &function.children[1];
    assert_eq!(outer.kind, AstKind::Call);
    assert_eq!(outer.params[0][0].kind, AstKind::Call);
}

#[test]
fn test_functions_after_each_other() {
    let root = parse_source("fn a() { 1 }\nfn b() { 2 }").unwrap();
    let names: Vec<&str> = root.children.iter().map(|n| n.value.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_function_inside_group_rejected() {
    let err = parse_source("fn f(a int) { (fn g() {}) }").unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedDeclaration);
}

#[test]
fn test_function_in_plain_block_is_allowed() {
    let block = parse_one("{ fn inner() { 1 } }");
    assert_eq!(block.children[0].kind, AstKind::Function);
}

#[test]
fn test_comment_lines_inside_constructs() {
    let source = "(\n  // first\n  a,\n\n  // second\n  b\n)";
    let group = parse_one(source);
    assert_eq!(group.params.len(), 2);
}

#[test]
fn test_locations_are_one_based() {
    let node = parse_one("  foo + 1");
    assert_eq!((node.location.line, node.location.column), (1, 7));

    let lhs = node.lhs().unwrap();
    assert_eq!((lhs.location.line, lhs.location.column), (1, 3));
}

#[test]
fn test_unterminated_constructs() {
    for source in ["(a", "{", "fn f(", "fn f() {\n  a\n", "fn f()"] {
        let err = parse_source(source).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnterminatedConstruct, "{:?}", source);
    }
}
