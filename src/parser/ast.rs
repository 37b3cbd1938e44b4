// AST (Abstract Syntax Tree) definitions for the Wisp front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Every node kind the parser knows about.
///
/// Control flow, `return`/`exit`, list literals, the logical `And`/`Or`
/// operators and the return arrows are declared for later passes; no parsing
/// rule produces them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstKind {
    // Arithmetic
    Add, // LHS + RHS
    Sub, // LHS - RHS
    Div, // LHS / RHS
    Mul, // LHS * RHS
    Pow, // LHS ^ RHS
    Mod, // LHS % RHS

    // Logic
    And,
    Or,

    // Bitwise
    BAnd,   // LHS .& RHS
    BOr,    // LHS .| RHS
    BXor,   // LHS .^ RHS
    BLeft,  // LHS .< RHS
    BRight, // LHS .> RHS

    // Comparison
    Equal,          // LHS == RHS
    NotEqual,       // LHS != RHS
    Greater,        // LHS > RHS
    Lesser,         // LHS < RHS
    GreaterOrEqual, // LHS >= RHS
    LesserOrEqual,  // LHS <= RHS

    // Assignment
    Variable, // LHS := RHS
    Constant, // LHS #= RHS
    TypeCast, // LHS :: RHS
    Assign,   // LHS = RHS

    // Unary
    Not,    // !RHS
    Inc,    // LHS++
    Dec,    // LHS--
    TypeOf, // LHS::
    BNot,   // .!LHS

    // Values
    Int,
    Float,
    Binary,
    Hex,
    String,
    List,
    Id,
    ListId,

    // Conditionals
    If,
    Else,
    While,
    For,

    // Keywords
    Return,
    Exit,
    ExitCode,
    ExitNow,
    True,
    False,
    Nil,

    // Return arrows
    ReturnOnly,   // ->
    ReturnNil,    // ~>
    ReturnErr,    // !>
    ReturnErrNil, // ?>

    // Structure
    Root,
    Function, // fn name(name type) { ... }
    Block,    // { ... }
    Group,    // ( ... )
    Call,     // name(...)
}

/// Coarse grouping of kinds, used for colouring and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KindClass {
    Math,
    Logic,
    Bitwise,
    Equality,
    Assignment,
    Conditional,
    Keyword,
    Return,
    Other,
}

impl AstKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, AstKind::Int | AstKind::Float | AstKind::Binary | AstKind::Hex)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, AstKind::True | AstKind::False)
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            AstKind::Add | AstKind::Sub | AstKind::Div | AstKind::Mul | AstKind::Pow | AstKind::Mod
        )
    }

    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            AstKind::BAnd
                | AstKind::BOr
                | AstKind::BXor
                | AstKind::BLeft
                | AstKind::BRight
                | AstKind::BNot
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            AstKind::Equal
                | AstKind::NotEqual
                | AstKind::Greater
                | AstKind::Lesser
                | AstKind::GreaterOrEqual
                | AstKind::LesserOrEqual
        )
    }

    /// Plain values: literals, identifiers and calls.
    pub fn is_value(self) -> bool {
        self.is_numeric() || matches!(self, AstKind::String | AstKind::Id | AstKind::Call)
    }

    /// Human readable name, as printed by the driver.
    pub fn name(self) -> &'static str {
        match self {
            AstKind::Add => "Add",
            AstKind::Sub => "Subtract",
            AstKind::Div => "Divide",
            AstKind::Mul => "Multiply",
            AstKind::Pow => "Exponential",
            AstKind::Mod => "Modulo",
            AstKind::And => "And",
            AstKind::Or => "Or",
            AstKind::BAnd => "Bitwise And",
            AstKind::BOr => "Bitwise Or",
            AstKind::BXor => "Bitwise Xor",
            AstKind::BLeft => "Left Shift",
            AstKind::BRight => "Right Shift",
            AstKind::Equal => "Equal",
            AstKind::NotEqual => "Not Equal",
            AstKind::Greater => "Greater",
            AstKind::Lesser => "Lesser",
            AstKind::GreaterOrEqual => "Greater or Equal",
            AstKind::LesserOrEqual => "Lesser or Equal",
            AstKind::Variable => "Variable Declaration",
            AstKind::Constant => "Constant Declaration",
            AstKind::TypeCast => "Type Cast",
            AstKind::Assign => "Variable Assignment",
            AstKind::Not => "Not",
            AstKind::Inc => "Increment",
            AstKind::Dec => "Decrement",
            AstKind::TypeOf => "Type Of",
            AstKind::BNot => "Bitwise Not",
            AstKind::Int => "Integer",
            AstKind::Float => "Float",
            AstKind::Binary => "Binary",
            AstKind::Hex => "Hexadecimal",
            AstKind::String => "String",
            AstKind::List => "List",
            AstKind::Id => "Identifier",
            AstKind::ListId => "List-type Identifier",
            AstKind::If => "If Statement",
            AstKind::Else => "Else Statement",
            AstKind::While => "While Statement",
            AstKind::For => "For Statement",
            AstKind::Return => "Return",
            AstKind::Exit => "Exit",
            AstKind::ExitCode => "Exit Code",
            AstKind::ExitNow => "Exit Now",
            AstKind::True => "True",
            AstKind::False => "False",
            AstKind::Nil => "Nil",
            AstKind::ReturnOnly => "Return Only",
            AstKind::ReturnNil => "Return Nil",
            AstKind::ReturnErr => "Return Error",
            AstKind::ReturnErrNil => "Return Nil or Error",
            AstKind::Root => "Root",
            AstKind::Function => "Function Declaration",
            AstKind::Block => "Block",
            AstKind::Group => "Group",
            AstKind::Call => "Function Call",
        }
    }

    pub fn class(self) -> KindClass {
        match self {
            AstKind::Add
            | AstKind::Sub
            | AstKind::Div
            | AstKind::Mul
            | AstKind::Pow
            | AstKind::Mod
            | AstKind::Inc
            | AstKind::Dec => KindClass::Math,
            AstKind::And | AstKind::Or | AstKind::Not => KindClass::Logic,
            AstKind::BAnd
            | AstKind::BOr
            | AstKind::BXor
            | AstKind::BLeft
            | AstKind::BRight
            | AstKind::BNot => KindClass::Bitwise,
            AstKind::Equal
            | AstKind::NotEqual
            | AstKind::Greater
            | AstKind::Lesser
            | AstKind::GreaterOrEqual
            | AstKind::LesserOrEqual => KindClass::Equality,
            AstKind::Variable | AstKind::Constant | AstKind::TypeCast | AstKind::Function => {
                KindClass::Assignment
            }
            AstKind::If | AstKind::Else | AstKind::While | AstKind::For => KindClass::Conditional,
            AstKind::Return
            | AstKind::Exit
            | AstKind::ExitCode
            | AstKind::ExitNow
            | AstKind::True
            | AstKind::False
            | AstKind::Nil => KindClass::Keyword,
            AstKind::ReturnOnly | AstKind::ReturnNil | AstKind::ReturnErr | AstKind::ReturnErrNil => {
                KindClass::Return
            }
            AstKind::Assign
            | AstKind::TypeOf
            | AstKind::Int
            | AstKind::Float
            | AstKind::Binary
            | AstKind::Hex
            | AstKind::String
            | AstKind::List
            | AstKind::Id
            | AstKind::ListId
            | AstKind::Root
            | AstKind::Block
            | AstKind::Group
            | AstKind::Call => KindClass::Other,
        }
    }
}

impl fmt::Display for AstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl fmt::Display for KindClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KindClass::Math => "Math",
            KindClass::Logic => "Logic",
            KindClass::Bitwise => "Bitwise",
            KindClass::Equality => "Equality",
            KindClass::Assignment => "Assignment",
            KindClass::Conditional => "Conditional",
            KindClass::Keyword => "Keyword",
            KindClass::Return => "Return",
            KindClass::Other => "Other",
        };
        f.pad(name)
    }
}

/// A node of the syntax tree.
///
/// Which slots are filled depends on the kind: binary operators use `lhs` and
/// `rhs`, postfix operators and `TypeOf` use `lhs`, `Not` uses `rhs`, blocks
/// and functions use `children`, groups, calls and functions use `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: AstKind,
    pub value: String,
    pub lhs: Option<Box<AstNode>>,
    pub rhs: Option<Box<AstNode>>,
    pub alt: Option<Box<AstNode>>,
    pub children: Vec<AstNode>,
    pub params: Vec<Vec<AstNode>>,
    pub location: SourceLocation,
}

impl AstNode {
    pub fn new(kind: AstKind, location: SourceLocation) -> Self {
        AstNode {
            kind,
            value: String::new(),
            lhs: None,
            rhs: None,
            alt: None,
            children: Vec::new(),
            params: Vec::new(),
            location,
        }
    }

    pub fn leaf(kind: AstKind, value: impl Into<String>, location: SourceLocation) -> Self {
        AstNode {
            value: value.into(),
            ..AstNode::new(kind, location)
        }
    }

    pub fn binary(kind: AstKind, lhs: AstNode, rhs: AstNode, location: SourceLocation) -> Self {
        AstNode {
            lhs: Some(Box::new(lhs)),
            rhs: Some(Box::new(rhs)),
            ..AstNode::new(kind, location)
        }
    }

    /// Postfix operator (or `TypeOf`) whose operand sits in `lhs`.
    pub fn postfix(kind: AstKind, operand: AstNode, location: SourceLocation) -> Self {
        AstNode {
            lhs: Some(Box::new(operand)),
            ..AstNode::new(kind, location)
        }
    }

    /// Prefix operator whose operand sits in `rhs`.
    pub fn prefix(kind: AstKind, operand: AstNode, location: SourceLocation) -> Self {
        AstNode {
            rhs: Some(Box::new(operand)),
            ..AstNode::new(kind, location)
        }
    }

    pub fn lhs(&self) -> Option<&AstNode> {
        self.lhs.as_deref()
    }

    pub fn rhs(&self) -> Option<&AstNode> {
        self.rhs.as_deref()
    }

    /// Labelled edges to every direct descendant, in source order.
    pub fn slots(&self) -> Vec<(String, &AstNode)> {
        let mut slots = Vec::new();
        if let Some(lhs) = &self.lhs {
            slots.push(("lhs".to_string(), lhs.as_ref()));
        }
        if let Some(rhs) = &self.rhs {
            slots.push(("rhs".to_string(), rhs.as_ref()));
        }
        if let Some(alt) = &self.alt {
            slots.push(("alt".to_string(), alt.as_ref()));
        }
        for (i, group) in self.params.iter().enumerate() {
            for (j, node) in group.iter().enumerate() {
                slots.push((format!("param {}.{}", i, j), node));
            }
        }
        for (i, child) in self.children.iter().enumerate() {
            slots.push((format!("child {}", i), child));
        }
        slots
    }

    /// Depth-first pre-order walk; `visit` receives each node and its depth.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a AstNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a AstNode, usize)) {
        visit(self, depth);
        for (_, node) in self.slots() {
            node.walk_at(depth + 1, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_and_classes() {
        assert_eq!(AstKind::Sub.to_string(), "Subtract");
        assert_eq!(AstKind::Function.to_string(), "Function Declaration");
        assert_eq!(AstKind::Inc.class(), KindClass::Math);
        assert_eq!(AstKind::TypeCast.class(), KindClass::Assignment);
        assert_eq!(AstKind::Id.class(), KindClass::Other);
    }

    #[test]
    fn test_slots_order() {
        let loc = SourceLocation::new(1, 1);
        let mut call = AstNode::leaf(AstKind::Call, "f", loc);
        call.params = vec![vec![AstNode::leaf(AstKind::Int, "1", loc)]];
        let node = AstNode::binary(AstKind::Add, AstNode::leaf(AstKind::Id, "a", loc), call, loc);

        let labels: Vec<String> = node.slots().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["lhs", "rhs"]);

        let mut seen = Vec::new();
        node.walk(&mut |n, depth| seen.push((n.kind, depth)));
        assert_eq!(
            seen,
            vec![
                (AstKind::Add, 0),
                (AstKind::Id, 1),
                (AstKind::Call, 1),
                (AstKind::Int, 2)
            ]
        );
    }
}
