//! Text renderings of a parsed program
//!
//! - [`summary`]: one `Value: <value>, Kind: <kind>` line per top-level node.
//!   This is a lossy, one-way projection: operands, parameters and bodies are
//!   not shown, and the text cannot be parsed back into a tree.
//! - [`render_tree`]: the full tree, one node per line, indented by depth
//! - [`class_histogram`]: node counts per [`KindClass`]

use crate::parser::ast::{AstNode, KindClass};
use rustc_hash::FxHashMap;
use std::fmt::Write;

/// One summary line per child of `root`.
pub fn summary(root: &AstNode) -> Vec<String> {
    root.children
        .iter()
        .map(|node| format!("Value: {}, Kind: {}", node.value, node.kind))
        .collect()
}

/// Short single-line description of a node, shared with the TUI.
pub fn describe(node: &AstNode) -> String {
    if node.value.is_empty() {
        node.kind.to_string()
    } else {
        format!("{} `{}`", node.kind, node.value)
    }
}

/// Indented dump of the whole tree, each edge labelled with its slot.
pub fn render_tree(root: &AstNode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} @ {}", describe(root), root.location);
    render_slots(root, 1, &mut out);
    out
}

fn render_slots(node: &AstNode, depth: usize, out: &mut String) {
    for (label, child) in node.slots() {
        let _ = writeln!(
            out,
            "{}{}: {} @ {}",
            "  ".repeat(depth),
            label,
            describe(child),
            child.location
        );
        render_slots(child, depth + 1, out);
    }
}

/// Count every node below `root` (the root itself excluded) by class.
pub fn class_histogram(root: &AstNode) -> FxHashMap<KindClass, usize> {
    let mut counts: FxHashMap<KindClass, usize> = FxHashMap::default();
    root.walk(&mut |node, depth| {
        if depth > 0 {
            *counts.entry(node.kind.class()).or_insert(0) += 1;
        }
    });
    counts
}
