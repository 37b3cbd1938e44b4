//! AST tree pane
//!
//! The tree is flattened into [`TreeRow`]s before rendering. A row's `path` is
//! the list of slot indices leading to it from the root (see
//! [`AstNode::slots`]), which stays stable while other branches are expanded
//! or collapsed.

use crate::parser::ast::AstNode;
use crate::printer::describe;
use crate::ui::theme::{class_color, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// One visible line of the tree pane.
#[derive(Debug, Clone)]
pub struct TreeRow<'a> {
    pub path: Vec<usize>,
    pub depth: usize,
    pub label: String,
    pub node: &'a AstNode,
    pub has_children: bool,
}

/// Flatten every node not hidden under a collapsed ancestor.
pub fn visible_rows<'a>(root: &'a AstNode, collapsed: &FxHashSet<Vec<usize>>) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    push_rows(root, "root".to_string(), Vec::new(), collapsed, &mut rows);
    rows
}

fn push_rows<'a>(
    node: &'a AstNode,
    label: String,
    path: Vec<usize>,
    collapsed: &FxHashSet<Vec<usize>>,
    rows: &mut Vec<TreeRow<'a>>,
) {
    let slots = node.slots();
    let is_collapsed = collapsed.contains(&path);

    rows.push(TreeRow {
        path: path.clone(),
        depth: path.len(),
        label,
        node,
        has_children: !slots.is_empty(),
    });

    if is_collapsed {
        return;
    }

    for (i, (slot, child)) in slots.into_iter().enumerate() {
        let mut child_path = path.clone();
        child_path.push(i);
        push_rows(child, slot, child_path, collapsed, rows);
    }
}

/// Render the tree pane, keeping `selected` inside the visible window.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    collapsed: &FxHashSet<Vec<usize>>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if selected < *scroll {
        *scroll = selected;
    } else if selected >= *scroll + visible_height {
        *scroll = selected + 1 - visible_height;
    }

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let marker = match (row.has_children, collapsed.contains(&row.path)) {
                (false, _) => "  ",
                (true, true) => "▸ ",
                (true, false) => "▾ ",
            };

            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("{}: ", row.label),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    describe(row.node),
                    Style::default().fg(class_color(row.node.kind.class())),
                ),
                Span::styled(
                    format!("  {}", row.node.location),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];

            if idx == selected {
                for span in &mut spans {
                    span.style = span.style.bg(DEFAULT_THEME.selection_bg);
                }
                spans[3].style = spans[3].style.add_modifier(Modifier::BOLD);
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
