//! Source code pane rendering with syntax highlighting
//!
//! Displays the Wisp program next to the tree, with the line of the selected
//! node highlighted and kept at a fixed row while the selection moves.

use crate::parser::source::is_skippable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for Wisp code
fn highlight_source_code(line: &str) -> Line<'static> {
    if is_skippable(line) {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    let mut spans = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut previous_word = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Strings: any quote closes
        if matches!(c, '\'' | '"' | '`') {
            let mut end = i + 1;
            while end < chars.len() && !matches!(chars[end], '\'' | '"' | '`') {
                end += 1;
            }
            end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if c.is_alphanumeric() {
            let start = i;
            while i < chars.len() && chars[i].is_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let after_cast = start >= 2 && chars[start - 2..start] == [':', ':'];
            let style = get_word_style(&word, &previous_word, chars.get(i) == Some(&'('), after_cast);
            spans.push(Span::styled(word.clone(), style));
            previous_word = word;
            continue;
        }

        let style = match c {
            '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
            '+' | '-' | '*' | '/' | '%' | '^' | '.' | '&' | '|' | '=' | '!' | '<' | '>' | ':' => {
                Style::default().fg(DEFAULT_THEME.operator)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        if !c.is_whitespace() {
            previous_word.clear();
        }
        i += 1;
    }

    Line::from(spans)
}

fn get_word_style(word: &str, previous_word: &str, is_call: bool, after_cast: bool) -> Style {
    if word.starts_with(|c: char| c.is_ascii_digit()) && word.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Style::default().fg(DEFAULT_THEME.number);
    }

    match word {
        "fn" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" | "nil" => Style::default().fg(DEFAULT_THEME.number), // Constants
        _ if previous_word == "fn" || is_call => Style::default().fg(DEFAULT_THEME.function),
        _ if after_cast => Style::default().fg(DEFAULT_THEME.type_name),
        _ => Style::default().fg(DEFAULT_THEME.fg), // Identifiers
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the current line at a fixed visual row, centred at first
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                for span in &mut content_line.spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
