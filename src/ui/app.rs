//! Main TUI application state and logic

use crate::parser::ast::AstNode;
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// Root of the parsed program
    pub root: AstNode,

    /// The source code the tree was parsed from
    pub source_code: String,

    /// Path shown in the status bar
    pub path: String,

    /// Index of the selected row among the visible rows
    pub selected: usize,

    /// Slot paths of collapsed nodes
    pub collapsed: FxHashSet<Vec<usize>>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub tree_scroll: usize,
    pub source_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(root: AstNode, source_code: String, path: String) -> Self {
        App {
            root,
            source_code,
            path,
            selected: 0,
            collapsed: FxHashSet::default(),
            focused_pane: FocusedPane::Tree,
            tree_scroll: 0,
            source_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Tree (left) | Source (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        let rows = panes::visible_rows(&self.root, &self.collapsed);
        let current_line = rows
            .get(self.selected)
            .map(|row| row.node.location.line)
            .unwrap_or(0);

        panes::render_tree_pane(
            frame,
            columns[0],
            &rows,
            self.selected,
            &self.collapsed,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_source_pane(
            frame,
            columns[1],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.path,
            &self.status_message,
            self.selected,
            rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_add(1)),
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
            },
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            KeyCode::Right => self.expand_or_descend(),
            KeyCode::Left => self.collapse_or_ascend(),
            KeyCode::Enter => self.toggle_selected(),
            _ => {}
        }
    }

    fn row_count(&self) -> usize {
        panes::visible_rows(&self.root, &self.collapsed).len()
    }

    /// Path and child flag of the selected row
    fn selected_row(&self) -> Option<(Vec<usize>, bool)> {
        panes::visible_rows(&self.root, &self.collapsed)
            .into_iter()
            .nth(self.selected)
            .map(|row| (row.path, row.has_children))
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.row_count().saturating_sub(1));
        if let Some(row) = panes::visible_rows(&self.root, &self.collapsed).get(self.selected) {
            self.status_message = format!("{} at {}", row.node.kind, row.node.location);
        }
    }

    fn expand_or_descend(&mut self) {
        let Some((path, has_children)) = self.selected_row() else {
            return;
        };
        if !has_children {
            return;
        }
        if !self.collapsed.remove(&path) {
            self.select(self.selected + 1);
        } else {
            self.status_message = "Expanded".to_string();
        }
    }

    fn collapse_or_ascend(&mut self) {
        let Some((path, has_children)) = self.selected_row() else {
            return;
        };
        if has_children && !self.collapsed.contains(&path) {
            self.collapsed.insert(path);
            self.status_message = "Collapsed".to_string();
            return;
        }

        let Some((_, parent)) = path.split_last() else {
            return;
        };
        let parent_index = panes::visible_rows(&self.root, &self.collapsed)
            .iter()
            .position(|row| row.path == parent);
        if let Some(index) = parent_index {
            self.select(index);
        }
    }

    fn toggle_selected(&mut self) {
        let Some((path, has_children)) = self.selected_row() else {
            return;
        };
        if !has_children {
            return;
        }
        if self.collapsed.remove(&path) {
            self.status_message = "Expanded".to_string();
        } else {
            self.collapsed.insert(path);
            self.status_message = "Collapsed".to_string();
        }
    }
}
