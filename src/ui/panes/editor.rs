//! Editor pane rendering
//!
//! Draws the editor buffer with line numbers and syntax colors from the
//! editor's active palette. The border turns red while the source has a
//! syntax error. When focused, the terminal cursor is placed at the editor
//! cursor and the view scrolls both ways to keep it visible.

use crate::editor::SourceEditor;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GUTTER_WIDTH: u16 = 5;

/// First visible row and character column of the editor view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorScroll {
    pub row: usize,
    pub col: usize,
}

/// Render one source line as palette-colored spans, starting at character `skip`
fn highlight_line<'a>(editor: &SourceEditor, line: &'a str, skip: usize) -> Vec<Span<'a>> {
    let palette = editor.palette();
    let start = line.char_indices().nth(skip).map_or(line.len(), |(i, _)| i);
    editor
        .language()
        .tokenize_line(line)
        .into_iter()
        .filter(|token| token.range.end > start)
        .map(|token| {
            let from = token.range.start.max(start);
            Span::styled(&line[from..token.range.end], palette.style(token.class))
        })
        .collect()
}

/// Render the editor pane
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    editor: &SourceEditor,
    theme: &Theme,
    parse_error: bool,
    is_focused: bool,
    scroll: &mut EditorScroll,
) {
    let border_style = if parse_error {
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
    } else if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let title = if parse_error {
        " Editor (syntax error) "
    } else {
        " Editor "
    };

    let palette = editor.palette();
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(palette.background));

    let lines = editor.lines();
    let cursor = editor.cursor();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let visible_width = area.width.saturating_sub(2 + GUTTER_WIDTH).max(1) as usize;

    // Keep the cursor row on screen
    if cursor.row < scroll.row {
        scroll.row = cursor.row;
    } else if cursor.row >= scroll.row + visible_height {
        scroll.row = cursor.row + 1 - visible_height;
    }
    scroll.row = scroll.row.min(lines.len().saturating_sub(1));

    // And its column, counted in characters
    if cursor.col < scroll.col {
        scroll.col = cursor.col;
    } else if cursor.col >= scroll.col + visible_width {
        scroll.col = cursor.col + 1 - visible_width;
    }

    let gutter_style = Style::default().fg(theme.line_number).bg(palette.background);
    let text: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll.row)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), gutter_style)];
            spans.extend(highlight_line(editor, line, scroll.col));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(text).block(block), area);

    if is_focused {
        let col = u16::try_from(cursor.col.saturating_sub(scroll.col)).unwrap_or(u16::MAX);
        let row = u16::try_from(cursor.row.saturating_sub(scroll.row)).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            (area.x + 1 + GUTTER_WIDTH).saturating_add(col),
            (area.y + 1).saturating_add(row),
        ));
    }
}
