//! Snippet picker popup

use crate::snippets::SnippetCatalog;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// A rectangle of `width` x `height` centered in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(rows[1]);
    cols[1]
}

/// Render the picker over `area` with `selected` highlighted
pub fn render_snippet_picker(
    frame: &mut Frame,
    area: Rect,
    catalog: &SnippetCatalog,
    selected: usize,
    current_key: &str,
    theme: &Theme,
) {
    let popup = centered(area, 40, catalog.len() as u16 + 2);

    let items: Vec<ListItem> = catalog
        .iter()
        .map(|snippet| {
            let marker = if snippet.key == current_key { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, snippet.label))
        })
        .collect();

    let block = Block::default()
        .title(" Snippets (↵ open, esc close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bar_bg).fg(theme.fg));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(theme.primary)
            .fg(theme.on_accent)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut state);
}
