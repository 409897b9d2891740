//! Output pane rendering

use crate::interpreter::Stream;
use crate::output::OutputLog;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn section<'a>(items: &mut Vec<ListItem<'a>>, log: &'a OutputLog, stream: Stream, theme: &Theme) {
    let line_style = match stream {
        Stream::Stdout => Style::default().fg(theme.fg),
        Stream::Stderr => Style::default().fg(theme.error),
    };

    items.push(
        ListItem::new(stream.label()).style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
    );
    items.extend(
        log.lines(stream)
            .iter()
            .map(|line| ListItem::new(line.as_str()).style(line_style)),
    );

    let overflow = log.overflow(stream);
    if overflow > 0 {
        items.push(
            ListItem::new(format!("... {} more lines not shown", overflow))
                .style(Style::default().fg(theme.comment).add_modifier(Modifier::ITALIC)),
        );
    }
}

/// Render the output pane: stdout section, then stderr section
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    log: &OutputLog,
    theme: &Theme,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg));

    if log.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(theme.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let mut all_items = Vec::new();
    section(&mut all_items, log, Stream::Stdout, theme);
    all_items.push(ListItem::new(""));
    section(&mut all_items, log, Stream::Stderr, theme);

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
