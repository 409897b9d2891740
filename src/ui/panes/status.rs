//! Header and status bar rendering

use crate::prefs::{Layout as PaneLayout, ThemeMode};
use crate::session::BoundaryState;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Values shown in the header bar
pub struct HeaderData<'a> {
    pub boundary: &'a BoundaryState,
    pub snippet_label: &'a str,
    pub parse_error: bool,
    pub layout: PaneLayout,
    pub theme_mode: ThemeMode,
}

/// Render the header: run affordance, snippet, syntax state, layout and theme
pub fn render_header(frame: &mut Frame, area: Rect, data: &HeaderData, theme: &Theme) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let bar = Style::default().bg(theme.bar_bg);
    let (run_text, run_style) = match data.boundary {
        BoundaryState::Ready => (
            " ▶ RUN ",
            Style::default()
                .bg(theme.primary)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
        ),
        BoundaryState::Initializing => (
            " … STARTING ",
            Style::default().bg(theme.comment).fg(theme.on_accent),
        ),
        BoundaryState::Failed(_) => (
            " ✕ UNAVAILABLE ",
            Style::default()
                .bg(theme.error)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let (check_text, check_style) = if data.parse_error {
        (" syntax error ", bar.fg(theme.error).add_modifier(Modifier::BOLD))
    } else {
        (" ok ", bar.fg(theme.success))
    };

    let left = vec![
        Span::styled(" momonga playground ", bar.fg(theme.primary).add_modifier(Modifier::BOLD)),
        Span::styled(run_text, run_style),
        Span::styled(" │ ", bar.fg(theme.comment)),
        Span::styled(data.snippet_label, bar.fg(theme.fg)),
        Span::styled(" │", bar.fg(theme.comment)),
        Span::styled(check_text, check_style),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(left)).style(bar).alignment(Alignment::Left),
        halves[0],
    );

    let right = vec![
        Span::styled(format!(" layout: {} ", data.layout), bar.fg(theme.fg)),
        Span::styled("│", bar.fg(theme.comment)),
        Span::styled(format!(" theme: {} ", data.theme_mode), bar.fg(theme.fg)),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(right)).style(bar).alignment(Alignment::Right),
        halves[1],
    );
}

/// Render the status bar: message on the left, key hints on the right
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, is_error: bool, theme: &Theme) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let bar = Style::default().bg(theme.bar_bg);
    let message_style = if is_error {
        bar.fg(theme.error)
    } else {
        bar.fg(theme.fg)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {} ", message), message_style)))
            .style(bar)
            .alignment(Alignment::Left),
        halves[0],
    );

    let key_style = Style::default().bg(theme.comment).fg(theme.on_accent);
    let desc_style = bar.fg(theme.fg);
    let sep_style = bar.fg(theme.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in [
        ("^R", "run"),
        ("^O", "snippets"),
        ("^L", "layout"),
        ("^T", "theme"),
        ("^W", "focus"),
        ("^Q", "quit"),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar)
            .alignment(Alignment::Right),
        halves[1],
    );
}
