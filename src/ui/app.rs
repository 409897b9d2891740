//! Main TUI application state and logic

use crate::prefs::Layout as PaneLayout;
use crate::session::{BoundaryState, Session};
use crate::ui::panes::{self, EditorScroll, HeaderData};
use crate::ui::theme::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Editor,
    Output,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Editor,
        }
    }
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub editor_scroll: EditorScroll,
    pub output_scroll: usize,

    /// Highlighted row of the snippet picker while it is open
    pub picker: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Editor,
            editor_scroll: EditorScroll::default(),
            output_scroll: 0,
            picker: None,
            should_quit: false,
            status_message: String::from("Starting interpreter..."),
            status_is_error: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick();
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

    /// Deliver interpreter events and reflect lifecycle changes in the status bar
    pub fn tick(&mut self) {
        let was_initializing = self.session.boundary() == &BoundaryState::Initializing;
        let pump = self.session.pump();
        if pump.appended > 0 {
            // Follow the output as it arrives
            self.output_scroll = usize::MAX;
        }

        if was_initializing {
            match self.session.boundary() {
                BoundaryState::Ready => self.set_status("Ready!"),
                BoundaryState::Failed(reason) => {
                    let message = format!("Interpreter unavailable: {}", reason);
                    self.set_error(message);
                }
                BoundaryState::Initializing => {}
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let theme = Theme::for_mode(self.session.theme());
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), size);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let header = HeaderData {
            boundary: self.session.boundary(),
            snippet_label: &self.session.snippet().label,
            parse_error: self.session.parse_error(),
            layout: self.session.layout(),
            theme_mode: self.session.theme(),
        };
        panes::render_header(frame, main_chunks[0], &header, theme);

        let panes_area = Layout::default()
            .direction(match self.session.effective_layout(size.width) {
                PaneLayout::Horizontal => Direction::Horizontal,
                PaneLayout::Vertical => Direction::Vertical,
            })
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[1]);

        panes::render_editor_pane(
            frame,
            panes_area[0],
            self.session.editor(),
            theme,
            self.session.parse_error(),
            self.focused_pane == FocusedPane::Editor && self.picker.is_none(),
            &mut self.editor_scroll,
        );

        panes::render_output_pane(
            frame,
            panes_area[1],
            self.session.output(),
            theme,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.status_is_error,
            theme,
        );

        if let Some(selected) = self.picker {
            panes::render_snippet_picker(
                frame,
                size,
                self.session.catalog(),
                selected,
                &self.session.snippet().key,
                theme,
            );
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.start_run(),
            KeyCode::F(5) => self.start_run(),
            KeyCode::Char('o') if ctrl => {
                self.picker = self.session.catalog().position(&self.session.snippet().key);
            }
            KeyCode::Char('l') if ctrl => {
                self.session.layout_toggled();
                let message = format!("Layout: {}", self.session.layout());
                self.set_status(message);
            }
            KeyCode::Char('t') if ctrl => {
                self.session.theme_toggled();
                let message = format!("Theme: {}", self.session.theme());
                self.set_status(message);
            }
            KeyCode::Char('w') if ctrl => self.focused_pane = self.focused_pane.next(),
            _ => match self.focused_pane {
                FocusedPane::Editor => {
                    self.session.handle_editor_key(key);
                }
                FocusedPane::Output => self.scroll_output(key.code),
            },
        }
    }

    fn start_run(&mut self) {
        match self.session.run_clicked() {
            Ok(run) => {
                self.output_scroll = 0;
                self.set_status(format!("Run {} started", run));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn scroll_output(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.output_scroll = self.output_scroll.saturating_sub(1),
            KeyCode::Down => self.output_scroll = self.output_scroll.saturating_add(1),
            KeyCode::PageUp => self.output_scroll = self.output_scroll.saturating_sub(20),
            KeyCode::PageDown => self.output_scroll = self.output_scroll.saturating_add(20),
            KeyCode::Home => self.output_scroll = 0,
            KeyCode::End => self.output_scroll = usize::MAX,
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(selected) = self.picker else {
            return;
        };
        let count = self.session.catalog().len();

        match key.code {
            KeyCode::Esc => self.picker = None,
            KeyCode::Up => self.picker = Some(selected.checked_sub(1).unwrap_or(count - 1)),
            KeyCode::Down => self.picker = Some((selected + 1) % count),
            KeyCode::Enter => {
                self.picker = None;
                let key = self
                    .session
                    .catalog()
                    .iter()
                    .nth(selected)
                    .map(|snippet| snippet.key.clone());
                if let Some(key) = key {
                    match self.session.snippet_changed(&key) {
                        Ok(()) => {
                            self.editor_scroll = EditorScroll::default();
                            let message = format!("Opened {}", self.session.snippet().label);
                            self.set_status(message);
                        }
                        Err(e) => self.set_error(e.to_string()),
                    }
                }
            }
            _ => {}
        }
    }
}
