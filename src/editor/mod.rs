//! Source editor widget and its adapter
//!
//! [`SourceEditor`] owns the editing state for one mounted editor: the
//! [`TextBuffer`], the bound [`LanguageDefinition`] and the active syntax
//! palette. It turns key events into edits using the language's structural
//! rules and writes every change straight into the shared [`SourceCell`].
//!
//! Changing the theme swaps the palette on the live widget; content, cursor
//! and undo history are kept.

pub mod buffer;
pub mod host;

use crate::language::palette::SyntaxPalette;
use crate::language::{registry, rules, LanguageDefinition};
use crate::prefs::ThemeMode;
use crate::source::SourceCell;
use buffer::{Cursor, TextBuffer};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
pub use host::EditorHost;
use host::MountGuard;
use thiserror::Error;

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Editor construction errors. Both are fatal for the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("language '{0}' is not registered")]
    UnknownLanguage(String),

    #[error("editor mount point is already in use")]
    MountUnavailable,
}

/// Result of feeding a key to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The key was not handled
    Ignored,
    /// Only the cursor moved
    Moved,
    /// The text changed and the source cell was updated
    Changed,
}

pub struct SourceEditor {
    buffer: TextBuffer,
    language: &'static LanguageDefinition,
    theme: ThemeMode,
    source: SourceCell,
    tab_width: usize,
    /// Closers inserted by auto-closing. Only these are stepped over when
    /// typed or removed along with their opener. Forgotten on any key other
    /// than plain typing or backspace.
    auto_closed: Vec<Cursor>,
    _mount: MountGuard,
}

impl SourceEditor {
    /// Mount a new editor on `host`, bound to `language_id`, showing
    /// `initial_text`. The text is written to `source` as well.
    pub fn create(
        initial_text: &str,
        language_id: &str,
        theme: ThemeMode,
        host: &EditorHost,
        source: SourceCell,
    ) -> Result<Self, EditorError> {
        let language = registry::lookup(language_id)
            .ok_or_else(|| EditorError::UnknownLanguage(language_id.to_string()))?;
        let mount = host.mount()?;

        source.replace(initial_text);
        tracing::debug!(language = language.id, theme = %theme, "editor mounted");

        Ok(SourceEditor {
            buffer: TextBuffer::new(initial_text),
            language,
            theme,
            source,
            tab_width: DEFAULT_TAB_WIDTH,
            auto_closed: Vec::new(),
            _mount: mount,
        })
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn language(&self) -> &'static LanguageDefinition {
        self.language
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn palette(&self) -> &'static SyntaxPalette {
        self.language.palette(self.theme)
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn cursor(&self) -> Cursor {
        self.buffer.cursor()
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.buffer.set_cursor(cursor);
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn undo_depth(&self) -> usize {
        self.buffer.undo_depth()
    }

    /// Re-apply the palette for `theme` to this widget
    pub fn apply_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    /// Replace the widget content and the source cell together
    pub fn set_text(&mut self, text: &str) {
        self.auto_closed.clear();
        self.buffer.replace(text);
        self.source.replace(text);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        let outcome = match key.code {
            KeyCode::Char('z') if ctrl => self.changed_if(|b| b.undo()),
            KeyCode::Char('y') if ctrl => self.changed_if(|b| b.redo()),
            KeyCode::Char(c) if !ctrl && !alt => self.type_char(c),
            KeyCode::Enter => self.newline(),
            KeyCode::Tab => {
                self.buffer.checkpoint();
                self.buffer.insert_str(&" ".repeat(self.tab_width));
                self.sync()
            }
            KeyCode::BackTab => self.outdent(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.moved(TextBuffer::move_left),
            KeyCode::Right => self.moved(TextBuffer::move_right),
            KeyCode::Up => self.moved(|b| b.move_up(1)),
            KeyCode::Down => self.moved(|b| b.move_down(1)),
            KeyCode::PageUp => self.moved(|b| b.move_up(20)),
            KeyCode::PageDown => self.moved(|b| b.move_down(20)),
            KeyCode::Home => self.moved(TextBuffer::move_home),
            KeyCode::End => self.moved(TextBuffer::move_end),
            _ => EditOutcome::Ignored,
        };

        // Only plain typing and backspace keep track of auto-closed pairs
        if ctrl || alt || !matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace) {
            self.auto_closed.clear();
        }
        outcome
    }

    /// Text was inserted at `row`/`col`: closers at or after it move right
    fn shift_auto_closed(&mut self, row: usize, col: usize, count: usize) {
        for pos in self.auto_closed.iter_mut().filter(|p| p.row == row && p.col >= col) {
            pos.col += count;
        }
    }

    /// Characters `start..end` of `row` were removed
    fn drop_auto_closed(&mut self, row: usize, start: usize, end: usize) {
        self.auto_closed
            .retain(|p| p.row != row || p.col < start || p.col >= end);
        for pos in self.auto_closed.iter_mut().filter(|p| p.row == row && p.col >= end) {
            pos.col -= end - start;
        }
    }

    /// Stop tracking an auto-closed closer at `at`, reporting whether there was one
    fn take_auto_closed(&mut self, at: Cursor) -> bool {
        match self.auto_closed.iter().position(|&p| p == at) {
            Some(index) => {
                self.auto_closed.swap_remove(index);
                true
            }
            None => false,
        }
    }

    fn moved(&mut self, f: impl FnOnce(&mut TextBuffer)) -> EditOutcome {
        f(&mut self.buffer);
        EditOutcome::Moved
    }

    fn changed_if(&mut self, f: impl FnOnce(&mut TextBuffer) -> bool) -> EditOutcome {
        if f(&mut self.buffer) {
            self.sync()
        } else {
            EditOutcome::Ignored
        }
    }

    /// Write the buffer into the shared cell
    fn sync(&mut self) -> EditOutcome {
        self.source.replace(&self.buffer.text());
        EditOutcome::Changed
    }

    fn type_char(&mut self, c: char) -> EditOutcome {
        let cursor = self.buffer.cursor();

        // Step over a closer that auto-closing put there
        if self.language.is_closer(c)
            && self.buffer.char_after() == Some(c)
            && self.take_auto_closed(cursor)
        {
            self.buffer.move_right();
            return EditOutcome::Moved;
        }

        let line = self.buffer.current_line();
        let col = self.buffer.cursor_byte();
        let auto_close = self
            .language
            .pair_opened_by(c)
            .filter(|pair| self.language.may_auto_close(pair, line, col))
            .map(|pair| pair.close);

        self.buffer.checkpoint();
        self.buffer.insert_char(c);
        self.shift_auto_closed(cursor.row, cursor.col, 1);
        if let Some(close) = auto_close {
            self.buffer.insert_char(close);
            self.buffer.move_left();
            self.shift_auto_closed(cursor.row, cursor.col + 1, 1);
            self.auto_closed.push(Cursor::new(cursor.row, cursor.col + 1));
        }

        if matches!(c, '}' | ']') {
            self.outdent_closer();
        }

        self.sync()
    }

    /// A closer typed as the first thing on an indented line moves back one level
    fn outdent_closer(&mut self) {
        let cursor = self.buffer.cursor();
        let line = self.buffer.current_line();
        let before_closer = &line[..buffer::byte_index(line, cursor.col.saturating_sub(1))];

        if before_closer.trim().is_empty() && self.language.decreases_indent(line) {
            let removed = self.buffer.outdent_line(cursor.row, self.tab_width);
            self.drop_auto_closed(cursor.row, 0, removed);
        }
    }

    fn newline(&mut self) -> EditOutcome {
        let line = self.buffer.current_line();
        let col = self.buffer.cursor_byte();
        let (before, after) = line.split_at(col);

        let indent = rules::indentation(line).to_string();
        let opens = self.language.increases_indent(before);
        let inner = if opens {
            format!("{}{}", indent, " ".repeat(self.tab_width))
        } else {
            indent.clone()
        };
        let closes_pair = opens && self.closes_last_opener(before, after);
        let blank_after = after.chars().take_while(|c| c.is_whitespace()).count();

        self.buffer.checkpoint();
        // Whitespace between the cursor and the rest of the line is dropped
        for _ in 0..blank_after {
            self.buffer.delete_forward();
        }

        if closes_pair {
            // `{|}` becomes three lines with the cursor on the indented middle one
            self.buffer.insert_str(&format!("\n{}\n{}", inner, indent));
            let row = self.buffer.cursor().row - 1;
            self.buffer
                .set_cursor(Cursor::new(row, inner.chars().count()));
        } else {
            self.buffer.insert_str(&format!("\n{}", inner));
        }

        self.sync()
    }

    fn closes_last_opener(&self, before: &str, after: &str) -> bool {
        let last = before.trim_end().chars().next_back();
        let next = after.trim_start().chars().next();
        match (last, next) {
            (Some(open), Some(close)) => self
                .language
                .brackets
                .iter()
                .any(|&(o, c)| o == open && c == close),
            _ => false,
        }
    }

    fn outdent(&mut self) -> EditOutcome {
        let row = self.buffer.cursor().row;
        let leading = self.buffer.line(row).chars().take_while(|&c| c == ' ').count();
        if leading == 0 {
            return EditOutcome::Ignored;
        }
        self.buffer.checkpoint();
        self.buffer.outdent_line(row, self.tab_width);
        self.sync()
    }

    fn delete(&mut self) -> EditOutcome {
        let cursor = self.buffer.cursor();
        let at_line_end = self.buffer.cursor_byte() == self.buffer.current_line().len();
        if at_line_end && cursor.row + 1 == self.buffer.lines().len() {
            return EditOutcome::Ignored;
        }
        self.buffer.checkpoint();
        self.buffer.delete_forward();
        self.sync()
    }

    fn backspace(&mut self) -> EditOutcome {
        let cursor = self.buffer.cursor();
        if cursor == Cursor::default() {
            return EditOutcome::Ignored;
        }

        let line = self.buffer.current_line();
        let prefix = &line[..self.buffer.cursor_byte()];
        let in_pair = match (self.buffer.char_before(), self.buffer.char_after()) {
            (Some(open), Some(close)) => {
                self.auto_closed.contains(&cursor)
                    && self
                        .language
                        .pair_opened_by(open)
                        .is_some_and(|pair| pair.close == close)
            }
            _ => false,
        };

        let count = if in_pair {
            1
        } else if !prefix.is_empty() && prefix.chars().all(|c| c == ' ') {
            // Back to the previous tab stop
            let width = prefix.chars().count();
            match width % self.tab_width {
                0 => self.tab_width,
                rest => rest,
            }
        } else {
            1
        };

        self.buffer.checkpoint();
        self.buffer.delete_backward(count);
        if in_pair {
            self.buffer.delete_forward();
        }
        if cursor.col >= count {
            let end = cursor.col + usize::from(in_pair);
            self.drop_auto_closed(cursor.row, cursor.col - count, end);
        } else {
            // Joined with the previous line
            self.auto_closed.clear();
        }
        self.sync()
    }
}

impl std::fmt::Debug for SourceEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEditor")
            .field("language", &self.language.id)
            .field("theme", &self.theme)
            .field("cursor", &self.buffer.cursor())
            .field("lines", &self.buffer.lines().len())
            .finish()
    }
}
