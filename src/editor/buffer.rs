//! Text buffer backing the editor widget
//!
//! Lines are stored as `String`s without their terminating `\n`; the cursor
//! column counts characters, not bytes. Undo and redo keep whole-buffer
//! revisions, which is plenty for playground-sized sources.

/// Cursor position as (row, character column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Cursor { row, col }
    }
}

#[derive(Debug, Clone)]
struct Revision {
    lines: Vec<String>,
    cursor: Cursor,
}

pub const HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    undo: Vec<Revision>,
    redo: Vec<Revision>,
}

/// Byte offset of the `col`-th character of `line` (or its length)
pub fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(offset, _)| offset)
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        TextBuffer {
            lines: split_lines(text),
            cursor: Cursor::default(),
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    pub fn current_line(&self) -> &str {
        self.line(self.cursor.row)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Byte offset of the cursor within the current line
    pub fn cursor_byte(&self) -> usize {
        byte_index(self.current_line(), self.cursor.col)
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        let row = cursor.row.min(self.lines.len() - 1);
        let col = cursor.col.min(self.line(row).chars().count());
        self.cursor = Cursor { row, col };
    }

    pub fn char_before(&self) -> Option<char> {
        let line = self.current_line();
        line[..self.cursor_byte()].chars().next_back()
    }

    pub fn char_after(&self) -> Option<char> {
        let line = self.current_line();
        line[self.cursor_byte()..].chars().next()
    }

    /// Replace the whole content. History is dropped and the cursor returns to
    /// the start, as for a freshly loaded document.
    pub fn replace(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.cursor = Cursor::default();
        self.undo.clear();
        self.redo.clear();
    }

    /// Record the current state as an undo point. Call before each edit.
    pub fn checkpoint(&mut self) {
        self.undo.push(Revision {
            lines: self.lines.clone(),
            cursor: self.cursor,
        });
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(revision) => {
                let current = self.swap_revision(revision);
                self.redo.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(revision) => {
                let current = self.swap_revision(revision);
                self.undo.push(current);
                true
            }
            None => false,
        }
    }

    fn swap_revision(&mut self, revision: Revision) -> Revision {
        let previous = Revision {
            lines: std::mem::replace(&mut self.lines, revision.lines),
            cursor: self.cursor,
        };
        self.cursor = revision.cursor;
        previous
    }

    /// Insert text at the cursor and leave the cursor after it
    pub fn insert_str(&mut self, text: &str) {
        let at = self.cursor_byte();
        let row = self.cursor.row;
        let tail = self.lines[row].split_off(at);

        let mut pieces = text.split('\n');
        // split always yields at least one piece
        let first = pieces.next().unwrap_or_default();
        self.lines[row].push_str(first);

        let mut current = row;
        for piece in pieces {
            current += 1;
            self.lines.insert(current, piece.to_string());
        }

        let col = self.lines[current].chars().count();
        self.lines[current].push_str(&tail);
        self.cursor = Cursor { row: current, col };
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Delete `count` characters before the cursor, joining lines at column 0
    pub fn delete_backward(&mut self, count: usize) -> bool {
        let mut deleted = false;
        for _ in 0..count {
            if self.cursor.col > 0 {
                let line = &mut self.lines[self.cursor.row];
                let start = byte_index(line, self.cursor.col - 1);
                let end = byte_index(line, self.cursor.col);
                line.replace_range(start..end, "");
                self.cursor.col -= 1;
            } else if self.cursor.row > 0 {
                let line = self.lines.remove(self.cursor.row);
                self.cursor.row -= 1;
                self.cursor.col = self.lines[self.cursor.row].chars().count();
                self.lines[self.cursor.row].push_str(&line);
            } else {
                break;
            }
            deleted = true;
        }
        deleted
    }

    /// Delete the character under the cursor, joining with the next line at
    /// the end of a line
    pub fn delete_forward(&mut self) -> bool {
        let at = self.cursor_byte();
        let row = self.cursor.row;
        if at < self.lines[row].len() {
            let end = byte_index(&self.lines[row], self.cursor.col + 1);
            self.lines[row].replace_range(at..end, "");
            true
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            true
        } else {
            false
        }
    }

    /// Remove up to `count` leading spaces from a line, keeping the cursor on
    /// the same character
    pub fn outdent_line(&mut self, row: usize, count: usize) -> usize {
        let line = &mut self.lines[row];
        let removable = line.chars().take(count).take_while(|&c| c == ' ').count();
        line.replace_range(..removable, "");
        if self.cursor.row == row {
            self.cursor.col = self.cursor.col.saturating_sub(removable);
        }
        removable
    }

    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.current_line().chars().count();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor.col < self.current_line().chars().count() {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
    }

    pub fn move_up(&mut self, rows: usize) {
        let row = self.cursor.row.saturating_sub(rows);
        self.set_cursor(Cursor::new(row, self.cursor.col));
    }

    pub fn move_down(&mut self, rows: usize) {
        let row = self.cursor.row.saturating_add(rows);
        self.set_cursor(Cursor::new(row, self.cursor.col));
    }

    pub fn move_home(&mut self) {
        // Toggle between the first non-blank character and column 0
        let indent = self.current_line().chars().take_while(|c| c.is_whitespace()).count();
        self.cursor.col = if self.cursor.col == indent { 0 } else { indent };
    }

    pub fn move_end(&mut self) {
        self.cursor.col = self.current_line().chars().count();
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trips_trailing_newline() {
        let buffer = TextBuffer::new("a\nb\n");
        assert_eq!(buffer.lines().len(), 3);
        assert_eq!(buffer.text(), "a\nb\n");
    }

    #[test]
    fn test_insert_multiline() {
        let mut buffer = TextBuffer::new("ab");
        buffer.set_cursor(Cursor::new(0, 1));
        buffer.insert_str("x\ny\nz");
        assert_eq!(buffer.text(), "ax\ny\nzb");
        assert_eq!(buffer.cursor(), Cursor::new(2, 1));
    }

    #[test]
    fn test_unicode_columns() {
        let mut buffer = TextBuffer::new("é");
        buffer.move_end();
        buffer.insert_char('ß');
        assert_eq!(buffer.text(), "éß");
        assert_eq!(buffer.cursor().col, 2);
        assert!(buffer.delete_backward(1));
        assert_eq!(buffer.text(), "é");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buffer = TextBuffer::new("ab\ncd");
        buffer.set_cursor(Cursor::new(1, 0));
        assert!(buffer.delete_backward(1));
        assert_eq!(buffer.text(), "abcd");
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));
        buffer.set_cursor(Cursor::new(0, 0));
        assert!(!buffer.delete_backward(1));
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buffer = TextBuffer::new("ab\ncd");
        buffer.move_end();
        assert!(buffer.delete_forward());
        assert_eq!(buffer.text(), "abcd");
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = TextBuffer::new("");
        buffer.checkpoint();
        buffer.insert_str("one");
        buffer.checkpoint();
        buffer.insert_str(" two");

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "one");
        assert!(buffer.undo());
        assert_eq!(buffer.text(), "");
        assert!(!buffer.undo());
        assert!(buffer.redo());
        assert_eq!(buffer.text(), "one");
        assert_eq!(buffer.cursor(), Cursor::new(0, 3));
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buffer = TextBuffer::new("");
        buffer.checkpoint();
        buffer.insert_str("a");
        buffer.undo();
        buffer.checkpoint();
        buffer.insert_str("b");
        assert!(!buffer.redo());
    }

    #[test]
    fn test_replace_resets_history() {
        let mut buffer = TextBuffer::new("x");
        buffer.checkpoint();
        buffer.insert_str("y");
        buffer.replace("new");
        assert_eq!(buffer.undo_depth(), 0);
        assert_eq!(buffer.cursor(), Cursor::default());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut buffer = TextBuffer::new("");
        for _ in 0..HISTORY_LIMIT + 10 {
            buffer.checkpoint();
            buffer.insert_char('x');
        }
        assert_eq!(buffer.undo_depth(), HISTORY_LIMIT);
    }

    #[test]
    fn test_outdent_line() {
        let mut buffer = TextBuffer::new("      }");
        buffer.move_end();
        assert_eq!(buffer.outdent_line(0, 4), 4);
        assert_eq!(buffer.text(), "  }");
        assert_eq!(buffer.cursor().col, 3);
    }
}
