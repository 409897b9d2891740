// Integration tests for the source editor adapter

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use momonga_playground::editor::buffer::Cursor;
use momonga_playground::editor::{EditOutcome, EditorError, EditorHost, SourceEditor};
use momonga_playground::language::{registry, LANGUAGE_ID};
use momonga_playground::prefs::ThemeMode;
use momonga_playground::source::SourceCell;
use pretty_assertions::assert_eq;

fn editor_at(text: &str, row: usize, col: usize) -> (SourceEditor, SourceCell, EditorHost) {
    let host = EditorHost::new();
    let cell = SourceCell::default();
    let mut editor = SourceEditor::create(text, LANGUAGE_ID, ThemeMode::Dark, &host, cell.clone())
        .expect("editor mounts");
    editor.set_cursor(Cursor::new(row, col));
    (editor, cell, host)
}

fn press(editor: &mut SourceEditor, code: KeyCode) -> EditOutcome {
    editor.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_str(editor: &mut SourceEditor, text: &str) {
    for c in text.chars() {
        press(editor, KeyCode::Char(c));
    }
}

#[test]
fn test_brackets_auto_close_and_step_over() {
    let (mut editor, cell, _host) = editor_at("", 0, 0);

    type_str(&mut editor, "print(");
    assert_eq!(editor.text(), "print()");
    assert_eq!(editor.cursor(), Cursor::new(0, 6));

    type_str(&mut editor, "1)");
    assert_eq!(editor.text(), "print(1)");
    assert_eq!(editor.cursor(), Cursor::new(0, 8));
    assert_eq!(cell.snapshot(), "print(1)");
}

#[test]
fn test_no_auto_close_before_identifier() {
    let (mut editor, _cell, _host) = editor_at("abc", 0, 0);
    type_str(&mut editor, "(");
    assert_eq!(editor.text(), "(abc");
}

#[test]
fn test_quote_not_doubled_inside_string() {
    let (mut editor, _cell, _host) = editor_at("print(\"a", 0, 8);
    type_str(&mut editor, "\"");
    assert_eq!(editor.text(), "print(\"a\"");

    let (mut editor, _cell, _host) = editor_at("x = ", 0, 4);
    type_str(&mut editor, "\"");
    assert_eq!(editor.text(), "x = \"\"");
}

#[test]
fn test_quote_not_paired_in_comment() {
    let (mut editor, _cell, _host) = editor_at("// it", 0, 5);
    type_str(&mut editor, "'");
    assert_eq!(editor.text(), "// it'");
}

#[test]
fn test_backspace_removes_empty_pair() {
    let (mut editor, cell, _host) = editor_at("", 0, 0);
    type_str(&mut editor, "[");
    assert_eq!(editor.text(), "[]");

    assert_eq!(press(&mut editor, KeyCode::Backspace), EditOutcome::Changed);
    assert_eq!(editor.text(), "");
    assert_eq!(cell.snapshot(), "");
    assert_eq!(press(&mut editor, KeyCode::Backspace), EditOutcome::Ignored);
}

#[test]
fn test_nested_auto_closed_pairs_step_over() {
    let (mut editor, _cell, _host) = editor_at("", 0, 0);
    type_str(&mut editor, "((x))");
    assert_eq!(editor.text(), "((x))");
    assert_eq!(editor.cursor(), Cursor::new(0, 5));
}

#[test]
fn test_typed_closer_is_not_stepped_over() {
    let (mut editor, _cell, _host) = editor_at("f()", 0, 2);
    type_str(&mut editor, ")");
    assert_eq!(editor.text(), "f())");
    assert_eq!(editor.cursor(), Cursor::new(0, 3));
}

#[test]
fn test_backspace_keeps_typed_closer() {
    let (mut editor, cell, _host) = editor_at("[]", 0, 1);
    assert_eq!(press(&mut editor, KeyCode::Backspace), EditOutcome::Changed);
    assert_eq!(editor.text(), "]");
    assert_eq!(cell.snapshot(), "]");
}

#[test]
fn test_moving_forgets_auto_closed_pair() {
    let (mut editor, _cell, _host) = editor_at("", 0, 0);
    type_str(&mut editor, "(");
    press(&mut editor, KeyCode::Left);
    press(&mut editor, KeyCode::Right);

    type_str(&mut editor, ")");
    assert_eq!(editor.text(), "())");
}

#[test]
fn test_enter_between_braces_splits_block() {
    let (mut editor, _cell, _host) = editor_at("if (x) {}", 0, 8);
    press(&mut editor, KeyCode::Enter);

    assert_eq!(editor.text(), "if (x) {\n    \n}");
    assert_eq!(editor.cursor(), Cursor::new(1, 4));
}

#[test]
fn test_enter_keeps_and_increases_indent() {
    let (mut editor, _cell, _host) = editor_at("    func f() {", 0, 14);
    press(&mut editor, KeyCode::Enter);
    assert_eq!(editor.text(), "    func f() {\n        ");

    let (mut editor, _cell, _host) = editor_at("    x = 1;", 0, 10);
    press(&mut editor, KeyCode::Enter);
    assert_eq!(editor.text(), "    x = 1;\n    ");
}

#[test]
fn test_closing_brace_outdents() {
    let (mut editor, _cell, _host) = editor_at("{\n    ", 1, 4);
    type_str(&mut editor, "}");
    assert_eq!(editor.text(), "{\n}");
    assert_eq!(editor.cursor(), Cursor::new(1, 1));
}

#[test]
fn test_backspace_in_indent_goes_to_tab_stop() {
    let (mut editor, _cell, _host) = editor_at("      x", 0, 6);
    press(&mut editor, KeyCode::Backspace);
    assert_eq!(editor.text(), "    x");
    press(&mut editor, KeyCode::Backspace);
    assert_eq!(editor.text(), "x");
}

#[test]
fn test_undo_redo() {
    let (mut editor, cell, _host) = editor_at("var", 0, 3);
    type_str(&mut editor, " x");
    assert_eq!(editor.text(), "var x");

    let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
    editor.handle_key(ctrl('z'));
    editor.handle_key(ctrl('z'));
    assert_eq!(cell.snapshot(), "var");
    assert_eq!(editor.handle_key(ctrl('z')), EditOutcome::Ignored);

    editor.handle_key(ctrl('y'));
    assert_eq!(editor.text(), "var ");
}

#[test]
fn test_set_text_resets_history() {
    let (mut editor, cell, _host) = editor_at("a", 0, 1);
    type_str(&mut editor, "b");
    editor.set_text("print(1);");

    assert_eq!(cell.snapshot(), "print(1);");
    assert_eq!(editor.undo_depth(), 0);
    assert_eq!(editor.cursor(), Cursor::default());
}

#[test]
fn test_cursor_moves_do_not_touch_source() {
    let (mut editor, cell, _host) = editor_at("ab\ncd", 0, 0);
    cell.replace("sentinel");

    assert_eq!(press(&mut editor, KeyCode::Down), EditOutcome::Moved);
    assert_eq!(press(&mut editor, KeyCode::End), EditOutcome::Moved);
    assert_eq!(editor.cursor(), Cursor::new(1, 2));
    assert_eq!(cell.snapshot(), "sentinel");
}

#[test]
fn test_unknown_language_leaves_host_free() {
    let host = EditorHost::new();
    let result = SourceEditor::create("", "python", ThemeMode::Dark, &host, SourceCell::default());
    assert!(matches!(result, Err(EditorError::UnknownLanguage(id)) if id == "python"));
    assert!(!host.is_occupied());
}

#[test]
fn test_dropping_editor_frees_host() {
    let host = EditorHost::new();
    let editor =
        SourceEditor::create("", LANGUAGE_ID, ThemeMode::Light, &host, SourceCell::default()).unwrap();
    assert!(host.is_occupied());
    assert!(matches!(
        SourceEditor::create("", LANGUAGE_ID, ThemeMode::Light, &host, SourceCell::default()),
        Err(EditorError::MountUnavailable)
    ));

    drop(editor);
    assert!(!host.is_occupied());
}

#[test]
fn test_language_registered_once() {
    for _ in 0..3 {
        let _ = editor_at("", 0, 0);
    }
    registry::ensure_registered();
    assert_eq!(registry::registration_count(), 1);
}
