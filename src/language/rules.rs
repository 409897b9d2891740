//! Structural editing rules: indentation and lexical context
//!
//! These are line-local heuristics evaluated by the editor while typing, not a
//! parse of the program. They never look past the current line.

/// Lexical context at a cursor position on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Code,
    String,
    Comment,
}

/// Scan `line` up to byte offset `col` and report whether the position sits in
/// code, inside a `"` string or inside a comment started by `line_comment`.
///
/// Unlike the highlighter, an unterminated quote counts as an open string here,
/// so a quote typed to close it is not doubled.
pub fn context_at(line: &str, col: usize, line_comment: &str) -> Context {
    let prefix = &line[..col.min(line.len())];
    let mut state = Context::Code;

    for (i, c) in prefix.char_indices() {
        match state {
            Context::Code => {
                if c == '"' {
                    state = Context::String;
                } else if !line_comment.is_empty() && prefix[i..].starts_with(line_comment) {
                    return Context::Comment;
                }
            }
            Context::String => {
                if c == '"' {
                    state = Context::Code;
                }
            }
            Context::Comment => unreachable!("comment state returns immediately"),
        }
    }

    state
}

/// True when the line leaves a bracket open: some `{`, `(` or `[` has no
/// `line_comment` before it and neither its closer nor a quote after it.
pub fn increases_indent(line: &str, line_comment: &str) -> bool {
    for (i, c) in line.char_indices() {
        let close = match c {
            '{' => '}',
            '(' => ')',
            '[' => ']',
            _ => continue,
        };

        // Every later opener would also sit behind this comment
        if !line_comment.is_empty() && line[..i].contains(line_comment) {
            return false;
        }

        let rest = &line[i + 1..];
        if !rest.contains(|r| r == close || r == '"' || r == '\'' || r == '`') {
            return true;
        }
    }

    false
}

/// True when the line starts with `}` or `]`, optionally after the tail of a
/// block comment closed on this line (`... */ }`) when the line opens none.
pub fn decreases_indent(line: &str, block_comment: (&str, &str)) -> bool {
    if starts_with_closer(line) {
        return true;
    }
    let (open, close) = block_comment;
    if open.is_empty() || close.is_empty() || line.contains(open) {
        return false;
    }
    line.match_indices(close)
        .any(|(i, _)| starts_with_closer(&line[i + close.len()..]))
}

fn starts_with_closer(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('}') | Some(']'))
}

/// Leading whitespace of a line
pub fn indentation(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}
