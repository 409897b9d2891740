//! The momonga language definition used by the editor
//!
//! A [`LanguageDefinition`] bundles everything the editing surface needs to
//! know about a language without understanding its grammar:
//!
//! - [`lexer`]: line tokenizer classifying keywords, variables, comments and strings
//! - [`rules`]: bracket, auto-close and indentation rules
//! - [`palette`]: light and dark syntax palettes
//! - [`registry`]: one-time, process-wide registration by language id

pub mod lexer;
pub mod palette;
pub mod registry;
pub mod rules;

use crate::prefs::ThemeMode;
use lexer::Token;
use palette::SyntaxPalette;

/// Stable id the editor uses to bind to this language
pub const LANGUAGE_ID: &str = "momonga";

pub const KEYWORDS: &[&str] = &[
    "break", "continue", "else", "false", "for", "func", "if", "return", "true", "var",
];

/// A pair of characters inserted together when the opener is typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoClosingPair {
    pub open: char,
    pub close: char,
    /// Suppress auto-closing inside string and comment context
    pub not_in_string_or_comment: bool,
}

impl AutoClosingPair {
    const fn new(open: char, close: char, not_in_string_or_comment: bool) -> Self {
        AutoClosingPair {
            open,
            close,
            not_in_string_or_comment,
        }
    }
}

/// Grammar-free description of a language for the editing widget
#[derive(Debug)]
pub struct LanguageDefinition {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub line_comment: &'static str,
    pub block_comment: (&'static str, &'static str),
    pub brackets: &'static [(char, char)],
    pub auto_closing_pairs: &'static [AutoClosingPair],
    /// Auto-closing only happens when the next character is whitespace or one of these
    pub auto_close_before: &'static str,
    light: SyntaxPalette,
    dark: SyntaxPalette,
}

const BRACKETS: &[(char, char)] = &[('{', '}'), ('[', ']'), ('(', ')')];

const AUTO_CLOSING_PAIRS: &[AutoClosingPair] = &[
    AutoClosingPair::new('{', '}', false),
    AutoClosingPair::new('[', ']', false),
    AutoClosingPair::new('(', ')', false),
    AutoClosingPair::new('\'', '\'', true),
    AutoClosingPair::new('"', '"', true),
];

pub(crate) fn momonga() -> LanguageDefinition {
    LanguageDefinition {
        id: LANGUAGE_ID,
        keywords: KEYWORDS,
        line_comment: "//",
        block_comment: ("/*", "*/"),
        brackets: BRACKETS,
        auto_closing_pairs: AUTO_CLOSING_PAIRS,
        auto_close_before: ";:.,=}])>",
        light: palette::LIGHT,
        dark: palette::DARK,
    }
}

impl LanguageDefinition {
    pub fn tokenize_line(&self, line: &str) -> Vec<Token> {
        lexer::tokenize_line(line, self.keywords)
    }

    /// Palette for a theme. Switching themes only changes which palette is
    /// read; the definition itself stays registered.
    pub fn palette(&self, mode: ThemeMode) -> &SyntaxPalette {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub fn pair_opened_by(&self, c: char) -> Option<&AutoClosingPair> {
        self.auto_closing_pairs.iter().find(|p| p.open == c)
    }

    pub fn is_closer(&self, c: char) -> bool {
        self.auto_closing_pairs.iter().any(|p| p.close == c)
    }

    /// Whether a pair may auto-close given the text around the cursor
    pub fn may_auto_close(&self, pair: &AutoClosingPair, line: &str, col: usize) -> bool {
        if pair.not_in_string_or_comment && self.context_at(line, col) != rules::Context::Code {
            return false;
        }
        match line[col..].chars().next() {
            None => true,
            Some(next) => next.is_whitespace() || self.auto_close_before.contains(next),
        }
    }

    pub fn context_at(&self, line: &str, col: usize) -> rules::Context {
        rules::context_at(line, col, self.line_comment)
    }

    pub fn increases_indent(&self, line: &str) -> bool {
        rules::increases_indent(line, self.line_comment)
    }

    pub fn decreases_indent(&self, line: &str) -> bool {
        rules::decreases_indent(line, self.block_comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        let lang = momonga();
        assert_eq!(lang.palette(ThemeMode::Light).name, "light");
        assert_eq!(lang.palette(ThemeMode::Dark).name, "dark");
    }

    #[test]
    fn test_quotes_do_not_close_in_strings_or_comments() {
        let lang = momonga();
        let quote = *lang.pair_opened_by('"').unwrap();
        assert!(lang.may_auto_close(&quote, "x = ", 4));
        assert!(!lang.may_auto_close(&quote, "x = \"ab", 7));
        assert!(!lang.may_auto_close(&quote, "// say ", 7));
    }

    #[test]
    fn test_brackets_close_anywhere_before_whitespace() {
        let lang = momonga();
        let brace = *lang.pair_opened_by('{').unwrap();
        assert!(lang.may_auto_close(&brace, "// ", 3));
        assert!(lang.may_auto_close(&brace, "f()", 2));
        assert!(!lang.may_auto_close(&brace, "fx", 1));
    }

    #[test]
    fn test_closers() {
        let lang = momonga();
        for (_, close) in lang.brackets {
            assert!(lang.is_closer(*close));
        }
        assert!(lang.is_closer('"'));
        assert!(!lang.is_closer('x'));
    }
}
