//! Line tokenizer for momonga source
//!
//! Classifies each line into a flat run of [`Token`]s covering the whole line.
//! The rules mirror a regex line tokenizer tried in order at every position:
//!
//! 1. `//` up to the end of the line is a comment
//! 2. `"` up to the next `"` on the same line is a string (no escapes)
//! 3. `@?[a-zA-Z][A-Za-z0-9_$]*` is a keyword or a variable
//!
//! Anything no rule matches is emitted as [`TokenClass::Plain`]. An opening
//! quote without a closing quote on the same line does not start a string.

use std::ops::Range;

/// Highlight class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Variable,
    Comment,
    String,
    /// Operators, digits, whitespace and stray characters
    Plain,
}

/// A classified byte range of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: TokenClass,
    pub range: Range<usize>,
}

impl Token {
    fn new(class: TokenClass, range: Range<usize>) -> Self {
        Token { class, range }
    }
}

/// Tokenizer over one line of source text
pub struct LineTokenizer<'a> {
    line: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
    keywords: &'a [&'a str],
    tokens: Vec<Token>,
    plain_start: Option<usize>,
}

impl<'a> LineTokenizer<'a> {
    pub fn new(line: &'a str, keywords: &'a [&'a str]) -> Self {
        LineTokenizer {
            line,
            chars: line.char_indices().collect(),
            position: 0,
            keywords,
            tokens: Vec::new(),
            plain_start: None,
        }
    }

    /// Tokenize the whole line. Adjacent unmatched characters are merged into
    /// a single plain token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while self.position < self.chars.len() {
            let (offset, ch) = self.chars[self.position];

            if ch == '/' && self.peek_char(1) == Some('/') {
                self.flush_plain(offset);
                self.tokens
                    .push(Token::new(TokenClass::Comment, offset..self.line.len()));
                self.position = self.chars.len();
                return self.finish();
            }

            if ch == '"' {
                if let Some(end) = self.find_closing_quote() {
                    self.flush_plain(offset);
                    let end_offset = self.chars[end].0 + 1;
                    self.tokens
                        .push(Token::new(TokenClass::String, offset..end_offset));
                    self.position = end + 1;
                    continue;
                }
            }

            if self.at_identifier_start() {
                self.flush_plain(offset);
                self.identifier();
                continue;
            }

            if self.plain_start.is_none() {
                self.plain_start = Some(offset);
            }
            self.position += 1;
        }

        self.finish()
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_plain(self.line.len());
        self.tokens
    }

    fn flush_plain(&mut self, end: usize) {
        if let Some(start) = self.plain_start.take() {
            if start < end {
                self.tokens.push(Token::new(TokenClass::Plain, start..end));
            }
        }
    }

    fn peek_char(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.position + ahead).map(|&(_, c)| c)
    }

    /// Index into `chars` of the closing quote for the quote at `position`
    fn find_closing_quote(&self) -> Option<usize> {
        (self.position + 1..self.chars.len()).find(|&i| self.chars[i].1 == '"')
    }

    fn at_identifier_start(&self) -> bool {
        match self.peek_char(0) {
            Some('@') => self.peek_char(1).is_some_and(|c| c.is_ascii_alphabetic()),
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        }
    }

    fn identifier(&mut self) {
        let start = self.chars[self.position].0;
        // '@' or the leading letter
        self.position += 1;
        if self.chars[self.position - 1].1 == '@' {
            self.position += 1;
        }
        while let Some(c) = self.peek_char(0) {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                self.position += 1;
            } else {
                break;
            }
        }
        let end = self
            .chars
            .get(self.position)
            .map_or(self.line.len(), |&(offset, _)| offset);

        let word = &self.line[start..end];
        let class = if self.keywords.contains(&word) {
            TokenClass::Keyword
        } else {
            TokenClass::Variable
        };
        self.tokens.push(Token::new(class, start..end));
    }
}

/// Tokenize a single line against a keyword set
pub fn tokenize_line(line: &str, keywords: &[&str]) -> Vec<Token> {
    LineTokenizer::new(line, keywords).tokenize()
}
