//! Syntax highlighting palettes for the editor pane

use super::lexer::TokenClass;
use ratatui::style::{Color, Style};

/// Maps token classes to colors for one theme variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxPalette {
    pub name: &'static str,
    pub keyword: Color,
    pub variable: Color,
    pub comment: Color,
    pub string: Color,
    pub foreground: Color,
    pub background: Color,
}

impl SyntaxPalette {
    pub fn color(&self, class: TokenClass) -> Color {
        match class {
            TokenClass::Keyword => self.keyword,
            TokenClass::Variable => self.variable,
            TokenClass::Comment => self.comment,
            TokenClass::String => self.string,
            TokenClass::Plain => self.foreground,
        }
    }

    pub fn style(&self, class: TokenClass) -> Style {
        Style::default().fg(self.color(class)).bg(self.background)
    }
}

pub const LIGHT: SyntaxPalette = SyntaxPalette {
    name: "light",
    keyword: Color::Rgb(0x00, 0x00, 0xFF),
    variable: Color::Rgb(0x00, 0x10, 0x80),
    comment: Color::Rgb(0x00, 0x80, 0x00),
    string: Color::Rgb(0xA3, 0x15, 0x15),
    foreground: Color::Rgb(0x00, 0x00, 0x00),
    background: Color::Rgb(0xFF, 0xFF, 0xFF),
};

pub const DARK: SyntaxPalette = SyntaxPalette {
    name: "dark",
    keyword: Color::Rgb(0xC5, 0x86, 0xC0),
    variable: Color::Rgb(0x9C, 0xDC, 0xFE),
    comment: Color::Rgb(0x6A, 0x99, 0x55),
    string: Color::Rgb(0xCE, 0x91, 0x78),
    foreground: Color::Rgb(0xD4, 0xD4, 0xD4),
    background: Color::Rgb(0x1E, 0x1E, 0x1E),
};
