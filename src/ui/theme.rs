use crate::prefs::ThemeMode;
use ratatui::style::Color;

/// Chrome colors. Syntax colors come from the language palette instead.
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Amber
    pub secondary: Color, // Blue
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub bar_bg: Color,
    pub line_number: Color,
    pub on_accent: Color, // Text drawn on primary/error backgrounds
}

pub const DARK_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 30),
    fg: Color::Rgb(212, 212, 212),
    primary: Color::Rgb(255, 193, 7),
    secondary: Color::Rgb(137, 180, 250),
    comment: Color::Rgb(120, 120, 120),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(255, 193, 7),
    border_normal: Color::Rgb(90, 90, 90),
    bar_bg: Color::Rgb(45, 45, 45),
    line_number: Color::Rgb(110, 118, 129),
    on_accent: Color::Black,
};

pub const LIGHT_THEME: Theme = Theme {
    bg: Color::Rgb(255, 255, 255),
    fg: Color::Rgb(0, 0, 0),
    primary: Color::Rgb(255, 160, 0),
    secondary: Color::Rgb(25, 118, 210),
    comment: Color::Rgb(117, 117, 117),
    success: Color::Rgb(46, 125, 50),
    error: Color::Rgb(211, 47, 47),
    border_focused: Color::Rgb(255, 160, 0),
    border_normal: Color::Rgb(189, 189, 189),
    bar_bg: Color::Rgb(238, 238, 238),
    line_number: Color::Rgb(35, 120, 147),
    on_accent: Color::Black,
};

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> &'static Theme {
        match mode {
            ThemeMode::Dark => &DARK_THEME,
            ThemeMode::Light => &LIGHT_THEME,
        }
    }
}
