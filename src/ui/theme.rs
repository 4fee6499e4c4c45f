//! Color themes for todo-lists
//!
//! Neutral lazygit-style palette by default: green border on the focused
//! pane, simple unicode glyphs, completed things in green.

use ratatui::style::Color;

/// A color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Background color
    pub bg: Color,
    /// Primary foreground color
    pub fg: Color,
    /// Muted/secondary text color
    pub muted: Color,
    /// Accent/highlight color
    pub accent: Color,
    /// Border color (unfocused panes)
    pub border: Color,
    /// Border color for focused pane
    pub focused_border: Color,
    /// Selection/highlight background
    pub selection_bg: Color,
    /// Open item glyph and text
    pub item_open: Color,
    /// Completed item glyph and text; also complete lists
    pub item_done: Color,
    /// Success flash
    pub success: Color,
    /// Error flash and delete confirmation
    pub error: Color,
}

/// Lazygit-inspired theme (default)
pub const LAZYGIT: Theme = Theme {
    name: "Lazygit",
    bg: Color::Reset,
    fg: Color::White,
    muted: Color::Gray,
    accent: Color::Cyan,
    border: Color::DarkGray,
    focused_border: Color::Green,
    selection_bg: Color::DarkGray,
    item_open: Color::White,
    item_done: Color::Green,
    success: Color::Green,
    error: Color::Red,
};

/// Tokyo Night theme
pub const TOKYO_NIGHT: Theme = Theme {
    name: "Tokyo Night",
    bg: Color::Rgb(26, 27, 38),
    fg: Color::Rgb(169, 177, 214),
    muted: Color::Rgb(86, 95, 137),
    accent: Color::Rgb(122, 162, 247),
    border: Color::Rgb(59, 66, 97),
    focused_border: Color::Rgb(158, 206, 106),
    selection_bg: Color::Rgb(41, 46, 66),
    item_open: Color::Rgb(169, 177, 214),
    item_done: Color::Rgb(158, 206, 106),
    success: Color::Rgb(158, 206, 106),
    error: Color::Rgb(247, 118, 142),
};

/// Dracula theme
pub const DRACULA: Theme = Theme {
    name: "Dracula",
    bg: Color::Rgb(40, 42, 54),
    fg: Color::Rgb(248, 248, 242),
    muted: Color::Rgb(98, 114, 164),
    accent: Color::Rgb(189, 147, 249),
    border: Color::Rgb(68, 71, 90),
    focused_border: Color::Rgb(80, 250, 123),
    selection_bg: Color::Rgb(68, 71, 90),
    item_open: Color::Rgb(248, 248, 242),
    item_done: Color::Rgb(80, 250, 123),
    success: Color::Rgb(80, 250, 123),
    error: Color::Rgb(255, 85, 85),
};

/// Nord theme
pub const NORD: Theme = Theme {
    name: "Nord",
    bg: Color::Rgb(46, 52, 64),
    fg: Color::Rgb(216, 222, 233),
    muted: Color::Rgb(76, 86, 106),
    accent: Color::Rgb(136, 192, 208),
    border: Color::Rgb(59, 66, 82),
    focused_border: Color::Rgb(163, 190, 140),
    selection_bg: Color::Rgb(67, 76, 94),
    item_open: Color::Rgb(216, 222, 233),
    item_done: Color::Rgb(163, 190, 140),
    success: Color::Rgb(163, 190, 140),
    error: Color::Rgb(191, 97, 106),
};

/// All available themes (Lazygit is default)
pub const THEMES: &[Theme] = &[LAZYGIT, TOKYO_NIGHT, DRACULA, NORD];

impl Theme {
    /// Color for an item or list depending on whether it is done
    pub fn done_color(&self, done: bool) -> Color {
        if done { self.item_done } else { self.item_open }
    }
}
