use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub string: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub gutter_bg: Color,
    pub function: Color,  // Yellow, used for helpers
    pub type_name: Color, // Cyan for type tags
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    string: Color::Rgb(250, 179, 135),         // Orange for value reprs
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    gutter_bg: Color::Rgb(40, 40, 58),
    function: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
};
