//! Training-program brand palette

use crossterm::style::Color;

use super::Theme;

/// Brand color palette
pub const BRAND: Theme = Theme {
    name: String::new(),

    // Foreground colors
    fg_primary: Color::Reset,
    fg_muted: Color::Rgb { r: 99, g: 106, b: 106 }, // #636a6a

    // Accent colors
    accent_primary: Color::Rgb { r: 0, g: 103, b: 197 },     // #0067c5
    accent_secondary: Color::Rgb { r: 158, g: 162, b: 164 }, // #9ea2a4

    // Semantic colors
    success: Color::Rgb { r: 0, g: 127, b: 62 },  // #007f3e
    warning: Color::Rgb { r: 255, g: 165, b: 0 }, // #ffa500
    error: Color::Rgb { r: 211, g: 47, b: 47 },   // #d32f2f
};

impl Theme {
    pub fn brand() -> Self {
        Theme { name: "Brand".to_string(), ..BRAND }
    }
}
