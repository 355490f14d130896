//! Terminal color palette

mod brand;

pub use brand::BRAND;

use crossterm::style::Color;

use crate::content::Difficulty;
use crate::progress::Stats;

/// Accuracy at or above which a score counts as good
pub const GOOD_ACCURACY: f64 = 80.0;

/// Accuracy at or above which a score counts as fair
pub const FAIR_ACCURACY: f64 = 60.0;

/// A color theme for terminal output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::brand()
    }
}

impl Theme {
    /// Color associated with a difficulty tier
    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        let (r, g, b) = difficulty.rgb();
        Color::Rgb { r, g, b }
    }

    /// Color for an accuracy percentage
    pub fn accuracy_percent(&self, percent: f64) -> Color {
        if percent >= GOOD_ACCURACY {
            self.success
        } else if percent >= FAIR_ACCURACY {
            self.warning
        } else {
            self.error
        }
    }

    /// Color for a set of attempt counts; muted when nothing was attempted
    pub fn accuracy(&self, stats: &Stats) -> Color {
        stats.percent().map_or(self.fg_muted, |p| self.accuracy_percent(p))
    }

    /// Color for a completion flag
    pub fn completion(&self, completed: bool) -> Color {
        if completed { self.success } else { self.fg_muted }
    }
}
