//! Terminal rendering
//!
//! Every view writes plain lines to any [`Write`] sink. Colors are applied through a
//! [`Painter`] so tests and redirected output can render without escape codes.

pub mod listing;
pub mod question;
pub mod report;

use std::fmt::Display;
use std::io::Write;

use crossterm::style::{Color, Stylize};
use textwrap::{Options, wrap};

use crate::progress::Stats;
use crate::theme::Theme;

/// Default wrap width when the terminal size is unknown
pub const DEFAULT_WIDTH: usize = 80;

/// Applies theme colors to text, or leaves it plain
#[derive(Debug, Clone)]
pub struct Painter {
    theme: Theme,
    color: bool,
    width: usize,
}

impl Painter {
    pub fn new(theme: Theme, color: bool, width: usize) -> Self {
        Self { theme, color, width: width.max(20) }
    }

    /// Painter without colors
    pub fn plain(width: usize) -> Self {
        Self::new(Theme::default(), false, width)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render `text` in `color`
    pub fn paint(&self, text: impl Display, color: Color) -> String {
        if self.color { text.to_string().with(color).to_string() } else { text.to_string() }
    }

    /// Render `text` in bold
    pub fn bold(&self, text: impl Display) -> String {
        if self.color { text.to_string().bold().to_string() } else { text.to_string() }
    }

    /// Render `text` in the muted color
    pub fn muted(&self, text: impl Display) -> String {
        self.paint(text, self.theme.fg_muted)
    }

    /// Accuracy percentage colored by band, or `N/A`
    pub fn accuracy(&self, stats: &Stats) -> String {
        self.paint(format_accuracy(stats), self.theme.accuracy(stats))
    }

    /// Completion marker colored by state
    pub fn check(&self, completed: bool) -> String {
        self.paint(if completed { "✓" } else { "·" }, self.theme.completion(completed))
    }

    /// Wrap `text` to the painter width, prefixing every line with `indent`
    pub fn wrapped(&self, text: &str, indent: &str) -> Vec<String> {
        let width = self.width.saturating_sub(indent.len()).max(10);
        text.lines()
            .flat_map(|line| {
                if line.trim().is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, Options::new(width)).into_iter().map(|s| s.to_string()).collect()
                }
            })
            .map(|line| if line.is_empty() { line } else { format!("{}{}", indent, line) })
            .collect()
    }
}

/// Accuracy percentage with one decimal, or `N/A` when nothing was attempted
pub fn format_accuracy(stats: &Stats) -> String {
    stats.percent().map_or_else(|| "N/A".to_string(), |p| format!("{:.1}%", p))
}

/// Write a section heading
pub fn heading(out: &mut impl Write, painter: &Painter, title: &str) -> std::io::Result<()> {
    writeln!(out, "{}", painter.bold(painter.paint(title, painter.theme().accent_primary)))
}
