//! Theme definitions for the TUI
//!
//! Status colors follow the original AnalytiCore palette (completed green,
//! processing orange, pending blue, error red) with dark and light variants.

use ratatui::style::Color;

use crate::models::{JobStatus, Sentiment};

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    // Job status colors (fixed lookup table)
    pub completed: Color,
    pub processing: Color,
    pub pending: Color,
    pub error: Color,

    // Sentiment colors
    pub positive: Color,
    pub negative: Color,
    pub neutral: Color,

    // UI elements
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub accent: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            completed: Color::Rgb(76, 175, 80),
            processing: Color::Rgb(255, 152, 0),
            pending: Color::Rgb(33, 150, 243),
            error: Color::Rgb(244, 67, 54),

            positive: Color::Rgb(76, 175, 80),
            negative: Color::Rgb(244, 67, 54),
            neutral: Color::Rgb(255, 180, 0),

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            accent: Color::Cyan,
            dim: Color::DarkGray,
        }
    }

    /// Create a light theme
    /// Uses darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            completed: Color::Rgb(0, 140, 0),
            processing: Color::Rgb(200, 120, 0),
            pending: Color::Rgb(0, 80, 180),
            error: Color::Rgb(200, 0, 0),

            positive: Color::Rgb(0, 140, 0),
            negative: Color::Rgb(200, 0, 0),
            neutral: Color::Rgb(180, 140, 60),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            accent: Color::Rgb(0, 100, 180),
            dim: Color::Rgb(100, 100, 100),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::from_str(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Get color for a job status
    pub fn status_color(&self, status: JobStatus) -> Color {
        match status {
            JobStatus::Completed => self.completed,
            JobStatus::Processing => self.processing,
            JobStatus::Pending => self.pending,
            JobStatus::Error => self.error,
        }
    }

    /// Get color for a sentiment label
    pub fn sentiment_color(&self, sentiment: Sentiment) -> Color {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let dark = Theme::from_name("dark");
        assert_eq!(dark.name, ThemeName::Dark);

        let light = Theme::from_name("light");
        assert_eq!(light.name, ThemeName::Light);

        // Unknown defaults to dark
        let unknown = Theme::from_name("unknown");
        assert_eq!(unknown.name, ThemeName::Dark);
    }

    #[test]
    fn test_status_colors_are_fixed_lookup() {
        let theme = Theme::dark();
        assert_eq!(theme.status_color(JobStatus::Completed), theme.completed);
        assert_eq!(theme.status_color(JobStatus::Processing), theme.processing);
        assert_eq!(theme.status_color(JobStatus::Pending), theme.pending);
        assert_eq!(theme.status_color(JobStatus::Error), theme.error);
    }
}
