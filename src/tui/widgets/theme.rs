//! Light and dark palettes.

use ratatui::style::{Color, Modifier, Style};

/// Colors for one appearance. Widgets style themselves from this rather than
/// naming colors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub heading: Color,
    pub math: Color,
    pub tag: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub error: Color,
}

impl Theme {
    pub const DARK: Self = Self {
        text: Color::Rgb(226, 221, 213),
        dim: Color::Rgb(138, 132, 120),
        accent: Color::Rgb(251, 191, 36),
        heading: Color::Rgb(240, 234, 214),
        math: Color::Rgb(147, 197, 253),
        tag: Color::Rgb(245, 180, 60),
        border: Color::DarkGray,
        selection_bg: Color::Rgb(40, 40, 60),
        error: Color::Red,
    };

    pub const LIGHT: Self = Self {
        text: Color::Rgb(41, 37, 36),
        dim: Color::Rgb(120, 113, 108),
        accent: Color::Rgb(180, 83, 9),
        heading: Color::Rgb(28, 25, 23),
        math: Color::Rgb(30, 64, 175),
        tag: Color::Rgb(87, 83, 78),
        border: Color::Rgb(214, 211, 209),
        selection_bg: Color::Rgb(245, 245, 244),
        error: Color::Rgb(185, 28, 28),
    };

    pub const fn text_style(&self) -> Style {
        Style::new().fg(self.text)
    }

    pub const fn dim_style(&self) -> Style {
        Style::new().fg(self.dim)
    }

    pub const fn accent_style(&self) -> Style {
        Style::new().fg(self.accent)
    }

    pub const fn heading_style(&self) -> Style {
        Style::new().fg(self.heading).add_modifier(Modifier::BOLD)
    }

    pub const fn math_style(&self) -> Style {
        Style::new().fg(self.math).add_modifier(Modifier::ITALIC)
    }

    pub const fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::new().fg(self.accent)
        } else {
            Style::new().fg(self.border)
        }
    }

    pub const fn selected(&self, style: Style, is_selected: bool) -> Style {
        if is_selected {
            style.bg(self.selection_bg)
        } else {
            style
        }
    }
}

/// Which palette is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn theme(self) -> Theme {
        match self {
            Self::Dark => Theme::DARK,
            Self::Light => Theme::LIGHT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}
