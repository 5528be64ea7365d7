//! Theme system for formwork widgets.
//!
//! Themes define named colors that widgets reference at render time.
//! Widget render code asks the theme for semantic names (`text`, `muted`,
//! `error`, ...) rather than hardcoding values, so embedding applications
//! can restyle every widget by swapping one theme.

use std::sync::Arc;

use crate::color::{Color, StyleColor};

/// Trait for theme types that can resolve named colors.
pub trait Theme: Send + Sync + 'static {
    /// Resolve a named color to its actual color value.
    ///
    /// Returns `None` if the color name is not defined in this theme.
    fn resolve(&self, name: &str) -> Option<Color>;

    /// Get all color names defined in this theme.
    fn color_names(&self) -> Vec<&'static str>;

    /// Clone this theme into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Theme>;
}

impl Clone for Box<dyn Theme> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A thread-safe reference to a theme.
pub type ThemeRef = Arc<dyn Theme>;

/// The default theme with standard color definitions.
///
/// Provides a dark scheme suitable for terminal applications, with a
/// light variant.
#[derive(Debug, Clone)]
pub struct DefaultTheme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub error: Color,
    /// Background for the keyboard-highlighted option row.
    pub highlight: Color,
    /// Background for the committed/selected option row.
    pub selection: Color,
    /// Background for days inside a date range (including hover preview).
    pub range: Color,
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl DefaultTheme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            primary: Color::CYAN,
            secondary: Color::BLUE,
            background: Color::oklch(0.15, 0.0, 0.0),
            surface: Color::oklch(0.25, 0.0, 0.0),
            border: Color::oklch(0.35, 0.0, 0.0),
            text: Color::WHITE,
            text_muted: Color::GRAY,
            text_disabled: Color::DARK_GRAY,
            error: Color::RED,
            highlight: Color::oklch(0.55, 0.12, 250.0),
            selection: Color::oklch(0.4, 0.08, 250.0),
            range: Color::oklch(0.35, 0.06, 250.0),
        }
    }

    /// Create a light theme variant.
    pub fn light() -> Self {
        Self {
            primary: Color::BLUE,
            secondary: Color::CYAN,
            background: Color::WHITE,
            surface: Color::oklch(0.95, 0.0, 0.0),
            border: Color::oklch(0.8, 0.0, 0.0),
            text: Color::BLACK,
            text_muted: Color::DARK_GRAY,
            text_disabled: Color::GRAY,
            error: Color::RED,
            highlight: Color::oklch(0.85, 0.08, 250.0),
            selection: Color::oklch(0.9, 0.05, 250.0),
            range: Color::oklch(0.92, 0.04, 250.0),
        }
    }
}

impl Theme for DefaultTheme {
    fn resolve(&self, name: &str) -> Option<Color> {
        match name {
            "primary" => Some(self.primary),
            "secondary" => Some(self.secondary),
            "background" => Some(self.background),
            "surface" => Some(self.surface),
            "border" => Some(self.border),
            "text" => Some(self.text),
            "text_muted" => Some(self.text_muted),
            "text_disabled" => Some(self.text_disabled),
            "error" => Some(self.error),
            "highlight" => Some(self.highlight),
            "selection" => Some(self.selection),
            "range" => Some(self.range),
            // Common aliases
            "fg" => Some(self.text),
            "bg" => Some(self.background),
            "muted" => Some(self.text_muted),
            "disabled" => Some(self.text_disabled),
            "danger" => Some(self.error),
            _ => None,
        }
    }

    fn color_names(&self) -> Vec<&'static str> {
        vec![
            "primary",
            "secondary",
            "background",
            "surface",
            "border",
            "text",
            "text_muted",
            "text_disabled",
            "error",
            "highlight",
            "selection",
            "range",
            "fg",
            "bg",
            "muted",
            "disabled",
            "danger",
        ]
    }

    fn clone_box(&self) -> Box<dyn Theme> {
        Box::new(self.clone())
    }
}

/// Resolve a StyleColor to a concrete Color, looking up named colors in the theme.
pub fn resolve_color(color: &StyleColor, theme: &dyn Theme) -> Color {
    match color {
        StyleColor::Concrete(c) => *c,
        StyleColor::Named(name) => theme.resolve(name).unwrap_or_else(|| {
            log::warn!("Unknown theme color '{}', using default", name);
            Color::GRAY
        }),
    }
}

/// Resolve a StyleColor to a concrete Color, returning None if the named color is not found.
pub fn resolve_style_color(color: &StyleColor, theme: &dyn Theme) -> Option<Color> {
    match color {
        StyleColor::Concrete(c) => Some(*c),
        StyleColor::Named(name) => theme.resolve(name),
    }
}
