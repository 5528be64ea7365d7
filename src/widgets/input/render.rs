//! Rendering for the Input widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;
use crate::utils::text::truncate_with_ellipsis;
use crate::validation::{ErrorDisplay, Validatable};

use super::Input;

/// Resolve a theme color name to ratatui Color.
fn theme_color(theme: &dyn Theme, name: &str) -> RatatuiColor {
    theme
        .resolve(name)
        .map(|c| c.to_ratatui())
        .unwrap_or(RatatuiColor::Gray)
}

/// Render the input: optional label line, the field itself, and the error
/// message below when touched.
pub fn render(frame: &mut Frame, area: Rect, input: &Input, focused: bool, theme: &dyn Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let label = input.label();
    let show_error = input.touched() && input.has_error();
    let mut y = area.y;

    if !label.is_empty() && area.height >= 2 {
        let label_style = if show_error {
            RatatuiStyle::default().fg(theme_color(theme, "error"))
        } else if input.is_disabled() {
            RatatuiStyle::default().fg(theme_color(theme, "text_disabled"))
        } else {
            RatatuiStyle::default().fg(theme_color(theme, "muted"))
        };
        let label_area = Rect::new(area.x, y, area.width, 1);
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&label, area.width as usize)).style(label_style),
            label_area,
        );
        y += 1;
    }

    if y >= area.y + area.height {
        return;
    }
    let field_area = Rect::new(area.x, y, area.width, 1);
    render_field(frame, field_area, input, focused, theme);
    y += 1;

    if show_error
        && input.error_display() == ErrorDisplay::Below
        && y < area.y + area.height
        && let Some(error) = input.error()
    {
        let error_area = Rect::new(area.x, y, area.width, 1);
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&error, area.width as usize))
                .style(RatatuiStyle::default().fg(theme_color(theme, "error"))),
            error_area,
        );
    }
}

/// Render the single-line field with value/placeholder and cursor.
fn render_field(frame: &mut Frame, area: Rect, input: &Input, focused: bool, theme: &dyn Theme) {
    let value = input.value();
    let disabled = input.is_disabled();

    let text_style = if disabled {
        RatatuiStyle::default().fg(theme_color(theme, "text_disabled"))
    } else if focused {
        RatatuiStyle::default()
            .fg(theme_color(theme, "text"))
            .add_modifier(Modifier::BOLD)
    } else {
        RatatuiStyle::default().fg(theme_color(theme, "text"))
    };

    if value.is_empty() && !(focused && !disabled) {
        let placeholder = input.placeholder();
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&placeholder, area.width as usize))
                .style(text_style.add_modifier(Modifier::DIM)),
            area,
        );
        return;
    }

    if focused && !disabled {
        // Split around the cursor so the cursor cell can be inverted
        let cursor = input.text_cursor().min(value.len());
        let before = &value[..cursor];
        let (at, after) = match value[cursor..].char_indices().nth(1) {
            Some((next, _)) => (&value[cursor..cursor + next], &value[cursor + next..]),
            None if cursor < value.len() => (&value[cursor..], ""),
            None => (" ", ""),
        };
        let line = Line::from(vec![
            Span::styled(before.to_string(), text_style),
            Span::styled(at.to_string(), text_style.add_modifier(Modifier::REVERSED)),
            Span::styled(after.to_string(), text_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    } else {
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&value, area.width as usize)).style(text_style),
            area,
        );
    }
}
