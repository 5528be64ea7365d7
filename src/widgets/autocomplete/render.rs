//! Rendering for the Autocomplete widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;
use crate::utils::text::{pad_to_width, truncate_with_ellipsis};
use crate::validation::{ErrorDisplay, Validatable};
use crate::widgets::{CLEAR_GLYPH, toggle_indicator};

use super::Autocomplete;

/// Resolve a theme color name to ratatui Color.
fn theme_color(theme: &dyn Theme, name: &str) -> RatatuiColor {
    theme
        .resolve(name)
        .map(|c| c.to_ratatui())
        .unwrap_or(RatatuiColor::Gray)
}

/// Render the autocomplete: optional label line, the editable trigger,
/// and the error message below when touched.
///
/// Also registers the trigger region with the widget's boundary and
/// caches the anchor for popup positioning.
pub fn render<T: Clone + Send + Sync>(
    frame: &mut Frame,
    area: Rect,
    autocomplete: &Autocomplete<T>,
    focused: bool,
    theme: &dyn Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    autocomplete.set_anchor_rect(area);
    autocomplete.boundary().reset_regions();
    autocomplete.boundary().register_region(area);

    let show_error = autocomplete.touched() && autocomplete.has_error();
    let mut y = area.y;

    let label = autocomplete.label();
    if !label.is_empty() && area.height >= 2 {
        let label_style = if show_error {
            RatatuiStyle::default().fg(theme_color(theme, "error"))
        } else if autocomplete.is_disabled() {
            RatatuiStyle::default().fg(theme_color(theme, "text_disabled"))
        } else {
            RatatuiStyle::default().fg(theme_color(theme, "muted"))
        };
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&label, area.width as usize))
                .style(label_style),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
    }

    if y >= area.y + area.height {
        return;
    }
    render_trigger_line(
        frame,
        Rect::new(area.x, y, area.width, 1),
        autocomplete,
        focused,
        theme,
    );
    y += 1;

    if show_error
        && autocomplete.error_display() == ErrorDisplay::Below
        && y < area.y + area.height
        && let Some(error) = autocomplete.error()
    {
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&error, area.width as usize))
                .style(RatatuiStyle::default().fg(theme_color(theme, "error"))),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

/// The one-line trigger: query text (or placeholder), the × clear
/// affordance when a value is committed, and the ▼/▲ indicator standing
/// in for the arrow icon.
fn render_trigger_line<T: Clone + Send + Sync>(
    frame: &mut Frame,
    area: Rect,
    autocomplete: &Autocomplete<T>,
    focused: bool,
    theme: &dyn Theme,
) {
    let text = autocomplete.text();
    let disabled = autocomplete.is_disabled();
    let has_value = autocomplete.has_value();

    let base_style = if disabled {
        RatatuiStyle::default().fg(theme_color(theme, "text_disabled"))
    } else if focused {
        RatatuiStyle::default()
            .fg(theme_color(theme, "text"))
            .add_modifier(Modifier::BOLD)
    } else {
        RatatuiStyle::default().fg(theme_color(theme, "text"))
    };

    // Trailing affordances: "× ▼" when clearable, "▼" otherwise
    let affordance_width = if has_value { 4 } else { 2 };
    let inner_width = area.width.saturating_sub(affordance_width) as usize;

    let mut spans: Vec<Span> = Vec::new();
    if text.is_empty() {
        let placeholder = autocomplete.placeholder();
        spans.push(Span::styled(
            pad_to_width(
                &truncate_with_ellipsis(&placeholder, inner_width),
                inner_width,
            ),
            base_style.add_modifier(Modifier::DIM),
        ));
    } else if focused && !disabled {
        // Split around the cursor so the cursor cell can be inverted
        let cursor = autocomplete.text_cursor().min(text.len());
        let before = &text[..cursor];
        let (at, after) = match text[cursor..].char_indices().nth(1) {
            Some((next, _)) => (&text[cursor..cursor + next], &text[cursor + next..]),
            None if cursor < text.len() => (&text[cursor..], ""),
            None => (" ", ""),
        };
        spans.push(Span::styled(before.to_string(), base_style));
        spans.push(Span::styled(
            at.to_string(),
            base_style.add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(
            pad_to_width(after, inner_width.saturating_sub(before.len() + at.len())),
            base_style,
        ));
    } else {
        spans.push(Span::styled(
            pad_to_width(&truncate_with_ellipsis(&text, inner_width), inner_width),
            base_style,
        ));
    }

    let muted = RatatuiStyle::default()
        .fg(theme_color(theme, "muted"))
        .add_modifier(Modifier::DIM);
    if has_value && !disabled {
        spans.push(Span::styled(" ", base_style));
        spans.push(Span::styled(CLEAR_GLYPH, muted));
    }
    spans.push(Span::styled(" ", base_style));
    spans.push(Span::styled(
        toggle_indicator(autocomplete.is_open()),
        muted,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the open suggestion list below the trigger.
///
/// An empty filtered set renders no list at all. Registers the popup
/// region with the widget's boundary.
pub fn render_popup<T: Clone + Send + Sync>(
    frame: &mut Frame,
    autocomplete: &Autocomplete<T>,
    theme: &dyn Theme,
) {
    if !autocomplete.is_open() {
        return;
    }
    let view = autocomplete.list_view();
    if view.is_empty() {
        return;
    }
    let Some(anchor) = autocomplete.anchor_rect() else {
        return;
    };

    let screen = frame.area();
    let label_offset = if autocomplete.label().is_empty() { 1 } else { 2 };
    let popup_y = anchor.y.saturating_add(label_offset);
    if popup_y >= screen.height {
        return;
    }
    let height = (view.len() as u16).min(screen.height - popup_y);
    let popup = Rect::new(anchor.x, popup_y, anchor.width, height);
    autocomplete.boundary().register_region(popup);

    let surface = RatatuiStyle::default().bg(theme_color(theme, "surface"));
    for (pos, row) in view.rows.iter().take(height as usize).enumerate() {
        let row_style = if row.highlighted {
            RatatuiStyle::default()
                .fg(theme_color(theme, "background"))
                .bg(theme_color(theme, "highlight"))
        } else if row.selected {
            RatatuiStyle::default()
                .fg(theme_color(theme, "background"))
                .bg(theme_color(theme, "selection"))
        } else {
            surface.fg(theme_color(theme, "text"))
        };
        let text = pad_to_width(
            &truncate_with_ellipsis(&row.label, popup.width.saturating_sub(1) as usize),
            popup.width as usize,
        );
        frame.render_widget(
            Paragraph::new(text).style(row_style),
            Rect::new(popup.x, popup.y + pos as u16, popup.width, 1),
        );
    }
}
