//! Rendering for the Select widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;
use crate::utils::text::{pad_to_width, truncate_with_ellipsis};
use crate::validation::{ErrorDisplay, Validatable};
use crate::widgets::toggle_indicator;

use super::Select;

/// Resolve a theme color name to ratatui Color.
fn theme_color(theme: &dyn Theme, name: &str) -> RatatuiColor {
    theme
        .resolve(name)
        .map(|c| c.to_ratatui())
        .unwrap_or(RatatuiColor::Gray)
}

/// Render the select trigger (the inline closed appearance).
///
/// Also registers the trigger region with the widget's boundary and
/// caches the anchor for popup positioning.
pub fn render<T: Clone + Send + Sync>(
    frame: &mut Frame,
    area: Rect,
    select: &Select<T>,
    focused: bool,
    theme: &dyn Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    select.set_anchor_rect(area);
    select.boundary().reset_regions();
    select.boundary().register_region(area);

    let show_error = select.touched() && select.has_error();
    let mut y = area.y;

    let label = select.label();
    if !label.is_empty() && area.height >= 2 {
        let label_style = if show_error {
            RatatuiStyle::default().fg(theme_color(theme, "error"))
        } else if select.is_disabled() {
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
        select,
        focused,
        theme,
    );
    y += 1;

    if show_error
        && select.error_display() == ErrorDisplay::Below
        && y < area.y + area.height
        && let Some(error) = select.error()
    {
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&error, area.width as usize))
                .style(RatatuiStyle::default().fg(theme_color(theme, "error"))),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

/// The one-line trigger: committed label or placeholder, plus the ▼/▲
/// indicator standing in for the arrow icon.
fn render_trigger_line<T: Clone + Send + Sync>(
    frame: &mut Frame,
    area: Rect,
    select: &Select<T>,
    focused: bool,
    theme: &dyn Theme,
) {
    let display_text = select.display_label();
    let is_placeholder = select.is_placeholder();

    let base_style = if select.is_disabled() {
        RatatuiStyle::default().fg(theme_color(theme, "text_disabled"))
    } else if focused {
        RatatuiStyle::default()
            .fg(theme_color(theme, "text"))
            .add_modifier(Modifier::BOLD)
    } else {
        RatatuiStyle::default().fg(theme_color(theme, "text"))
    };

    let text_style = if is_placeholder {
        base_style.add_modifier(Modifier::DIM)
    } else {
        base_style
    };

    let indicator = toggle_indicator(select.is_open());

    // Reserve two cells for the indicator and its gap
    let inner_width = area.width.saturating_sub(2) as usize;
    let truncated = truncate_with_ellipsis(&display_text, inner_width);

    let indicator_style = RatatuiStyle::default()
        .fg(theme_color(theme, "muted"))
        .add_modifier(Modifier::DIM);

    let line = Line::from(vec![
        Span::styled(pad_to_width(&truncated, inner_width), text_style),
        Span::styled(" ", base_style),
        Span::styled(indicator, indicator_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the open dropdown below the trigger.
///
/// An empty filtered set renders no list at all. Registers the popup
/// region with the widget's boundary.
pub fn render_popup<T: Clone + Send + Sync>(
    frame: &mut Frame,
    select: &Select<T>,
    theme: &dyn Theme,
) {
    if !select.is_open() {
        return;
    }
    let view = select.list_view();
    if view.is_empty() {
        return;
    }
    let Some(anchor) = select.anchor_rect() else {
        return;
    };

    let screen = frame.area();
    let label_offset = if select.label().is_empty() { 1 } else { 2 };
    let popup_y = anchor.y.saturating_add(label_offset);
    if popup_y >= screen.height {
        return;
    }
    let height = (view.len() as u16).min(screen.height - popup_y);
    let popup = Rect::new(anchor.x, popup_y, anchor.width, height);
    select.boundary().register_region(popup);

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
