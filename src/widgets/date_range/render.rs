//! Rendering and popup hit testing for the DateRangePicker widget.
//!
//! The popup layout is deterministic: two fixed-width month grids side by
//! side, a quick-range row, and an actions row. [`PopupLayout`] is the
//! single source of truth for both drawing and mapping clicks back to
//! days and buttons.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::theme::Theme;
use crate::utils::text::truncate_with_ellipsis;
use crate::validation::{ErrorDisplay, Validatable};
use crate::widgets::CLEAR_GLYPH;

use super::DateRangePicker;
use super::calendar::CalendarMonth;
use super::quick::QuickRange;

/// Width of one day cell.
const CELL_W: u16 = 4;
/// Days per grid row.
const GRID_COLS: u16 = 7;
/// Grid rows (31 days at most).
const GRID_ROWS: u16 = 5;
/// Width of one month block.
const MONTH_W: u16 = CELL_W * GRID_COLS;
/// Gap between the two month blocks.
const MONTH_GAP: u16 = 3;
/// Popup width: two months plus the gap.
pub const POPUP_W: u16 = MONTH_W * 2 + MONTH_GAP;
/// Popup height: header + grid + divider + quick ranges + actions.
pub const POPUP_H: u16 = 1 + GRID_ROWS + 1 + 1 + 1;

const QUICK_ROW: u16 = 1 + GRID_ROWS + 1;
const ACTIONS_ROW: u16 = QUICK_ROW + 1;

const RESET_LABEL: &str = "Reset";
const CONFIRM_LABEL: &str = "Confirm";

/// What a popup click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupHit {
    /// A day cell.
    Day(NaiveDate),
    /// The previous-month arrow of either header.
    PrevMonth,
    /// The next-month arrow of either header.
    NextMonth,
    /// A quick-range button.
    Quick(QuickRange),
    /// The reset action.
    Reset,
    /// The confirm action.
    Confirm,
}

/// Deterministic popup geometry for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct PopupLayout {
    area: Rect,
    months: [CalendarMonth; 2],
}

impl PopupLayout {
    /// Build the layout for a popup area and its two visible months.
    pub fn new(area: Rect, months: [CalendarMonth; 2]) -> Self {
        Self { area, months }
    }

    /// X offset of a month block within the popup.
    fn block_x(index: usize) -> u16 {
        index as u16 * (MONTH_W + MONTH_GAP)
    }

    /// Map a screen position to whatever it landed on.
    pub fn hit(&self, x: u16, y: u16) -> Option<PopupHit> {
        if !self.area.contains(Position::new(x, y)) {
            return None;
        }
        let rel_x = x - self.area.x;
        let rel_y = y - self.area.y;

        if rel_y == 0 {
            for index in 0..self.months.len() {
                let bx = Self::block_x(index);
                if rel_x == bx {
                    return Some(PopupHit::PrevMonth);
                }
                if rel_x == bx + MONTH_W - 1 {
                    return Some(PopupHit::NextMonth);
                }
            }
            return None;
        }

        if (1..=GRID_ROWS).contains(&rel_y) {
            for (index, month) in self.months.iter().enumerate() {
                let bx = Self::block_x(index);
                if rel_x >= bx && rel_x < bx + MONTH_W {
                    let col = (rel_x - bx) / CELL_W;
                    let day = (rel_y - 1) * GRID_COLS + col + 1;
                    return month.day(day as u32).map(PopupHit::Day);
                }
            }
            return None;
        }

        if rel_y == QUICK_ROW {
            let mut x0 = 0u16;
            for quick in QuickRange::ALL {
                let width = quick.label().len() as u16;
                if rel_x >= x0 && rel_x < x0 + width {
                    return Some(PopupHit::Quick(quick));
                }
                x0 += width + 2;
            }
            return None;
        }

        if rel_y == ACTIONS_ROW {
            let reset_w = RESET_LABEL.len() as u16;
            if rel_x < reset_w {
                return Some(PopupHit::Reset);
            }
            let confirm_x = reset_w + 2;
            if rel_x >= confirm_x && rel_x < confirm_x + CONFIRM_LABEL.len() as u16 {
                return Some(PopupHit::Confirm);
            }
        }

        None
    }
}

/// Resolve a theme color name to ratatui Color.
fn theme_color(theme: &dyn Theme, name: &str) -> RatatuiColor {
    theme
        .resolve(name)
        .map(|c| c.to_ratatui())
        .unwrap_or(RatatuiColor::Gray)
}

/// Render the picker trigger: optional label line, the read-only date
/// field with the × clear affordance, and the error message below when
/// touched.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    picker: &DateRangePicker,
    focused: bool,
    theme: &dyn Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    picker.set_anchor_rect(area);
    picker.boundary().reset_regions();
    picker.boundary().register_region(area);

    let show_error = picker.touched() && picker.has_error();
    let mut y = area.y;

    let label = picker.label();
    if !label.is_empty() && area.height >= 2 {
        let label_style = if show_error {
            RatatuiStyle::default().fg(theme_color(theme, "error"))
        } else if picker.is_disabled() {
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
        picker,
        focused,
        theme,
    );
    y += 1;

    if show_error
        && picker.error_display() == ErrorDisplay::Below
        && y < area.y + area.height
        && let Some(error) = picker.error()
    {
        frame.render_widget(
            Paragraph::new(truncate_with_ellipsis(&error, area.width as usize))
                .style(RatatuiStyle::default().fg(theme_color(theme, "error"))),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

/// The one-line trigger: formatted range text (or dim label), the ×
/// clear affordance when a date is set, and the calendar glyph.
fn render_trigger_line(
    frame: &mut Frame,
    area: Rect,
    picker: &DateRangePicker,
    focused: bool,
    theme: &dyn Theme,
) {
    let text = picker.display_text();
    let disabled = picker.is_disabled();
    let has_value = picker.has_value();

    let base_style = if disabled {
        RatatuiStyle::default().fg(theme_color(theme, "text_disabled"))
    } else if focused {
        RatatuiStyle::default()
            .fg(theme_color(theme, "text"))
            .add_modifier(Modifier::BOLD)
    } else {
        RatatuiStyle::default().fg(theme_color(theme, "text"))
    };

    let affordance_width = if has_value { 4 } else { 2 };
    let inner_width = area.width.saturating_sub(affordance_width) as usize;

    let mut spans: Vec<Span> = Vec::new();
    if text.is_empty() {
        spans.push(Span::styled(
            crate::utils::text::pad_to_width(
                &truncate_with_ellipsis(&picker.label(), inner_width),
                inner_width,
            ),
            base_style.add_modifier(Modifier::DIM),
        ));
    } else {
        spans.push(Span::styled(
            crate::utils::text::pad_to_width(
                &truncate_with_ellipsis(&text, inner_width),
                inner_width,
            ),
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
    spans.push(Span::styled("▦", muted));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the two-month calendar popup below the trigger.
///
/// Registers the popup region with the widget's boundary and caches it
/// for hit testing.
pub fn render_popup(frame: &mut Frame, picker: &DateRangePicker, theme: &dyn Theme) {
    if !picker.is_open() {
        return;
    }
    let Some(anchor) = picker.anchor_rect() else {
        return;
    };

    let screen = frame.area();
    let label_offset = if picker.label().is_empty() { 1 } else { 2 };
    let popup_y = anchor.y.saturating_add(label_offset);
    if popup_y >= screen.height {
        return;
    }
    let width = POPUP_W.min(screen.width.saturating_sub(anchor.x));
    let height = POPUP_H.min(screen.height - popup_y);
    let popup = Rect::new(anchor.x, popup_y, width, height);

    picker.set_popup_rect(popup);
    picker.boundary().register_region(popup);

    let surface = RatatuiStyle::default()
        .bg(theme_color(theme, "surface"))
        .fg(theme_color(theme, "text"));
    frame.render_widget(Clear, popup);
    for row in 0..height {
        frame.render_widget(
            Paragraph::new(" ".repeat(width as usize)).style(surface),
            Rect::new(popup.x, popup.y + row, width, 1),
        );
    }

    let months = picker.months();
    for (index, month) in months.iter().enumerate() {
        let bx = popup.x + PopupLayout::block_x(index);
        if bx + MONTH_W > popup.x + width {
            break;
        }
        render_month_header(frame, Rect::new(bx, popup.y, MONTH_W, 1), month, theme);
        render_month_grid(frame, bx, popup.y + 1, height, *month, picker, theme);
    }

    let quick_y = popup.y + QUICK_ROW;
    if quick_y < popup.y + height {
        render_quick_row(frame, Rect::new(popup.x, quick_y, width, 1), theme);
    }
    let actions_y = popup.y + ACTIONS_ROW;
    if actions_y < popup.y + height {
        render_actions_row(frame, Rect::new(popup.x, actions_y, width, 1), theme);
    }
}

fn render_month_header(frame: &mut Frame, area: Rect, month: &CalendarMonth, theme: &dyn Theme) {
    let muted = RatatuiStyle::default().fg(theme_color(theme, "muted"));
    let title_style = RatatuiStyle::default()
        .fg(theme_color(theme, "text"))
        .bg(theme_color(theme, "surface"))
        .add_modifier(Modifier::BOLD);
    let inner = (MONTH_W - 2) as usize;
    let line = Line::from(vec![
        Span::styled("<", muted.bg(theme_color(theme, "surface"))),
        Span::styled(format!("{:^inner$}", month.title()), title_style),
        Span::styled(">", muted.bg(theme_color(theme, "surface"))),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_month_grid(
    frame: &mut Frame,
    x: u16,
    y: u16,
    popup_height: u16,
    month: CalendarMonth,
    picker: &DateRangePicker,
    theme: &dyn Theme,
) {
    let days = month.days_in_month();
    let surface_bg = theme_color(theme, "surface");
    for row in 0..GRID_ROWS {
        if 1 + row >= popup_height {
            break;
        }
        let mut spans: Vec<Span> = Vec::with_capacity(GRID_COLS as usize);
        for col in 0..GRID_COLS {
            let day = row * GRID_COLS + col + 1;
            if day as u32 > days {
                spans.push(Span::styled(
                    " ".repeat(CELL_W as usize),
                    RatatuiStyle::default().bg(surface_bg),
                ));
                continue;
            }
            let Some(date) = month.day(day as u32) else {
                continue;
            };
            let state = picker.day_state(date);
            let style = if state.selected {
                RatatuiStyle::default()
                    .fg(theme_color(theme, "background"))
                    .bg(theme_color(theme, "selection"))
                    .add_modifier(Modifier::BOLD)
            } else if state.in_range {
                RatatuiStyle::default()
                    .fg(theme_color(theme, "text"))
                    .bg(theme_color(theme, "range"))
            } else {
                RatatuiStyle::default()
                    .fg(theme_color(theme, "text"))
                    .bg(surface_bg)
            };
            spans.push(Span::styled(format!("{day:>3} "), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x, y + row, MONTH_W, 1),
        );
    }
}

fn render_quick_row(frame: &mut Frame, area: Rect, theme: &dyn Theme) {
    let button = RatatuiStyle::default()
        .fg(theme_color(theme, "primary"))
        .bg(theme_color(theme, "surface"));
    let gap = RatatuiStyle::default().bg(theme_color(theme, "surface"));
    let mut spans: Vec<Span> = Vec::new();
    for (index, quick) in QuickRange::ALL.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", gap));
        }
        spans.push(Span::styled(quick.label(), button));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_actions_row(frame: &mut Frame, area: Rect, theme: &dyn Theme) {
    let button = RatatuiStyle::default()
        .fg(theme_color(theme, "primary"))
        .bg(theme_color(theme, "surface"));
    let gap = RatatuiStyle::default().bg(theme_color(theme, "surface"));
    let line = Line::from(vec![
        Span::styled(RESET_LABEL, button),
        Span::styled("  ", gap),
        Span::styled(CONFIRM_LABEL, button),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
