//! DateRangePicker widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use ratatui::layout::Rect;

use crate::outside::Boundary;
use crate::validation::{ErrorDisplay, Validatable};

use super::calendar::CalendarMonth;
use super::quick::QuickRange;

/// A date range: `(start, end)`, either of which may be unset.
pub type DateRange = (Option<NaiveDate>, Option<NaiveDate>);

/// Display format for a single endpoint.
const DATE_FORMAT: &str = "%d/%m/%Y";

type RangeHandler = Arc<dyn Fn(DateRange) + Send + Sync>;

/// Unique identifier for a DateRangePicker widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRangeId(usize);

impl DateRangeId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for DateRangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__daterange_{}", self.0)
    }
}

/// How a day cell should be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayState {
    /// The day is a committed endpoint (start or end).
    pub selected: bool,
    /// The day falls inside the committed range, or inside the hover
    /// preview while the end is still open.
    pub in_range: bool,
}

/// Internal state for a DateRangePicker widget.
struct DateRangeInner {
    /// Mirror of the externally owned range start
    start: Option<NaiveDate>,
    /// Mirror of the externally owned range end
    end: Option<NaiveDate>,
    /// Transient hover preview (never committed)
    hover: Option<NaiveDate>,
    /// First of the two visible months
    view: CalendarMonth,
    /// Label shown above the trigger
    label: String,
    /// Validation error message (if any)
    error: Option<String>,
    /// Whether the field has been touched
    touched: bool,
    /// How to display validation errors
    error_display: ErrorDisplay,
    /// Cached anchor rect for popup positioning
    anchor_rect: Option<Rect>,
    /// Cached popup rect for hit testing
    popup_rect: Option<Rect>,
    /// External change callback
    on_change: Option<RangeHandler>,
}

/// A two-month calendar picker committing `(start, end)` date pairs.
///
/// Shares the open/outside-interaction shape of the dropdown widgets but
/// replaces the option list with a calendar grid and a two-click range
/// state machine: the first click sets the start, the second orders the
/// pair and closes. Hovering previews the open end of an in-progress
/// range; quick-range shortcuts commit both endpoints atomically and move
/// the visible month to the new start.
pub struct DateRangePicker {
    /// Unique identifier for this picker instance
    id: DateRangeId,
    /// Internal state
    inner: Arc<RwLock<DateRangeInner>>,
    /// Whether the calendar popup is visible
    is_open: Arc<AtomicBool>,
    /// Disabled pickers ignore all open/toggle/selection requests
    disabled: Arc<AtomicBool>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Outside-interaction boundary
    boundary: Arc<Boundary>,
}

impl DateRangePicker {
    /// Create a new picker viewing the current month.
    pub fn new() -> Self {
        Self::with_view_month(CalendarMonth::from_date(
            chrono::Local::now().date_naive(),
        ))
    }

    /// Create a picker with an explicit first visible month.
    pub fn with_view_month(view: CalendarMonth) -> Self {
        let id = DateRangeId::new();
        let boundary = Arc::new(Boundary::new());
        boundary.register_member(id.to_string());
        Self {
            id,
            inner: Arc::new(RwLock::new(DateRangeInner {
                start: None,
                end: None,
                hover: None,
                view,
                label: String::new(),
                error: None,
                touched: false,
                error_display: ErrorDisplay::default(),
                anchor_rect: None,
                popup_rect: None,
                on_change: None,
            })),
            is_open: Arc::new(AtomicBool::new(false)),
            disabled: Arc::new(AtomicBool::new(false)),
            dirty: Arc::new(AtomicBool::new(false)),
            boundary,
        }
    }

    /// Get the unique ID for this picker.
    pub fn id(&self) -> DateRangeId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Range state
    // -------------------------------------------------------------------------

    /// Get the mirrored range.
    pub fn range(&self) -> DateRange {
        self.inner
            .read()
            .map(|guard| (guard.start, guard.end))
            .unwrap_or((None, None))
    }

    /// Set the external change callback.
    pub fn set_on_change(&self, handler: impl Fn(DateRange) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_change = Some(Arc::new(handler));
        }
    }

    /// The externally owned range changed: update the mirror without
    /// invoking the callback.
    pub fn sync_range(&self, range: DateRange) {
        if let Ok(mut guard) = self.inner.write() {
            (guard.start, guard.end) = range;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Commit a range: update the mirror and invoke the change callback.
    fn commit_range(&self, range: DateRange) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            (guard.start, guard.end) = range;
            self.dirty.store(true, Ordering::SeqCst);
            guard.on_change.clone()
        };
        log::trace!("{} commit {:?}", self.id, range);
        if let Some(handler) = handler {
            handler(range);
        }
    }

    /// A day of the calendar was clicked.
    ///
    /// With no start (or a completed range), the click starts a new range.
    /// With an open range, the click completes it — ordering the pair —
    /// and closes the popup.
    pub fn select_day(&self, date: NaiveDate) {
        if self.is_disabled() {
            return;
        }
        match self.range() {
            (Some(start), None) => {
                let range = if date < start {
                    (Some(date), Some(start))
                } else {
                    (Some(start), Some(date))
                };
                self.commit_range(range);
                self.close();
            }
            _ => self.commit_range((Some(date), None)),
        }
    }

    /// Update the transient hover preview.
    pub fn hover_day(&self, date: Option<NaiveDate>) {
        if let Ok(mut guard) = self.inner.write()
            && guard.hover != date
        {
            guard.hover = date;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// The preview end while a range is in progress: the hovered day when
    /// a start is set and the end is not.
    pub fn preview_end(&self) -> Option<NaiveDate> {
        self.inner.read().ok().and_then(|guard| {
            if guard.start.is_some() && guard.end.is_none() {
                guard.hover
            } else {
                None
            }
        })
    }

    /// How a day cell should be presented, given the committed range and
    /// the hover preview.
    pub fn day_state(&self, date: NaiveDate) -> DayState {
        let Ok(guard) = self.inner.read() else {
            return DayState::default();
        };
        let selected = guard.start == Some(date) || guard.end == Some(date);
        let in_range = match guard.start {
            None => false,
            Some(start) => {
                let effective_end = if guard.end.is_none() { guard.hover } else { guard.end };
                match effective_end {
                    Some(end) => date >= start && date <= end,
                    None => date == start,
                }
            }
        };
        DayState { selected, in_range }
    }

    /// Apply a quick-range shortcut relative to `today`, moving the
    /// visible month to the new start. The popup stays open.
    pub fn apply_quick_range(&self, quick: QuickRange, today: NaiveDate) {
        if self.is_disabled() {
            return;
        }
        let (start, end) = quick.resolve(today);
        self.commit_range((Some(start), end));
        self.set_view_month(CalendarMonth::from_date(start));
    }

    /// Clear both endpoints. The popup stays as it is.
    pub fn clear(&self) {
        self.commit_range((None, None));
    }

    /// Confirm the current range: just closes the popup.
    pub fn confirm(&self) {
        self.close();
    }

    /// The trigger display text: `DD/MM/YYYY` for a single start date,
    /// `DD/MM/YYYY - DD/MM/YYYY` for a full range, empty otherwise.
    pub fn display_text(&self) -> String {
        match self.range() {
            (Some(start), Some(end)) => format!(
                "{} - {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
            (Some(start), None) => start.format(DATE_FORMAT).to_string(),
            _ => String::new(),
        }
    }

    /// Whether any endpoint is set (drives the clear affordance).
    pub fn has_value(&self) -> bool {
        let (start, end) = self.range();
        start.is_some() || end.is_some()
    }

    // -------------------------------------------------------------------------
    // Visible months
    // -------------------------------------------------------------------------

    /// First of the two visible months.
    pub fn view_month(&self) -> CalendarMonth {
        self.inner
            .read()
            .map(|guard| guard.view)
            .unwrap_or(CalendarMonth::from_date(NaiveDate::default()))
    }

    /// Set the first visible month.
    pub fn set_view_month(&self, view: CalendarMonth) {
        if let Ok(mut guard) = self.inner.write() {
            guard.view = view;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// The two months shown side by side.
    pub fn months(&self) -> [CalendarMonth; 2] {
        let view = self.view_month();
        [view, view.next()]
    }

    /// Shift the view one month back.
    pub fn prev_month(&self) {
        self.set_view_month(self.view_month().prev());
    }

    /// Shift the view one month forward.
    pub fn next_month(&self) {
        self.set_view_month(self.view_month().next());
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Check if the calendar popup is visible.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    /// Open the popup. No-op when disabled.
    pub fn open(&self) {
        if self.is_disabled() {
            return;
        }
        if !self.is_open.swap(true, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Close the popup. Idempotent.
    pub fn close(&self) {
        if self.is_open.swap(false, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
        }
        self.hover_day(None);
    }

    /// Toggle the popup. No-op when disabled.
    pub fn toggle_open(&self) {
        if self.is_disabled() {
            return;
        }
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// An interaction landed outside the widget boundary: close.
    pub fn on_outside_interaction(&self) {
        log::debug!("{} dismissed by outside interaction", self.id);
        self.close();
    }

    // -------------------------------------------------------------------------
    // Outside interaction
    // -------------------------------------------------------------------------

    /// The widget's outside-interaction boundary.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// A document-level press occurred. Dismisses the popup when the press
    /// landed outside the boundary. Returns whether it dismissed.
    pub fn handle_global_click(&self, x: u16, y: u16) -> bool {
        if self.is_open() && self.boundary.pointer_down(x, y) {
            self.on_outside_interaction();
            true
        } else {
            false
        }
    }

    /// Focus moved to another widget (or left the application entirely).
    /// Dismisses the popup when the new focus target is outside the
    /// boundary subtree. Returns whether it dismissed.
    pub fn handle_focus_change(&self, next: Option<&str>) -> bool {
        if self.is_open() && self.boundary.focus_moved(next) {
            self.on_outside_interaction();
            true
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Disabled state
    // -------------------------------------------------------------------------

    /// Check if the picker is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Enable or disable the picker.
    pub fn set_disabled(&self, disabled: bool) {
        if self.disabled.swap(disabled, Ordering::SeqCst) != disabled {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Label
    // -------------------------------------------------------------------------

    /// Get the label text.
    pub fn label(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.label.clone())
            .unwrap_or_default()
    }

    /// Set the label text.
    pub fn set_label(&self, label: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.label = label.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Anchor / popup rects (set during render)
    // -------------------------------------------------------------------------

    /// Get the anchor rect for popup positioning.
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.inner
            .read()
            .map(|guard| guard.anchor_rect)
            .unwrap_or(None)
    }

    /// Set the anchor rect (called during render).
    pub(crate) fn set_anchor_rect(&self, rect: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.anchor_rect = Some(rect);
        }
    }

    /// Get the last rendered popup rect, for hit testing.
    pub fn popup_rect(&self) -> Option<Rect> {
        self.inner
            .read()
            .map(|guard| guard.popup_rect)
            .unwrap_or(None)
    }

    /// Set the popup rect (called during render).
    pub(crate) fn set_popup_rect(&self, rect: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.popup_rect = Some(rect);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the picker state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for DateRangePicker {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            is_open: Arc::clone(&self.is_open),
            disabled: Arc::clone(&self.disabled),
            dirty: Arc::clone(&self.dirty),
            boundary: Arc::clone(&self.boundary),
        }
    }
}

impl Default for DateRangePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DateRangePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRangePicker")
            .field("id", &self.id)
            .field("range", &self.range())
            .field("is_open", &self.is_open())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for DateRangePicker {
    type Value = DateRange;

    fn validation_value(&self) -> Self::Value {
        self.range()
    }

    fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = Some(msg.into());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.error.is_some()
        {
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn has_error(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.error.is_some())
            .unwrap_or(false)
    }

    fn error(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.error.clone())
            .unwrap_or(None)
    }

    fn set_touched(&self, touched: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.touched != touched
        {
            guard.touched = touched;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn touched(&self) -> bool {
        self.inner.read().map(|guard| guard.touched).unwrap_or(false)
    }

    fn widget_id(&self) -> String {
        self.id_string()
    }

    fn error_display(&self) -> ErrorDisplay {
        self.inner
            .read()
            .map(|guard| guard.error_display)
            .unwrap_or_default()
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error_display = display;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}
