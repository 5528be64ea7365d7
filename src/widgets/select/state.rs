//! Select widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use ratatui::layout::Rect;

use crate::dropdown::{Dropdown, OptionListView};
use crate::extract::{KeyExtractor, LabelExtractor};
use crate::outside::Boundary;
use crate::validation::{ErrorDisplay, Validatable};

/// Unique identifier for a Select widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectId(usize);

impl SelectId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for SelectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__select_{}", self.0)
    }
}

/// Display-only state alongside the dropdown core.
struct SelectExtra {
    /// Label shown above the trigger
    label: String,
    /// Placeholder shown when nothing is committed
    placeholder: String,
    /// Validation error message (if any)
    error: Option<String>,
    /// Whether the field has been touched
    touched: bool,
    /// How to display validation errors
    error_display: ErrorDisplay,
    /// Cached anchor rect for popup positioning
    anchor_rect: Option<Rect>,
}

impl Default for SelectExtra {
    fn default() -> Self {
        Self {
            label: String::new(),
            placeholder: "Select an option ...".to_string(),
            error: None,
            touched: false,
            error_display: ErrorDisplay::default(),
            anchor_rect: None,
        }
    }
}

/// A dropdown list of options with a single committed value.
///
/// `Select` instantiates the dropdown-selection controller without text
/// editing: the full option set is always visible while open, arrows move
/// the highlight, Enter commits. The committed value is externally owned;
/// the widget requests changes through the change callback and mirrors
/// the value for display.
pub struct Select<T> {
    /// Unique identifier for this select instance
    id: SelectId,
    /// The dropdown-selection controller
    core: Dropdown<T>,
    /// Display-only state
    extra: Arc<RwLock<SelectExtra>>,
    /// Dirty flag for display-only changes (the core has its own)
    dirty: Arc<AtomicBool>,
    /// Outside-interaction boundary
    boundary: Arc<Boundary>,
}

impl<T: Clone> Select<T> {
    /// Create a new select with the given label projection.
    pub fn new(label_of: impl LabelExtractor<T> + 'static) -> Self {
        let id = SelectId::new();
        let boundary = Arc::new(Boundary::new());
        boundary.register_member(id.to_string());
        Self {
            id,
            core: Dropdown::new(label_of).without_query_filter(),
            extra: Arc::new(RwLock::new(SelectExtra::default())),
            dirty: Arc::new(AtomicBool::new(false)),
            boundary,
        }
    }

    /// Attach an identity projection for selection matching and row ids.
    pub fn with_key(mut self, key_of: impl KeyExtractor<T> + 'static) -> Self {
        self.core = self.core.with_key(key_of);
        self
    }

    /// Get the unique ID for this select.
    pub fn id(&self) -> SelectId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Access the underlying dropdown controller.
    pub fn core(&self) -> &Dropdown<T> {
        &self.core
    }

    // -------------------------------------------------------------------------
    // Options and value
    // -------------------------------------------------------------------------

    /// Replace the full option set.
    pub fn set_options(&self, options: Vec<T>) {
        self.core.set_options(options);
    }

    /// Set the external change callback.
    pub fn set_on_change(&self, handler: impl Fn(Option<&T>) + Send + Sync + 'static) {
        self.core.set_on_change(handler);
    }

    /// The externally owned value changed.
    pub fn sync_value(&self, value: Option<T>) {
        self.core.sync_value(value);
    }

    /// Get the mirrored value.
    pub fn value(&self) -> Option<T> {
        self.core.value()
    }

    /// The text shown on the closed trigger: the committed option's label,
    /// or the placeholder.
    pub fn display_label(&self) -> String {
        self.core
            .value_label()
            .unwrap_or_else(|| self.placeholder())
    }

    /// Whether the trigger is showing the placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.core.value_label().is_none()
    }

    // -------------------------------------------------------------------------
    // Open/close and navigation (delegated to the core)
    // -------------------------------------------------------------------------

    /// Check if the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    /// Open the dropdown. No-op when disabled.
    pub fn open(&self) {
        self.core.open();
    }

    /// Close the dropdown.
    pub fn close(&self) {
        self.core.close();
    }

    /// Toggle the dropdown. No-op when disabled.
    pub fn toggle_open(&self) {
        self.core.toggle_open();
    }

    /// Get the highlighted position.
    pub fn highlight(&self) -> Option<usize> {
        self.core.highlight()
    }

    /// Build the option list view for rendering.
    pub fn list_view(&self) -> OptionListView {
        self.core.list_view()
    }

    /// Commit the option at a list position (row click).
    pub fn click_option(&self, pos: usize) {
        if self.is_disabled() || !self.is_open() {
            return;
        }
        if let Some(option) = self.core.filtered_option(pos) {
            self.core.commit(option);
        }
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
            self.core.on_outside_interaction();
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
            self.core.on_outside_interaction();
            true
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Disabled state
    // -------------------------------------------------------------------------

    /// Check if the select is disabled.
    pub fn is_disabled(&self) -> bool {
        self.core.is_disabled()
    }

    /// Enable or disable the select.
    pub fn set_disabled(&self, disabled: bool) {
        self.core.set_disabled(disabled);
    }

    // -------------------------------------------------------------------------
    // Label / placeholder
    // -------------------------------------------------------------------------

    /// Get the label text.
    pub fn label(&self) -> String {
        self.extra
            .read()
            .map(|guard| guard.label.clone())
            .unwrap_or_default()
    }

    /// Set the label text.
    pub fn set_label(&self, label: impl Into<String>) {
        if let Ok(mut guard) = self.extra.write() {
            guard.label = label.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the placeholder text.
    pub fn placeholder(&self) -> String {
        self.extra
            .read()
            .map(|guard| guard.placeholder.clone())
            .unwrap_or_default()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        if let Ok(mut guard) = self.extra.write() {
            guard.placeholder = placeholder.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Anchor (set during render)
    // -------------------------------------------------------------------------

    /// Get the anchor rect for popup positioning.
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.extra
            .read()
            .map(|guard| guard.anchor_rect)
            .unwrap_or(None)
    }

    /// Set the anchor rect (called during render).
    pub(crate) fn set_anchor_rect(&self, rect: Rect) {
        if let Ok(mut guard) = self.extra.write() {
            guard.anchor_rect = Some(rect);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the select state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst) || self.core.is_dirty()
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
        self.core.clear_dirty();
    }
}

impl<T> Clone for Select<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            core: self.core.clone(),
            extra: Arc::clone(&self.extra),
            dirty: Arc::clone(&self.dirty),
            boundary: Arc::clone(&self.boundary),
        }
    }
}

impl<T> fmt::Debug for Select<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.id)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl<T: Clone + Send + Sync> Validatable for Select<T> {
    type Value = Option<String>;

    fn validation_value(&self) -> Self::Value {
        self.core.value_label()
    }

    fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.extra.write() {
            guard.error = Some(msg.into());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn clear_error(&self) {
        if let Ok(mut guard) = self.extra.write()
            && guard.error.is_some()
        {
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn has_error(&self) -> bool {
        self.extra
            .read()
            .map(|guard| guard.error.is_some())
            .unwrap_or(false)
    }

    fn error(&self) -> Option<String> {
        self.extra
            .read()
            .map(|guard| guard.error.clone())
            .unwrap_or(None)
    }

    fn set_touched(&self, touched: bool) {
        if let Ok(mut guard) = self.extra.write()
            && guard.touched != touched
        {
            guard.touched = touched;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn touched(&self) -> bool {
        self.extra.read().map(|guard| guard.touched).unwrap_or(false)
    }

    fn widget_id(&self) -> String {
        self.id_string()
    }

    fn error_display(&self) -> ErrorDisplay {
        self.extra
            .read()
            .map(|guard| guard.error_display)
            .unwrap_or_default()
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        if let Ok(mut guard) = self.extra.write() {
            guard.error_display = display;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}
