//! Autocomplete widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use ratatui::layout::Rect;

use crate::dropdown::{Dropdown, OptionListView};
use crate::extract::{KeyExtractor, LabelExtractor};
use crate::outside::Boundary;
use crate::validation::{ErrorDisplay, Validatable};

/// Unique identifier for an Autocomplete widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutocompleteId(usize);

impl AutocompleteId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for AutocompleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__autocomplete_{}", self.0)
    }
}

/// Display-only state alongside the dropdown core.
#[derive(Default)]
struct AutocompleteExtra {
    /// Label shown above the field (also the placeholder fallback)
    label: String,
    /// Placeholder text; when empty, the label is shown instead
    placeholder: String,
    /// Cursor position in the query text (byte offset)
    text_cursor: usize,
    /// Validation error message (if any)
    error: Option<String>,
    /// Whether the field has been touched
    touched: bool,
    /// How to display validation errors
    error_display: ErrorDisplay,
    /// Cached anchor rect for popup positioning
    anchor_rect: Option<Rect>,
}

/// A text input with substring-filtered dropdown suggestions.
///
/// `Autocomplete` combines text editing with the dropdown-selection
/// controller: typing updates the query buffer (opening the list), arrows
/// navigate the filtered options, Enter commits the highlighted option.
/// The committed value is externally owned; a value whose label matches no
/// option is displayed verbatim and selection matching simply never
/// succeeds.
pub struct Autocomplete<T> {
    /// Unique identifier for this autocomplete instance
    id: AutocompleteId,
    /// The dropdown-selection controller
    core: Dropdown<T>,
    /// Display-only state
    extra: Arc<RwLock<AutocompleteExtra>>,
    /// Dirty flag for display-only changes (the core has its own)
    dirty: Arc<AtomicBool>,
    /// Outside-interaction boundary
    boundary: Arc<Boundary>,
}

impl<T: Clone> Autocomplete<T> {
    /// Create a new autocomplete with the given label projection.
    pub fn new(label_of: impl LabelExtractor<T> + 'static) -> Self {
        let id = AutocompleteId::new();
        let boundary = Arc::new(Boundary::new());
        boundary.register_member(id.to_string());
        Self {
            id,
            core: Dropdown::new(label_of),
            extra: Arc::new(RwLock::new(AutocompleteExtra::default())),
            dirty: Arc::new(AtomicBool::new(false)),
            boundary,
        }
    }

    /// Attach an identity projection for selection matching and row ids.
    pub fn with_key(mut self, key_of: impl KeyExtractor<T> + 'static) -> Self {
        self.core = self.core.with_key(key_of);
        self
    }

    /// Get the unique ID for this autocomplete.
    pub fn id(&self) -> AutocompleteId {
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

    /// The externally owned value changed: re-derive the query text.
    pub fn sync_value(&self, value: Option<T>) {
        self.core.sync_value(value);
        self.text_cursor_end();
    }

    /// Get the mirrored value.
    pub fn value(&self) -> Option<T> {
        self.core.value()
    }

    /// Whether a value is committed (drives the clear affordance).
    pub fn has_value(&self) -> bool {
        self.core.value().is_some()
    }

    /// Get the current query text.
    pub fn text(&self) -> String {
        self.core.query()
    }

    // -------------------------------------------------------------------------
    // Text editing (routed through the controller's query buffer)
    // -------------------------------------------------------------------------

    /// Get the text cursor position (byte offset).
    pub fn text_cursor(&self) -> usize {
        let len = self.core.query().len();
        self.extra
            .read()
            .map(|guard| guard.text_cursor.min(len))
            .unwrap_or(0)
    }

    fn set_text_cursor(&self, cursor: usize) {
        if let Ok(mut guard) = self.extra.write() {
            guard.text_cursor = cursor;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Editing clears any validation error.
    fn reset_error(&self) {
        if let Ok(mut guard) = self.extra.write()
            && guard.error.is_some()
        {
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Insert a character at the cursor, opening the dropdown.
    pub fn insert_char(&self, c: char) {
        if self.is_disabled() {
            return;
        }
        let mut text = self.core.query();
        let cursor = self.text_cursor();
        text.insert(cursor, c);
        self.reset_error();
        self.core.set_query(text);
        self.set_text_cursor(cursor + c.len_utf8());
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&self) {
        if self.is_disabled() {
            return;
        }
        let mut text = self.core.query();
        let cursor = self.text_cursor();
        if cursor == 0 {
            return;
        }
        let prev_cursor = text[..cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        text.remove(prev_cursor);
        self.reset_error();
        self.core.set_query(text);
        self.set_text_cursor(prev_cursor);
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete_char_at(&self) {
        if self.is_disabled() {
            return;
        }
        let mut text = self.core.query();
        let cursor = self.text_cursor();
        if cursor >= text.len() {
            return;
        }
        text.remove(cursor);
        self.reset_error();
        self.core.set_query(text);
        self.set_text_cursor(cursor);
    }

    /// Move text cursor left.
    pub fn text_cursor_left(&self) {
        let text = self.core.query();
        let cursor = self.text_cursor();
        if cursor == 0 {
            return;
        }
        let prev = text[..cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.set_text_cursor(prev);
    }

    /// Move text cursor right.
    pub fn text_cursor_right(&self) {
        let text = self.core.query();
        let cursor = self.text_cursor();
        if cursor >= text.len() {
            return;
        }
        let next = text[cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| cursor + i)
            .unwrap_or(text.len());
        self.set_text_cursor(next);
    }

    /// Move text cursor to start.
    pub fn text_cursor_home(&self) {
        self.set_text_cursor(0);
    }

    /// Move text cursor to end.
    pub fn text_cursor_end(&self) {
        self.set_text_cursor(self.core.query().len());
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Commit the highlighted option, if any. Returns whether a commit
    /// happened.
    pub fn select_highlighted(&self) -> bool {
        let committed = self.core.commit_highlighted();
        if committed {
            self.text_cursor_end();
        }
        committed
    }

    /// Commit the option at a list position (row click).
    pub fn click_option(&self, pos: usize) {
        if self.is_disabled() || !self.is_open() {
            return;
        }
        if let Some(option) = self.core.filtered_option(pos) {
            self.core.commit(option);
            self.text_cursor_end();
        }
    }

    /// Clear the selection and the query text.
    pub fn clear(&self) {
        self.core.clear();
        self.set_text_cursor(0);
    }

    // -------------------------------------------------------------------------
    // Open/close and navigation
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

    /// Focus entered the field: open the dropdown (unless disabled).
    pub fn handle_focus(&self) {
        self.core.open();
    }

    /// Get the highlighted position.
    pub fn highlight(&self) -> Option<usize> {
        self.core.highlight()
    }

    /// Build the option list view for rendering.
    pub fn list_view(&self) -> OptionListView {
        self.core.list_view()
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

    /// Check if the autocomplete is disabled.
    pub fn is_disabled(&self) -> bool {
        self.core.is_disabled()
    }

    /// Enable or disable the autocomplete.
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

    /// The placeholder shown while no value is committed: the explicit
    /// placeholder if set, else the label.
    pub fn placeholder(&self) -> String {
        self.extra
            .read()
            .map(|guard| {
                if guard.placeholder.is_empty() {
                    guard.label.clone()
                } else {
                    guard.placeholder.clone()
                }
            })
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

    /// Check if the autocomplete state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst) || self.core.is_dirty()
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
        self.core.clear_dirty();
    }
}

impl<T> Clone for Autocomplete<T> {
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

impl<T> fmt::Debug for Autocomplete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("id", &self.id)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl<T: Clone + Send + Sync> Validatable for Autocomplete<T> {
    type Value = String;

    fn validation_value(&self) -> Self::Value {
        self.text()
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
