//! Input widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::validation::{ErrorDisplay, Validatable};

/// Unique identifier for an Input widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(usize);

impl InputId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__input_{}", self.0)
    }
}

/// What kind of text the input accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    /// Free text.
    #[default]
    Text,
    /// Digits only; non-digit characters are dropped on insert.
    Number,
}

type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Internal state for an Input widget.
#[derive(Default)]
struct InputInner {
    /// Current text value
    value: String,
    /// Cursor position in text (byte offset)
    text_cursor: usize,
    /// Label shown above the field
    label: String,
    /// Placeholder text
    placeholder: String,
    /// Accepted text kind
    kind: InputKind,
    /// Validation error message (if any)
    error: Option<String>,
    /// Whether the field has been touched (errors render only when touched)
    touched: bool,
    /// How to display validation errors
    error_display: ErrorDisplay,
    /// External change callback
    on_change: Option<ChangeHandler>,
}

/// A single-line controlled text field.
///
/// The authoritative value is owned by the embedding form: the widget
/// reports edits through the change callback and the embedder pushes the
/// accepted value back via [`set_value`](Input::set_value).
///
/// # Example
///
/// ```ignore
/// let name = Input::with_placeholder("Enter your name");
/// name.set_label("Full name");
/// name.set_on_change(|value| println!("changed: {value}"));
/// ```
pub struct Input {
    /// Unique identifier for this input instance
    id: InputId,
    /// Internal state
    inner: Arc<RwLock<InputInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Disabled inputs ignore all edits
    disabled: Arc<AtomicBool>,
}

impl Input {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self {
            id: InputId::new(),
            inner: Arc::new(RwLock::new(InputInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
            disabled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create an input with a placeholder.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        let input = Self::new();
        if let Ok(mut guard) = input.inner.write() {
            guard.placeholder = placeholder.into();
        }
        input
    }

    /// Create an input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let input = Self::new();
        if let Ok(mut guard) = input.inner.write() {
            let value = value.into();
            guard.text_cursor = value.len();
            guard.value = value;
        }
        input
    }

    /// Get the unique ID for this input.
    pub fn id(&self) -> InputId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current text value.
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Set the text value, applying the input kind's character filter.
    pub fn set_value(&self, value: impl Into<String>) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            let value = Self::filtered(guard.kind, &value.into());
            if guard.value == value {
                return;
            }
            guard.text_cursor = value.len();
            guard.value = value;
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
            guard.on_change.clone()
        };
        if let Some(handler) = handler {
            handler(&self.value());
        }
    }

    /// Clear the text value.
    pub fn clear(&self) {
        self.set_value("");
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.value.is_empty())
            .unwrap_or(true)
    }

    /// Apply the kind's character filter to candidate text.
    fn filtered(kind: InputKind, text: &str) -> String {
        match kind {
            InputKind::Text => text.to_string(),
            InputKind::Number => text.chars().filter(char::is_ascii_digit).collect(),
        }
    }

    // -------------------------------------------------------------------------
    // Label / placeholder / kind
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

    /// Get the placeholder text.
    pub fn placeholder(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.placeholder.clone())
            .unwrap_or_default()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.placeholder = placeholder.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the input kind.
    pub fn kind(&self) -> InputKind {
        self.inner.read().map(|guard| guard.kind).unwrap_or_default()
    }

    /// Set the input kind. Re-filters the current value.
    pub fn set_kind(&self, kind: InputKind) {
        if let Ok(mut guard) = self.inner.write() {
            guard.kind = kind;
            let filtered = Self::filtered(kind, &guard.value);
            if filtered != guard.value {
                guard.text_cursor = filtered.len();
                guard.value = filtered;
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set the external change callback.
    pub fn set_on_change(&self, handler: impl Fn(&str) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_change = Some(Arc::new(handler));
        }
    }

    // -------------------------------------------------------------------------
    // Text manipulation (called on key events)
    // -------------------------------------------------------------------------

    /// Get the text cursor position (byte offset).
    pub fn text_cursor(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.text_cursor)
            .unwrap_or(0)
    }

    /// Insert a character at the cursor position.
    ///
    /// Characters rejected by the input kind are dropped silently.
    pub fn insert_char(&self, c: char) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.kind == InputKind::Number && !c.is_ascii_digit() {
                return;
            }
            let cursor = guard.text_cursor.min(guard.value.len());
            guard.value.insert(cursor, c);
            guard.text_cursor = cursor + c.len_utf8();
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
            guard.on_change.clone()
        };
        if let Some(handler) = handler {
            handler(&self.value());
        }
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&self) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.text_cursor == 0 {
                return;
            }
            let prev_cursor = guard.value[..guard.text_cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            guard.value.remove(prev_cursor);
            guard.text_cursor = prev_cursor;
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
            guard.on_change.clone()
        };
        if let Some(handler) = handler {
            handler(&self.value());
        }
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete_char_at(&self) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            let cursor = guard.text_cursor;
            if cursor >= guard.value.len() {
                return;
            }
            guard.value.remove(cursor);
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
            guard.on_change.clone()
        };
        if let Some(handler) = handler {
            handler(&self.value());
        }
    }

    /// Move text cursor left.
    pub fn text_cursor_left(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.text_cursor > 0
        {
            guard.text_cursor = guard.value[..guard.text_cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move text cursor right.
    pub fn text_cursor_right(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.text_cursor < guard.value.len()
        {
            guard.text_cursor = guard.value[guard.text_cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| guard.text_cursor + i)
                .unwrap_or(guard.value.len());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move text cursor to start.
    pub fn text_cursor_home(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.text_cursor != 0
        {
            guard.text_cursor = 0;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move text cursor to end.
    pub fn text_cursor_end(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let end = guard.value.len();
            if guard.text_cursor != end {
                guard.text_cursor = end;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Disabled state
    // -------------------------------------------------------------------------

    /// Check if the input is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Enable or disable the input.
    pub fn set_disabled(&self, disabled: bool) {
        if self.disabled.swap(disabled, Ordering::SeqCst) != disabled {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the input state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Input {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            disabled: Arc::clone(&self.disabled),
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("id", &self.id)
            .field("disabled", &self.is_disabled())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for Input {
    type Value = String;

    fn validation_value(&self) -> Self::Value {
        self.value()
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
