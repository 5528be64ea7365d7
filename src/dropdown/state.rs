//! Dropdown controller state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::events::{EventResult, Key, KeyCombo};
use crate::extract::{KeyExtractor, LabelExtractor, OptionKey};

use super::filter::filter_options;
use super::list::{OptionListView, OptionRow, positional_token};

/// Unique identifier for a dropdown controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId(usize);

impl DropdownId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for DropdownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__dropdown_{}", self.0)
    }
}

/// External change callback. Receives the newly committed option, or
/// `None` when the selection was cleared.
pub type ChangeHandler<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

/// Internal state for a dropdown controller.
struct DropdownInner<T> {
    /// Full option set, externally owned and replaced wholesale
    options: Vec<T>,
    /// Filtered option positions (indices into `options`), order-preserving
    filtered: Vec<usize>,
    /// Current query buffer (the text the user has typed)
    query: String,
    /// Highlighted position within `filtered` (None = no highlight)
    highlight: Option<usize>,
    /// Whether the query narrows the filtered set (off for Select)
    filter_by_query: bool,
    /// Mirror of the externally owned selection
    value: Option<T>,
    /// Label projection
    label_of: Arc<dyn LabelExtractor<T>>,
    /// Optional identity projection
    key_of: Option<Arc<dyn KeyExtractor<T>>>,
    /// External change callback
    on_change: Option<ChangeHandler<T>>,
}

/// The dropdown-selection controller shared by Autocomplete and Select.
///
/// Owns the open/closed state, the query buffer, the highlight index, and
/// the filtered option subset. The committed value itself is externally
/// owned (controlled-component pattern): the controller only mirrors it,
/// requests changes through the change callback, and re-derives the query
/// buffer when [`sync_value`](Dropdown::sync_value) reports an external
/// change.
///
/// Cloning shares the same instance, so a handle can be captured by the
/// render layer while the event loop drives the original.
pub struct Dropdown<T> {
    /// Unique identifier for this controller instance
    id: DropdownId,
    /// Internal state
    inner: Arc<RwLock<DropdownInner<T>>>,
    /// Whether the option list is visible
    is_open: Arc<AtomicBool>,
    /// Disabled controllers ignore all open/toggle/keyboard requests
    disabled: Arc<AtomicBool>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl<T: Clone> Dropdown<T> {
    /// Create a new controller with the given label projection.
    pub fn new(label_of: impl LabelExtractor<T> + 'static) -> Self {
        Self {
            id: DropdownId::new(),
            inner: Arc::new(RwLock::new(DropdownInner {
                options: Vec::new(),
                filtered: Vec::new(),
                query: String::new(),
                highlight: None,
                filter_by_query: true,
                value: None,
                label_of: Arc::new(label_of),
                key_of: None,
                on_change: None,
            })),
            is_open: Arc::new(AtomicBool::new(false)),
            disabled: Arc::new(AtomicBool::new(false)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach an identity projection.
    ///
    /// Without one, selection matching falls back to label equality and
    /// row identity tokens are positional.
    pub fn with_key(self, key_of: impl KeyExtractor<T> + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.key_of = Some(Arc::new(key_of));
        }
        self
    }

    /// Disable query filtering: the full option set stays visible while
    /// open. Used by Select, where the query buffer only mirrors the
    /// committed label and never narrows the list.
    pub fn without_query_filter(self) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.filter_by_query = false;
            let inner = &mut *guard;
            Self::refilter(inner);
        }
        self
    }

    /// Get the unique ID for this controller.
    pub fn id(&self) -> DropdownId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Options and external value
    // -------------------------------------------------------------------------

    /// Replace the full option set.
    pub fn set_options(&self, options: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.options = options;
            Self::refilter(inner);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Number of options in the full set.
    pub fn options_len(&self) -> usize {
        self.inner.read().map(|guard| guard.options.len()).unwrap_or(0)
    }

    /// Set the external change callback.
    pub fn set_on_change(&self, handler: impl Fn(Option<&T>) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_change = Some(Arc::new(handler));
        }
    }

    /// The externally owned selection changed: re-derive the query buffer
    /// from the new value's label and refilter.
    pub fn sync_value(&self, value: Option<T>) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            let label = value
                .as_ref()
                .map(|v| inner.label_of.label_of(v))
                .unwrap_or_default();
            inner.value = value;
            inner.query = label;
            Self::refilter(inner);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the mirrored selection.
    pub fn value(&self) -> Option<T> {
        self.inner.read().ok().and_then(|guard| guard.value.clone())
    }

    /// Label of the mirrored selection, if any.
    pub fn value_label(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| {
            guard.value.as_ref().map(|v| guard.label_of.label_of(v))
        })
    }

    /// Label of an arbitrary option, via the controller's projection.
    pub fn label_of(&self, option: &T) -> String {
        self.inner
            .read()
            .map(|guard| guard.label_of.label_of(option))
            .unwrap_or_default()
    }

    /// Identity of an arbitrary option, if a key projection is attached.
    pub fn key_of(&self, option: &T) -> Option<OptionKey> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.key_of.as_ref().map(|k| k.key_of(option)))
    }

    // -------------------------------------------------------------------------
    // Query buffer
    // -------------------------------------------------------------------------

    /// Get the current query buffer.
    pub fn query(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.query.clone())
            .unwrap_or_default()
    }

    /// Update the query buffer, opening the list if it was closed.
    ///
    /// Refilters and resets the highlight. No-op when disabled.
    pub fn set_query(&self, text: impl Into<String>) {
        if self.is_disabled() {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.query = text.into();
            Self::refilter(inner);
            self.dirty.store(true, Ordering::SeqCst);
        }
        if !self.is_open() {
            self.open();
        }
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Check if the option list is visible.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    /// Open the option list. No-op when disabled.
    pub fn open(&self) {
        if self.is_disabled() {
            return;
        }
        if !self.is_open.swap(true, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Close the option list. Idempotent, allowed even when disabled.
    pub fn close(&self) {
        if self.is_open.swap(false, Ordering::SeqCst) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Toggle the option list. No-op when disabled.
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
    // Disabled state
    // -------------------------------------------------------------------------

    /// Check if the controller is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Enable or disable the controller.
    pub fn set_disabled(&self, disabled: bool) {
        if self.disabled.swap(disabled, Ordering::SeqCst) != disabled {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Highlight navigation
    // -------------------------------------------------------------------------

    /// Get the highlighted position within the filtered list.
    pub fn highlight(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|guard| guard.highlight)
    }

    /// Set the highlighted position, clamped to the filtered list.
    pub fn set_highlight(&self, highlight: Option<usize>) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.highlight = match highlight {
                Some(_) if inner.filtered.is_empty() => None,
                Some(pos) => Some(pos.min(inner.filtered.len() - 1)),
                None => None,
            };
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move the highlight one row down, entering the list at the top.
    pub fn highlight_down(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            if inner.filtered.is_empty() {
                return;
            }
            let last = inner.filtered.len() - 1;
            inner.highlight = Some(match inner.highlight {
                None => 0,
                Some(pos) => (pos + 1).min(last),
            });
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move the highlight one row up, clamping at the top.
    pub fn highlight_up(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            if inner.filtered.is_empty() {
                return;
            }
            inner.highlight = Some(match inner.highlight {
                None => 0,
                Some(pos) => pos.saturating_sub(1),
            });
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Filtered list access
    // -------------------------------------------------------------------------

    /// Number of options that match the current query.
    pub fn filtered_len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.filtered.len())
            .unwrap_or(0)
    }

    /// The filtered option at a list position.
    pub fn filtered_option(&self, pos: usize) -> Option<T> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .filtered
                .get(pos)
                .and_then(|&idx| guard.options.get(idx).cloned())
        })
    }

    /// The option currently under the highlight.
    pub fn highlighted_option(&self) -> Option<T> {
        self.highlight().and_then(|pos| self.filtered_option(pos))
    }

    /// Build the option list view for rendering.
    ///
    /// Row identity tokens come from the key projection when attached,
    /// else the positional token. `selected` compares identity against the
    /// mirrored value (label equality without a key projection);
    /// `highlighted` is positional. The active descendant is the
    /// highlighted row's token.
    pub fn list_view(&self) -> OptionListView {
        let Ok(guard) = self.inner.read() else {
            return OptionListView::default();
        };
        let inner = &*guard;

        let value_key = match (&inner.key_of, &inner.value) {
            (Some(key_of), Some(value)) => Some(key_of.key_of(value)),
            _ => None,
        };
        let value_label = inner.value.as_ref().map(|v| inner.label_of.label_of(v));

        let mut rows = Vec::with_capacity(inner.filtered.len());
        for (pos, &idx) in inner.filtered.iter().enumerate() {
            let Some(option) = inner.options.get(idx) else {
                continue;
            };
            let label = inner.label_of.label_of(option);
            let id = match &inner.key_of {
                Some(key_of) => key_of.key_of(option).to_string(),
                None => positional_token(pos),
            };
            let selected = match (&inner.key_of, &value_key) {
                (Some(key_of), Some(value_key)) => key_of.key_of(option) == *value_key,
                _ => value_label.as_deref() == Some(label.as_str()),
            };
            rows.push(OptionRow {
                id,
                label,
                selected,
                highlighted: inner.highlight == Some(pos),
            });
        }

        let active_descendant = inner
            .highlight
            .and_then(|pos| rows.get(pos).map(|row: &OptionRow| row.id.clone()));

        OptionListView {
            rows,
            active_descendant,
        }
    }

    // -------------------------------------------------------------------------
    // Committing
    // -------------------------------------------------------------------------

    /// Commit an option: invoke the change callback, set the query buffer
    /// to the option's label, and close.
    pub fn commit(&self, option: T) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            let inner = &mut *guard;
            let label = inner.label_of.label_of(&option);
            inner.query = label;
            inner.value = Some(option.clone());
            Self::refilter(inner);
            inner.on_change.clone()
        };
        self.close();
        self.dirty.store(true, Ordering::SeqCst);
        log::trace!("{} commit", self.id);
        if let Some(handler) = handler {
            handler(Some(&option));
        }
    }

    /// Commit the highlighted option, if any. Returns whether a commit
    /// happened.
    pub fn commit_highlighted(&self) -> bool {
        match self.highlighted_option() {
            Some(option) => {
                self.commit(option);
                true
            }
            None => false,
        }
    }

    /// Clear the selection: invoke the change callback with `None`, empty
    /// the query buffer, and close. Idempotent.
    pub fn clear(&self) {
        let handler = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            let inner = &mut *guard;
            inner.value = None;
            inner.query.clear();
            Self::refilter(inner);
            inner.on_change.clone()
        };
        self.close();
        self.dirty.store(true, Ordering::SeqCst);
        log::trace!("{} clear", self.id);
        if let Some(handler) = handler {
            handler(None);
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard state machine
    // -------------------------------------------------------------------------

    /// Drive the CLOSED/OPEN keyboard state machine.
    ///
    /// Unlisted keys pass through as `Ignored`. Escape while closed and
    /// ArrowDown on an empty filtered list are no-ops.
    pub fn on_key(&self, key: &KeyCombo) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            match key.key {
                Key::Down if self.filtered_len() > 0 => {
                    self.open();
                    self.set_highlight(Some(0));
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            }
        } else {
            match key.key {
                Key::Down => {
                    self.highlight_down();
                    EventResult::Consumed
                }
                Key::Up => {
                    self.highlight_up();
                    EventResult::Consumed
                }
                Key::Enter => {
                    if self.commit_highlighted() {
                        EventResult::Consumed
                    } else {
                        EventResult::Ignored
                    }
                }
                Key::Escape => {
                    self.close();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            }
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the controller state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Re-run the filter with the current query and reset the highlight.
    fn refilter(inner: &mut DropdownInner<T>) {
        inner.filtered = if inner.filter_by_query {
            filter_options(&inner.options, &inner.query, inner.label_of.as_ref())
        } else {
            (0..inner.options.len()).collect()
        };
        inner.highlight = None;
    }
}

impl<T> Clone for Dropdown<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            is_open: Arc::clone(&self.is_open),
            disabled: Arc::clone(&self.disabled),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T> fmt::Debug for Dropdown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.id)
            .field("is_open", &self.is_open.load(Ordering::SeqCst))
            .field("disabled", &self.disabled.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
