//! Input event model shared by all widgets.
//!
//! Widgets receive keyboard input as [`KeyCombo`] values and report whether
//! they handled an event via [`EventResult`], keeping the embedding event
//! loop a thin dispatcher. Conversions from crossterm's native event types
//! are provided so applications can forward terminal events directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Check if any modifier is active.
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key
    Char(char),
    /// Enter/Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Home
    Home,
    /// End
    End,
    /// Delete
    Delete,
}

/// A key combination (key + modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers.
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier.
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add shift modifier.
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Add alt modifier.
    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

impl TryFrom<KeyEvent> for KeyCombo {
    type Error = ();

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        let key = match event.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Delete => Key::Delete,
            _ => return Err(()),
        };
        Ok(Self {
            key,
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
                shift: event.modifiers.contains(KeyModifiers::SHIFT),
                alt: event.modifiers.contains(KeyModifiers::ALT),
            },
        })
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Trait for widgets that can handle events.
///
/// The event loop dispatches events to the focused widget through these
/// methods, allowing widget-specific behavior to be encapsulated within
/// the widget.
///
/// All methods have default implementations that return
/// `EventResult::Ignored`, so widgets only need to implement the events
/// they care about.
pub trait WidgetEvents {
    /// Handle a key event when this widget is focused.
    ///
    /// Return `EventResult::Consumed` to prevent the key from being
    /// processed further.
    fn on_key(&self, _key: &KeyCombo) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a click event at the given widget-relative position.
    fn on_click(&self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a hover event at the given widget-relative position.
    fn on_hover(&self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }
}
