//! Event handling for the Select widget.

use crate::events::{EventResult, Key, KeyCombo, WidgetEvents};

use super::Select;

impl<T: Clone> WidgetEvents for Select<T> {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            match key.key {
                // Enter and Space open without moving the highlight;
                // ArrowDown goes through the controller so it enters the
                // list at the top.
                Key::Enter | Key::Char(' ') => {
                    self.open();
                    EventResult::Consumed
                }
                Key::Down => self.core().on_key(key),
                _ => EventResult::Ignored,
            }
        } else {
            self.core().on_key(key)
        }
    }

    fn on_click(&self, _x: u16, _y: u16) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        self.toggle_open();
        EventResult::Consumed
    }

    fn on_hover(&self, _x: u16, _y: u16) -> EventResult {
        EventResult::Ignored
    }
}
