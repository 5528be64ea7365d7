//! Event handling for the Autocomplete widget.

use crate::events::{EventResult, Key, KeyCombo, WidgetEvents};

use super::Autocomplete;

impl<T: Clone> WidgetEvents for Autocomplete<T> {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        // Ignore keys with ctrl/alt modifiers
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        match key.key {
            // Text editing works in both states; inserting opens the list
            Key::Char(c) => {
                self.insert_char(c);
                EventResult::Consumed
            }
            Key::Backspace => {
                self.delete_char_before();
                EventResult::Consumed
            }
            Key::Delete => {
                self.delete_char_at();
                EventResult::Consumed
            }
            Key::Left => {
                self.text_cursor_left();
                EventResult::Consumed
            }
            Key::Right => {
                self.text_cursor_right();
                EventResult::Consumed
            }
            Key::Home => {
                self.text_cursor_home();
                EventResult::Consumed
            }
            Key::End => {
                self.text_cursor_end();
                EventResult::Consumed
            }
            // Navigation and commit go through the controller's state machine
            Key::Up | Key::Down | Key::Escape => self.core().on_key(key),
            Key::Enter => {
                let result = self.core().on_key(key);
                if result.is_handled() {
                    self.text_cursor_end();
                }
                result
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_click(&self, _x: u16, _y: u16) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        self.toggle_open();
        EventResult::Consumed
    }
}
