//! Event handling for the Input widget.

use crate::events::{EventResult, Key, KeyCombo, WidgetEvents};

use super::Input;

impl WidgetEvents for Input {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        // Ignore keys with ctrl/alt modifiers
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        match key.key {
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
            _ => EventResult::Ignored,
        }
    }
}
