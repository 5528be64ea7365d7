//! Event handling for the DateRangePicker widget.

use crate::events::{EventResult, Key, KeyCombo, WidgetEvents};

use super::DateRangePicker;
use super::render::{PopupHit, PopupLayout};

impl WidgetEvents for DateRangePicker {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        match key.key {
            Key::Enter | Key::Char(' ') if !self.is_open() => {
                self.open();
                EventResult::Consumed
            }
            Key::Escape if self.is_open() => {
                self.close();
                EventResult::Consumed
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

impl DateRangePicker {
    /// Route a click inside the open popup to the day or button it hit.
    pub fn handle_popup_click(&self, x: u16, y: u16) -> EventResult {
        if !self.is_open() || self.is_disabled() {
            return EventResult::Ignored;
        }
        let Some(popup) = self.popup_rect() else {
            return EventResult::Ignored;
        };
        let layout = PopupLayout::new(popup, self.months());
        match layout.hit(x, y) {
            Some(PopupHit::Day(date)) => {
                self.select_day(date);
                EventResult::Consumed
            }
            Some(PopupHit::PrevMonth) => {
                self.prev_month();
                EventResult::Consumed
            }
            Some(PopupHit::NextMonth) => {
                self.next_month();
                EventResult::Consumed
            }
            Some(PopupHit::Quick(quick)) => {
                self.apply_quick_range(quick, chrono::Local::now().date_naive());
                EventResult::Consumed
            }
            Some(PopupHit::Reset) => {
                self.clear();
                EventResult::Consumed
            }
            Some(PopupHit::Confirm) => {
                self.confirm();
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Track the hover preview as the pointer moves over the popup.
    pub fn handle_popup_hover(&self, x: u16, y: u16) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        let Some(popup) = self.popup_rect() else {
            return EventResult::Ignored;
        };
        let layout = PopupLayout::new(popup, self.months());
        match layout.hit(x, y) {
            Some(PopupHit::Day(date)) => {
                self.hover_day(Some(date));
                EventResult::Consumed
            }
            _ => {
                self.hover_day(None);
                EventResult::Ignored
            }
        }
    }
}
