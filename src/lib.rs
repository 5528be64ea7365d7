//! formwork - form input widgets for terminal UIs.
//!
//! A small set of controlled form widgets built around one reusable
//! dropdown-selection core:
//!
//! - [`Autocomplete`](widgets::Autocomplete) - text input with a
//!   substring-filtered suggestion list
//! - [`Select`](widgets::Select) - dropdown list with a single committed
//!   value
//! - [`Input`](widgets::Input) - plain controlled text field
//! - [`DateRangePicker`](widgets::DateRangePicker) - two-month calendar
//!   range picker with quick-range shortcuts
//!
//! Widgets are controlled: the authoritative value is owned by the
//! embedding form and passed in via `sync_value`/`sync_range`; widgets
//! request changes through a change callback and never mutate the value
//! themselves. All interactive state (query buffer, open flag, highlight)
//! lives in the widget behind `&self` methods, so cloned handles share
//! one instance across the event loop and the render pass.

pub mod color;
pub mod dropdown;
pub mod events;
pub mod extract;
pub mod outside;
pub mod theme;
pub mod utils;
pub mod validation;
pub mod widgets;

pub mod prelude {
    pub use crate::color::{Color, StyleColor};
    pub use crate::dropdown::{Dropdown, OptionListView, OptionRow, filter_options};
    pub use crate::events::{EventResult, Key, KeyCombo, Modifiers, WidgetEvents};
    pub use crate::extract::{KeyExtractor, LabelExtractor, OptionKey};
    pub use crate::outside::Boundary;
    pub use crate::theme::{DefaultTheme, Theme, ThemeRef, resolve_color};
    pub use crate::validation::{ErrorDisplay, Validatable};
    pub use crate::widgets::date_range::{CalendarMonth, QuickRange};
    pub use crate::widgets::{
        ARROW_ICON_ALT, Autocomplete, CLEAR_GLYPH, DateRange, DateRangePicker, Input, InputKind,
        Select,
    };
}
