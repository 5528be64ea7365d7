//! Built-in form widgets.
//!
//! Each widget is self-contained interactive state plus a render module.
//! Widgets follow a shared anatomy: a unique instance id, interior
//! mutability behind `&self` methods so clones share the same instance,
//! a dirty flag for render invalidation, and a [`Validatable`]
//! implementation for form-layer error display.
//!
//! [`Validatable`]: crate::validation::Validatable

pub mod autocomplete;
pub mod date_range;
pub mod input;
pub mod select;

pub use autocomplete::Autocomplete;
pub use date_range::{DateRange, DateRangePicker, QuickRange};
pub use input::{Input, InputKind};
pub use select::Select;

/// The clear affordance, rendered as this literal glyph when a widget has
/// a clearable value.
pub const CLEAR_GLYPH: &str = "×";

/// Alt text identifying the dropdown toggle affordance to accessibility
/// layers. The visual stand-in is the ▼/▲ indicator.
pub const ARROW_ICON_ALT: &str = "arrow-icon";

/// The dropdown toggle indicator for the current open state.
pub(crate) fn toggle_indicator(open: bool) -> &'static str {
    if open { "▲" } else { "▼" }
}
