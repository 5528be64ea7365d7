//! Validation display support for form widgets.
//!
//! Widgets do not generate or validate anything themselves: error messages
//! and the `touched` flag are pass-through display data owned by the
//! embedding form layer. This module defines where errors are displayed
//! and the common interface for setting them on any widget.

mod error_display;
mod validatable;

pub use error_display::ErrorDisplay;
pub use validatable::Validatable;
