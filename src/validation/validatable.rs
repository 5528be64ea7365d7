//! Validatable trait for widgets that carry validation display state.

use super::ErrorDisplay;

/// Trait for widgets whose validation display can be driven by a form layer.
///
/// This trait provides a common interface for extracting values from widgets
/// and setting/clearing the error and touched display flags. Error text is
/// only rendered when the widget is both touched and has an error set.
pub trait Validatable: Send + Sync {
    /// The value type used for validation.
    type Value;

    /// Extract the current value for validation.
    fn validation_value(&self) -> Self::Value;

    /// Set a validation error message.
    fn set_error(&self, msg: impl Into<String>);

    /// Clear the validation error.
    fn clear_error(&self);

    /// Check if the widget has a validation error.
    fn has_error(&self) -> bool;

    /// Get the current validation error message (if any).
    fn error(&self) -> Option<String>;

    /// Mark the widget as touched (or untouched).
    fn set_touched(&self, touched: bool);

    /// Check if the widget has been touched.
    fn touched(&self) -> bool;

    /// Get the widget ID for focusing.
    fn widget_id(&self) -> String;

    /// Get the error display mode.
    fn error_display(&self) -> ErrorDisplay;

    /// Set the error display mode.
    fn set_error_display(&self, display: ErrorDisplay);
}
