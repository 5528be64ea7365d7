use std::sync::{Arc, Mutex};

use formwork::events::{EventResult, Key, KeyCombo, WidgetEvents};
use formwork::validation::{ErrorDisplay, Validatable};
use formwork::widgets::{Input, InputKind};

fn key(k: Key) -> KeyCombo {
    KeyCombo::key(k)
}

fn type_str(input: &Input, text: &str) {
    for c in text.chars() {
        input.on_key(&key(Key::Char(c)));
    }
}

#[test]
fn test_typing_reports_changes() {
    let values: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&values);

    let input = Input::new();
    input.set_on_change(move |value| {
        sink.lock().unwrap().push(value.to_string());
    });
    type_str(&input, "hi");

    assert_eq!(input.value(), "hi");
    assert_eq!(values.lock().unwrap().as_slice(), &["h", "hi"]);
}

#[test]
fn test_editing_at_cursor() {
    let input = Input::with_value("hllo");
    input.text_cursor_home();
    input.text_cursor_right();
    input.on_key(&key(Key::Char('e')));
    assert_eq!(input.value(), "hello");

    input.text_cursor_end();
    input.on_key(&key(Key::Backspace));
    assert_eq!(input.value(), "hell");

    input.text_cursor_home();
    input.on_key(&key(Key::Delete));
    assert_eq!(input.value(), "ell");
}

#[test]
fn test_number_kind_drops_non_digits() {
    let input = Input::new();
    input.set_kind(InputKind::Number);
    type_str(&input, "a1b2c3");
    assert_eq!(input.value(), "123");

    input.set_value("x9y8");
    assert_eq!(input.value(), "98");
}

#[test]
fn test_switching_to_number_refilters_value() {
    let input = Input::with_value("a1b2");
    input.set_kind(InputKind::Number);
    assert_eq!(input.value(), "12");
}

#[test]
fn test_disabled_ignores_keys() {
    let input = Input::with_value("keep");
    input.set_disabled(true);
    assert_eq!(input.on_key(&key(Key::Char('x'))), EventResult::Ignored);
    assert_eq!(input.on_key(&key(Key::Backspace)), EventResult::Ignored);
    assert_eq!(input.value(), "keep");
}

#[test]
fn test_editing_clears_error() {
    let input = Input::new();
    input.set_error("Required");
    input.set_touched(true);
    assert!(input.has_error());

    type_str(&input, "x");
    assert!(!input.has_error());
}

#[test]
fn test_validatable_surface() {
    // drive a widget through the trait the form layer uses
    fn mark_invalid<W: Validatable>(widget: &W, msg: &str) {
        widget.set_touched(true);
        widget.set_error(msg);
    }

    let input = Input::new();
    mark_invalid(&input, "Required field");
    assert!(input.touched());
    assert_eq!(input.error().as_deref(), Some("Required field"));
    assert_eq!(input.error_display(), ErrorDisplay::Below);
    assert_eq!(input.validation_value(), "");

    input.set_error_display(ErrorDisplay::None);
    assert_eq!(input.error_display(), ErrorDisplay::None);
    input.clear_error();
    assert!(!input.has_error());
}

#[test]
fn test_clones_share_state() {
    let input = Input::new();
    let handle = input.clone();
    type_str(&input, "shared");
    assert_eq!(handle.value(), "shared");
    assert_eq!(handle.id(), input.id());
}
