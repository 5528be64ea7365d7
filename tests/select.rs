use std::sync::{Arc, Mutex};

use formwork::events::{EventResult, Key, KeyCombo, WidgetEvents};
use formwork::widgets::Select;
use ratatui::layout::Rect;

#[derive(Debug, Clone, PartialEq)]
struct Priority {
    value: i64,
    label: &'static str,
}

fn priorities() -> Vec<Priority> {
    vec![
        Priority { value: 1, label: "Low" },
        Priority { value: 2, label: "Medium" },
        Priority { value: 3, label: "High" },
    ]
}

fn select() -> Select<Priority> {
    let sel = Select::new(|p: &Priority| p.label.to_string())
        .with_key(|p: &Priority| p.value);
    sel.set_options(priorities());
    sel
}

fn key(k: Key) -> KeyCombo {
    KeyCombo::key(k)
}

#[test]
fn test_placeholder_shown_without_value() {
    let sel = select();
    assert!(sel.is_placeholder());
    assert_eq!(sel.display_label(), "Select an option ...");

    sel.set_placeholder("Pick a priority");
    assert_eq!(sel.display_label(), "Pick a priority");
}

#[test]
fn test_committed_label_shown_after_sync() {
    let sel = select();
    sel.sync_value(Some(Priority { value: 2, label: "Medium" }));
    assert!(!sel.is_placeholder());
    assert_eq!(sel.display_label(), "Medium");
}

#[test]
fn test_enter_opens_then_navigates_and_commits() {
    let committed: Arc<Mutex<Vec<Option<i64>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&committed);

    let sel = select();
    sel.set_on_change(move |p| {
        sink.lock().unwrap().push(p.map(|p| p.value));
    });

    assert_eq!(sel.on_key(&key(Key::Enter)), EventResult::Consumed);
    assert!(sel.is_open());

    sel.on_key(&key(Key::Down));
    sel.on_key(&key(Key::Down));
    sel.on_key(&key(Key::Enter));

    assert!(!sel.is_open());
    assert_eq!(committed.lock().unwrap().as_slice(), &[Some(2)]);
    assert_eq!(sel.display_label(), "Medium");
}

#[test]
fn test_all_options_visible_when_open() {
    let sel = select();
    sel.open();
    let view = sel.list_view();
    assert_eq!(view.len(), 3);
    assert_eq!(view.rows[0].id, "1");
    assert_eq!(view.rows[2].id, "3");
}

#[test]
fn test_selected_marker_follows_value() {
    let sel = select();
    sel.sync_value(Some(Priority { value: 3, label: "High" }));
    sel.open();
    let view = sel.list_view();
    assert!(!view.rows[0].selected);
    assert!(!view.rows[1].selected);
    assert!(view.rows[2].selected);
}

#[test]
fn test_click_option_commits_and_closes() {
    let sel = select();
    sel.open();
    sel.click_option(2);
    assert!(!sel.is_open());
    assert_eq!(sel.display_label(), "High");
}

#[test]
fn test_disabled_ignores_open_requests() {
    let sel = select();
    sel.set_disabled(true);

    assert_eq!(sel.on_key(&key(Key::Enter)), EventResult::Ignored);
    assert_eq!(sel.on_click(0, 0), EventResult::Ignored);
    sel.toggle_open();
    assert!(!sel.is_open());
}

#[test]
fn test_outside_click_closes() {
    let sel = select();
    sel.open();
    sel.boundary().reset_regions();
    sel.boundary().register_region(Rect::new(0, 0, 20, 2));

    assert!(!sel.handle_global_click(10, 1));
    assert!(sel.is_open());
    assert!(sel.handle_global_click(10, 10));
    assert!(!sel.is_open());
}
