use std::sync::{Arc, Mutex};

use formwork::dropdown::Dropdown;
use formwork::events::{EventResult, Key, KeyCombo};

#[derive(Debug, Clone, PartialEq)]
struct Opt {
    id: i64,
    label: &'static str,
}

fn dropdown() -> Dropdown<Opt> {
    let dd = Dropdown::new(|o: &Opt| o.label.to_string());
    dd.set_options(vec![
        Opt { id: 1, label: "Alpha" },
        Opt { id: 2, label: "Beta" },
        Opt { id: 3, label: "Gamma" },
    ]);
    dd
}

fn key(k: Key) -> KeyCombo {
    KeyCombo::key(k)
}

#[test]
fn test_arrow_down_from_closed_opens_with_highlight_zero() {
    let dd = dropdown();
    assert!(!dd.is_open());

    let result = dd.on_key(&key(Key::Down));
    assert_eq!(result, EventResult::Consumed);
    assert!(dd.is_open());
    assert_eq!(dd.highlight(), Some(0));
}

#[test]
fn test_arrow_down_twice_from_no_highlight() {
    let dd = dropdown();
    dd.open();
    assert_eq!(dd.highlight(), None);

    dd.on_key(&key(Key::Down));
    assert_eq!(dd.highlight(), Some(0));
    dd.on_key(&key(Key::Down));
    assert_eq!(dd.highlight(), Some(1));
}

#[test]
fn test_enter_commits_highlighted_and_closes() {
    let committed: Arc<Mutex<Vec<Option<i64>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&committed);

    let dd = dropdown();
    dd.set_on_change(move |opt| {
        sink.lock().unwrap().push(opt.map(|o| o.id));
    });
    dd.open();
    dd.on_key(&key(Key::Down));
    dd.on_key(&key(Key::Down));

    let result = dd.on_key(&key(Key::Enter));
    assert_eq!(result, EventResult::Consumed);
    assert!(!dd.is_open());
    assert_eq!(committed.lock().unwrap().as_slice(), &[Some(2)]);
    assert_eq!(dd.query(), "Beta");
}

#[test]
fn test_enter_without_highlight_passes_through() {
    let dd = dropdown();
    dd.open();
    assert_eq!(dd.highlight(), None);

    let result = dd.on_key(&key(Key::Enter));
    assert_eq!(result, EventResult::Ignored);
    assert!(dd.is_open());
}

#[test]
fn test_arrow_down_clamps_at_last_index() {
    let dd = dropdown();
    dd.open();
    for _ in 0..10 {
        dd.on_key(&key(Key::Down));
    }
    assert_eq!(dd.highlight(), Some(2));
}

#[test]
fn test_arrow_up_clamps_at_zero() {
    let dd = dropdown();
    dd.open();
    dd.on_key(&key(Key::Up));
    assert_eq!(dd.highlight(), Some(0));
    for _ in 0..5 {
        dd.on_key(&key(Key::Up));
    }
    assert_eq!(dd.highlight(), Some(0));
}

#[test]
fn test_highlight_stays_in_bounds_for_any_arrow_sequence() {
    let dd = dropdown();
    dd.open();
    let sequence = [
        Key::Down,
        Key::Down,
        Key::Up,
        Key::Down,
        Key::Down,
        Key::Down,
        Key::Up,
        Key::Up,
        Key::Up,
        Key::Up,
        Key::Down,
    ];
    for k in sequence {
        dd.on_key(&key(k));
        if let Some(h) = dd.highlight() {
            assert!(h < dd.filtered_len());
        }
    }
}

#[test]
fn test_escape_closes_open_list() {
    let dd = dropdown();
    dd.open();
    let result = dd.on_key(&key(Key::Escape));
    assert_eq!(result, EventResult::Consumed);
    assert!(!dd.is_open());
}

#[test]
fn test_escape_while_closed_is_noop() {
    let dd = dropdown();
    let result = dd.on_key(&key(Key::Escape));
    assert_eq!(result, EventResult::Ignored);
    assert!(!dd.is_open());
}

#[test]
fn test_arrow_down_on_empty_filtered_list_is_noop() {
    let dd = dropdown();
    dd.set_query("zzz");
    assert_eq!(dd.filtered_len(), 0);
    assert!(dd.is_open());

    dd.on_key(&key(Key::Down));
    assert_eq!(dd.highlight(), None);

    // closed + empty filtered set: ArrowDown does not open
    dd.close();
    let result = dd.on_key(&key(Key::Down));
    assert_eq!(result, EventResult::Ignored);
    assert!(!dd.is_open());
}

#[test]
fn test_set_query_opens_refilters_and_resets_highlight() {
    let dd = dropdown();
    dd.open();
    dd.on_key(&key(Key::Down));
    assert_eq!(dd.highlight(), Some(0));

    dd.set_query("a");
    assert!(dd.is_open());
    assert_eq!(dd.highlight(), None);
    assert_eq!(dd.filtered_len(), 3); // Alpha, Beta, Gamma all contain "a"

    dd.set_query("be");
    assert_eq!(dd.filtered_len(), 1);
}

#[test]
fn test_commit_round_trips_query_to_label() {
    let dd = dropdown();
    let beta = Opt { id: 2, label: "Beta" };
    dd.commit(beta.clone());
    assert_eq!(dd.query(), "Beta");
    assert_eq!(dd.value(), Some(beta));
    assert!(!dd.is_open());
}

#[test]
fn test_clear_is_idempotent() {
    let calls: Arc<Mutex<usize>> = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&calls);

    let dd = dropdown();
    dd.commit(Opt { id: 1, label: "Alpha" });
    dd.set_on_change(move |opt| {
        assert!(opt.is_none());
        *sink.lock().unwrap() += 1;
    });
    dd.clear();
    let (query_once, open_once, value_once) = (dd.query(), dd.is_open(), dd.value());
    dd.clear();

    assert_eq!(dd.query(), query_once);
    assert_eq!(dd.is_open(), open_once);
    assert_eq!(dd.value(), value_once);
    assert_eq!(dd.query(), "");
    assert!(!dd.is_open());
    assert_eq!(dd.value(), None);
    assert_eq!(*calls.lock().unwrap(), 2);
}

#[test]
fn test_sync_value_rederives_query() {
    let dd = dropdown();
    dd.sync_value(Some(Opt { id: 3, label: "Gamma" }));
    assert_eq!(dd.query(), "Gamma");

    dd.sync_value(None);
    assert_eq!(dd.query(), "");
}

#[test]
fn test_value_not_in_options_displays_verbatim() {
    let dd = dropdown();
    dd.sync_value(Some(Opt { id: 99, label: "Elsewhere" }));
    assert_eq!(dd.query(), "Elsewhere");
    // selection matching never succeeds
    let view = dd.list_view();
    assert!(view.rows.iter().all(|row| !row.selected));
}

#[test]
fn test_disabled_ignores_keys_and_toggle() {
    let committed: Arc<Mutex<usize>> = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&committed);

    let dd = dropdown();
    dd.set_on_change(move |_| {
        *sink.lock().unwrap() += 1;
    });
    dd.set_disabled(true);

    assert_eq!(dd.on_key(&key(Key::Down)), EventResult::Ignored);
    assert!(!dd.is_open());
    dd.toggle_open();
    assert!(!dd.is_open());
    dd.set_query("a");
    assert_eq!(dd.query(), "");
    assert_eq!(*committed.lock().unwrap(), 0);
}

#[test]
fn test_outside_interaction_closes_unconditionally() {
    let dd = dropdown();
    dd.open();
    dd.on_outside_interaction();
    assert!(!dd.is_open());
    // redundant close is safe
    dd.on_outside_interaction();
    assert!(!dd.is_open());
}

#[test]
fn test_list_view_positional_tokens_and_markers() {
    let dd = dropdown();
    dd.open();
    dd.on_key(&key(Key::Down));

    let view = dd.list_view();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.rows[0].id, "option-0");
    assert_eq!(view.rows[1].id, "option-1");
    assert!(view.rows[0].highlighted);
    assert!(!view.rows[1].highlighted);
    assert!(view.rows.iter().all(|row| !row.selected));
    assert_eq!(view.active_descendant.as_deref(), Some("option-0"));
}

#[test]
fn test_list_view_label_equality_selection() {
    let dd = dropdown();
    dd.sync_value(Some(Opt { id: 2, label: "Beta" }));
    // the re-derived query narrows the list to the selected label
    let view = dd.list_view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id, "option-0");
    assert!(view.rows[0].selected);
}

#[test]
fn test_list_view_key_tokens() {
    let dd = Dropdown::new(|o: &Opt| o.label.to_string()).with_key(|o: &Opt| o.id);
    dd.set_options(vec![
        Opt { id: 1, label: "Alpha" },
        Opt { id: 2, label: "Beta" },
    ]);
    dd.sync_value(Some(Opt { id: 2, label: "Beta" }));
    dd.set_query("bet");
    dd.on_key(&key(Key::Down));

    let view = dd.list_view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id, "2");
    assert!(view.rows[0].selected);
    assert!(view.rows[0].highlighted);
    assert_eq!(view.active_descendant.as_deref(), Some("2"));
}

#[test]
fn test_empty_filtered_set_yields_empty_view() {
    let dd = dropdown();
    dd.set_query("nothing matches this");
    let view = dd.list_view();
    assert!(view.is_empty());
    assert_eq!(view.active_descendant, None);
}
