use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use formwork::events::{EventResult, Key, KeyCombo, WidgetEvents};
use formwork::widgets::date_range::{CalendarError, CalendarMonth, QuickRange};
use formwork::widgets::DateRangePicker;
use ratatui::layout::Rect;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn picker() -> DateRangePicker {
    DateRangePicker::with_view_month(CalendarMonth::new(2025, 8).unwrap())
}

#[test]
fn test_first_click_sets_start_second_orders_and_closes() {
    let picker = picker();
    picker.open();

    picker.select_day(date(2025, 8, 18));
    assert_eq!(picker.range(), (Some(date(2025, 8, 18)), None));
    assert!(picker.is_open());

    picker.select_day(date(2025, 8, 20));
    assert_eq!(
        picker.range(),
        (Some(date(2025, 8, 18)), Some(date(2025, 8, 20)))
    );
    assert!(!picker.is_open());
}

#[test]
fn test_second_click_before_start_swaps_endpoints() {
    let picker = picker();
    picker.open();
    picker.select_day(date(2025, 8, 18));
    picker.select_day(date(2025, 8, 10));
    assert_eq!(
        picker.range(),
        (Some(date(2025, 8, 10)), Some(date(2025, 8, 18)))
    );
}

#[test]
fn test_click_with_complete_range_starts_over() {
    let picker = picker();
    picker.select_day(date(2025, 8, 18));
    picker.select_day(date(2025, 8, 20));
    picker.select_day(date(2025, 8, 25));
    assert_eq!(picker.range(), (Some(date(2025, 8, 25)), None));
}

#[test]
fn test_change_callback_receives_committed_pairs() {
    let committed: Arc<Mutex<Vec<(Option<NaiveDate>, Option<NaiveDate>)>>> =
        Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&committed);

    let picker = picker();
    picker.set_on_change(move |range| {
        sink.lock().unwrap().push(range);
    });
    picker.select_day(date(2025, 8, 18));
    picker.select_day(date(2025, 8, 20));

    assert_eq!(
        committed.lock().unwrap().as_slice(),
        &[
            (Some(date(2025, 8, 18)), None),
            (Some(date(2025, 8, 18)), Some(date(2025, 8, 20))),
        ]
    );
}

#[test]
fn test_hover_previews_range_without_committing() {
    let picker = picker();
    picker.select_day(date(2025, 8, 18));
    picker.hover_day(Some(date(2025, 8, 22)));

    assert_eq!(picker.preview_end(), Some(date(2025, 8, 22)));
    assert!(picker.day_state(date(2025, 8, 20)).in_range);
    assert!(!picker.day_state(date(2025, 8, 23)).in_range);
    // the hover is never committed
    assert_eq!(picker.range(), (Some(date(2025, 8, 18)), None));

    picker.hover_day(None);
    assert_eq!(picker.preview_end(), None);
    assert!(!picker.day_state(date(2025, 8, 20)).in_range);
}

#[test]
fn test_hover_ignored_once_range_is_complete() {
    let picker = picker();
    picker.select_day(date(2025, 8, 18));
    picker.select_day(date(2025, 8, 20));
    picker.hover_day(Some(date(2025, 8, 28)));
    assert_eq!(picker.preview_end(), None);
    assert!(!picker.day_state(date(2025, 8, 25)).in_range);
    assert!(picker.day_state(date(2025, 8, 19)).in_range);
}

#[test]
fn test_day_states_mark_endpoints_selected() {
    let picker = picker();
    picker.select_day(date(2025, 8, 18));
    picker.select_day(date(2025, 8, 20));

    assert!(picker.day_state(date(2025, 8, 18)).selected);
    assert!(picker.day_state(date(2025, 8, 20)).selected);
    assert!(!picker.day_state(date(2025, 8, 19)).selected);
    assert!(picker.day_state(date(2025, 8, 19)).in_range);
}

#[test]
fn test_quick_range_last7_on_fixed_today() {
    let picker = picker();
    picker.apply_quick_range(QuickRange::Last7, date(2025, 8, 20));
    assert_eq!(
        picker.range(),
        (Some(date(2025, 8, 14)), Some(date(2025, 8, 20)))
    );
    // the view moves to the new start's month
    assert_eq!(picker.view_month(), CalendarMonth::new(2025, 8).unwrap());
}

#[test]
fn test_quick_range_last30_crosses_months() {
    let picker = picker();
    picker.apply_quick_range(QuickRange::Last30, date(2025, 8, 20));
    assert_eq!(
        picker.range(),
        (Some(date(2025, 7, 22)), Some(date(2025, 8, 20)))
    );
    assert_eq!(picker.view_month(), CalendarMonth::new(2025, 7).unwrap());
}

#[test]
fn test_quick_range_today_and_yesterday_select_single_day() {
    let today = date(2025, 8, 20);
    assert_eq!(QuickRange::Today.resolve(today), (today, None));
    assert_eq!(
        QuickRange::Yesterday.resolve(today),
        (date(2025, 8, 19), None)
    );
}

#[test]
fn test_display_format() {
    let picker = picker();
    assert_eq!(picker.display_text(), "");

    picker.select_day(date(2025, 8, 5));
    assert_eq!(picker.display_text(), "05/08/2025");

    picker.select_day(date(2025, 8, 20));
    assert_eq!(picker.display_text(), "05/08/2025 - 20/08/2025");
}

#[test]
fn test_clear_resets_both_endpoints() {
    let picker = picker();
    picker.select_day(date(2025, 8, 18));
    picker.select_day(date(2025, 8, 20));
    picker.clear();
    assert_eq!(picker.range(), (None, None));
    assert_eq!(picker.display_text(), "");
}

#[test]
fn test_month_navigation() {
    let picker = picker();
    let [first, second] = picker.months();
    assert_eq!(first, CalendarMonth::new(2025, 8).unwrap());
    assert_eq!(second, CalendarMonth::new(2025, 9).unwrap());

    picker.next_month();
    assert_eq!(picker.view_month(), CalendarMonth::new(2025, 9).unwrap());
    picker.prev_month();
    picker.prev_month();
    assert_eq!(picker.view_month(), CalendarMonth::new(2025, 7).unwrap());
}

#[test]
fn test_calendar_month_arithmetic() {
    let august = CalendarMonth::new(2025, 8).unwrap();
    assert_eq!(august.days_in_month(), 31);
    assert_eq!(august.title(), "August 2025");
    assert_eq!(august.next(), CalendarMonth::new(2025, 9).unwrap());
    assert_eq!(august.prev(), CalendarMonth::new(2025, 7).unwrap());

    let december = CalendarMonth::new(2025, 12).unwrap();
    assert_eq!(december.next(), CalendarMonth::new(2026, 1).unwrap());

    let february = CalendarMonth::new(2024, 2).unwrap();
    assert_eq!(february.days_in_month(), 29);

    assert_eq!(august.day(31), Some(date(2025, 8, 31)));
    assert_eq!(august.day(32), None);
}

#[test]
fn test_calendar_month_rejects_invalid_month() {
    assert_eq!(
        CalendarMonth::new(2025, 13),
        Err(CalendarError::InvalidMonth { year: 2025, month: 13 })
    );
    assert!(CalendarMonth::new(2025, 0).is_err());
}

#[test]
fn test_escape_closes_popup() {
    let picker = picker();
    picker.open();
    assert_eq!(picker.on_key(&KeyCombo::key(Key::Escape)), EventResult::Consumed);
    assert!(!picker.is_open());
    assert_eq!(picker.on_key(&KeyCombo::key(Key::Escape)), EventResult::Ignored);
}

#[test]
fn test_disabled_ignores_selection_and_open() {
    let committed: Arc<Mutex<usize>> = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&committed);

    let picker = picker();
    picker.set_on_change(move |_| {
        *sink.lock().unwrap() += 1;
    });
    picker.set_disabled(true);

    picker.toggle_open();
    assert!(!picker.is_open());
    picker.select_day(date(2025, 8, 18));
    picker.apply_quick_range(QuickRange::Last7, date(2025, 8, 20));
    assert_eq!(picker.range(), (None, None));
    assert_eq!(*committed.lock().unwrap(), 0);
}

#[test]
fn test_popup_layout_hit_testing() {
    use formwork::widgets::date_range::{POPUP_H, POPUP_W, PopupHit, PopupLayout};

    let months = [
        CalendarMonth::new(2025, 8).unwrap(),
        CalendarMonth::new(2025, 9).unwrap(),
    ];
    let layout = PopupLayout::new(Rect::new(0, 0, POPUP_W, POPUP_H), months);

    // day 18 of the first month: grid row 2, column 3
    assert_eq!(layout.hit(12, 3), Some(PopupHit::Day(date(2025, 8, 18))));
    // day 1 of the second month
    assert_eq!(layout.hit(31, 1), Some(PopupHit::Day(date(2025, 9, 1))));
    // header arrows on both month blocks
    assert_eq!(layout.hit(0, 0), Some(PopupHit::PrevMonth));
    assert_eq!(layout.hit(27, 0), Some(PopupHit::NextMonth));
    assert_eq!(layout.hit(31, 0), Some(PopupHit::PrevMonth));
    assert_eq!(layout.hit(58, 0), Some(PopupHit::NextMonth));
    // quick ranges and actions
    assert_eq!(layout.hit(2, 7), Some(PopupHit::Quick(QuickRange::Today)));
    assert_eq!(layout.hit(8, 7), Some(PopupHit::Quick(QuickRange::Yesterday)));
    assert_eq!(layout.hit(1, 8), Some(PopupHit::Reset));
    assert_eq!(layout.hit(8, 8), Some(PopupHit::Confirm));
    // a cell past the end of the month is nothing
    assert_eq!(layout.hit(24, 5), None);
    // outside the popup entirely
    assert_eq!(layout.hit(70, 3), None);
}

#[test]
fn test_outside_click_closes_popup() {
    let picker = picker();
    picker.open();
    picker.boundary().reset_regions();
    picker.boundary().register_region(Rect::new(0, 0, 30, 2));
    picker.boundary().register_region(Rect::new(0, 2, 59, 9));

    assert!(!picker.handle_global_click(10, 5));
    assert!(picker.is_open());
    assert!(picker.handle_global_click(70, 20));
    assert!(!picker.is_open());
}
