use chrono::NaiveDate;
use formwork::theme::DefaultTheme;
use formwork::widgets::date_range::CalendarMonth;
use formwork::widgets::{
    ARROW_ICON_ALT, Autocomplete, CLEAR_GLYPH, DateRangePicker, Select, autocomplete, date_range,
    select,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::{Position, Rect};

fn row_text(terminal: &Terminal<TestBackend>, y: u16, width: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..width)
        .map(|x| {
            buffer
                .cell(Position::new(x, y))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

#[test]
fn test_presentation_surface_constants() {
    assert_eq!(CLEAR_GLYPH, "×");
    assert_eq!(ARROW_ICON_ALT, "arrow-icon");
}

#[test]
fn test_select_trigger_shows_placeholder_and_indicator() {
    let theme = DefaultTheme::dark();
    let sel: Select<String> = Select::new(|s: &String| s.clone());
    sel.set_options(vec!["Low".to_string(), "High".to_string()]);

    let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
    terminal
        .draw(|frame| select::render(frame, Rect::new(0, 0, 30, 1), &sel, false, &theme))
        .unwrap();

    let row = row_text(&terminal, 0, 40);
    assert!(row.contains("Select an option ..."));
    assert!(row.contains("▼"));
}

#[test]
fn test_select_trigger_shows_value_and_open_indicator() {
    let theme = DefaultTheme::dark();
    let sel: Select<String> = Select::new(|s: &String| s.clone());
    sel.set_options(vec!["Low".to_string(), "High".to_string()]);
    sel.sync_value(Some("High".to_string()));
    sel.open();

    let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    terminal
        .draw(|frame| {
            select::render(frame, Rect::new(0, 0, 30, 1), &sel, false, &theme);
            select::render_popup(frame, &sel, &theme);
        })
        .unwrap();

    let row = row_text(&terminal, 0, 40);
    assert!(row.contains("High"));
    assert!(row.contains("▲"));
    // popup rows below the trigger
    assert!(row_text(&terminal, 1, 40).contains("Low"));
    assert!(row_text(&terminal, 2, 40).contains("High"));
}

#[test]
fn test_autocomplete_clear_glyph_rendered_with_value() {
    let theme = DefaultTheme::dark();
    let ac: Autocomplete<String> = Autocomplete::new(|s: &String| s.clone());
    ac.set_options(vec!["Chile".to_string()]);
    ac.sync_value(Some("Chile".to_string()));

    let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
    terminal
        .draw(|frame| autocomplete::render(frame, Rect::new(0, 0, 30, 1), &ac, false, &theme))
        .unwrap();

    let row = row_text(&terminal, 0, 40);
    assert!(row.contains("Chile"));
    assert!(row.contains(CLEAR_GLYPH));
}

#[test]
fn test_autocomplete_empty_filtered_set_renders_no_list() {
    let theme = DefaultTheme::dark();
    let ac: Autocomplete<String> = Autocomplete::new(|s: &String| s.clone());
    ac.set_options(vec!["Chile".to_string()]);
    for c in "zzz".chars() {
        ac.insert_char(c);
    }
    assert!(ac.is_open());

    let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    terminal
        .draw(|frame| {
            autocomplete::render(frame, Rect::new(0, 0, 30, 1), &ac, false, &theme);
            autocomplete::render_popup(frame, &ac, &theme);
        })
        .unwrap();

    assert_eq!(row_text(&terminal, 1, 40).trim(), "");
    assert_eq!(row_text(&terminal, 2, 40).trim(), "");
}

#[test]
fn test_date_range_trigger_formats_range() {
    let theme = DefaultTheme::dark();
    let picker = DateRangePicker::with_view_month(CalendarMonth::new(2025, 8).unwrap());
    picker.select_day(NaiveDate::from_ymd_opt(2025, 8, 5).unwrap());
    picker.select_day(NaiveDate::from_ymd_opt(2025, 8, 20).unwrap());

    let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
    terminal
        .draw(|frame| date_range::render(frame, Rect::new(0, 0, 32, 1), &picker, false, &theme))
        .unwrap();

    let row = row_text(&terminal, 0, 40);
    assert!(row.contains("05/08/2025 - 20/08/2025"));
    assert!(row.contains(CLEAR_GLYPH));
}

#[test]
fn test_date_range_popup_shows_month_titles() {
    let theme = DefaultTheme::dark();
    let picker = DateRangePicker::with_view_month(CalendarMonth::new(2025, 8).unwrap());
    picker.open();

    let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
    terminal
        .draw(|frame| {
            date_range::render(frame, Rect::new(0, 0, 32, 1), &picker, false, &theme);
            date_range::render_popup(frame, &picker, &theme);
        })
        .unwrap();

    let header = row_text(&terminal, 1, 70);
    assert!(header.contains("August 2025"));
    assert!(header.contains("September 2025"));
    assert!(row_text(&terminal, 8, 70).contains("Last 7 days"));
    assert!(row_text(&terminal, 9, 70).contains("Confirm"));
}
