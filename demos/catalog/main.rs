//! Visual catalog of the formwork widgets.
//!
//! Shows an Autocomplete, a Select, a DateRangePicker, and a plain Input
//! wired as controlled fields. Tab moves focus, typing/arrows drive the
//! focused widget, mouse clicks toggle and dismiss popups. Ctrl+C quits.
//!
//! Logs to `formwork-catalog.log`.

use std::fs::File;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind, read,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::LevelFilter;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color as RatatuiColor, Style as RatatuiStyle};
use ratatui::widgets::Paragraph;
use simplelog::{Config, WriteLogger};

use formwork::prelude::*;
use formwork::widgets::{autocomplete, date_range, input, select};

#[derive(Debug, Clone, PartialEq)]
struct Country {
    code: &'static str,
    name: &'static str,
}

const COUNTRIES: [Country; 6] = [
    Country { code: "ar", name: "Argentina" },
    Country { code: "br", name: "Brazil" },
    Country { code: "cl", name: "Chile" },
    Country { code: "mx", name: "Mexico" },
    Country { code: "pe", name: "Peru" },
    Country { code: "uy", name: "Uruguay" },
];

const AUTOCOMPLETE_AREA: Rect = Rect { x: 2, y: 1, width: 42, height: 2 };
const SELECT_AREA: Rect = Rect { x: 2, y: 9, width: 42, height: 2 };
const DATE_AREA: Rect = Rect { x: 2, y: 13, width: 42, height: 2 };
const INPUT_AREA: Rect = Rect { x: 2, y: 25, width: 42, height: 3 };

struct Catalog {
    autocomplete: Autocomplete<Country>,
    select: Select<Country>,
    picker: DateRangePicker,
    input: Input,
    focus: usize,
    status: Arc<Mutex<String>>,
}

impl Catalog {
    fn new() -> Self {
        let status = Arc::new(Mutex::new(String::from("pick something")));

        let autocomplete = Autocomplete::new(|c: &Country| c.name.to_string())
            .with_key(|c: &Country| c.code);
        autocomplete.set_options(COUNTRIES.to_vec());
        autocomplete.set_label("Country (autocomplete)");
        {
            let status = Arc::clone(&status);
            autocomplete.set_on_change(move |country| {
                let mut status = status.lock().unwrap();
                *status = match country {
                    Some(c) => format!("autocomplete -> {}", c.name),
                    None => "autocomplete cleared".to_string(),
                };
            });
        }

        let select = Select::new(|c: &Country| c.name.to_string())
            .with_key(|c: &Country| c.code);
        select.set_options(COUNTRIES.to_vec());
        select.set_label("Country (select)");
        {
            let status = Arc::clone(&status);
            select.set_on_change(move |country| {
                if let Some(c) = country {
                    *status.lock().unwrap() = format!("select -> {}", c.name);
                }
            });
        }

        let picker = DateRangePicker::new();
        picker.set_label("Reporting period");
        {
            let status = Arc::clone(&status);
            picker.set_on_change(move |range| {
                *status.lock().unwrap() = format!("range -> {range:?}");
            });
        }

        let input = Input::with_placeholder("Enter your name");
        input.set_label("Full name");
        {
            let status = Arc::clone(&status);
            input.set_on_change(move |value| {
                *status.lock().unwrap() = format!("input -> {value}");
            });
        }

        Self {
            autocomplete,
            select,
            picker,
            input,
            focus: 0,
            status,
        }
    }

    fn cycle_focus(&mut self) {
        // closing on focus loss, like a blur handler would
        self.autocomplete.close();
        self.select.close();
        self.picker.close();
        self.focus = (self.focus + 1) % 4;
        if self.focus == 0 {
            self.autocomplete.handle_focus();
        }
    }

    fn dispatch_key(&self, key: &KeyCombo) -> EventResult {
        match self.focus {
            0 => self.autocomplete.on_key(key),
            1 => self.select.on_key(key),
            2 => self.picker.on_key(key),
            _ => self.input.on_key(key),
        }
    }

    fn dispatch_click(&mut self, x: u16, y: u16) {
        // outside-interaction checks first: anything outside a widget's
        // boundary dismisses its popup
        self.autocomplete.handle_global_click(x, y);
        self.select.handle_global_click(x, y);
        self.picker.handle_global_click(x, y);

        if self.picker.handle_popup_click(x, y).is_handled() {
            self.focus = 2;
            return;
        }
        if self.autocomplete.is_open()
            && let Some(pos) = popup_row_at(&self.autocomplete.anchor_rect(), true, x, y)
            && (pos as usize) < self.autocomplete.list_view().len()
        {
            self.autocomplete.click_option(pos as usize);
            return;
        }
        if self.select.is_open()
            && let Some(pos) = popup_row_at(&self.select.anchor_rect(), true, x, y)
            && (pos as usize) < self.select.list_view().len()
        {
            self.select.click_option(pos as usize);
            return;
        }

        if contains(AUTOCOMPLETE_AREA, x, y) {
            self.focus = 0;
            self.autocomplete.on_click(x, y);
        } else if contains(SELECT_AREA, x, y) {
            self.focus = 1;
            self.select.on_click(x, y);
        } else if contains(DATE_AREA, x, y) {
            self.focus = 2;
            self.picker.on_click(x, y);
        } else if contains(INPUT_AREA, x, y) {
            self.focus = 3;
        }
    }

    fn dispatch_hover(&self, x: u16, y: u16) {
        self.picker.handle_popup_hover(x, y);
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Map a screen position to a row of a popup rendered below an anchor
/// with a label line.
fn popup_row_at(anchor: &Option<Rect>, labeled: bool, x: u16, y: u16) -> Option<u16> {
    let anchor = (*anchor)?;
    let first_row = anchor.y + if labeled { 2 } else { 1 };
    if x >= anchor.x && x < anchor.x + anchor.width && y >= first_row {
        Some(y - first_row)
    } else {
        None
    }
}

fn main() -> io::Result<()> {
    let _ = WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create("formwork-catalog.log")?,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let theme = DefaultTheme::dark();
    let mut catalog = Catalog::new();

    loop {
        terminal.draw(|frame| {
            autocomplete::render(
                frame,
                AUTOCOMPLETE_AREA,
                &catalog.autocomplete,
                catalog.focus == 0,
                &theme,
            );
            select::render(frame, SELECT_AREA, &catalog.select, catalog.focus == 1, &theme);
            date_range::render(frame, DATE_AREA, &catalog.picker, catalog.focus == 2, &theme);
            input::render(frame, INPUT_AREA, &catalog.input, catalog.focus == 3, &theme);

            // popups last so they draw over the fields below them
            autocomplete::render_popup(frame, &catalog.autocomplete, &theme);
            select::render_popup(frame, &catalog.select, &theme);
            date_range::render_popup(frame, &catalog.picker, &theme);

            let status = catalog.status.lock().unwrap().clone();
            let hint = format!("{status}   [Tab: next field, Ctrl+C: quit]");
            let bottom = frame.area().height.saturating_sub(1);
            frame.render_widget(
                Paragraph::new(hint)
                    .style(RatatuiStyle::default().fg(RatatuiColor::DarkGray)),
                Rect::new(0, bottom, frame.area().width, 1),
            );
        })?;

        match read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                if key.code == KeyCode::Tab {
                    catalog.cycle_focus();
                    continue;
                }
                if let Ok(combo) = KeyCombo::try_from(key) {
                    catalog.dispatch_key(&combo);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    catalog.dispatch_click(mouse.column, mouse.row);
                }
                MouseEventKind::Moved => {
                    catalog.dispatch_hover(mouse.column, mouse.row);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
