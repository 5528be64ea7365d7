//! Quick-range shortcuts.

use chrono::{Days, NaiveDate};

/// A predefined date-range shortcut. Resolving one commits both endpoints
/// atomically relative to a reference "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    Today,
    Yesterday,
    Last7,
    Last30,
}

impl QuickRange {
    /// All shortcuts, in display order.
    pub const ALL: [QuickRange; 4] = [
        QuickRange::Today,
        QuickRange::Yesterday,
        QuickRange::Last7,
        QuickRange::Last30,
    ];

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            QuickRange::Today => "Today",
            QuickRange::Yesterday => "Yesterday",
            QuickRange::Last7 => "Last 7 days",
            QuickRange::Last30 => "Last 30 days",
        }
    }

    /// Resolve the shortcut against a reference day.
    ///
    /// `Today` and `Yesterday` select a single day (no end date); `Last7`
    /// and `Last30` select the inclusive span of 7/30 days ending on
    /// `today`.
    pub fn resolve(self, today: NaiveDate) -> (NaiveDate, Option<NaiveDate>) {
        match self {
            QuickRange::Today => (today, None),
            QuickRange::Yesterday => (today.checked_sub_days(Days::new(1)).unwrap_or(today), None),
            QuickRange::Last7 => (
                today.checked_sub_days(Days::new(6)).unwrap_or(today),
                Some(today),
            ),
            QuickRange::Last30 => (
                today.checked_sub_days(Days::new(29)).unwrap_or(today),
                Some(today),
            ),
        }
    }
}
