//! View model for the option list.
//!
//! The dropdown controller produces an [`OptionListView`] describing every
//! visible row with its selection and highlight markers plus the active-
//! descendant token for assistive technology. Render code is a pure
//! mapping from this view to screen rows; an empty view renders no list
//! at all.

/// Identity token for a row with no key extractor: `option-{index}`.
pub fn positional_token(index: usize) -> String {
    format!("option-{index}")
}

/// One selectable row of an open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    /// Identity token: the option's key if a key extractor is supplied,
    /// else the positional token.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Identity match against the current committed value.
    pub selected: bool,
    /// Positional match against the highlight index.
    pub highlighted: bool,
}

/// The full option list as presented to the render layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionListView {
    /// Filtered rows, in original option order.
    pub rows: Vec<OptionRow>,
    /// Identity token of the highlighted row, if any.
    pub active_descendant: Option<String>,
}

impl OptionListView {
    /// Check whether there is anything to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
