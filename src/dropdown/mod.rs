//! The dropdown-selection interaction core.
//!
//! [`Dropdown`] is the controller instantiated by the Autocomplete and
//! Select widgets: open/closed state, query buffer, substring filtering,
//! keyboard navigation, and commit/clear semantics.

mod filter;
mod list;
mod state;

pub use filter::filter_options;
pub use list::{OptionListView, OptionRow, positional_token};
pub use state::{ChangeHandler, Dropdown, DropdownId};
