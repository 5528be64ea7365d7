//! Autocomplete widget: a text input with a filtered dropdown.

mod events;
mod render;
mod state;

pub use render::{render, render_popup};
pub use state::{Autocomplete, AutocompleteId};
