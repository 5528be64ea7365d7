//! Plain controlled text input widget.

mod events;
mod render;
mod state;

pub use render::render;
pub use state::{Input, InputId, InputKind};
