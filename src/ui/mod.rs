//! UI components for todo-lists

mod input;
mod items;
pub mod layout;
mod lists;
mod prompt;
mod selection;
mod theme;

pub use input::TextInput;
pub use layout::{render_layout, Focus, Screen};
pub use selection::SelectionState;
pub use theme::{Theme, THEMES};
