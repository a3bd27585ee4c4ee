//! Presentation layer handling terminal UI and user input.
//!
//! Renders the matrix with ratatui and turns key presses into edits on the
//! application state.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
