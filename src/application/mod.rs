//! Application layer: the component tree and the bus that connects it.
//!
//! The grid holder owns the matrix, row presenters lay out cell editors,
//! and cell editors publish update requests on the injected event bus.

pub mod bus;
pub mod cell;
pub mod grid;
pub mod row;
pub mod state;

pub use bus::*;
pub use cell::*;
pub use grid::*;
pub use row::*;
pub use state::*;
