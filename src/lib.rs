//! twobytwo - Terminal 2x2 Matrix Editor Library
//!
//! A small terminal matrix editor whose cell edits travel to the matrix
//! owner over an explicit publish/subscribe bus.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
mod test_support;

pub use domain::*;
pub use application::*;
