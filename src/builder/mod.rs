//! Fluent construction of validated workcells.
//!
//! The builder is the only way to assemble a [`WorkcellState`]
//! (crate-internal constructors aside), which guarantees that every
//! freshly built workcell already satisfies the occupancy and
//! mutual-exclusion invariants.
//!
//! [`WorkcellState`]: crate::core::WorkcellState

mod error;
mod workcell;

pub use error::BuildError;
pub use workcell::WorkcellBuilder;
