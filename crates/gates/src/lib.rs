//! Minimum-XOR search for GF(2)-linear bit matrices.
//!
//! A matrix is a list of 16-bit columns.  Realizing it with two-input XOR
//! gates gets cheaper whenever two columns share bits: the shared part can be
//! built once and reused.  [`Optimizer`] searches the merge orders for the
//! cheapest circuit, [`reconstruct`] replays a merge history to get concrete
//! columns back, and [`exhaustive_min_gates`] is an unpruned reference for
//! narrow inputs.

mod exhaustive;
mod gain;
mod replay;
mod search;
mod state;

#[cfg(test)]
mod fixtures;

pub use exhaustive::exhaustive_min_gates;
pub use gain::{GainTable, PATTERNS};
pub use replay::{ReplayError, reconstruct};
pub use search::{Optimizer, is_redundant_order};
pub use state::{CircuitState, Column, MAX_COLUMNS, Merge, RECORD_COLUMNS, ROWS, row_cost};

// Only used by benches and integration tests.
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use rand as _;
#[cfg(test)]
use rand_chacha as _;
