//! Rebuilds concrete columns from a merge history.

use thiserror::Error;

use crate::gain::GainTable;
use crate::state::{CircuitState, Column, MAX_COLUMNS, Merge};

/// Reasons a merge history cannot be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The pair is not strictly increasing.
    #[error("merge {step}: pair [{lo},{hi}] is not increasing")]
    Unordered { step: usize, lo: usize, hi: usize },

    /// The pair names a column that does not exist yet.
    #[error("merge {step}: column {hi} does not exist, only {available} columns so far")]
    OutOfRange {
        step: usize,
        hi: usize,
        available: usize,
    },

    /// The pair shares fewer than two bits, so merging it saves nothing.
    #[error("merge {step}: columns {lo} and {hi} share fewer than two bits")]
    Unprofitable { step: usize, lo: usize, hi: usize },

    /// The history would grow past the column limit.
    #[error("history needs more than {MAX_COLUMNS} columns")]
    TooManyColumns,
}

/// Replays `history` against `originals`, returning the state whose columns,
/// gate count and merges match the circuit the history describes.
///
/// Each step extracts the bits shared by the two named columns into a new
/// column, exactly as the search does when it tries that merge.
pub fn reconstruct(
    originals: &[Column],
    history: &[(usize, usize)],
    gains: &GainTable,
) -> Result<CircuitState, ReplayError> {
    if originals.len() + history.len() > MAX_COLUMNS {
        return Err(ReplayError::TooManyColumns);
    }

    let mut state = CircuitState::new(originals);
    for (step, &(lo, hi)) in history.iter().enumerate() {
        if lo >= hi {
            return Err(ReplayError::Unordered { step, lo, hi });
        }
        let available = state.num_columns();
        if hi >= available {
            return Err(ReplayError::OutOfRange {
                step,
                hi,
                available,
            });
        }
        if gains.gain(state.columns()[lo] & state.columns()[hi]) == 0 {
            return Err(ReplayError::Unprofitable { step, lo, hi });
        }

        state.apply(Merge::new(lo, hi), gains);
    }

    Ok(state)
}
