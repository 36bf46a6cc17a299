//! Unpruned reference search.
//!
//! Tries every profitable merge at every step, with no ordering rule, and
//! memoizes on the column vector.  Exponential in the number of merges; only
//! meant for narrow columns.

use ahash::{HashMap, HashMapExt};

use crate::gain::GainTable;
use crate::state::{Column, row_cost};

/// Minimum gate count reachable from `originals` over every merge order.
pub fn exhaustive_min_gates(originals: &[Column], gains: &GainTable) -> u32 {
    let mut memo = HashMap::new();
    row_cost(originals) - best_saving(originals.to_vec(), gains, &mut memo)
}

fn best_saving(
    columns: Vec<Column>,
    gains: &GainTable,
    memo: &mut HashMap<Vec<Column>, u32>,
) -> u32 {
    if let Some(&saving) = memo.get(&columns) {
        return saving;
    }

    let n = columns.len();
    let mut best = 0;
    for lo in 0..n {
        for hi in (lo + 1)..n {
            let shared = columns[lo] & columns[hi];
            let gain = gains.gain(shared);
            if gain == 0 {
                continue;
            }

            let mut next = columns.clone();
            next[lo] ^= shared;
            next[hi] ^= shared;
            next.push(shared);
            best = best.max(gain + best_saving(next, gains, memo));
        }
    }

    memo.insert(columns, best);
    best
}
