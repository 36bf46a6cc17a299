//! Branch-and-bound search for the cheapest set of shared terms.
//!
//! Every pair of columns sharing at least two bits is a candidate merge.  The
//! search applies a candidate, recurses until no candidate remains, backs the
//! merge out again and keeps the lowest gate count seen.  Ties go to the
//! first candidate in `(lo, hi)` order, so results are deterministic.

use rayon::prelude::*;

use crate::gain::GainTable;
use crate::state::{CircuitState, Column, MAX_COLUMNS, Merge};

/// Finds the merge sequence with the fewest gates for a [`CircuitState`].
#[derive(Copy, Clone, Debug)]
pub struct Optimizer<'t> {
    gains: &'t GainTable,
    parallel: bool,
}

impl Optimizer<'static> {
    /// Optimizer over the process-wide gain table.
    pub fn new() -> Self {
        Self::with_table(GainTable::shared())
    }
}

impl Default for Optimizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Optimizer<'t> {
    /// Optimizer over a caller-provided gain table.
    pub fn with_table(gains: &'t GainTable) -> Self {
        Self {
            gains,
            parallel: false,
        }
    }

    /// Explores the candidates of the top level on the rayon pool.  Results
    /// are identical to the sequential search.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The gain table used to score merges.
    pub fn gains(&self) -> &'t GainTable {
        self.gains
    }

    /// Runs the search and moves `state` to the best configuration found, with
    /// its columns materialized.  A state with no profitable merge is left as
    /// it is.
    pub fn optimize(&self, state: &mut CircuitState) {
        let mut scratch = Scratch::new(state);
        let best = if self.parallel {
            self.search_top_parallel(&scratch)
        } else {
            self.search(&mut scratch)
        };

        let Some(best) = best else {
            return;
        };

        for merge in &best.merges[state.merges().len()..] {
            state.apply(*merge, self.gains);
        }
        debug_assert_eq!(state.gates(), best.gates);
    }

    /// Returns the best branch reachable from `scratch`, or `None` when it has
    /// no merge left to explore.  `scratch` is restored before returning.
    fn search(&self, scratch: &mut Scratch) -> Option<Branch> {
        let n = scratch.columns.len();
        let mut best: Option<Branch> = None;
        for lo in 0..n.saturating_sub(1) {
            for hi in (lo + 1)..n {
                let Some(candidate) = scratch.candidate(self.gains, lo, hi) else {
                    continue;
                };
                let branch = self.explore(scratch, candidate);
                if best.as_ref().is_none_or(|b| branch.gates < b.gates) {
                    best = Some(branch);
                }
            }
        }
        best
    }

    fn search_top_parallel(&self, scratch: &Scratch) -> Option<Branch> {
        let branches = scratch
            .candidates(self.gains)
            .into_par_iter()
            .map(|candidate| self.explore(&mut scratch.clone(), candidate))
            .collect::<Vec<_>>();

        // Same strict comparison, in candidate order, as the sequential loop.
        branches.into_iter().fold(None, |best, branch| match best {
            Some(b) if b.gates <= branch.gates => Some(b),
            _ => Some(branch),
        })
    }

    fn explore(&self, scratch: &mut Scratch, candidate: Candidate) -> Branch {
        let Candidate { merge, shared, gain } = candidate;
        let (lo, hi) = (scratch.columns[merge.lo()], scratch.columns[merge.hi()]);

        scratch.push(merge, shared, gain);
        let branch = self.search(scratch).unwrap_or_else(|| Branch {
            gates: scratch.gates,
            merges: scratch.merges.clone(),
        });
        scratch.pop(merge, lo, hi, gain);

        branch
    }
}

/// Whether merging `(lo, hi)` right after `prev`, with `n` columns present,
/// only reorders merges that another branch of the search already covers.
///
/// A pair below `prev.lo` that touches neither column of `prev` nor the
/// column `prev` just created commutes with `prev`; the branch that applies it
/// first and `prev` second is explored from the parent.
pub fn is_redundant_order(prev: Merge, lo: usize, hi: usize, n: usize) -> bool {
    lo < prev.lo() && hi != prev.lo() && hi != prev.hi() && hi < n - 1
}

/// A leaf of the search: its gate count and the full history that reached it.
#[derive(Clone, Debug)]
struct Branch {
    gates: u32,
    merges: Vec<Merge>,
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    merge: Merge,
    shared: Column,
    gain: u32,
}

/// Search-time copy of a state, mutated and restored around each trial.
#[derive(Clone, Debug)]
struct Scratch {
    columns: Vec<Column>,
    merges: Vec<Merge>,
    gates: u32,
    max_merges: usize,
}

impl Scratch {
    fn new(state: &CircuitState) -> Self {
        Self {
            columns: state.columns().to_vec(),
            merges: state.merges().to_vec(),
            gates: state.gates(),
            max_merges: state.baseline_gates() as usize,
        }
    }

    /// The merge of `(lo, hi)`, if it saves gates and is not a reordering of
    /// an earlier branch.
    fn candidate(&self, gains: &GainTable, lo: usize, hi: usize) -> Option<Candidate> {
        let shared = self.columns[lo] & self.columns[hi];
        let gain = gains.gain(shared);
        if gain == 0 {
            return None;
        }

        let n = self.columns.len();
        if let Some(prev) = self.merges.last() {
            if is_redundant_order(*prev, lo, hi, n) {
                return None;
            }
        }

        Some(Candidate {
            merge: Merge::new(lo, hi),
            shared,
            gain,
        })
    }

    /// Every candidate of the current columns, in search order.
    fn candidates(&self, gains: &GainTable) -> Vec<Candidate> {
        let n = self.columns.len();
        (0..n.saturating_sub(1))
            .flat_map(|lo| ((lo + 1)..n).map(move |hi| (lo, hi)))
            .filter_map(|(lo, hi)| self.candidate(gains, lo, hi))
            .collect()
    }

    fn push(&mut self, merge: Merge, shared: Column, gain: u32) {
        assert!(self.columns.len() < MAX_COLUMNS, "search: column limit reached");
        assert!(
            self.merges.len() < self.max_merges,
            "search: merge count exceeds baseline gates"
        );

        self.columns[merge.lo()] ^= shared;
        self.columns[merge.hi()] ^= shared;
        self.columns.push(shared);
        self.merges.push(merge);
        self.gates -= gain;
    }

    /// Undoes the `push` of `merge`, restoring the merged pair to `lo` and
    /// `hi`.
    fn pop(&mut self, merge: Merge, lo: Column, hi: Column, gain: u32) {
        debug_assert_eq!(self.merges.last(), Some(&merge));
        self.merges.pop();
        self.columns.pop();
        self.columns[merge.lo()] = lo;
        self.columns[merge.hi()] = hi;
        self.gates += gain;
    }
}
