//! Working representation of a stacked matrix pair.

use std::fmt;

use crate::gain::GainTable;

/// One column of a linear transform.
///
/// A column is an input variable; bit `b` is set when the variable feeds
/// output row `b`.  Stacked pairs carry the first matrix in the low byte and
/// the second in the high byte.
pub type Column = u16;

/// Number of original columns in a basis-conversion matrix.
pub const RECORD_COLUMNS: usize = 8;

/// Upper bound on original plus synthesized columns.
pub const MAX_COLUMNS: usize = 128;

/// Number of output rows a column can feed.
pub const ROWS: usize = Column::BITS as usize;

/// Two existing columns combined into a new shared term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Merge {
    lo: u8,
    hi: u8,
}

impl Merge {
    /// Panics unless `lo < hi < MAX_COLUMNS`.
    pub fn new(lo: usize, hi: usize) -> Self {
        assert!(lo < hi, "merge: unordered pair ({lo}, {hi})");
        assert!(hi < MAX_COLUMNS, "merge: column {hi} out of range");
        Self {
            lo: lo as u8,
            hi: hi as u8,
        }
    }

    /// The lower column index.
    pub fn lo(&self) -> usize {
        self.lo as usize
    }

    /// The higher column index.
    pub fn hi(&self) -> usize {
        self.hi as usize
    }
}

impl fmt::Display for Merge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lo, self.hi)
    }
}

/// XOR gates needed to build every output row from `columns` with no
/// sharing: each row costs one gate less than the number of columns feeding
/// it.
pub fn row_cost(columns: &[Column]) -> u32 {
    (0..ROWS)
        .map(|row| {
            let weight = columns.iter().filter(|&&c| (c >> row) & 1 == 1).count() as u32;
            weight.saturating_sub(1)
        })
        .sum()
}

/// A matrix pair under optimization: its columns, the gate count to realize
/// them, and the merges that synthesized every column past the originals.
///
/// `merges().len() == num_columns() - num_originals()` holds at all times,
/// and so does `gates() == row_cost(columns()) + merges().len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitState {
    /// The original columns, kept for replay.
    seed: Box<[Column]>,

    /// Current columns; the originals with shared terms XORed out, followed
    /// by the shared terms.
    columns: Vec<Column>,

    /// Gates needed to realize `columns`.
    gates: u32,

    /// Merge `k` produced column `seed.len() + k`.
    merges: Vec<Merge>,
}

impl CircuitState {
    /// Seeds a state from original columns, costed with no sharing.
    ///
    /// Panics if `originals` is empty or longer than [`MAX_COLUMNS`].
    pub fn new(originals: &[Column]) -> Self {
        assert!(!originals.is_empty(), "state: no columns");
        assert!(
            originals.len() <= MAX_COLUMNS,
            "state: {} columns exceeds {MAX_COLUMNS}",
            originals.len()
        );

        Self {
            seed: originals.into(),
            columns: originals.to_vec(),
            gates: row_cost(originals),
            merges: Vec::new(),
        }
    }

    /// The original columns.
    pub fn originals(&self) -> &[Column] {
        &self.seed
    }

    /// Number of original columns.
    pub fn num_originals(&self) -> usize {
        self.seed.len()
    }

    /// Current column values.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of original plus synthesized columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Gate count of the current configuration.
    pub fn gates(&self) -> u32 {
        self.gates
    }

    /// Gate count of the originals with no sharing.
    pub fn baseline_gates(&self) -> u32 {
        row_cost(&self.seed)
    }

    /// Merge history, one entry per synthesized column.
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Whether no pair of columns shares two or more bits.
    pub fn is_irreducible(&self, gains: &GainTable) -> bool {
        let n = self.columns.len();
        (0..n).all(|i| {
            ((i + 1)..n).all(|j| gains.gain(self.columns[i] & self.columns[j]) == 0)
        })
    }

    /// Extracts the bits shared by two columns into a new column.  Returns the
    /// gates saved.
    ///
    /// Callers guarantee the pair is in range and shares at least two bits.
    pub(crate) fn apply(&mut self, merge: Merge, gains: &GainTable) -> u32 {
        let n = self.columns.len();
        assert!(merge.hi() < n, "state: merge {merge} beyond {n} columns");
        assert!(n < MAX_COLUMNS, "state: column limit reached");
        // Every merge saves a gate, so there can never be more merges than
        // the baseline has gates.
        assert!(
            (self.merges.len() as u32) < self.baseline_gates(),
            "state: merge count exceeds baseline gates"
        );

        let shared = self.columns[merge.lo()] & self.columns[merge.hi()];
        let gain = gains.gain(shared);
        self.columns[merge.lo()] ^= shared;
        self.columns[merge.hi()] ^= shared;
        self.columns.push(shared);
        self.merges.push(merge);
        self.gates -= gain;
        gain
    }
}
