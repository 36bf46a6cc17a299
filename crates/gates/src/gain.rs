//! Sharing-gain lookup table.

use std::fmt;
use std::sync::OnceLock;

/// Number of distinct 16-bit column patterns.
pub const PATTERNS: usize = 1 << 16;

/// Gates saved by computing a shared term once, indexed by the term's bit
/// pattern.
///
/// A term whose pattern has `w` bits set feeds `w` output rows.  Building it
/// once costs a single gate and removes one gate from each of those rows, so
/// extracting it saves `w - 1` gates.  Patterns with fewer than two bits save
/// nothing.
#[derive(Clone)]
pub struct GainTable {
    gains: Box<[u8]>,
}

impl GainTable {
    /// Builds the table by counting the bits of every 16-bit pattern.
    pub fn new() -> Self {
        let gains = (0..PATTERNS)
            .map(|pattern| (pattern.count_ones() as u8).saturating_sub(1))
            .collect();
        Self { gains }
    }

    /// Returns a process-wide table, building it on first use.
    pub fn shared() -> &'static GainTable {
        static TABLE: OnceLock<GainTable> = OnceLock::new();
        TABLE.get_or_init(GainTable::new)
    }

    /// Gates saved by sharing `pattern`.
    #[inline]
    pub fn gain(&self, pattern: u16) -> u32 {
        self.gains[pattern as usize] as u32
    }
}

impl Default for GainTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GainTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GainTable")
            .field("patterns", &self.gains.len())
            .finish()
    }
}
