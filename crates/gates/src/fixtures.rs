//! Stacked matrix pairs of basis record 4.

use crate::state::Column;

/// A2X in the low byte, S2X in the high byte.
pub(crate) const PAIR_A: [Column; 8] = [
    0x8C98, 0x79F3, 0x05F2, 0xEB48, 0x1209, 0x0481, 0x51A9, 0x53FF,
];

/// X2S in the low byte, X2A in the high byte.
pub(crate) const PAIR_B: [Column; 8] = [
    0x6458, 0x782D, 0x6E9E, 0x8C0B, 0x68DC, 0x2904, 0xDE03, 0x6024,
];
