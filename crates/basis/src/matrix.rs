//! 8x8 bit matrices over GF(2).

/// An 8x8 bit matrix stored as eight byte columns.
///
/// Column `i` is the image of the input bit `7 - i`, so the first column is
/// driven by the most significant input bit.
pub type ByteMatrix = [u8; 8];

/// The identity matrix.
pub const IDENTITY: ByteMatrix = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// Multiplies `x` by `matrix`.
pub fn apply(matrix: &ByteMatrix, x: u8) -> u8 {
    matrix
        .iter()
        .enumerate()
        .filter(|(i, _)| (x >> (7 - i)) & 1 == 1)
        .fold(0, |y, (_, column)| y ^ column)
}

/// The matrix of `f` applied to every basis vector, for a linear `f`.
pub fn from_linear(f: impl Fn(u8) -> u8) -> ByteMatrix {
    IDENTITY.map(f)
}

/// The matrix that applies `first`, then `then`.
pub fn compose(first: &ByteMatrix, then: &ByteMatrix) -> ByteMatrix {
    first.map(|column| apply(then, column))
}
