//! Compact AES S-box via subfield arithmetic.
//!
//! GF(2^8) is built as a tower GF(((2^2)^2)^2) using normal bases at every
//! level: (d^16, d) over GF(2^4), (alpha^8, alpha^2) over GF(2^2) and
//! (Omega^2, Omega) over GF(2).  Inversion in the tower needs only a handful
//! of GF(2^4) and GF(2^2) operations; the basis-change matrices move values
//! between the AES polynomial basis and the tower basis, with the S-box
//! affine matrix folded into the output side.
//!
//! The constants here are for basis record 4: N = Omega^2 and
//! nu = beta^8 = N^2 alpha^2.

use crate::aes::AFFINE_CONSTANT;
use crate::matrix::{ByteMatrix, apply};

/// Polynomial basis to tower basis.
pub const A2X: ByteMatrix = [0x98, 0xF3, 0xF2, 0x48, 0x09, 0x81, 0xA9, 0xFF];
/// Tower basis to polynomial basis.
pub const X2A: ByteMatrix = [0x64, 0x78, 0x6E, 0x8C, 0x68, 0x29, 0xDE, 0x60];
/// Tower basis to S-box output, affine matrix included.
pub const X2S: ByteMatrix = [0x58, 0x2D, 0x9E, 0x0B, 0xDC, 0x04, 0x03, 0x24];
/// S-box output to tower basis, inverse affine matrix included.
pub const S2X: ByteMatrix = [0x8C, 0x79, 0x05, 0xEB, 0x12, 0x04, 0x51, 0x53];

fn split(x: u8, half: u32) -> (u8, u8) {
    let mask = (1 << half) - 1;
    ((x >> half) & mask, x & mask)
}

/// Multiplies in GF(2^2), normal basis (Omega^2, Omega).
pub fn gf4_mul(x: u8, y: u8) -> u8 {
    let (a, b) = split(x, 1);
    let (c, d) = split(y, 1);
    let e = (a ^ b) & (c ^ d);
    let p = (a & c) ^ e;
    let q = (b & d) ^ e;
    (p << 1) | q
}

/// Scales by N = Omega^2 in GF(2^2).
pub fn gf4_scale_n(x: u8) -> u8 {
    let (a, b) = split(x, 1);
    (b << 1) | (a ^ b)
}

/// Scales by N^2 = Omega in GF(2^2).
pub fn gf4_scale_n2(x: u8) -> u8 {
    let (a, b) = split(x, 1);
    ((a ^ b) << 1) | a
}

/// Squares in GF(2^2).  Squaring and inversion coincide here.
pub fn gf4_square(x: u8) -> u8 {
    let (a, b) = split(x, 1);
    (b << 1) | a
}

/// Multiplies in GF(2^4), normal basis (alpha^8, alpha^2).
pub fn gf16_mul(x: u8, y: u8) -> u8 {
    let (a, b) = split(x, 2);
    let (c, d) = split(y, 2);
    let e = gf4_scale_n(gf4_mul(a ^ b, c ^ d));
    let p = gf4_mul(a, c) ^ e;
    let q = gf4_mul(b, d) ^ e;
    (p << 2) | q
}

/// Squares and scales by nu in GF(2^4).
pub fn gf16_square_scale(x: u8) -> u8 {
    let (a, b) = split(x, 2);
    let p = gf4_square(a ^ b);
    let q = gf4_scale_n2(gf4_square(b));
    (p << 2) | q
}

/// Inverts in GF(2^4); zero maps to zero.
pub fn gf16_inv(x: u8) -> u8 {
    let (a, b) = split(x, 2);
    let c = gf4_scale_n(gf4_square(a ^ b));
    let d = gf4_mul(a, b);
    // Inverse in GF(2^2), same as the square.
    let e = gf4_square(c ^ d);
    let p = gf4_mul(e, b);
    let q = gf4_mul(e, a);
    (p << 2) | q
}

/// Inverts in GF(2^8), normal basis (d^16, d); zero maps to zero.
pub fn gf256_inv(x: u8) -> u8 {
    let (a, b) = split(x, 4);
    let c = gf16_square_scale(a ^ b);
    let d = gf16_mul(a, b);
    let e = gf16_inv(c ^ d);
    let p = gf16_mul(e, b);
    let q = gf16_mul(e, a);
    (p << 4) | q
}

/// S-box of `x` through the tower field.
pub fn sbox(x: u8) -> u8 {
    let t = apply(&A2X, x);
    let t = gf256_inv(t);
    apply(&X2S, t) ^ AFFINE_CONSTANT
}

/// Inverse S-box of `x` through the tower field.
pub fn inv_sbox(x: u8) -> u8 {
    let t = apply(&S2X, x ^ AFFINE_CONSTANT);
    let t = gf256_inv(t);
    apply(&X2A, t)
}

/// Both S-box tables, forward first.
pub fn tables() -> ([u8; 256], [u8; 256]) {
    (
        std::array::from_fn(|x| sbox(x as u8)),
        std::array::from_fn(|x| inv_sbox(x as u8)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes;

    #[test]
    fn test_gf4_inverse_is_square() {
        // One is Omega^2 + Omega.
        for x in 1..4 {
            assert_eq!(gf4_mul(x, gf4_square(x)), 0b11);
        }
    }

    #[test]
    fn test_gf16_inverse() {
        // Find the multiplicative identity, then check every inverse against it.
        let one = (1..16).find(|&u| (1..16).all(|x| gf16_mul(u, x) == x)).unwrap();
        assert_eq!(gf16_inv(0), 0);
        for x in 1..16 {
            assert_eq!(gf16_mul(x, gf16_inv(x)), one, "x = {x:#x}");
        }
    }

    #[test]
    fn test_matches_aes_reference() {
        let (forward, inverse) = tables();
        assert_eq!(forward, aes::sbox_table());
        assert_eq!(inverse, aes::inv_sbox_table());
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(sbox(0x00), 0x63);
        assert_eq!(sbox(0x53), 0xED);
        assert_eq!(inv_sbox(0x63), 0x00);
    }
}
