//! AES S-box computed in the polynomial basis, as a reference for the tower
//! construction.

use crate::matrix::{ByteMatrix, from_linear};

/// The AES reduction polynomial x^8 + x^4 + x^3 + x + 1.
pub const AES_POLY: u16 = 0x11B;

/// Constant added by the AES affine map.
pub const AFFINE_CONSTANT: u8 = 0x63;

/// Multiplies in GF(2^8) modulo [`AES_POLY`].
pub fn gf256_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0;
    while b != 0 {
        if b & 1 == 1 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= (AES_POLY & 0xFF) as u8;
        }
        b >>= 1;
    }
    product
}

/// Inverts in GF(2^8) as `a^254`; zero maps to zero.
pub fn gf256_inv(a: u8) -> u8 {
    // 254 = 0b1111_1110
    let mut result = 1;
    let mut power = a;
    for _ in 0..7 {
        power = gf256_mul(power, power);
        result = gf256_mul(result, power);
    }
    result
}

/// Linear part of the AES affine map.
pub fn affine_linear(x: u8) -> u8 {
    x ^ x.rotate_left(1) ^ x.rotate_left(2) ^ x.rotate_left(3) ^ x.rotate_left(4)
}

/// Matrix of [`affine_linear`].
pub fn affine_matrix() -> ByteMatrix {
    from_linear(affine_linear)
}

/// The AES S-box.
pub fn sbox_table() -> [u8; 256] {
    std::array::from_fn(|x| affine_linear(gf256_inv(x as u8)) ^ AFFINE_CONSTANT)
}

/// The inverse AES S-box.
pub fn inv_sbox_table() -> [u8; 256] {
    let mut table = [0; 256];
    for (x, s) in sbox_table().into_iter().enumerate() {
        table[s as usize] = x as u8;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse() {
        assert_eq!(gf256_inv(0), 0);
        assert_eq!(gf256_inv(1), 1);
        // Worked example from FIPS-197.
        assert_eq!(gf256_mul(0x57, 0x83), 0xC1);
        for a in 1..=u8::MAX {
            assert_eq!(gf256_mul(a, gf256_inv(a)), 1, "a = {a:#04x}");
        }
    }

    #[test]
    fn test_known_sbox_entries() {
        let sbox = sbox_table();
        assert_eq!(sbox[0x00], 0x63);
        assert_eq!(sbox[0x01], 0x7C);
        assert_eq!(sbox[0x53], 0xED);
        assert_eq!(sbox[0xFF], 0x16);
    }

    #[test]
    fn test_inverse_sbox() {
        let sbox = sbox_table();
        let inv = inv_sbox_table();
        assert_eq!(inv[0x63], 0x00);
        for x in 0..=u8::MAX {
            assert_eq!(inv[sbox[x as usize] as usize], x);
        }
    }
}
