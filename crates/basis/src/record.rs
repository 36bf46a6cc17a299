//! Basis records: the four conversion matrices of one subfield basis.
//!
//! A record line is 64 hex digits holding the matrices in the order
//! `A2X, X2A, X2S, S2X` (eight bytes each, byte `k` is column `k`), followed
//! by whitespace and a decimal basis id:
//!
//! ```text
//! 98F3F2480981A9FF64786E8C6829DE60582D9E0BDC0403248C7905EB12045153  4
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::matrix::ByteMatrix;

/// Hex digits in the matrix field of a record.
pub const RECORD_HEX_DIGITS: usize = 64;

/// Reasons a record line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The matrix field does not hold exactly 64 hex digits.
    #[error("expected {RECORD_HEX_DIGITS} hex digits, found {0}")]
    WrongLength(usize),

    /// A character of the matrix field is not a hex digit.
    #[error("invalid hex digit {digit:?} at offset {offset}")]
    InvalidHex { offset: usize, digit: char },

    /// Nothing follows the matrix field.
    #[error("missing basis id")]
    MissingId,

    /// The id is not a non-negative integer.
    #[error("invalid basis id {0:?}")]
    InvalidId(String),

    /// More fields follow the id.
    #[error("unexpected trailing text {0:?}")]
    Trailing(String),
}

/// The four basis-conversion matrices of one subfield basis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasisRecord {
    /// Basis id.
    pub id: u64,
    /// Polynomial basis to subfield basis.
    pub a2x: ByteMatrix,
    /// Subfield basis to polynomial basis.
    pub x2a: ByteMatrix,
    /// Subfield basis to S-box output, affine matrix included.
    pub x2s: ByteMatrix,
    /// S-box output to subfield basis.
    pub s2x: ByteMatrix,
}

/// Two 8x8 matrices stacked into 16-bit columns so they are optimized
/// together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixPair {
    /// Name of the matrix in the low byte.
    pub low_tag: &'static str,
    /// Name of the matrix in the high byte.
    pub high_tag: &'static str,
    /// `low[k] | high[k] << 8` for each column `k`.
    pub columns: [u16; 8],
}

impl MatrixPair {
    /// Stacks `high` above `low`.
    pub fn stack(
        low_tag: &'static str,
        low: &ByteMatrix,
        high_tag: &'static str,
        high: &ByteMatrix,
    ) -> Self {
        Self {
            low_tag,
            high_tag,
            columns: std::array::from_fn(|k| low[k] as u16 | (high[k] as u16) << 8),
        }
    }
}

impl BasisRecord {
    /// Parses a line, or returns `None` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> Option<Result<Self, RecordError>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(line.parse())
    }

    /// The two pairs searched together: the input-side pair `A2X`/`S2X` and
    /// the output-side pair `X2S`/`X2A`.
    pub fn pairs(&self) -> [MatrixPair; 2] {
        [
            MatrixPair::stack("A2X", &self.a2x, "S2X", &self.s2x),
            MatrixPair::stack("X2S", &self.x2s, "X2A", &self.x2a),
        ]
    }
}

impl FromStr for BasisRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let hex = fields.next().unwrap_or_default();
        let matrices = decode_matrices(hex)?;

        let id = fields.next().ok_or(RecordError::MissingId)?;
        let id = id
            .parse()
            .map_err(|_| RecordError::InvalidId(id.to_owned()))?;

        if let Some(extra) = fields.next() {
            return Err(RecordError::Trailing(extra.to_owned()));
        }

        let [a2x, x2a, x2s, s2x] = matrices;
        Ok(Self {
            id,
            a2x,
            x2a,
            x2s,
            s2x,
        })
    }
}

fn decode_matrices(hex: &str) -> Result<[ByteMatrix; 4], RecordError> {
    let digits = hex
        .char_indices()
        .map(|(offset, digit)| {
            digit
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or(RecordError::InvalidHex { offset, digit })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if digits.len() != RECORD_HEX_DIGITS {
        return Err(RecordError::WrongLength(digits.len()));
    }

    let mut matrices = [[0; 8]; 4];
    for (i, byte) in digits.chunks_exact(2).enumerate() {
        matrices[i / 8][i % 8] = byte[0] << 4 | byte[1];
    }
    Ok(matrices)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const RECORD_4: &str =
        "98F3F2480981A9FF64786E8C6829DE60582D9E0BDC0403248C7905EB12045153  4";

    #[test]
    fn test_parse_record() {
        let record: BasisRecord = RECORD_4.parse().unwrap();
        assert_eq!(record.id, 4);
        assert_eq!(record.a2x, hex!("98F3F2480981A9FF"));
        assert_eq!(record.x2a, hex!("64786E8C6829DE60"));
        assert_eq!(record.x2s, hex!("582D9E0BDC040324"));
        assert_eq!(record.s2x, hex!("8C7905EB12045153"));
    }

    #[test]
    fn test_lowercase_and_padding() {
        let line = format!("   {}\t", RECORD_4.to_lowercase());
        let record = BasisRecord::parse_line(&line).unwrap().unwrap();
        assert_eq!(record, RECORD_4.parse().unwrap());
    }

    #[test]
    fn test_pairs() {
        let record: BasisRecord = RECORD_4.parse().unwrap();
        let [a, b] = record.pairs();
        assert_eq!((a.low_tag, a.high_tag), ("A2X", "S2X"));
        assert_eq!(
            a.columns,
            [0x8C98, 0x79F3, 0x05F2, 0xEB48, 0x1209, 0x0481, 0x51A9, 0x53FF]
        );
        assert_eq!((b.low_tag, b.high_tag), ("X2S", "X2A"));
        assert_eq!(
            b.columns,
            [0x6458, 0x782D, 0x6E9E, 0x8C0B, 0x68DC, 0x2904, 0xDE03, 0x6024]
        );
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        assert!(BasisRecord::parse_line("").is_none());
        assert!(BasisRecord::parse_line("   \n").is_none());
        assert!(BasisRecord::parse_line("# bases for case 4").is_none());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            "98F3 4".parse::<BasisRecord>(),
            Err(RecordError::WrongLength(4))
        );
        assert_eq!(
            RECORD_4.replacen('F', "G", 1).parse::<BasisRecord>(),
            Err(RecordError::InvalidHex {
                offset: 2,
                digit: 'G'
            })
        );
        assert_eq!(
            RECORD_4[..64].parse::<BasisRecord>(),
            Err(RecordError::MissingId)
        );
        assert_eq!(
            RECORD_4.replace(" 4", " four").parse::<BasisRecord>(),
            Err(RecordError::InvalidId("four".to_owned()))
        );
        assert_eq!(
            format!("{RECORD_4} extra").parse::<BasisRecord>(),
            Err(RecordError::Trailing("extra".to_owned()))
        );
    }
}
