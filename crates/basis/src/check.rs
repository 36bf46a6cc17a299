//! Consistency checks on the matrices of a basis record.

use std::fmt;

use crate::aes::affine_matrix;
use crate::matrix::{IDENTITY, compose};
use crate::record::BasisRecord;

/// A relation the four matrices of a record must satisfy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasisCheck {
    /// `X2A` undoes `A2X`.
    PolynomialRoundTrip,
    /// `S2X` undoes `X2S`.
    SboxRoundTrip,
    /// `A2X` followed by `X2S` is the linear part of the AES affine map.
    AffineMap,
}

impl BasisCheck {
    /// Every check, in reporting order.
    pub const ALL: [BasisCheck; 3] = [
        BasisCheck::PolynomialRoundTrip,
        BasisCheck::SboxRoundTrip,
        BasisCheck::AffineMap,
    ];

    /// Whether `record` satisfies this check.
    pub fn holds(self, record: &BasisRecord) -> bool {
        match self {
            BasisCheck::PolynomialRoundTrip => compose(&record.a2x, &record.x2a) == IDENTITY,
            BasisCheck::SboxRoundTrip => compose(&record.x2s, &record.s2x) == IDENTITY,
            BasisCheck::AffineMap => compose(&record.a2x, &record.x2s) == affine_matrix(),
        }
    }
}

impl fmt::Display for BasisCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BasisCheck::PolynomialRoundTrip => "X2A*A2X = I",
            BasisCheck::SboxRoundTrip => "S2X*X2S = I",
            BasisCheck::AffineMap => "X2S*A2X = affine",
        };
        f.write_str(name)
    }
}

/// The checks `record` fails, in reporting order.
pub fn failed_checks(record: &BasisRecord) -> Vec<BasisCheck> {
    BasisCheck::ALL
        .into_iter()
        .filter(|check| !check.holds(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_4_is_consistent() {
        let record: BasisRecord =
            "98F3F2480981A9FF64786E8C6829DE60582D9E0BDC0403248C7905EB12045153 4"
                .parse()
                .unwrap();
        assert!(failed_checks(&record).is_empty());
    }

    #[test]
    fn test_quick_record_is_not_a_basis() {
        let record: BasisRecord =
            "F1261450CA86D330C502A8BF412B3590352582D03974323C65C4836C69953380 0"
                .parse()
                .unwrap();
        assert_eq!(failed_checks(&record), BasisCheck::ALL.to_vec());
    }

    #[test]
    fn test_single_failure() {
        let mut record: BasisRecord =
            "98F3F2480981A9FF64786E8C6829DE60582D9E0BDC0403248C7905EB12045153 4"
                .parse()
                .unwrap();
        record.s2x = IDENTITY;
        assert_eq!(failed_checks(&record), vec![BasisCheck::SboxRoundTrip]);
    }

    #[test]
    fn test_display() {
        assert_eq!(BasisCheck::AffineMap.to_string(), "X2S*A2X = affine");
    }
}
