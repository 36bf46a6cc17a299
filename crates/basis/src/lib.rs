//! Basis records for subfield S-box constructions.
//!
//! Parses the four basis-conversion matrices of a record, stacks them into
//! the pairs the gate search works on, checks them for consistency against
//! the AES S-box, and computes the S-box itself through tower-field
//! arithmetic.

pub mod aes;
mod check;
pub mod matrix;
mod record;
pub mod tower;

pub use check::{BasisCheck, failed_checks};
pub use matrix::ByteMatrix;
pub use record::{BasisRecord, MatrixPair, RECORD_HEX_DIGITS, RecordError};
