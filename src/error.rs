//! Error taxonomy for the public API.
//!
//! Three kinds exist: configuration problems surface at construction,
//! deserialization problems surface from the slice parsers, and entropy
//! problems surface only from the randomized entry points. Decapsulation
//! never errors; mismatches are absorbed by implicit rejection.

use thiserror::Error;

/// Typed failure returned by key parsing, level lookup, and the randomized
/// operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KemError {
    /// The requested security-level name is not one of the defined sets.
    #[error("unknown security level `{0}`")]
    UnknownSecurityLevel(String),

    /// Input bytes do not match the declared length for the object.
    #[error("{object}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        object: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The caller-supplied random source failed to produce bytes.
    #[error("random source failure")]
    EntropyFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let e = KemError::LengthMismatch {
            object: "ciphertext",
            expected: 768,
            actual: 1088,
        };
        let msg = e.to_string();
        assert!(msg.contains("ciphertext"));
        assert!(msg.contains("768"));
        assert!(msg.contains("1088"));
    }

    #[test]
    fn unknown_level_carries_the_name() {
        let e = KemError::UnknownSecurityLevel("L7".into());
        assert!(e.to_string().contains("L7"));
    }
}
