//! Error types for rns-crt

use thiserror::Error;

/// Result type alias for rns-crt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or combining residue tuples
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A modulus is <= 1, the set is empty, two moduli share a factor,
    /// or the dynamic range does not fit in a `u64`
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `value` is not a unit modulo `modulus`
    #[error("No inverse exists: {value} is not invertible mod {modulus}")]
    NoInverseExists {
        /// Value that was to be inverted, before reduction
        value: i128,
        /// Modulus of the inversion
        modulus: u64,
    },

    /// Arithmetic between tuples built over different modulus sets
    #[error("Moduli mismatch: operands use different modulus sets")]
    ModuliMismatch,

    /// Residue count does not match the modulus count
    #[error("Length mismatch: expected {expected} residues, got {actual}")]
    LengthMismatch {
        /// Number of moduli
        expected: usize,
        /// Number of residues supplied
        actual: usize,
    },

    /// A residue is not in canonical `[0, modulus)` form
    #[error("Residue out of range: residue {residue} at index {index} (must be in [0, {modulus}))")]
    ResidueOutOfRange {
        /// Component index
        index: usize,
        /// Offending residue
        residue: u64,
        /// Modulus of that component
        modulus: u64,
    },
}
