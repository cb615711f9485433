use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `ewald` library.
///
/// Every variant describes a violated caller contract: a degenerate box, an
/// out-of-range parameter, a malformed charge set or an unreadable
/// configuration file. None of them is raised from inside the summation loops;
/// inputs are checked once, at the boundary, before any work is done.
#[derive(Error, Debug)]
pub enum EwaldError {
    /// The three box vectors are (nearly) coplanar or contain non-finite
    /// components, so the cell has no usable volume. Coplanarity is judged
    /// relative to `|a| |b| |c|`, so the check does not depend on length units.
    #[error("Degenerate simulation box: volume {volume:.3e} is not usable")]
    DegenerateBox {
        /// The scalar triple product of the offending box vectors.
        volume: f64,
    },

    /// The Gaussian splitting parameter must be finite and strictly positive.
    #[error("Invalid Ewald alpha: {0} (must be finite and > 0)")]
    InvalidAlpha(f64),

    /// The reciprocal-space cutoff must be finite and strictly positive.
    #[error("Invalid k-space cutoff: {0} (must be finite and > 0)")]
    InvalidKCut(f64),

    /// The cutoff reaches further into reciprocal space than the grid can index.
    ///
    /// Raised when `kcut / |reciprocal vector|` exceeds `MAX_HALF_WIDTH` on some axis,
    /// either because `kcut` is huge or because the box is very large.
    #[error("k-space cutoff {kcut} needs a grid half-width of {half_width:.3e} (limit {limit})")]
    CutoffGridTooLarge {
        /// The requested cutoff.
        kcut: f64,
        /// The unclamped half-width `kcut / |reciprocal vector|` on the widest axis.
        half_width: f64,
        /// The largest half-width the grid accepts.
        limit: i32,
    },

    /// The Coulomb prefactor must be finite.
    #[error("Invalid Coulomb prefactor: {0} (must be finite)")]
    InvalidPrefactor(f64),

    /// Parallel position and charge sequences disagree on the number of sites.
    #[error("Charge set length mismatch: {positions} positions but {charges} charges")]
    LengthMismatch {
        /// Number of positions supplied.
        positions: usize,
        /// Number of charges supplied.
        charges: usize,
    },

    /// An energy was requested for a charge set with no sites.
    #[error("Input validation failed: at least one charge is required for a calculation")]
    NoCharges,

    /// A site carries a NaN or infinite charge or position component.
    #[error("Charge site {index} has a non-finite position or charge")]
    NonFiniteCharge {
        /// Index of the offending site within the charge set.
        index: usize,
    },

    /// The real-space pair term is only defined for strictly positive separations.
    #[error("Pair distance must be finite and > 0, got {0}")]
    NonPositiveDistance(f64),

    /// An I/O error that occurred while reading a configuration file.
    #[error("I/O error at path '{path}': {source}")]
    IoError {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the expected layout.
    #[error("Failed to deserialize TOML configuration: {0}")]
    DeserializationError(#[from] toml::de::Error),
}
