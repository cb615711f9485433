//! This module provides mathematical utilities and constants for the ewald library.
//!
//! It contains the constants used by the reciprocal-space formulas and the
//! three-vector algebra (dot and cross products, triple product) needed to build
//! the reciprocal lattice from the real-space box.

/// Numerical constants: default prefactor and alpha, powers of pi and validation thresholds.
pub mod constants;

/// Cartesian vector helpers operating on `[f64; 3]`.
pub mod vector;
