//! This module defines the numerical constants shared by the Ewald engine.
//!
//! They cover the default Coulomb prefactor in molecular-dynamics units, the
//! handful of powers of pi that appear in the reciprocal-space formulas, and the
//! limits used when validating a simulation box and its cutoff grid.

use std::f64::consts::PI;

/// Coulomb prefactor 1 / (4 pi eps0) in MD units.
///
/// Distances in nm, charges in units of the elementary charge and energies in
/// kJ/mol. This matches the convention used by GROMACS and is the default for
/// every new engine.
pub const DEFAULT_PREFACTOR: f64 = 138.935_485_9;

/// Default inverse width of the screening Gaussian.
///
/// There is no universally good value; callers are expected to tune it against
/// their real-space cutoff and `kcut`.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// 2 pi, the normalisation of the reciprocal lattice.
pub const TWO_PI: f64 = 2.0 * PI;

/// Square root of pi.
pub const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Smallest accepted ratio `|V| / (|a| |b| |c|)` of a simulation box.
///
/// The ratio is 1 for an orthogonal cell and 0 for coplanar vectors. It is
/// dimensionless, so boxes in metres and boxes in angstrom are judged alike.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Largest Miller-index half-width of the cutoff grid along one axis.
///
/// A grid this wide already holds about 2e15 reciprocal vectors; anything wider
/// cannot be summed and would overflow the index arithmetic.
pub const MAX_HALF_WIDTH: i32 = 1 << 16;
