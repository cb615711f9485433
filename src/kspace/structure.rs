//! Quantities of a charge set that do not depend on the cutoff grid.
//!
//! The structure factor is evaluated once per reciprocal vector; the self-energy and
//! the dipolar (surface) term are single passes over the charges.

use crate::math::constants::{SQRT_PI, TWO_PI};
use crate::math::vector::{self, Vec3};
use crate::types::ChargeSet;
use num_complex::Complex64;

/// Computes the structure factor `S(k) = sum_j q_j exp(-i k . r_j)`.
///
/// The negative phase convention matches the energy expression, which only uses
/// `|S(k)|^2`.
///
/// # Examples
///
/// ```
/// use ewald::{Charge, structure_factor};
///
/// let charges = vec![Charge::new([0.0, 0.0, 0.0], 2.0)];
/// let s = structure_factor([1.0, 2.0, 3.0], &charges);
/// assert!((s.re - 2.0).abs() < 1e-12);
/// assert!(s.im.abs() < 1e-12);
/// ```
#[inline]
pub fn structure_factor<S: ChargeSet + ?Sized>(k: Vec3, charges: &S) -> Complex64 {
    (0..charges.len()).fold(Complex64::new(0.0, 0.0), |acc, j| {
        let phase = -vector::dot(k, charges.position(j));
        acc + Complex64::from_polar(charges.charge(j), phase)
    })
}

/// Computes the self-energy `f alpha / sqrt(pi) sum_i q_i^2`.
///
/// This is the interaction of every point charge with its own screening Gaussian,
/// which the reciprocal-space sum includes and which must be removed again. It has to
/// be evaluated with the same alpha and prefactor as that sum.
pub fn self_energy<S: ChargeSet + ?Sized>(charges: &S, alpha: f64, prefactor: f64) -> f64 {
    let sum_q2: f64 = (0..charges.len()).map(|i| charges.charge(i).powi(2)).sum();
    prefactor * alpha / SQRT_PI * sum_q2
}

/// The net dipole moment `sum_i q_i r_i` of the charge set.
pub fn dipole_moment<S: ChargeSet + ?Sized>(charges: &S) -> Vec3 {
    (0..charges.len()).fold([0.0; 3], |acc, i| {
        vector::add(acc, vector::scale(charges.position(i), charges.charge(i)))
    })
}

/// The surface term `2 pi / (3 V) |sum_i q_i r_i|^2` for a cell in vacuum.
///
/// Under tin-foil boundary conditions this term vanishes, which is why the energy
/// routines never add it on their own. The value carries no Coulomb prefactor.
pub fn dipolar_correction<S: ChargeSet + ?Sized>(charges: &S, volume: f64) -> f64 {
    TWO_PI / (3.0 * volume) * vector::norm_squared(dipole_moment(charges))
}
