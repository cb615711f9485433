//! This module contains the reciprocal-space part of the Ewald summation.
//!
//! `structure` holds the per-charge-set quantities (structure factor, self-energy and
//! dipolar correction) and `energy` the truncated sum over the reciprocal lattice
//! together with the `KSpaceEnergy` breakdown returned to callers.

mod energy;
mod structure;

pub use energy::KSpaceEnergy;
pub use structure::{dipolar_correction, dipole_moment, self_energy, structure_factor};

pub(crate) use energy::reciprocal_sum;
