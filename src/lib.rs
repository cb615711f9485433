//! Ewald summation for periodic systems of point charges.
//!
//! The crate computes the reciprocal-space (k-space) part of the electrostatic energy,
//! the self-energy correction that goes with it, the optional dipolar surface term and
//! the screened real-space pair energy. Charges are read through the [`ChargeSet`]
//! trait, so callers keep their own data layout.

pub mod engine;
pub mod error;
pub mod kspace;
pub mod lattice;
pub mod math;
pub mod params;
pub mod types;

pub use engine::Ewald;
pub use error::EwaldError;
pub use kspace::{KSpaceEnergy, dipolar_correction, dipole_moment, self_energy, structure_factor};
pub use lattice::{CutoffGrid, ReciprocalLattice, SimulationBox};
pub use math::vector::Vec3;
pub use params::{EwaldConfig, EwaldParameters, SummationRange};
pub use types::{Charge, ChargeIter, ChargeSet, PointCharge, ZippedCharges};
