//! This module implements the `Ewald` engine, the entry point for energy evaluations.
//!
//! The engine owns one consistent configuration: the simulation box, the Ewald
//! parameters and the reciprocal lattice and cutoff grid derived from them. Mutators
//! validate their input and re-derive every dependent quantity before returning, so the
//! order in which the box and the cutoff are set does not matter and a failed update
//! leaves the previous configuration untouched. Evaluations borrow the engine
//! immutably; a clone is an independent snapshot that can be handed to another thread.

use crate::error::EwaldError;
use crate::kspace::{self, KSpaceEnergy};
use crate::lattice::{CutoffGrid, ReciprocalLattice, SimulationBox};
use crate::math::constants::TWO_PI;
use crate::math::vector::Vec3;
use crate::params::{self, EwaldParameters, SummationRange};
use crate::types::{self, ChargeSet};
use libm::erfc;

/// Ewald summation engine for a periodic system of point charges.
///
/// It evaluates the reciprocal-space energy of a charge set and the screened real-space
/// pair term. Summing `pair_energy` over all pairs within the real-space cutoff,
/// including periodic images, is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Ewald {
    /// The periodic cell.
    simulation_box: SimulationBox,
    /// Alpha, prefactor, cutoff and enumeration mode.
    parameters: EwaldParameters,
    /// Reciprocal basis derived from `simulation_box`.
    reciprocal: ReciprocalLattice,
    /// Half-widths derived from `reciprocal` and `parameters.kcut`.
    grid: CutoffGrid,
}

impl Ewald {
    /// Creates an engine for the given box and parameters.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::InvalidAlpha`, `InvalidKCut` or `InvalidPrefactor` if the
    /// parameters are out of range, and `EwaldError::CutoffGridTooLarge` if `kcut` is
    /// too long for the box.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewald::{Charge, Ewald, EwaldParameters, SimulationBox};
    ///
    /// // 1. Describe the cell and the splitting
    /// let cell = SimulationBox::cubic(1.0).unwrap();
    /// let params = EwaldParameters::new(10.0).with_alpha(5.0);
    /// let ewald = Ewald::new(cell, params).unwrap();
    ///
    /// // 2. Evaluate the reciprocal-space energy of a neutral pair
    /// let charges = vec![
    ///     Charge::new([0.0, 0.0, 0.0], 1.0),
    ///     Charge::new([0.5, 0.5, 0.5], -1.0),
    /// ];
    /// let energy = ewald.energy_kspace(&charges).unwrap();
    /// assert!(energy.is_finite());
    /// ```
    pub fn new(
        simulation_box: SimulationBox,
        parameters: EwaldParameters,
    ) -> Result<Self, EwaldError> {
        parameters.validate()?;
        let reciprocal = simulation_box.reciprocal();
        let grid = CutoffGrid::derive(&reciprocal, parameters.kcut)?;
        Ok(Self {
            simulation_box,
            parameters,
            reciprocal,
            grid,
        })
    }

    /// Replaces the simulation box by the cell spanned by `a`, `b` and `c`.
    ///
    /// The reciprocal lattice and the cutoff grid are recomputed from the new box and the
    /// current `kcut`.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::DegenerateBox` if the vectors are coplanar or non-finite, and
    /// `EwaldError::CutoffGridTooLarge` if the current `kcut` is too long for the new box.
    /// The engine keeps its previous box in both cases.
    pub fn set_box(&mut self, a: Vec3, b: Vec3, c: Vec3) -> Result<(), EwaldError> {
        let simulation_box = SimulationBox::new(a, b, c)
            .inspect_err(|e| log::warn!("Rejected box update: {}", e))?;
        self.set_simulation_box(simulation_box)
    }

    /// Replaces the simulation box by an already validated one.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::CutoffGridTooLarge` if the current `kcut` is too long for the
    /// new box; the engine is left unchanged.
    pub fn set_simulation_box(&mut self, simulation_box: SimulationBox) -> Result<(), EwaldError> {
        let reciprocal = simulation_box.reciprocal();
        let grid = CutoffGrid::derive(&reciprocal, self.parameters.kcut)
            .inspect_err(|e| log::warn!("Rejected box update: {}", e))?;
        self.simulation_box = simulation_box;
        self.reciprocal = reciprocal;
        self.grid = grid;
        Ok(())
    }

    /// Sets the inverse width of the screening Gaussian.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::InvalidAlpha` unless `alpha` is finite and positive.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), EwaldError> {
        params::validate_alpha(alpha).inspect_err(|e| log::warn!("Rejected alpha: {}", e))?;
        self.parameters.alpha = alpha;
        Ok(())
    }

    /// Sets the Coulomb prefactor 1 / (4 pi eps0) in the caller's units.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::InvalidPrefactor` if `prefactor` is not finite.
    pub fn set_prefactor(&mut self, prefactor: f64) -> Result<(), EwaldError> {
        params::validate_prefactor(prefactor)
            .inspect_err(|e| log::warn!("Rejected prefactor: {}", e))?;
        self.parameters.prefactor = prefactor;
        Ok(())
    }

    /// Sets the reciprocal-space cutoff and recomputes the cutoff grid for the current box.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::InvalidKCut` unless `kcut` is finite and positive, and
    /// `EwaldError::CutoffGridTooLarge` if it is too long for the current box.
    pub fn set_kcut(&mut self, kcut: f64) -> Result<(), EwaldError> {
        params::validate_kcut(kcut).inspect_err(|e| log::warn!("Rejected kcut: {}", e))?;
        self.grid = CutoffGrid::derive(&self.reciprocal, kcut)
            .inspect_err(|e| log::warn!("Rejected kcut: {}", e))?;
        self.parameters.kcut = kcut;
        Ok(())
    }

    /// Selects how the Miller indices of the truncated sum are enumerated.
    pub fn set_range(&mut self, range: SummationRange) {
        self.parameters.range = range;
    }

    /// The inverse width of the screening Gaussian.
    pub fn alpha(&self) -> f64 {
        self.parameters.alpha
    }

    /// The Coulomb prefactor applied to every energy term.
    pub fn prefactor(&self) -> f64 {
        self.parameters.prefactor
    }

    /// The reciprocal-space cutoff radius.
    pub fn kcut(&self) -> f64 {
        self.parameters.kcut
    }

    /// How the Miller indices of the truncated sum are enumerated.
    pub fn range(&self) -> SummationRange {
        self.parameters.range
    }

    /// The volume of the current simulation box.
    pub fn volume(&self) -> f64 {
        self.simulation_box.volume()
    }

    /// The full parameter set, as it would be written to a configuration file.
    pub fn parameters(&self) -> &EwaldParameters {
        &self.parameters
    }

    /// The current simulation box.
    pub fn simulation_box(&self) -> &SimulationBox {
        &self.simulation_box
    }

    /// The reciprocal lattice derived from the current box.
    pub fn reciprocal(&self) -> &ReciprocalLattice {
        &self.reciprocal
    }

    /// The cutoff grid derived from the current box and `kcut`.
    pub fn grid(&self) -> &CutoffGrid {
        &self.grid
    }

    /// Computes the reciprocal-space energy with the self-energy already subtracted.
    ///
    /// `E = f 2 pi / V sum_{k != 0} exp(-k^2 / (4 alpha^2)) / k^2 |S(k)|^2 - E_self`
    ///
    /// The dipolar surface term is not included (tin-foil boundary conditions); add
    /// [`Ewald::dipolar_correction`] for a cell in vacuum.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::NoCharges` for an empty set and `EwaldError::NonFiniteCharge`
    /// if a site has a non-finite position or charge.
    pub fn energy_kspace<S: ChargeSet + ?Sized>(&self, charges: &S) -> Result<f64, EwaldError> {
        self.kspace_breakdown(charges).map(|energy| energy.net())
    }

    /// Computes all components of the reciprocal-space energy.
    ///
    /// The components are also reported through the `log` facade at debug level.
    pub fn kspace_breakdown<S: ChargeSet + ?Sized>(
        &self,
        charges: &S,
    ) -> Result<KSpaceEnergy, EwaldError> {
        types::validate_charge_set(charges)?;

        let energy = KSpaceEnergy {
            reciprocal: self.scaled_reciprocal_sum(charges),
            self_energy: self.unchecked_self_energy(charges),
            dipolar: self.unchecked_dipolar(charges),
        };

        log::debug!(
            "k-space energy: reciprocal = {:.6}, self = {:.6}, net = {:.6}, dipolar = {:.6} ({} sites, grid {}x{}x{})",
            energy.reciprocal,
            energy.self_energy,
            energy.net(),
            energy.dipolar,
            charges.len(),
            self.grid.lmax,
            self.grid.mmax,
            self.grid.nmax
        );

        Ok(energy)
    }

    /// Computes the scaled reciprocal-space sum before the self-energy is subtracted.
    pub fn reciprocal_sum<S: ChargeSet + ?Sized>(&self, charges: &S) -> Result<f64, EwaldError> {
        types::validate_charge_set(charges)?;
        Ok(self.scaled_reciprocal_sum(charges))
    }

    /// Computes the self-energy `f alpha / sqrt(pi) sum_i q_i^2` with this engine's
    /// alpha and prefactor.
    pub fn self_energy<S: ChargeSet + ?Sized>(&self, charges: &S) -> Result<f64, EwaldError> {
        types::validate_charge_set(charges)?;
        Ok(self.unchecked_self_energy(charges))
    }

    /// Computes the vacuum surface term `f 2 pi / (3 V) |sum_i q_i r_i|^2` in energy units.
    pub fn dipolar_correction<S: ChargeSet + ?Sized>(
        &self,
        charges: &S,
    ) -> Result<f64, EwaldError> {
        types::validate_charge_set(charges)?;
        Ok(self.unchecked_dipolar(charges))
    }

    /// Computes the real-space energy `f q / r erfc(alpha r)` of a single pair.
    ///
    /// `q` is the combined charge term, conventionally `q_i q_j`. The caller iterates
    /// over pairs and applies minimum-image or image-sum conventions.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::NonPositiveDistance` unless `r` is finite and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewald::{Ewald, EwaldParameters, SimulationBox};
    ///
    /// let cell = SimulationBox::cubic(3.0).unwrap();
    /// let ewald = Ewald::new(cell, EwaldParameters::new(10.0).with_prefactor(1.0)).unwrap();
    ///
    /// let e = ewald.pair_energy(1.0, -1.0).unwrap();
    /// assert!(e < 0.0 && e > -1.0);
    /// assert!(ewald.pair_energy(0.0, 1.0).is_err());
    /// ```
    pub fn pair_energy(&self, r: f64, q: f64) -> Result<f64, EwaldError> {
        if !r.is_finite() || r <= 0.0 {
            return Err(EwaldError::NonPositiveDistance(r));
        }
        Ok(self.parameters.prefactor * q / r * erfc(self.parameters.alpha * r))
    }

    fn scaled_reciprocal_sum<S: ChargeSet + ?Sized>(&self, charges: &S) -> f64 {
        let sum = kspace::reciprocal_sum(
            &self.reciprocal,
            &self.grid,
            self.parameters.range,
            self.parameters.alpha,
            charges,
        );
        self.parameters.prefactor * TWO_PI / self.volume() * sum
    }

    fn unchecked_self_energy<S: ChargeSet + ?Sized>(&self, charges: &S) -> f64 {
        kspace::self_energy(charges, self.parameters.alpha, self.parameters.prefactor)
    }

    fn unchecked_dipolar<S: ChargeSet + ?Sized>(&self, charges: &S) -> f64 {
        self.parameters.prefactor * kspace::dipolar_correction(charges, self.volume())
    }
}
