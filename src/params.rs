//! This module provides the Ewald parameters and utilities for loading them from TOML files.
//!
//! `EwaldParameters` groups the screening parameter alpha, the Coulomb prefactor, the
//! reciprocal-space cutoff and the enumeration mode of the truncated sum. `EwaldConfig`
//! adds the simulation box so that a whole engine can be described by one file:
//!
//! ```toml
//! alpha = 3.5
//! prefactor = 138.9354859
//! kcut = 12.0
//! range = "symmetric"
//!
//! [box]
//! a = [2.0, 0.0, 0.0]
//! b = [0.0, 2.0, 0.0]
//! c = [0.0, 0.0, 2.0]
//! ```
//!
//! Only `kcut` and the box are mandatory; the other keys fall back to their defaults.

use crate::engine::Ewald;
use crate::error::EwaldError;
use crate::lattice::SimulationBox;
use crate::math::constants::{DEFAULT_ALPHA, DEFAULT_PREFACTOR};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the integer Miller indices of the reciprocal-space sum are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummationRange {
    /// Every axis runs over the closed range `[-max, max]`, so `k` and `-k` always
    /// contribute in pairs.
    #[default]
    Symmetric,
    /// Every axis runs over `[-max, max)`, leaving out the `+max` plane.
    ///
    /// Kept for reproducing results of older codes that enumerate this way.
    HalfOpen,
}

/// Numerical parameters of an Ewald summation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwaldParameters {
    /// Inverse width of the screening Gaussian (called beta in GROMACS), in inverse length units.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Coulomb prefactor 1 / (4 pi eps0) in the caller's unit system.
    #[serde(default = "default_prefactor")]
    pub prefactor: f64,
    /// Radius of the reciprocal-space cutoff sphere, in inverse length units.
    pub kcut: f64,
    /// Enumeration mode of the truncated reciprocal-space sum.
    #[serde(default)]
    pub range: SummationRange,
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_prefactor() -> f64 {
    DEFAULT_PREFACTOR
}

impl EwaldParameters {
    /// Creates parameters with the given cutoff and default alpha, prefactor and range.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewald::EwaldParameters;
    ///
    /// let params = EwaldParameters::new(10.0).with_alpha(5.0);
    /// assert_eq!(params.alpha, 5.0);
    /// assert_eq!(params.prefactor, 138.9354859);
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn new(kcut: f64) -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            prefactor: DEFAULT_PREFACTOR,
            kcut,
            range: SummationRange::default(),
        }
    }

    /// Sets the inverse width of the screening Gaussian.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the Coulomb prefactor.
    pub fn with_prefactor(mut self, prefactor: f64) -> Self {
        self.prefactor = prefactor;
        self
    }

    /// Sets how the Miller indices are enumerated.
    pub fn with_range(mut self, range: SummationRange) -> Self {
        self.range = range;
        self
    }

    /// Checks that alpha and kcut are finite and positive and that the prefactor is finite.
    pub fn validate(&self) -> Result<(), EwaldError> {
        validate_alpha(self.alpha)?;
        validate_kcut(self.kcut)?;
        validate_prefactor(self.prefactor)
    }

    /// Parses parameters from a TOML string and validates them.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::DeserializationError` for malformed TOML or missing keys, and
    /// the matching validation error for out-of-range values.
    pub fn load_from_str(toml_str: &str) -> Result<Self, EwaldError> {
        let params: Self = toml::from_str(toml_str)?;
        params.validate()?;
        Ok(params)
    }
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<(), EwaldError> {
    if alpha.is_finite() && alpha > 0.0 {
        Ok(())
    } else {
        Err(EwaldError::InvalidAlpha(alpha))
    }
}

pub(crate) fn validate_kcut(kcut: f64) -> Result<(), EwaldError> {
    if kcut.is_finite() && kcut > 0.0 {
        Ok(())
    } else {
        Err(EwaldError::InvalidKCut(kcut))
    }
}

pub(crate) fn validate_prefactor(prefactor: f64) -> Result<(), EwaldError> {
    if prefactor.is_finite() {
        Ok(())
    } else {
        Err(EwaldError::InvalidPrefactor(prefactor))
    }
}

/// A complete engine description: Ewald parameters plus the simulation box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwaldConfig {
    #[serde(flatten)]
    pub parameters: EwaldParameters,
    #[serde(rename = "box")]
    pub simulation_box: SimulationBox,
}

impl EwaldConfig {
    /// Loads an engine description from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::IoError` if the file cannot be read, and the errors of
    /// [`EwaldConfig::load_from_str`] otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ewald::EwaldConfig;
    /// use std::path::Path;
    ///
    /// let config = EwaldConfig::load_from_file(Path::new("ewald.toml")).unwrap();
    /// let engine = config.build().unwrap();
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, EwaldError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| EwaldError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses an engine description from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::DeserializationError` if the TOML is malformed, a mandatory
    /// key is missing or the box is degenerate, and the matching validation error if a
    /// parameter is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewald::EwaldConfig;
    ///
    /// let toml_data = r#"
    /// alpha = 5.0
    /// kcut = 10.0
    ///
    /// [box]
    /// a = [1.0, 0.0, 0.0]
    /// b = [0.0, 1.0, 0.0]
    /// c = [0.0, 0.0, 1.0]
    /// "#;
    ///
    /// let config = EwaldConfig::load_from_str(toml_data).unwrap();
    /// assert_eq!(config.parameters.alpha, 5.0);
    /// assert!((config.simulation_box.volume() - 1.0).abs() < 1e-12);
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, EwaldError> {
        let config: Self = toml::from_str(toml_str)?;
        config.parameters.validate()?;
        Ok(config)
    }

    /// Builds an engine from this description.
    pub fn build(&self) -> Result<Ewald, EwaldError> {
        Ewald::new(self.simulation_box, self.parameters)
    }
}
