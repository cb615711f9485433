//! This module describes the periodic cell and everything derived from it.
//!
//! A `SimulationBox` holds the three real-space lattice vectors and their volume. The
//! `ReciprocalLattice` is the dual basis scaled by 2 pi, and the `CutoffGrid` holds the
//! integer half-widths that truncate the reciprocal-space sum at a given `kcut`. Both
//! derived values are recomputed from scratch whenever the box or cutoff changes; they
//! are never updated incrementally.

use crate::error::EwaldError;
use crate::math::constants::{DEGENERACY_TOLERANCE, MAX_HALF_WIDTH, TWO_PI};
use crate::math::vector::{self, Vec3};
use crate::params::SummationRange;
use serde::{Deserialize, Serialize};

/// The real-space periodic cell, spanned by three lattice vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBox", into = "RawBox")]
pub struct SimulationBox {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    volume: f64,
}

impl SimulationBox {
    /// Builds a box from three linearly independent lattice vectors.
    ///
    /// The volume is the absolute value of the scalar triple product, so left-handed
    /// bases are accepted as well.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::DegenerateBox` if any component is non-finite or if the
    /// vectors are (nearly) coplanar, i.e. `|V| <= DEGENERACY_TOLERANCE |a| |b| |c|`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewald::SimulationBox;
    ///
    /// let cell = SimulationBox::new([2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]).unwrap();
    /// assert!((cell.volume() - 8.0).abs() < 1e-12);
    ///
    /// let flat = SimulationBox::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]);
    /// assert!(flat.is_err());
    /// ```
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Result<Self, EwaldError> {
        let volume = vector::triple_product(a, b, c).abs();
        let finite = vector::is_finite(a) && vector::is_finite(b) && vector::is_finite(c);
        let scale = vector::norm(a) * vector::norm(b) * vector::norm(c);
        if !finite || !volume.is_finite() || volume <= DEGENERACY_TOLERANCE * scale {
            return Err(EwaldError::DegenerateBox { volume });
        }
        Ok(Self { a, b, c, volume })
    }

    /// A cubic box with edge length `length`.
    pub fn cubic(length: f64) -> Result<Self, EwaldError> {
        Self::orthorhombic(length, length, length)
    }

    /// A rectangular box with edges along the Cartesian axes.
    pub fn orthorhombic(lx: f64, ly: f64, lz: f64) -> Result<Self, EwaldError> {
        Self::new([lx, 0.0, 0.0], [0.0, ly, 0.0], [0.0, 0.0, lz])
    }

    /// The first lattice vector.
    pub fn a(&self) -> Vec3 {
        self.a
    }

    /// The second lattice vector.
    pub fn b(&self) -> Vec3 {
        self.b
    }

    /// The third lattice vector.
    pub fn c(&self) -> Vec3 {
        self.c
    }

    /// The three lattice vectors in `[a, b, c]` order.
    pub fn vectors(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Cell volume `|(a x b) . c|`.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Computes the reciprocal lattice of this box.
    ///
    /// `ar = 2 pi (b x c) / V` and cyclic, with `V` the signed triple product so that
    /// `ar . a = 2 pi` holds for left-handed bases as well.
    pub fn reciprocal(&self) -> ReciprocalLattice {
        let signed_volume = vector::triple_product(self.a, self.b, self.c);
        let factor = TWO_PI / signed_volume;
        ReciprocalLattice {
            ar: vector::scale(vector::cross(self.b, self.c), factor),
            br: vector::scale(vector::cross(self.c, self.a), factor),
            cr: vector::scale(vector::cross(self.a, self.b), factor),
        }
    }
}

/// Plain serde mirror of `SimulationBox`, validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawBox {
    a: Vec3,
    b: Vec3,
    c: Vec3,
}

impl TryFrom<RawBox> for SimulationBox {
    type Error = EwaldError;

    fn try_from(raw: RawBox) -> Result<Self, Self::Error> {
        SimulationBox::new(raw.a, raw.b, raw.c)
    }
}

impl From<SimulationBox> for RawBox {
    fn from(cell: SimulationBox) -> Self {
        RawBox {
            a: cell.a,
            b: cell.b,
            c: cell.c,
        }
    }
}

/// The reciprocal basis `(ar, br, cr)` of a simulation box.
///
/// Satisfies `ar . a = 2 pi`, `ar . b = ar . c = 0` and the cyclic permutations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocalLattice {
    /// Dual to `a`.
    pub ar: Vec3,
    /// Dual to `b`.
    pub br: Vec3,
    /// Dual to `c`.
    pub cr: Vec3,
}

impl ReciprocalLattice {
    /// The reciprocal vectors in `[ar, br, cr]` order.
    pub fn vectors(&self) -> [Vec3; 3] {
        [self.ar, self.br, self.cr]
    }

    /// The reciprocal lattice vector `k = l ar + m br + n cr`.
    #[inline]
    pub fn k_vector(&self, l: i32, m: i32, n: i32) -> Vec3 {
        let k = vector::scale(self.ar, l as f64);
        let k = vector::add(k, vector::scale(self.br, m as f64));
        vector::add(k, vector::scale(self.cr, n as f64))
    }
}

/// Integer half-widths of the truncated reciprocal-space sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutoffGrid {
    /// Half-width along `ar`.
    pub lmax: i32,
    /// Half-width along `br`.
    pub mmax: i32,
    /// Half-width along `cr`.
    pub nmax: i32,
}

impl CutoffGrid {
    /// Derives the half-widths as `floor(kcut / |reciprocal vector|)` for each axis.
    ///
    /// Every half-width is at least one, so the first shell of reciprocal vectors is
    /// always part of the sum even when `kcut` is shorter than the reciprocal basis.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::CutoffGridTooLarge` if a half-width would exceed
    /// `MAX_HALF_WIDTH`.
    pub fn derive(reciprocal: &ReciprocalLattice, kcut: f64) -> Result<Self, EwaldError> {
        let half_width = |v: Vec3| -> Result<i32, EwaldError> {
            let width = (kcut / vector::norm(v)).floor();
            if width.is_nan() || width > MAX_HALF_WIDTH as f64 {
                return Err(EwaldError::CutoffGridTooLarge {
                    kcut,
                    half_width: width,
                    limit: MAX_HALF_WIDTH,
                });
            }
            Ok((width as i32).max(1))
        };
        let grid = Self {
            lmax: half_width(reciprocal.ar)?,
            mmax: half_width(reciprocal.br)?,
            nmax: half_width(reciprocal.cr)?,
        };
        log::trace!(
            "Derived k-space cutoff grid (lmax, mmax, nmax) = ({}, {}, {}) for kcut = {}",
            grid.lmax,
            grid.mmax,
            grid.nmax,
            kcut
        );
        Ok(grid)
    }

    /// The integer range enumerated along one axis.
    #[inline]
    pub fn axis(half_width: i32, range: SummationRange) -> std::ops::Range<i32> {
        match range {
            SummationRange::Symmetric => -half_width..half_width.saturating_add(1),
            SummationRange::HalfOpen => -half_width..half_width,
        }
    }

    /// Number of integer triples enumerated, including the excluded origin if it is in range.
    pub fn len(&self, range: SummationRange) -> usize {
        let count = |h: i32| Self::axis(h, range).len();
        count(self.lmax)
            .saturating_mul(count(self.mmax))
            .saturating_mul(count(self.nmax))
    }

    /// Returns `true` when no nonzero reciprocal vector lies within the grid.
    pub fn is_empty(&self, range: SummationRange) -> bool {
        self.indices(range).next().is_none()
    }

    /// All integer triples `(l, m, n)` of the grid except the origin, in lexicographic order.
    pub fn indices(&self, range: SummationRange) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        let (mmax, nmax) = (self.mmax, self.nmax);
        Self::axis(self.lmax, range)
            .flat_map(move |l| Self::axis(mmax, range).map(move |m| (l, m)))
            .flat_map(move |(l, m)| Self::axis(nmax, range).map(move |n| (l, m, n)))
            .filter(|&(l, m, n)| !(l == 0 && m == 0 && n == 0))
    }
}
