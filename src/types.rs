//! This module defines how the ewald library reads charge data owned by the caller.
//!
//! Two traits form the access contract. `PointCharge` describes a single site that knows
//! its position and charge, in the spirit of a per-record view. `ChargeSet` describes a
//! whole container: a fixed number of sites addressed by a cursor (the site index), each
//! yielding a position and a charge. Any container shape can take part in an energy
//! evaluation by implementing `ChargeSet`; a container without an implementation is
//! rejected by the compiler rather than silently producing zero.
//!
//! The library never copies or mutates a charge set, it only reads it.

use crate::error::EwaldError;
use crate::math::vector::{self, Vec3};

/// A trait for viewing a single point charge without owning it.
///
/// Implement this for your own record type to use slices and vectors of it directly
/// as a `ChargeSet`.
pub trait PointCharge {
    /// Returns the Cartesian position of the site.
    fn position(&self) -> Vec3;

    /// Returns the charge carried by the site.
    fn charge(&self) -> f64;
}

/// A concrete point charge with an owned position and charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// The Cartesian position of the site.
    pub position: Vec3,
    /// The charge carried by the site.
    pub charge: f64,
}

impl Charge {
    /// Creates a point charge `charge` located at `position`.
    pub fn new(position: Vec3, charge: f64) -> Self {
        Self { position, charge }
    }
}

impl PointCharge for Charge {
    #[inline(always)]
    fn position(&self) -> Vec3 {
        self.position
    }

    #[inline(always)]
    fn charge(&self) -> f64 {
        self.charge
    }
}

impl PointCharge for (Vec3, f64) {
    #[inline(always)]
    fn position(&self) -> Vec3 {
        self.0
    }

    #[inline(always)]
    fn charge(&self) -> f64 {
        self.1
    }
}

impl<P: PointCharge + ?Sized> PointCharge for &P {
    #[inline(always)]
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    #[inline(always)]
    fn charge(&self) -> f64 {
        (**self).charge()
    }
}

/// Read-only, index-addressed access to an ordered collection of point charges.
///
/// The cursor is the site index in `0..len()`. Implementations must return the same
/// position and charge for a given index for as long as the borrow lives, and must
/// pair the i-th position with the i-th charge.
///
/// The trait requires `Sync` so that the reciprocal-space sum can read the set from
/// several worker threads at once.
pub trait ChargeSet: Sync {
    /// Returns the number of sites in the set.
    fn len(&self) -> usize;

    /// Returns the position of the site at `index`.
    fn position(&self, index: usize) -> Vec3;

    /// Returns the charge of the site at `index`.
    fn charge(&self, index: usize) -> f64;

    /// Returns `true` if the set holds no sites.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(position, charge)` pairs in site order.
    fn sites(&self) -> ChargeIter<'_, Self> {
        ChargeIter {
            set: self,
            index: 0,
        }
    }
}

/// Sequential iterator over the sites of a `ChargeSet`.
pub struct ChargeIter<'a, S: ChargeSet + ?Sized> {
    set: &'a S,
    index: usize,
}

impl<S: ChargeSet + ?Sized> Iterator for ChargeIter<'_, S> {
    type Item = (Vec3, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.set.len() {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some((self.set.position(i), self.set.charge(i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<S: ChargeSet + ?Sized> ExactSizeIterator for ChargeIter<'_, S> {}

impl<P: PointCharge + Sync> ChargeSet for [P] {
    #[inline(always)]
    fn len(&self) -> usize {
        <[P]>::len(self)
    }

    #[inline(always)]
    fn position(&self, index: usize) -> Vec3 {
        self[index].position()
    }

    #[inline(always)]
    fn charge(&self, index: usize) -> f64 {
        self[index].charge()
    }
}

impl<P: PointCharge + Sync> ChargeSet for Vec<P> {
    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline(always)]
    fn position(&self, index: usize) -> Vec3 {
        self[index].position()
    }

    #[inline(always)]
    fn charge(&self, index: usize) -> f64 {
        self[index].charge()
    }
}

impl<S: ChargeSet + ?Sized> ChargeSet for &S {
    #[inline(always)]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline(always)]
    fn position(&self, index: usize) -> Vec3 {
        (**self).position(index)
    }

    #[inline(always)]
    fn charge(&self, index: usize) -> f64 {
        (**self).charge(index)
    }
}

/// Two parallel sequences, one of positions and one of charges, viewed as a charge set.
///
/// The lengths are checked when the view is built, so every index below `len()` is
/// valid for both slices.
#[derive(Debug, Clone, Copy)]
pub struct ZippedCharges<'a> {
    positions: &'a [Vec3],
    charges: &'a [f64],
}

impl<'a> ZippedCharges<'a> {
    /// Pairs `positions[i]` with `charges[i]`.
    ///
    /// # Errors
    ///
    /// Returns `EwaldError::LengthMismatch` if the two slices differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewald::{ChargeSet, ZippedCharges};
    ///
    /// let positions = [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]];
    /// let charges = [1.0, -1.0];
    /// let set = ZippedCharges::new(&positions, &charges).unwrap();
    /// assert_eq!(set.len(), 2);
    ///
    /// assert!(ZippedCharges::new(&positions, &charges[..1]).is_err());
    /// ```
    pub fn new(positions: &'a [Vec3], charges: &'a [f64]) -> Result<Self, EwaldError> {
        if positions.len() != charges.len() {
            return Err(EwaldError::LengthMismatch {
                positions: positions.len(),
                charges: charges.len(),
            });
        }
        Ok(Self { positions, charges })
    }

    /// The borrowed positions, one per site.
    pub fn positions(&self) -> &'a [Vec3] {
        self.positions
    }

    /// The borrowed charges, in the same order as the positions.
    pub fn charges(&self) -> &'a [f64] {
        self.charges
    }
}

impl ChargeSet for ZippedCharges<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline(always)]
    fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    #[inline(always)]
    fn charge(&self, index: usize) -> f64 {
        self.charges[index]
    }
}

/// Checks that a charge set is non-empty and that every site is finite.
pub(crate) fn validate_charge_set<S: ChargeSet + ?Sized>(
    charges: &S,
) -> Result<(), EwaldError> {
    if charges.is_empty() {
        return Err(EwaldError::NoCharges);
    }
    for index in 0..charges.len() {
        if !charges.charge(index).is_finite() || !vector::is_finite(charges.position(index)) {
            return Err(EwaldError::NonFiniteCharge { index });
        }
    }
    Ok(())
}
