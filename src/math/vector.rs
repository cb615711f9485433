//! Small helpers for three-component Cartesian vectors.
//!
//! Positions and lattice vectors are plain `[f64; 3]` arrays throughout the
//! crate, the same representation callers already hand over for their sites.

/// A Cartesian vector.
pub type Vec3 = [f64; 3];

/// Dot product `a . b`.
#[inline(always)]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product `a x b`.
#[inline(always)]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Multiplies every component of `a` by `s`.
#[inline(always)]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// Component-wise sum `a + b`.
#[inline(always)]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Squared Euclidean length.
#[inline(always)]
pub fn norm_squared(a: Vec3) -> f64 {
    dot(a, a)
}

/// Euclidean length.
#[inline(always)]
pub fn norm(a: Vec3) -> f64 {
    norm_squared(a).sqrt()
}

/// Returns `true` if no component is NaN or infinite.
#[inline(always)]
pub fn is_finite(a: Vec3) -> bool {
    a.iter().all(|x| x.is_finite())
}

/// Scalar triple product `(a x b) . c`, the signed volume spanned by three vectors.
#[inline]
pub fn triple_product(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    dot(cross(a, b), c)
}
