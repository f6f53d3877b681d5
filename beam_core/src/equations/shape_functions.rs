//! # Hermite Cubic Shape Functions
//!
//! Basis for the two-node Euler-Bernoulli element. Each node carries a
//! transverse displacement and a rotation, so the element interpolates
//!
//! ```text
//! w(s) = N1·w1 + N2·θ1 + N3·w2 + N4·θ2,    s = (x − x1)/Le ∈ [0, 1]
//! ```
//!
//! Derivatives are taken analytically in `s` and rescaled with
//! d/dx = (1/Le)·d/ds. The third derivative of a cubic is constant, so shear
//! recovered from it is piecewise constant along the span.

/// Hermite basis values [N1, N2, N3, N4] at normalized position `s`.
///
/// # Example
/// ```rust
/// use beam_core::equations::hermite_values;
///
/// // Left end: only the left displacement function is active
/// assert_eq!(hermite_values(0.0, 2.0), [1.0, 0.0, 0.0, 0.0]);
/// // Right end: only the right displacement function is active
/// assert_eq!(hermite_values(1.0, 2.0), [0.0, 0.0, 1.0, 0.0]);
/// ```
#[inline]
pub fn hermite_values(s: f64, le: f64) -> [f64; 4] {
    let s2 = s * s;
    let s3 = s2 * s;
    [
        1.0 - 3.0 * s2 + 2.0 * s3,
        le * (s - 2.0 * s2 + s3),
        3.0 * s2 - 2.0 * s3,
        le * (-s2 + s3),
    ]
}

/// Second derivatives d²N/dx² at normalized position `s`.
///
/// Multiplied into the element DOFs this gives the curvature w″, and
/// M = EI·w″.
#[inline]
pub fn hermite_second_derivatives(s: f64, le: f64) -> [f64; 4] {
    let le2 = le * le;
    [
        (-6.0 + 12.0 * s) / le2,
        (-4.0 + 6.0 * s) / le,
        (6.0 - 12.0 * s) / le2,
        (-2.0 + 6.0 * s) / le,
    ]
}

/// Third derivatives d³N/dx³. Constant over the element.
///
/// Multiplied into the element DOFs this gives w‴, and V = EI·w‴.
#[inline]
pub fn hermite_third_derivatives(le: f64) -> [f64; 4] {
    let le2 = le * le;
    let le3 = le2 * le;
    [12.0 / le3, 6.0 / le2, -12.0 / le3, 6.0 / le2]
}

/// Dot product of a basis row with the element DOF vector
#[inline]
pub fn interpolate(basis: &[f64; 4], element_dofs: &[f64; 4]) -> f64 {
    basis
        .iter()
        .zip(element_dofs.iter())
        .map(|(n, u)| n * u)
        .sum()
}
