//! # Cross-Section Property Formulas
//!
//! Formulas for the geometric properties of the supported cross-sections.
//! All sections are symmetric about the bending axis, so the extreme-fiber
//! distance is always half the overall depth.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area about the centroidal bending axis
//! - `c` = Distance from the neutral axis to the extreme fiber
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table A.1
//! - AISC Steel Construction Manual, Part 1: Dimensions and Properties

use std::f64::consts::PI;

// =============================================================================
// RECTANGULAR SECTION
// =============================================================================

/// Area of a solid rectangle
///
/// # Formula
/// A = b × h
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area of a solid rectangle about its strong axis
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │ ════════│ ← neutral axis at h/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// I = b·h³/12
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_moment_of_inertia;
///
/// // 50 mm x 100 mm bar
/// let i = rectangular_moment_of_inertia(0.05, 0.10);
/// assert!((i - 4.1667e-6).abs() < 1e-9);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

// =============================================================================
// CIRCULAR SECTIONS
// =============================================================================

/// Area of a solid circle: A = π·d²/4
#[inline]
pub fn circular_area(d: f64) -> f64 {
    PI * d * d / 4.0
}

/// Second moment of area of a solid circle: I = π·d⁴/64
#[inline]
pub fn circular_moment_of_inertia(d: f64) -> f64 {
    PI * d.powi(4) / 64.0
}

/// Area of a hollow circle (tube): A = π·(Do² − Di²)/4
#[inline]
pub fn hollow_circular_area(d_outer: f64, d_inner: f64) -> f64 {
    PI * (d_outer * d_outer - d_inner * d_inner) / 4.0
}

/// Second moment of area of a hollow circle: I = π·(Do⁴ − Di⁴)/64
///
/// With `d_inner = 0` this reduces exactly to [`circular_moment_of_inertia`].
#[inline]
pub fn hollow_circular_moment_of_inertia(d_outer: f64, d_inner: f64) -> f64 {
    PI * (d_outer.powi(4) - d_inner.powi(4)) / 64.0
}

// =============================================================================
// DOUBLY SYMMETRIC I-SECTION
// =============================================================================

/// Clear web height between the flanges: hw = h − 2·tf
#[inline]
pub fn i_beam_web_height(h: f64, tf: f64) -> f64 {
    h - 2.0 * tf
}

/// Area of a doubly symmetric I-section: A = 2·bf·tf + tw·hw
#[inline]
pub fn i_beam_area(h: f64, bf: f64, tf: f64, tw: f64) -> f64 {
    2.0 * bf * tf + tw * i_beam_web_height(h, tf)
}

/// Second moment of area of a doubly symmetric I-section about the strong axis
///
/// ```text
///   ┌───────────┐  ─┬─ tf
///   └───┐   ┌───┘   │
///       │   │       │ hw
///       │ tw│       │
///   ┌───┘   └───┐   │
///   └───────────┘  ─┴─ tf
///        bf
/// ```
///
/// # Formula
/// Each flange contributes its own centroidal term plus the parallel-axis
/// shift to mid-height:
///
/// I = 2·(bf·tf³/12 + bf·tf·d²) + tw·hw³/12, where d = h/2 − tf/2
///
/// # Example
/// ```rust
/// use beam_core::equations::section::i_beam_moment_of_inertia;
///
/// // Zero-thickness web: just the two flanges
/// let i = i_beam_moment_of_inertia(0.2, 0.1, 0.01, 0.0);
/// let expected = 2.0 * (0.1 * 0.01f64.powi(3) / 12.0 + 0.1 * 0.01 * 0.095f64.powi(2));
/// assert!((i - expected).abs() < 1e-15);
/// ```
#[inline]
pub fn i_beam_moment_of_inertia(h: f64, bf: f64, tf: f64, tw: f64) -> f64 {
    let web_height = i_beam_web_height(h, tf);
    let flange_own = bf * tf.powi(3) / 12.0;
    let offset = h / 2.0 - tf / 2.0;
    2.0 * (flange_own + bf * tf * offset * offset) + tw * web_height.powi(3) / 12.0
}
