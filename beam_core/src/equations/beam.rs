//! # Closed-Form Single-Span Solutions
//!
//! Textbook solutions for the load/support combinations the FE engine must
//! reproduce. They are verification oracles for the benchmark tests; the
//! solver itself never calls them.
//!
//! Magnitudes are returned as positive numbers (the engine reports maxima by
//! absolute value), except where a function documents a sign.
//!
//! ## Notation
//!
//! - `l` = Span length
//! - `a` = Load position from the left end
//! - `p` = Point load magnitude
//! - `w` = Uniform intensity (force per unit length)
//! - `ei` = Flexural rigidity E·I
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1
//! - AISC Steel Construction Manual, Table 3-23

// =============================================================================
// SIMPLY SUPPORTED
// =============================================================================

/// Support reactions (upward) for a point load on a simply supported span
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            ○
///   R0  ←───────L────→ RL
/// ```
///
/// R0 = P(L − a)/L, RL = P·a/L
#[inline]
pub fn simply_supported_point_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    (p * (l - a) / l, p * a / l)
}

/// Peak moment under a point load: M = P·a·(L − a)/L (PL/4 at midspan)
#[inline]
pub fn simply_supported_point_max_moment(p: f64, a: f64, l: f64) -> f64 {
    p * a * (l - a) / l
}

/// Midspan deflection for a midspan point load: δ = PL³/(48EI)
#[inline]
pub fn simply_supported_midspan_point_deflection(p: f64, l: f64, ei: f64) -> f64 {
    p * l.powi(3) / (48.0 * ei)
}

/// Peak moment under a full-span uniform load: M = wL²/8
#[inline]
pub fn simply_supported_uniform_max_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// Midspan deflection under a full-span uniform load: δ = 5wL⁴/(384EI)
#[inline]
pub fn simply_supported_uniform_max_deflection(w: f64, l: f64, ei: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * ei)
}

/// Support reactions (upward) for a full-span load rising linearly from 0 at
/// the left end to `w_max` at the right end: R0 = wL/6, RL = wL/3
#[inline]
pub fn simply_supported_ramp_reactions(w_max: f64, l: f64) -> (f64, f64) {
    (w_max * l / 6.0, w_max * l / 3.0)
}

// =============================================================================
// CANTILEVER (fixed at x = 0, free at x = L)
// =============================================================================

/// Root moment for a tip point load: M = P·L
#[inline]
pub fn cantilever_tip_point_root_moment(p: f64, l: f64) -> f64 {
    p * l
}

/// Tip deflection for a tip point load: δ = PL³/(3EI)
#[inline]
pub fn cantilever_tip_point_deflection(p: f64, l: f64, ei: f64) -> f64 {
    p * l.powi(3) / (3.0 * ei)
}

/// Root moment for a full-length uniform load: M = wL²/2
#[inline]
pub fn cantilever_uniform_root_moment(w: f64, l: f64) -> f64 {
    w * l * l / 2.0
}

/// Tip deflection for a full-length uniform load: δ = wL⁴/(8EI)
#[inline]
pub fn cantilever_uniform_tip_deflection(w: f64, l: f64, ei: f64) -> f64 {
    w * l.powi(4) / (8.0 * ei)
}

// =============================================================================
// FIXED-FIXED
// =============================================================================

/// End moment magnitude for a full-span uniform load: M = wL²/12
#[inline]
pub fn fixed_fixed_uniform_end_moment(w: f64, l: f64) -> f64 {
    w * l * l / 12.0
}

/// Midspan deflection for a full-span uniform load: δ = wL⁴/(384EI)
#[inline]
pub fn fixed_fixed_uniform_max_deflection(w: f64, l: f64, ei: f64) -> f64 {
    w * l.powi(4) / (384.0 * ei)
}

/// End moment magnitude for a midspan point load: M = PL/8
#[inline]
pub fn fixed_fixed_midspan_point_end_moment(p: f64, l: f64) -> f64 {
    p * l / 8.0
}
