//! # Response Sampling
//!
//! Recovers shear, moment, deflection and bending stress on a uniform
//! station grid that is finer than the mesh, then reduces the samples to
//! maxima and a factor-of-safety verdict.
//!
//! The grid has ns + 1 stations at x = L·i/ns with ns = max(60, 6·nElem).
//! At each station:
//!
//! ```text
//! w = N·uₑ    M = EI·(B₂·uₑ)    V = EI·(B₃·uₑ)    σ = |M|·c / max(I, 1e-18)
//! ```

use serde::{Deserialize, Serialize};

use super::assembly::Mesh;
use super::boundary::NodalDisplacements;
use crate::equations::shape_functions::interpolate;
use crate::equations::{hermite_second_derivatives, hermite_third_derivatives, hermite_values};
use crate::sections::SectionProperties;

/// Fewest sampling intervals on any grid
pub const MIN_SAMPLE_INTERVALS: usize = 60;

/// Sampling intervals per element
pub const SAMPLES_PER_ELEMENT: usize = 6;

/// Floor on I when forming stress
const MIN_MOMENT_OF_INERTIA: f64 = 1e-18;

/// Floor on peak stress when forming the factor of safety
const MIN_PEAK_STRESS: f64 = 1e-12;

/// Number of stations for a mesh of `n_elements`
pub fn station_count(n_elements: usize) -> usize {
    MIN_SAMPLE_INTERVALS.max(SAMPLES_PER_ELEMENT * n_elements) + 1
}

/// Response at one station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Station position (m)
    pub x_m: f64,
    /// Shear V = EI·w‴ (N)
    pub shear_n: f64,
    /// Bending moment M = EI·w″ (N·m)
    pub moment_nm: f64,
    /// Transverse deflection, positive downward (m)
    pub deflection_m: f64,
    /// Extreme-fiber bending stress (Pa), never negative
    pub stress_pa: f64,
}

/// Bending stress at the extreme fiber for a moment
#[inline]
pub fn bending_stress(moment_nm: f64, props: &SectionProperties) -> f64 {
    moment_nm.abs() * props.extreme_fiber_m / props.moment_of_inertia_m4.max(MIN_MOMENT_OF_INERTIA)
}

/// Lazy, restartable station iterator over one solved case
#[derive(Debug, Clone, Copy)]
pub struct ResponseSampler<'a> {
    mesh: &'a Mesh,
    displacements: &'a NodalDisplacements,
    flexural_rigidity: f64,
    props: &'a SectionProperties,
}

impl<'a> ResponseSampler<'a> {
    pub fn new(
        mesh: &'a Mesh,
        displacements: &'a NodalDisplacements,
        flexural_rigidity: f64,
        props: &'a SectionProperties,
    ) -> Self {
        ResponseSampler {
            mesh,
            displacements,
            flexural_rigidity,
            props,
        }
    }

    /// Number of stations the iterator yields
    pub fn len(&self) -> usize {
        station_count(self.mesh.n_elements())
    }

    /// Always false; a grid has at least 61 stations
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Response at an arbitrary position on the span
    pub fn sample_at(&self, x_m: f64) -> SamplePoint {
        let (e, s) = self.mesh.locate(x_m);
        let (_, le) = self.mesh.element_bounds(e);
        let ue = self.displacements.element_dofs(e);

        let deflection_m = interpolate(&hermite_values(s, le), &ue);
        let curvature = interpolate(&hermite_second_derivatives(s, le), &ue);
        let third = interpolate(&hermite_third_derivatives(le), &ue);

        let moment_nm = self.flexural_rigidity * curvature;
        SamplePoint {
            x_m,
            shear_n: self.flexural_rigidity * third,
            moment_nm,
            deflection_m,
            stress_pa: bending_stress(moment_nm, self.props),
        }
    }

    /// Iterate the station grid from x = 0 to x = L. Each call starts over.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = SamplePoint> + '_ {
        let intervals = self.len() - 1;
        let span = self.mesh.span_m();
        (0..self.len()).map(move |i| self.sample_at(span * i as f64 / intervals as f64))
    }
}

// ============================================================================
// Maxima and Safety
// ============================================================================

/// Largest absolute value of a quantity and where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// |value| at the governing station
    pub value: f64,
    /// Station position (m)
    pub x_m: f64,
}

impl Default for Extremum {
    fn default() -> Self {
        Extremum {
            value: f64::NEG_INFINITY,
            x_m: 0.0,
        }
    }
}

impl Extremum {
    /// Keep the first station that strictly beats the current maximum
    fn offer(&mut self, value: f64, x_m: f64) {
        let magnitude = value.abs();
        if magnitude > self.value {
            self.value = magnitude;
            self.x_m = x_m;
        }
    }
}

/// Peak absolute response over the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Maxima {
    pub shear: Extremum,
    pub moment: Extremum,
    pub stress: Extremum,
    pub deflection: Extremum,
}

/// Scan samples in ascending x; ties keep the earliest station
pub fn compute_maxima(samples: &[SamplePoint]) -> Maxima {
    let mut max = Maxima::default();
    for s in samples {
        max.shear.offer(s.shear_n, s.x_m);
        max.moment.offer(s.moment_nm, s.x_m);
        max.stress.offer(s.stress_pa, s.x_m);
        max.deflection.offer(s.deflection_m, s.x_m);
    }
    max
}

/// Factor-of-safety verdict against yield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheck {
    /// yield / σmax
    pub factor_of_safety: f64,
    /// Required factor of safety
    pub target: f64,
    /// factor_of_safety ≥ target
    pub ok: bool,
}

/// FOS = yield / max(σmax, 1e-12); an unstressed beam gets a very large FOS
pub fn safety_check(yield_strength_pa: f64, max_stress_pa: f64, target: f64) -> SafetyCheck {
    let factor_of_safety = yield_strength_pa / max_stress_pa.abs().max(MIN_PEAK_STRESS);
    SafetyCheck {
        factor_of_safety,
        target,
        ok: factor_of_safety >= target,
    }
}
