//! # Single-Case Beam Analysis
//!
//! Runs the full pipeline for one set of loads: section properties, assembly,
//! support elimination and solve, then sampling and the safety check.
//!
//! ## Sign Convention
//! - Loads and deflection: positive downward
//! - Reactions: K·u − F at the supports, so an upward support force is negative
//! - Moment and shear: EI·w″ and EI·w‴ in the DOF convention; maxima are
//!   reported by absolute value
//!
//! ## Example
//! ```rust
//! use beam_core::calculations::{analyze, BeamInput, BeamType, ReactionKey};
//! use beam_core::loads::Load;
//!
//! let input = BeamInput {
//!     span_m: 4.0,
//!     beam_type: BeamType::SimplySupported,
//!     n_elements: 20,
//!     ..BeamInput::default()
//! };
//!
//! let result = analyze(&input, &[Load::point(1000.0, 2.0)]).unwrap();
//!
//! assert!((result.maxima.moment.value - 1000.0).abs() < 1.0);
//! assert!((result.reactions[&ReactionKey::R0] + 500.0).abs() < 1e-6);
//! println!("FOS = {:.2}", result.safety.factor_of_safety);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::assembly::{assemble, Mesh};
use super::boundary::{reactions_for, solve_constrained, BeamType, ReactionKey, Reactions};
use super::sampling::{compute_maxima, safety_check, Maxima, ResponseSampler, SafetyCheck, SamplePoint};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::loads::Load;
use crate::materials::Material;
use crate::sections::{Section, SectionProperties};

/// Input parameters for one span (SI units)
///
/// ## JSON Example
///
/// ```json
/// {
///   "span_m": 5.0,
///   "beam_type": { "type": "SimplySupported" },
///   "section": { "type": "Rectangle", "width_m": 0.05, "height_m": 0.1 },
///   "material": { "name": "Structural Steel", "elastic_modulus_pa": 200e9, "yield_strength_pa": 250e6 },
///   "fos_target": 2.0,
///   "n_elements": 100
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// Span length L (m)
    pub span_m: f64,

    /// Support configuration
    pub beam_type: BeamType,

    /// Cross-section geometry
    pub section: Section,

    /// Material
    pub material: Material,

    /// Required factor of safety against yield
    pub fos_target: f64,

    /// Number of finite elements (raised to 2 if smaller)
    pub n_elements: usize,
}

impl Default for BeamInput {
    fn default() -> Self {
        BeamInput {
            span_m: 5.0,
            beam_type: BeamType::SimplySupported,
            section: Section::default(),
            material: Material::default(),
            fos_target: 2.0,
            n_elements: 100,
        }
    }
}

impl BeamInput {
    /// Validate input parameters. [`analyze`] does not call this.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("span_m", self.span_m)?;
        require_positive("fos_target", self.fos_target)?;
        if self.n_elements < 2 {
            return Err(CalcError::invalid_input(
                "n_elements",
                self.n_elements.to_string(),
                "At least 2 elements are required",
            ));
        }
        self.section.validate()?;
        self.material.validate()
    }

    /// Flexural rigidity E·I of the span
    pub fn flexural_rigidity(&self) -> f64 {
        self.material
            .flexural_rigidity(self.section.properties().moment_of_inertia_m4)
    }
}

/// Response of one load case or combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Echo of the input
    pub input: BeamInput,

    /// Section properties used for stress
    pub section_properties: SectionProperties,

    /// Support reactions (keys depend on the beam type)
    pub reactions: Reactions,

    /// Responses on the station grid, ascending x
    pub samples: Vec<SamplePoint>,

    /// Peak absolute responses
    pub maxima: Maxima,

    /// Factor-of-safety verdict
    pub safety: SafetyCheck,
}

impl AnalysisResult {
    /// Assemble a result from samples, deriving maxima and the safety check
    pub fn from_samples(
        input: BeamInput,
        section_properties: SectionProperties,
        reactions: Reactions,
        samples: Vec<SamplePoint>,
    ) -> Self {
        let maxima = compute_maxima(&samples);
        let safety = safety_check(
            input.material.yield_strength_pa,
            maxima.stress.value,
            input.fos_target,
        );
        AnalysisResult {
            input,
            section_properties,
            reactions,
            samples,
            maxima,
            safety,
        }
    }

    /// Check if the factor of safety meets the target
    pub fn passes(&self) -> bool {
        self.safety.ok
    }

    /// A single reaction, if this beam type has it
    pub fn reaction(&self, key: ReactionKey) -> Option<f64> {
        self.reactions.get(&key).copied()
    }

    /// Sum of the vertical force reactions
    pub fn total_vertical_reaction(&self) -> f64 {
        self.reactions
            .iter()
            .filter(|(key, _)| key.is_force())
            .map(|(_, value)| value)
            .sum()
    }
}

/// Analyze one span under one set of loads.
///
/// Inputs are taken as given (see [`BeamInput::validate`]). Point loads
/// outside the span are clamped onto it. The only failure is
/// [`CalcError::SingularSystem`], e.g. when E or I is zero.
pub fn analyze(input: &BeamInput, loads: &[Load]) -> CalcResult<AnalysisResult> {
    let props = input.section.properties();
    let ei = input.material.flexural_rigidity(props.moment_of_inertia_m4);
    let mesh = Mesh::uniform(input.span_m, input.n_elements);

    debug!(
        "Analyzing {} span L = {} m, EI = {:e}, {} elements",
        input.beam_type.display_name(),
        input.span_m,
        ei,
        mesh.n_elements()
    );

    let system = assemble(mesh, ei, loads);
    let fixed = input.beam_type.constrained_dofs(mesh.n_nodes());
    let solution = solve_constrained(&system, &fixed)?;
    let reactions = reactions_for(input.beam_type, mesh.n_nodes(), &solution.residual);

    let sampler = ResponseSampler::new(&mesh, &solution.displacements, ei, &props);
    let samples: Vec<SamplePoint> = sampler.iter().collect();
    debug!("Sampled {} stations", samples.len());

    Ok(AnalysisResult::from_samples(
        input.clone(),
        props,
        reactions,
        samples,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_beam(beam_type: BeamType, span_m: f64, n_elements: usize) -> BeamInput {
        BeamInput {
            span_m,
            beam_type,
            n_elements,
            ..BeamInput::default()
        }
    }

    #[test]
    fn test_default_input_is_valid() {
        assert!(BeamInput::default().validate().is_ok());
        let bad = BeamInput {
            n_elements: 1,
            ..BeamInput::default()
        };
        assert_eq!(bad.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_simply_supported_midspan_point() {
        let input = unit_beam(BeamType::SimplySupported, 4.0, 20);
        let result = analyze(&input, &[Load::point(1000.0, 2.0)]).unwrap();

        assert_relative_eq!(result.maxima.moment.value, 1000.0, max_relative = 1e-6);
        assert_relative_eq!(result.maxima.moment.x_m, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.maxima.deflection.value, 0.0016, max_relative = 1e-6);
        assert_relative_eq!(result.reaction(ReactionKey::R0).unwrap(), -500.0, max_relative = 1e-9);
        assert_relative_eq!(result.reaction(ReactionKey::RL).unwrap(), -500.0, max_relative = 1e-9);
        assert_eq!(result.reaction(ReactionKey::M0), None);
        assert_eq!(result.samples.len(), 121);
    }

    #[test]
    fn test_cantilever_tip_point() {
        let input = unit_beam(BeamType::Cantilever, 3.0, 20);
        let result = analyze(&input, &[Load::point(500.0, 3.0)]).unwrap();

        assert_relative_eq!(result.maxima.moment.value, 1500.0, max_relative = 1e-6);
        assert_eq!(result.maxima.moment.x_m, 0.0);
        assert_eq!(result.maxima.deflection.x_m, 3.0);
        assert_relative_eq!(result.maxima.deflection.value, 0.0054, max_relative = 1e-6);
        assert_relative_eq!(result.reaction(ReactionKey::R0).unwrap(), -500.0, max_relative = 1e-9);
        assert_relative_eq!(result.reaction(ReactionKey::M0).unwrap(), -1500.0, max_relative = 1e-9);
    }

    #[test]
    fn test_stress_and_safety_follow_moment() {
        let input = unit_beam(BeamType::SimplySupported, 4.0, 20);
        let result = analyze(&input, &[Load::point(1000.0, 2.0)]).unwrap();
        let s = result.section_properties.section_modulus_m3();
        assert_relative_eq!(result.maxima.stress.value, result.maxima.moment.value / s, max_relative = 1e-9);
        assert_relative_eq!(
            result.safety.factor_of_safety,
            250e6 / result.maxima.stress.value,
            max_relative = 1e-12
        );
        assert_eq!(result.passes(), result.safety.factor_of_safety >= 2.0);
    }

    #[test]
    fn test_unloaded_beam_has_no_response() {
        let result = analyze(&BeamInput::default(), &[]).unwrap();
        assert!(result.samples.iter().all(|s| s.moment_nm == 0.0 && s.deflection_m == 0.0));
        assert_eq!(result.maxima.stress.value, 0.0);
        assert!(result.passes());
    }

    #[test]
    fn test_zero_modulus_is_singular() {
        let input = BeamInput {
            material: Material::new("Void", 0.0, 1.0),
            ..BeamInput::default()
        };
        let err = analyze(&input, &[Load::point(1.0, 2.5)]).unwrap_err();
        assert!(matches!(err, CalcError::SingularSystem { .. }));
    }

    #[test]
    fn test_element_count_below_two_is_clamped() {
        let input = unit_beam(BeamType::FixedFixed, 2.0, 0);
        let result = analyze(&input, &[Load::uniform(100.0, 0.0, 2.0)]).unwrap();
        assert_eq!(result.samples.len(), 61);
        assert_eq!(result.reactions.len(), 4);
        assert_relative_eq!(result.total_vertical_reaction(), -200.0, max_relative = 1e-9);
    }
}
