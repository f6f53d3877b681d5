//! End-to-end checks of the beam engine against closed-form solutions and
//! the structural properties every solution must satisfy.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use beam_core::calculations::{assemble, solve_constrained, Mesh};
use beam_core::equations::beam as closed_form;
use beam_core::{
    analyze, combine, AnalysisResult, BeamInput, BeamType, CalcError, Load, LoadCase, LoadCombo,
    Material, ReactionKey, Section,
};

fn beam(beam_type: BeamType, span_m: f64, n_elements: usize) -> BeamInput {
    BeamInput {
        span_m,
        beam_type,
        n_elements,
        ..BeamInput::default()
    }
}

fn cases_of(entries: Vec<(&str, AnalysisResult)>) -> BTreeMap<String, AnalysisResult> {
    entries
        .into_iter()
        .map(|(id, result)| (id.to_string(), result))
        .collect()
}

// =============================================================================
// Closed-form benchmarks
// =============================================================================

#[test]
fn simply_supported_midspan_point_load() {
    let (p, l) = (1000.0, 4.0);
    let input = beam(BeamType::SimplySupported, l, 20);
    let ei = input.flexural_rigidity();
    let result = analyze(&input, &[Load::point(p, l / 2.0)]).unwrap();

    assert_relative_eq!(
        result.maxima.moment.value,
        closed_form::simply_supported_point_max_moment(p, l / 2.0, l),
        max_relative = 1e-2
    );
    assert_relative_eq!(result.maxima.moment.x_m, l / 2.0, epsilon = 1e-9);
    assert_relative_eq!(
        result.maxima.deflection.value,
        closed_form::simply_supported_midspan_point_deflection(p, l, ei),
        max_relative = 1e-2
    );
}

#[test]
fn simply_supported_point_load_on_steel_i_beam() {
    let (p, l) = (25_000.0, 6.0);
    let input = BeamInput {
        section: Section::IBeam {
            height_m: 0.3,
            flange_width_m: 0.15,
            flange_thickness_m: 0.012,
            web_thickness_m: 0.008,
        },
        ..beam(BeamType::SimplySupported, l, 30)
    };
    let ei = input.flexural_rigidity();
    let result = analyze(&input, &[Load::point(p, 3.0)]).unwrap();

    assert_relative_eq!(result.maxima.moment.value, p * l / 4.0, max_relative = 1e-2);
    assert_relative_eq!(
        result.maxima.deflection.value,
        closed_form::simply_supported_midspan_point_deflection(p, l, ei),
        max_relative = 1e-2
    );
}

#[test]
fn simply_supported_uniform_load() {
    let (w, l) = (1000.0, 5.0);
    let input = beam(BeamType::SimplySupported, l, 20);
    let ei = input.flexural_rigidity();
    let result = analyze(&input, &[Load::uniform(w, 0.0, l)]).unwrap();

    assert_relative_eq!(
        result.maxima.moment.value,
        closed_form::simply_supported_uniform_max_moment(w, l),
        max_relative = 1e-2
    );
    assert_relative_eq!(
        result.maxima.deflection.value,
        closed_form::simply_supported_uniform_max_deflection(w, l, ei),
        max_relative = 1e-6
    );
    assert_relative_eq!(result.maxima.deflection.x_m, l / 2.0, epsilon = 1e-9);
}

#[test]
fn simply_supported_ramp_reactions() {
    let (w, l) = (600.0, 3.0);
    let input = beam(BeamType::SimplySupported, l, 12);
    let result = analyze(&input, &[Load::triangular(0.0, w, 0.0, l)]).unwrap();
    let (r0, rl) = closed_form::simply_supported_ramp_reactions(w, l);

    // Upward support forces are negative in the DOF convention
    assert_relative_eq!(result.reactions[&ReactionKey::R0], -r0, max_relative = 1e-9);
    assert_relative_eq!(result.reactions[&ReactionKey::RL], -rl, max_relative = 1e-9);
}

#[test]
fn ramp_entered_right_to_left_keeps_start_intensity_on_the_left() {
    let (w, l) = (600.0, 3.0);
    let input = beam(BeamType::SimplySupported, l, 12);
    let result = analyze(&input, &[Load::triangular(0.0, w, l, 0.0)]).unwrap();
    let (r0, rl) = closed_form::simply_supported_ramp_reactions(w, l);

    assert_relative_eq!(result.reactions[&ReactionKey::R0], -r0, max_relative = 1e-9);
    assert_relative_eq!(result.reactions[&ReactionKey::RL], -rl, max_relative = 1e-9);
    assert!(result.reactions[&ReactionKey::RL] < result.reactions[&ReactionKey::R0]);
}

#[test]
fn cantilever_tip_point_load() {
    let (p, l) = (500.0, 3.0);
    let input = beam(BeamType::Cantilever, l, 20);
    let ei = input.flexural_rigidity();
    let result = analyze(&input, &[Load::point(p, l)]).unwrap();

    assert_relative_eq!(
        result.maxima.moment.value,
        closed_form::cantilever_tip_point_root_moment(p, l),
        max_relative = 1e-2
    );
    assert_eq!(result.maxima.moment.x_m, 0.0);

    let tip = result.samples.last().unwrap();
    assert_eq!(tip.x_m, l);
    assert_relative_eq!(
        tip.deflection_m,
        closed_form::cantilever_tip_point_deflection(p, l, ei),
        max_relative = 1e-2
    );
    assert_relative_eq!(result.reactions[&ReactionKey::M0], -p * l, max_relative = 1e-9);
}

#[test]
fn cantilever_uniform_load() {
    let (w, l) = (200.0, 2.0);
    let input = beam(BeamType::Cantilever, l, 16);
    let ei = input.flexural_rigidity();
    let result = analyze(&input, &[Load::uniform(w, 0.0, l)]).unwrap();

    assert_relative_eq!(
        result.maxima.moment.value,
        closed_form::cantilever_uniform_root_moment(w, l),
        max_relative = 1e-2
    );
    assert_relative_eq!(
        result.maxima.deflection.value,
        closed_form::cantilever_uniform_tip_deflection(w, l, ei),
        max_relative = 1e-6
    );
}

#[test]
fn fixed_fixed_uniform_load() {
    let (w, l) = (1200.0, 6.0);
    let input = beam(BeamType::FixedFixed, l, 24);
    let ei = input.flexural_rigidity();
    let result = analyze(&input, &[Load::uniform(w, 0.0, l)]).unwrap();

    let end_moment = closed_form::fixed_fixed_uniform_end_moment(w, l);
    assert_relative_eq!(result.maxima.moment.value, end_moment, max_relative = 1e-2);
    assert_relative_eq!(result.reactions[&ReactionKey::M0].abs(), end_moment, max_relative = 1e-9);
    assert_relative_eq!(result.reactions[&ReactionKey::ML].abs(), end_moment, max_relative = 1e-9);
    assert_relative_eq!(
        result.maxima.deflection.value,
        closed_form::fixed_fixed_uniform_max_deflection(w, l, ei),
        max_relative = 1e-6
    );
}

// =============================================================================
// Equilibrium
// =============================================================================

fn assert_equilibrium(result: &AnalysisResult, loads: &[Load]) {
    let span = result.input.span_m;
    let applied_force: f64 = loads.iter().map(Load::resultant).sum();
    let applied_moment: f64 = loads.iter().map(Load::moment_about_origin).sum();
    let scale = applied_force.abs().max(1.0);

    let reaction_force = result.total_vertical_reaction();
    assert!(
        (reaction_force + applied_force).abs() < 1e-8 * scale,
        "{:?}: ΣR = {}, ΣP = {}",
        result.input.beam_type,
        reaction_force,
        applied_force
    );

    // Moments about x = 0: force reactions at their support, moment reactions as-is
    let reaction_moment: f64 = result
        .reactions
        .iter()
        .map(|(key, value)| match key {
            ReactionKey::R0 => 0.0,
            ReactionKey::RL => value * span,
            ReactionKey::M0 | ReactionKey::ML => *value,
        })
        .sum();
    assert!(
        (reaction_moment + applied_moment).abs() < 1e-8 * scale * span,
        "{:?}: ΣM_R = {}, ΣM_P = {}",
        result.input.beam_type,
        reaction_moment,
        applied_moment
    );
}

#[test]
fn reactions_balance_applied_loads_for_every_support() {
    // Partial loads start and end on nodes (Le = 0.5 m) so quadrature is exact
    let loads = [
        Load::uniform(800.0, 0.0, 5.0),
        Load::uniform(400.0, 1.0, 3.5),
        Load::triangular(0.0, 900.0, 0.0, 5.0),
        // Positions reversed: 300 N/m at x = 1.5 falling to 100 N/m at x = 4
        Load::triangular(300.0, 100.0, 4.0, 1.5),
        Load::point(2500.0, 1.7),
        Load::point(-600.0, 4.25),
        Load::point(1000.0, 2.5),
    ];
    for beam_type in BeamType::ALL {
        let result = analyze(&beam(beam_type, 5.0, 10), &loads).unwrap();
        assert_equilibrium(&result, &loads);
    }
}

#[test]
fn point_load_on_node_is_counted_once() {
    for x in [0.0, 1.0, 2.0, 4.0] {
        let result = analyze(&beam(BeamType::FixedFixed, 4.0, 4), &[Load::point(100.0, x)]).unwrap();
        assert_relative_eq!(result.total_vertical_reaction(), -100.0, max_relative = 1e-9);
    }
}

// =============================================================================
// Superposition
// =============================================================================

#[test]
fn single_case_combination_is_identity() {
    let input = beam(BeamType::Cantilever, 3.0, 15);
    let loads = [Load::uniform(250.0, 0.0, 3.0), Load::point(400.0, 2.2)];
    let single = analyze(&input, &loads).unwrap();

    let combo = LoadCombo::new("A", "1.0A").with_factor("A", 1.0);
    let combined = combine(&cases_of(vec![("A", single.clone())]), &combo).unwrap();
    assert_eq!(combined, single);
}

#[test]
fn combination_is_linear_in_case_results() {
    let input = beam(BeamType::SimplySupported, 5.0, 20);
    let dead = LoadCase::new("D", "Dead").with_load(Load::uniform(1000.0, 0.0, 5.0));
    let live = LoadCase::new("L", "Live")
        .with_load(Load::point(2000.0, 2.5))
        .with_load(Load::triangular(0.0, 500.0, 1.0, 4.0));
    let (a, b) = (1.2, 1.6);
    let combo = LoadCombo::new("C2", "1.2D + 1.6L")
        .with_factor("D", a)
        .with_factor("L", b);

    let result_d = analyze(&input, &dead.loads).unwrap();
    let result_l = analyze(&input, &live.loads).unwrap();
    let combined = combine(
        &cases_of(vec![("D", result_d.clone()), ("L", result_l.clone())]),
        &combo,
    )
    .unwrap();

    let m_scale = combined.maxima.moment.value;
    for ((c, d), l) in combined.samples.iter().zip(&result_d.samples).zip(&result_l.samples) {
        assert!((c.moment_nm - (a * d.moment_nm + b * l.moment_nm)).abs() < 1e-9 * m_scale);
        assert!((c.shear_n - (a * d.shear_n + b * l.shear_n)).abs() < 1e-9 * m_scale);
    }

    // Analyzing the factored loads directly gives the same response
    let direct = analyze(&input, &combo.scaled_loads(&[dead, live])).unwrap();
    for (c, d) in combined.samples.iter().zip(&direct.samples) {
        assert!((c.moment_nm - d.moment_nm).abs() < 1e-6 * m_scale);
        assert!((c.deflection_m - d.deflection_m).abs() < 1e-6 * combined.maxima.deflection.value);
    }
    assert_relative_eq!(
        combined.safety.factor_of_safety,
        direct.safety.factor_of_safety,
        max_relative = 1e-6
    );
}

#[test]
fn mismatched_grids_are_rejected() {
    let short = analyze(&beam(BeamType::SimplySupported, 4.0, 10), &[]).unwrap();
    let long = analyze(&beam(BeamType::SimplySupported, 5.0, 10), &[]).unwrap();
    let fine = analyze(&beam(BeamType::SimplySupported, 4.0, 20), &[]).unwrap();
    let combo = LoadCombo::new("C", "A + B")
        .with_factor("A", 1.0)
        .with_factor("B", 1.0);

    for other in [long, fine] {
        let err = combine(&cases_of(vec![("A", short.clone()), ("B", other)]), &combo).unwrap_err();
        assert!(
            matches!(err, CalcError::IncompatibleSampling { ref case_id, .. } if case_id == "B"),
            "unexpected error {:?}",
            err
        );
    }
}

#[test]
fn empty_case_set_is_rejected() {
    let combo = LoadCombo::new("C1", "nothing");
    assert!(matches!(
        combine(&BTreeMap::new(), &combo),
        Err(CalcError::EmptyCaseSet { .. })
    ));
}

// =============================================================================
// Singular systems
// =============================================================================

#[test]
fn unsupported_span_is_singular_not_nan() {
    for (span, n, ei) in [(4.0, 4, 1.0), (2.0, 2, BeamInput::default().flexural_rigidity())] {
        let mesh = Mesh::uniform(span, n);
        let system = assemble(mesh, ei, &[Load::point(1000.0, span / 2.0)]);
        match solve_constrained(&system, &[]) {
            Err(CalcError::SingularSystem { pivot_magnitude, .. }) => {
                assert!(pivot_magnitude.is_finite());
            }
            other => panic!("expected SingularSystem, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn zero_stiffness_beam_is_singular() {
    let input = BeamInput {
        material: Material::new("Void", 0.0, 250e6),
        ..beam(BeamType::FixedFixed, 3.0, 6)
    };
    let err = analyze(&input, &[Load::uniform(100.0, 0.0, 3.0)]).unwrap_err();
    assert!(err.is_analysis_failure());
    assert_eq!(err.error_code(), "SINGULAR_SYSTEM");
}

// =============================================================================
// Sections
// =============================================================================

#[test]
fn thin_walled_limit_approaches_solid_circle() {
    let d = 0.08;
    let loads = [Load::uniform(500.0, 0.0, 3.0)];
    let solid = analyze(
        &BeamInput {
            section: Section::Circle { diameter_m: d },
            ..beam(BeamType::SimplySupported, 3.0, 12)
        },
        &loads,
    )
    .unwrap();

    let mut previous_gap = f64::INFINITY;
    for inner in [0.04, 0.02, 0.005, 1e-4] {
        let tube = analyze(
            &BeamInput {
                section: Section::HollowCircle {
                    outer_diameter_m: d,
                    inner_diameter_m: inner,
                },
                ..beam(BeamType::SimplySupported, 3.0, 12)
            },
            &loads,
        )
        .unwrap();
        let gap = tube.maxima.deflection.value - solid.maxima.deflection.value;
        assert!(gap >= 0.0 && gap < previous_gap);
        previous_gap = gap;
    }
    assert!(previous_gap / solid.maxima.deflection.value < 1e-9);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn independent_analyses_run_in_parallel() {
    let spans = [2.0, 3.0, 4.0, 5.0];
    let results: Vec<AnalysisResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = spans
            .iter()
            .map(|&l| {
                scope.spawn(move || {
                    analyze(&beam(BeamType::SimplySupported, l, 10), &[Load::point(100.0, l / 2.0)])
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });
    for (result, l) in results.iter().zip(spans) {
        assert_relative_eq!(result.maxima.moment.value, 100.0 * l / 4.0, max_relative = 1e-6);
    }
}
