//! # Load Combination by Superposition
//!
//! Combines single-case results with the factors of a [`LoadCombo`]. Because
//! the model is linear, the factored sum of case responses equals the
//! response to the factored loads.
//!
//! All case results must share one station grid: the same number of samples
//! and positions within 1e-9 m of the reference case. The reference case is
//! the first entry of the map (lowest case id), and its input and section
//! properties are echoed in the combined result. Stress is recomputed from the
//! combined moment rather than summed.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::beam_analysis::AnalysisResult;
use super::boundary::{ReactionKey, Reactions};
use super::sampling::{bending_stress, SamplePoint};
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadCombo;

/// Largest station offset tolerated between case grids (m)
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Superpose per-case results with the combination's factors.
///
/// Cases present in `case_results` but absent from the combination get
/// factor 0. Reactions are summed per key; a key appears in the output if
/// any case reports it.
pub fn combine(
    case_results: &BTreeMap<String, AnalysisResult>,
    combo: &LoadCombo,
) -> CalcResult<AnalysisResult> {
    let (_, base) = case_results
        .iter()
        .next()
        .ok_or_else(|| CalcError::empty_case_set(&combo.id))?;

    for (case_id, result) in case_results {
        check_grid(case_id, base, result)?;
    }

    for case_id in combo.case_ids() {
        if !case_results.contains_key(case_id) {
            warn!(
                "Combination '{}' references case '{}' with no result; it contributes nothing",
                combo.id, case_id
            );
        }
    }

    let factored: Vec<(f64, &AnalysisResult)> = case_results
        .iter()
        .map(|(case_id, result)| (combo.factor(case_id), result))
        .collect();

    let props = base.section_properties;
    let samples: Vec<SamplePoint> = base
        .samples
        .iter()
        .enumerate()
        .map(|(i, station)| {
            let (mut shear_n, mut moment_nm, mut deflection_m) = (0.0, 0.0, 0.0);
            for (f, result) in &factored {
                let s = &result.samples[i];
                shear_n += f * s.shear_n;
                moment_nm += f * s.moment_nm;
                deflection_m += f * s.deflection_m;
            }
            SamplePoint {
                x_m: station.x_m,
                shear_n,
                moment_nm,
                deflection_m,
                stress_pa: bending_stress(moment_nm, &props),
            }
        })
        .collect();

    let mut reactions = Reactions::new();
    for (f, result) in &factored {
        for (key, value) in &result.reactions {
            *reactions.entry(*key).or_insert(0.0) += f * value;
        }
    }

    debug!(
        "Combined {} cases into '{}' ({} stations, reactions {:?})",
        factored.len(),
        combo.id,
        samples.len(),
        reactions.keys().collect::<Vec<&ReactionKey>>()
    );

    Ok(AnalysisResult::from_samples(
        base.input.clone(),
        props,
        reactions,
        samples,
    ))
}

fn check_grid(case_id: &str, base: &AnalysisResult, other: &AnalysisResult) -> CalcResult<()> {
    if other.samples.len() != base.samples.len() {
        return Err(CalcError::incompatible_sampling(
            case_id,
            format!(
                "{} stations vs {} in the reference case; use the same span and element count",
                other.samples.len(),
                base.samples.len()
            ),
        ));
    }
    let mismatch = base
        .samples
        .iter()
        .zip(&other.samples)
        .find(|(a, b)| (a.x_m - b.x_m).abs() > GRID_TOLERANCE);
    if let Some((a, b)) = mismatch {
        return Err(CalcError::incompatible_sampling(
            case_id,
            format!(
                "station at x = {} m does not match reference x = {} m; use the same span and element count",
                b.x_m, a.x_m
            ),
        ));
    }
    Ok(())
}
