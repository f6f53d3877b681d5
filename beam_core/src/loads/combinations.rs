//! Load Combinations
//!
//! A combination maps load case ids to scale factors. Cases the combination
//! does not mention contribute with factor 0, and a factor of 0 is allowed.
//! Combinations are applied either to analysis results (see
//! [`crate::calculations::combine`]) or directly to the loads
//! ([`LoadCombo::scaled_loads`]); for a linear model both give the same
//! response.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Load, LoadCase};
use crate::errors::{CalcError, CalcResult};

/// Factors below this magnitude are treated as zero when building loads
pub const NEGLIGIBLE_FACTOR: f64 = 1e-12;

/// A named set of load case factors
///
/// # Example
/// ```
/// use beam_core::loads::LoadCombo;
///
/// let combo = LoadCombo::new("C1", "1.0D + 1.0L")
///     .with_factor("D", 1.0)
///     .with_factor("L", 1.0);
///
/// assert_eq!(combo.factor("D"), 1.0);
/// assert_eq!(combo.factor("W"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombo {
    /// Combination identifier (e.g. "C1")
    pub id: String,

    /// Human-readable name, usually the equation (e.g. "1.2D + 1.6L")
    pub name: String,

    /// Scale factors keyed by load case id
    #[serde(default)]
    pub factors: HashMap<String, f64>,
}

impl LoadCombo {
    /// Create a combination with no factors
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        LoadCombo {
            id: id.into(),
            name: name.into(),
            factors: HashMap::new(),
        }
    }

    /// Add a case factor (builder pattern)
    pub fn with_factor(mut self, case_id: impl Into<String>, factor: f64) -> Self {
        self.factors.insert(case_id.into(), factor);
        self
    }

    /// Factor for a case id; 0 if the combination does not mention it
    pub fn factor(&self, case_id: &str) -> f64 {
        self.factors.get(case_id).copied().unwrap_or(0.0)
    }

    /// Case ids this combination mentions, sorted for stable output
    pub fn case_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Factored load list: every load of every case scaled by that case's
    /// factor, in case order. Cases with a negligible factor are skipped.
    pub fn scaled_loads(&self, cases: &[LoadCase]) -> Vec<Load> {
        cases
            .iter()
            .filter_map(|case| {
                let f = self.factor(&case.id);
                (f.abs() >= NEGLIGIBLE_FACTOR).then_some((case, f))
            })
            .flat_map(|(case, f)| case.loads.iter().map(move |load| load.scaled(f)))
            .collect()
    }

    /// Check that every factor is finite and refers to a known case
    pub fn validate(&self, cases: &[LoadCase]) -> CalcResult<()> {
        for case_id in self.case_ids() {
            let factor = self.factor(case_id);
            if !factor.is_finite() {
                return Err(CalcError::invalid_input(
                    format!("{}.factors.{}", self.id, case_id),
                    factor.to_string(),
                    "Factor must be finite",
                ));
            }
            if !cases.iter().any(|case| case.id == case_id) {
                return Err(CalcError::unknown_load_case(&self.id, case_id));
            }
        }
        Ok(())
    }
}

/// Service and strength combinations over a dead case "D" and live case "L"
pub fn default_combinations() -> Vec<LoadCombo> {
    vec![
        LoadCombo::new("C1", "1.0D + 1.0L")
            .with_factor("D", 1.0)
            .with_factor("L", 1.0),
        LoadCombo::new("C2", "1.2D + 1.6L")
            .with_factor("D", 1.2)
            .with_factor("L", 1.6),
    ]
}
