//! # Project Data Structures
//!
//! A `Project` bundles one beam with its load cases and combinations, and is
//! what the CLI reads and writes as JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── schema_version
//! ├── label
//! ├── beam: BeamInput
//! ├── load_cases: Vec<LoadCase>
//! └── combinations: Vec<LoadCombo>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::project::Project;
//!
//! let project = Project::default();
//! let report = project.run().unwrap();
//!
//! assert_eq!(report.case_results.len(), 2);
//! assert_eq!(report.governing_combination.as_deref(), Some("C2"));
//! ```

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::calculations::{analyze, combine, AnalysisResult, BeamInput};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{default_combinations, Load, LoadCase, LoadCombo};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Schema version the file was written with
    pub schema_version: String,

    /// User label (e.g. "B-1 roof beam")
    #[serde(default)]
    pub label: String,

    /// The span being analyzed
    pub beam: BeamInput,

    /// Load cases, in declaration order
    #[serde(default)]
    pub load_cases: Vec<LoadCase>,

    /// Load combinations, in declaration order
    #[serde(default)]
    pub combinations: Vec<LoadCombo>,
}

impl Default for Project {
    /// 5 m simply supported steel beam with a dead UDL, a live midspan point
    /// load, and the two default combinations
    fn default() -> Self {
        Project {
            schema_version: SCHEMA_VERSION.to_string(),
            label: "Reference beam".to_string(),
            beam: BeamInput::default(),
            load_cases: vec![
                LoadCase::new("D", "Dead").with_load(Load::uniform(1000.0, 0.0, 5.0)),
                LoadCase::new("L", "Live").with_load(Load::point(2000.0, 2.5)),
            ],
            combinations: default_combinations(),
        }
    }
}

impl Project {
    /// Create an empty project around a beam
    pub fn new(label: impl Into<String>, beam: BeamInput) -> Self {
        Project {
            schema_version: SCHEMA_VERSION.to_string(),
            label: label.into(),
            beam,
            load_cases: Vec::new(),
            combinations: Vec::new(),
        }
    }

    /// Add a load case (builder pattern)
    pub fn with_case(mut self, case: LoadCase) -> Self {
        self.load_cases.push(case);
        self
    }

    /// Add a combination (builder pattern)
    pub fn with_combination(mut self, combo: LoadCombo) -> Self {
        self.combinations.push(combo);
        self
    }

    /// Look up a load case by id
    pub fn case(&self, id: &str) -> Option<&LoadCase> {
        self.load_cases.iter().find(|c| c.id == id)
    }

    /// Validate the beam, every case, and every combination
    pub fn validate(&self) -> CalcResult<()> {
        self.beam.validate()?;
        for (i, case) in self.load_cases.iter().enumerate() {
            case.validate(self.beam.span_m)?;
            if self.load_cases[..i].iter().any(|earlier| earlier.id == case.id) {
                return Err(CalcError::invalid_input(
                    "load_case.id",
                    case.id.clone(),
                    "Load case ids must be unique",
                ));
            }
        }
        for combo in &self.combinations {
            combo.validate(&self.load_cases)?;
        }
        Ok(())
    }

    /// Analyze every load case, then combine every combination.
    ///
    /// Each combination is superposed from the cases it names. A combination
    /// naming a case the project does not define fails with
    /// [`CalcError::UnknownLoadCase`].
    pub fn run(&self) -> CalcResult<ProjectReport> {
        info!(
            "Running project '{}': {} load cases, {} combinations",
            self.label,
            self.load_cases.len(),
            self.combinations.len()
        );

        let mut case_results = BTreeMap::new();
        for case in &self.load_cases {
            debug!("Analyzing load case '{}' ({} loads)", case.id, case.loads.len());
            case_results.insert(case.id.clone(), analyze(&self.beam, &case.loads)?);
        }

        let mut combo_results = Vec::with_capacity(self.combinations.len());
        for combo in &self.combinations {
            let mut members = BTreeMap::new();
            for case_id in combo.case_ids() {
                let result = case_results
                    .get(case_id)
                    .ok_or_else(|| CalcError::unknown_load_case(&combo.id, case_id))?;
                members.insert(case_id.to_string(), result.clone());
            }
            let result = combine(&members, combo)?;
            combo_results.push(ComboResult {
                id: combo.id.clone(),
                name: combo.name.clone(),
                result,
            });
        }

        let governing_combination = governing(&combo_results).map(|c| c.id.clone());
        if let Some(id) = &governing_combination {
            info!("Governing combination: {}", id);
        }

        Ok(ProjectReport {
            label: self.label.clone(),
            case_results,
            combo_results,
            governing_combination,
        })
    }

    /// Parse a project from JSON
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One combined result with its combination's identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboResult {
    pub id: String,
    pub name: String,
    pub result: AnalysisResult,
}

/// Everything a project run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub label: String,

    /// Per-case results keyed by case id
    pub case_results: BTreeMap<String, AnalysisResult>,

    /// Per-combination results in declaration order
    pub combo_results: Vec<ComboResult>,

    /// Combination with the lowest factor of safety; first declared on ties.
    /// `None` when the project has no combinations.
    pub governing_combination: Option<String>,
}

impl ProjectReport {
    /// Result of the governing combination
    pub fn governing(&self) -> Option<&ComboResult> {
        let id = self.governing_combination.as_deref()?;
        self.combo_results.iter().find(|c| c.id == id)
    }

    /// True when every combination meets its target factor of safety
    pub fn all_pass(&self) -> bool {
        self.combo_results.iter().all(|c| c.result.passes())
    }
}

fn governing(results: &[ComboResult]) -> Option<&ComboResult> {
    results.iter().fold(None, |best: Option<&ComboResult>, candidate| match best {
        Some(b) if b.result.safety.factor_of_safety <= candidate.result.safety.factor_of_safety => Some(b),
        _ => Some(candidate),
    })
}
