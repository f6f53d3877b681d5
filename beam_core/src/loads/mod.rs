//! # Loads and Load Cases
//!
//! Transverse loads on the span and the named cases that group them.
//!
//! - [`Load`] - point, uniform, or linearly varying load
//! - [`LoadCase`] - an identified, ordered list of loads
//! - [`LoadCombo`] - case id → scale factor, for superposition
//!
//! Positive magnitudes act downward. Positions are measured in metres from
//! the left end of the span.
//!
//! # Example
//!
//! ```
//! use beam_core::loads::{Load, LoadCase, LoadCombo};
//!
//! let dead = LoadCase::new("D", "Dead").with_load(Load::uniform(1000.0, 0.0, 5.0));
//! let live = LoadCase::new("L", "Live").with_load(Load::point(2000.0, 2.5));
//!
//! let combo = LoadCombo::new("C2", "1.2D + 1.6L")
//!     .with_factor("D", 1.2)
//!     .with_factor("L", 1.6);
//!
//! let factored = combo.scaled_loads(&[dead, live]);
//! assert_eq!(factored.len(), 2);
//! ```

pub mod combinations;

pub use combinations::{default_combinations, LoadCombo};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Load
// ============================================================================

/// A single transverse load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Load {
    /// Concentrated force (N)
    Point { magnitude_n: f64, position_m: f64 },

    /// Constant intensity (N/m) between two positions, in either order
    Uniform {
        intensity_n_per_m: f64,
        start_m: f64,
        end_m: f64,
    },

    /// Intensity varying linearly from `start_intensity_n_per_m` at the left
    /// end of the load to `end_intensity_n_per_m` at its right end. The
    /// positions may be given in either order; the left end is always
    /// min(start_m, end_m).
    Triangular {
        start_intensity_n_per_m: f64,
        end_intensity_n_per_m: f64,
        start_m: f64,
        end_m: f64,
    },
}

impl Load {
    /// Create a point load
    pub fn point(magnitude_n: f64, position_m: f64) -> Self {
        Load::Point {
            magnitude_n,
            position_m,
        }
    }

    /// Create a uniform distributed load
    pub fn uniform(intensity_n_per_m: f64, start_m: f64, end_m: f64) -> Self {
        Load::Uniform {
            intensity_n_per_m,
            start_m,
            end_m,
        }
    }

    /// Create a linearly varying distributed load
    pub fn triangular(
        start_intensity_n_per_m: f64,
        end_intensity_n_per_m: f64,
        start_m: f64,
        end_m: f64,
    ) -> Self {
        Load::Triangular {
            start_intensity_n_per_m,
            end_intensity_n_per_m,
            start_m,
            end_m,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point { .. } => "Point",
            Load::Uniform { .. } => "Uniform",
            Load::Triangular { .. } => "Triangular",
        }
    }

    /// Whether this load contributes to the distributed intensity q(x)
    pub fn is_distributed(&self) -> bool {
        !matches!(self, Load::Point { .. })
    }

    /// Same load with every magnitude multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Load {
        match *self {
            Load::Point {
                magnitude_n,
                position_m,
            } => Load::point(magnitude_n * factor, position_m),
            Load::Uniform {
                intensity_n_per_m,
                start_m,
                end_m,
            } => Load::uniform(intensity_n_per_m * factor, start_m, end_m),
            Load::Triangular {
                start_intensity_n_per_m,
                end_intensity_n_per_m,
                start_m,
                end_m,
            } => Load::triangular(
                start_intensity_n_per_m * factor,
                end_intensity_n_per_m * factor,
                start_m,
                end_m,
            ),
        }
    }

    /// Distributed intensity this load contributes at `x` (N/m).
    /// Point loads contribute nothing; ends are inclusive.
    pub fn intensity_at(&self, x: f64) -> f64 {
        match *self {
            Load::Point { .. } => 0.0,
            Load::Uniform {
                intensity_n_per_m,
                start_m,
                end_m,
            } => {
                if x >= start_m.min(end_m) && x <= start_m.max(end_m) {
                    intensity_n_per_m
                } else {
                    0.0
                }
            }
            Load::Triangular {
                start_intensity_n_per_m,
                end_intensity_n_per_m,
                start_m,
                end_m,
            } => {
                let (a, b) = (start_m.min(end_m), start_m.max(end_m));
                if x < a || x > b {
                    return 0.0;
                }
                let t = if b > a { (x - a) / (b - a) } else { 0.0 };
                start_intensity_n_per_m + (end_intensity_n_per_m - start_intensity_n_per_m) * t
            }
        }
    }

    /// Total vertical force (N), positive downward
    pub fn resultant(&self) -> f64 {
        match *self {
            Load::Point { magnitude_n, .. } => magnitude_n,
            Load::Uniform {
                intensity_n_per_m,
                start_m,
                end_m,
            } => intensity_n_per_m * (end_m - start_m).abs(),
            Load::Triangular {
                start_intensity_n_per_m,
                end_intensity_n_per_m,
                start_m,
                end_m,
            } => 0.5 * (start_intensity_n_per_m + end_intensity_n_per_m) * (end_m - start_m).abs(),
        }
    }

    /// First moment of the load about x = 0 (N·m), i.e. resultant × centroid
    pub fn moment_about_origin(&self) -> f64 {
        match *self {
            Load::Point {
                magnitude_n,
                position_m,
            } => magnitude_n * position_m,
            Load::Uniform {
                intensity_n_per_m,
                start_m,
                end_m,
            } => intensity_n_per_m * (end_m - start_m).abs() * 0.5 * (start_m + end_m),
            Load::Triangular {
                start_intensity_n_per_m,
                end_intensity_n_per_m,
                start_m,
                end_m,
            } => {
                let (a, b) = (start_m.min(end_m), start_m.max(end_m));
                let (qa, qb) = (start_intensity_n_per_m, end_intensity_n_per_m);
                (b - a) * (qa * (2.0 * a + b) + qb * (a + 2.0 * b)) / 6.0
            }
        }
    }

    /// Check magnitudes are finite and positions lie on [0, span]
    pub fn validate(&self, span_m: f64) -> CalcResult<()> {
        let check_position = |field: &str, x: f64| -> CalcResult<()> {
            if !x.is_finite() || x < 0.0 || x > span_m {
                return Err(CalcError::invalid_input(
                    field,
                    x.to_string(),
                    format!("Position must lie within the span [0, {}] m", span_m),
                ));
            }
            Ok(())
        };
        let check_magnitude = |field: &str, v: f64| -> CalcResult<()> {
            if !v.is_finite() {
                return Err(CalcError::invalid_input(field, v.to_string(), "Must be finite"));
            }
            Ok(())
        };

        match *self {
            Load::Point {
                magnitude_n,
                position_m,
            } => {
                check_magnitude("magnitude_n", magnitude_n)?;
                check_position("position_m", position_m)
            }
            Load::Uniform {
                intensity_n_per_m,
                start_m,
                end_m,
            } => {
                check_magnitude("intensity_n_per_m", intensity_n_per_m)?;
                check_position("start_m", start_m)?;
                check_position("end_m", end_m)
            }
            Load::Triangular {
                start_intensity_n_per_m,
                end_intensity_n_per_m,
                start_m,
                end_m,
            } => {
                check_magnitude("start_intensity_n_per_m", start_intensity_n_per_m)?;
                check_magnitude("end_intensity_n_per_m", end_intensity_n_per_m)?;
                check_position("start_m", start_m)?;
                check_position("end_m", end_m)
            }
        }
    }
}

/// Sum of the distributed intensities of all loads at `x` (overlaps add)
pub fn distributed_intensity_at(x: f64, loads: &[Load]) -> f64 {
    loads.iter().map(|load| load.intensity_at(x)).sum()
}

// ============================================================================
// Load Case
// ============================================================================

/// A named group of loads analyzed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Key used by combination factors (e.g. "D", "L")
    pub id: String,

    /// Display name (e.g. "Dead")
    pub name: String,

    /// Loads in application order
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl LoadCase {
    /// Create an empty load case
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        LoadCase {
            id: id.into(),
            name: name.into(),
            loads: Vec::new(),
        }
    }

    /// Add a load (builder pattern)
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Total applied vertical force (N)
    pub fn total_force(&self) -> f64 {
        self.loads.iter().map(Load::resultant).sum()
    }

    /// Total first moment of the applied loads about x = 0 (N·m)
    pub fn total_moment_about_origin(&self) -> f64 {
        self.loads.iter().map(Load::moment_about_origin).sum()
    }

    /// Validate the id and every load against the span
    pub fn validate(&self, span_m: f64) -> CalcResult<()> {
        if self.id.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "load_case.id",
                format!("{:?}", self.id),
                "Load case id must not be empty",
            ));
        }
        for load in &self.loads {
            load.validate(span_m)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
