//! # Cross-Sections
//!
//! The closed set of supported section shapes and the properties derived from
//! them. [`SectionProperties`] is never user-set: it is recomputed from the
//! [`Section`] whenever an analysis needs it.
//!
//! ## JSON Format
//!
//! ```json
//! { "type": "Rectangle", "width_m": 0.05, "height_m": 0.10 }
//! { "type": "HollowCircle", "outer_diameter_m": 0.1, "inner_diameter_m": 0.08 }
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section as formulas;
use crate::errors::{require_positive, CalcError, CalcResult};

/// Cross-section geometry (metres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Section {
    /// Solid rectangle
    Rectangle { width_m: f64, height_m: f64 },

    /// Solid circle
    Circle { diameter_m: f64 },

    /// Circular tube
    HollowCircle {
        outer_diameter_m: f64,
        inner_diameter_m: f64,
    },

    /// Doubly symmetric I-section. The web height is implied:
    /// height − 2·flange thickness.
    IBeam {
        height_m: f64,
        flange_width_m: f64,
        flange_thickness_m: f64,
        web_thickness_m: f64,
    },
}

impl Default for Section {
    fn default() -> Self {
        Section::Rectangle {
            width_m: 0.05,
            height_m: 0.10,
        }
    }
}

/// Derived geometric properties of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Second moment of area about the bending axis (m⁴)
    pub moment_of_inertia_m4: f64,
    /// Distance from the neutral axis to the extreme fiber (m)
    pub extreme_fiber_m: f64,
    /// Cross-sectional area (m²)
    pub area_m2: f64,
}

impl SectionProperties {
    /// Elastic section modulus S = I/c (m³)
    pub fn section_modulus_m3(&self) -> f64 {
        self.moment_of_inertia_m4 / self.extreme_fiber_m
    }
}

impl Section {
    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Section::Rectangle { .. } => "Rectangle",
            Section::Circle { .. } => "Circle",
            Section::HollowCircle { .. } => "Hollow circle",
            Section::IBeam { .. } => "I-beam",
        }
    }

    /// Compute I, c and A. Geometry is assumed valid (see [`Section::validate`]).
    ///
    /// # Example
    /// ```rust
    /// use beam_core::sections::Section;
    ///
    /// let props = Section::Circle { diameter_m: 0.1 }.properties();
    /// assert!((props.extreme_fiber_m - 0.05).abs() < 1e-15);
    /// ```
    pub fn properties(&self) -> SectionProperties {
        match *self {
            Section::Rectangle { width_m, height_m } => SectionProperties {
                moment_of_inertia_m4: formulas::rectangular_moment_of_inertia(width_m, height_m),
                extreme_fiber_m: height_m / 2.0,
                area_m2: formulas::rectangular_area(width_m, height_m),
            },
            Section::Circle { diameter_m } => SectionProperties {
                moment_of_inertia_m4: formulas::circular_moment_of_inertia(diameter_m),
                extreme_fiber_m: diameter_m / 2.0,
                area_m2: formulas::circular_area(diameter_m),
            },
            Section::HollowCircle {
                outer_diameter_m,
                inner_diameter_m,
            } => SectionProperties {
                moment_of_inertia_m4: formulas::hollow_circular_moment_of_inertia(
                    outer_diameter_m,
                    inner_diameter_m,
                ),
                extreme_fiber_m: outer_diameter_m / 2.0,
                area_m2: formulas::hollow_circular_area(outer_diameter_m, inner_diameter_m),
            },
            Section::IBeam {
                height_m,
                flange_width_m,
                flange_thickness_m,
                web_thickness_m,
            } => SectionProperties {
                moment_of_inertia_m4: formulas::i_beam_moment_of_inertia(
                    height_m,
                    flange_width_m,
                    flange_thickness_m,
                    web_thickness_m,
                ),
                extreme_fiber_m: height_m / 2.0,
                area_m2: formulas::i_beam_area(
                    height_m,
                    flange_width_m,
                    flange_thickness_m,
                    web_thickness_m,
                ),
            },
        }
    }

    /// Validate geometry. The solver does not call this; it is for the
    /// input layer in front of it.
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            Section::Rectangle { width_m, height_m } => {
                require_positive("width_m", width_m)?;
                require_positive("height_m", height_m)
            }
            Section::Circle { diameter_m } => require_positive("diameter_m", diameter_m),
            Section::HollowCircle {
                outer_diameter_m,
                inner_diameter_m,
            } => {
                require_positive("outer_diameter_m", outer_diameter_m)?;
                require_positive("inner_diameter_m", inner_diameter_m)?;
                if inner_diameter_m >= outer_diameter_m {
                    return Err(CalcError::invalid_input(
                        "inner_diameter_m",
                        inner_diameter_m.to_string(),
                        "Inner diameter must be smaller than outer diameter",
                    ));
                }
                Ok(())
            }
            Section::IBeam {
                height_m,
                flange_width_m,
                flange_thickness_m,
                web_thickness_m,
            } => {
                require_positive("height_m", height_m)?;
                require_positive("flange_width_m", flange_width_m)?;
                require_positive("flange_thickness_m", flange_thickness_m)?;
                require_positive("web_thickness_m", web_thickness_m)?;
                if 2.0 * flange_thickness_m >= height_m {
                    return Err(CalcError::invalid_input(
                        "flange_thickness_m",
                        flange_thickness_m.to_string(),
                        "Flanges leave no room for a web (2·tf must be less than height)",
                    ));
                }
                Ok(())
            }
        }
    }
}
