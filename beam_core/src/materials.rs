//! # Materials
//!
//! Linear-elastic material with a yield strength for the factor-of-safety
//! check. Material catalogs live with the caller; this module only carries
//! the values an analysis run needs.
//!
//! ## JSON Format
//!
//! ```json
//! { "name": "Structural Steel", "elastic_modulus_pa": 200e9, "yield_strength_pa": 250e6 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

/// Isotropic linear-elastic material (SI units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name
    pub name: String,
    /// Young's modulus E (Pa)
    pub elastic_modulus_pa: f64,
    /// Yield strength (Pa)
    pub yield_strength_pa: f64,
}

impl Material {
    /// Create a material
    pub fn new(name: impl Into<String>, elastic_modulus_pa: f64, yield_strength_pa: f64) -> Self {
        Material {
            name: name.into(),
            elastic_modulus_pa,
            yield_strength_pa,
        }
    }

    /// Structural steel: E = 200 GPa, yield = 250 MPa
    pub fn structural_steel() -> Self {
        Material::new("Structural Steel", 200e9, 250e6)
    }

    /// Flexural rigidity EI for a given second moment of area
    #[inline]
    pub fn flexural_rigidity(&self, moment_of_inertia_m4: f64) -> f64 {
        self.elastic_modulus_pa * moment_of_inertia_m4
    }

    /// Validate that E and yield strength are positive
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("elastic_modulus_pa", self.elastic_modulus_pa)?;
        require_positive("yield_strength_pa", self.yield_strength_pa)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::structural_steel()
    }
}
