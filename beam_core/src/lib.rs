//! # beam_core - Single-Span Beam Finite Element Engine
//!
//! `beam_core` computes the static response of one Euler-Bernoulli span
//! (simply supported, cantilever, or fixed-fixed) under point, uniform and
//! linearly varying loads. It reports shear, moment, deflection and bending
//! stress on a dense station grid, support reactions, and a factor-of-safety
//! check, and combines named load cases by superposition. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `analyze` and `combine` are pure functions of their inputs
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Closed Variants**: Loads, sections and supports are enums matched
//!   exhaustively
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use beam_core::{analyze, combine, BeamInput, Load, LoadCombo};
//!
//! let beam = BeamInput::default();
//!
//! let mut cases = BTreeMap::new();
//! cases.insert("D".to_string(), analyze(&beam, &[Load::uniform(1000.0, 0.0, 5.0)])?);
//! cases.insert("L".to_string(), analyze(&beam, &[Load::point(2000.0, 2.5)])?);
//!
//! let combo = LoadCombo::new("C2", "1.2D + 1.6L")
//!     .with_factor("D", 1.2)
//!     .with_factor("L", 1.6);
//! let result = combine(&cases, &combo)?;
//!
//! println!("Max moment: {:.0} N·m", result.maxima.moment.value);
//! println!("FOS: {:.2} (ok = {})", result.safety.factor_of_safety, result.safety.ok);
//! # Ok::<(), beam_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Assembly, solve, sampling, superposition
//! - [`equations`] - Shape functions, quadrature, section and closed-form formulas
//! - [`sections`] - Cross-section shapes and derived properties
//! - [`materials`] - Linear-elastic material with yield strength
//! - [`loads`] - Loads, load cases, and combinations
//! - [`solver`] - Dense linear solver
//! - [`project`] - Project container and runner
//! - [`file_io`] - Project files with atomic saves
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod sections;
pub mod solver;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, combine, AnalysisResult, BeamInput, BeamType, ReactionKey, SamplePoint};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use loads::{Load, LoadCase, LoadCombo};
pub use materials::Material;
pub use project::{Project, ProjectReport};
pub use sections::{Section, SectionProperties};
