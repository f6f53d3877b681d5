//! # Finite-Element Beam Calculations
//!
//! The analysis pipeline, leaf-first:
//!
//! - [`assembly`] - mesh, element matrices, global K and F
//! - [`boundary`] - supports, constrained solve, reactions
//! - [`sampling`] - station grid, maxima, factor of safety
//! - [`beam_analysis`] - [`analyze`]: one load set → [`AnalysisResult`]
//! - [`superposition`] - [`combine`]: case results × factors → [`AnalysisResult`]
//!
//! Every entry point is a pure function of its arguments. Each call allocates
//! its own matrices, and all result types are plain data that can be sent
//! across threads.

pub mod assembly;
pub mod beam_analysis;
pub mod boundary;
pub mod sampling;
pub mod superposition;

pub use assembly::{assemble, GlobalSystem, Mesh};
pub use beam_analysis::{analyze, AnalysisResult, BeamInput};
pub use boundary::{solve_constrained, BeamType, ReactionKey, Reactions};
pub use sampling::{Extremum, Maxima, SafetyCheck, SamplePoint};
pub use superposition::combine;
