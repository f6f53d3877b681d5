//! # Structural Mechanics Equations
//!
//! The pure formulas the finite element engine is built from. Keeping them in
//! one place makes each one easy to check against a textbook.
//!
//! ## Modules
//!
//! - [`section`] - Cross-section properties (I, c, A)
//! - [`shape_functions`] - Hermite cubic basis for Euler-Bernoulli elements
//! - [`quadrature`] - Gauss-Legendre integration rule
//! - [`beam`] - Closed-form single-span solutions used as verification oracles
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Deflection**: Positive downward
//! - **Rotation**: θ = dw/dx
//! - **Moment**: M = EI·w″, so a sagging span carries negative moment
//! - **Shear**: V = EI·w‴
//! - **Reactions**: Generalized forces at the restrained DOFs in the same
//!   downward-positive convention, so an upward support force is negative

pub mod beam;
pub mod quadrature;
pub mod section;
pub mod shape_functions;

pub use quadrature::{gauss_legendre_4, GaussPoint};
pub use shape_functions::{
    hermite_second_derivatives, hermite_third_derivatives, hermite_values,
};
