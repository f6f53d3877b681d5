//! # Element and Global Assembly
//!
//! Discretizes the span into equal two-node Euler-Bernoulli elements and
//! builds the global stiffness matrix and load vector.
//!
//! ## DOF Numbering
//!
//! Node `i` owns DOFs `2i` (transverse displacement w) and `2i + 1`
//! (rotation θ), giving a system of size 2·(nElem + 1). Element `e` connects
//! nodes `e` and `e + 1`, so its four DOFs map to
//! `[2e, 2e + 1, 2e + 2, 2e + 3]`.
//!
//! ## Load Vector
//!
//! Distributed loads enter through the consistent vector ∫ Nᵀ q dx, evaluated
//! with 4-point Gauss-Legendre quadrature on each element. Point loads are
//! added afterwards, weighted by the Hermite basis at the load position inside
//! the single element that owns it.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector, Matrix4, Vector4};

use crate::equations::{gauss_legendre_4, hermite_values};
use crate::loads::{distributed_intensity_at, Load};

/// Fewest elements a mesh may have
pub const MIN_ELEMENTS: usize = 2;

/// Quadrature points with |q| below this contribute nothing and are skipped
const NEGLIGIBLE_INTENSITY: f64 = 1e-14;

// ============================================================================
// Mesh
// ============================================================================

/// Uniform 1-D mesh over [0, span]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    span_m: f64,
    n_elements: usize,
}

impl Mesh {
    /// Mesh with `n_elements` equal elements; fewer than two is raised to two.
    pub fn uniform(span_m: f64, n_elements: usize) -> Self {
        let n = if n_elements < MIN_ELEMENTS {
            warn!(
                "Element count {} is below the minimum; using {}",
                n_elements, MIN_ELEMENTS
            );
            MIN_ELEMENTS
        } else {
            n_elements
        };
        Mesh { span_m, n_elements: n }
    }

    pub fn span_m(&self) -> f64 {
        self.span_m
    }

    pub fn n_elements(&self) -> usize {
        self.n_elements
    }

    pub fn n_nodes(&self) -> usize {
        self.n_elements + 1
    }

    /// Size of the global system
    pub fn n_dofs(&self) -> usize {
        2 * self.n_nodes()
    }

    /// Position of node `i`
    #[inline]
    pub fn node_x(&self, i: usize) -> f64 {
        self.span_m * i as f64 / self.n_elements as f64
    }

    /// Start position and length of element `e`
    #[inline]
    pub fn element_bounds(&self, e: usize) -> (f64, f64) {
        let x1 = self.node_x(e);
        (x1, self.node_x(e + 1) - x1)
    }

    /// Global DOF indices of element `e`
    #[inline]
    pub fn element_dofs(e: usize) -> [usize; 4] {
        [2 * e, 2 * e + 1, 2 * e + 2, 2 * e + 3]
    }

    /// Owning element and local coordinate s for position `x`.
    ///
    /// The element index is floor(x/L·nElem) clamped to the valid range, so a
    /// position exactly on an interior node belongs to the element on its
    /// right and x = L belongs to the last element (s = 1).
    pub fn locate(&self, x: f64) -> (usize, f64) {
        let raw = (x / self.span_m * self.n_elements as f64).floor();
        let e = if raw.is_nan() || raw < 0.0 {
            0
        } else {
            (raw as usize).min(self.n_elements - 1)
        };
        let (x1, le) = self.element_bounds(e);
        let s = if le > 0.0 { (x - x1) / le } else { 0.0 };
        (e, s)
    }
}

// ============================================================================
// Element Matrices
// ============================================================================

/// Closed-form Euler-Bernoulli element stiffness for DOFs [w1, θ1, w2, θ2]
pub fn element_stiffness(ei: f64, le: f64) -> Matrix4<f64> {
    let l2 = le * le;
    #[rustfmt::skip]
    let k = Matrix4::new(
        12.0,      6.0 * le,  -12.0,     6.0 * le,
        6.0 * le,  4.0 * l2,  -6.0 * le, 2.0 * l2,
        -12.0,     -6.0 * le, 12.0,      -6.0 * le,
        6.0 * le,  2.0 * l2,  -6.0 * le, 4.0 * l2,
    );
    k * (ei / (l2 * le))
}

/// Consistent load vector ∫ Nᵀ q dx over the element starting at `x1`
pub fn element_load_vector(x1: f64, le: f64, loads: &[Load]) -> Vector4<f64> {
    let mut fe = Vector4::zeros();
    for gp in gauss_legendre_4() {
        let s = gp.normalized();
        let q = distributed_intensity_at(x1 + s * le, loads);
        if q.abs() < NEGLIGIBLE_INTENSITY {
            continue;
        }
        let n = Vector4::from(hermite_values(s, le));
        fe += n * (q * 0.5 * le * gp.weight);
    }
    fe
}

// ============================================================================
// Global System
// ============================================================================

/// Assembled global stiffness and load vector, before supports are applied
#[derive(Debug, Clone)]
pub struct GlobalSystem {
    pub mesh: Mesh,
    pub flexural_rigidity: f64,
    pub stiffness: DMatrix<f64>,
    pub forces: DVector<f64>,
}

/// Assemble K and F for a span of constant flexural rigidity `ei`.
///
/// Point positions are clamped onto [0, span].
pub fn assemble(mesh: Mesh, ei: f64, loads: &[Load]) -> GlobalSystem {
    let n_dofs = mesh.n_dofs();
    let mut stiffness = DMatrix::zeros(n_dofs, n_dofs);
    let mut forces = DVector::zeros(n_dofs);

    let distributed: Vec<Load> = loads.iter().copied().filter(Load::is_distributed).collect();

    for e in 0..mesh.n_elements() {
        let (x1, le) = mesh.element_bounds(e);
        let ke = element_stiffness(ei, le);
        let fe = if distributed.is_empty() {
            Vector4::zeros()
        } else {
            element_load_vector(x1, le, &distributed)
        };

        let map = Mesh::element_dofs(e);
        for (i, &gi) in map.iter().enumerate() {
            forces[gi] += fe[i];
            for (j, &gj) in map.iter().enumerate() {
                stiffness[(gi, gj)] += ke[(i, j)];
            }
        }
    }

    for load in loads {
        if let Load::Point {
            magnitude_n,
            position_m,
        } = *load
        {
            let xp = position_m.clamp(0.0, mesh.span_m());
            let (e, s) = mesh.locate(xp);
            let (_, le) = mesh.element_bounds(e);
            let n = hermite_values(s, le);
            for (&dof, ni) in Mesh::element_dofs(e).iter().zip(n.iter()) {
                forces[dof] += ni * magnitude_n;
            }
        }
    }

    debug!(
        "Assembled {} elements ({} DOFs), {} loads",
        mesh.n_elements(),
        n_dofs,
        loads.len()
    );

    GlobalSystem {
        mesh,
        flexural_rigidity: ei,
        stiffness,
        forces,
    }
}
