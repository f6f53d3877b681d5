//! # Supports and Reactions
//!
//! Maps a [`BeamType`] to its constrained DOFs, solves the free partition of
//! the global system with zero prescribed displacement, and recovers support
//! reactions from the residual r = K·u − F at the constrained DOFs.
//!
//! | Beam type        | Constrained DOFs          | Reactions          |
//! |------------------|---------------------------|--------------------|
//! | Simply supported | w@0, w@L                  | R0, RL             |
//! | Cantilever       | w@0, θ@0                  | R0, M0             |
//! | Fixed-fixed      | w@0, θ@0, w@L, θ@L        | R0, M0, RL, ML     |
//!
//! Reactions follow the DOF sign convention: with downward-positive loads a
//! support pushing up reports a negative force.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::assembly::{GlobalSystem, Mesh};
use crate::errors::CalcResult;
use crate::solver::solve_dense;

/// Support configuration of the span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BeamType {
    /// Pinned at x = 0, roller at x = L
    #[default]
    SimplySupported,
    /// Fixed at x = 0, free at x = L
    Cantilever,
    /// Fixed at both ends
    FixedFixed,
}

impl BeamType {
    /// All beam types, in display order
    pub const ALL: [BeamType; 3] = [
        BeamType::SimplySupported,
        BeamType::Cantilever,
        BeamType::FixedFixed,
    ];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            BeamType::SimplySupported => "Simply supported",
            BeamType::Cantilever => "Cantilever",
            BeamType::FixedFixed => "Fixed-fixed",
        }
    }

    /// Reactions this support configuration produces, paired with their DOFs
    pub fn reaction_dofs(&self, n_nodes: usize) -> Vec<(ReactionKey, usize)> {
        let last = n_nodes - 1;
        match self {
            BeamType::SimplySupported => vec![(ReactionKey::R0, 0), (ReactionKey::RL, 2 * last)],
            BeamType::Cantilever => vec![(ReactionKey::R0, 0), (ReactionKey::M0, 1)],
            BeamType::FixedFixed => vec![
                (ReactionKey::R0, 0),
                (ReactionKey::M0, 1),
                (ReactionKey::RL, 2 * last),
                (ReactionKey::ML, 2 * last + 1),
            ],
        }
    }

    /// Constrained DOF indices, ascending
    pub fn constrained_dofs(&self, n_nodes: usize) -> Vec<usize> {
        self.reaction_dofs(n_nodes).into_iter().map(|(_, dof)| dof).collect()
    }
}

/// Support reaction identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReactionKey {
    /// Vertical force at x = 0
    R0,
    /// Moment at x = 0
    M0,
    /// Vertical force at x = L
    RL,
    /// Moment at x = L
    ML,
}

impl ReactionKey {
    /// True for force reactions, false for moments
    pub fn is_force(&self) -> bool {
        matches!(self, ReactionKey::R0 | ReactionKey::RL)
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReactionKey::R0 => "R0",
            ReactionKey::M0 => "M0",
            ReactionKey::RL => "RL",
            ReactionKey::ML => "ML",
        };
        f.write_str(s)
    }
}

/// Support reactions keyed by [`ReactionKey`]
pub type Reactions = BTreeMap<ReactionKey, f64>;

/// Solved nodal DOFs: (w, θ) per node, interleaved
#[derive(Debug, Clone, PartialEq)]
pub struct NodalDisplacements {
    values: DVector<f64>,
}

impl NodalDisplacements {
    pub fn new(values: DVector<f64>) -> Self {
        NodalDisplacements { values }
    }

    /// Transverse displacement of node `i`
    pub fn deflection(&self, node: usize) -> f64 {
        self.values[2 * node]
    }

    /// DOF vector [w1, θ1, w2, θ2] of element `e`
    pub fn element_dofs(&self, e: usize) -> [f64; 4] {
        Mesh::element_dofs(e).map(|dof| self.values[dof])
    }
}

/// Solution of a constrained system
#[derive(Debug, Clone)]
pub struct ConstrainedSolution {
    pub displacements: NodalDisplacements,
    /// K·u − F over every DOF; non-zero only at constrained DOFs
    pub residual: DVector<f64>,
}

/// Solve K·u = F with u = 0 at the `fixed` DOFs.
///
/// The free block K_ff·u_f = F_f is solved densely; the residual is formed
/// with the full K so reactions include every coupling term.
pub fn solve_constrained(system: &GlobalSystem, fixed: &[usize]) -> CalcResult<ConstrainedSolution> {
    let n = system.forces.len();
    let free: Vec<usize> = (0..n).filter(|dof| !fixed.contains(dof)).collect();

    let k_ff = system.stiffness.select_rows(&free).select_columns(&free);
    let f_f = system.forces.select_rows(&free);
    debug!("Solving {} free DOFs ({} constrained)", free.len(), n - free.len());
    let u_f = solve_dense(&k_ff, &f_f)?;

    let mut u = DVector::zeros(n);
    for (&dof, value) in free.iter().zip(u_f.iter()) {
        u[dof] = *value;
    }

    let residual = &system.stiffness * &u - &system.forces;

    Ok(ConstrainedSolution {
        displacements: NodalDisplacements::new(u),
        residual,
    })
}

/// Read the reactions of `beam_type` out of a residual vector
pub fn reactions_for(beam_type: BeamType, n_nodes: usize, residual: &DVector<f64>) -> Reactions {
    beam_type
        .reaction_dofs(n_nodes)
        .into_iter()
        .map(|(key, dof)| (key, residual[dof]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::assembly::assemble;
    use crate::loads::Load;
    use approx::assert_relative_eq;

    #[test]
    fn test_constrained_dofs() {
        assert_eq!(BeamType::SimplySupported.constrained_dofs(5), vec![0, 8]);
        assert_eq!(BeamType::Cantilever.constrained_dofs(5), vec![0, 1]);
        assert_eq!(BeamType::FixedFixed.constrained_dofs(5), vec![0, 1, 8, 9]);
    }

    #[test]
    fn test_simply_supported_reactions_oppose_load() {
        let mesh = Mesh::uniform(6.0, 6);
        let system = assemble(mesh, 1.0e6, &[Load::point(1200.0, 1.5)]);
        let fixed = BeamType::SimplySupported.constrained_dofs(mesh.n_nodes());
        let solution = solve_constrained(&system, &fixed).unwrap();
        let reactions = reactions_for(BeamType::SimplySupported, mesh.n_nodes(), &solution.residual);

        assert_eq!(reactions.len(), 2);
        assert_relative_eq!(reactions[&ReactionKey::R0], -900.0, max_relative = 1e-9);
        assert_relative_eq!(reactions[&ReactionKey::RL], -300.0, max_relative = 1e-9);
        assert_eq!(solution.displacements.deflection(0), 0.0);
        assert!(solution.displacements.deflection(3) > 0.0);
    }

    #[test]
    fn test_free_dofs_have_zero_residual() {
        let mesh = Mesh::uniform(3.0, 4);
        let system = assemble(mesh, 5.0e4, &[Load::uniform(200.0, 0.0, 3.0)]);
        let fixed = BeamType::Cantilever.constrained_dofs(mesh.n_nodes());
        let solution = solve_constrained(&system, &fixed).unwrap();
        for (dof, r) in solution.residual.iter().enumerate() {
            if !fixed.contains(&dof) {
                assert!(r.abs() < 1e-8, "residual {} at free DOF {}", r, dof);
            }
        }
    }

    #[test]
    fn test_unsupported_beam_is_singular() {
        let mesh = Mesh::uniform(4.0, 4);
        let system = assemble(mesh, 1.0, &[Load::point(10.0, 2.0)]);
        let err = solve_constrained(&system, &[]).unwrap_err();
        assert_eq!(err.error_code(), "SINGULAR_SYSTEM");
    }

    #[test]
    fn test_reaction_keys_serialize_as_names() {
        let mut reactions = Reactions::new();
        reactions.insert(ReactionKey::RL, -1.0);
        reactions.insert(ReactionKey::R0, -2.0);
        let json = serde_json::to_string(&reactions).unwrap();
        assert_eq!(json, r#"{"R0":-2.0,"RL":-1.0}"#);
        assert_eq!(ReactionKey::M0.to_string(), "M0");
    }
}
