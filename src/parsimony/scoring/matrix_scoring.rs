use anyhow::bail;
use log::{debug, info};
use nalgebra::DMatrix;

use crate::errors::InputError;
use crate::parsimony::ParsimonyScoring;
use crate::Result;

pub type CostMatrix = DMatrix<f64>;

/// Arbitrary symmetric substitution cost matrix, indexed in alphabet order.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixScoring {
    costs: CostMatrix,
    uniform: Option<f64>,
}

impl MatrixScoring {
    /// Bails with an `InputError` unless the matrix is square, symmetric and finite, with a
    /// zero diagonal and positive off-diagonal entries.
    pub fn new(costs: CostMatrix) -> Result<MatrixScoring> {
        if !costs.is_square() || costs.is_empty() {
            bail!(InputError::new(format!(
                "Cost matrix must be square and non-empty, got {}x{}",
                costs.nrows(),
                costs.ncols()
            )));
        }
        let k = costs.nrows();
        for i in 0..k {
            if costs[(i, i)] != 0.0 {
                bail!(InputError::new(format!(
                    "Cost matrix diagonal must be zero, entry ({i}, {i}) is {}",
                    costs[(i, i)]
                )));
            }
            for j in (i + 1)..k {
                let (c_ij, c_ji) = (costs[(i, j)], costs[(j, i)]);
                if c_ij != c_ji {
                    bail!(InputError::new(format!(
                        "Cost matrix must be symmetric, ({i}, {j}) is {c_ij} but ({j}, {i}) is {c_ji}"
                    )));
                }
                if !c_ij.is_finite() || c_ij <= 0.0 {
                    bail!(InputError::new(format!(
                        "Substitution costs must be positive and finite, ({i}, {j}) is {c_ij}"
                    )));
                }
            }
        }
        let uniform = if k == 1 {
            None
        } else {
            let first = costs[(0, 1)];
            let all_equal = (0..k)
                .flat_map(|i| (0..k).filter(move |&j| j != i).map(move |j| (i, j)))
                .all(|idx| costs[idx] == first);
            all_equal.then_some(first)
        };
        debug!("Cost matrix: {}", costs);
        Ok(MatrixScoring { costs, uniform })
    }

    /// DNA scoring (alphabet order A, C, G, T) where A<->G and C<->T cost `transition`
    /// and every other substitution costs `transversion`.
    pub fn transition_transversion(transition: f64, transversion: f64) -> Result<MatrixScoring> {
        info!(
            "Setting up transition/transversion scoring with costs {} and {}",
            transition, transversion
        );
        let costs = CostMatrix::from_fn(4, 4, |i, j| match (i.min(j), i.max(j)) {
            (a, b) if a == b => 0.0,
            (0, 2) | (1, 3) => transition,
            _ => transversion,
        });
        MatrixScoring::new(costs)
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }
}

impl ParsimonyScoring for MatrixScoring {
    fn cost(&self, i: usize, j: usize) -> f64 {
        self.costs[(i, j)]
    }

    fn uniform_cost(&self) -> Option<f64> {
        self.uniform
    }

    fn size(&self) -> Option<usize> {
        Some(self.costs.nrows())
    }
}
