use std::fmt::Display;

use anyhow::bail;
use log::{debug, info};

use crate::errors::InputError;
use crate::parsimony::sankoff::check_scoring_size;
use crate::parsimony::{FitchSolver, ParsimonyScoring, SankoffSolver, SiteSolution, SiteSolver};
use crate::tree::{NodeIdx, Tree};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Fitch for uniform scorings, Sankoff otherwise.
    #[default]
    Auto,
    Sankoff,
    Fitch,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Auto => write!(f, "automatic"),
            Algorithm::Sankoff => write!(f, "Sankoff"),
            Algorithm::Fitch => write!(f, "Fitch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabellingResult {
    /// Sum of the minimal root costs over all sites.
    pub score: f64,
    pub site_costs: Vec<f64>,
}

/// Labels every internal node of a tree with a most parsimonious sequence, one site at a time.
#[derive(Debug, Clone)]
pub struct TreeLabeller {
    scoring: Box<dyn ParsimonyScoring>,
    solver: Solver,
}

#[derive(Debug, Clone)]
enum Solver {
    Sankoff(SankoffSolver),
    Fitch(FitchSolver),
}

impl Solver {
    fn as_site_solver(&self) -> &dyn SiteSolver {
        match self {
            Solver::Sankoff(solver) => solver,
            Solver::Fitch(solver) => solver,
        }
    }
}

impl TreeLabeller {
    pub fn new(scoring: Box<dyn ParsimonyScoring>) -> TreeLabeller {
        let solver = match FitchSolver::new(scoring.as_ref()) {
            Ok(fitch) => Solver::Fitch(fitch),
            Err(_) => Solver::Sankoff(SankoffSolver::new(scoring.clone())),
        };
        TreeLabeller { scoring, solver }
    }

    /// Bails if Fitch is requested for a non-uniform scoring.
    pub fn with_algorithm(
        scoring: Box<dyn ParsimonyScoring>,
        algorithm: Algorithm,
    ) -> Result<TreeLabeller> {
        let solver = match algorithm {
            Algorithm::Auto => return Ok(TreeLabeller::new(scoring)),
            Algorithm::Sankoff => Solver::Sankoff(SankoffSolver::new(scoring.clone())),
            Algorithm::Fitch => Solver::Fitch(FitchSolver::new(scoring.as_ref())?),
        };
        Ok(TreeLabeller { scoring, solver })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self.solver {
            Solver::Sankoff(_) => Algorithm::Sankoff,
            Solver::Fitch(_) => Algorithm::Fitch,
        }
    }

    pub fn scoring(&self) -> &dyn ParsimonyScoring {
        self.scoring.as_ref()
    }

    /// Computes the parsimony score and writes the chosen symbols into the internal nodes'
    /// label buffers. Relabelling an already labelled tree gives the same result.
    pub fn label(&self, tree: &mut Tree) -> Result<LabellingResult> {
        self.check_input(tree)?;
        info!(
            "Labelling {} internal nodes over {} sites with the {} algorithm",
            tree.len() - tree.leaf_count(),
            tree.sequence_length(),
            self.algorithm()
        );

        let solutions = solve_sites(self.solver.as_site_solver(), tree)?;
        let site_costs: Vec<f64> = solutions.iter().map(|s| s.cost).collect();
        let score: f64 = site_costs.iter().sum();

        let internals: Vec<NodeIdx> = tree.internals().iter().map(|node| node.idx).collect();
        for (site, solution) in solutions.iter().enumerate() {
            debug!("Site {} costs {}", site, solution.cost);
            for node_idx in &internals {
                tree.set_internal_label(node_idx, site, solution.states[usize::from(node_idx)])?;
            }
        }
        tree.set_labelled();

        info!("Finished labelling, parsimony score is {}", score);
        Ok(LabellingResult { score, site_costs })
    }

    fn check_input(&self, tree: &Tree) -> Result<()> {
        let seq_len = tree.sequence_length();
        if seq_len == 0 {
            bail!(InputError::new("Leaf sequences must not be empty"));
        }
        for leaf in tree.leaves() {
            let seq = tree.leaf_sequence(&leaf.idx)?;
            if seq.len() != seq_len {
                bail!(InputError::new(format!(
                    "Leaf {} has a sequence of length {}, expected {}",
                    leaf.id,
                    seq.len(),
                    seq_len
                )));
            }
        }
        check_scoring_size(self.scoring.size(), tree.alphabet())
    }
}

cfg_if::cfg_if! {
if #[cfg(feature="par-sites")] {
fn solve_sites(solver: &dyn SiteSolver, tree: &Tree) -> Result<Vec<SiteSolution>> {
    use rayon::prelude::*;
    (0..tree.sequence_length())
        .into_par_iter()
        .map(|site| solver.solve_site(tree, site))
        .collect()
}
} else {
fn solve_sites(solver: &dyn SiteSolver, tree: &Tree) -> Result<Vec<SiteSolution>> {
    (0..tree.sequence_length())
        .map(|site| solver.solve_site(tree, site))
        .collect()
}
}
}
