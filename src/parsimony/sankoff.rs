use std::fmt::Debug;

use anyhow::bail;
use ordered_float::OrderedFloat;

use crate::alphabets::Alphabet;
use crate::errors::InputError;
use crate::parsimony::ParsimonyScoring;
use crate::tree::{
    NodeIdx,
    NodeIdx::{Internal as Int, Leaf},
    Tree,
};
use crate::Result;

/// Minimum subtree cost per alphabet symbol for one node at one site.
pub type CostVector = Vec<f64>;

/// Optimal labelling of a single site: the minimal root cost and one chosen symbol per
/// node, indexed like the tree's node arena. Leaves keep their observed symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSolution {
    pub cost: f64,
    pub states: Vec<u8>,
}

/// Solves the small parsimony problem for a single sequence site.
pub trait SiteSolver: Debug + Send + Sync {
    fn solve_site(&self, tree: &Tree, site: usize) -> Result<SiteSolution>;
}

/// Sankoff's dynamic program for an arbitrary substitution cost matrix.
#[derive(Debug, Clone)]
pub struct SankoffSolver {
    scoring: Box<dyn ParsimonyScoring>,
}

impl SankoffSolver {
    pub fn new(scoring: Box<dyn ParsimonyScoring>) -> SankoffSolver {
        SankoffSolver { scoring }
    }

    /// Bottom-up pass: cost vectors for every node at the given site, indexed like the
    /// tree's node arena.
    pub fn cost_vectors(&self, tree: &Tree, site: usize) -> Result<Vec<CostVector>> {
        check_site(tree, site)?;
        check_scoring_size(self.scoring.size(), tree.alphabet())?;
        let alphabet = tree.alphabet();
        let mut costs = vec![CostVector::new(); tree.len()];
        for node_idx in tree.postorder() {
            costs[usize::from(node_idx)] = match node_idx {
                Leaf(_) => {
                    let symbol = leaf_symbol(tree, node_idx, site)?;
                    leaf_costs(alphabet, symbol)?
                }
                Int(_) => {
                    let (left, right) = tree.children(node_idx)?;
                    let left = &costs[usize::from(left)];
                    let right = &costs[usize::from(right)];
                    (0..alphabet.len())
                        .map(|k| self.min_transition(left, k) + self.min_transition(right, k))
                        .collect()
                }
            };
        }
        Ok(costs)
    }

    /// Top-down pass: picks one symbol per node from the bottom-up cost vectors.
    ///
    /// The root takes the cheapest symbol. Every other node takes the symbol minimising its
    /// subtree cost plus the substitution cost from its parent's symbol. Ties go to the symbol
    /// with the lower subtree cost and then to the earlier symbol in the alphabet. Under unit
    /// costs this keeps the parent's symbol whenever it is optimal for the node and otherwise
    /// takes the first optimal symbol in alphabet order.
    ///
    /// Only uniform scorings guarantee that every chosen symbol lies in the node's minimising
    /// set from [`optimal_states`]. With a weighted matrix a node may take a symbol outside
    /// that set when it is cheaper to reach from the parent's symbol. The edge costs of the
    /// chosen labels still sum to the root's minimal cost.
    pub fn backtrack(&self, tree: &Tree, costs: &[CostVector]) -> Result<Vec<u8>> {
        let alphabet = tree.alphabet();
        check_scoring_size(self.scoring.size(), alphabet)?;
        if costs.len() != tree.len() {
            bail!(InputError::new(format!(
                "Expected {} cost vectors, got {}",
                tree.len(),
                costs.len()
            )));
        }
        let mut chosen = vec![0usize; tree.len()];
        for node_idx in tree.preorder() {
            let node_costs = &costs[usize::from(node_idx)];
            if node_costs.len() != alphabet.len() {
                bail!("No cost vector computed for {}", node_idx);
            }
            chosen[usize::from(node_idx)] = match tree.parent(node_idx) {
                None => (0..alphabet.len())
                    .min_by_key(|&k| (OrderedFloat(node_costs[k]), k))
                    .unwrap_or_default(),
                Some(parent) => {
                    let parent_state = chosen[usize::from(parent)];
                    (0..alphabet.len())
                        .min_by_key(|&k| {
                            (
                                OrderedFloat(
                                    node_costs[k] + self.scoring.cost(parent_state, k),
                                ),
                                OrderedFloat(node_costs[k]),
                                k,
                            )
                        })
                        .unwrap_or_default()
                }
            };
        }
        Ok(chosen.into_iter().map(|k| alphabet.symbol(k)).collect())
    }

    fn min_transition(&self, child: &CostVector, k: usize) -> f64 {
        child
            .iter()
            .enumerate()
            .map(|(i, cost)| cost + self.scoring.cost(i, k))
            .fold(f64::INFINITY, f64::min)
    }
}

impl SiteSolver for SankoffSolver {
    fn solve_site(&self, tree: &Tree, site: usize) -> Result<SiteSolution> {
        let costs = self.cost_vectors(tree, site)?;
        let cost = min_cost(&costs[usize::from(tree.root())]);
        let states = self.backtrack(tree, &costs)?;
        Ok(SiteSolution { cost, states })
    }
}

/// Bails with an `InputError` unless the site lies within the leaf sequences.
pub(crate) fn check_site(tree: &Tree, site: usize) -> Result<()> {
    if site >= tree.sequence_length() {
        bail!(InputError::new(format!(
            "Site {} is out of range for sequences of length {}",
            site,
            tree.sequence_length()
        )));
    }
    Ok(())
}

/// Bails with an `InputError` if a sized scoring does not cover the alphabet.
pub(crate) fn check_scoring_size(size: Option<usize>, alphabet: &Alphabet) -> Result<()> {
    match size {
        Some(size) if size != alphabet.len() => bail!(InputError::new(format!(
            "Scoring is defined for {} symbols but the {} has {}",
            size,
            alphabet,
            alphabet.len()
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn leaf_symbol(tree: &Tree, node_idx: &NodeIdx, site: usize) -> Result<u8> {
    match tree.leaf_sequence(node_idx)?.get(site) {
        Some(symbol) => Ok(*symbol),
        None => bail!(InputError::new(format!(
            "Leaf {} has no symbol at site {}",
            tree.node_id(node_idx),
            site
        ))),
    }
}

/// Leaf labels are fixed: zero cost for the observed symbol, unreachable otherwise.
fn leaf_costs(alphabet: &Alphabet, symbol: u8) -> Result<CostVector> {
    let Some(observed) = alphabet.index_of(symbol) else {
        bail!(InputError::new(format!(
            "Symbol '{}' is not in the {}",
            symbol as char, alphabet
        )));
    };
    let mut costs = vec![f64::INFINITY; alphabet.len()];
    costs[observed] = 0.0;
    Ok(costs)
}

pub fn min_cost(costs: &[f64]) -> f64 {
    costs.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Alphabet indices of the symbols that attain the minimum cost.
pub fn optimal_states(costs: &[f64]) -> Vec<usize> {
    let min = min_cost(costs);
    costs
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == min)
        .map(|(k, _)| k)
        .collect()
}
