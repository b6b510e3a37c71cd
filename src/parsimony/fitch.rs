use anyhow::{anyhow, bail};

use crate::alphabets::ParsimonySet;
use crate::errors::InputError;
use crate::parsimony::sankoff::{check_scoring_size, check_site, leaf_symbol};
use crate::parsimony::{ParsimonyScoring, SiteSolution, SiteSolver};
use crate::tree::{
    NodeIdx::{Internal as Int, Leaf},
    Tree,
};
use crate::Result;

/// Fitch's set-based shortcut of the Sankoff recursion, valid for uniform substitution costs.
/// A node's set holds exactly the symbols with minimal subtree cost.
#[derive(Debug, Clone, PartialEq)]
pub struct FitchSolver {
    mismatch: f64,
    size: Option<usize>,
}

impl FitchSolver {
    pub fn new(scoring: &dyn ParsimonyScoring) -> Result<FitchSolver> {
        match scoring.uniform_cost() {
            Some(mismatch) => Ok(FitchSolver {
                mismatch,
                size: scoring.size(),
            }),
            None => bail!(InputError::new(
                "Fitch's algorithm requires uniform substitution costs"
            )),
        }
    }

    /// Bottom-up pass: the parsimony set of every node at the given site, indexed like the
    /// tree's node arena, and the number of substitutions needed.
    pub fn parsimony_sets(&self, tree: &Tree, site: usize) -> Result<(Vec<ParsimonySet>, usize)> {
        check_site(tree, site)?;
        check_scoring_size(self.size, tree.alphabet())?;
        let alphabet = tree.alphabet();
        let mut sets = vec![ParsimonySet::new(); tree.len()];
        let mut changes = 0;
        for node_idx in tree.postorder() {
            sets[usize::from(node_idx)] = match node_idx {
                Leaf(_) => {
                    let symbol = leaf_symbol(tree, node_idx, site)?;
                    if !alphabet.contains(symbol) {
                        bail!(InputError::new(format!(
                            "Symbol '{}' is not in the {}",
                            symbol as char, alphabet
                        )));
                    }
                    alphabet.parsimony_set(symbol)
                }
                Int(_) => {
                    let (left, right) = tree.children(node_idx)?;
                    let (set, substitution) =
                        sets[usize::from(left)].fitch_join(&sets[usize::from(right)]);
                    if substitution {
                        changes += 1;
                    }
                    set
                }
            };
        }
        Ok((sets, changes))
    }

    /// Top-down pass with the same tie-break policy as the Sankoff backtracking: keep the
    /// parent's symbol if it is in the node's set, otherwise take the first member in
    /// alphabet order.
    pub fn backtrack(&self, tree: &Tree, sets: &[ParsimonySet]) -> Result<Vec<u8>> {
        let alphabet = tree.alphabet();
        if sets.len() != tree.len() {
            bail!(InputError::new(format!(
                "Expected {} parsimony sets, got {}",
                tree.len(),
                sets.len()
            )));
        }
        let mut chosen = vec![0u8; tree.len()];
        for node_idx in tree.preorder() {
            let set = &sets[usize::from(node_idx)];
            let parent_state = tree.parent(node_idx).map(|p| chosen[usize::from(p)]);
            chosen[usize::from(node_idx)] = match parent_state {
                Some(state) if set.contains(state) => state,
                _ => alphabet
                    .first_in(set)
                    .ok_or_else(|| anyhow!("Empty parsimony set at {}", node_idx))?,
            };
        }
        Ok(chosen)
    }
}

impl SiteSolver for FitchSolver {
    fn solve_site(&self, tree: &Tree, site: usize) -> Result<SiteSolution> {
        let (sets, changes) = self.parsimony_sets(tree, site)?;
        let states = self.backtrack(tree, &sets)?;
        Ok(SiteSolution {
            cost: changes as f64 * self.mismatch,
            states,
        })
    }
}
