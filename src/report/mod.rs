use std::fmt::Display;

use anyhow::bail;
use bio::alignment::distance::hamming;
use log::{debug, info};

use crate::alphabets::Alphabet;
use crate::errors::InputError;
use crate::parsimony::ParsimonyScoring;
use crate::tree::Tree;
use crate::Result;

/// One labelled tree edge and the number of sites at which its endpoints differ.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdjacencyRecord {
    pub parent: Vec<u8>,
    pub child: Vec<u8>,
    pub mismatches: u64,
}

impl AdjacencyRecord {
    pub fn new(parent: &[u8], child: &[u8]) -> Result<AdjacencyRecord> {
        Ok(AdjacencyRecord {
            parent: parent.to_vec(),
            child: child.to_vec(),
            mismatches: hamming_distance(parent, child)?,
        })
    }

    pub fn reversed(&self) -> AdjacencyRecord {
        AdjacencyRecord {
            parent: self.child.clone(),
            child: self.parent.clone(),
            mismatches: self.mismatches,
        }
    }
}

impl Display for AdjacencyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}->{}:{}",
            String::from_utf8_lossy(&self.parent),
            String::from_utf8_lossy(&self.child),
            self.mismatches
        )
    }
}

pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<u64> {
    if a.len() != b.len() {
        bail!(InputError::new(format!(
            "Cannot compare sequences of length {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(hamming(a, b))
}

/// Every (parent, child) edge of a labelled tree, in preorder of the parent.
pub fn adjacency_records(tree: &Tree) -> Result<Vec<AdjacencyRecord>> {
    tree.edges()
        .iter()
        .map(|(parent, child)| AdjacencyRecord::new(tree.sequence(parent)?, tree.sequence(child)?))
        .collect()
}

/// Sum of the substitution costs along every edge of a labelled tree. For an optimal
/// labelling this equals the parsimony score.
pub fn labelling_cost(tree: &Tree, scoring: &dyn ParsimonyScoring) -> Result<f64> {
    let records = adjacency_records(tree)?;
    records_cost(&records, tree.alphabet(), scoring)
}

fn records_cost(
    records: &[AdjacencyRecord],
    alphabet: &Alphabet,
    scoring: &dyn ParsimonyScoring,
) -> Result<f64> {
    let mut total = 0.0;
    for record in records {
        for (&p, &c) in record.parent.iter().zip(record.child.iter()) {
            let (Some(i), Some(j)) = (alphabet.index_of(p), alphabet.index_of(c)) else {
                bail!(InputError::new(format!(
                    "Edge {} contains a symbol outside the {}",
                    record, alphabet
                )));
            };
            total += scoring.cost(i, j);
        }
    }
    Ok(total)
}

/// Parsimony score of a labelled tree followed by its adjacency list.
///
/// # Example
/// ```
/// use small_parsimony::alphabets::dna_alphabet;
/// use small_parsimony::io::parse_tree;
/// use small_parsimony::parsimony::{SimpleScoring, TreeLabeller};
/// use small_parsimony::report::ParsimonyReport;
///
/// let mut tree = parse_tree("2\n2->ACGT\n2->ACGA\n", &dna_alphabet()).unwrap();
/// let result = TreeLabeller::new(Box::new(SimpleScoring::default()))
///     .label(&mut tree)
///     .unwrap();
/// let report = ParsimonyReport::from_tree(result.score, &tree).unwrap();
/// assert_eq!(report.to_string(), "1\nACGA->ACGT:1\nACGA->ACGA:0");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParsimonyReport {
    score: f64,
    records: Vec<AdjacencyRecord>,
    alphabet: Alphabet,
    both_directions: bool,
}

impl ParsimonyReport {
    /// Bails if the tree has not been labelled yet.
    pub fn from_tree(score: f64, tree: &Tree) -> Result<ParsimonyReport> {
        info!("Building adjacency report for {} edges", tree.edges().len());
        let records = adjacency_records(tree)?;
        let total: u64 = records.iter().map(|r| r.mismatches).sum();
        debug!("Edges carry {} mismatches in total", total);
        Ok(ParsimonyReport {
            score,
            records,
            alphabet: *tree.alphabet(),
            both_directions: false,
        })
    }

    /// Also lists every edge from child to parent.
    pub fn both_directions(mut self, both_directions: bool) -> ParsimonyReport {
        self.both_directions = both_directions;
        self
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// One record per tree edge, parent to child.
    pub fn records(&self) -> &[AdjacencyRecord] {
        &self.records
    }

    /// The records in output order, including reversed edges if requested.
    pub fn lines(&self) -> Vec<AdjacencyRecord> {
        if self.both_directions {
            self.records
                .iter()
                .flat_map(|r| [r.clone(), r.reversed()])
                .collect()
        } else {
            self.records.clone()
        }
    }

    /// Output records in canonical order.
    pub fn sorted(&self) -> Vec<AdjacencyRecord> {
        let mut lines = self.lines();
        lines.sort();
        lines
    }

    /// Number of substitutions over all edges, each edge counted once.
    pub fn total_mismatches(&self) -> u64 {
        self.records.iter().map(|r| r.mismatches).sum()
    }

    pub fn weighted_cost(&self, scoring: &dyn ParsimonyScoring) -> Result<f64> {
        records_cost(&self.records, &self.alphabet, scoring)
    }
}

impl Display for ParsimonyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.score)?;
        for record in self.lines() {
            write!(f, "\n{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests;
