use std::fmt;

use anyhow::{anyhow, bail};
use hashbrown::HashMap;
use log::{debug, info, warn};
use pest::{error::Error as PestError, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::tree::TreeBuilder;
use crate::Result;

#[derive(Parser)]
#[grammar = "./io/adjacency.pest"]
pub struct AdjacencyParser;

pub struct ParsingError(pub(crate) Box<PestError<Rule>>);

impl fmt::Debug for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Malformed adjacency list")?;
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParsingError {}

enum Target {
    Node(usize),
    Sequence(String),
}

/// Parses a leaf count followed by one `parent->child` edge per line, where the child is
/// either a node id or an inline sequence.
///
/// Inline sequences follow one of two conventions, decided per line:
/// * `id->SEQ` where `id` has no other outgoing line labels node `id` itself as a leaf;
/// * otherwise `parent->SEQ` attaches a new leaf to `parent`. These leaves are numbered
///   `0..n` in order of appearance.
///
/// # Example
/// ```
/// use small_parsimony::alphabets::dna_alphabet;
/// use small_parsimony::io::from_adjacency_list;
/// let builder = from_adjacency_list("2\n2->CAAATCCC\n2->ATGGACGA\n").unwrap();
/// let tree = builder.build(&dna_alphabet()).unwrap();
/// assert_eq!(tree.leaf_count(), 2);
/// assert_eq!(tree.node_id(&tree.root()), 2);
/// ```
pub fn from_adjacency_list(input: &str) -> Result<TreeBuilder> {
    info!("Parsing adjacency list.");
    let list = match AdjacencyParser::parse(Rule::adjacency_list, input) {
        Ok(mut pairs) => pairs
            .next()
            .ok_or_else(|| anyhow!("Empty adjacency list"))?,
        Err(e) => bail!(ParsingError(Box::new(e))),
    };

    let mut leaf_count = 0;
    let mut edges = Vec::new();
    for pair in list.into_inner() {
        match pair.as_rule() {
            Rule::leaf_count => leaf_count = pair.as_str().parse()?,
            Rule::edge => edges.push(parse_edge(pair)?),
            Rule::EOI => (),
            _ => unreachable!(),
        }
    }

    let mut out_degree: HashMap<usize, usize> = HashMap::new();
    for (parent, _) in &edges {
        *out_degree.entry(*parent).or_default() += 1;
    }

    let mut builder = TreeBuilder::new(leaf_count);
    let mut next_leaf = 0;
    let mut labelled_leaves = 0;
    for (parent, target) in edges {
        match target {
            Target::Node(child) => builder.add_edge(parent, child),
            Target::Sequence(seq) if out_degree[&parent] == 1 => {
                debug!("Sequence line labels leaf {}", parent);
                builder.add_leaf(parent, seq.as_bytes());
                labelled_leaves += 1;
            }
            Target::Sequence(seq) => {
                debug!("Attaching leaf {} to node {}", next_leaf, parent);
                builder.add_leaf(next_leaf, seq.as_bytes());
                builder.add_edge(parent, next_leaf);
                next_leaf += 1;
            }
        }
    }
    if labelled_leaves > 0 && next_leaf > 0 {
        warn!(
            "Adjacency list mixes {} labelled leaves with {} attached leaves",
            labelled_leaves, next_leaf
        );
    }
    info!("Finished parsing adjacency list successfully.");
    Ok(builder)
}

fn parse_edge(pair: Pair<Rule>) -> Result<(usize, Target)> {
    let mut parts = pair.into_inner();
    let (Some(parent), Some(child)) = (parts.next(), parts.next()) else {
        bail!("Edge must have a parent and a child");
    };
    let parent: usize = parent.as_str().parse()?;
    let target = match child.as_rule() {
        Rule::child_id => Target::Node(child.as_str().parse()?),
        Rule::sequence => Target::Sequence(child.as_str().to_string()),
        _ => unreachable!(),
    };
    Ok((parent, target))
}
