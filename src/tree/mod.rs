use std::fmt::Display;

use anyhow::bail;
use hashbrown::HashMap;

use crate::alphabets::Alphabet;
use crate::errors::{InputError, StructureError};
use crate::Result;
use NodeIdx::{Internal as Int, Leaf};

mod tree_builder;
pub use tree_builder::*;
mod tree_node;
pub use tree_node::*;

pub(crate) const UNRESOLVED: u8 = b'?';

#[derive(Debug, PartialEq, Clone, Copy, PartialOrd, Eq, Ord, Hash)]
pub enum NodeIdx {
    Internal(usize),
    Leaf(usize),
}

impl Display for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Int(idx) => write!(f, "Internal node {}", idx),
            Leaf(idx) => write!(f, "Leaf node {}", idx),
        }
    }
}

impl From<NodeIdx> for usize {
    fn from(node_idx: NodeIdx) -> usize {
        match node_idx {
            Int(idx) => idx,
            Leaf(idx) => idx,
        }
    }
}

impl From<&NodeIdx> for usize {
    fn from(node_idx: &NodeIdx) -> usize {
        usize::from(*node_idx)
    }
}

/// Rooted binary tree stored as an arena of nodes. Leaves own their observed sequences,
/// internal nodes own a label buffer of the same length that is filled by the labeller.
///
/// Built and validated by [`TreeBuilder`]; afterwards only the internal label buffers change.
#[derive(Debug, Clone)]
pub struct Tree {
    root: NodeIdx,
    nodes: Vec<Node>,
    postorder: Vec<NodeIdx>,
    preorder: Vec<NodeIdx>,
    ids: HashMap<usize, NodeIdx>,
    alphabet: Alphabet,
    seq_len: usize,
    labelled: bool,
    n: usize,
}

impl Tree {
    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Common length of all leaf sequences.
    pub fn sequence_length(&self) -> usize {
        self.seq_len
    }

    pub fn postorder(&self) -> &[NodeIdx] {
        &self.postorder
    }

    pub fn preorder(&self) -> &[NodeIdx] {
        &self.preorder
    }

    pub fn node(&self, node_idx: &NodeIdx) -> &Node {
        &self.nodes[usize::from(node_idx)]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn leaves(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.idx, Leaf(_)))
            .collect()
    }

    pub fn internals(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.idx, Int(_)))
            .collect()
    }

    pub fn node_id(&self, node_idx: &NodeIdx) -> usize {
        self.node(node_idx).id
    }

    /// Looks up a node by the integer label it was given in the input.
    pub fn idx(&self, id: usize) -> Result<NodeIdx> {
        match self.ids.get(&id) {
            Some(idx) => Ok(*idx),
            None => bail!("No node with id {} in the tree", id),
        }
    }

    pub fn is_leaf(&self, node_idx: &NodeIdx) -> bool {
        matches!(node_idx, Leaf(_))
    }

    pub fn children(&self, node_idx: &NodeIdx) -> Result<(NodeIdx, NodeIdx)> {
        match self.node(node_idx).children {
            Some(children) => Ok(children),
            None => bail!(StructureError::new(format!(
                "{} (id {}) has no children",
                node_idx,
                self.node_id(node_idx)
            ))),
        }
    }

    pub fn parent(&self, node_idx: &NodeIdx) -> Option<NodeIdx> {
        self.node(node_idx).parent
    }

    /// All (parent, child) pairs, in preorder of the parent.
    pub fn edges(&self) -> Vec<(NodeIdx, NodeIdx)> {
        self.preorder
            .iter()
            .filter_map(|idx| self.node(idx).children.map(|(l, r)| [(*idx, l), (*idx, r)]))
            .flatten()
            .collect()
    }

    pub fn leaf_sequence(&self, node_idx: &NodeIdx) -> Result<&[u8]> {
        match node_idx {
            Leaf(_) => Ok(&self.node(node_idx).seq),
            Int(_) => bail!(StructureError::new(format!(
                "{} (id {}) is not a leaf and has no observed sequence",
                node_idx,
                self.node_id(node_idx)
            ))),
        }
    }

    /// Computed label of an internal node. Fails until the tree has been labelled.
    pub fn internal_sequence(&self, node_idx: &NodeIdx) -> Result<&[u8]> {
        match node_idx {
            Int(_) => {
                if !self.labelled {
                    bail!("Internal sequences have not been computed yet");
                }
                Ok(&self.node(node_idx).seq)
            }
            Leaf(_) => bail!(StructureError::new(format!(
                "{} (id {}) is a leaf and has no computed label",
                node_idx,
                self.node_id(node_idx)
            ))),
        }
    }

    /// Observed sequence for leaves, computed label for internal nodes.
    pub fn sequence(&self, node_idx: &NodeIdx) -> Result<&[u8]> {
        match node_idx {
            Leaf(_) => self.leaf_sequence(node_idx),
            Int(_) => self.internal_sequence(node_idx),
        }
    }

    pub fn set_internal_label(&mut self, node_idx: &NodeIdx, site: usize, symbol: u8) -> Result<()> {
        if self.is_leaf(node_idx) {
            bail!(StructureError::new(format!(
                "Cannot relabel {} (id {}), leaf sequences are fixed",
                node_idx,
                self.node_id(node_idx)
            )));
        }
        if site >= self.seq_len {
            bail!(InputError::new(format!(
                "Site {} is out of range for sequences of length {}",
                site, self.seq_len
            )));
        }
        let Some(symbol_idx) = self.alphabet.index_of(symbol) else {
            bail!(InputError::new(format!(
                "Symbol {} is not in the {}",
                symbol as char, self.alphabet
            )));
        };
        let symbol = self.alphabet.symbol(symbol_idx);
        self.nodes[usize::from(node_idx)].seq[site] = symbol;
        Ok(())
    }

    pub fn is_labelled(&self) -> bool {
        self.labelled
    }

    pub(crate) fn set_labelled(&mut self) {
        self.labelled = true;
    }
}
