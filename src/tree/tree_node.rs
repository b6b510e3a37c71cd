use std::fmt::{Debug, Display};

use crate::tree::NodeIdx::{self, Internal as Int, Leaf};

#[derive(Clone, PartialEq)]
pub struct Node {
    pub idx: NodeIdx,
    /// Integer label the node was given in the input.
    pub id: usize,
    pub parent: Option<NodeIdx>,
    pub children: Option<(NodeIdx, NodeIdx)>,
    /// Observed sequence for leaves, label buffer for internal nodes.
    pub(crate) seq: Vec<u8>,
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with id {}", self.idx, self.id)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "({}) {:?}, parent: {:?}, children: {:?}, seq: {}",
            self.id,
            self.idx,
            self.parent,
            self.children,
            String::from_utf8_lossy(&self.seq),
        )
    }
}

impl Node {
    pub(crate) fn new_leaf(idx: usize, id: usize, seq: Vec<u8>) -> Self {
        Self {
            idx: Leaf(idx),
            id,
            parent: None,
            children: None,
            seq,
        }
    }

    pub(crate) fn new_internal(
        idx: usize,
        id: usize,
        children: (NodeIdx, NodeIdx),
        seq_len: usize,
    ) -> Self {
        Self {
            idx: Int(idx),
            id,
            parent: None,
            children: Some(children),
            seq: vec![super::UNRESOLVED; seq_len],
        }
    }

    pub(crate) fn add_parent(&mut self, parent_idx: &NodeIdx) {
        debug_assert!(matches!(parent_idx, Int(_)));
        self.parent = Some(*parent_idx);
    }
}
