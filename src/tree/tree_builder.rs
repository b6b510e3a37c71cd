use std::collections::BTreeMap;

use anyhow::bail;
use hashbrown::HashMap;
use log::{debug, info};

use crate::alphabets::Alphabet;
use crate::errors::{InputError, StructureError};
use crate::tree::{
    Node,
    NodeIdx::{self, Internal as Int, Leaf},
    Tree,
};
use crate::Result;

/// Collects edges and leaf sequences and turns them into a validated [`Tree`].
///
/// # Example
/// ```
/// use small_parsimony::alphabets::dna_alphabet;
/// use small_parsimony::tree::TreeBuilder;
/// let tree = TreeBuilder::new(2)
///     .leaf(0, b"CAAATCCC")
///     .leaf(1, b"ATGGACGA")
///     .edge(2, 0)
///     .edge(2, 1)
///     .build(&dna_alphabet())
///     .unwrap();
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.node_id(&tree.root()), 2);
/// assert_eq!(tree.sequence_length(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    leaf_count: usize,
    edges: Vec<(usize, usize)>,
    leaves: Vec<(usize, Vec<u8>)>,
}

impl TreeBuilder {
    /// Starts a tree with the declared number of leaves.
    pub fn new(leaf_count: usize) -> TreeBuilder {
        TreeBuilder {
            leaf_count,
            edges: Vec::new(),
            leaves: Vec::new(),
        }
    }

    pub fn edge(mut self, parent: usize, child: usize) -> TreeBuilder {
        self.add_edge(parent, child);
        self
    }

    pub fn leaf(mut self, id: usize, seq: &[u8]) -> TreeBuilder {
        self.add_leaf(id, seq);
        self
    }

    pub fn add_edge(&mut self, parent: usize, child: usize) {
        self.edges.push((parent, child));
    }

    pub fn add_leaf(&mut self, id: usize, seq: &[u8]) {
        self.leaves.push((id, seq.to_vec()));
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Validates the input and builds the tree with its traversal orders.
    /// Bails with an `InputError` on bad sequences and a `StructureError` on bad topology.
    pub fn build(self, alphabet: &Alphabet) -> Result<Tree> {
        info!(
            "Building tree from {} edges and {} leaf sequences",
            self.edges.len(),
            self.leaves.len()
        );
        let (sequences, seq_len) = self.validate_sequences(alphabet)?;
        let (children, parents) = self.collect_edges()?;

        let mut ids: Vec<usize> = sequences
            .keys()
            .chain(children.keys())
            .chain(parents.keys())
            .copied()
            .collect();
        ids.sort();
        ids.dedup();

        let root_id = find_root(&ids, &parents)?;

        let mut idx_by_id = HashMap::with_capacity(ids.len());
        for (pos, &id) in ids.iter().enumerate() {
            let node_idx = match (sequences.contains_key(&id), children.get(&id)) {
                (true, None) => Leaf(pos),
                (true, Some(_)) => bail!(StructureError::new(format!(
                    "Node {id} has an observed sequence but also has children"
                ))),
                (false, Some(c)) if c.len() == 2 => Int(pos),
                (false, Some(c)) => bail!(StructureError::new(format!(
                    "Internal node {id} has {} children, expected 2",
                    c.len()
                ))),
                (false, None) => bail!(InputError::new(format!(
                    "Node {id} has no children and no sequence"
                ))),
            };
            idx_by_id.insert(id, node_idx);
        }

        let mut nodes = Vec::with_capacity(ids.len());
        for &id in &ids {
            let node = match idx_by_id[&id] {
                Leaf(pos) => Node::new_leaf(pos, id, sequences[&id].clone()),
                Int(pos) => {
                    let c = &children[&id];
                    Node::new_internal(pos, id, (idx_by_id[&c[0]], idx_by_id[&c[1]]), seq_len)
                }
            };
            nodes.push(node);
        }
        for (child, parent) in &parents {
            nodes[usize::from(idx_by_id[child])].add_parent(&idx_by_id[parent]);
        }

        let root = idx_by_id[&root_id];
        let preorder = traverse(&nodes, root)?;
        let mut postorder = postorder_from(&nodes, root);
        postorder.shrink_to_fit();

        let n = sequences.len();
        info!(
            "Built tree with {} leaves and {} internal nodes, rooted at node {}",
            n,
            nodes.len() - n,
            root_id
        );
        Ok(Tree {
            root,
            nodes,
            postorder,
            preorder,
            ids: idx_by_id,
            alphabet: *alphabet,
            seq_len,
            labelled: false,
            n,
        })
    }

    fn validate_sequences(&self, alphabet: &Alphabet) -> Result<(BTreeMap<usize, Vec<u8>>, usize)> {
        if self.leaves.is_empty() {
            bail!(InputError::new("No leaf sequences provided"));
        }
        if self.leaves.len() != self.leaf_count {
            bail!(InputError::new(format!(
                "Expected {} leaves, but {} leaf sequences were provided",
                self.leaf_count,
                self.leaves.len()
            )));
        }
        let seq_len = self.leaves[0].1.len();
        if seq_len == 0 {
            bail!(InputError::new("Leaf sequences must not be empty"));
        }

        let mut sequences = BTreeMap::new();
        for (id, seq) in &self.leaves {
            if seq.len() != seq_len {
                bail!(InputError::new(format!(
                    "Leaf {} has a sequence of length {}, expected {}",
                    id,
                    seq.len(),
                    seq_len
                )));
            }
            if let Some(&c) = seq.iter().find(|&&c| !alphabet.contains(c)) {
                bail!(InputError::new(format!(
                    "Leaf {} contains symbol '{}' which is not in the {}",
                    id, c as char, alphabet
                )));
            }
            if sequences.insert(*id, seq.to_ascii_uppercase()).is_some() {
                bail!(InputError::new(format!("Leaf {} has more than one sequence", id)));
            }
        }
        debug!("All {} leaf sequences have length {}", sequences.len(), seq_len);
        Ok((sequences, seq_len))
    }

    #[allow(clippy::type_complexity)]
    fn collect_edges(&self) -> Result<(BTreeMap<usize, Vec<usize>>, BTreeMap<usize, usize>)> {
        let mut children: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut parents: BTreeMap<usize, usize> = BTreeMap::new();
        for &(parent, child) in &self.edges {
            if parent == child {
                bail!(StructureError::new(format!("Node {parent} is its own child")));
            }
            if let Some(other) = parents.insert(child, parent) {
                bail!(StructureError::new(format!(
                    "Node {child} has more than one parent: {other} and {parent}"
                )));
            }
            children.entry(parent).or_default().push(child);
        }
        Ok((children, parents))
    }
}

/// The root is the unique node that is nobody's child.
fn find_root(ids: &[usize], parents: &BTreeMap<usize, usize>) -> Result<usize> {
    let roots: Vec<usize> = ids
        .iter()
        .copied()
        .filter(|id| !parents.contains_key(id))
        .collect();
    match roots.as_slice() {
        [root] => Ok(*root),
        [] => bail!(StructureError::new("No root found, every node has a parent")),
        _ => bail!(StructureError::new(format!(
            "Found {} nodes without a parent: {:?}",
            roots.len(),
            roots
        ))),
    }
}

/// Iterative preorder from the root. Fails on revisits and on nodes the root cannot reach.
fn traverse(nodes: &[Node], root: NodeIdx) -> Result<Vec<NodeIdx>> {
    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::<NodeIdx>::with_capacity(nodes.len());
    let mut stack = vec![root];
    while let Some(node_idx) = stack.pop() {
        let pos = usize::from(node_idx);
        if visited[pos] {
            bail!(StructureError::new(format!(
                "Cycle detected, node {} is reachable twice",
                nodes[pos].id
            )));
        }
        visited[pos] = true;
        order.push(node_idx);
        if let Some((left, right)) = nodes[pos].children {
            stack.push(right);
            stack.push(left);
        }
    }
    if order.len() != nodes.len() {
        let unreachable: Vec<usize> = nodes
            .iter()
            .filter(|node| !visited[usize::from(node.idx)])
            .map(|node| node.id)
            .collect();
        bail!(StructureError::new(format!(
            "Nodes {:?} cannot be reached from the root, the tree is disconnected or cyclic",
            unreachable
        )));
    }
    Ok(order)
}

fn postorder_from(nodes: &[Node], root: NodeIdx) -> Vec<NodeIdx> {
    let mut order = Vec::<NodeIdx>::with_capacity(nodes.len());
    let mut stack = vec![root];
    while let Some(node_idx) = stack.pop() {
        order.push(node_idx);
        if let Some((left, right)) = nodes[usize::from(node_idx)].children {
            stack.push(left);
            stack.push(right);
        }
    }
    order.reverse();
    order
}
