use compact_str::CompactString;

use super::aggregate;
use super::TreeMapper;

/// Index into the arena `Vec<WeightNode>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the weight tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child`, `last_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct WeightNode {
    /// Label shown in the treemap (unique among siblings, not globally)
    pub name: CompactString,
    /// Intrinsic weight as supplied by the input. Only meaningful for leaves.
    pub weight: f64,
    /// Aggregated weight, written only by `aggregate::aggregate_weights`
    pub(crate) total: f64,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// First child node index (None for leaves)
    pub first_child: Option<NodeId>,
    /// Last child node index, kept so appends preserve insertion order
    pub last_child: Option<NodeId>,
    /// Next sibling node index (None if last child)
    pub next_sibling: Option<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u16,
}

impl WeightNode {
    fn new(name: &str, weight: f64) -> Self {
        Self {
            name: CompactString::new(name),
            weight,
            total: weight,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Sum of leaf weights beneath this node (its own weight for a leaf).
    pub fn total(&self) -> f64 {
        self.total
    }
}

/// The weight tree stored as a flat arena of nodes.
///
/// Only `WeightTreeBuilder::finish` produces one, so every cached total is
/// already aggregated when the layout engine reads it.
#[derive(Debug, Clone)]
pub struct WeightTree {
    /// All nodes in contiguous memory
    pub(crate) nodes: Vec<WeightNode>,
    /// Root node index
    root: NodeId,
}

impl WeightTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &WeightNode {
        &self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node, in insertion order.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// Handle to the root node, the entry point for layout.
    pub fn root_ref(&self) -> NodeRef<'_> {
        self.node_ref(self.root)
    }

    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }
}

/// Grows a weight tree node by node; `finish` aggregates the totals.
#[derive(Debug, Clone)]
pub struct WeightTreeBuilder {
    tree: WeightTree,
}

impl WeightTreeBuilder {
    /// Start a tree holding only a root node.
    pub fn new(root_name: &str, root_weight: f64) -> Self {
        Self {
            tree: WeightTree {
                nodes: vec![WeightNode::new(root_name, root_weight)],
                root: NodeId(0),
            },
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Append a child under the given parent. Returns the new node's ID.
    ///
    /// Children keep their insertion order, which is the order bands are cut in.
    pub fn add_child(&mut self, parent: NodeId, name: &str, weight: f64) -> NodeId {
        let nodes = &mut self.tree.nodes;
        let new_id = NodeId(nodes.len() as u32);
        let mut node = WeightNode::new(name, weight);
        node.parent = Some(parent);
        node.depth = nodes[parent.index()].depth.saturating_add(1);

        match nodes[parent.index()].last_child {
            Some(last) => nodes[last.index()].next_sibling = Some(new_id),
            None => nodes[parent.index()].first_child = Some(new_id),
        }
        nodes[parent.index()].last_child = Some(new_id);

        nodes.push(node);
        new_id
    }

    /// Aggregate weights bottom-up and hand out the finished tree.
    pub fn finish(mut self) -> WeightTree {
        aggregate::aggregate_weights(&mut self.tree);
        self.tree
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a WeightTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

/// Borrowed handle to one arena node; this is what the layout engine walks.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a WeightTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn node(&self) -> &'a WeightNode {
        self.tree.get(self.id)
    }
}

impl<'a> TreeMapper for NodeRef<'a> {
    fn identity(&self) -> &str {
        &self.node().name
    }

    fn weight(&self) -> f64 {
        self.node().weight
    }

    fn descendants(&self) -> impl Iterator<Item = Self> {
        let tree = self.tree;
        tree.children(self.id).map(move |id| NodeRef { tree, id })
    }

    /// Totals are cached on the arena by `WeightTreeBuilder::finish`.
    fn total_weight(&self) -> f64 {
        self.node().total
    }
}
