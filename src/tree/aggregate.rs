use super::arena::WeightTree;
use super::TreeMapper;

/// Total weight represented by `node`: its intrinsic weight for a leaf,
/// otherwise the sum of its children's totals. Declared weights on internal
/// nodes are ignored.
pub fn subtree_weight<N: TreeMapper>(node: N) -> f64 {
    let mut children = node.descendants().peekable();
    if children.peek().is_none() {
        return node.weight();
    }
    children.fold(0.0, |sum, child| sum + child.total_weight())
}

/// Compute aggregated weights for all nodes (bottom-up).
/// After this, each node's `total` equals the sum of all descendant leaf weights.
pub(crate) fn aggregate_weights(tree: &mut WeightTree) {
    // Process nodes in reverse order (children before parents) since
    // children always have higher indices than their parents in our arena.
    // This is guaranteed by the builder's append-only insertion.
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        let Some(first_child) = tree.nodes[i].first_child else {
            tree.nodes[i].total = tree.nodes[i].weight;
            continue;
        };

        // Sum direct children in insertion order, same as `subtree_weight`
        let mut total = 0.0;
        let mut child = Some(first_child);
        while let Some(child_id) = child {
            total += tree.nodes[child_id.index()].total;
            child = tree.nodes[child_id.index()].next_sibling;
        }
        tree.nodes[i].total = total;
    }
}
