pub mod aggregate;
pub mod arena;

/// Capability set the layout engine needs from a tree node.
///
/// Implementors are cheap `Copy` handles (a reference or an arena index plus
/// the arena), so the engine can walk the tree without owning it. Any data
/// shape maps into the engine by implementing this trait on such a handle.
///
/// The tree must be finite and acyclic; the engine does not check.
pub trait TreeMapper: Copy {
    /// Label for this node. Unique among its siblings.
    fn identity(&self) -> &str;

    /// Intrinsic weight as supplied by the data. Only used for leaves.
    fn weight(&self) -> f64;

    /// Children in slicing order. Empty for leaves.
    fn descendants(&self) -> impl Iterator<Item = Self>;

    /// Sum of leaf weights beneath this node (the node itself for a leaf).
    ///
    /// The default recomputes the aggregate on every call; representations
    /// that cache totals should override it with the cached value.
    fn total_weight(&self) -> f64 {
        aggregate::subtree_weight(*self)
    }
}
