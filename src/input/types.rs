use serde::Deserialize;

/// Raw tree record as it appears in the JSON input, before arena construction.
///
/// ```json
/// {"name": "D", "children": [{"name": "E", "size": 382}, {"name": "F", "size": 1032}]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawTreeNode {
    /// Label shown in the treemap
    pub name: String,
    /// Leaf weight. Ignored when the node has children.
    #[serde(default)]
    pub size: Option<f64>,
    /// Child records in slicing order
    #[serde(default)]
    pub children: Vec<RawTreeNode>,
}
