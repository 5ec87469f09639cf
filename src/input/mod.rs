pub mod types;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use compact_str::CompactString;

use self::types::RawTreeNode;
use crate::tree::arena::{NodeId, WeightTree, WeightTreeBuilder};

/// Load a weight tree from a JSON file.
pub fn load_tree(path: &Path) -> Result<WeightTree> {
    let file =
        File::open(path).with_context(|| format!("opening input file {}", path.display()))?;
    read_tree(BufReader::new(file)).with_context(|| format!("reading tree from {}", path.display()))
}

/// Parse a JSON tree and build the aggregated arena from it.
pub fn read_tree<R: Read>(reader: R) -> Result<WeightTree> {
    let raw: RawTreeNode = serde_json::from_reader(reader).context("decoding tree JSON")?;
    build_tree(&raw)
}

/// Build a WeightTree from a parsed record, then aggregate weights bottom-up.
///
/// Leaf sizes must be finite and non-negative. Internal nodes' sizes are dropped.
pub fn build_tree(raw: &RawTreeNode) -> Result<WeightTree> {
    let mut builder = WeightTreeBuilder::new(&raw.name, leaf_weight(raw, &raw.name)?);

    let mut stack: Vec<(&RawTreeNode, NodeId, CompactString)> =
        vec![(raw, builder.root(), CompactString::new(&raw.name))];
    while let Some((record, parent, path)) = stack.pop() {
        let mut seen = HashSet::with_capacity(record.children.len());
        let mut pending = Vec::with_capacity(record.children.len());
        for child in &record.children {
            let child_path = CompactString::new(format!("{}/{}", path, child.name));
            if !seen.insert(child.name.as_str()) {
                tracing::warn!("Duplicate sibling name '{}' under '{}'", child.name, path);
            }
            let id = builder.add_child(parent, &child.name, leaf_weight(child, &child_path)?);
            pending.push((child, id, child_path));
        }
        // Push in reverse so siblings are visited in input order.
        stack.extend(pending.into_iter().rev());
    }

    let tree = builder.finish();

    let root = tree.get(tree.root());
    tracing::info!(
        "Tree built: {} nodes, {} direct children of root '{}', total weight {}",
        tree.len(),
        tree.children(tree.root()).count(),
        root.name,
        root.total()
    );

    Ok(tree)
}

fn leaf_weight(record: &RawTreeNode, path: &str) -> Result<f64> {
    if !record.children.is_empty() {
        if record.size.is_some() {
            tracing::debug!("Ignoring declared size of internal node '{}'", path);
        }
        return Ok(0.0);
    }
    let size = record.size.unwrap_or(0.0);
    if !size.is_finite() || size < 0.0 {
        bail!("node '{}' has invalid size {}", path, size);
    }
    Ok(size)
}
