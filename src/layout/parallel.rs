use compact_str::CompactString;
use rayon::prelude::*;

use super::bands::BandCursor;
use super::{Layout, LayoutConfig, LayoutRect, Orientation, Rect};
use crate::render::colors::slice_color;
use crate::tree::TreeMapper;

/// Same layout as `compute_layout`, with sibling subtrees laid out on the rayon pool.
///
/// Each node first places all of its children in one sequential band pass
/// (the running offset is a prefix sum), after which the children's
/// subtrees are independent. Results are concatenated in sibling order, so
/// the output matches the sequential engine exactly.
pub fn compute_layout_parallel<N>(root: N, config: &LayoutConfig) -> Layout
where
    N: TreeMapper + Send + Sync,
{
    let canvas = config.canvas();
    let rects = layout_subtree(
        root,
        canvas,
        config.start_orientation(),
        0,
        config.max_depth,
    );

    tracing::info!(
        "Parallel layout computed: {} rectangles on {}x{} canvas ({} threads)",
        rects.len(),
        config.width,
        config.height,
        rayon::current_num_threads()
    );

    Layout { canvas, rects }
}

fn layout_subtree<N>(
    node: N,
    rect: Rect,
    orientation: Orientation,
    depth: u16,
    max_depth: u16,
) -> Vec<LayoutRect>
where
    N: TreeMapper + Send + Sync,
{
    if max_depth != 0 && depth >= max_depth {
        return Vec::new();
    }

    let parent_weight = node.total_weight();
    let next = orientation.flip();
    let child_depth = depth.saturating_add(1);

    // Prefix pass: every child's band is fixed before any subtree is visited.
    let mut cursor = BandCursor::new(parent_weight, orientation.band_length(&rect));
    let placed: Vec<(N, LayoutRect)> = node
        .descendants()
        .map(|child| {
            let weight = child.total_weight();
            let band = cursor.next_band(weight);
            let placement = LayoutRect {
                identity: CompactString::new(child.identity()),
                rect: rect.band(orientation, band.start, band.end),
                color: slice_color(parent_weight, band.proportion),
                depth: child_depth,
                orientation: next,
                weight,
            };
            (child, placement)
        })
        .collect();

    let subtrees: Vec<Vec<LayoutRect>> = placed
        .into_par_iter()
        .map(|(child, placement)| {
            let child_rect = placement.rect;
            let mut out = vec![placement];
            out.extend(layout_subtree(child, child_rect, next, child_depth, max_depth));
            out
        })
        .collect();

    subtrees.into_iter().flatten().collect()
}
