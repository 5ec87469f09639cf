use compact_str::CompactString;

use super::bands::BandCursor;
use super::{LayoutRect, Orientation, Rect};
use crate::render::colors::slice_color;
use crate::tree::TreeMapper;

/// Slice-and-dice one node: cut `rect` into one band per child along
/// `orientation`, emit each child's placement, then recurse into the child
/// with the orientation flipped.
///
/// `node` itself is never emitted; its rectangle belongs to the caller.
/// When `max_depth != 0 && depth >= max_depth` nothing is emitted.
pub fn layout_children<N, F>(
    node: N,
    rect: Rect,
    orientation: Orientation,
    depth: u16,
    max_depth: u16,
    emit: &mut F,
) where
    N: TreeMapper,
    F: FnMut(LayoutRect),
{
    if max_depth != 0 && depth >= max_depth {
        return;
    }

    let parent_weight = node.total_weight();
    let next = orientation.flip();
    let child_depth = depth.saturating_add(1);

    if depth == 0 {
        tracing::debug!(
            "Laying out {} children of root '{}' (weight={}) in {}x{} area, {}",
            node.descendants().count(),
            node.identity(),
            parent_weight,
            rect.dx(),
            rect.dy(),
            orientation
        );
    }

    let mut cursor = BandCursor::new(parent_weight, orientation.band_length(&rect));
    for child in node.descendants() {
        let weight = child.total_weight();
        let band = cursor.next_band(weight);
        let child_rect = rect.band(orientation, band.start, band.end);

        emit(LayoutRect {
            identity: CompactString::new(child.identity()),
            rect: child_rect,
            color: slice_color(parent_weight, band.proportion),
            depth: child_depth,
            orientation: next,
            weight,
        });

        layout_children(child, child_rect, next, child_depth, max_depth, emit);
    }
}
