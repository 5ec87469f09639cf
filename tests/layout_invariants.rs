//! Property-based invariant tests for the slice-and-dice layout.
//!
//! For random trees and canvases:
//!
//! 1. Every placement lies inside its parent's rectangle.
//! 2. Siblings never overlap (touching edges allowed).
//! 3. Sibling bands tile the parent's band length exactly when the parent has weight,
//!    and each band's edges sit at the rounded cumulative weight share.
//! 4. Orientation flips at every level.
//! 5. A depth limit caps the emitted depths.
//! 6. Layout is idempotent, and the parallel engine matches the sequential one.

use proptest::prelude::*;
use slicemap::layout::{compute_layout, compute_layout_parallel, Layout, LayoutConfig, Orientation, Rect};
use slicemap::tree::arena::{NodeId, WeightTree, WeightTreeBuilder};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Node `i` (for i >= 1) hangs under `parent_pick % i`, so any pick list is a valid tree.
fn build_tree(nodes: &[(usize, u16)]) -> WeightTree {
    let mut builder = WeightTreeBuilder::new("root", 0.0);
    for (i, &(parent_pick, weight)) in nodes.iter().enumerate() {
        let parent = NodeId((parent_pick % (i + 1)) as u32);
        builder.add_child(parent, &format!("n{}", i + 1), weight as f64);
    }
    builder.finish()
}

/// Offset along the parent's band where the cumulative weight `consumed` ends.
fn expected_edge(consumed: f64, parent_weight: f64, band_len: i32) -> i32 {
    let ideal = consumed / parent_weight * band_len as f64;
    ((ideal + 0.5).floor() as i32).clamp(0, band_len)
}

fn tree_strategy() -> impl Strategy<Value = Vec<(usize, u16)>> {
    prop::collection::vec((any::<usize>(), 0u16..=1000), 0..60)
}

fn config_strategy() -> impl Strategy<Value = LayoutConfig> {
    (
        0u32..=1200,
        0u32..=1200,
        0u16..=4,
        prop_oneof![
            Just(None),
            Just(Some(Orientation::Horizontal)),
            Just(Some(Orientation::Vertical)),
        ],
    )
        .prop_map(|(width, height, max_depth, orientation)| LayoutConfig {
            width,
            height,
            max_depth,
            orientation,
        })
}

/// Parent context recovered from the pre-order placement list.
#[derive(Debug, Clone, Copy)]
struct Frame {
    rect: Rect,
    orientation: Orientation,
    weight: f64,
    consumed_weight: f64,
    covered: i32,
    previous: Option<Rect>,
}

impl Frame {
    fn new(rect: Rect, orientation: Orientation, weight: f64) -> Self {
        Self {
            rect,
            orientation,
            weight,
            consumed_weight: 0.0,
            covered: 0,
            previous: None,
        }
    }
}

/// Check invariants 1-4 over a whole layout, returning a description of the first failure.
fn check_layout(layout: &Layout, root_weight: f64, start: Orientation) -> Result<(), String> {
    let mut stack = vec![Frame::new(layout.canvas, start, root_weight)];
    let mut closed: Vec<Frame> = Vec::new();

    for r in &layout.rects {
        let depth = r.depth as usize;
        if depth == 0 || depth > stack.len() {
            return Err(format!("placement {} has unexpected depth {}", r.identity, r.depth));
        }
        while stack.len() > depth {
            closed.extend(stack.pop());
        }
        let parent = stack.last_mut().ok_or("empty stack")?;

        if !parent.rect.contains(&r.rect) {
            return Err(format!("{} {:?} escapes parent {:?}", r.identity, r.rect, parent.rect));
        }
        if let Some(prev) = parent.previous {
            if prev.overlaps(&r.rect) {
                return Err(format!("{} {:?} overlaps sibling {:?}", r.identity, r.rect, prev));
            }
        }
        if r.orientation != parent.orientation.flip() {
            return Err(format!("{} did not flip orientation", r.identity));
        }
        let band_len = parent.orientation.band_length(&parent.rect);
        let (start, end) = match parent.orientation {
            Orientation::Horizontal => (r.rect.y0 - parent.rect.y0, r.rect.y1 - parent.rect.y0),
            Orientation::Vertical => (r.rect.x0 - parent.rect.x0, r.rect.x1 - parent.rect.x0),
        };
        let expected = if parent.weight > 0.0 {
            (
                expected_edge(parent.consumed_weight, parent.weight, band_len),
                expected_edge(parent.consumed_weight + r.weight, parent.weight, band_len),
            )
        } else {
            (0, 0)
        };
        if (start, end) != expected {
            return Err(format!(
                "{} spans {}..{} of {}, expected {}..{} for weight {} of {}",
                r.identity, start, end, band_len, expected.0, expected.1, r.weight, parent.weight
            ));
        }
        parent.consumed_weight += r.weight;
        parent.covered += parent.orientation.band_length(&r.rect);
        parent.previous = Some(r.rect);

        stack.push(Frame::new(r.rect, r.orientation, r.weight));
    }
    closed.extend(stack);

    for frame in closed {
        let full = frame.orientation.band_length(&frame.rect);
        if frame.previous.is_some() && frame.weight > 0.0 && frame.covered != full {
            return Err(format!(
                "children of {:?} cover {} of band length {}",
                frame.rect, frame.covered, full
            ));
        }
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Containment, disjointness, exact tiling, orientation alternation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn structural_invariants_hold(nodes in tree_strategy(), config in config_strategy()) {
        let tree = build_tree(&nodes);
        let layout = compute_layout(tree.root_ref(), &config);
        let root_weight = tree.get(tree.root()).total();
        let result = check_layout(&layout, root_weight, config.start_orientation());
        prop_assert!(result.is_ok(), "{:?}", result);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Depth limiting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn depth_limit_caps_emitted_depth(nodes in tree_strategy(), max_depth in 1u16..=3) {
        let tree = build_tree(&nodes);
        let config = LayoutConfig { max_depth, ..LayoutConfig::default() };
        let layout = compute_layout(tree.root_ref(), &config);
        prop_assert!(layout.rects.iter().all(|r| r.depth <= max_depth));

        let unlimited = compute_layout(tree.root_ref(), &LayoutConfig::default());
        let expected = unlimited.rects.iter().filter(|r| r.depth <= max_depth).count();
        prop_assert_eq!(layout.rects.len(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Idempotence and parallel equivalence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(nodes in tree_strategy(), config in config_strategy()) {
        let tree = build_tree(&nodes);
        let first = compute_layout(tree.root_ref(), &config);
        let second = compute_layout(tree.root_ref(), &config);
        prop_assert_eq!(&first, &second);

        let parallel = compute_layout_parallel(tree.root_ref(), &config);
        prop_assert_eq!(&first, &parallel);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Fixed examples
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn reference_tree_on_default_canvas() {
    let tree = slicemap::input::read_tree(
        r#"{"name": "A", "children": [
            {"name": "B", "size": 2813},
            {"name": "C", "size": 813},
            {"name": "D", "children": [{"name": "E", "size": 382}, {"name": "F", "size": 1032}]}
        ]}"#
        .as_bytes(),
    )
    .unwrap();
    let config = LayoutConfig::default();
    let layout = compute_layout(tree.root_ref(), &config);

    let widths: Vec<i32> = layout.rects.iter().filter(|r| r.depth == 1).map(|r| r.rect.dx()).collect();
    assert_eq!(widths.iter().sum::<i32>(), 800);
    // B ends at round(2813/5040*800) = 447, B+C at round(3626/5040*800) = 576.
    assert_eq!(widths, [447, 129, 224]);
    assert!(check_layout(&layout, 5040.0, Orientation::Vertical).is_ok());
}

#[test]
fn misplaced_band_fails_share_check() {
    let tree = slicemap::input::read_tree(
        r#"{"name": "A", "children": [
            {"name": "B", "size": 1},
            {"name": "C", "size": 3}
        ]}"#
        .as_bytes(),
    )
    .unwrap();
    let mut layout = compute_layout(tree.root_ref(), &LayoutConfig::default());
    assert!(check_layout(&layout, 4.0, Orientation::Vertical).is_ok());

    // Move the B/C cut from 200 to 400: still contained, disjoint and tiling.
    layout.rects[0].rect = Rect::new(0, 0, 400, 600);
    layout.rects[1].rect = Rect::new(400, 0, 800, 600);
    let err = check_layout(&layout, 4.0, Orientation::Vertical).unwrap_err();
    assert!(err.contains("expected 0..200"), "{err}");
}

#[test]
fn demo_tree_renders_with_invariants() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample.json");
    let tree = slicemap::input::load_tree(std::path::Path::new(path)).unwrap();
    let root_weight = tree.get(tree.root()).total();
    assert!(root_weight > 0.0);

    for (width, height) in [(800, 600), (600, 800), (1, 1), (997, 13)] {
        let config = LayoutConfig { width, height, ..LayoutConfig::default() };
        let layout = compute_layout(tree.root_ref(), &config);
        assert_eq!(layout.rects.len(), tree.len() - 1);
        let result = check_layout(&layout, root_weight, config.start_orientation());
        assert!(result.is_ok(), "{width}x{height}: {result:?}");
    }

    let mut svg = Vec::new();
    let drawn = slicemap::render::write_treemap(&mut svg, tree.root_ref(), &LayoutConfig::default()).unwrap();
    assert_eq!(drawn, tree.len() - 1);
}
