/// Diagnostic tool to verify the input → layout pipeline on a real tree
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use slicemap::input;
use slicemap::layout::{
    compute_layout, compute_layout_parallel, LayoutConfig, LayoutRect, Orientation, Rect,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slicemap=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: debug-layout <tree.json> [width] [height] [max-depth]");
    };
    let mut config = LayoutConfig::default();
    if let Some(w) = args.next() {
        config.width = w.parse().context("parsing width")?;
    }
    if let Some(h) = args.next() {
        config.height = h.parse().context("parsing height")?;
    }
    if let Some(d) = args.next() {
        config.max_depth = d.parse().context("parsing max depth")?;
    }
    config.validate()?;

    println!("=== DIAGNOSTIC: Input → Layout Pipeline ===");
    println!("Loading: {}", path.display());

    let tree = input::load_tree(&path)?;
    let root = tree.get(tree.root());
    println!("\n[1] Tree built: {} nodes", tree.len());
    println!("    Root: '{}' (weight={})", root.name, root.total());

    let started = Instant::now();
    let layout = compute_layout(tree.root_ref(), &config);
    let sequential_time = started.elapsed();
    println!(
        "\n[2] Layout computed: {} rectangles in {:?} ({}x{}, start {})",
        layout.rects.len(),
        sequential_time,
        config.width,
        config.height,
        config.start_orientation()
    );

    let started = Instant::now();
    let parallel = compute_layout_parallel(tree.root_ref(), &config);
    println!(
        "    Parallel layout: {} rectangles in {:?}, identical={}",
        parallel.rects.len(),
        started.elapsed(),
        parallel == layout
    );

    println!("\n[3] Top 10 largest rectangles by area:");
    let mut sorted: Vec<&LayoutRect> = layout.rects.iter().collect();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.rect.area()));
    for (i, r) in sorted.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - {}x{} at ({}, {}) depth={} weight={} {}",
            i,
            r.identity,
            r.rect.dx(),
            r.rect.dy(),
            r.rect.x0,
            r.rect.y0,
            r.depth,
            r.weight,
            r.color
        );
    }

    println!("\n[4] Checking invariants:");
    let report = check_invariants(layout.canvas, &layout.rects);
    println!("    Containment violations:  {}", report.escaped);
    println!("    Sibling overlaps:        {}", report.overlapping);
    println!("    Gaps in sibling bands:   {}", report.gaps);
    let level_one: i64 = layout
        .rects
        .iter()
        .filter(|r| r.depth == 1)
        .map(|r| r.rect.area())
        .sum();
    println!(
        "    Depth-1 coverage: {:.1}%",
        level_one as f64 / layout.canvas.area().max(1) as f64 * 100.0
    );

    let zero_area = layout.rects.iter().filter(|r| r.rect.area() == 0).count();
    println!("    Zero-area rectangles:    {}", zero_area);

    Ok(())
}

#[derive(Debug, Default)]
struct InvariantReport {
    escaped: usize,
    overlapping: usize,
    gaps: usize,
}

/// Walk the pre-order placement list with a depth stack to recover parents,
/// then check containment, sibling disjointness and band contiguity.
fn check_invariants(canvas: Rect, rects: &[LayoutRect]) -> InvariantReport {
    let mut report = InvariantReport::default();
    // (parent rect, previous sibling rect) per open depth level; index 0 is the root.
    let mut stack: Vec<(Rect, Option<Rect>)> = vec![(canvas, None)];

    for r in rects {
        stack.truncate(r.depth as usize);
        let Some((parent, previous)) = stack.last_mut() else {
            continue;
        };
        if !parent.contains(&r.rect) {
            report.escaped += 1;
        }
        if let Some(prev) = previous {
            if prev.overlaps(&r.rect) {
                report.overlapping += 1;
            }
            if !follows_band(prev, r) {
                report.gaps += 1;
            }
        }
        *previous = Some(r.rect);
        stack.push((r.rect, None));
    }

    report
}

/// The parent cut its area along the opposite of `r.orientation`, so only
/// that axis's edge has to line up with the previous sibling.
fn follows_band(prev: &Rect, r: &LayoutRect) -> bool {
    match r.orientation.flip() {
        Orientation::Horizontal => prev.y1 == r.rect.y0,
        Orientation::Vertical => prev.x1 == r.rect.x0,
    }
}
