pub mod bands;
pub mod parallel;
pub mod slice;

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use compact_str::CompactString;

use crate::render::colors::Rgb;
use crate::tree::TreeMapper;

pub use parallel::compute_layout_parallel;
pub use slice::layout_children;

/// Axis-aligned rectangle with integer corners `(x0, y0)-(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// Build a rectangle, normalizing the corners so `x0 <= x1` and `y0 <= y1`.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn dx(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn dy(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> i64 {
        self.dx() as i64 * self.dy() as i64
    }

    /// Whether `other` lies entirely within `self` (shared edges allowed).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Whether the two rectangles share a positive-area region. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x0.max(other.x0) < self.x1.min(other.x1)
            && self.y0.max(other.y0) < self.y1.min(other.y1)
    }

    /// Sub-rectangle spanning `[start, end]` along the banding axis of `orientation`,
    /// keeping this rectangle's bounds on the other axis.
    pub fn band(&self, orientation: Orientation, start: i32, end: i32) -> Rect {
        match orientation {
            Orientation::Horizontal => Rect {
                x0: self.x0,
                y0: self.y0 + start,
                x1: self.x1,
                y1: self.y0 + end,
            },
            Orientation::Vertical => Rect {
                x0: self.x0 + start,
                y0: self.y0,
                x1: self.x0 + end,
                y1: self.y1,
            },
        }
    }
}

/// Which axis the current level's children are banded along.
///
/// `Horizontal` stacks bands along Y (each band spans the full width);
/// `Vertical` stacks bands along X (each band spans the full height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Length of `rect` along the axis bands are stacked on.
    pub fn band_length(self, rect: &Rect) -> i32 {
        match self {
            Orientation::Horizontal => rect.dy(),
            Orientation::Vertical => rect.dx(),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        })
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            other => bail!("unknown orientation '{other}' (expected horizontal or vertical)"),
        }
    }
}

/// One placed node, handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRect {
    pub identity: CompactString,
    pub rect: Rect,
    pub color: Rgb,
    /// Depth of the placed node (root = 0, so placements start at 1)
    pub depth: u16,
    /// Orientation this node's own children are sliced with
    pub orientation: Orientation,
    /// Aggregated weight of the placed node
    pub weight: f64,
}

/// The full layout result of one pass, in depth-first pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Rectangle assigned to the root (not itself part of `rects`)
    pub canvas: Rect,
    pub rects: Vec<LayoutRect>,
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Canvas width in px
    pub width: u32,
    /// Canvas height in px
    pub height: u32,
    /// Maximum recursion depth (0 = render down to the leaves)
    pub max_depth: u16,
    /// Orientation for the root's children (None = pick from the canvas shape)
    pub orientation: Option<Orientation>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_depth: 0,
            orientation: None,
        }
    }
}

impl LayoutConfig {
    /// Reject canvases whose corners do not fit integer coordinates.
    pub fn validate(&self) -> Result<()> {
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            bail!("canvas {}x{} is too large", self.width, self.height);
        }
        if self.width == 0 || self.height == 0 {
            tracing::warn!("Canvas {}x{} is empty, every band will collapse", self.width, self.height);
        }
        Ok(())
    }

    /// Start orientation: the configured one, else slice across the longer side.
    pub fn start_orientation(&self) -> Orientation {
        self.orientation.unwrap_or(if self.width < self.height {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        })
    }

    /// Rectangle assigned to the root.
    pub fn canvas(&self) -> Rect {
        canvas_rect(self.width, self.height)
    }
}

fn canvas_rect(width: u32, height: u32) -> Rect {
    Rect::new(
        0,
        0,
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    )
}

/// Lay out the whole tree: assign the root `(0,0)-(width,height)` and hand
/// every descendant's placement to `emit` as soon as it is computed.
pub fn render_treemap<N, F>(
    root: N,
    width: u32,
    height: u32,
    start: Orientation,
    max_depth: u16,
    emit: &mut F,
) where
    N: TreeMapper,
    F: FnMut(LayoutRect),
{
    let canvas = canvas_rect(width, height);
    layout_children(root, canvas, start, 0, max_depth, emit);
}

/// Compute the layout for a tree and collect every placement.
pub fn compute_layout<N: TreeMapper>(root: N, config: &LayoutConfig) -> Layout {
    let mut rects = Vec::new();
    render_treemap(
        root,
        config.width,
        config.height,
        config.start_orientation(),
        config.max_depth,
        &mut |rect| rects.push(rect),
    );

    tracing::info!(
        "Layout computed: {} rectangles on {}x{} canvas (start {}, max depth {})",
        rects.len(),
        config.width,
        config.height,
        config.start_orientation(),
        config.max_depth
    );

    Layout {
        canvas: config.canvas(),
        rects,
    }
}
