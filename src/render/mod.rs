pub mod colors;
pub mod svg;

use std::io::Write;

use anyhow::Result;

use self::svg::SvgRenderer;
use crate::layout::{self, LayoutConfig};
use crate::tree::TreeMapper;

/// Lay out `root` per `config` and write the treemap as SVG.
///
/// Placements stream straight into the document; no layout is kept around.
/// Returns the number of rectangles drawn.
pub fn write_treemap<W, N>(writer: W, root: N, config: &LayoutConfig) -> Result<usize>
where
    W: Write,
    N: TreeMapper,
{
    config.validate()?;

    let mut renderer = SvgRenderer::new(config.width, config.height);
    layout::render_treemap(
        root,
        config.width,
        config.height,
        config.start_orientation(),
        config.max_depth,
        &mut |placement| renderer.draw(&placement),
    );

    let drawn = renderer.drawn();
    tracing::info!(
        "Rendered {} rectangles for '{}' ({}x{}, start {})",
        drawn,
        root.identity(),
        config.width,
        config.height,
        config.start_orientation()
    );
    renderer.finish(writer)?;
    Ok(drawn)
}
