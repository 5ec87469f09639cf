use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use slicemap::input;
use slicemap::layout::{LayoutConfig, Orientation};
use slicemap::render;

/// Draw a slice-and-dice treemap of a weighted JSON tree as SVG.
#[derive(Debug, Parser)]
#[command(name = "slicemap", version)]
struct Args {
    /// JSON file holding the tree ({"name", "size", "children"})
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// SVG file to write
    #[arg(long = "out", value_name = "FILE", default_value = "output.svg")]
    output: PathBuf,

    /// Canvas width in px
    #[arg(short = 'w', long, default_value_t = 800)]
    width: u32,

    /// Canvas height in px
    #[arg(short = 'H', long, default_value_t = 600)]
    height: u32,

    /// Maximum depth to draw (0 = down to the leaves)
    #[arg(long, default_value_t = 0)]
    depth: u16,

    /// Slicing orientation of the first level [default: from the canvas shape]
    #[arg(long)]
    orientation: Option<Orientation>,
}

impl Args {
    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            width: self.width,
            height: self.height,
            max_depth: self.depth,
            orientation: self.orientation,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slicemap=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = args.layout_config();
    config.validate()?;

    let tree = input::load_tree(&args.input)?;

    let out = File::create(&args.output)
        .with_context(|| format!("creating output file {}", args.output.display()))?;
    let mut writer = BufWriter::new(out);
    let drawn = render::write_treemap(&mut writer, tree.root_ref(), &config)?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", args.output.display()))?;

    tracing::info!("Wrote {} rectangles to {}", drawn, args.output.display());
    Ok(())
}
