mod scene;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use benchtop_core::constants::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX};
use benchtop_core::report;
use benchtop_export::{encode_pdf, encode_png, render_svg};
use clap::Parser;

use crate::scene::Scene;

#[derive(Parser)]
#[command(name = "benchtop", about = "Render a benchtop layout and its placement report", version)]
struct Cli {
    /// Scene description (JSON)
    scene: PathBuf,

    /// Write the drawing as PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the drawing as a single-page A4 landscape PDF
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Write the drawing as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Raster scale applied to the 1000x360 drawing
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Do not print the report
    #[arg(short, long)]
    quiet: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Render the SVG drawing to straight-alpha RGBA.
fn rasterize(svg: &str, scale: f32) -> Result<(u32, u32, Vec<u8>)> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    if fontdb.len() == 0 {
        log::warn!("no system fonts found; labels will be missing");
    }
    opt.fontdb = Arc::new(fontdb);
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| anyhow!("SVG parse error: {e:?}"))?;

    let w = (CANVAS_WIDTH_PX as f32 * scale).round() as u32;
    let h = (CANVAS_HEIGHT_PX as f32 * scale).round() as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(w, h).ok_or_else(|| anyhow!("pixmap alloc failed ({w}x{h})"))?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pm);

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok((w, h, rgba))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if !(cli.scale.is_finite() && cli.scale > 0.0) {
        anyhow::bail!("scale must be positive, got {}", cli.scale);
    }

    let scene = Scene::from_path(&cli.scene)?;
    let base = cli.scene.parent().unwrap_or(Path::new("."));
    let store = scene.build(base)?;
    log::debug!("{store:?}");

    if !cli.quiet {
        let text = report(&store);
        if !text.is_empty() {
            println!("{text}");
        }
    }

    let svg = render_svg(&store, CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX);
    if let Some(path) = &cli.svg {
        write(path, svg.as_bytes())?;
    }
    if cli.png.is_none() && cli.pdf.is_none() {
        return Ok(());
    }

    let (w, h, rgba) = rasterize(&svg, cli.scale)?;
    if let Some(path) = &cli.png {
        write(path, &encode_png(w, h, &rgba)?)?;
    }
    if let Some(path) = &cli.pdf {
        write(path, &encode_pdf(w, h, &rgba)?)?;
    }
    Ok(())
}
