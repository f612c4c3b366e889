use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use inpaint_mask::{
    BrushColor, DrawingSurface, MaskConfig, PointerAction, SurfaceMsg, SurfaceResponse,
    handle_surface_msg,
};

/// Render an inpainting mask from recorded brush strokes
#[derive(Debug, Parser)]
#[command(name = "inpaint-mask", version, about)]
struct Args {
    /// Source image (PNG or JPEG)
    image: PathBuf,

    /// JSON file with strokes in surface coordinates
    #[arg(short, long)]
    strokes: PathBuf,

    /// Where to write the mask PNG (defaults to a timestamped name)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also write the mask composited over the original
    #[arg(long)]
    export: Option<PathBuf>,

    /// Also write original and mask side by side
    #[arg(long)]
    pair: Option<PathBuf>,

    /// Config file to use instead of the user config
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One recorded gesture
#[derive(Debug, Deserialize)]
struct StrokeRecord {
    #[serde(default)]
    width: Option<i64>,
    #[serde(default)]
    color: Option<String>,
    points: Vec<(f32, f32)>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MaskConfig::load_from(path)?,
        None => MaskConfig::load(),
    };
    let mut surface = DrawingSurface::new(config);

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    surface
        .load_image_async(bytes)
        .await
        .with_context(|| format!("Failed to load image {}", args.image.display()))?;

    let records: Vec<StrokeRecord> = serde_json::from_str(
        &std::fs::read_to_string(&args.strokes)
            .with_context(|| format!("Failed to read strokes {}", args.strokes.display()))?,
    )
    .context("Failed to parse strokes")?;

    for record in records {
        replay(&mut surface, record)?;
    }
    log::info!("Replayed {} strokes", surface.strokes().len());

    let out = args
        .out
        .unwrap_or_else(|| output_name(chrono::Local::now()));
    write_response(&mut surface, SurfaceMsg::RequestMask, &out)?;
    if let Some(path) = &args.export {
        write_response(&mut surface, SurfaceMsg::RequestExport, path)?;
    }
    if let Some(path) = &args.pair {
        write_response(&mut surface, SurfaceMsg::RequestPair, path)?;
    }

    Ok(())
}

/// Drive one recorded gesture through the surface as pointer events
fn replay(surface: &mut DrawingSurface, record: StrokeRecord) -> anyhow::Result<()> {
    if let Some(width) = record.width {
        handle_surface_msg(surface, SurfaceMsg::SetBrushSize(width))?;
    }
    if let Some(name) = &record.color {
        let color =
            BrushColor::parse(name).with_context(|| format!("Unknown brush color {:?}", name))?;
        handle_surface_msg(surface, SurfaceMsg::SetBrushColor(color))?;
    }

    let Some(((x, y), rest)) = record.points.split_first() else {
        log::warn!("Skipping stroke without points");
        return Ok(());
    };
    handle_surface_msg(surface, SurfaceMsg::Pointer(PointerAction::Down(*x, *y)))?;
    for (x, y) in rest {
        handle_surface_msg(surface, SurfaceMsg::Pointer(PointerAction::Move(*x, *y)))?;
    }
    handle_surface_msg(surface, SurfaceMsg::Pointer(PointerAction::Up))?;
    Ok(())
}

fn write_response(
    surface: &mut DrawingSurface,
    msg: SurfaceMsg,
    path: &Path,
) -> anyhow::Result<()> {
    let SurfaceResponse::Image(image) = handle_surface_msg(surface, msg)? else {
        anyhow::bail!("No image produced for {}", path.display());
    };
    std::fs::write(path, &image.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Wrote {}x{} {} to {}",
        image.width,
        image.height,
        image.mime_type(),
        path.display()
    );
    Ok(())
}

fn output_name<Tz: chrono::TimeZone>(now: chrono::DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    PathBuf::from(now.format("mask_%Y%m%d_%H%M%S.png").to_string())
}
