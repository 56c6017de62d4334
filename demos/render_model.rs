//! Load a model, fit it to an 800x600 viewport and render it at every quality
//!
//! Usage: `render_model <model.stl|model.mpp>`. Set `RUST_LOG=debug` to see
//! per-frame logging from the renderer.

use anyhow::{bail, Context, Result};
use isoview_core::{Drawable, Point3D};
use isoview_render::{Environment, RecordingSurface, RenderQuality, ScreenRect};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        bail!("Usage: {} <model file>", args[0]);
    }
    let path = &args[1];

    let mut env = Environment::new();
    env.load(path)
        .with_context(|| format!("failed to load {}", path))?;

    let model = env.model();
    println!("Model: {}", path);
    println!("  Nodes: {}", model.len());
    println!("  Points: {}", model.point_count());
    println!("  Min: {}", model.min_extents());
    println!("  Max: {}", model.max_extents());
    println!("  Center: {}", model.center());

    env.camera_mut().set_view_angles(&Point3D::new(0.0, 30.0, 45.0));
    env.fit(&ScreenRect::from_size(800.0, 600.0));
    println!();
    print!("{}", env.camera());

    for quality in [RenderQuality::Low, RenderQuality::Med, RenderQuality::High] {
        env.camera_mut().set_render_quality(quality);
        let frame = env.render();

        let mut surface = RecordingSurface::new();
        env.paint(&mut surface);

        info!(?quality, nodes = frame.len(), "rendered");
        println!();
        println!("{:?} quality:", quality);
        println!("  Frame nodes: {}", frame.len());
        println!("  Polygon fills: {}", surface.polygon_fills());
        println!("  Polygon strokes: {}", surface.polygon_strokes());
        println!("  Point markers: {}", surface.markers());
        for line in surface.texts() {
            println!("  {}", line);
        }
    }

    Ok(())
}
