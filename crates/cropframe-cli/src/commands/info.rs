use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cropframe_core::config::WidgetConfig;
use cropframe_core::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use cropframe_core::source::read_file;
use cropframe_core::transform::{cover_scale, Size, Transform};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: u32,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    WidgetConfig {
        width: args.width,
        height: args.height,
        ..WidgetConfig::default()
    }
    .validate()?;
    let source = read_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let image = source.size();
    let viewport = Size::new(args.width as f32, args.height as f32);
    let fit = Transform::cover_fit(image, viewport);

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", source.width(), source.height());
    println!("Format:      {}", source.mime_type().unwrap_or("unknown"));
    println!("Viewport:    {}x{}", args.width, args.height);
    println!("Cover scale: {:.4}", cover_scale(image, viewport));
    println!(
        "Visible:     {:.0}x{:.0} source px",
        viewport.width / fit.scale,
        viewport.height / fit.scale
    );

    Ok(())
}
