use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use cropframe_core::config::WidgetConfig;
use cropframe_core::consts::DEFAULT_ZOOM_STEP;
use cropframe_core::encode::encode_jpeg;
use cropframe_core::source;
use cropframe_core::transform::ZoomDirection;
use cropframe_core::upload::{HttpUploader, Uploader};
use cropframe_core::widget::{ImageTransformWidget, WidgetFault};
use tracing::debug;

use crate::summary::print_crop_summary;

/// Drag distance in viewport pixels, written `DX,DY`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanOffset {
    pub dx: f32,
    pub dy: f32,
}

impl FromStr for PanOffset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (dx, dy) = s
            .split_once(',')
            .ok_or_else(|| format!("expected DX,DY, got {s:?}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid offset {v:?}: {e}"))
        };
        Ok(Self {
            dx: parse(dx)?,
            dy: parse(dy)?,
        })
    }
}

#[derive(Args)]
pub struct CropArgs {
    /// Input image
    pub file: PathBuf,

    /// Widget config (TOML); the flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Form field / multipart part name
    #[arg(long)]
    pub name: Option<String>,

    /// Upload the crop to this URL instead of producing a form value
    #[arg(long)]
    pub action: Option<String>,

    /// Wheel ticks to zoom in
    #[arg(long, default_value_t = 0)]
    pub zoom_in: u32,

    /// Wheel ticks to zoom out
    #[arg(long, default_value_t = 0)]
    pub zoom_out: u32,

    /// Fraction of the current scale per wheel tick
    #[arg(long, default_value_t = DEFAULT_ZOOM_STEP)]
    pub step: f32,

    /// Drag the image by DX,DY viewport pixels after zooming
    #[arg(long, allow_hyphen_values = true)]
    pub pan: Option<PanOffset>,

    /// Write the cropped JPEG to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the form field value (a JPEG data URL)
    #[arg(long)]
    pub print_field: bool,
}

fn build_config(args: &CropArgs) -> Result<WidgetConfig> {
    let mut config = match &args.config {
        Some(path) => WidgetConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => WidgetConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    if args.action.is_some() {
        config.action = args.action.clone();
    }
    Ok(config)
}

pub fn run(args: &CropArgs) -> Result<()> {
    let config = build_config(args)?;
    let mut widget = ImageTransformWidget::new(config)?;
    let now = Instant::now();

    let Some(request) = widget.select_file(Some(args.file.as_path())) else {
        bail!("No file selected");
    };
    let loaded = source::load(&request.origin)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    widget.complete_load(request.ticket, Ok(loaded), now);

    for _ in 0..args.zoom_in {
        widget.zoom(ZoomDirection::In, args.step, now);
    }
    for _ in 0..args.zoom_out {
        widget.zoom(ZoomDirection::Out, args.step, now);
    }
    if let Some(pan) = args.pan {
        widget.begin_drag(0.0, 0.0);
        widget.drag_to(pan.dx, pan.dy, true, now);
        widget.end_drag();
    }
    debug!(transform = %widget.transform(), "Final placement");

    // No user is interacting; let the quiet period elapse immediately.
    if let Some(deadline) = widget.commit_deadline() {
        widget.tick(deadline)?;
    }

    if let Some(ref path) = args.output {
        let bytes = encode_jpeg(widget.surface().pixels())?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.print_field {
        match widget.form_field() {
            Some(field) => println!("{}", field.value),
            None => bail!("--print-field needs input mode (no --action)"),
        }
    }

    if let Some(upload) = widget.submit()? {
        let uploader = HttpUploader::new()?;
        let result = uploader.upload(&upload);
        widget.complete_submit(upload.ticket, result);
    }

    print_crop_summary(&widget, &args.file, args.output.as_deref());

    if let Some(WidgetFault::Upload(msg)) = widget.fault() {
        bail!("Upload failed: {msg}");
    }

    Ok(())
}
