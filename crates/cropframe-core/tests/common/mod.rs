#![allow(dead_code)]

use std::io::Cursor;
use std::time::Instant;

use image::{ImageFormat, Rgba, RgbaImage};

use cropframe_core::config::WidgetConfig;
use cropframe_core::source::SourceImage;
use cropframe_core::widget::{Completion, ImageTransformWidget};

/// Opaque test image whose pixel colour encodes its coordinates.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            255,
        ])
    })
}

pub fn gradient_source(width: u32, height: u32) -> SourceImage {
    SourceImage::from_pixels(gradient_image(width, height))
}

/// Encode an image as PNG bytes.
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("encode PNG");
    cursor.into_inner()
}

/// Write a PNG into `dir` and return its path.
pub fn write_png(dir: &tempfile::TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, png_bytes(&gradient_image(width, height))).expect("write PNG");
    path
}

pub fn input_config(width: u32, height: u32) -> WidgetConfig {
    WidgetConfig {
        width,
        height,
        ..WidgetConfig::default()
    }
}

pub fn post_config(action: &str) -> WidgetConfig {
    WidgetConfig {
        action: Some(action.to_string()),
        ..WidgetConfig::default()
    }
}

/// Build a widget and load a synthetic image of the given size into it.
pub fn loaded_widget(config: WidgetConfig, image_w: u32, image_h: u32, now: Instant) -> ImageTransformWidget {
    let mut widget = ImageTransformWidget::new(config).expect("valid config");
    let request = widget
        .select_file(Some(std::path::Path::new("synthetic.png")))
        .expect("load request");
    let outcome = widget.complete_load(request.ticket, Ok(gradient_source(image_w, image_h)), now);
    assert_eq!(outcome, Completion::Applied);
    widget
}
