use image::{Rgba, RgbaImage};

use crate::source::SourceImage;
use crate::transform::{Size, Transform};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fixed-size raster the widget draws into; the crop is whatever it holds.
#[derive(Clone, Debug)]
pub struct RenderSurface {
    pixels: RgbaImage,
}

impl RenderSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, CLEAR),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::from_dimensions(self.pixels.dimensions())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = CLEAR;
        }
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Clear, then draw `source` at `transform` with nearest-neighbour sampling.
    pub fn draw(&mut self, source: &SourceImage, transform: &Transform) {
        self.clear();

        let src = &source.pixels;
        let (src_w, src_h) = src.dimensions();

        // Source column for each destination column; None where the image
        // does not reach.
        let columns: Vec<Option<u32>> = (0..self.pixels.width())
            .map(|dx| {
                let (sx, _) = transform.to_source(dx as f32 + 0.5, 0.0);
                source_index(sx, src_w)
            })
            .collect();

        for dy in 0..self.pixels.height() {
            let (_, sy) = transform.to_source(0.0, dy as f32 + 0.5);
            let Some(row) = source_index(sy, src_h) else {
                continue;
            };
            for (dx, column) in columns.iter().enumerate() {
                if let Some(col) = column {
                    self.pixels.put_pixel(dx as u32, dy, *src.get_pixel(*col, row));
                }
            }
        }
    }
}

fn source_index(coord: f32, extent: u32) -> Option<u32> {
    if coord < 0.0 || coord >= extent as f32 {
        None
    } else {
        Some((coord as u32).min(extent - 1))
    }
}
