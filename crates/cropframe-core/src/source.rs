use std::fmt;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::consts::USER_AGENT;
use crate::encode::{is_data_url, parse_data_url};
use crate::error::{CropError, Result};
use crate::transform::Size;

/// Where a source image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOrigin {
    /// A file picked by the user.
    File(PathBuf),
    /// A configured initial source: data URL, http(s) URL or path.
    Location(String),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Location(location) if is_data_url(location) => write!(f, "<data URL>"),
            Self::Location(location) => write!(f, "{location}"),
        }
    }
}

/// A decoded source image, ready to draw.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub pixels: RgbaImage,
    /// Container format sniffed from the bytes, if recognised.
    pub format: Option<ImageFormat>,
}

impl SourceImage {
    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            format: None,
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

    pub fn mime_type(&self) -> Option<&'static str> {
        self.format.map(|f| f.to_mime_type())
    }
}

/// Decode encoded image bytes. The format is sniffed, never trusted from a
/// file extension or declared MIME type.
pub fn decode(bytes: &[u8]) -> Result<SourceImage> {
    let format = image::guess_format(bytes).ok();
    let pixels = image::load_from_memory(bytes)?.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(CropError::InvalidDimensions {
            width: pixels.width(),
            height: pixels.height(),
        });
    }
    debug!(
        width = pixels.width(),
        height = pixels.height(),
        format = ?format,
        "Decoded source image"
    );
    Ok(SourceImage { pixels, format })
}

pub fn read_file(path: &Path) -> Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

fn fetch(url: &str) -> Result<SourceImage> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    decode(&bytes)
}

/// Blocking load of a source. Hosts run this off the UI thread.
pub fn load(origin: &SourceOrigin) -> Result<SourceImage> {
    info!(source = %origin, "Loading source image");
    match origin {
        SourceOrigin::File(path) => read_file(path),
        SourceOrigin::Location(location) if is_data_url(location) => {
            let data = parse_data_url(location)?;
            decode(&data.bytes)
        }
        SourceOrigin::Location(location)
            if location.starts_with("http://") || location.starts_with("https://") =>
        {
            fetch(location)
        }
        SourceOrigin::Location(location) => read_file(Path::new(location)),
    }
}
