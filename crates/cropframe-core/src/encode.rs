use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, RgbaImage};

use crate::consts::{JPEG_MIME, JPEG_QUALITY};
use crate::error::{CropError, Result};

/// Encode a surface as baseline JPEG.
///
/// JPEG has no alpha channel; transparent pixels come out black, the same way
/// a cleared canvas exports.
pub fn encode_jpeg(surface: &RgbaImage) -> Result<Vec<u8>> {
    let rgb: RgbImage = surface.convert();
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Encode a surface straight to a `data:image/jpeg;base64,...` string.
pub fn encode_jpeg_data_url(surface: &RgbaImage) -> Result<String> {
    let bytes = encode_jpeg(surface)?;
    Ok(to_data_url(JPEG_MIME, &bytes))
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decoded `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub fn is_data_url(value: &str) -> bool {
    value.trim_start().starts_with("data:")
}

/// Parse a base64 `data:` URL into its MIME type and payload.
pub fn parse_data_url(value: &str) -> Result<DataUrl> {
    let rest = value
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| CropError::InvalidDataUrl("missing `data:` scheme".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CropError::InvalidDataUrl("missing `,` separator".into()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(CropError::InvalidDataUrl(
            "only base64 payloads are supported".into(),
        ));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| CropError::InvalidDataUrl(e.to_string()))?;

    Ok(DataUrl {
        mime: if mime.is_empty() {
            "text/plain".to_string()
        } else {
            mime.to_string()
        },
        bytes,
    })
}
