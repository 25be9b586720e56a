mod common;

use image::{Rgba, RgbaImage};

use cropframe_core::consts::JPEG_DATA_URL_PREFIX;
use cropframe_core::encode::{
    encode_jpeg, encode_jpeg_data_url, is_data_url, parse_data_url, to_data_url,
};
use cropframe_core::error::CropError;

#[test]
fn test_encode_jpeg_has_jpeg_markers() {
    let bytes = encode_jpeg(&common::gradient_image(32, 16)).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
}

#[test]
fn test_transparent_surface_exports_black() {
    let clear = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
    let bytes = encode_jpeg(&clear).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert!(decoded.pixels().all(|p| p.0.iter().all(|&c| c < 8)));
}

#[test]
fn test_data_url_prefix() {
    let url = encode_jpeg_data_url(&common::gradient_image(4, 4)).unwrap();
    assert!(url.starts_with(JPEG_DATA_URL_PREFIX));
    assert!(is_data_url(&url));
}

#[test]
fn test_parse_data_url_payload() {
    let url = to_data_url("image/png", b"hello");
    assert_eq!(url, "data:image/png;base64,aGVsbG8=");

    let parsed = parse_data_url(&url).unwrap();
    assert_eq!(parsed.mime, "image/png");
    assert_eq!(parsed.bytes, b"hello");
}

#[test]
fn test_parse_data_url_ignores_whitespace_in_payload() {
    let parsed = parse_data_url("data:image/png;base64,aGVs\nbG8=").unwrap();
    assert_eq!(parsed.bytes, b"hello");
}

#[test]
fn test_parse_data_url_rejects_malformed_input() {
    for input in [
        "image/png;base64,aGVsbG8=",
        "data:image/png;base64",
        "data:text/plain,hello",
        "data:image/png;base64,***",
    ] {
        assert!(
            matches!(parse_data_url(input), Err(CropError::InvalidDataUrl(_))),
            "accepted {input:?}"
        );
    }
}

#[test]
fn test_is_data_url() {
    assert!(is_data_url("  data:image/png;base64,AA=="));
    assert!(!is_data_url("https://example.com/a.png"));
    assert!(!is_data_url("/tmp/a.png"));
}
