mod common;

use image::ImageFormat;

use cropframe_core::encode::to_data_url;
use cropframe_core::error::CropError;
use cropframe_core::source::{decode, load, SourceOrigin};

#[test]
fn test_decode_sniffs_format() {
    let bytes = common::png_bytes(&common::gradient_image(12, 7));
    let source = decode(&bytes).unwrap();
    assert_eq!(source.width(), 12);
    assert_eq!(source.height(), 7);
    assert_eq!(source.format, Some(ImageFormat::Png));
    assert_eq!(source.mime_type(), Some("image/png"));
}

#[test]
fn test_decode_rejects_non_image_bytes() {
    let result = decode(b"definitely not an image");
    assert!(matches!(result, Err(CropError::Image(_))));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_png(&dir, "photo.png", 20, 10);
    let source = load(&SourceOrigin::File(path)).unwrap();
    assert_eq!((source.width(), source.height()), (20, 10));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load(&SourceOrigin::File(dir.path().join("missing.png")));
    assert!(matches!(result, Err(CropError::Io(_))));
}

#[test]
fn test_load_from_data_url_location() {
    let bytes = common::png_bytes(&common::gradient_image(5, 9));
    let origin = SourceOrigin::Location(to_data_url("image/png", &bytes));
    let source = load(&origin).unwrap();
    assert_eq!((source.width(), source.height()), (5, 9));
    assert_eq!(origin.to_string(), "<data URL>");
}

#[test]
fn test_load_from_path_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_png(&dir, "initial.png", 3, 3);
    let origin = SourceOrigin::Location(path.display().to_string());
    assert!(load(&origin).is_ok());
}

#[test]
fn test_file_extension_is_not_trusted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    std::fs::write(&path, common::png_bytes(&common::gradient_image(4, 4))).unwrap();
    let source = load(&SourceOrigin::File(path)).unwrap();
    assert_eq!(source.format, Some(ImageFormat::Png));
}
