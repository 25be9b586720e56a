mod common;

use image::Rgba;

use cropframe_core::surface::RenderSurface;
use cropframe_core::transform::{Size, Transform};

#[test]
fn test_new_surface_is_blank() {
    let surface = RenderSurface::new(10, 6);
    assert_eq!(surface.size(), Size::new(10.0, 6.0));
    assert!(surface.is_blank());
}

#[test]
fn test_draw_identity_copies_pixels() {
    let source = common::gradient_source(8, 8);
    let mut surface = RenderSurface::new(8, 8);
    surface.draw(&source, &Transform::default());
    assert_eq!(surface.pixels(), &source.pixels);
}

#[test]
fn test_draw_offset_shows_far_region() {
    let source = common::gradient_source(16, 8);
    let mut surface = RenderSurface::new(8, 8);
    let transform = Transform {
        scale: 1.0,
        x: -8.0,
        y: 0.0,
    };
    surface.draw(&source, &transform);
    assert_eq!(surface.pixels().get_pixel(0, 0), source.pixels.get_pixel(8, 0));
    assert_eq!(surface.pixels().get_pixel(7, 7), source.pixels.get_pixel(15, 7));
}

#[test]
fn test_draw_scaled_duplicates_pixels() {
    let source = common::gradient_source(4, 4);
    let mut surface = RenderSurface::new(8, 8);
    let transform = Transform {
        scale: 2.0,
        x: 0.0,
        y: 0.0,
    };
    surface.draw(&source, &transform);
    for (x, y) in [(0, 0), (1, 1), (0, 1), (1, 0)] {
        assert_eq!(surface.pixels().get_pixel(x, y), source.pixels.get_pixel(0, 0));
    }
    assert_eq!(surface.pixels().get_pixel(7, 7), source.pixels.get_pixel(3, 3));
}

#[test]
fn test_uncovered_area_stays_transparent() {
    let source = common::gradient_source(4, 4);
    let mut surface = RenderSurface::new(8, 8);
    surface.draw(&source, &Transform::default());
    assert_eq!(*surface.pixels().get_pixel(6, 6), Rgba([0, 0, 0, 0]));
    assert!(!surface.is_blank());
}

#[test]
fn test_clear_blanks_surface() {
    let source = common::gradient_source(8, 8);
    let mut surface = RenderSurface::new(8, 8);
    surface.draw(&source, &Transform::default());
    surface.clear();
    assert!(surface.is_blank());
}
