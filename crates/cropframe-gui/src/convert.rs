use cropframe_core::surface::RenderSurface;

/// Convert the widget's RGBA surface to an egui ColorImage.
pub fn surface_to_color_image(surface: &RenderSurface) -> egui::ColorImage {
    let size = [surface.width() as usize, surface.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, surface.pixels().as_raw())
}
