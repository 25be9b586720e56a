use std::time::Instant;

use cropframe_core::consts::DEFAULT_ZOOM_STEP;
use cropframe_core::transform::ZoomDirection;

use crate::app::CropframeApp;

pub fn show(ctx: &egui::Context, app: &mut CropframeApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        show_toolbar(ctx, ui, app);
        ui.add_space(4.0);

        let viewport = app.widget.viewport();
        let size = egui::vec2(viewport.width, viewport.height);

        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        paint_background(ui, rect);

        if app.widget.has_image() {
            handle_zoom(ui, &response, app);
            handle_drag(ui, &response, rect, app);

            if response.double_clicked() && app.widget.reset_fit(Instant::now()) {
                app.ui_state.add_log("Placement reset".into());
            }

            if response.hovered() {
                let icon = if app.widget.is_dragging() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Grab
                };
                ctx.set_cursor_icon(icon);
            }
        }

        match app.viewport.texture.as_ref() {
            Some(texture) if app.widget.has_image() => draw_image(ui, texture.id(), rect),
            _ => draw_placeholder(ui, rect, app.ui_state.loading),
        }

        if app.widget.is_pending() && app.widget.has_save_action() {
            draw_pending_marker(ui, rect);
        }
    });
}

fn show_toolbar(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut CropframeApp) {
    ui.horizontal(|ui| {
        if ui.button("Open...").clicked() {
            super::menu_bar::open_file(ctx, app);
        }
        if ui
            .add_enabled(app.widget.has_image(), egui::Button::new("Remove"))
            .clicked()
        {
            app.remove_image();
        }
        if app.widget.has_save_action() {
            if ui.add_enabled(app.can_save(), egui::Button::new("Save")).clicked() {
                app.save();
            }
        }
        if app.ui_state.is_busy() {
            ui.spinner();
        }
    });
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut CropframeApp) {
    if !response.hovered() {
        return;
    }
    let delta = ui.input(|i| i.raw_scroll_delta.y);
    if let Some(direction) = ZoomDirection::from_wheel(delta) {
        app.widget.zoom(direction, DEFAULT_ZOOM_STEP, Instant::now());
    }
}

fn handle_drag(ui: &egui::Ui, response: &egui::Response, rect: egui::Rect, app: &mut CropframeApp) {
    let Some(pointer) = response.interact_pointer_pos() else {
        if response.drag_stopped() {
            app.widget.end_drag();
        }
        return;
    };
    // Viewport-local coordinates, matching the surface pixels.
    let local = pointer - rect.min;

    if response.drag_started_by(egui::PointerButton::Primary) {
        app.widget.begin_drag(local.x, local.y);
    } else if response.dragged() {
        let primary_held = ui.input(|i| i.pointer.primary_down());
        app.widget.drag_to(local.x, local.y, primary_held, Instant::now());
    }
    if response.drag_stopped() {
        app.widget.end_drag();
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_placeholder(ui: &egui::Ui, rect: egui::Rect, loading: bool) {
    let text = if loading { "Loading..." } else { "Open an image to begin" };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}

/// Unsaved edits in post mode.
fn draw_pending_marker(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.right_top() + egui::vec2(-8.0, 8.0),
        egui::Align2::RIGHT_TOP,
        "unsaved",
        egui::FontId::proportional(14.0),
        egui::Color32::from_rgb(230, 180, 60),
    );
}
