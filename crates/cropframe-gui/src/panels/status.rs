use crate::app::CropframeApp;

/// Form value characters shown before eliding.
const FIELD_PREVIEW_CHARS: usize = 48;

pub fn show(ctx: &egui::Context, app: &mut CropframeApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(fault) = app.widget.fault() {
            let message = fault.to_string();
            let mut dismissed = false;
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message);
                dismissed = ui.small_button("Dismiss").clicked();
            });
            if dismissed {
                app.widget.clear_fault();
            }
        }

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("State: {}", app.widget.state()));
            ui.separator();
            if let Some(size) = app.widget.source_size() {
                ui.label(size.to_string());
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", app.widget.transform().scale * 100.0));
                ui.separator();
            }
            ui.label(format!("Mode: {}", app.widget.mode()));
            if let Some(field) = app.widget.form_field() {
                ui.separator();
                ui.monospace(format!("{} = {}", field.name, field_preview(&field.value)));
            }
        });

        ui.add_space(2.0);
    });
}

fn field_preview(value: &str) -> String {
    if value.is_empty() {
        return "(empty)".into();
    }
    match value.char_indices().nth(FIELD_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}... ({} chars)", &value[..end], value.len()),
        None => value.to_string(),
    }
}
