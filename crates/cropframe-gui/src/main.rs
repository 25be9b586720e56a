mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod worker;

use std::path::PathBuf;

use cropframe_core::config::WidgetConfig;

/// Config from the first command-line argument, falling back to defaults.
fn load_config() -> WidgetConfig {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return WidgetConfig::default();
    };
    match WidgetConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Ignoring unreadable config");
            WidgetConfig::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config();
    let inner_width = (config.width as f32 + 48.0).max(720.0);
    let inner_height = config.height as f32 + 300.0;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([inner_width, inner_height])
            .with_min_inner_size([480.0, 400.0])
            .with_title("Cropframe"),
        ..Default::default()
    };

    eframe::run_native(
        "Cropframe",
        options,
        Box::new(move |cc| Ok(Box::new(app::CropframeApp::new(&cc.egui_ctx, config)?))),
    )
}
