use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use cropframe_core::config::WidgetConfig;
use cropframe_core::widget::{Completion, ImageTransformWidget, LoadRequest};

use crate::convert::surface_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{UIState, ViewportState};
use crate::worker;

pub struct CropframeApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub widget: ImageTransformWidget,
    /// Identifies the current widget instance in worker round-trips.
    pub epoch: u64,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl CropframeApp {
    pub fn new(ctx: &egui::Context, config: WidgetConfig) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;

        let mut ui_state = UIState::default();
        let widget = match ImageTransformWidget::new(config) {
            Ok(widget) => widget,
            Err(e) => {
                ui_state.add_log(format!("ERROR: {e}; using defaults"));
                Self::default_widget()?
            }
        };

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            widget,
            epoch: 0,
            ui_state,
            viewport: ViewportState::default(),
        };
        app.start_initial_load();
        Ok(app)
    }

    fn default_widget() -> std::io::Result<ImageTransformWidget> {
        ImageTransformWidget::new(WidgetConfig::default())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn start_initial_load(&mut self) {
        if let Some(request) = self.widget.take_initial_load() {
            self.dispatch_load(request);
        }
    }

    fn dispatch_load(&mut self, request: LoadRequest) {
        self.ui_state.loading = true;
        self.send_command(WorkerCommand::Load {
            epoch: self.epoch,
            request,
        });
    }

    /// Rebuild the widget from a new config. Results still in flight for the
    /// old instance are dropped by epoch.
    pub fn replace_widget(&mut self, config: WidgetConfig) {
        match ImageTransformWidget::new(config) {
            Ok(widget) => {
                self.widget = widget;
                self.epoch += 1;
                self.viewport = ViewportState::default();
                self.ui_state.loading = false;
                self.ui_state.uploading = false;
                self.ui_state
                    .add_log(format!("Config applied: {}", self.widget.mode()));
                self.start_initial_load();
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: invalid config: {e}")),
        }
    }

    pub fn on_file_picked(&mut self, path: &Path) {
        if let Some(request) = self.widget.select_file(Some(path)) {
            self.dispatch_load(request);
        }
    }

    pub fn remove_image(&mut self) {
        if self.widget.remove_image() {
            self.ui_state.loading = false;
            self.ui_state.uploading = false;
            self.ui_state.add_log("Image removed".into());
        }
    }

    /// Post mode with an unconfirmed crop and no upload already running.
    pub fn can_save(&self) -> bool {
        self.widget.has_save_action() && self.widget.is_pending() && !self.ui_state.uploading
    }

    pub fn save(&mut self) {
        if !self.can_save() {
            return;
        }
        match self.widget.submit() {
            Ok(Some(request)) => {
                self.ui_state.uploading = true;
                self.send_command(WorkerCommand::Upload {
                    epoch: self.epoch,
                    request,
                });
            }
            Ok(None) => {}
            Err(e) => self.ui_state.add_log(format!("ERROR: could not encode crop: {e}")),
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FilePicked { epoch, path } => {
                    if epoch == self.epoch {
                        self.on_file_picked(&path);
                    }
                }
                WorkerResult::Loaded {
                    epoch,
                    ticket,
                    result,
                } => {
                    if epoch != self.epoch {
                        continue;
                    }
                    let failed = result.as_ref().err().map(|e| e.to_string());
                    if self.widget.complete_load(ticket, result, Instant::now())
                        == Completion::Applied
                    {
                        self.ui_state.loading = false;
                        match failed {
                            Some(message) => {
                                self.ui_state.add_log(format!("ERROR: {message}"));
                            }
                            None => {
                                if let Some(size) = self.widget.source_size() {
                                    self.ui_state.add_log(format!("Loaded {size} image"));
                                }
                            }
                        }
                    }
                }
                WorkerResult::Uploaded {
                    epoch,
                    ticket,
                    result,
                } => {
                    if epoch != self.epoch {
                        continue;
                    }
                    let message = match &result {
                        Ok(receipt) => format!("Upload accepted (HTTP {})", receipt.status),
                        Err(e) => format!("ERROR: upload failed: {e}"),
                    };
                    self.ui_state.uploading = false;
                    match self.widget.complete_submit(ticket, result) {
                        Completion::Applied => self.ui_state.add_log(message),
                        Completion::Stale => {
                            self.ui_state.add_log("Crop changed during upload; save again".into());
                        }
                    }
                }
                WorkerResult::ConfigImported { config } => {
                    self.replace_widget(config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Run the debounced commit if it is due.
    fn drive_commit(&mut self) {
        if let Err(e) = self.widget.tick(Instant::now()) {
            self.ui_state.add_log(format!("ERROR: could not encode crop: {e}"));
        }
    }

    /// Keep the repaint loop alive until the pending commit fires. Runs after
    /// the panels so edits made this frame are accounted for.
    fn schedule_commit(&self, ctx: &egui::Context) {
        if let Some(remaining) = self.widget.commit_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Upload the surface when it changed. Texture writes made after the
    /// panels are drawn still land in this frame.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let revision = self.widget.revision();
        if self.viewport.revision == Some(revision) {
            return;
        }
        let image = surface_to_color_image(self.widget.surface());
        match self.viewport.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.viewport.texture =
                    Some(ctx.load_texture("surface", image, egui::TextureOptions::LINEAR));
                ctx.request_repaint();
            }
        }
        self.viewport.revision = Some(revision);
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for CropframeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.drive_commit();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.refresh_texture(ctx);
        self.schedule_commit(ctx);

        if self.ui_state.show_about {
            egui::Window::new("About Cropframe")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Cropframe");
                        ui.label("Image upload and crop");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
