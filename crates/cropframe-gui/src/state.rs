/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Widget surface revision the texture was last uploaded from.
    pub revision: Option<u64>,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// A load is running on the worker.
    pub loading: bool,
    /// An upload is running on the worker.
    pub uploading: bool,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.loading || self.uploading
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
