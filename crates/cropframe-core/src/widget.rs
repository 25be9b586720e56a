//! The image crop widget: a single-owner state machine over a loaded source
//! image, its pan/zoom transform, the render surface and the two output sinks.
//!
//! The widget never blocks. Work that would (reading and decoding files,
//! network uploads) is handed to the host as a request carrying a generation
//! ticket; the host runs it wherever it likes and reports back through
//! [`ImageTransformWidget::complete_load`] or
//! [`ImageTransformWidget::complete_submit`]. Completions whose ticket has been
//! superseded are dropped.
//!
//! Time is passed in explicitly so the commit debounce can be driven by a real
//! clock in a GUI and by a synthetic timeline in tests.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{WidgetConfig, WidgetMode};
use crate::consts::{COMMIT_DEBOUNCE, JPEG_MIME};
use crate::debounce::Debounce;
use crate::encode::{encode_jpeg, encode_jpeg_data_url};
use crate::error::Result;
use crate::source::{SourceImage, SourceOrigin};
use crate::surface::RenderSurface;
use crate::transform::{Size, Transform, ZoomDirection};
use crate::upload::{UploadReceipt, UploadRequest};

/// Identifies one source load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Identifies one upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// A load the host must perform with [`crate::source::load`].
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub origin: SourceOrigin,
}

/// Whether a completion was applied or discarded as superseded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    /// No image loaded.
    Empty,
    /// Image decoded, transform valid, surface up to date.
    Loaded,
    /// Post mode only: the current crop was accepted by the server.
    Submitted,
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Loaded => write!(f, "Loaded"),
            Self::Submitted => write!(f, "Submitted"),
        }
    }
}

/// User-visible failure of the last load or upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetFault {
    Decode(String),
    Upload(String),
}

impl fmt::Display for WidgetFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "Could not load image: {msg}"),
            Self::Upload(msg) => write!(f, "Upload failed: {msg}"),
        }
    }
}

/// The hidden form field written in input mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Copy, Debug, Default)]
struct DragSession {
    active: bool,
    last_x: f32,
    last_y: f32,
}

pub struct ImageTransformWidget {
    config: WidgetConfig,
    mode: WidgetMode,
    viewport: Size,
    state: WidgetState,
    source: Option<SourceImage>,
    transform: Transform,
    drag: DragSession,
    surface: RenderSurface,
    commit: Debounce,
    field: Option<FormField>,
    /// Post mode: last committed encode, ready for the next submit.
    ready_upload: Option<Vec<u8>>,
    initial_source: Option<String>,
    load_generation: u64,
    submit_generation: u64,
    fault: Option<WidgetFault>,
    /// Bumped on every change to the surface.
    revision: u64,
}

impl ImageTransformWidget {
    pub fn new(config: WidgetConfig) -> Result<Self> {
        config.validate()?;

        let mode = config.mode();
        let field = match mode {
            WidgetMode::Input => Some(FormField {
                name: config.name.clone(),
                value: String::new(),
            }),
            WidgetMode::Post { .. } => None,
        };
        info!(
            mode = %mode,
            width = config.width,
            height = config.height,
            "Widget created"
        );

        Ok(Self {
            viewport: config.viewport(),
            surface: RenderSurface::new(config.width, config.height),
            initial_source: config.src.clone(),
            mode,
            field,
            config,
            state: WidgetState::Empty,
            source: None,
            transform: Transform::default(),
            drag: DragSession::default(),
            commit: Debounce::new(COMMIT_DEBOUNCE),
            ready_upload: None,
            load_generation: 0,
            submit_generation: 0,
            fault: None,
            revision: 0,
        })
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn mode(&self) -> &WidgetMode {
        &self.mode
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn source_size(&self) -> Option<Size> {
        self.source.as_ref().map(SourceImage::size)
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn form_field(&self) -> Option<&FormField> {
        self.field.as_ref()
    }

    pub fn ready_upload(&self) -> Option<&[u8]> {
        self.ready_upload.as_deref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Only post mode shows a confirm action.
    pub fn has_save_action(&self) -> bool {
        self.mode.is_post()
    }

    /// An image is loaded but the current crop has not been confirmed.
    pub fn is_pending(&self) -> bool {
        self.state == WidgetState::Loaded
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    pub fn fault(&self) -> Option<&WidgetFault> {
        self.fault.as_ref()
    }

    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    /// When the pending commit falls due, if one is pending.
    pub fn commit_deadline(&self) -> Option<Instant> {
        self.commit.deadline()
    }

    /// Time until the pending commit falls due, zero if already overdue.
    pub fn commit_remaining(&self, now: Instant) -> Option<Duration> {
        self.commit.remaining(now)
    }

    // ---------------------------------------------------------------------
    // Loading and removal
    // ---------------------------------------------------------------------

    /// The configured initial source, handed out once.
    pub fn take_initial_load(&mut self) -> Option<LoadRequest> {
        let src = self.initial_source.take()?;
        Some(self.start_load(SourceOrigin::Location(src)))
    }

    /// A file was chosen (or the choice was cleared).
    ///
    /// Clearing the selection behaves exactly like [`Self::remove_image`].
    pub fn select_file(&mut self, path: Option<&Path>) -> Option<LoadRequest> {
        match path {
            Some(path) => Some(self.start_load(SourceOrigin::File(path.to_path_buf()))),
            None => {
                self.remove_image();
                None
            }
        }
    }

    fn start_load(&mut self, origin: SourceOrigin) -> LoadRequest {
        self.load_generation += 1;
        debug!(generation = self.load_generation, source = %origin, "Load started");
        LoadRequest {
            ticket: LoadTicket(self.load_generation),
            origin,
        }
    }

    /// Apply the outcome of a load started by [`Self::select_file`] or
    /// [`Self::take_initial_load`].
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SourceImage>,
        now: Instant,
    ) -> Completion {
        if ticket.0 != self.load_generation {
            warn!(
                ticket = ticket.0,
                current = self.load_generation,
                "Discarding superseded load"
            );
            return Completion::Stale;
        }

        match result {
            Ok(source) => {
                let size = source.size();
                self.transform = Transform::cover_fit(size, self.viewport);
                self.source = Some(source);
                self.state = WidgetState::Loaded;
                self.drag = DragSession::default();
                self.ready_upload = None;
                self.fault = None;
                self.submit_generation += 1;
                info!(size = %size, transform = %self.transform, "Image loaded");
                self.render(now);
            }
            Err(e) => {
                warn!(error = %e, "Image could not be decoded");
                self.reset_to_empty();
                self.fault = Some(WidgetFault::Decode(e.to_string()));
            }
        }
        Completion::Applied
    }

    /// Drop the image. No-op when nothing is loaded.
    pub fn remove_image(&mut self) -> bool {
        if !self.has_image() {
            return false;
        }
        self.reset_to_empty();
        self.load_generation += 1;
        info!("Image removed");
        true
    }

    fn reset_to_empty(&mut self) {
        self.source = None;
        self.state = WidgetState::Empty;
        self.transform = Transform::default();
        self.drag = DragSession::default();
        self.surface.clear();
        self.commit.cancel();
        self.ready_upload = None;
        self.submit_generation += 1;
        self.revision += 1;
        if let Some(field) = self.field.as_mut() {
            field.value.clear();
        }
    }

    // ---------------------------------------------------------------------
    // Zoom and pan
    // ---------------------------------------------------------------------

    /// Rescale by `step` of the current scale. A zero step resets to cover-fit.
    pub fn zoom(&mut self, direction: ZoomDirection, step: f32, now: Instant) -> bool {
        let Some(image) = self.source_size() else {
            return false;
        };
        self.transform = self
            .transform
            .zoomed(direction, step.max(0.0), image, self.viewport);
        debug!(?direction, step, transform = %self.transform, "Zoom");
        self.mark_edited();
        self.render(now);
        true
    }

    pub fn reset_fit(&mut self, now: Instant) -> bool {
        self.zoom(ZoomDirection::In, 0.0, now)
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) -> bool {
        if !self.has_image() {
            return false;
        }
        self.drag = DragSession {
            active: true,
            last_x: x,
            last_y: y,
        };
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = DragSession::default();
    }

    /// Pointer moved. Pans only while a drag is active and the primary
    /// button is held.
    pub fn drag_to(&mut self, x: f32, y: f32, primary_held: bool, now: Instant) -> bool {
        if !primary_held {
            return false;
        }
        self.pan(x, y, now)
    }

    /// Translate by the pointer movement since the previous position.
    pub fn pan(&mut self, pointer_x: f32, pointer_y: f32, now: Instant) -> bool {
        if !self.drag.active {
            return false;
        }
        let Some(image) = self.source_size() else {
            return false;
        };

        let dx = pointer_x - self.drag.last_x;
        let dy = pointer_y - self.drag.last_y;
        self.transform = self.transform.panned(dx, dy, image, self.viewport);
        self.drag.last_x = pointer_x;
        self.drag.last_y = pointer_y;

        self.mark_edited();
        self.render(now);
        true
    }

    /// The crop changed: any confirmation, or upload in flight, no longer
    /// describes it.
    fn mark_edited(&mut self) {
        if self.state == WidgetState::Submitted {
            self.state = WidgetState::Loaded;
        }
        self.submit_generation += 1;
    }

    // ---------------------------------------------------------------------
    // Rendering and output
    // ---------------------------------------------------------------------

    /// Redraw the surface and restart the commit quiet period.
    pub fn render(&mut self, now: Instant) {
        match &self.source {
            Some(source) => self.surface.draw(source, &self.transform),
            None => self.surface.clear(),
        }
        self.revision += 1;
        self.commit.arm(now);
    }

    /// Run the debounced commit if its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.commit.fire(now) {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    /// Encode the surface into the mode's sink right away.
    pub fn commit(&mut self) -> Result<()> {
        if !self.has_image() {
            if let Some(field) = self.field.as_mut() {
                field.value.clear();
            }
            self.ready_upload = None;
            return Ok(());
        }

        match self.field.as_mut() {
            Some(field) => {
                field.value = encode_jpeg_data_url(self.surface.pixels())?;
                debug!(chars = field.value.len(), "Committed surface to form field");
            }
            None => {
                let bytes = encode_jpeg(self.surface.pixels())?;
                debug!(bytes = bytes.len(), "Committed surface for upload");
                self.ready_upload = Some(bytes);
            }
        }
        Ok(())
    }

    /// Build the upload for the current surface. `None` outside post mode or
    /// with nothing loaded.
    pub fn submit(&mut self) -> Result<Option<UploadRequest>> {
        let WidgetMode::Post { action } = &self.mode else {
            return Ok(None);
        };
        if !self.has_image() {
            return Ok(None);
        }

        let bytes = encode_jpeg(self.surface.pixels())?;
        self.submit_generation += 1;
        let request = UploadRequest {
            ticket: SubmitTicket(self.submit_generation),
            action: action.clone(),
            field_name: self.config.name.clone(),
            file_name: format!("{}.jpg", self.config.name),
            content_type: JPEG_MIME.to_string(),
            bytes: bytes.clone(),
        };
        self.ready_upload = Some(bytes);
        debug!(generation = self.submit_generation, "Submit started");
        Ok(Some(request))
    }

    /// Apply the outcome of an upload built by [`Self::submit`].
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<UploadReceipt>,
    ) -> Completion {
        if ticket.0 != self.submit_generation || !self.has_image() {
            warn!(
                ticket = ticket.0,
                current = self.submit_generation,
                "Discarding superseded upload result"
            );
            return Completion::Stale;
        }

        match result {
            Ok(receipt) => {
                info!(status = receipt.status, "Crop accepted");
                self.state = WidgetState::Submitted;
                self.fault = None;
            }
            Err(e) => {
                warn!(error = %e, "Upload failed");
                self.state = WidgetState::Loaded;
                self.fault = Some(WidgetFault::Upload(e.to_string()));
            }
        }
        Completion::Applied
    }
}
