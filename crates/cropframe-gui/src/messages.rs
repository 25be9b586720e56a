use std::path::PathBuf;

use cropframe_core::config::WidgetConfig;
use cropframe_core::error::Result;
use cropframe_core::source::SourceImage;
use cropframe_core::upload::{UploadReceipt, UploadRequest};
use cropframe_core::widget::{LoadRequest, LoadTicket, SubmitTicket};

/// Commands sent from UI thread to worker thread.
///
/// `epoch` identifies the widget instance that issued the command; it changes
/// whenever a config import rebuilds the widget.
pub enum WorkerCommand {
    /// Read and decode a source image.
    Load { epoch: u64, request: LoadRequest },

    /// POST the crop to the configured action.
    Upload { epoch: u64, request: UploadRequest },
}

/// Results sent back to the UI thread.
pub enum WorkerResult {
    /// A file was chosen in the open dialog.
    FilePicked { epoch: u64, path: PathBuf },

    Loaded {
        epoch: u64,
        ticket: LoadTicket,
        result: Result<SourceImage>,
    },

    Uploaded {
        epoch: u64,
        ticket: SubmitTicket,
        result: Result<UploadReceipt>,
    },

    ConfigImported {
        config: WidgetConfig,
    },

    Error {
        message: String,
    },

    Log {
        message: String,
    },
}
