use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use tracing::{info, warn};

use crate::consts::USER_AGENT;
use crate::error::{CropError, Result};
use crate::widget::SubmitTicket;

/// One multipart upload of the current crop.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub ticket: SubmitTicket,
    /// Target URL.
    pub action: String,
    /// Multipart part name.
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Server acknowledgement of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    pub status: u16,
}

/// Sends an [`UploadRequest`]. Blocking; hosts call it off the UI thread.
pub trait Uploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt>;
}

/// `multipart/form-data` POST over HTTP.
///
/// Keeps a cookie store across uploads so session cookies set by the target
/// travel with later requests.
pub struct HttpUploader {
    client: reqwest::blocking::Client,
}

impl HttpUploader {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt> {
        let part = Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)?;
        let form = Form::new().part(request.field_name.clone(), part);

        info!(
            action = %request.action,
            field = %request.field_name,
            bytes = request.bytes.len(),
            "Uploading crop"
        );
        let response = self.client.post(&request.action).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Upload rejected");
            return Err(CropError::UploadRejected {
                status: status.as_u16(),
            });
        }

        Ok(UploadReceipt {
            status: status.as_u16(),
        })
    }
}
