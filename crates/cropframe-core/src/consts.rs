use std::time::Duration;

/// Default viewport width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 640;

/// Default viewport height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 640;

/// Largest viewport side the JPEG encoder accepts.
pub const MAX_VIEWPORT_SIDE: u32 = u16::MAX as u32;

/// Default name of the form field / multipart part carrying the crop.
pub const DEFAULT_FIELD_NAME: &str = "image";

/// Fraction of the current scale added or removed per wheel tick.
pub const DEFAULT_ZOOM_STEP: f32 = 0.05;

/// Quiet period after the last render before the surface is re-encoded.
pub const COMMIT_DEBOUNCE: Duration = Duration::from_millis(300);

/// JPEG quality used for every encode (matches the browser canvas default of 0.92).
pub const JPEG_QUALITY: u8 = 92;

/// MIME type of the encoded crop.
pub const JPEG_MIME: &str = "image/jpeg";

/// Prefix every committed form value starts with.
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// User agent sent with uploads and remote source fetches.
pub const USER_AGENT: &str = concat!("cropframe/", env!("CARGO_PKG_VERSION"));
