use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FIELD_NAME, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, MAX_VIEWPORT_SIDE,
};
use crate::error::{CropError, Result};
use crate::transform::Size;

/// Construction-time options for an image crop widget.
///
/// Read once when the widget is built; the widget never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Viewport width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Viewport height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Name of the form field or multipart part carrying the crop.
    #[serde(default = "default_name")]
    pub name: String,
    /// Upload target. Its presence selects post mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Image to preload: data URL, http(s) URL or filesystem path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

fn default_width() -> u32 {
    DEFAULT_VIEWPORT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_VIEWPORT_HEIGHT
}

fn default_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            name: DEFAULT_FIELD_NAME.to_string(),
            action: None,
            src: None,
        }
    }
}

impl WidgetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WidgetConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations no widget can be built from.
    pub fn validate(&self) -> Result<()> {
        let side_ok = |side: u32| (1..=MAX_VIEWPORT_SIDE).contains(&side);
        if !side_ok(self.width) || !side_ok(self.height) {
            return Err(CropError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.name.trim().is_empty() {
            return Err(CropError::Config("field name must not be empty".into()));
        }
        if let Some(action) = &self.action {
            if action.trim().is_empty() {
                return Err(CropError::Config("action URL must not be empty".into()));
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn mode(&self) -> WidgetMode {
        match &self.action {
            Some(action) => WidgetMode::Post {
                action: action.clone(),
            },
            None => WidgetMode::Input,
        }
    }
}

/// Where the cropped result goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetMode {
    /// Exposed as a data URL in a hidden form field.
    Input,
    /// Uploaded as multipart/form-data on explicit confirmation.
    Post { action: String },
}

impl WidgetMode {
    pub fn is_post(&self) -> bool {
        matches!(self, Self::Post { .. })
    }
}

impl fmt::Display for WidgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Post { action } => write!(f, "Post ({action})"),
        }
    }
}
