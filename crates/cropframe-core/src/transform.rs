//! Placement of a source image inside a fixed-size viewport.
//!
//! Every transform produced here keeps the image covering the whole viewport:
//! the scale never drops below the cover-fit minimum and the scaled image never
//! leaves a gap on any edge. Zoom and pan are pure functions of the previous
//! transform so the widget can apply them without any hidden state.

use std::fmt;

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_dimensions((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }

    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Wheel direction of a zoom request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Enlarge the image (signed direction -1).
    In,
    /// Shrink the image (signed direction +1).
    Out,
}

impl ZoomDirection {
    /// Map a vertical wheel delta to a direction. Positive deltas (wheel
    /// turned away from the user, as egui reports them) zoom in.
    pub fn from_wheel(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::In)
        } else if delta_y < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }

    fn scale_sign(self) -> f32 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Affine placement of the source image: top-left corner at `(x, y)`,
/// uniformly scaled by `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Smallest scale at which `image` covers `viewport` on both axes.
pub fn cover_scale(image: Size, viewport: Size) -> f32 {
    (viewport.width / image.width).max(viewport.height / image.height)
}

/// Clamp one axis so the scaled extent spans `[0, viewport]`.
fn clamp_axis(position: f32, scaled_extent: f32, viewport: f32) -> f32 {
    position.min(0.0).max(viewport - scaled_extent)
}

impl Transform {
    /// Cover-fit placement anchored at the top-left corner.
    pub fn cover_fit(image: Size, viewport: Size) -> Self {
        Transform::default().zoomed(ZoomDirection::In, 0.0, image, viewport)
    }

    /// Rescale by `step` of the current scale in `direction`.
    ///
    /// A zero step resets to the cover-fit minimum. After rescaling, any far
    /// edge that would fall inside the viewport is shifted out by exactly the
    /// shortfall.
    pub fn zoomed(&self, direction: ZoomDirection, step: f32, image: Size, viewport: Size) -> Self {
        let minimum = cover_scale(image, viewport);
        let requested = if step == 0.0 {
            minimum
        } else {
            self.scale + direction.scale_sign() * step * self.scale
        };
        let scale = requested.max(minimum);

        let mut x = self.x;
        let mut y = self.y;
        let scaled = image.scaled(scale);

        let far_x = x + scaled.width;
        if far_x < viewport.width {
            x += viewport.width - far_x;
        }
        let far_y = y + scaled.height;
        if far_y < viewport.height {
            y += viewport.height - far_y;
        }

        Self {
            scale,
            x: clamp_axis(x, scaled.width, viewport.width),
            y: clamp_axis(y, scaled.height, viewport.height),
        }
    }

    /// Translate by `(dx, dy)`, clamped per axis to keep the viewport covered.
    pub fn panned(&self, dx: f32, dy: f32, image: Size, viewport: Size) -> Self {
        let scaled = image.scaled(self.scale);
        Self {
            scale: self.scale,
            x: clamp_axis(self.x + dx, scaled.width, viewport.width),
            y: clamp_axis(self.y + dy, scaled.height, viewport.height),
        }
    }

    /// Whether this placement covers the viewport with no gap on any edge.
    ///
    /// `tolerance` absorbs float rounding in the far-edge comparison.
    pub fn covers(&self, image: Size, viewport: Size, tolerance: f32) -> bool {
        let scaled = image.scaled(self.scale);
        self.scale + tolerance >= cover_scale(image, viewport)
            && self.x <= tolerance
            && self.y <= tolerance
            && self.x + scaled.width + tolerance >= viewport.width
            && self.y + scaled.height + tolerance >= viewport.height
    }

    /// Map a viewport pixel centre back into source image coordinates.
    pub fn to_source(&self, viewport_x: f32, viewport_y: f32) -> (f32, f32) {
        ((viewport_x - self.x) / self.scale, (viewport_y - self.y) / self.scale)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale {:.4} at ({:.1}, {:.1})", self.scale, self.x, self.y)
    }
}
