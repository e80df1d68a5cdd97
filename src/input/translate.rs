use crate::foundation::core::{Canvas, Point, Size, Vec2};
use crate::foundation::error::{MaskpaintError, MaskpaintResult};

/// Where the image is currently drawn, in the pointer's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayRect {
    /// Top-left corner of the rendered image.
    pub origin: Point,
    /// Rendered size; may differ from the native image size.
    pub size: Size,
}

impl DisplayRect {
    /// Rectangle at the origin with the given rendered size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            origin: Point::ORIGIN,
            size: Size::new(width, height),
        }
    }

    /// Reject non-finite origins and empty or non-finite sizes.
    pub fn validate(&self) -> MaskpaintResult<()> {
        if !self.origin.is_finite() {
            return Err(MaskpaintError::validation("display origin must be finite"));
        }
        let Size { width, height } = self.size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(MaskpaintError::validation(format!(
                "display size must be positive (got {width}x{height})"
            )));
        }
        Ok(())
    }
}

/// Maps display-space pointer positions into image pixel space.
///
/// X and Y are scaled independently (`native / rendered`). Results are not clamped to the
/// image; the brush engine clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputTranslator {
    origin: Point,
    scale: Vec2,
}

impl InputTranslator {
    /// Build a translator for `native` pixels drawn into `display`.
    pub fn new(display: DisplayRect, native: Canvas) -> MaskpaintResult<Self> {
        display.validate()?;
        let DisplayRect { origin, size } = display;
        let native = native.size();
        let scale = Vec2::new(native.width / size.width, native.height / size.height);
        if !scale.is_finite() {
            return Err(MaskpaintError::validation(format!(
                "display size {}x{} is too small for a {}x{} image",
                size.width, size.height, native.width, native.height
            )));
        }
        Ok(Self { origin, scale })
    }

    /// Translator for an image drawn 1:1 at the origin.
    pub fn identity() -> Self {
        Self {
            origin: Point::ORIGIN,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Per-axis scale factors.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Convert a display-space point into image pixel space.
    pub fn to_image_space(&self, p: Point) -> Point {
        let local = p - self.origin;
        Point::new(local.x * self.scale.x, local.y * self.scale.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/translate.rs"]
mod tests;
