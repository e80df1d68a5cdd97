use crate::foundation::core::Canvas;

/// Single-channel mask intensity, one `u8` per image pixel.
///
/// Dimensions are fixed at construction and always match the owning image. The buffer is only
/// written by the brush engine; everything else reads it.
#[derive(Clone, PartialEq, Eq)]
pub struct MaskBuffer {
    canvas: Canvas,
    data: Vec<u8>,
}

impl MaskBuffer {
    /// All-zero mask covering `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.pixel_count()],
        }
    }

    /// Mask dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Intensity at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        Some(self.data[self.canvas.index(x, y)])
    }

    /// Row-major intensities.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// `true` when no cell has been painted.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Number of non-zero cells.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl std::fmt::Debug for MaskBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskBuffer")
            .field("width", &self.canvas.width)
            .field("height", &self.canvas.height)
            .field("coverage", &self.coverage())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/buffer.rs"]
mod tests;
