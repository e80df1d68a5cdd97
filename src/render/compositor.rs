use rayon::prelude::*;

use crate::{
    assets::source::ImageSource,
    foundation::core::Rgb8,
    foundation::error::{MaskpaintError, MaskpaintResult},
    foundation::math::mix_channel,
    mask::buffer::MaskBuffer,
};

/// Straight RGBA8 frame ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
}

/// Tint drawn over masked pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayStyle {
    /// Overlay color.
    pub tint: Rgb8,
    /// Overlay opacity at full mask intensity, `[0, 1]`.
    pub alpha: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            tint: Rgb8::new(0, 255, 0),
            alpha: 0.4,
        }
    }
}

impl OverlayStyle {
    /// Reject opacities outside `[0, 1]`.
    pub fn validate(&self) -> MaskpaintResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(MaskpaintError::validation(format!(
                "overlay alpha must be in [0, 1] (got {})",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Row parallelism for composite passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeThreading {
    /// Split rows across the rayon pool when `true`.
    pub parallel: bool,
    /// Images smaller than this many pixels are composited on the calling thread.
    pub min_parallel_pixels: usize,
}

impl Default for CompositeThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_pixels: 256 * 256,
        }
    }
}

/// Blends the mask overlay onto a working copy of the base image.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    style: OverlayStyle,
    threading: CompositeThreading,
}

impl Compositor {
    /// Compositor with the given overlay and threading policy.
    pub fn new(style: OverlayStyle, threading: CompositeThreading) -> Self {
        Self { style, threading }
    }

    /// Overlay style in use.
    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    /// Produce the displayable frame.
    ///
    /// Unmasked pixels are copied unchanged. Masked pixels move toward the tint by
    /// `mask / 255 * alpha`; the alpha channel is left alone. The base image is never written.
    #[tracing::instrument(level = "trace", skip_all, fields(w = image.width(), h = image.height()))]
    pub fn render(&self, image: &ImageSource, mask: &MaskBuffer) -> MaskpaintResult<FrameRGBA> {
        if image.canvas() != mask.canvas() {
            return Err(MaskpaintError::validation(format!(
                "mask {}x{} does not match image {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }

        let mut data = image.rgba8().to_vec();
        let factors = blend_factors(self.style.alpha);
        let tint = self.style.tint.channels();
        let width = image.width() as usize;

        let tint_row = |(dst, row): (&mut [u8], &[u8])| {
            for (px, &m) in dst.chunks_exact_mut(4).zip(row) {
                if m == 0 {
                    continue;
                }
                let t = factors[usize::from(m)];
                for c in 0..3 {
                    px[c] = mix_channel(px[c], tint[c], t);
                }
            }
        };

        if self.threading.parallel
            && image.canvas().pixel_count() >= self.threading.min_parallel_pixels
        {
            data.par_chunks_exact_mut(width * 4)
                .zip(mask.as_slice().par_chunks_exact(width))
                .for_each(tint_row);
        } else {
            data.chunks_exact_mut(width * 4)
                .zip(mask.as_slice().chunks_exact(width))
                .for_each(tint_row);
        }

        Ok(FrameRGBA {
            width: image.width(),
            height: image.height(),
            data,
        })
    }
}

fn blend_factors(alpha: f64) -> [f64; 256] {
    let mut out = [0.0; 256];
    for (m, f) in out.iter_mut().enumerate() {
        *f = (m as f64 / 255.0) * alpha;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
