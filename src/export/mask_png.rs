use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::source::encode_data_uri,
    foundation::error::{MaskpaintError, MaskpaintResult},
    mask::buffer::MaskBuffer,
    render::compositor::FrameRGBA,
};

/// Encoded mask image handed to the inpainting backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedMask {
    /// Width in pixels (same as the source image).
    pub width: u32,
    /// Height in pixels (same as the source image).
    pub height: u32,
    /// PNG bytes: R = G = B = intensity, A = 255.
    pub png: Vec<u8>,
}

impl EncodedMask {
    /// `data:image/png;base64,...` form of the mask.
    pub fn to_data_uri(&self) -> String {
        encode_data_uri("image/png", &self.png)
    }
}

/// Expand mask intensities to opaque grayscale RGBA8 (`[v, v, v, 255]` per pixel).
pub fn mask_to_rgba8(mask: &MaskBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(mask.as_slice().len() * 4);
    for &v in mask.as_slice() {
        out.extend_from_slice(&[v, v, v, 255]);
    }
    out
}

/// Encode the mask as PNG, or `None` when no mask exists yet.
#[tracing::instrument(level = "debug", skip_all)]
pub fn export_mask(mask: Option<&MaskBuffer>) -> MaskpaintResult<Option<EncodedMask>> {
    let Some(mask) = mask else {
        return Ok(None);
    };
    let png = encode_png(&mask_to_rgba8(mask), mask.width(), mask.height())?;
    tracing::debug!(bytes = png.len(), coverage = mask.coverage(), "mask exported");
    Ok(Some(EncodedMask {
        width: mask.width(),
        height: mask.height(),
        png,
    }))
}

/// Encode a composited frame as PNG.
pub fn encode_frame_png(frame: &FrameRGBA) -> MaskpaintResult<Vec<u8>> {
    encode_png(&frame.data, frame.width, frame.height)
}

/// Decode a mask PNG back to intensities (taken from the red channel).
pub fn decode_mask_png(bytes: &[u8]) -> MaskpaintResult<(u32, u32, Vec<u8>)> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .context("decode mask png")
        .map_err(|e| MaskpaintError::decode(format!("{e:#}")))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let values = img.pixels().map(|p| p.0[0]).collect();
    Ok((width, height, values))
}

fn encode_png(rgba8: &[u8], width: u32, height: u32) -> MaskpaintResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba8.to_vec()).ok_or_else(|| {
        MaskpaintError::encode(format!("rgba8 buffer does not match {width}x{height}"))
    })?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| MaskpaintError::encode(format!("write png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/mask_png.rs"]
mod tests;
