use anyhow::Context;

use crate::{
    assets::source::{ImageFetcher, ImageRef, ImageSource, load_image_bytes},
    foundation::error::{MaskpaintError, MaskpaintResult},
};

/// Decode encoded image bytes (PNG, JPEG, ...) into an [`ImageSource`].
///
/// Pixels stay straight RGBA8; the overlay blend works on unpremultiplied channels.
pub fn decode_image(bytes: &[u8]) -> MaskpaintResult<ImageSource> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| MaskpaintError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageSource::from_rgba8(width, height, rgba.into_raw())
        .map_err(|e| MaskpaintError::decode(e.to_string()))
}

/// Resolve and decode an [`ImageRef`] in one step.
pub fn load_image(
    source: &ImageRef,
    fetcher: Option<&dyn ImageFetcher>,
) -> MaskpaintResult<ImageSource> {
    let bytes = load_image_bytes(source, fetcher)?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
