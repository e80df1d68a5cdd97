use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{MaskpaintError, MaskpaintResult};

/// Decoded raster loaded once per user-selected image.
///
/// Pixels are straight (non-premultiplied) row-major RGBA8 behind an `Arc`, so clones share the
/// store and nothing can mutate it in place.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageSource {
    canvas: Canvas,
    rgba8: Arc<Vec<u8>>,
}

impl ImageSource {
    /// Wrap raw RGBA8 pixels. The buffer length must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> MaskpaintResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let expected = canvas.pixel_count() * 4;
        if rgba8.len() != expected {
            return Err(MaskpaintError::validation(format!(
                "rgba8 buffer length {} does not match {width}x{height} (expected {expected})",
                rgba8.len()
            )));
        }
        Ok(Self {
            canvas,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Native dimensions.
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

    /// Read-only view of the RGBA8 pixels.
    pub fn rgba8(&self) -> &[u8] {
        self.rgba8.as_slice()
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSource")
            .field("width", &self.canvas.width)
            .field("height", &self.canvas.height)
            .field("rgba8_ptr", &Arc::as_ptr(&self.rgba8))
            .finish()
    }
}

/// Where an image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageRef {
    /// Encoded image bytes already in memory.
    Bytes(Vec<u8>),
    /// Inline `data:<mime>;base64,<payload>` URI.
    DataUri(String),
    /// Local file.
    Path(PathBuf),
    /// Remote URL, resolved through an [`ImageFetcher`].
    Url(String),
}

impl ImageRef {
    /// Classify a user-supplied string.
    ///
    /// `data:` becomes [`ImageRef::DataUri`], `file://` a [`ImageRef::Path`], `http(s)://` a
    /// [`ImageRef::Url`]; anything else is taken as a filesystem path.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("data:") {
            Self::DataUri(trimmed.to_string())
        } else if let Some(rest) = trimmed.strip_prefix("file://") {
            Self::Path(PathBuf::from(rest))
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Short description used in log fields and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
            Self::DataUri(s) => format!("<data uri, {} chars>", s.len()),
            Self::Path(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
        }
    }
}

/// Resolves remote image URLs to encoded bytes.
///
/// The crate ships no network transport; embedders plug one in here.
pub trait ImageFetcher {
    /// Fetch the encoded image behind `url`.
    fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

/// Resolve an [`ImageRef`] to encoded image bytes.
pub fn load_image_bytes(
    source: &ImageRef,
    fetcher: Option<&dyn ImageFetcher>,
) -> MaskpaintResult<Vec<u8>> {
    match source {
        ImageRef::Bytes(b) => Ok(b.clone()),
        ImageRef::DataUri(uri) => decode_data_uri(uri).map(|(_, bytes)| bytes),
        ImageRef::Path(p) => read_path(p),
        ImageRef::Url(url) => {
            let Some(fetcher) = fetcher else {
                return Err(MaskpaintError::decode(format!(
                    "no fetcher configured for remote image '{url}'"
                )));
            };
            fetcher
                .fetch(url)
                .with_context(|| format!("fetch image '{url}'"))
                .map_err(|e| MaskpaintError::decode(format!("{e:#}")))
        }
    }
}

fn read_path(path: &Path) -> MaskpaintResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))
        .map_err(|e| MaskpaintError::decode(format!("{e:#}")))
}

/// Split a base64 data URI into its media type and decoded payload.
pub fn decode_data_uri(uri: &str) -> MaskpaintResult<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| MaskpaintError::decode("data uri must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| MaskpaintError::decode("data uri is missing ',' separator"))?;
    let Some(mime) = meta.strip_suffix(";base64") else {
        return Err(MaskpaintError::decode(
            "only base64-encoded data uris are supported",
        ));
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| MaskpaintError::decode(format!("data uri payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}

/// Encode bytes as a base64 data URI with the given media type.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
