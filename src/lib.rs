//! Maskpaint is the editing core of a mask-based inpainting tool.
//!
//! A user loads an image, paints a soft-edged grayscale mask over it with a circular brush,
//! and the mask is exported as a PNG that travels with the image and a text prompt to a
//! hosted inpainting backend.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `ImageRef -> ImageSource` (bytes, data URI, file path, or fetched URL)
//! 2. **Paint**: pointer events are translated into image space, interpolated into stamps,
//!    and blended into a [`MaskBuffer`] (paint = max, erase = saturating subtract)
//! 3. **Render**: a [`RenderScheduler`] coalesces redraw requests into one pending
//!    [`FrameTicket`]; firing it composites the mask as a tinted overlay ([`FrameRGBA`])
//! 4. **Export**: the mask becomes an opaque grayscale PNG ([`EncodedMask`]) and, together with
//!    the source image and prompt, an [`InpaintRequest`] for an [`InpaintBackend`]
//!
//! [`EditorSession`] ties the pieces together behind a small event-driven API.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same image and pointer sequence always produce the same mask bytes.
//! - **No network IO**: remote images and the inpainting service sit behind traits.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod backend;
mod brush;
mod config;
mod export;
mod foundation;
mod input;
mod mask;
mod render;
mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Size, Vec2};
pub use crate::foundation::error::{MaskpaintError, MaskpaintResult};

pub use crate::assets::decode::{decode_image, load_image};
pub use crate::assets::source::{
    ImageFetcher, ImageRef, ImageSource, decode_data_uri, encode_data_uri, load_image_bytes,
};
pub use crate::backend::contract::{
    Acceleration, BackendError, CREDENTIAL_ENV_VAR, Credentials, ImageSize, ImageSizePreset,
    InpaintBackend, InpaintImage, InpaintParams, InpaintRequest, InpaintResponse, InpaintTimings,
    OutputFormat,
};
pub use crate::brush::config::{BrushConfig, BrushMode, FalloffProfile};
pub use crate::brush::engine::{BrushEngine, blend};
pub use crate::brush::stroke::{StrokeSamples, StrokeState, clip_segment, interpolate};
pub use crate::config::editor::EditorConfig;
pub use crate::export::mask_png::{
    EncodedMask, decode_mask_png, encode_frame_png, export_mask, mask_to_rgba8,
};
pub use crate::input::translate::{DisplayRect, InputTranslator};
pub use crate::mask::buffer::MaskBuffer;
pub use crate::render::compositor::{CompositeThreading, Compositor, FrameRGBA, OverlayStyle};
pub use crate::render::scheduler::{FrameTicket, RenderScheduler, SchedulerStats};
pub use crate::session::editor::EditorSession;
