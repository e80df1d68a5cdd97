use crate::{
    assets::decode::decode_image,
    assets::source::{ImageFetcher, ImageRef, ImageSource, encode_data_uri, load_image_bytes},
    backend::contract::{InpaintBackend, InpaintParams, InpaintRequest, InpaintResponse},
    brush::config::{BrushConfig, BrushMode},
    brush::engine::BrushEngine,
    brush::stroke::StrokeState,
    config::editor::EditorConfig,
    export::mask_png::{EncodedMask, encode_frame_png, export_mask},
    foundation::core::{Point, Rect},
    foundation::error::{MaskpaintError, MaskpaintResult},
    input::translate::{DisplayRect, InputTranslator},
    mask::buffer::MaskBuffer,
    render::compositor::{Compositor, FrameRGBA},
    render::scheduler::{FrameTicket, RenderScheduler, SchedulerStats},
};

/// The loaded image and its mask. Replaced as a unit, never mutated piecemeal across loads.
struct Document {
    image: ImageSource,
    mask: MaskBuffer,
    origin: Option<ImageRef>,
    translator: InputTranslator,
}

/// One interactive mask-editing session.
///
/// Owns the image, its mask, the brush, and the render scheduler. Pointer handlers mutate the
/// mask synchronously; the tick source drives compositing through [`EditorSession::on_frame`]
/// (or [`EditorSession::flush`] in headless use). The mask is never lent out mutably; exports
/// are owned copies.
pub struct EditorSession {
    doc: Option<Document>,
    brush: BrushConfig,
    engine: BrushEngine,
    compositor: Compositor,
    scheduler: RenderScheduler,
    stroke: StrokeState,
    display: Option<DisplayRect>,
    busy: bool,
    fetcher: Option<Box<dyn ImageFetcher>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        let cfg = EditorConfig::default();
        Self::from_parts(&cfg)
    }
}

impl EditorSession {
    /// Session configured from `config`.
    pub fn new(config: &EditorConfig) -> MaskpaintResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: &EditorConfig) -> Self {
        Self {
            doc: None,
            brush: config.brush,
            engine: BrushEngine::new(config.falloff),
            compositor: Compositor::new(config.overlay, config.composite),
            scheduler: RenderScheduler::new(),
            stroke: StrokeState::default(),
            display: None,
            busy: false,
            fetcher: None,
        }
    }

    /// Install the resolver used for remote image URLs.
    pub fn set_fetcher(&mut self, fetcher: Box<dyn ImageFetcher>) {
        self.fetcher = Some(fetcher);
    }

    /// Load a new image, replacing the current image and mask.
    ///
    /// Any stroke in progress is discarded and the pending render is cancelled before the new
    /// mask exists. On failure the session is left with no image; editing calls are no-ops until
    /// a later load succeeds.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %source.describe()))]
    pub fn load_image(&mut self, source: &ImageRef) -> MaskpaintResult<()> {
        self.discard_document();
        let decoded = load_image_bytes(source, self.fetcher.as_deref())
            .and_then(|bytes| decode_image(&bytes));
        match decoded {
            Ok(image) => self.install(image, Some(source.clone())),
            Err(e) => {
                tracing::warn!(error = %e, "image failed to load; editing disabled");
                Err(e)
            }
        }
    }

    /// Use an already decoded image.
    pub fn load_decoded(&mut self, image: ImageSource) -> MaskpaintResult<()> {
        self.discard_document();
        self.install(image, None)
    }

    fn install(&mut self, image: ImageSource, origin: Option<ImageRef>) -> MaskpaintResult<()> {
        let translator = match self.display {
            Some(d) => InputTranslator::new(d, image.canvas())?,
            None => InputTranslator::identity(),
        };
        tracing::debug!(w = image.width(), h = image.height(), "image loaded");
        self.doc = Some(Document {
            mask: MaskBuffer::new(image.canvas()),
            image,
            origin,
            translator,
        });
        self.scheduler.request_render();
        Ok(())
    }

    fn discard_document(&mut self) {
        self.stroke.end();
        self.scheduler.cancel();
        self.doc = None;
    }

    /// Drop the image, mask, stroke and any pending render.
    pub fn reset(&mut self) {
        self.discard_document();
    }

    /// Set where the image is drawn; pointer events are then taken in display coordinates.
    pub fn set_display(&mut self, display: DisplayRect) -> MaskpaintResult<()> {
        display.validate()?;
        if let Some(doc) = &mut self.doc {
            doc.translator = InputTranslator::new(display, doc.image.canvas())?;
        }
        self.display = Some(display);
        Ok(())
    }

    /// Take pointer events as image-space coordinates again.
    pub fn clear_display(&mut self) {
        self.display = None;
        if let Some(doc) = &mut self.doc {
            doc.translator = InputTranslator::identity();
        }
    }

    /// Current brush.
    pub fn brush(&self) -> BrushConfig {
        self.brush
    }

    /// Replace the brush; applies to the next stamp, even mid-stroke.
    pub fn set_brush(&mut self, brush: BrushConfig) -> MaskpaintResult<()> {
        brush.validate()?;
        self.brush = brush;
        Ok(())
    }

    /// Set the radius, clamped to the supported range.
    pub fn set_brush_radius(&mut self, radius: u32) {
        self.brush.radius = BrushConfig::clamp_radius(radius);
    }

    /// Set paint or erase.
    pub fn set_brush_mode(&mut self, mode: BrushMode) {
        self.brush.mode = mode;
    }

    /// Flip between paint and erase.
    pub fn toggle_eraser(&mut self) {
        self.brush.mode = self.brush.mode.toggled();
    }

    /// Block new strokes while a generation request is in flight.
    ///
    /// Becoming busy ends any stroke in progress.
    pub fn set_busy(&mut self, busy: bool) {
        if busy {
            self.finish_stroke();
        }
        self.busy = busy;
    }

    /// `true` while generation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// `true` between pointer-down and pointer-up.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }

    /// Start a stroke at `p` and stamp it. Returns `false` if editing is unavailable.
    pub fn pointer_down(&mut self, p: Point) -> bool {
        if self.busy {
            return false;
        }
        let Some(doc) = &self.doc else {
            return false;
        };
        let pt = self.stroke.begin(doc.translator.to_image_space(p));
        tracing::debug!(
            x = pt.x,
            y = pt.y,
            radius = self.brush.radius,
            mode = ?self.brush.mode,
            "stroke begin"
        );
        self.stamp(pt);
        true
    }

    /// Continue the stroke to `p`, stamping every interpolated sample.
    pub fn pointer_move(&mut self, p: Point) {
        let Some(doc) = &self.doc else {
            return;
        };
        let to = doc.translator.to_image_space(p);
        // Stamps farther than the radius from the mask cannot touch it.
        let margin = f64::from(self.brush.radius) + 1.0;
        let size = doc.mask.canvas().size();
        let reach = Rect::new(-margin, -margin, size.width + margin, size.height + margin);
        let Some(samples) = self.stroke.extend_within(to, self.brush.radius, reach) else {
            return;
        };
        for s in samples {
            self.stamp(s);
        }
    }

    /// End the stroke (if any) and force a render so the final segment shows immediately.
    ///
    /// Returns `None` only when no image is loaded.
    pub fn pointer_up(&mut self) -> Option<FrameTicket> {
        self.finish_stroke()
    }

    /// Same as [`EditorSession::pointer_up`]; leaving the surface ends the gesture.
    pub fn pointer_leave(&mut self) -> Option<FrameTicket> {
        self.finish_stroke()
    }

    fn finish_stroke(&mut self) -> Option<FrameTicket> {
        if let Some(stamps) = self.stroke.end() {
            tracing::debug!(stamps, "stroke end");
        }
        self.doc.as_ref()?;
        Some(self.scheduler.force_render())
    }

    /// Replay a whole stroke (down, moves, up) through the pointer handlers.
    pub fn replay_stroke(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if !self.pointer_down(*first) {
            return;
        }
        for &p in rest {
            self.pointer_move(p);
        }
        self.pointer_up();
    }

    fn stamp(&mut self, p: Point) {
        let Some(doc) = &mut self.doc else {
            return;
        };
        self.engine.stamp(&mut doc.mask, p, &self.brush);
        self.scheduler.request_render();
    }

    /// Ticket of the composite pass waiting for the next tick, if any.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.scheduler.pending()
    }

    /// Tick-source callback. Composites only when `ticket` is the live pending pass.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> MaskpaintResult<Option<FrameRGBA>> {
        if !self.scheduler.fire(ticket) {
            return Ok(None);
        }
        self.render_now()
    }

    /// Fire whatever pass is pending (headless tick).
    pub fn flush(&mut self) -> MaskpaintResult<Option<FrameRGBA>> {
        match self.scheduler.pending() {
            Some(t) => self.on_frame(t),
            None => Ok(None),
        }
    }

    /// Composite the current state immediately, bypassing the scheduler.
    pub fn render_now(&self) -> MaskpaintResult<Option<FrameRGBA>> {
        let Some(doc) = &self.doc else {
            return Ok(None);
        };
        tracing::trace!("composite pass");
        self.compositor.render(&doc.image, &doc.mask).map(Some)
    }

    /// Scheduler counters.
    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Loaded image, if any.
    pub fn image(&self) -> Option<&ImageSource> {
        self.doc.as_ref().map(|d| &d.image)
    }

    /// Current mask, read-only.
    pub fn mask(&self) -> Option<&MaskBuffer> {
        self.doc.as_ref().map(|d| &d.mask)
    }

    /// Encoded copy of the mask, or `None` when no image is loaded.
    pub fn get_mask(&self) -> MaskpaintResult<Option<EncodedMask>> {
        export_mask(self.mask())
    }

    /// Build a generation request for the current image and mask.
    ///
    /// Fails with a precondition error when no image is loaded or nothing has been painted.
    #[tracing::instrument(level = "debug", skip(self, params))]
    pub fn prepare_request(
        &self,
        prompt: &str,
        params: InpaintParams,
    ) -> MaskpaintResult<InpaintRequest> {
        let Some(doc) = &self.doc else {
            return Err(MaskpaintError::precondition("upload an image first"));
        };
        if doc.mask.is_blank() {
            return Err(MaskpaintError::precondition(
                "draw a mask on the image first",
            ));
        }
        let Some(mask) = self.get_mask()? else {
            return Err(MaskpaintError::precondition("no mask available"));
        };
        let image_url = image_reference(doc)?;
        Ok(InpaintRequest::new(
            image_url,
            mask.to_data_uri(),
            prompt,
            params,
        )?)
    }

    /// Prepare a request and run it on `backend`, holding the busy flag for the duration.
    pub fn generate(
        &mut self,
        backend: &dyn InpaintBackend,
        prompt: &str,
        params: InpaintParams,
    ) -> MaskpaintResult<InpaintResponse> {
        let request = self.prepare_request(prompt, params)?;
        self.set_busy(true);
        let result = backend.inpaint(&request);
        self.set_busy(false);
        let response = result?;
        tracing::debug!(images = response.images.len(), "generation finished");
        Ok(response)
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("image", &self.image())
            .field("mask", &self.mask())
            .field("brush", &self.brush)
            .field("drawing", &self.stroke.is_active())
            .field("busy", &self.busy)
            .field("pending", &self.scheduler.pending())
            .finish()
    }
}

/// How the backend should reference the base image.
///
/// Data URIs and remote URLs pass through; anything else is inlined as a data URI.
fn image_reference(doc: &Document) -> MaskpaintResult<String> {
    match &doc.origin {
        Some(ImageRef::DataUri(uri)) => Ok(uri.clone()),
        Some(ImageRef::Url(url)) => Ok(url.clone()),
        Some(src @ (ImageRef::Bytes(_) | ImageRef::Path(_))) => {
            let bytes = load_image_bytes(src, None)?;
            let mime = image::guess_format(&bytes)
                .map(|f| f.to_mime_type())
                .unwrap_or("application/octet-stream");
            Ok(encode_data_uri(mime, &bytes))
        }
        None => {
            let frame = FrameRGBA {
                width: doc.image.width(),
                height: doc.image.height(),
                data: doc.image.rgba8().to_vec(),
            };
            Ok(encode_data_uri("image/png", &encode_frame_png(&frame)?))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
