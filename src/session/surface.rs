//! The interactive drawing surface session
//!
//! Owns the uploaded image, its fit transform, the committed strokes, the
//! stroke being drawn and the undo history. Every call runs on one logical
//! thread; only image decoding may happen elsewhere, and its result is applied
//! through [`DrawingSurface::complete_load`] with the ticket it was started with.

use image::RgbaImage;

use super::history::{History, Snapshot};
use crate::config::{BRUSH_STEP, BrushColor, MaskConfig, clamp_brush_size};
use crate::domain::{FitTransform, Point, Stroke, StrokeInProgress, SurfaceSize};
use crate::error::{MaskError, Result};
use crate::render::image::{compose_export, compose_pair, rasterize_mask};
use crate::render::surface::render_surface;
use crate::render::{EncodedImage, encode_png};
use crate::upload::{SourceImage, decode_image, decode_image_async};

/// Identifies one image load; only the newest ticket may complete
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a finished decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image replaced the previous session state
    Applied,
    /// A newer load was started meanwhile; the result was discarded
    Stale,
}

#[derive(Clone, Debug)]
struct LoadedImage {
    source: SourceImage,
    fit: FitTransform,
}

/// Explicitly owned drawing session, created when the UI mounts and dropped
/// when it unmounts
#[derive(Debug)]
pub struct DrawingSurface {
    config: MaskConfig,
    brush_size: u32,
    brush_color: BrushColor,
    loaded: Option<LoadedImage>,
    strokes: Vec<Stroke>,
    drawing: Option<StrokeInProgress>,
    history: History,
    generation: u64,
    pending: Option<u64>,
}

impl DrawingSurface {
    pub fn new(config: MaskConfig) -> Self {
        let config = config.sanitized();
        log::debug!(
            "Drawing surface created: {}x{}",
            config.surface_width,
            config.surface_height
        );
        Self {
            brush_size: config.brush_size,
            brush_color: config.brush_color,
            history: History::new(config.history_limit),
            config,
            loaded: None,
            strokes: Vec::new(),
            drawing: None,
            generation: 0,
            pending: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.surface_width, self.config.surface_height)
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn brush_color(&self) -> BrushColor {
        self.brush_color
    }

    /// Fit transform of the loaded image
    pub fn fit(&self) -> Option<&FitTransform> {
        self.loaded.as_ref().map(|l| &l.fit)
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    /// Committed strokes, oldest first
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether a decode has been started and not yet completed
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether drawing and export are currently allowed
    pub fn is_ready(&self) -> bool {
        self.ready().is_ok()
    }

    /// Whether a stroke is being drawn right now
    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    fn ready(&self) -> Result<&LoadedImage> {
        if self.pending.is_some() {
            return Err(MaskError::NotReady);
        }
        self.loaded.as_ref().ok_or(MaskError::NotReady)
    }

    // ========================================================================
    // Image loading
    // ========================================================================

    /// Start a new load; any older load still in flight becomes stale
    ///
    /// A stroke being drawn is kept until the new image is applied, but cannot
    /// be extended or committed while the decode is pending.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        LoadTicket(self.generation)
    }

    /// Apply the result of a decode started with `ticket`
    ///
    /// Stale tickets are discarded without touching state. A failed decode
    /// leaves the previous image, strokes and history as they were.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SourceImage>,
    ) -> Result<LoadOutcome> {
        if self.pending != Some(ticket.0) {
            log::debug!("Discarding stale image decode (ticket {})", ticket.0);
            return Ok(LoadOutcome::Stale);
        }
        self.pending = None;

        let source = result.inspect_err(|err| log::warn!("Image upload rejected: {}", err))?;
        let fit = FitTransform::fit(
            source.width(),
            source.height(),
            self.size(),
            self.config.fit_padding,
        )
        .ok_or(MaskError::EmptyImage)?;

        log::debug!(
            "Image loaded: {}x{}, scale {:.4}, offset ({:.2}, {:.2})",
            source.width(),
            source.height(),
            fit.scale(),
            fit.offset_x(),
            fit.offset_y()
        );

        self.loaded = Some(LoadedImage { source, fit });
        self.strokes.clear();
        self.drawing = None;
        self.history.reset(Snapshot::default());
        Ok(LoadOutcome::Applied)
    }

    /// Decode and apply an upload in one step
    ///
    /// A rejected upload returns before any state is touched.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<()> {
        let source = decode_image(bytes).inspect_err(|err| log::warn!("Upload rejected: {}", err))?;
        let ticket = self.begin_load();
        self.complete_load(ticket, Ok(source)).map(|_| ())
    }

    /// Decode an upload on the blocking pool, then apply it
    pub async fn load_image_async(&mut self, bytes: Vec<u8>) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = decode_image_async(bytes).await;
        self.complete_load(ticket, result)
    }

    // ========================================================================
    // Brush
    // ========================================================================

    /// Set the brush width for subsequent strokes, clamped to 1-100
    pub fn set_brush_size(&mut self, size: i64) -> u32 {
        let clamped = clamp_brush_size(size);
        if clamped as i64 != size {
            log::debug!("Brush size {} clamped to {}", size, clamped);
        }
        self.brush_size = clamped;
        clamped
    }

    pub fn increase_brush(&mut self) -> u32 {
        self.set_brush_size(self.brush_size as i64 + BRUSH_STEP as i64)
    }

    pub fn decrease_brush(&mut self) -> u32 {
        self.set_brush_size(self.brush_size as i64 - BRUSH_STEP as i64)
    }

    /// Set the brush color for subsequent strokes
    pub fn set_brush_color(&mut self, color: BrushColor) {
        self.brush_color = color;
    }

    // ========================================================================
    // Stroke capture
    // ========================================================================

    /// Pointer pressed: start a stroke at `point` (surface coordinates)
    pub fn begin_stroke(&mut self, point: Point) -> Result<()> {
        self.ready()?;
        if self.drawing.is_some() {
            // Missed release; keep what was drawn
            self.end_stroke()?;
        }
        self.drawing = Some(StrokeInProgress::new(
            point,
            self.brush_size as f32,
            self.brush_color,
        ));
        Ok(())
    }

    /// Pointer moved while pressed; ignored when no stroke is active
    pub fn extend_stroke(&mut self, point: Point) -> Result<()> {
        self.ready()?;
        if let Some(drawing) = self.drawing.as_mut() {
            drawing.push(point);
        }
        Ok(())
    }

    /// Pointer released: commit the stroke and take a history snapshot
    ///
    /// Returns whether a stroke was committed.
    pub fn end_stroke(&mut self) -> Result<bool> {
        self.ready()?;
        let Some(stroke) = self.drawing.take().and_then(|d| d.to_stroke()) else {
            return Ok(false);
        };

        log::debug!(
            "Stroke committed: {} commands, width {}",
            stroke.commands.len(),
            stroke.width
        );
        self.strokes.push(stroke);
        self.history.snapshot(Snapshot {
            strokes: self.strokes.clone(),
        });
        Ok(true)
    }

    // ========================================================================
    // Clear / undo / redo
    // ========================================================================

    /// Remove every stroke and restart history from the background-only state
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = None;
        if self.loaded.is_some() {
            self.history.reset(Snapshot::default());
        }
    }

    /// Restore the previous snapshot; returns false at the baseline
    pub fn undo(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.drawing = None;
        match self.history.undo() {
            Some(snapshot) => {
                self.strokes = snapshot.strokes.clone();
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot; returns false at the newest entry
    pub fn redo(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.drawing = None;
        match self.history.redo() {
            Some(snapshot) => {
                self.strokes = snapshot.strokes.clone();
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Rendering and export
    // ========================================================================

    /// Rasterize the mask at the original resolution without encoding it
    pub fn mask_image(&self) -> Result<RgbaImage> {
        let loaded = self.ready()?;
        rasterize_mask(
            loaded.source.rgba(),
            &self.strokes,
            &loaded.fit,
            self.config.overlay_alpha,
        )
    }

    /// Mask as PNG
    pub fn request_mask(&self) -> Result<EncodedImage> {
        let mask = self.mask_image()?;
        encode_png(&mask)
    }

    /// Mask composited over a fresh copy of the original, as PNG
    pub fn request_export(&self) -> Result<EncodedImage> {
        let mask = self.mask_image()?;
        let original = self.ready()?.source.rgba();
        encode_png(&compose_export(original, &mask))
    }

    /// Original and mask side by side, as PNG
    pub fn request_pair(&self) -> Result<EncodedImage> {
        let mask = self.mask_image()?;
        let original = self.ready()?.source.rgba();
        encode_png(&compose_pair(original, &mask))
    }

    /// Render what the surface currently shows, including a stroke in progress
    pub fn render_preview(&self) -> Result<RgbaImage> {
        let image = self
            .loaded
            .as_ref()
            .map(|l| (l.source.rgba(), &l.fit));
        let in_progress = self.drawing.as_ref().and_then(StrokeInProgress::to_stroke);
        render_surface(
            self.size(),
            self.config.background,
            image,
            self.strokes.iter().chain(in_progress.as_ref()),
        )
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(MaskConfig::default())
    }
}

impl Drop for DrawingSurface {
    fn drop(&mut self) {
        log::debug!("Drawing surface disposed");
    }
}
