use crate::compose::{self, CanvasSize, ThumbnailRenderer, VectorArtifact};
use crate::config::DigitizeConfig;
use crate::error::{DigitizeError, DigitizeResult, ExportError, SaveError};
use crate::event::EditorEvent;
use crate::raster::RasterImage;
use crate::store::{InscriptionRecord, RecordMeta, RecordStore};
use crate::surface::EditingSurface;
use crate::vectorize::{self, ContourPath};

/// One editing session: the drawing surface plus the latest traced contours.
///
/// Contours are replaced wholesale on every [`InscriptionSession::digitize`];
/// strokes live in the surface's ledger and are only read here.
#[derive(Debug)]
pub struct InscriptionSession {
    config: DigitizeConfig,
    surface: EditingSurface,
    contours: Vec<ContourPath>,
    canvas: Option<CanvasSize>,
}

impl InscriptionSession {
    pub fn new(config: DigitizeConfig) -> Self {
        Self {
            surface: EditingSurface::new(config.brush),
            config,
            contours: Vec::new(),
            canvas: None,
        }
    }

    pub fn config(&self) -> &DigitizeConfig {
        &self.config
    }

    pub fn surface(&self) -> &EditingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut EditingSurface {
        &mut self.surface
    }

    pub fn contours(&self) -> &[ContourPath] {
        &self.contours
    }

    pub fn canvas(&self) -> Option<CanvasSize> {
        self.canvas
    }

    /// Fix the canvas size explicitly (e.g. drawing without a source image).
    /// The next [`InscriptionSession::digitize`] replaces it.
    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = Some(canvas);
    }

    pub fn set_threshold(&mut self, threshold: u8) {
        self.config.threshold = threshold;
    }

    /// Trace `image` at the configured threshold, replacing previous contours.
    ///
    /// The canvas takes the image's size. On error the session is left
    /// exactly as it was.
    pub fn digitize(&mut self, image: &RasterImage) -> DigitizeResult<usize> {
        let canvas = CanvasSize::from_pixels(image.width(), image.height()).ok_or_else(|| {
            DigitizeError::InvalidImage {
                width: image.width(),
                height: image.height(),
                len: image.data().len(),
            }
        })?;
        let contours = vectorize::digitize(image, self.config.threshold)?;
        let count = contours.len();
        self.contours = contours;
        self.canvas = Some(canvas);

        log::info!(
            "Digitized {}x{} image: {} contours at threshold {}",
            image.width(),
            image.height(),
            count,
            self.config.threshold
        );
        self.surface.notify(EditorEvent::ContoursChanged { count });
        Ok(count)
    }

    pub fn clear_contours(&mut self) {
        if self.contours.is_empty() {
            return;
        }
        self.contours.clear();
        self.surface.notify(EditorEvent::ContoursChanged { count: 0 });
    }

    /// Compose contours and the present stroke layer.
    ///
    /// Fails with [`ExportError::NothingToExport`] when there is no canvas or nothing visible on it.
    pub fn artifact(&self) -> Result<VectorArtifact, ExportError> {
        let canvas = self.canvas.ok_or(ExportError::NothingToExport)?;
        let artifact = compose::compose(
            canvas,
            self.config.background,
            &self.contours,
            self.surface.present(),
        );
        if artifact.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(artifact)
    }

    /// Render a thumbnail and write a record to `store`.
    ///
    /// Passing `existing` revises that record (same id and creation time).
    /// Nothing is written if composing or rendering fails.
    pub async fn save<S, R>(
        &self,
        store: &S,
        renderer: &R,
        meta: RecordMeta,
        existing: Option<&InscriptionRecord>,
    ) -> Result<InscriptionRecord, SaveError>
    where
        S: RecordStore + ?Sized,
        R: ThumbnailRenderer + ?Sized,
    {
        let artifact = self.artifact()?;
        let thumbnail =
            compose::render_thumbnail(renderer, &artifact, self.config.thumbnail_width).await?;

        let record = match existing {
            Some(previous) => previous.revise(meta, artifact.svg, thumbnail),
            None => InscriptionRecord::new(meta, artifact.svg, thumbnail),
        };
        store.put(&record)?;
        log::info!("Saved inscription {}", record.id);
        Ok(record)
    }
}
