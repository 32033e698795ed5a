use egui::Color32;
use futures::future::BoxFuture;

use crate::error::ExportError;
use crate::stroke::StrokeLayer;
use crate::svg::{self, CompositeMode, SvgPath};
use crate::vectorize::ContourPath;

/// Stroke color used for traced contours
pub const TRACE_STROKE_COLOR: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);
/// Stroke width used for traced contours
pub const TRACE_STROKE_WIDTH: f32 = 2.0;

/// Canvas dimensions in document units (pixels of the source image)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of a pixel grid, or `None` if a side does not fit in `u32`
    pub fn from_pixels(width: usize, height: usize) -> Option<Self> {
        Some(Self::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?))
    }
}

/// Serialized vector document plus the facts needed to render or store it
#[derive(Clone, Debug, PartialEq)]
pub struct VectorArtifact {
    pub size: CanvasSize,
    pub background: Option<Color32>,
    pub svg: String,
    /// Number of path elements in `svg`
    pub path_count: usize,
}

impl VectorArtifact {
    pub fn is_empty(&self) -> bool {
        self.path_count == 0
    }

    /// Height of a thumbnail `width` pixels wide, keeping the aspect ratio
    pub fn thumbnail_height(&self, width: u32) -> u32 {
        if self.size.width == 0 {
            return width.max(1);
        }
        let scale = f64::from(width) / f64::from(self.size.width);
        ((f64::from(self.size.height) * scale).round() as u32).max(1)
    }
}

/// Merge traced contours (painted first, default stroke) with the strokes of `layer`.
///
/// Strokes with fewer than two points have no visible segment and are left out.
pub fn compose(
    size: CanvasSize,
    background: Option<Color32>,
    contours: &[ContourPath],
    layer: &StrokeLayer,
) -> VectorArtifact {
    let traced = contours.iter().map(|c| SvgPath {
        d: svg::path_data(c.points(), c.is_closed()),
        stroke: TRACE_STROKE_COLOR,
        stroke_width: TRACE_STROKE_WIDTH,
        composite: CompositeMode::SourceOver,
    });

    let drawn = layer
        .strokes()
        .iter()
        .filter(|s| s.points().len() >= 2)
        .map(|s| SvgPath {
            d: svg::path_data(s.points(), false),
            stroke: s.color(),
            stroke_width: s.width(),
            composite: if s.is_eraser() {
                CompositeMode::DestinationOut
            } else {
                CompositeMode::SourceOver
            },
        });

    let paths: Vec<SvgPath> = traced.chain(drawn).filter(|p| !p.d.is_empty()).collect();
    log::debug!(
        "Composed {}x{} artifact from {} contours and {} strokes",
        size.width,
        size.height,
        contours.len(),
        layer.len()
    );

    VectorArtifact {
        size,
        background,
        svg: svg::document(size.width, size.height, &paths, background),
        path_count: paths.len(),
    }
}

/// What an external rendering surface is asked to rasterize
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbnailRequest {
    pub svg: String,
    pub width: u32,
    pub height: u32,
    /// Fill drawn under the document; opaque white unless the artifact sets its own
    pub background: Color32,
}

impl ThumbnailRequest {
    pub fn for_artifact(artifact: &VectorArtifact, width: u32) -> Self {
        let width = width.max(1);
        Self {
            svg: artifact.svg.clone(),
            width,
            height: artifact.thumbnail_height(width),
            background: artifact.background.unwrap_or(Color32::WHITE),
        }
    }
}

/// Rasterizes SVG markup into encoded image bytes (PNG), anti-aliased.
///
/// Implementations live outside this crate (browser canvas, GPU surface, ...).
pub trait ThumbnailRenderer {
    fn render<'a>(&'a self, request: &'a ThumbnailRequest) -> BoxFuture<'a, Result<Vec<u8>, ExportError>>;
}

/// Render a `width`-pixel-wide thumbnail of `artifact` through `renderer`
pub async fn render_thumbnail<R>(
    renderer: &R,
    artifact: &VectorArtifact,
    width: u32,
) -> Result<Vec<u8>, ExportError>
where
    R: ThumbnailRenderer + ?Sized,
{
    let request = ThumbnailRequest::for_artifact(artifact, width);
    log::debug!("Rendering {}x{} thumbnail", request.width, request.height);
    renderer.render(&request).await
}
