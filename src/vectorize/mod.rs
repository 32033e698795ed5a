//! Raster-to-vector extraction: luminance threshold, then a wall-following
//! boundary walk over the resulting ink mask.

mod threshold;
mod trace;

pub use threshold::{BinaryMask, DEFAULT_THRESHOLD, binarize, luminance};
pub use trace::{ContourPath, MIN_PATH_POINTS, trace_contours};

use crate::error::DigitizeResult;
use crate::raster::RasterImage;

/// Binarize `image` at `threshold` and trace the resulting mask.
///
/// An image without ink is not an error; it simply yields no contours.
pub fn digitize(image: &RasterImage, threshold: u8) -> DigitizeResult<Vec<ContourPath>> {
    let mask = binarize(image, threshold)?;
    log::debug!(
        "Binarized {}x{} image at threshold {}: {} ink pixels",
        mask.width(),
        mask.height(),
        threshold,
        mask.ink_count()
    );
    Ok(trace_contours(&mask))
}
