use crate::error::{DigitizeError, DigitizeResult};
use crate::raster::RasterImage;

/// Luminance cutoff used when the caller has no preference
pub const DEFAULT_THRESHOLD: u8 = 128;

/// One ink/background bit per pixel, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BinaryMask {
    /// Build a mask from explicit bits (`true` = ink)
    pub fn from_bits(width: usize, height: usize, bits: Vec<bool>) -> DigitizeResult<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(bits.len()) {
            return Err(DigitizeError::InvalidImage {
                width,
                height,
                len: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Parse rows of `#` (ink) and `.` (background); handy for fixtures
    pub fn from_ascii(rows: &[&str]) -> DigitizeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let bits: Vec<bool> = rows
            .iter()
            .flat_map(|row| row.bytes().map(|b| b == b'#'))
            .collect();
        Self::from_bits(width, height, bits)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether (`x`, `y`) is an ink pixel; out-of-bounds reads as background
    pub fn is_ink(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.bits[y as usize * self.width + x as usize]
    }

    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

/// Rec. 709 luma of an sRGB sample; alpha is ignored
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)
}

/// Mark every pixel darker than `threshold` as ink
pub fn binarize(image: &RasterImage, threshold: u8) -> DigitizeResult<BinaryMask> {
    let cutoff = f32::from(threshold);
    let bits = image
        .pixels()
        .map(|px| luminance(px[0], px[1], px[2]) < cutoff)
        .collect();
    BinaryMask::from_bits(image.width(), image.height(), bits)
}
