use std::future::Future;

use futures::channel::oneshot;

use crate::error::{DigitizeError, DigitizeResult};

/// Number of channels per pixel in a [`RasterImage`] buffer
pub const CHANNELS: usize = 4;

/// Immutable RGBA raster consumed by the binarizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>, // Raw RGBA samples, row-major
}

impl RasterImage {
    /// Wrap an RGBA buffer, rejecting empty images and buffers of the wrong length
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> DigitizeResult<Self> {
        let invalid = || DigitizeError::InvalidImage {
            width,
            height,
            len: data.len(),
        };

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(invalid)?;
        if data.len() != expected {
            return Err(invalid());
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fill a `width` x `height` image with a single RGBA value
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> DigitizeResult<Self> {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width.saturating_mul(height).saturating_mul(CHANNELS))
            .collect();
        Self::from_rgba(width, height, data)
    }

    /// Decode any bitmap format the `image` crate understands
    pub fn decode(bytes: &[u8]) -> DigitizeResult<Self> {
        let img = image::load_from_memory(bytes).map_err(|err| {
            log::error!("Failed to decode image: {}", err);
            DigitizeError::Decode(err.to_string())
        })?;
        log::debug!("Decoded image: {}x{}", img.width(), img.height());

        let rgba = img.to_rgba8();
        let width = rgba.width() as usize;
        let height = rgba.height() as usize;
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA samples of the pixel at (`x`, `y`), if in bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * CHANNELS;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }
}

/// Decode on a worker thread so the caller can keep handling input while it waits.
///
/// Resolves to [`DigitizeError::Decode`] if the worker goes away before answering.
pub fn decode_in_background(bytes: Vec<u8>) -> impl Future<Output = DigitizeResult<RasterImage>> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        // The receiver may have been dropped; nothing left to report to.
        let _ = tx.send(RasterImage::decode(&bytes));
    });

    async move {
        rx.await
            .map_err(|_| DigitizeError::Decode("decoder worker exited before finishing".to_owned()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = RasterImage::from_rgba(0, 3, Vec::new()).unwrap_err();
        assert!(matches!(err, DigitizeError::InvalidImage { width: 0, height: 3, .. }));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = RasterImage::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, DigitizeError::InvalidImage { len: 15, .. }));
    }

    #[test]
    fn test_pixel_lookup() {
        let mut data = vec![255u8; 2 * 2 * 4];
        data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let img = RasterImage::from_rgba(2, 2, data).unwrap();
        assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixels().count(), 4);
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode_png(3, 2, [10, 20, 30, 255]);
        let img = RasterImage::decode(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.pixel(2, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = RasterImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DigitizeError::Decode(_)));
    }

    #[test]
    fn test_decode_in_background() {
        let bytes = encode_png(4, 4, [0, 0, 0, 255]);
        let img = futures::executor::block_on(decode_in_background(bytes)).unwrap();
        assert_eq!(img.width(), 4);
    }
}
