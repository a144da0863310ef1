//! Image loading utilities for sprite data
//!
//! Provides JPEG and PNG decoding into RGBA8 pixels ready for blitting onto the canvas.

use image::{Rgba, RgbaImage};

use super::{AssetError, AssetSource};

/// Decoded RGBA8 image
#[derive(Debug, Clone)]
pub struct ImageData {
    pixels: RgbaImage,
}

impl ImageData {
    /// Load and decode the image at `path` from `source`
    pub fn load(source: &dyn AssetSource, path: &str) -> Result<Self, AssetError> {
        let bytes = source.read(path)?;
        let image = Self::from_bytes(&bytes).map_err(|e| match e {
            AssetError::DecodeFailed { reason, .. } => AssetError::DecodeFailed {
                path: path.to_string(),
                reason,
            },
            other => other,
        })?;

        log::info!("Loaded image {}x{} from {}", image.width(), image.height(), path);
        Ok(image)
    }

    /// Decode an image held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| AssetError::DecodeFailed {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        })?;

        let pixels = img.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(AssetError::InvalidData("Image has no pixels".to_string()));
        }

        Ok(Self { pixels })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(color)),
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the pixel buffer
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.pixels.as_raw().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::EmbeddedSource;
    use crate::testing::png_bytes;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(img.pixels().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_decode_png_from_source() {
        let mut source = EmbeddedSource::new();
        source.insert("image/cow.png", png_bytes(3, 2, [10, 20, 30, 255]));

        let loaded = ImageData::load(&source, "image/cow.png").unwrap();
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
        assert_eq!(loaded.pixels().get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_garbage_bytes_fail_with_path() {
        let mut source = EmbeddedSource::new();
        source.insert("image/cow.jpg", b"not an image".to_vec());

        match ImageData::load(&source, "image/cow.jpg") {
            Err(AssetError::DecodeFailed { path, .. }) => assert_eq!(path, "image/cow.jpg"),
            other => panic!("expected decode failure, got {:?}", other),
        }
    }
}
