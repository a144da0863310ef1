//! Software frame buffer
//!
//! Every frame is drawn on the CPU into an RGBA8 image, then handed to a
//! [`FramePresenter`](super::FramePresenter) to be put on screen.

use image::{imageops, Rgba, RgbaImage};

use crate::assets::ImageData;
use crate::foundation::math::{Point2, Rect, Vec4};

/// RGBA8 drawing surface with a top-left origin
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a transparent black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels
    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Match the framebuffer size; contents are discarded when the size changes
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() != (width, height) {
            self.pixels = RgbaImage::new(width, height);
        }
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Vec4) {
        let rgba = to_rgba8(color);
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Blend `sprite` so its center lands on `center`; parts off the canvas are clipped
    pub fn draw_sprite_centered(&mut self, sprite: &ImageData, center: Point2) {
        let x = (center.x - sprite.width() as f32 / 2.0).round() as i64;
        let y = (center.y - sprite.height() as f32 / 2.0).round() as i64;
        imageops::overlay(&mut self.pixels, sprite.pixels(), x, y);
    }

    /// Outline `rect` with a band `thickness` pixels wide, drawn inside the rectangle
    pub fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Vec4) {
        let rgba = to_rgba8(color);
        let x0 = rect.min.x.floor() as i64;
        let y0 = rect.min.y.floor() as i64;
        let x1 = rect.max.x.ceil() as i64;
        let y1 = rect.max.y.ceil() as i64;
        let t = i64::from(thickness);

        self.fill_span(x0, y0, x1, (y0 + t).min(y1), rgba);
        self.fill_span(x0, (y1 - t).max(y0), x1, y1, rgba);
        self.fill_span(x0, y0, (x0 + t).min(x1), y1, rgba);
        self.fill_span((x1 - t).max(x0), y0, x1, y1, rgba);
    }

    /// Borrow the pixels
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major, no padding
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    // Half-open [x0, x1) x [y0, y1), clipped to the canvas
    fn fill_span(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
        let x0 = x0.clamp(0, i64::from(self.width())) as u32;
        let x1 = x1.clamp(0, i64::from(self.width())) as u32;
        let y0 = y0.clamp(0, i64::from(self.height())) as u32;
        let y1 = y1.clamp(0, i64::from(self.height())) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, color);
            }
        }
    }
}

/// Convert a 0.0 to 1.0 RGBA color to bytes
pub fn to_rgba8(color: Vec4) -> Rgba<u8> {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(color.x), channel(color.y), channel(color.z), channel(color.w)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Vec4 {
        Vec4::new(1.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(4, 3);
        canvas.clear(Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert!(canvas.pixels().pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn test_sprite_centered() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
        let sprite = ImageData::solid_color(4, 2, [200, 100, 50, 255]);

        canvas.draw_sprite_centered(&sprite, Point2::new(5.0, 5.0));

        // Occupies x 3..7, y 4..6
        assert_eq!(canvas.pixels().get_pixel(3, 4), &Rgba([200, 100, 50, 255]));
        assert_eq!(canvas.pixels().get_pixel(6, 5), &Rgba([200, 100, 50, 255]));
        assert_eq!(canvas.pixels().get_pixel(2, 4), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(7, 5), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(3, 6), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_sprite_clipped_at_edges() {
        let mut canvas = Canvas::new(4, 4);
        let sprite = ImageData::solid_color(4, 4, [9, 9, 9, 255]);

        canvas.draw_sprite_centered(&sprite, Point2::new(0.0, 0.0));

        assert_eq!(canvas.pixels().get_pixel(1, 1), &Rgba([9, 9, 9, 255]));
        assert_eq!(canvas.pixels().get_pixel(2, 2), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_rect(Rect::from_xywh(2.0, 2.0, 10.0, 8.0), 2, red());

        let red = Rgba([255, 0, 0, 255]);
        assert_eq!(canvas.pixels().get_pixel(2, 2), &red);
        assert_eq!(canvas.pixels().get_pixel(3, 3), &red);
        assert_eq!(canvas.pixels().get_pixel(11, 9), &red);
        assert_eq!(canvas.pixels().get_pixel(7, 3), &red);
        // Interior and outside untouched
        assert_eq!(canvas.pixels().get_pixel(6, 6), &Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.pixels().get_pixel(12, 5), &Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.pixels().get_pixel(1, 2), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_stroke_rect_partly_off_canvas() {
        let mut canvas = Canvas::new(5, 5);
        canvas.stroke_rect(Rect::from_xywh(-3.0, -3.0, 6.0, 6.0), 1, red());

        assert_eq!(canvas.pixels().get_pixel(2, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(0, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.pixels().get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(red());
        canvas.resize(2, 2);
        assert_eq!(canvas.pixels().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));

        canvas.resize(3, 1);
        assert_eq!(canvas.size(), (3, 1));
        assert_eq!(canvas.as_raw().len(), 12);
        assert_eq!(canvas.pixels().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_color_conversion_clamps() {
        assert_eq!(to_rgba8(Vec4::new(2.0, -1.0, 0.5, 1.0)), Rgba([255, 0, 128, 255]));
    }
}
