//! Math utilities and types
//!
//! Screen space throughout the engine has its origin at the top-left corner of
//! the framebuffer, x growing right and y growing down, measured in pixels.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (also used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Axis-aligned rectangle in screen space
///
/// Containment is half-open: a point on `min` is inside, a point on `max` is not,
/// so two rectangles that share an edge never both claim the same pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Point2,
    /// Bottom-right corner (exclusive)
    pub max: Point2,
}

impl Rect {
    /// Create a rectangle from its two corners
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from a top-left position and a size
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Point2::new(x, y),
            max: Point2::new(x + width, y + height),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Size as a vector (width, height)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// A rectangle with zero or negative extent on either axis covers no pixels
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Check whether a point lies inside the rectangle
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// Check whether two rectangles share any area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Return a copy moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
