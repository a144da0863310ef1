//! Button placement
//!
//! Converts a list of sprite sizes into screen rectangles (top-left origin).

use crate::config::LayoutConfig;
use crate::foundation::math::{Point2, Rect, Vec2};

/// Fills columns top to bottom, then moves right
///
/// Every cell is as large as the largest sprite plus `spacing`, and columns are
/// at least `min_column_stride` apart, so no two rectangles can overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Top-left corner of the first cell
    pub origin: Point2,
    /// Cells per column
    pub rows_per_column: usize,
    /// Gap added to the cell size on both axes
    pub spacing: f32,
    /// Minimum horizontal distance between column origins
    pub min_column_stride: f32,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl ColumnLayout {
    /// Build from configuration
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            origin: Point2::new(config.origin[0], config.origin[1]),
            rows_per_column: config.rows_per_column,
            spacing: config.spacing,
            min_column_stride: config.min_column_stride,
        }
    }

    /// Place one rectangle per `(width, height)` entry, in order
    pub fn place(&self, sizes: &[(u32, u32)]) -> Vec<Rect> {
        let rows = self.rows_per_column.max(1);

        let cell_width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0) as f32 + self.spacing;
        let cell_height = sizes.iter().map(|&(_, h)| h).max().unwrap_or(0) as f32 + self.spacing;
        let column_stride = cell_width.max(self.min_column_stride);

        sizes
            .iter()
            .enumerate()
            .map(|(i, &(width, height))| {
                let column = (i / rows) as f32;
                let row = (i % rows) as f32;
                let offset = Vec2::new(column * column_stride, row * cell_height);
                Rect::from_xywh(0.0, 0.0, width as f32, height as f32).translated(self.origin.coords + offset)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_two_columns() {
        let layout = ColumnLayout::default();
        let rects = layout.place(&[(200, 200); 6]);

        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], Rect::from_xywh(100.0, 0.0, 200.0, 200.0));
        assert_eq!(rects[2], Rect::from_xywh(100.0, 400.0, 200.0, 200.0));
        assert_eq!(rects[3], Rect::from_xywh(420.0, 0.0, 200.0, 200.0));
        assert_eq!(rects[5], Rect::from_xywh(420.0, 400.0, 200.0, 200.0));
    }

    #[test]
    fn test_mixed_sizes_never_overlap() {
        let layout = ColumnLayout {
            origin: Point2::origin(),
            rows_per_column: 2,
            spacing: 4.0,
            min_column_stride: 0.0,
        };
        let rects = layout.place(&[(50, 80), (120, 30), (90, 90), (10, 10), (130, 5)]);

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
        // Column stride is the widest sprite plus spacing
        assert_relative_eq!(rects[2].min.x, 134.0);
        assert_relative_eq!(rects[1].min.y, 94.0);
    }

    #[test]
    fn test_rect_keeps_own_sprite_size() {
        let rects = ColumnLayout::default().place(&[(200, 150), (100, 120)]);
        assert_relative_eq!(rects[1].width(), 100.0);
        assert_relative_eq!(rects[1].height(), 120.0);
        assert_relative_eq!(rects[1].min.y, 150.0);
    }

    #[test]
    fn test_zero_rows_treated_as_one() {
        let layout = ColumnLayout {
            rows_per_column: 0,
            ..ColumnLayout::default()
        };
        let rects = layout.place(&[(10, 10), (10, 10)]);
        assert_relative_eq!(rects[1].min.x, 420.0);
        assert_relative_eq!(rects[1].min.y, 0.0);
    }
}
