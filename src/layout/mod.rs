//! Waterfall (masonry) layout
//!
//! A layout pass takes an ordered list of images and distributes them over a
//! fixed number of equally wide columns. Each image goes to the column that
//! is currently the shortest; ties go to the lowest index. Column heights
//! grow by the image's height once scaled to the column width.
//!
//! The pass is greedy and single-pass: every placement only looks at the
//! state left behind by the placements before it.

pub mod waterfall;

pub use waterfall::{
    arrange, initialize_columns, place_image, scaled_height, shortest_column, Column,
    WaterfallLayout,
};

/// Default minimum width of a single column, in pixels.
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 200.0;

/// Default upper bound on the number of columns.
pub const DEFAULT_MAX_COLUMNS: usize = 8;

/// Number of columns that fit in `container_width`.
///
/// `floor(container_width / min_column_width)` clamped to
/// `[1, max_columns]`. Total: NaN, zero or negative widths give 1, a
/// non-positive `min_column_width` gives `max_columns`, and a `max_columns`
/// of 0 is treated as 1.
pub fn column_count(container_width: f64, min_column_width: f64, max_columns: usize) -> usize {
    let max_columns = max_columns.max(1);
    if min_column_width <= 0.0 {
        return max_columns;
    }
    // `as` saturates: NaN and negatives become 0, +inf becomes usize::MAX.
    let possible = (container_width / min_column_width).floor() as usize;
    possible.clamp(1, max_columns)
}

/// Knobs for turning a container width into a column grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Columns narrower than this are never produced (except when the
    /// container itself is narrower, in which case one column is used)
    pub min_column_width: f64,
    /// Visual density ceiling
    pub max_columns: usize,
    /// Horizontal space between adjacent columns
    pub gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_columns: DEFAULT_MAX_COLUMNS,
            gap: 0.0,
        }
    }
}

impl LayoutConfig {
    pub fn column_count(&self, container_width: f64) -> usize {
        column_count(container_width, self.min_column_width, self.max_columns)
    }

    /// Width of each of `count` columns once the gaps are taken out.
    /// Never below 1px so scaled heights stay finite.
    pub fn column_width(&self, container_width: f64, count: usize) -> f64 {
        let count = count.max(1);
        let gaps = self.gap.max(0.0) * (count - 1) as f64;
        let width = (container_width - gaps) / count as f64;
        if width.is_finite() {
            width.max(1.0)
        } else {
            1.0
        }
    }
}
