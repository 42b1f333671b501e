//! Column accumulation and greedy placement

use crate::model::ImageDescriptor;
use crate::{Error, Result};
use log::{debug, trace};
use serde::Serialize;

/// One vertical slot of the waterfall.
///
/// Images are kept in placement order (top to bottom). `height` is the sum
/// of the scaled heights of everything in `images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Column {
    pub images: Vec<ImageDescriptor>,
    pub height: f64,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// `count` empty columns, each with its own storage.
pub fn initialize_columns(count: usize) -> Vec<Column> {
    (0..count).map(|_| Column::new()).collect()
}

/// Index of the column with the smallest height. The first minimum wins, so
/// a fresh set of columns always yields 0. Returns 0 for an empty slice.
pub fn shortest_column(columns: &[Column]) -> usize {
    columns
        .iter()
        .enumerate()
        .fold(0, |min_index, (index, column)| {
            if column.height < columns[min_index].height {
                index
            } else {
                min_index
            }
        })
}

/// Rendered height of `image` once its width is forced to `column_width`.
pub fn scaled_height(image: &ImageDescriptor, column_width: f64) -> f64 {
    column_width / image.aspect_ratio()
}

fn check_image(image: &ImageDescriptor) -> Result<()> {
    if image.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidImage {
            id: image.id.clone(),
            width: image.width,
            height: image.height,
        })
    }
}

fn check_column_width(column_width: f64) -> Result<()> {
    if column_width.is_finite() && column_width > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "column width must be a positive finite number, got {}",
            column_width
        )))
    }
}

/// Append `image` to the shortest column and grow that column by the
/// image's scaled height. Returns the index of the chosen column.
///
/// Images without a positive width and height are rejected before any
/// column is touched. `columns` must not be empty.
pub fn place_image(
    columns: &mut [Column],
    image: ImageDescriptor,
    column_width: f64,
) -> Result<usize> {
    check_image(&image)?;
    check_column_width(column_width)?;
    if columns.is_empty() {
        return Err(Error::Config("cannot place an image into zero columns".into()));
    }

    let index = shortest_column(columns);
    let height = scaled_height(&image, column_width);
    trace!("placing image {} ({:.1}px) in column {}", image.id, height, index);

    let column = &mut columns[index];
    column.images.push(image);
    column.height += height;
    Ok(index)
}

/// Lay out `images` in the given order over `column_count` columns.
///
/// A `column_count` of 0 is treated as 1. Stops at the first invalid image.
pub fn arrange<I>(images: I, column_count: usize, column_width: f64) -> Result<Vec<Column>>
where
    I: IntoIterator<Item = ImageDescriptor>,
{
    let mut layout = WaterfallLayout::new(column_count, column_width)?;
    layout.extend(images)?;
    debug!(
        "arranged {} images into {} columns (tallest {:.1}px)",
        layout.total_images(),
        layout.columns().len(),
        layout.tallest_height()
    );
    Ok(layout.into_columns())
}

/// Owned state of a single layout pass.
///
/// Created empty, fed images in order, then consumed. A new pass always
/// starts from a new `WaterfallLayout`.
#[derive(Debug, Clone)]
pub struct WaterfallLayout {
    columns: Vec<Column>,
    column_width: f64,
}

impl WaterfallLayout {
    pub fn new(column_count: usize, column_width: f64) -> Result<Self> {
        check_column_width(column_width)?;
        Ok(Self {
            columns: initialize_columns(column_count.max(1)),
            column_width,
        })
    }

    /// Size the grid for a container of `container_width` pixels.
    pub fn for_container(container_width: f64, config: &crate::layout::LayoutConfig) -> Result<Self> {
        let count = config.column_count(container_width);
        Self::new(count, config.column_width(container_width, count))
    }

    /// Place one image; returns the column it landed in.
    pub fn push(&mut self, image: ImageDescriptor) -> Result<usize> {
        place_image(&mut self.columns, image, self.column_width)
    }

    pub fn extend<I>(&mut self, images: I) -> Result<()>
    where
        I: IntoIterator<Item = ImageDescriptor>,
    {
        images.into_iter().try_for_each(|image| self.push(image).map(|_| ()))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn tallest_height(&self) -> f64 {
        self.columns.iter().map(|c| c.height).fold(0.0, f64::max)
    }

    pub fn total_images(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
