//! Windowing math for the virtual scroller.
//!
//! Everything here is a pure function of (view mode, viewport, dataset
//! length, scroll offset): identical inputs always give identical output.
//!
//! - List: one column, fixed row height.
//! - Grid: `max(min_columns, floor(width / target))` columns of square cells
//!   spanning the full width; each cell is inset by the gutter.

use std::ops::Range;

use crate::config::LayoutConfig;
use crate::models::{ViewMode, Viewport};

/// Absolute position of one item inside the content layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Result of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleRange {
    /// First materialized index.
    pub start: usize,
    /// One past the last materialized index.
    pub end: usize,
    pub columns: usize,
    pub item_width: f64,
    pub row_height: f64,
    pub row_count: usize,
    pub total_extent: f64,
}

impl VisibleRange {
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Geometry of one view mode at one viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    viewport: Viewport,
    columns: usize,
    item_width: f64,
    row_height: f64,
    buffer_rows: usize,
    gutter: f64,
}

/// Clamp NaN, infinities and negatives to zero.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl Layout {
    pub fn new(mode: ViewMode, viewport: Viewport, config: &LayoutConfig) -> Self {
        let viewport = Viewport::new(sanitize(viewport.width), sanitize(viewport.height));

        let (columns, item_width, row_height, buffer_rows, gutter) =
            match mode.cell_target(config) {
                None => (
                    1,
                    viewport.width,
                    config.list_row_height,
                    config.list_buffer_rows,
                    0.0,
                ),
                Some(target) => {
                    let fit = (viewport.width / target.max(1.0)).floor() as usize;
                    let columns = fit.max(config.min_grid_columns).max(1);
                    let edge = if viewport.width > 0.0 {
                        viewport.width / columns as f64
                    } else {
                        target
                    };
                    (columns, edge, edge, config.grid_buffer_rows, config.grid_gutter)
                }
            };

        Self {
            viewport,
            columns,
            item_width,
            row_height: row_height.max(1.0),
            buffer_rows,
            gutter,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn row_count(&self, len: usize) -> usize {
        len.div_ceil(self.columns)
    }

    pub fn total_extent(&self, len: usize) -> f64 {
        self.row_count(len) as f64 * self.row_height
    }

    /// Largest meaningful scroll offset for a dataset of `len` items.
    pub fn max_scroll(&self, len: usize) -> f64 {
        (self.total_extent(len) - self.viewport.height).max(0.0)
    }

    /// Visible index range at `scroll_offset`, including buffer rows.
    pub fn compute(&self, len: usize, scroll_offset: f64) -> VisibleRange {
        let row_count = self.row_count(len);
        let mut range = VisibleRange {
            start: 0,
            end: 0,
            columns: self.columns,
            item_width: self.item_width,
            row_height: self.row_height,
            row_count,
            total_extent: self.total_extent(len),
        };
        if len == 0 {
            return range;
        }

        let offset = sanitize(scroll_offset);
        let last_row = row_count - 1;
        let first = ((offset / self.row_height).floor() as usize)
            .saturating_sub(self.buffer_rows)
            .min(last_row);
        let last = ((((offset + self.viewport.height) / self.row_height).ceil() as usize)
            .saturating_add(self.buffer_rows))
        .min(last_row)
        .max(first);

        range.start = first * self.columns;
        range.end = ((last + 1) * self.columns).min(len);
        range
    }

    pub fn rect(&self, index: usize) -> ItemRect {
        let row = index / self.columns;
        let col = index % self.columns;
        ItemRect {
            top: row as f64 * self.row_height + self.gutter,
            left: col as f64 * self.item_width + self.gutter,
            width: (self.item_width - 2.0 * self.gutter).max(0.0),
            height: (self.row_height - 2.0 * self.gutter).max(0.0),
        }
    }

    /// First index of the row at the top edge of the viewport.
    pub fn top_index(&self, len: usize, scroll_offset: f64) -> usize {
        if len == 0 {
            return 0;
        }
        let row = ((sanitize(scroll_offset) / self.row_height).floor() as usize)
            .min(self.row_count(len) - 1);
        (row * self.columns).min(len - 1)
    }

    /// Offset that puts the row of `index` at the top, clamped to the
    /// scrollable range.
    pub fn anchor_offset(&self, len: usize, index: usize) -> f64 {
        let row = index.min(len.saturating_sub(1)) / self.columns;
        (row as f64 * self.row_height).min(self.max_scroll(len))
    }

    /// Smallest scroll change that brings the row of `index` fully into view.
    ///
    /// Returns `None` when the row is already fully visible. Rows above the
    /// viewport are top-aligned, rows below are bottom-aligned.
    pub fn reveal_offset(&self, len: usize, index: usize, scroll_offset: f64) -> Option<f64> {
        if len == 0 {
            return None;
        }
        let current = sanitize(scroll_offset);
        let row = index.min(len - 1) / self.columns;
        let top = row as f64 * self.row_height;
        let bottom = top + self.row_height;
        let view_bottom = current + self.viewport.height;

        if top >= current && bottom <= view_bottom {
            return None;
        }

        let target = if top < current || self.row_height >= self.viewport.height {
            top
        } else {
            bottom - self.viewport.height
        };
        let target = target.clamp(0.0, self.max_scroll(len));
        ((target - current).abs() > f64::EPSILON).then_some(target)
    }
}
