//! Region geometry: turns pixel budgets into fractional plot rectangles.
//!
//! Coordinates are unit window fractions with the origin at the bottom-left,
//! so `bottom + height` is a region's top edge. The main region sits at the
//! bottom; flag rows are stacked above it, first classified flag on top.

use serde::{Deserialize, Serialize};

/// Vertical gap between the main region and the lowest flag row, in pixels.
pub const BAND_GAP_PX: f64 = 32.0;
/// Smallest height fraction the main region is ever given.
pub const MIN_MAIN_HEIGHT: f64 = 0.1;

/// Window margins as fractions of the window size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.015,
            left: 0.06,
            right: 0.025,
            bottom: 0.05,
        }
    }
}

/// A fractional rectangle `(left, bottom, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Map into a pixel area whose origin is top-left (y grows downwards).
    /// Returns `(x, y, w, h)` of the region's top-left corner and size.
    pub fn to_pixels(&self, area_x: f32, area_y: f32, area_w: f32, area_h: f32) -> [f32; 4] {
        let x = area_x + (self.left as f32) * area_w;
        let y = area_y + (1.0 - self.top() as f32) * area_h;
        [x, y, (self.width as f32) * area_w, (self.height as f32) * area_h]
    }
}

/// Inputs of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub screen_height_px: f64,
    pub flag_height_px: f64,
    pub flag_count: usize,
    pub margins: Margins,
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotLayout {
    pub main: Rect,
    /// One rectangle per displayed flag, in classification order (top-most first).
    pub flags: Vec<Rect>,
    /// Height fraction of the main region.
    pub main_height: f64,
    /// Height of each flag row in screen pixels after clamping.
    pub flag_row_px: f64,
    /// `true` when the configured flags did not fit and the main region was
    /// held at [`MIN_MAIN_HEIGHT`], shrinking the flag rows instead.
    pub clamped: bool,
}

impl PlotLayout {
    /// Sum of all region heights.
    pub fn occupied_height(&self) -> f64 {
        self.main.height + self.flags.iter().map(|r| r.height).sum::<f64>()
    }
}

/// Compute region rectangles. Pure and deterministic.
pub fn compute_layout(p: &LayoutParams) -> PlotLayout {
    let screen = p.screen_height_px.max(1.0);
    let m = p.margins;
    let n = p.flag_count;
    let mut gap = if n > 0 { BAND_GAP_PX / screen } else { 0.0 };

    let mut row = p.flag_height_px.max(0.0) / screen;
    let mut main_height = 1.0 - n as f64 * row - gap - m.bottom - m.top;
    let clamped = main_height < MIN_MAIN_HEIGHT;
    if clamped {
        main_height = MIN_MAIN_HEIGHT;
        // Rows and gap shrink together into whatever is left above the floor.
        let room = (1.0 - MIN_MAIN_HEIGHT - m.bottom - m.top).max(0.0);
        let wanted = n as f64 * row + gap;
        if wanted > 0.0 {
            let scale = room / wanted;
            row *= scale;
            gap *= scale;
        }
        log::warn!(
            "{} flag rows of {} px do not fit in {} px; flag rows shrunk to {:.1} px",
            n,
            p.flag_height_px,
            p.screen_height_px,
            row * screen
        );
    }

    let left = m.left;
    let width = (1.0 - m.left - m.right).max(0.0);
    let main = Rect {
        left,
        bottom: m.bottom,
        width,
        height: main_height,
    };
    let base = main.top() + gap;
    let flags = (0..n)
        .map(|i| Rect {
            left,
            bottom: base + (n - i - 1) as f64 * row,
            width,
            height: row,
        })
        .collect();

    PlotLayout {
        main,
        flags,
        main_height,
        flag_row_px: row * screen,
        clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_pixels_flips_vertical_axis() {
        let r = Rect {
            left: 0.5,
            bottom: 0.0,
            width: 0.5,
            height: 0.25,
        };
        let [x, y, w, h] = r.to_pixels(10.0, 20.0, 100.0, 200.0);
        assert_eq!((x, y, w, h), (60.0, 170.0, 50.0, 50.0));
    }
}
