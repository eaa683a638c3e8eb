//! Shared pan/zoom state for all synchronized plot regions.
//!
//! The horizontal (time) range is shared by every region. Vertical ranges are
//! tracked per region, except flag regions which are always `[0, 1]`.

use std::collections::BTreeMap;

/// Inclusive `(min, max)` bounds of one axis.
pub type AxisRange = (f64, f64);

/// Fixed vertical range of every flag region.
pub const FLAG_Y_RANGE: AxisRange = (0.0, 1.0);

/// Identity of a plot region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionId {
    /// Numeric channels and state bands.
    Main,
    /// Secondary vertical axis for percent channels, sharing the main region's area.
    /// Its range is only observed: the painter derives it from the main range.
    Percent,
    /// Flag row slot, `0` being the top-most displayed flag.
    Flag(usize),
}

impl RegionId {
    pub fn is_flag(&self) -> bool {
        matches!(self, RegionId::Flag(_))
    }
}

/// Bounds captured before a redraw so they can be put back afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub x: AxisRange,
    pub y: BTreeMap<RegionId, AxisRange>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    x: Option<AxisRange>,
    y: BTreeMap<RegionId, AxisRange>,
    /// Set when the stored bounds must be pushed to the plots on the next frame.
    dirty: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared horizontal range.
    pub fn x(&self) -> Option<AxisRange> {
        self.x
    }

    /// Vertical range of `region`.
    pub fn y(&self, region: RegionId) -> Option<AxisRange> {
        if region.is_flag() {
            return Some(FLAG_Y_RANGE);
        }
        self.y.get(&region).copied()
    }

    /// `true` if the stored bounds still need to be applied to the plots.
    pub fn needs_apply(&self) -> bool {
        self.dirty
    }

    /// Called once every region has been given the stored bounds.
    pub fn mark_applied(&mut self) {
        self.dirty = false;
    }

    /// Record the horizontal range the user is currently looking at.
    pub fn observe_x(&mut self, range: AxisRange) {
        if is_valid(range) {
            self.x = Some(range);
        }
    }

    /// Record a region's current vertical range. Flag regions are ignored.
    pub fn observe_y(&mut self, region: RegionId, range: AxisRange) {
        if !region.is_flag() && is_valid(range) {
            self.y.insert(region, range);
        }
    }

    /// Copy the current bounds. `None` until a horizontal range is known.
    pub fn capture(&self) -> Option<ViewSnapshot> {
        Some(ViewSnapshot {
            x: self.x?,
            y: self.y.clone(),
        })
    }

    /// Put back previously captured bounds.
    pub fn restore(&mut self, snapshot: ViewSnapshot) {
        self.x = Some(snapshot.x);
        self.y = snapshot
            .y
            .into_iter()
            .filter(|(region, _)| !region.is_flag())
            .collect();
        self.dirty = true;
    }

    /// Replace all bounds with data-derived ones.
    pub fn autoscale(&mut self, x: AxisRange, y: impl IntoIterator<Item = (RegionId, AxisRange)>) {
        self.x = Some(x);
        self.y = y
            .into_iter()
            .filter(|(region, range)| !region.is_flag() && is_valid(*range))
            .collect();
        self.dirty = true;
    }

    /// Set a new shared horizontal range, keeping every vertical range.
    pub fn set_x(&mut self, range: AxisRange) {
        if is_valid(range) {
            self.x = Some(range);
            self.dirty = true;
        }
    }

    /// Force one region's vertical range.
    pub fn set_y(&mut self, region: RegionId, range: AxisRange) {
        if !region.is_flag() && is_valid(range) {
            self.y.insert(region, range);
            self.dirty = true;
        }
    }
}

fn is_valid(range: AxisRange) -> bool {
    range.0.is_finite() && range.1.is_finite() && range.0 <= range.1
}
