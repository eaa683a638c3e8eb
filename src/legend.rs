//! Legend placement for the main region.
//!
//! The "best" corner is the one whose neighbourhood covers the fewest drawn
//! points. Scoring every point is linear in the data size, so above
//! [`SLOW_PLACEMENT_POINTS`] the search is reported as slow and the legend
//! goes to the upper-right corner instead.

use crate::data::view::AxisRange;

/// Point count above which the best-corner search is considered slow.
pub const SLOW_PLACEMENT_POINTS: usize = 100_000;

/// Fraction of each axis a legend corner is assumed to cover.
const CORNER_EXTENT: f64 = 1.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegendCorner {
    RightTop,
    LeftTop,
    LeftBottom,
    RightBottom,
}

impl LegendCorner {
    /// Order in which corners are tried; earlier wins ties.
    pub const PREFERENCE: [LegendCorner; 4] = [
        LegendCorner::RightTop,
        LegendCorner::LeftTop,
        LegendCorner::LeftBottom,
        LegendCorner::RightBottom,
    ];

    fn covers(&self, u: f64, v: f64) -> bool {
        let left = u <= CORNER_EXTENT;
        let right = u >= 1.0 - CORNER_EXTENT;
        let bottom = v <= CORNER_EXTENT;
        let top = v >= 1.0 - CORNER_EXTENT;
        match self {
            LegendCorner::RightTop => right && top,
            LegendCorner::LeftTop => left && top,
            LegendCorner::LeftBottom => left && bottom,
            LegendCorner::RightBottom => right && bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendPlacement {
    pub corner: LegendCorner,
    /// Set when the slow-search condition forced the fixed corner.
    pub slow_fallback: bool,
}

impl LegendPlacement {
    pub const FALLBACK: LegendPlacement = LegendPlacement {
        corner: LegendCorner::RightTop,
        slow_fallback: true,
    };
}

/// Pick a legend corner for `series` drawn in the `x` by `y` view.
pub fn place_legend<'a, I>(series: I, x: AxisRange, y: AxisRange) -> LegendPlacement
where
    I: IntoIterator<Item = &'a [[f64; 2]]> + Clone,
{
    let total: usize = series.clone().into_iter().map(|s| s.len()).sum();
    if total > SLOW_PLACEMENT_POINTS {
        log::warn!(
            "legend placement over {total} points would be slow; using the upper-right corner"
        );
        return LegendPlacement::FALLBACK;
    }

    let (dx, dy) = (x.1 - x.0, y.1 - y.0);
    let mut counts = [0usize; 4];
    if dx > 0.0 && dy > 0.0 {
        for pts in series {
            for p in pts {
                let (u, v) = ((p[0] - x.0) / dx, (p[1] - y.0) / dy);
                for (i, corner) in LegendCorner::PREFERENCE.iter().enumerate() {
                    if corner.covers(u, v) {
                        counts[i] += 1;
                    }
                }
            }
        }
    }

    // min_by_key keeps the first minimum, so ties follow PREFERENCE.
    let best = counts
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| **c)
        .map(|(i, _)| i)
        .unwrap_or(0);
    LegendPlacement {
        corner: LegendCorner::PREFERENCE[best],
        slow_fallback: false,
    }
}
