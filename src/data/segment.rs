//! Flag segment lookup: maps a clicked time to the run of equal flag values
//! around it.

/// Narrowest time range (seconds) the view will zoom into for a segment.
pub const MIN_SEGMENT_WIDTH_SECS: f64 = 1.0;

/// A maximal run of identical boolean values, as inclusive row indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagSegment {
    pub left: usize,
    pub right: usize,
    /// The value shared by every row in the run.
    pub value: bool,
    /// Time of `left` and `right`.
    pub start: f64,
    pub end: f64,
}

impl FlagSegment {
    /// Number of rows in the run.
    pub fn row_count(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    /// The time range to show for this segment, widened symmetrically to at
    /// least `min_width`.
    pub fn view_range(&self, min_width: f64) -> (f64, f64) {
        widen_range(self.start, self.end, min_width)
    }
}

/// Index of the sample closest to `t`. Ties go to the lower index.
pub fn nearest_index(times: &[f64], t: f64) -> Option<usize> {
    if !t.is_finite() {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, ti) in times.iter().enumerate() {
        let d = (ti - t).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Extend from `idx` in both directions while the value stays equal to
/// `values[idx]`. The returned bounds are the last indices inside the run.
pub fn run_bounds(values: &[bool], idx: usize) -> Option<(usize, usize)> {
    let v = *values.get(idx)?;
    let mut left = idx;
    while left > 0 && values[left - 1] == v {
        left -= 1;
    }
    let mut right = idx;
    while right + 1 < values.len() && values[right + 1] == v {
        right += 1;
    }
    Some((left, right))
}

/// Resolve the segment of `values` containing the sample nearest to `t`.
///
/// Returns `None` when the column is empty or its length does not match
/// `times`.
pub fn resolve_segment(times: &[f64], values: &[bool], t: f64) -> Option<FlagSegment> {
    if times.len() != values.len() {
        log::warn!(
            "flag column has {} values for {} timestamps",
            values.len(),
            times.len()
        );
        return None;
    }
    let idx = nearest_index(times, t)?;
    let (left, right) = run_bounds(values, idx)?;
    Some(FlagSegment {
        left,
        right,
        value: values[idx],
        start: times[left],
        end: times[right],
    })
}

/// Widen `[start, end]` around its center to at least `min_width`.
pub fn widen_range(start: f64, end: f64, min_width: f64) -> (f64, f64) {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    if hi - lo >= min_width {
        return (lo, hi);
    }
    let center = 0.5 * (lo + hi);
    (center - 0.5 * min_width, center + 0.5 * min_width)
}
