//! Click routing and redraw notifications.
//!
//! Flag regions are re-announced on every redraw. [`ClickSubscriptions`]
//! keeps at most one subscription per region, so announcing a region twice
//! replaces the old subscription instead of dispatching the click twice.

use std::collections::BTreeMap;

pub use crate::data::view::RegionId;

/// A primary click inside a plot region at time coordinate `time` (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub region: RegionId,
    pub time: f64,
}

/// Subscription of one flag region to clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSubscription {
    /// Flag column shown in the region.
    pub column: String,
}

/// Per-region click subscriptions.
#[derive(Debug, Clone, Default)]
pub struct ClickSubscriptions {
    by_region: BTreeMap<RegionId, FlagSubscription>,
}

impl ClickSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `region` to clicks for `column`, replacing any previous
    /// subscription of that region.
    pub fn attach(&mut self, region: RegionId, column: impl Into<String>) {
        self.by_region.insert(
            region,
            FlagSubscription {
                column: column.into(),
            },
        );
    }

    /// Drop the subscription of `region`. Returns whether one existed.
    pub fn detach(&mut self, region: RegionId) -> bool {
        self.by_region.remove(&region).is_some()
    }

    /// Keep exactly the flag slots `0..columns.len()` subscribed, each to its column.
    pub fn sync_flags<'a>(&mut self, columns: impl IntoIterator<Item = &'a str>) {
        let mut count = 0;
        for (slot, column) in columns.into_iter().enumerate() {
            self.attach(RegionId::Flag(slot), column);
            count = slot + 1;
        }
        self.by_region
            .retain(|region, _| !matches!(region, RegionId::Flag(slot) if *slot >= count));
    }

    /// Column subscribed for the click's region, if any.
    pub fn dispatch(&self, event: &ClickEvent) -> Option<&str> {
        self.by_region
            .get(&event.region)
            .map(|s| s.column.as_str())
    }

    pub fn is_attached(&self, region: RegionId) -> bool {
        self.by_region.contains_key(&region)
    }

    pub fn len(&self) -> usize {
        self.by_region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty()
    }
}

/// Why a redraw happens. Data-changing causes autoscale the view; the
/// others keep the user's pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawCause {
    DataLoaded,
    SelectionApplied,
    ToggleChanged,
    SettingsChanged,
    FlagClicked,
    Resized,
}

impl RedrawCause {
    pub fn autoscales(&self) -> bool {
        matches!(self, RedrawCause::DataLoaded | RedrawCause::SelectionApplied)
    }
}
