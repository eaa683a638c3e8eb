//! PlotSession: the single owner of selection, settings, view and scene.
//!
//! Every trigger (load, selection, toggle, settings, resize, flag click) goes
//! through one method here and completes its redraw before returning:
//! capture view, rebuild the scene, re-layout if needed, then restore the
//! view or autoscale it.

use std::sync::Arc;

use crate::config::PlotConfig;
use crate::data::classify::ClassifiedDataset;
use crate::data::layout::{compute_layout, LayoutParams, PlotLayout};
use crate::data::segment::{resolve_segment, FlagSegment, MIN_SEGMENT_WIDTH_SECS};
use crate::data::selection::{Selection, SelectionReport};
use crate::data::view::{RegionId, ViewState};
use crate::events::{ClickEvent, ClickSubscriptions, RedrawCause};
use crate::scene::{build_scene, RenderInput, Scene};

/// Things the embedding UI must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNotice {
    Redrawn(RedrawCause),
    /// Settings were replaced; theme and persisted file need refreshing.
    SettingsChanged,
    LayoutChanged,
}

pub struct PlotSession {
    data: ClassifiedDataset,
    config: Arc<PlotConfig>,
    selection: Selection,
    view: ViewState,
    scene: Scene,
    layout: PlotLayout,
    layout_params: Option<LayoutParams>,
    screen_height_px: f64,
    subscriptions: ClickSubscriptions,
    notices: Vec<SessionNotice>,
}

impl PlotSession {
    pub fn new(data: ClassifiedDataset, config: Arc<PlotConfig>, screen_height_px: f64) -> Self {
        let selection = Selection::all();
        let scene = build_scene(&RenderInput {
            data: &data,
            selection: &selection,
            config: &config,
            visible_x: None,
        });
        let mut session = Self {
            data,
            config,
            selection,
            view: ViewState::new(),
            scene,
            layout: PlotLayout::default(),
            layout_params: None,
            screen_height_px,
            subscriptions: ClickSubscriptions::new(),
            notices: Vec::new(),
        };
        session.redraw(RedrawCause::DataLoaded);
        session
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn data(&self) -> &ClassifiedDataset {
        &self.data
    }

    pub fn config(&self) -> &Arc<PlotConfig> {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable view for the painter to record user pan/zoom.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn subscriptions(&self) -> &ClickSubscriptions {
        &self.subscriptions
    }

    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    // ── Triggers ────────────────────────────────────────────────────────────

    /// Replace the dataset. The selection resets to "show all".
    pub fn load(&mut self, data: ClassifiedDataset) {
        self.data = data;
        self.selection = Selection::all();
        self.redraw(RedrawCause::DataLoaded);
    }

    /// Apply a picker selection. Names unknown to their kind are ignored.
    pub fn apply_selection(&mut self, selection: Selection) -> SelectionReport {
        let report = selection.validate(self.data.classification());
        for (kind, name) in &report.ignored {
            log::warn!("ignoring unknown {} channel `{name}` in selection", kind.label());
        }
        self.selection = selection;
        self.redraw(RedrawCause::SelectionApplied);
        report
    }

    pub fn toggle_flag_background(&mut self) {
        self.update_config(|c| c.flags.show_flag_background = !c.flags.show_flag_background);
        self.redraw(RedrawCause::ToggleChanged);
    }

    pub fn toggle_vertical_lines(&mut self) {
        self.update_config(|c| c.display.show_vertical_lines = !c.display.show_vertical_lines);
        self.redraw(RedrawCause::ToggleChanged);
    }

    pub fn toggle_time_format(&mut self) {
        self.update_config(|c| c.display.show_time_only = !c.display.show_time_only);
        self.redraw(RedrawCause::ToggleChanged);
    }

    pub fn toggle_process_labels(&mut self) {
        self.update_config(|c| {
            c.processes.show_processes_labels = !c.processes.show_processes_labels
        });
        self.redraw(RedrawCause::ToggleChanged);
    }

    /// Locking changes the scene's percent range; the percent axis follows it
    /// through the main axis, so the stored view is kept as is.
    pub fn toggle_lock_percent_scale(&mut self) {
        self.update_config(|c| c.display.lock_percent_scale = !c.display.lock_percent_scale);
        self.redraw(RedrawCause::ToggleChanged);
    }

    pub fn toggle_theme(&mut self) {
        self.update_config(|c| c.display.theme = c.display.theme.toggled());
        self.notices.push(SessionNotice::SettingsChanged);
    }

    /// Replace the settings with a new value and redraw, keeping the view.
    pub fn apply_settings(&mut self, config: PlotConfig) {
        self.config = Arc::new(config);
        self.layout_params = None;
        self.notices.push(SessionNotice::SettingsChanged);
        self.redraw(RedrawCause::SettingsChanged);
    }

    /// The plot area changed height. Only the layout is recomputed.
    pub fn resize(&mut self, screen_height_px: f64) {
        if (screen_height_px - self.screen_height_px).abs() < 0.5 {
            return;
        }
        self.screen_height_px = screen_height_px;
        self.relayout();
    }

    /// Route a click. On a subscribed flag region, zoom every region to the
    /// segment under the click and return it.
    pub fn click(&mut self, event: ClickEvent) -> Option<FlagSegment> {
        let column = self.subscriptions.dispatch(&event)?;
        let values = self.data.boolean(column)?;
        let segment = resolve_segment(self.data.times(), values, event.time)?;
        log::debug!(
            "flag `{column}` click at {:.3}: rows {}..={} ({})",
            event.time,
            segment.left,
            segment.right,
            segment.value
        );
        self.view.set_x(segment.view_range(MIN_SEGMENT_WIDTH_SECS));
        self.notices.push(SessionNotice::Redrawn(RedrawCause::FlagClicked));
        Some(segment)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn update_config(&mut self, f: impl FnOnce(&mut PlotConfig)) {
        let mut next = (*self.config).clone();
        f(&mut next);
        self.config = Arc::new(next);
    }

    fn redraw(&mut self, cause: RedrawCause) {
        let snapshot = if cause.autoscales() {
            None
        } else {
            self.view.capture()
        };
        self.scene = build_scene(&RenderInput {
            data: &self.data,
            selection: &self.selection,
            config: &self.config,
            visible_x: snapshot.as_ref().map(|s| s.x),
        });
        self.subscriptions.sync_flags(self.scene.flag_columns());
        self.relayout();
        match snapshot {
            Some(s) => self.view.restore(s),
            None => self.view.autoscale(
                self.scene.x_range,
                [
                    (RegionId::Main, self.scene.main.y_range),
                    (RegionId::Percent, self.scene.percent.y_range),
                ],
            ),
        }
        log::debug!("redraw ({cause:?}): {} flag rows", self.scene.flags.len());
        self.notices.push(SessionNotice::Redrawn(cause));
    }

    fn relayout(&mut self) {
        let params = self
            .config
            .layout_params(self.screen_height_px, self.scene.flags.len());
        if self.layout_params.as_ref() == Some(&params) {
            return;
        }
        self.layout = compute_layout(&params);
        self.layout_params = Some(params);
        self.notices.push(SessionNotice::LayoutChanged);
    }
}
