//! Render pipeline: turns the classified dataset, the active selection and
//! the settings into a [`Scene`], a plain description of everything each
//! region draws.
//!
//! Nothing here touches egui. The painter in [`crate::app::plot_view`]
//! replays a scene with `egui_plot` items.

use egui::Color32;

use crate::color_scheme::fallback_color;
use crate::config::PlotConfig;
use crate::data::classify::{ChannelKind, ClassifiedDataset, BOOL_STATE_PREFIX};
use crate::data::selection::Selection;
use crate::data::view::{AxisRange, FLAG_Y_RANGE};
use crate::legend::{place_legend, LegendPlacement};

/// Fraction of the value span added above and below the main region's data.
pub const EXTEND_FRACTION: f64 = 0.05;
/// Fixed range of the percent axis when it is locked.
pub const PERCENT_LOCKED_RANGE: AxisRange = (0.0, 100.0);
/// Alpha of percent lines.
const PERCENT_LINE_ALPHA: f32 = 0.7;

/// How densely the time axis is ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDensity {
    /// Automatically located major ticks only.
    Coarse,
    /// Finer ticks, used together with per-sample vertical rules.
    Fine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    pub dashed: bool,
}

/// An axis-aligned filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct FillBand {
    pub name: String,
    pub x: AxisRange,
    pub y: AxisRange,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Draw content of the main region (numeric lines and state bands).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MainScene {
    pub lines: Vec<LineSeries>,
    pub bands: Vec<FillBand>,
    pub labels: Vec<TextLabel>,
    /// Data range padded by [`EXTEND_FRACTION`] on each side.
    pub y_range: AxisRange,
}

/// Draw content of the secondary percent axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PercentScene {
    pub lines: Vec<LineSeries>,
    pub y_range: AxisRange,
    pub locked: bool,
}

/// One displayed flag row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagScene {
    /// Column name, the key for selection and click lookup.
    pub column: String,
    /// Axis label with a leading `F-` removed.
    pub display_name: String,
    pub bold: bool,
    pub background: Option<FillBand>,
    pub bands: Vec<FillBand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub main: MainScene,
    pub percent: PercentScene,
    pub flags: Vec<FlagScene>,
    /// Full time extent of the dataset.
    pub x_range: AxisRange,
    /// Rule positions shared by the main and flag regions; empty when disabled.
    pub vertical_lines: Vec<f64>,
    pub tick_density: TickDensity,
    /// Legend entries of the main and percent regions, in draw order.
    pub legend_entries: Vec<String>,
    pub legend: LegendPlacement,
}

impl Scene {
    pub fn flag_columns(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|f| f.column.as_str())
    }
}

/// Strip a leading `F-` for display.
pub fn display_name(column: &str) -> &str {
    column.strip_prefix(BOOL_STATE_PREFIX).unwrap_or(column)
}

/// Which sample interval a run of `true` values is drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Sample `i` covers `(t[i-1], t[i]]`.
    Pre,
    /// Sample `i` covers `[t[i], t[i+1])`.
    Post,
}

/// Inclusive index runs where `mask` is `true`.
pub fn true_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &m) in mask.iter().enumerate() {
        match (m, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, mask.len() - 1));
    }
    runs
}

/// Time interval covered by the run `[s, e]` under `mode`.
pub fn run_span(times: &[f64], (s, e): (usize, usize), mode: StepMode) -> AxisRange {
    let last = times.len().saturating_sub(1);
    match mode {
        StepMode::Pre => (times[s.saturating_sub(1)], times[e]),
        StepMode::Post => (times[s], times[(e + 1).min(last)]),
    }
}

fn finite_extent<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<AxisRange> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Non-degenerate data range, defaulting to `[0, 1]` for no data.
fn data_range(extent: Option<AxisRange>) -> AxisRange {
    match extent {
        None => (0.0, 1.0),
        Some((lo, hi)) if hi - lo <= f64::EPSILON * hi.abs().max(1.0) => (lo - 1.0, hi + 1.0),
        Some(r) => r,
    }
}

/// Pad `range` by [`EXTEND_FRACTION`] of its span on each side.
pub fn extend_range(range: AxisRange) -> AxisRange {
    let pad = EXTEND_FRACTION * (range.1 - range.0);
    (range.0 - pad, range.1 + pad)
}

/// Inputs of one render pass.
pub struct RenderInput<'a> {
    pub data: &'a ClassifiedDataset,
    pub selection: &'a Selection,
    pub config: &'a PlotConfig,
    /// Time range currently on screen, used to decide whether state labels
    /// are visible. `None` means the whole dataset.
    pub visible_x: Option<AxisRange>,
}

/// Build the scene for every region.
pub fn build_scene(input: &RenderInput<'_>) -> Scene {
    let data = input.data;
    let cfg = input.config;
    let cls = data.classification();
    let times = data.times();
    let x_range = data_range(finite_extent(times));

    // Numeric lines on the main region.
    let numerics = input.selection.resolve(ChannelKind::Numeric, cls);
    let mut lines = Vec::with_capacity(numerics.len());
    let mut numeric_extent: Option<AxisRange> = None;
    for (i, name) in numerics.iter().enumerate() {
        let Some(values) = data.numeric(name) else {
            continue;
        };
        if let Some((lo, hi)) = finite_extent(values) {
            numeric_extent = Some(match numeric_extent {
                None => (lo, hi),
                Some((a, b)) => (a.min(lo), b.max(hi)),
            });
        }
        lines.push(LineSeries {
            name: name.to_string(),
            points: times.iter().zip(values).map(|(t, v)| [*t, *v]).collect(),
            color: fallback_color(i),
            dashed: false,
        });
    }
    let base_range = data_range(numeric_extent);
    let y_range = extend_range(base_range);

    // Percent lines on the secondary axis.
    let percents = input.selection.resolve(ChannelKind::Percent, cls);
    let mut percent_lines = Vec::with_capacity(percents.len());
    let mut percent_extent: Option<AxisRange> = None;
    for (i, name) in percents.iter().enumerate() {
        let Some(values) = data.numeric(name) else {
            continue;
        };
        if let Some((lo, hi)) = finite_extent(values) {
            percent_extent = Some(match percent_extent {
                None => (lo, hi),
                Some((a, b)) => (a.min(lo), b.max(hi)),
            });
        }
        percent_lines.push(LineSeries {
            name: name.to_string(),
            points: times.iter().zip(values).map(|(t, v)| [*t, *v]).collect(),
            color: crate::color_scheme::with_alpha(fallback_color(i), PERCENT_LINE_ALPHA),
            dashed: true,
        });
    }
    let locked = cfg.display.lock_percent_scale;
    let percent_range = if locked || percent_extent.is_none() {
        PERCENT_LOCKED_RANGE
    } else {
        data_range(percent_extent)
    };

    // State bands across the extended range.
    let visible = input.visible_x.unwrap_or(x_range);
    let mut bands = Vec::new();
    let mut labels = Vec::new();
    let mut legend_entries: Vec<String> = lines.iter().map(|l| l.name.clone()).collect();
    let states = input.selection.resolve(ChannelKind::BoolState, cls);
    for (i, name) in states.iter().enumerate() {
        let Some(mask) = data.boolean(name) else {
            continue;
        };
        let color = cfg.band_fill(i);
        let band_name = format!("[{name}]");
        for run in true_runs(mask) {
            bands.push(FillBand {
                name: band_name.clone(),
                x: run_span(times, run, StepMode::Pre),
                y: y_range,
                color,
            });
        }
        legend_entries.push(band_name);
        if cfg.processes.show_processes_labels {
            if let Some(first) = mask.iter().position(|m| *m) {
                let t = times[first];
                if visible.0 <= t && t <= visible.1 {
                    labels.push(TextLabel {
                        text: name.to_string(),
                        x: t,
                        y: y_range.0 + 0.02 * (base_range.1 - base_range.0),
                    });
                }
            }
        }
    }
    legend_entries.extend(percent_lines.iter().map(|l| l.name.clone()));

    // Flag rows.
    let flag_fill = cfg.flag_fill();
    let flag_bg = cfg.flag_background();
    let flags = input
        .selection
        .resolve(ChannelKind::Flag, cls)
        .into_iter()
        .filter_map(|name| {
            let mask = data.boolean(name)?;
            Some(FlagScene {
                column: name.to_string(),
                display_name: display_name(name).to_string(),
                bold: cfg.flags.legend_bold,
                background: cfg.flags.show_flag_background.then(|| FillBand {
                    name: String::new(),
                    x: x_range,
                    y: FLAG_Y_RANGE,
                    color: flag_bg,
                }),
                bands: true_runs(mask)
                    .into_iter()
                    .map(|run| FillBand {
                        name: String::new(),
                        x: run_span(times, run, StepMode::Post),
                        y: FLAG_Y_RANGE,
                        color: flag_fill,
                    })
                    .collect(),
            })
        })
        .collect();

    let (vertical_lines, tick_density) = if cfg.display.show_vertical_lines {
        (times.to_vec(), TickDensity::Fine)
    } else {
        (Vec::new(), TickDensity::Coarse)
    };

    let legend = place_legend(
        lines.iter().map(|l| l.points.as_slice()),
        x_range,
        y_range,
    );

    Scene {
        main: MainScene {
            lines,
            bands,
            labels,
            y_range,
        },
        percent: PercentScene {
            lines: percent_lines,
            y_range: percent_range,
            locked,
        },
        flags,
        x_range,
        vertical_lines,
        tick_density,
        legend_entries,
        legend,
    }
}

/// Map a percent value into main-region coordinates so both axes share one
/// plot area: `percent.0` lands on `main.0` and `percent.1` on `main.1`.
pub fn percent_to_main(value: f64, percent: AxisRange, main: AxisRange) -> f64 {
    let span = percent.1 - percent.0;
    if span == 0.0 {
        return main.0;
    }
    main.0 + (value - percent.0) / span * (main.1 - main.0)
}

/// Inverse of [`percent_to_main`].
pub fn main_to_percent(value: f64, percent: AxisRange, main: AxisRange) -> f64 {
    let span = main.1 - main.0;
    if span == 0.0 {
        return percent.0;
    }
    percent.0 + (value - main.0) / span * (percent.1 - percent.0)
}
