//! Replays a [`Scene`] with `egui_plot`: one plot for the main region (with
//! the percent axis on its right) and one plot per flag row.
//!
//! All plots join the same X link group, so pan and zoom are shared. Bounds
//! flow both ways: pending bounds from the [`ViewState`](crate::data::view::ViewState)
//! are pushed into the plots, otherwise whatever the user did is read back.

use eframe::egui::{self, Align2, Color32, RichText, Stroke, UiBuilder};
use egui_plot::{
    AxisHints, Corner, HPlacement, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, PlotUi,
    Polygon, Text, VLine,
};

use crate::data::layout::Rect;
use crate::data::view::{AxisRange, RegionId, FLAG_Y_RANGE};
use crate::data::x_formatter::{format_percent, format_value, TimeFormatter};
use crate::events::ClickEvent;
use crate::legend::LegendCorner;
use crate::scene::{main_to_percent, percent_to_main, FillBand, FlagScene, Scene, TickDensity};
use crate::session::PlotSession;

const LINK_GROUP: &str = "flagscope_time_axis";
/// Left axis width shared by every plot so the plot frames line up.
const Y_AXIS_WIDTH: f32 = 56.0;
const LINE_WIDTH: f32 = 1.5;
const RULE_WIDTH: f32 = 0.5;

/// Bounds and clicks read back from the plots during one frame.
#[derive(Default)]
struct Observed {
    x: Option<AxisRange>,
    main_y: Option<AxisRange>,
    click: Option<ClickEvent>,
}

/// Draw every region into `ui`'s rectangle and feed user interaction back
/// into `session`.
pub(crate) fn show_plots(ui: &mut egui::Ui, session: &mut PlotSession) {
    let area = ui.max_rect();
    let apply = session.view().needs_apply();
    let pending = Pending::from_session(session);
    let formatter = TimeFormatter::new(session.config().time_format());
    let rule_color = ui.visuals().widgets.noninteractive.fg_stroke.color;

    let scene = session.scene();
    let layout = session.layout();
    let mut observed = Observed::default();

    let main_rect = to_egui_rect(&layout.main, area);
    ui.scope_builder(UiBuilder::new().max_rect(main_rect), |ui| {
        show_main(ui, scene, &formatter, rule_color, apply.then_some(&pending), &mut observed);
    });

    for (slot, (rect, flag)) in layout.flags.iter().zip(&scene.flags).enumerate() {
        let rect = to_egui_rect(rect, area);
        ui.scope_builder(UiBuilder::new().max_rect(rect), |ui| {
            show_flag(
                ui,
                slot,
                flag,
                &scene.vertical_lines,
                rule_color,
                apply.then_some(&pending),
                &mut observed,
            );
        });
    }

    let percent_y = observed.main_y.map(|(lo, hi)| {
        (
            main_to_percent(lo, scene.percent.y_range, scene.main.y_range),
            main_to_percent(hi, scene.percent.y_range, scene.main.y_range),
        )
    });

    let view = session.view_mut();
    if apply {
        view.mark_applied();
    } else {
        if let Some(x) = observed.x {
            view.observe_x(x);
        }
        if let Some(y) = observed.main_y {
            view.observe_y(RegionId::Main, y);
        }
        if let Some(y) = percent_y {
            view.observe_y(RegionId::Percent, y);
        }
    }

    if let Some(event) = observed.click {
        session.click(event);
    }
}

/// Bounds waiting to be pushed into the plots.
struct Pending {
    x: Option<AxisRange>,
    main_y: Option<AxisRange>,
}

impl Pending {
    fn from_session(session: &PlotSession) -> Self {
        Self {
            x: session.view().x(),
            main_y: session.view().y(RegionId::Main),
        }
    }

    fn apply(&self, plot_ui: &mut PlotUi, y: Option<AxisRange>) {
        if let Some((lo, hi)) = self.x {
            plot_ui.set_plot_bounds_x(lo..=hi);
        }
        if let Some((lo, hi)) = y {
            plot_ui.set_plot_bounds_y(lo..=hi);
        }
    }
}

fn to_egui_rect(rect: &Rect, area: egui::Rect) -> egui::Rect {
    let [x, y, w, h] = rect.to_pixels(area.min.x, area.min.y, area.width(), area.height());
    egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w.max(0.0), h.max(0.0)))
}

fn legend_corner(corner: LegendCorner) -> Corner {
    match corner {
        LegendCorner::RightTop => Corner::RightTop,
        LegendCorner::LeftTop => Corner::LeftTop,
        LegendCorner::LeftBottom => Corner::LeftBottom,
        LegendCorner::RightBottom => Corner::RightBottom,
    }
}

fn band_polygon(band: &FillBand) -> Polygon<'static> {
    let (x0, x1) = band.x;
    let (y0, y1) = band.y;
    Polygon::new(
        band.name.clone(),
        PlotPoints::from(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]),
    )
    .fill_color(band.color)
    .stroke(Stroke::NONE)
}

fn draw_rules(plot_ui: &mut PlotUi, times: &[f64], color: Color32) {
    let color = color.gamma_multiply(0.3);
    for &t in times {
        plot_ui.vline(VLine::new("", t).color(color).width(RULE_WIDTH));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main region
// ─────────────────────────────────────────────────────────────────────────────

fn show_main(
    ui: &mut egui::Ui,
    scene: &Scene,
    formatter: &TimeFormatter,
    rule_color: Color32,
    pending: Option<&Pending>,
    observed: &mut Observed,
) {
    let (percent_range, main_range) = (scene.percent.y_range, scene.main.y_range);
    let show_percent_axis = !scene.percent.lines.is_empty();

    let mut y_axes = vec![AxisHints::new_y()
        .formatter(|mark, _range| format_value(mark.value, mark.step_size))
        .min_thickness(Y_AXIS_WIDTH)];
    if show_percent_axis {
        y_axes.push(
            AxisHints::new_y()
                .placement(HPlacement::Right)
                .formatter(move |mark, _range| {
                    format_percent(main_to_percent(mark.value, percent_range, main_range))
                }),
        );
    }

    let mut plot = Plot::new("flagscope_main")
        .link_axis(egui::Id::new(LINK_GROUP), [true, false])
        .legend(Legend::default().position(legend_corner(scene.legend.corner)))
        .custom_y_axes(y_axes)
        .x_axis_formatter(move |mark, range| {
            formatter.format(mark.value, (*range.start(), *range.end()))
        })
        .allow_double_click_reset(false);
    if scene.tick_density == TickDensity::Fine {
        plot = plot.grid_spacing(4.0..=120.0);
    }

    let resp = plot.show(ui, |plot_ui| {
        if let Some(p) = pending {
            p.apply(plot_ui, p.main_y);
        }
        for band in &scene.main.bands {
            plot_ui.polygon(band_polygon(band));
        }
        draw_rules(plot_ui, &scene.vertical_lines, rule_color);
        for line in &scene.main.lines {
            let points: PlotPoints = line.points.iter().copied().collect();
            plot_ui.line(
                Line::new(line.name.clone(), points)
                    .color(line.color)
                    .width(LINE_WIDTH),
            );
        }
        for line in &scene.percent.lines {
            let points: PlotPoints = line
                .points
                .iter()
                .map(|[t, v]| [*t, percent_to_main(*v, percent_range, main_range)])
                .collect();
            let mut item = Line::new(line.name.clone(), points)
                .color(line.color)
                .width(LINE_WIDTH);
            if line.dashed {
                item = item.style(LineStyle::dashed_loose());
            }
            plot_ui.line(item);
        }
        for label in &scene.main.labels {
            plot_ui.text(
                Text::new("", PlotPoint::new(label.x, label.y), RichText::new(&label.text))
                    .anchor(Align2::LEFT_BOTTOM),
            );
        }
    });

    let bounds = resp.transform.bounds();
    let (xr, yr) = (bounds.range_x(), bounds.range_y());
    observed.x = Some((*xr.start(), *xr.end()));
    observed.main_y = Some((*yr.start(), *yr.end()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Flag rows
// ─────────────────────────────────────────────────────────────────────────────

fn show_flag(
    ui: &mut egui::Ui,
    slot: usize,
    flag: &FlagScene,
    rules: &[f64],
    rule_color: Color32,
    pending: Option<&Pending>,
    observed: &mut Observed,
) {
    let mut label = RichText::new(&flag.display_name);
    if flag.bold {
        label = label.strong();
    }

    let plot = Plot::new(("flagscope_flag", slot))
        .link_axis(egui::Id::new(LINK_GROUP), [true, false])
        .show_axes([false, true])
        .show_grid([false, false])
        .y_axis_formatter(|_mark, _range| String::new())
        .y_axis_label(label)
        .y_axis_min_width(Y_AXIS_WIDTH)
        .allow_zoom([true, false])
        .allow_drag([true, false])
        .allow_scroll([true, false])
        .allow_double_click_reset(false)
        .show_x(false)
        .show_y(false);

    let resp = plot.show(ui, |plot_ui| {
        if let Some(p) = pending {
            p.apply(plot_ui, None);
        }
        plot_ui.set_plot_bounds_y(FLAG_Y_RANGE.0..=FLAG_Y_RANGE.1);
        if let Some(bg) = &flag.background {
            plot_ui.polygon(band_polygon(bg));
        }
        for band in &flag.bands {
            plot_ui.polygon(band_polygon(band));
        }
        draw_rules(plot_ui, rules, rule_color);
    });

    if resp.response.clicked() {
        if let Some(pos) = resp.response.interact_pointer_pos() {
            let time = resp.transform.value_from_position(pos).x;
            observed.click = Some(ClickEvent {
                region: RegionId::Flag(slot),
                time,
            });
        }
    }
}
