use flagscope::config::PlotConfig;
use flagscope::data::classify::{ChannelKind, ClassifiedDataset};
use flagscope::data::dataset::{Column, ColumnValues, Dataset};
use flagscope::data::selection::Selection;
use flagscope::scene::{build_scene, display_name, RenderInput, TickDensity, PERCENT_LOCKED_RANGE};

fn data() -> ClassifiedDataset {
    let ds = Dataset::from_parts(
        "time",
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![
            Column::new("Door", ColumnValues::Bool(vec![false, true, true, false, true])),
            Column::new("F-Valve", ColumnValues::Bool(vec![true; 5])),
            Column::new("Temp", ColumnValues::Numeric(vec![0.0, 5.0, 10.0, 5.0, 0.0])),
            Column::new("Load %", ColumnValues::Numeric(vec![20.0, 30.0, 40.0, 30.0, 20.0])),
            Column::new("F-Pump", ColumnValues::Numeric(vec![0.0, 1.0, 1.0, 0.0, 0.0])),
        ],
    )
    .unwrap();
    ClassifiedDataset::new(ds).unwrap()
}

fn render(data: &ClassifiedDataset, selection: &Selection, config: &PlotConfig) -> flagscope::scene::Scene {
    build_scene(&RenderInput {
        data,
        selection,
        config,
        visible_x: None,
    })
}

#[test]
fn main_region_holds_numerics_states_and_percents() {
    let d = data();
    let s = render(&d, &Selection::all(), &PlotConfig::default());

    assert_eq!(s.x_range, (0.0, 4.0));
    assert_eq!(s.main.lines.len(), 1);
    assert_eq!(s.main.y_range, (-0.5, 10.5));

    assert_eq!(s.percent.lines.len(), 1);
    assert!(s.percent.lines[0].dashed);
    assert_eq!(s.percent.y_range, (20.0, 40.0));

    // F-Pump is true on rows 1..=2, drawn as a pre-step band over (t0, t2].
    assert_eq!(s.main.bands.len(), 1);
    assert_eq!(s.main.bands[0].x, (0.0, 2.0));
    assert_eq!(s.main.bands[0].y, s.main.y_range);
    assert_eq!(s.main.bands[0].name, "[F-Pump]");
    assert_eq!(s.legend_entries, ["Temp", "[F-Pump]", "Load %"]);
}

#[test]
fn flag_rows_use_display_names_and_post_steps() {
    let d = data();
    let s = render(&d, &Selection::all(), &PlotConfig::default());
    let cols: Vec<&str> = s.flag_columns().collect();
    assert_eq!(cols, ["Door", "F-Valve"]);
    assert_eq!(s.flags[1].display_name, "Valve");

    let door: Vec<(f64, f64)> = s.flags[0].bands.iter().map(|b| b.x).collect();
    assert_eq!(door, [(1.0, 3.0), (4.0, 4.0)]);
    assert!(s.flags[0].background.is_some());
    assert!(s.flags[0].bold);
}

#[test]
fn display_name_strips_only_a_leading_prefix() {
    assert_eq!(display_name("F-Pump"), "Pump");
    assert_eq!(display_name("Pump F-"), "Pump F-");
}

#[test]
fn toggles_change_the_scene() {
    let d = data();
    let mut cfg = PlotConfig::default();
    cfg.flags.show_flag_background = false;
    cfg.display.show_vertical_lines = true;
    cfg.display.lock_percent_scale = true;
    let s = render(&d, &Selection::all(), &cfg);
    assert!(s.flags.iter().all(|f| f.background.is_none()));
    assert_eq!(s.vertical_lines, d.times());
    assert_eq!(s.tick_density, TickDensity::Fine);
    assert_eq!(s.percent.y_range, PERCENT_LOCKED_RANGE);
}

#[test]
fn process_labels_mark_first_active_sample() {
    let d = data();
    let mut cfg = PlotConfig::default();
    cfg.processes.show_processes_labels = true;
    let s = render(&d, &Selection::all(), &cfg);
    assert_eq!(s.main.labels.len(), 1);
    assert_eq!(s.main.labels[0].text, "F-Pump");
    assert_eq!(s.main.labels[0].x, 1.0);

    let hidden = build_scene(&RenderInput {
        data: &d,
        selection: &Selection::all(),
        config: &cfg,
        visible_x: Some((2.0, 4.0)),
    });
    assert!(hidden.main.labels.is_empty());
}

#[test]
fn selection_order_and_filtering_apply() {
    let d = data();
    let sel = Selection::all()
        .with(ChannelKind::Flag, &["F-Valve", "Door", "F-Valve"])
        .with(ChannelKind::Numeric, &[])
        .with(ChannelKind::BoolState, &["Temp"]);
    let s = render(&d, &sel, &PlotConfig::default());
    let cols: Vec<&str> = s.flag_columns().collect();
    assert_eq!(cols, ["F-Valve", "Door"]);
    assert!(s.main.lines.is_empty());
    assert!(s.main.bands.is_empty());
    assert_eq!(s.main.y_range, (-0.05, 1.05));
}

#[test]
fn rendering_is_deterministic() {
    let d = data();
    let cfg = PlotConfig::default();
    assert_eq!(
        render(&d, &Selection::all(), &cfg),
        render(&d, &Selection::all(), &cfg)
    );
}
