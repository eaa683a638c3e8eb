use flagscope::color_scheme::Theme;
use flagscope::config::PlotConfig;
use flagscope::data::classify::ClassifiedDataset;
use flagscope::data::dataset::{Column, ColumnValues, Dataset};
use flagscope::panels::*;

fn data() -> ClassifiedDataset {
    let ds = Dataset::from_parts(
        "time",
        vec![0.0, 1.0],
        vec![Column::new("Door", ColumnValues::Bool(vec![true, false]))],
    )
    .unwrap();
    ClassifiedDataset::new(ds).unwrap()
}

#[test]
fn panel_titles_are_distinct() {
    let picker = ColumnPicker::new(&data());
    let settings = SettingsWindow::new(&PlotConfig::default());
    assert_ne!(picker.title(), settings.title());
}

#[test]
fn settings_draft_starts_from_the_current_config() {
    let mut cfg = PlotConfig::default();
    cfg.flags.flag_height_px = 40.0;
    let window = SettingsWindow::new(&cfg);
    assert_eq!(window.draft(), &cfg);
}

#[test]
fn reset_replaces_the_draft_with_defaults() {
    let mut cfg = PlotConfig::default();
    cfg.display.theme = cfg.display.theme.toggled();
    cfg.flags.show_flag_background = !cfg.flags.show_flag_background;
    let mut window = SettingsWindow::new(&cfg);
    window.reset_to_defaults();
    assert_eq!(window.draft(), &PlotConfig::default());
    assert_ne!(window.draft().display.theme, cfg.display.theme);
}

#[test]
fn theme_labels() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_ne!(Theme::Light.label(), Theme::Dark.label());
}
