use egui::Color32;

use flagscope::color_scheme::{fallback_color, with_alpha, Theme, DEFAULT_BAND_ALPHA};
use flagscope::config::PlotConfig;

#[test]
fn defaults_match_the_documented_values() {
    let cfg = PlotConfig::default();
    assert_eq!(cfg.display.theme, Theme::Dark);
    assert!(cfg.display.show_time_only);
    assert!(!cfg.display.show_vertical_lines);
    assert_eq!(cfg.flags.flag_color, "#9b0000");
    assert_eq!(cfg.flags.flag_height_px, 24.0);
    assert_eq!(cfg.processes.bands.len(), 5);
}

#[test]
fn save_then_load_gives_the_same_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut cfg = PlotConfig::default();
    cfg.display.theme = Theme::Light;
    cfg.flags.flag_height_px = 31.0;
    cfg.margins.left = 0.1;
    cfg.save(&path).unwrap();
    assert_eq!(PlotConfig::load(&path).unwrap(), cfg);
}

#[test]
fn missing_file_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let cfg = PlotConfig::load_or_default(&path);
    assert_eq!(cfg, PlotConfig::default());
    assert!(path.exists());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(PlotConfig::load(&path).is_err());
    assert_eq!(PlotConfig::load_or_default(&path), PlotConfig::default());
}

#[test]
fn partial_file_fills_in_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "flags": { "flag_height_px": 12.0 } }"#).unwrap();
    let cfg = PlotConfig::load(&path).unwrap();
    assert_eq!(cfg.flags.flag_height_px, 12.0);
    assert_eq!(cfg.flags.flag_color, "#9b0000");
    assert_eq!(cfg.display, PlotConfig::default().display);
}

#[test]
fn band_colors_beyond_the_palette_use_fallbacks() {
    let cfg = PlotConfig::default();
    assert_eq!(
        cfg.band_fill(0),
        with_alpha(Color32::from_rgb(0, 128, 0), 0.2)
    );
    assert_eq!(
        cfg.band_fill(7),
        with_alpha(fallback_color(7), DEFAULT_BAND_ALPHA)
    );
}

#[test]
fn unparseable_flag_color_falls_back() {
    let mut cfg = PlotConfig::default();
    cfg.flags.flag_color = "not-a-color".into();
    cfg.flags.flag_alpha = 1.0;
    assert_eq!(cfg.flag_fill(), Color32::DARK_RED);
}
