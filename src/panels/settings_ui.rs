//! Settings window editing a draft copy of the [`PlotConfig`].
//!
//! Nothing reaches the session until "Save" is pressed; "Close" throws the
//! draft away.

use egui::{Color32, Ui};

use crate::color_scheme::{parse_color, to_hex, Theme};
use crate::config::PlotConfig;
use crate::session::PlotSession;

use super::panel_trait::{Panel, PanelAction};

pub struct SettingsWindow {
    draft: PlotConfig,
}

impl SettingsWindow {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            draft: config.clone(),
        }
    }

    pub fn draft(&self) -> &PlotConfig {
        &self.draft
    }

    pub fn reset_to_defaults(&mut self) {
        self.draft = PlotConfig::default();
    }
}

/// Color swatch bound to a color string. Unparseable strings show as gray
/// and are only overwritten once the user picks a color.
fn color_field(ui: &mut Ui, label: &str, value: &mut String, alpha: &mut f32) {
    ui.label(label);
    ui.horizontal(|ui| {
        let mut rgb = parse_color(value).unwrap_or(Color32::GRAY);
        if ui.color_edit_button_srgba(&mut rgb).changed() {
            *value = to_hex(rgb);
        }
        ui.text_edit_singleline(value);
        ui.label("alpha");
        ui.add(egui::DragValue::new(alpha).range(0.0..=1.0).speed(0.01));
    });
    ui.end_row();
}

fn bool_field(ui: &mut Ui, label: &str, value: &mut bool) {
    ui.label(label);
    ui.checkbox(value, "");
    ui.end_row();
}

impl Panel for SettingsWindow {
    fn title(&self) -> &'static str {
        "Settings"
    }

    fn default_size(&self) -> [f32; 2] {
        [520.0, 600.0]
    }

    fn render_panel(&mut self, ui: &mut Ui, _session: &PlotSession) -> Option<PanelAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                action = Some(PanelAction::SaveSettings(self.draft.clone()));
            }
            if ui.button("Reset to defaults").clicked() {
                self.reset_to_defaults();
            }
            if ui.button("Close").clicked() {
                action = Some(PanelAction::Close);
            }
        });
        ui.separator();

        let cfg = &mut self.draft;
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::CollapsingHeader::new("Display")
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("settings_display").num_columns(2).show(ui, |ui| {
                        ui.label("Theme");
                        egui::ComboBox::from_id_salt("settings_theme")
                            .selected_text(cfg.display.theme.label())
                            .show_ui(ui, |ui| {
                                for theme in [Theme::Light, Theme::Dark] {
                                    ui.selectable_value(
                                        &mut cfg.display.theme,
                                        theme,
                                        theme.label(),
                                    );
                                }
                            });
                        ui.end_row();
                        ui.label("Font size");
                        ui.add(
                            egui::DragValue::new(&mut cfg.display.font_size)
                                .range(6.0..=32.0)
                                .speed(0.5),
                        );
                        ui.end_row();
                        bool_field(ui, "Time only", &mut cfg.display.show_time_only);
                        bool_field(ui, "Vertical lines", &mut cfg.display.show_vertical_lines);
                        bool_field(ui, "Lock percent scale", &mut cfg.display.lock_percent_scale);
                    });
                });

            egui::CollapsingHeader::new("Flags")
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("settings_flags").num_columns(2).show(ui, |ui| {
                        let f = &mut cfg.flags;
                        color_field(ui, "Flag color", &mut f.flag_color, &mut f.flag_alpha);
                        color_field(ui, "Background", &mut f.flag_bg_color, &mut f.flag_bg_alpha);
                        bool_field(ui, "Show background", &mut f.show_flag_background);
                        bool_field(ui, "Bold labels", &mut f.legend_bold);
                        ui.label("Row height (px)");
                        ui.add(
                            egui::DragValue::new(&mut f.flag_height_px)
                                .range(4.0..=200.0)
                                .speed(1.0),
                        );
                        ui.end_row();
                    });
                });

            egui::CollapsingHeader::new("Processes")
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("settings_processes").num_columns(2).show(ui, |ui| {
                        bool_field(ui, "Labels", &mut cfg.processes.show_processes_labels);
                        for (i, band) in cfg.processes.bands.iter_mut().enumerate() {
                            let label = format!("Process {}", i + 1);
                            color_field(ui, &label, &mut band.color, &mut band.alpha);
                        }
                    });
                });

            egui::CollapsingHeader::new("Layout")
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("settings_layout").num_columns(2).show(ui, |ui| {
                        let m = &mut cfg.margins;
                        for (label, value) in [
                            ("Top margin", &mut m.top),
                            ("Left margin", &mut m.left),
                            ("Right margin", &mut m.right),
                            ("Bottom margin", &mut m.bottom),
                        ] {
                            ui.label(label);
                            ui.add(egui::DragValue::new(value).range(0.0..=0.4).speed(0.005));
                            ui.end_row();
                        }
                    });
                });
        });
        action
    }
}
