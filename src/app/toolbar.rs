//! Toolbar above the plot stack.

use eframe::egui;
use egui_phosphor::regular::{
    CLOCK, COLUMNS, FLAG, FOLDER_OPEN, GEAR, LIST_CHECKS, LOCK, LOCK_OPEN, MOON, SUN, TAG,
};

use crate::color_scheme::Theme;

use super::FlagScopeApp;

pub(super) fn show_toolbar(ui: &mut egui::Ui, app: &mut FlagScopeApp) {
    let cfg = app.session.config().clone();
    let first = app.session.data().times().first().copied().unwrap_or_default();

    ui.horizontal(|ui| {
        if ui
            .button(format!("{FOLDER_OPEN} Open"))
            .on_hover_text("Load another Excel or CSV file")
            .clicked()
        {
            app.open_file();
        }
        ui.separator();

        if ui
            .selectable_label(cfg.flags.show_flag_background, format!("{FLAG} G"))
            .on_hover_text("Toggle background color on flag plots")
            .clicked()
        {
            app.session.toggle_flag_background();
        }

        if ui
            .selectable_label(cfg.display.show_vertical_lines, format!("{COLUMNS} T"))
            .on_hover_text("Toggle vertical lines on plots")
            .clicked()
        {
            app.session.toggle_vertical_lines();
        }

        let time_label = cfg.time_format().toggle_label(first);
        if ui
            .button(format!("{CLOCK} {time_label}"))
            .on_hover_text("Toggle time format (Date/Time)")
            .clicked()
        {
            app.session.toggle_time_format();
        }

        let lock_icon = if cfg.display.lock_percent_scale {
            LOCK
        } else {
            LOCK_OPEN
        };
        if ui
            .selectable_label(cfg.display.lock_percent_scale, format!("{lock_icon} 0-100%"))
            .on_hover_text("Lock the percent axis to 0-100%")
            .clicked()
        {
            app.session.toggle_lock_percent_scale();
        }

        if ui
            .selectable_label(cfg.processes.show_processes_labels, format!("{TAG} Labels"))
            .on_hover_text("Label process states at their first active sample")
            .clicked()
        {
            app.session.toggle_process_labels();
        }
        ui.separator();

        if ui
            .button(format!("{LIST_CHECKS} Columns"))
            .on_hover_text("Choose displayed columns")
            .clicked()
        {
            app.open_or_focus_picker();
        }

        if ui
            .button(format!("{GEAR} Settings"))
            .on_hover_text("Application settings")
            .clicked()
        {
            app.open_or_focus_settings();
        }

        let theme_icon = match cfg.display.theme {
            Theme::Light => SUN,
            Theme::Dark => MOON,
        };
        if ui
            .button(theme_icon)
            .on_hover_text("Toggle theme (Light/Dark)")
            .clicked()
        {
            app.session.toggle_theme();
        }
    });
}
