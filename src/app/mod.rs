//! Native window for FlagScope.
//!
//! | Sub-module    | Responsibility |
//! | ------------- | -------------- |
//! | [`toolbar`]   | Toggle buttons above the plots |
//! | [`plot_view`] | Replaying the scene with `egui_plot` and reading interaction back |
//! | [`run`]       | [`run_app()`] entry point and icon loading |

mod plot_view;
mod run;
mod toolbar;

pub use run::run_app;

use std::path::PathBuf;

use eframe::egui;

use crate::color_scheme::Theme;
use crate::data::classify::ClassifiedDataset;
use crate::data::dataset::Dataset;
use crate::panels::{show_panel_window, ColumnPicker, PanelAction, SettingsWindow};
use crate::session::{PlotSession, SessionNotice};

/// Screen height assumed before the first frame reports the real one.
const INITIAL_SCREEN_HEIGHT: f64 = 900.0;

/// Theme and font size currently installed in the egui context.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AppliedDisplay {
    theme: Theme,
    font_size: f32,
}

pub struct FlagScopeApp {
    session: PlotSession,
    settings_path: PathBuf,
    column_picker: Option<ColumnPicker>,
    settings_window: Option<SettingsWindow>,
    /// Raise the matching window on the next frame.
    focus_picker: bool,
    focus_settings: bool,
    applied: Option<AppliedDisplay>,
}

impl FlagScopeApp {
    pub fn new(session: PlotSession, settings_path: impl Into<PathBuf>) -> Self {
        Self {
            session,
            settings_path: settings_path.into(),
            column_picker: None,
            settings_window: None,
            focus_picker: false,
            focus_settings: false,
            applied: None,
        }
    }

    pub fn with_dataset(
        data: ClassifiedDataset,
        config: crate::config::PlotConfig,
        settings_path: impl Into<PathBuf>,
    ) -> Self {
        let session = PlotSession::new(data, std::sync::Arc::new(config), INITIAL_SCREEN_HEIGHT);
        Self::new(session, settings_path)
    }

    pub fn session(&self) -> &PlotSession {
        &self.session
    }

    /// Open the column picker, or raise it if it is already open.
    pub fn open_or_focus_picker(&mut self) {
        if self.column_picker.is_none() {
            self.column_picker = Some(ColumnPicker::new(self.session.data()));
        }
        self.focus_picker = true;
    }

    /// Open the settings window, or raise it if it is already open.
    pub fn open_or_focus_settings(&mut self) {
        if self.settings_window.is_none() {
            self.settings_window = Some(SettingsWindow::new(self.session.config()));
        }
        self.focus_settings = true;
    }

    /// Ask for an Excel or CSV file and replace the dataset with it.
    fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel files", &["xls", "xlsx"])
            .add_filter("CSV files", &["csv"])
            .pick_file()
        else {
            return;
        };
        match Dataset::from_path(&path).and_then(ClassifiedDataset::new) {
            Ok(data) => {
                log::info!("loaded {} ({} rows)", path.display(), data.len());
                self.column_picker = None;
                self.session.load(data);
            }
            Err(e) => log::error!("could not load {}: {e}", path.display()),
        }
    }

    fn save_settings(&self) {
        match self.session.config().save(&self.settings_path) {
            Ok(()) => log::info!("saved settings to {}", self.settings_path.display()),
            Err(e) => log::warn!("could not save settings: {e}"),
        }
    }

    fn apply_display(&mut self, ctx: &egui::Context) {
        let display = &self.session.config().display;
        let wanted = AppliedDisplay {
            theme: display.theme,
            font_size: display.font_size,
        };
        if self.applied == Some(wanted) {
            return;
        }
        wanted.theme.apply(ctx);
        let size = wanted.font_size;
        ctx.style_mut(|style| {
            for (text_style, font) in style.text_styles.iter_mut() {
                font.size = match text_style {
                    egui::TextStyle::Small => size * 0.8,
                    egui::TextStyle::Heading => size * 1.4,
                    _ => size,
                };
            }
        });
        self.applied = Some(wanted);
    }

    fn handle_notices(&mut self) {
        for notice in self.session.take_notices() {
            match notice {
                SessionNotice::SettingsChanged => self.save_settings(),
                SessionNotice::LayoutChanged => {
                    let layout = self.session.layout();
                    if layout.clamped {
                        log::debug!(
                            "flag rows shrunk to {:.1} px to fit the window",
                            layout.flag_row_px
                        );
                    }
                }
                SessionNotice::Redrawn(_) => {}
            }
        }
    }

    fn show_panels(&mut self, ctx: &egui::Context) {
        if let Some(picker) = &mut self.column_picker {
            let action = show_panel_window(ctx, picker, &self.session, self.focus_picker);
            self.focus_picker = false;
            match action {
                Some(PanelAction::ApplySelection(selection)) => {
                    self.session.apply_selection(selection);
                    self.column_picker = None;
                }
                Some(PanelAction::Close) => self.column_picker = None,
                Some(PanelAction::SaveSettings(_)) | None => {}
            }
        }

        if let Some(window) = &mut self.settings_window {
            let action = show_panel_window(ctx, window, &self.session, self.focus_settings);
            self.focus_settings = false;
            match action {
                Some(PanelAction::SaveSettings(config)) => {
                    log::info!("applying settings from the settings window");
                    self.session.apply_settings(config);
                    self.settings_window = None;
                }
                Some(PanelAction::Close) => self.settings_window = None,
                Some(PanelAction::ApplySelection(_)) | None => {}
            }
        }
    }
}

impl eframe::App for FlagScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_display(ctx);

        egui::TopBottomPanel::top("flagscope_toolbar").show(ctx, |ui| {
            toolbar::show_toolbar(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.session.resize(f64::from(ui.max_rect().height()));
            plot_view::show_plots(ui, &mut self.session);
        });

        self.show_panels(ctx);
        self.handle_notices();

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_settings();
        }
    }
}
