use egui::{Context, Ui};

use crate::config::PlotConfig;
use crate::data::selection::Selection;
use crate::session::PlotSession;

/// What a floating panel asks the application to do after a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    ApplySelection(Selection),
    SaveSettings(PlotConfig),
    Close,
}

/// A floating window opened from the toolbar.
pub trait Panel {
    fn title(&self) -> &'static str;
    fn default_size(&self) -> [f32; 2] {
        [480.0, 420.0]
    }
    fn render_panel(&mut self, ui: &mut Ui, session: &PlotSession) -> Option<PanelAction>;
}

/// Show `panel` in its own window. `focus` raises the window above the others.
pub fn show_panel_window(
    ctx: &Context,
    panel: &mut dyn Panel,
    session: &PlotSession,
    focus: bool,
) -> Option<PanelAction> {
    let mut open = true;
    let mut action = None;
    let response = egui::Window::new(panel.title())
        .open(&mut open)
        .default_size(panel.default_size())
        .resizable(true)
        .show(ctx, |ui| {
            action = panel.render_panel(ui, session);
        });
    if focus {
        if let Some(inner) = &response {
            ctx.move_to_top(inner.response.layer_id);
        }
    }
    if !open {
        return Some(PanelAction::Close);
    }
    action
}
