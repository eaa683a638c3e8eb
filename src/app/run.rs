//! Top-level entry point for running FlagScope as a native window.

use std::path::PathBuf;

use eframe::egui;

use crate::config::PlotConfig;
use crate::data::classify::ClassifiedDataset;

use super::FlagScopeApp;

/// Open the viewer for `data` and block until the window is closed.
///
/// `settings_path` is where settings changes are persisted.
pub fn run_app(
    title: &str,
    data: ClassifiedDataset,
    config: PlotConfig,
    settings_path: PathBuf,
) -> eframe::Result<()> {
    let app = FlagScopeApp::with_dataset(data, config, settings_path);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1400.0, 900.0));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Render the crate's `icon.svg` into window icon pixels.
///
/// Returns `None` if the file does not exist or cannot be rendered.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let tree = usvg::Tree::from_data(&data, &usvg::Options::default()).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
