pub mod column_picker;
pub mod panel_trait;
pub mod settings_ui;

pub use column_picker::ColumnPicker;
pub use panel_trait::{show_panel_window, Panel, PanelAction};
pub use settings_ui::SettingsWindow;
