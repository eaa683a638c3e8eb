//! Column picker: one checklist per channel kind.

use egui::Ui;

use crate::data::classify::{ChannelKind, ClassifiedDataset};
use crate::data::selection::Selection;
use crate::session::PlotSession;

use super::panel_trait::{Panel, PanelAction};

/// Display order of the checklists.
const KIND_ORDER: [ChannelKind; 4] = [
    ChannelKind::Flag,
    ChannelKind::Numeric,
    ChannelKind::Percent,
    ChannelKind::BoolState,
];

#[derive(Debug, Clone, PartialEq)]
struct CheckItem {
    name: String,
    checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Checklist {
    kind: ChannelKind,
    items: Vec<CheckItem>,
}

/// Checklists built from the dataset's classification.
///
/// A channel starts checked when it has more than one distinct value, so
/// constant channels are hidden until picked explicitly.
pub struct ColumnPicker {
    lists: Vec<Checklist>,
}

impl ColumnPicker {
    pub fn new(data: &ClassifiedDataset) -> Self {
        let cls = data.classification();
        let lists = KIND_ORDER
            .into_iter()
            .map(|kind| Checklist {
                kind,
                items: cls
                    .names(kind)
                    .iter()
                    .map(|name| CheckItem {
                        name: name.clone(),
                        checked: data.distinct_count(name) > 1,
                    })
                    .collect(),
            })
            .collect();
        Self { lists }
    }

    pub fn is_checked(&self, kind: ChannelKind, name: &str) -> Option<bool> {
        self.lists
            .iter()
            .find(|l| l.kind == kind)?
            .items
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.checked)
    }

    pub fn set_checked(&mut self, kind: ChannelKind, name: &str, checked: bool) {
        if let Some(item) = self
            .lists
            .iter_mut()
            .filter(|l| l.kind == kind)
            .flat_map(|l| l.items.iter_mut())
            .find(|i| i.name == name)
        {
            item.checked = checked;
        }
    }

    /// A full selection: every kind gets an explicit list, possibly empty.
    pub fn selection(&self) -> Selection {
        let mut sel = Selection::all();
        for list in &self.lists {
            let names = list
                .items
                .iter()
                .filter(|i| i.checked)
                .map(|i| i.name.clone())
                .collect();
            sel.set(list.kind, Some(names));
        }
        sel
    }
}

impl Panel for ColumnPicker {
    fn title(&self) -> &'static str {
        "Column selector"
    }

    fn default_size(&self) -> [f32; 2] {
        [800.0, 560.0]
    }

    fn render_panel(&mut self, ui: &mut Ui, _session: &PlotSession) -> Option<PanelAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                action = Some(PanelAction::ApplySelection(self.selection()));
            }
            if ui.button("Cancel").clicked() {
                action = Some(PanelAction::Close);
            }
        });
        ui.separator();

        let shown: Vec<&mut Checklist> = self
            .lists
            .iter_mut()
            .filter(|l| !l.items.is_empty())
            .collect();
        if shown.is_empty() {
            ui.label("No plottable columns.");
            return action;
        }
        ui.columns(shown.len(), |cols| {
            for (ui, list) in cols.iter_mut().zip(shown) {
                ui.strong(list.kind.label());
                egui::ScrollArea::vertical()
                    .id_salt(list.kind.label())
                    .show(ui, |ui| {
                        for item in &mut list.items {
                            ui.checkbox(&mut item.checked, item.name.as_str());
                        }
                    });
            }
        });
        action
    }
}
