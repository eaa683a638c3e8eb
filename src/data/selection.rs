//! Per-kind channel selection coming from the column picker.

use serde::{Deserialize, Serialize};

use crate::data::classify::{ChannelKind, Classification};

/// Which channels of each kind to render. `None` shows every classified
/// channel of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub flags: Option<Vec<String>>,
    pub numerics: Option<Vec<String>>,
    pub percents: Option<Vec<String>>,
    pub bools: Option<Vec<String>>,
}

impl Selection {
    /// Show everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ChannelKind) -> Option<&[String]> {
        match kind {
            ChannelKind::Flag => self.flags.as_deref(),
            ChannelKind::Numeric => self.numerics.as_deref(),
            ChannelKind::Percent => self.percents.as_deref(),
            ChannelKind::BoolState => self.bools.as_deref(),
        }
    }

    pub fn set(&mut self, kind: ChannelKind, names: Option<Vec<String>>) {
        match kind {
            ChannelKind::Flag => self.flags = names,
            ChannelKind::Numeric => self.numerics = names,
            ChannelKind::Percent => self.percents = names,
            ChannelKind::BoolState => self.bools = names,
        }
    }

    pub fn with(mut self, kind: ChannelKind, names: &[&str]) -> Self {
        self.set(kind, Some(names.iter().map(|s| s.to_string()).collect()));
        self
    }

    /// Names of `kind` to draw: the selected names that are members of the
    /// classified set, in selection order without repeats. Unknown names are
    /// dropped silently.
    pub fn resolve<'a>(
        &'a self,
        kind: ChannelKind,
        classification: &'a Classification,
    ) -> Vec<&'a str> {
        match self.get(kind) {
            None => classification.names(kind).iter().map(String::as_str).collect(),
            Some(names) => {
                let mut out: Vec<&str> = Vec::with_capacity(names.len());
                for name in names {
                    if classification.contains(kind, name) && !out.contains(&name.as_str()) {
                        out.push(name.as_str());
                    }
                }
                out
            }
        }
    }

    /// List selected names that are not part of their kind's classified set.
    pub fn validate(&self, classification: &Classification) -> SelectionReport {
        let ignored = ChannelKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.get(kind)
                    .unwrap_or_default()
                    .iter()
                    .filter(move |n| !classification.contains(kind, n))
                    .map(move |n| (kind, n.clone()))
            })
            .collect();
        SelectionReport { ignored }
    }
}

/// Outcome of checking a selection against the classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Names that will not be rendered because their kind does not know them.
    pub ignored: Vec<(ChannelKind, String)>,
}

impl SelectionReport {
    pub fn is_clean(&self) -> bool {
        self.ignored.is_empty()
    }
}
