//! Column classification: assigns every channel column one semantic kind.

use std::collections::HashMap;

use crate::data::dataset::{ColumnValues, Dataset};
use crate::error::LoadError;

/// Name prefix marking a numeric column as a boolean process state.
pub const BOOL_STATE_PREFIX: &str = "F-";
/// Marker character for percent channels.
pub const PERCENT_MARKER: char = '%';

/// Semantic kind of a plottable channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    /// Native boolean column, drawn in its own stacked region.
    Flag,
    /// `F-` prefixed numeric column reinterpreted as boolean.
    BoolState,
    /// Numeric column whose name contains `%`.
    Percent,
    /// Any other numeric column.
    Numeric,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 4] = [
        ChannelKind::Flag,
        ChannelKind::Numeric,
        ChannelKind::Percent,
        ChannelKind::BoolState,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Flag => "Flags",
            ChannelKind::BoolState => "States",
            ChannelKind::Percent => "Percents",
            ChannelKind::Numeric => "Numerics",
        }
    }
}

/// Decide the kind of one column. First matching rule wins; `None` means the
/// column is not plottable.
pub fn classify_column(name: &str, values: &ColumnValues) -> Option<ChannelKind> {
    match values {
        ColumnValues::Bool(_) => Some(ChannelKind::Flag),
        ColumnValues::Numeric(_) if name.starts_with(BOOL_STATE_PREFIX) => {
            Some(ChannelKind::BoolState)
        }
        ColumnValues::Numeric(_) if name.contains(PERCENT_MARKER) => Some(ChannelKind::Percent),
        ColumnValues::Numeric(_) => Some(ChannelKind::Numeric),
        ColumnValues::Text(_) => None,
    }
}

/// Mapping from column name to kind, in dataset column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    flags: Vec<String>,
    bool_states: Vec<String>,
    percents: Vec<String>,
    numerics: Vec<String>,
    unclassified: Vec<String>,
}

impl Classification {
    /// Classify every non-time column of `dataset`.
    pub fn of(dataset: &Dataset) -> Result<Self, LoadError> {
        if dataset.is_empty() {
            return Err(LoadError::EmptyDataset);
        }
        let mut out = Self::default();
        for col in dataset.columns() {
            match classify_column(&col.name, &col.values) {
                Some(kind) => out.names_mut(kind).push(col.name.clone()),
                None => out.unclassified.push(col.name.clone()),
            }
        }
        Ok(out)
    }

    /// Channel names of `kind`, in classification order.
    pub fn names(&self, kind: ChannelKind) -> &[String] {
        match kind {
            ChannelKind::Flag => &self.flags,
            ChannelKind::BoolState => &self.bool_states,
            ChannelKind::Percent => &self.percents,
            ChannelKind::Numeric => &self.numerics,
        }
    }

    fn names_mut(&mut self, kind: ChannelKind) -> &mut Vec<String> {
        match kind {
            ChannelKind::Flag => &mut self.flags,
            ChannelKind::BoolState => &mut self.bool_states,
            ChannelKind::Percent => &mut self.percents,
            ChannelKind::Numeric => &mut self.numerics,
        }
    }

    /// Columns that matched no rule.
    pub fn unclassified(&self) -> &[String] {
        &self.unclassified
    }

    pub fn kind_of(&self, name: &str) -> Option<ChannelKind> {
        ChannelKind::ALL
            .into_iter()
            .find(|k| self.names(*k).iter().any(|n| n == name))
    }

    pub fn contains(&self, kind: ChannelKind, name: &str) -> bool {
        self.names(kind).iter().any(|n| n == name)
    }
}

/// A loaded dataset together with its immutable classification.
///
/// Numeric `F-` columns are re-cast to booleans once here; only `0` reads as
/// `false`, anything else (including `NaN`) as `true`.
#[derive(Debug, Clone)]
pub struct ClassifiedDataset {
    dataset: Dataset,
    classification: Classification,
    bool_states: HashMap<String, Vec<bool>>,
}

impl ClassifiedDataset {
    pub fn new(dataset: Dataset) -> Result<Self, LoadError> {
        let classification = Classification::of(&dataset)?;
        let bool_states = classification
            .names(ChannelKind::BoolState)
            .iter()
            .filter_map(|name| match dataset.column(name).map(|c| &c.values) {
                Some(ColumnValues::Numeric(v)) => Some((
                    name.clone(),
                    v.iter().map(|x| *x != 0.0).collect(),
                )),
                _ => None,
            })
            .collect();
        log::info!(
            "classified {} columns: {} flags, {} states, {} percents, {} numerics, {} ignored",
            dataset.columns().len(),
            classification.flags.len(),
            classification.bool_states.len(),
            classification.percents.len(),
            classification.numerics.len(),
            classification.unclassified.len(),
        );
        Ok(Self {
            dataset,
            classification,
            bool_states,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn times(&self) -> &[f64] {
        self.dataset.times()
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Values of a `Numeric` or `Percent` channel.
    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.classification.kind_of(name)? {
            ChannelKind::Numeric | ChannelKind::Percent => {
                match &self.dataset.column(name)?.values {
                    ColumnValues::Numeric(v) => Some(v),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Boolean view of a `Flag` or `BoolState` channel.
    pub fn boolean(&self, name: &str) -> Option<&[bool]> {
        match self.classification.kind_of(name)? {
            ChannelKind::Flag => match &self.dataset.column(name)?.values {
                ColumnValues::Bool(v) => Some(v),
                _ => None,
            },
            ChannelKind::BoolState => self.bool_states.get(name).map(Vec::as_slice),
            _ => None,
        }
    }

    /// Number of distinct values in a channel, used to pre-check picker rows.
    pub fn distinct_count(&self, name: &str) -> usize {
        match self.classification.kind_of(name) {
            Some(ChannelKind::BoolState) => self
                .boolean(name)
                .map(|v| ColumnValues::Bool(v.to_vec()).distinct_count())
                .unwrap_or(0),
            _ => self
                .dataset
                .column(name)
                .map(|c| c.values.distinct_count())
                .unwrap_or(0),
        }
    }
}
