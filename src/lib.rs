//! FlagScope crate root: re-exports and module wiring.
//!
//! FlagScope shows timestamped telemetry as a stack of synchronized plots:
//! numeric and percent channels plus shaded process states in the main
//! region, and one thin row per boolean flag above it. Clicking a flag row
//! zooms every region to the run of equal values under the cursor.
//!
//! - `data`: dataset loading, classification, selection, layout, segments, view bounds
//! - `scene`: render pipeline producing a backend-neutral scene
//! - `session`: the coordinator every UI trigger goes through
//! - `config` / `color_scheme`: persisted settings and themes
//! - `app` / `panels`: the egui window, toolbar and floating panels

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod legend;
pub mod panels;
pub mod scene;
pub mod session;

pub use app::{run_app, FlagScopeApp};
pub use config::PlotConfig;
pub use data::classify::{ChannelKind, Classification, ClassifiedDataset};
pub use data::dataset::Dataset;
pub use data::selection::Selection;
pub use error::{ConfigError, LoadError};
pub use session::{PlotSession, SessionNotice};
