//! Dataset model and the pure computations on it: classification,
//! selection, layout, flag segments and view bounds.

pub mod classify;
pub mod dataset;
pub mod demo;
pub mod layout;
pub mod segment;
pub mod selection;
pub mod view;
pub mod x_formatter;
