//! Configuration for the floating chat widget.
//!
//! Callers hand over a partial JSON object; [`WidgetConfig::merged`] completes
//! it from the built-in defaults with a shallow, top-level merge.

pub mod merge;
pub mod schema;

pub use schema::{
    BusinessHours, DEFAULT_PRIMARY_COLOR, HoursWindow, Position, Theme, Weekday, WidgetConfig,
};
