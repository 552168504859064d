//! Reporting on finished timetables.
//!
//! - [`TimetableKpi`]: quality indicators
//! - [`TimetableGrid`]: plain-text weekly grid for display

mod grid;
mod kpi;

pub use grid::TimetableGrid;
pub use kpi::TimetableKpi;
