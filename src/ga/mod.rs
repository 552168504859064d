//! GA-based timetable optimization.
//!
//! A genome ([`Timetable`]) owns one slot vector per classroom; every slot
//! holds at most one course. Meetings occupy one offset in every day group
//! of their pattern and move as a unit.
//!
//! # Encoding
//!
//! - **Room-major**: `rooms[c].slots[t]` is the course in classroom `c` at
//!   flat weekly slot `t`. Crossover cuts between classrooms.
//! - **Meetings**: a (pattern, offset) position expands to one slot per day
//!   group of the pattern (see [`WeekLayout`](crate::models::WeekLayout)).
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable mutation strategy
//! - [`selection`]: Tournament, survivor truncation, selection shares
//! - [`runner`]: Generational controller and one-shot runner
//!
//! # Reference
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

mod chromosome;
mod config;
pub mod operators;
mod problem;
pub mod runner;
pub mod selection;

pub use chromosome::{
    Placement, RoomSchedule, Timetable, consolidation_mutation, crossover_at,
    single_point_crossover, slot_swap_mutation,
};
pub use config::GaConfig;
pub use operators::{GeneticOperators, MutationType};
pub use problem::{FitnessBreakdown, TimetableProblem};
pub use runner::{GaPhase, GaResult, GaRunner, Termination, TimetableGa};
pub use selection::{assign_selection_probs, select_parents, select_survivors, tournament_selection};
