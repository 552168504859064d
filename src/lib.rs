//! Course timetabling by genetic search.
//!
//! Places courses into classroom time slots for a teaching week so that
//! every course fits its room, no instructor is double-booked, every course
//! is placed, a course never straddles incompatible day patterns, and as
//! few classrooms as possible are used.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Classroom`, `Instructor`,
//!   `WeekLayout`, `TimetableRequest`
//! - **`validation`**: Input integrity checks (duplicate names, dangling references)
//! - **`ga`**: Genome, fitness, operators, selection and the generational controller
//! - **`report`**: KPIs and a plain-text weekly grid of a solution
//! - **`error`**: Setup errors
//!
//! # Quick Start
//!
//! ```
//! use u_timetable::ga::{GaConfig, GaRunner, TimetableProblem};
//! use u_timetable::models::TimetableRequest;
//! use u_timetable::report::TimetableKpi;
//!
//! let mut request = TimetableRequest::new();
//! let smith = request.add_instructor("Smith");
//! request.add_course("CS-101", 25, smith);
//! request.add_course("CS-201", 18, smith);
//! request.add_classroom("SIMP-120", 30);
//! request.add_classroom("SIMP-200", 20);
//!
//! let problem = TimetableProblem::new(request).unwrap();
//! let result = GaRunner::run(&problem, &GaConfig::default().with_seed(42)).unwrap();
//! let kpi = TimetableKpi::calculate(&problem, &result.best);
//! assert!(kpi.unplaced_courses.is_empty());
//! ```
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod error;
pub mod ga;
pub mod models;
pub mod report;
pub mod validation;

pub use error::{Result, TimetableError};
