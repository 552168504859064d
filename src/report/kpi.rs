//! Timetable quality metrics (KPIs).
//!
//! Summarizes a genome against its problem for reporting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fitness | `1 / rooms_used - penalties` |
//! | Classrooms Used | Rooms with at least one occupied slot |
//! | Unplaced Courses | Courses absent from every room |
//! | Utilization | Occupied slots / weekly slots, per used room |
//! | Avg Utilization | Mean over used rooms |
//!
//! # Reference
//! McCollum et al. (2010), "Setting the Research Agenda in Automated
//! Timetabling: ITC2007", Sec. 3: evaluation criteria

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ga::{FitnessBreakdown, Timetable, TimetableProblem};

/// Timetable performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableKpi {
    /// Fitness as scored by the problem.
    pub fitness: f64,
    /// Classrooms with at least one occupied slot.
    pub classrooms_used: usize,
    /// Instructor double-bookings, (instructor, slot) pairs.
    pub instructor_conflicts: usize,
    /// Same-course slot pairs across incompatible patterns.
    pub day_splits: usize,
    /// Names of courses that appear nowhere, in course order.
    pub unplaced_courses: Vec<String>,
    /// Occupied fraction of the week, keyed by classroom name (used rooms only).
    pub utilization_by_classroom: HashMap<String, f64>,
    /// Average utilization over used classrooms (0.0..1.0).
    pub avg_utilization: f64,
}

impl TimetableKpi {
    /// Computes KPIs for a genome.
    ///
    /// Does not read or write the genome's fitness memo.
    pub fn calculate(problem: &TimetableProblem, timetable: &Timetable) -> Self {
        let FitnessBreakdown {
            classrooms_used,
            instructor_conflicts,
            missing_courses: _,
            day_splits,
        } = problem.breakdown(timetable);
        let fitness = problem.score(timetable);

        let unplaced_courses = problem
            .courses
            .iter()
            .enumerate()
            .filter(|&(id, _)| !timetable.contains_course(id))
            .map(|(_, course)| course.name.clone())
            .collect();

        let total_slots = problem.layout.total_slots();
        let utilization_by_classroom: HashMap<String, f64> = timetable
            .rooms
            .iter()
            .filter(|room| room.is_used() && total_slots > 0)
            .filter_map(|room| {
                let name = problem.classrooms.get(room.classroom)?.name.clone();
                Some((name, room.occupied_count() as f64 / total_slots as f64))
            })
            .collect();

        let avg_utilization = if utilization_by_classroom.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_classroom.values().sum();
            sum / utilization_by_classroom.len() as f64
        };

        Self {
            fitness,
            classrooms_used,
            instructor_conflicts,
            day_splits,
            unplaced_courses,
            utilization_by_classroom,
            avg_utilization,
        }
    }

    /// Whether every course is placed with no conflict or split.
    pub fn is_feasible(&self) -> bool {
        self.unplaced_courses.is_empty() && self.instructor_conflicts == 0 && self.day_splits == 0
    }
}
