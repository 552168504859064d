//! Plain-text weekly grid of a timetable.
//!
//! ```text
//! SIMP-120 (30 seats)
//!   Monday: [CS-1, -, CS-2, -, -, -, -, -, -, -]
//!   Tuesday: [CS-3, -, -, -, -, -, -]
//! ```

use std::fmt;

use crate::ga::{Timetable, TimetableProblem};

/// Display adapter rendering every used classroom day by day.
///
/// Unused classrooms are skipped. Course ids without a matching course
/// render as `#id`.
pub struct TimetableGrid<'a> {
    problem: &'a TimetableProblem,
    timetable: &'a Timetable,
}

impl<'a> TimetableGrid<'a> {
    /// Wraps a genome for display.
    pub fn new(problem: &'a TimetableProblem, timetable: &'a Timetable) -> Self {
        Self { problem, timetable }
    }
}

impl fmt::Display for TimetableGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = &self.problem.layout;
        let mut any = false;

        for room in self.timetable.rooms.iter().filter(|r| r.is_used()) {
            any = true;
            match self.problem.classrooms.get(room.classroom) {
                Some(c) => writeln!(f, "{} ({} seats)", c.name, c.size)?,
                None => writeln!(f, "#{}", room.classroom)?,
            }
            for (g, group) in layout.groups.iter().enumerate() {
                let cells: Vec<String> = layout
                    .group_range(g)
                    .map(|slot| match room.slots.get(slot).copied().flatten() {
                        Some(course) => self
                            .problem
                            .courses
                            .get(course)
                            .map_or_else(|| format!("#{course}"), |c| c.name.clone()),
                        None => "-".to_string(),
                    })
                    .collect();
                writeln!(f, "  {}: [{}]", group.name, cells.join(", "))?;
            }
        }

        if !any {
            writeln!(f, "(no classrooms used)")?;
        }
        Ok(())
    }
}
