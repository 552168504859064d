//! Course model.
//!
//! A course is one section to be placed into the timetable. Courses are
//! immutable after loading and referenced by index ([`CourseId`]) from
//! every genome.

use serde::{Deserialize, Serialize};

use super::InstructorId;

/// Index of a course in the problem's course list.
pub type CourseId = usize;

/// A course section to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Display name (section titles may repeat).
    pub name: String,
    /// Number of enrolled students; the hosting classroom needs at least this many seats.
    pub enrolled: u32,
    /// Instructor teaching this course.
    pub instructor: InstructorId,
}

impl Course {
    /// Creates a new course.
    pub fn new(name: impl Into<String>, enrolled: u32, instructor: InstructorId) -> Self {
        Self {
            name: name.into(),
            enrolled,
            instructor,
        }
    }

    /// Whether the course fits a room with `seats` seats.
    #[inline]
    pub fn fits(&self, seats: u32) -> bool {
        seats >= self.enrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_fits() {
        let c = Course::new("CS-101", 30, 0);
        assert!(c.fits(30));
        assert!(c.fits(45));
        assert!(!c.fits(29));
    }
}
