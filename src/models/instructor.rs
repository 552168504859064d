//! Instructor model.

use serde::{Deserialize, Serialize};

use super::CourseId;

/// Index of an instructor in the problem's instructor list.
pub type InstructorId = usize;

/// An instructor and the courses they teach.
///
/// The course list is only consulted to detect an instructor teaching
/// two courses in the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor name.
    pub name: String,
    /// Courses taught by this instructor.
    #[serde(default)]
    pub courses: Vec<CourseId>,
}

impl Instructor {
    /// Creates an instructor with no courses.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            courses: Vec::new(),
        }
    }

    /// Adds a taught course.
    pub fn with_course(mut self, course: CourseId) -> Self {
        self.courses.push(course);
        self
    }

    /// Whether this instructor teaches `course`.
    pub fn teaches(&self, course: CourseId) -> bool {
        self.courses.contains(&course)
    }
}
