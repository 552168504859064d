//! Input bundle handed over by a data loader.

use serde::{Deserialize, Serialize};

use super::{Classroom, ClassroomId, Course, CourseId, Instructor, InstructorId, WeekLayout};

/// Courses, classrooms, instructors and the week layout for one run.
///
/// Loaders either deserialize this directly or build it with the
/// `add_*` helpers, which keep [`Instructor::courses`] in sync with
/// [`Course::instructor`].
///
/// # Example
///
/// ```
/// use u_timetable::models::TimetableRequest;
///
/// let mut request = TimetableRequest::new();
/// let williams = request.add_instructor("Nate Williams");
/// let cs1 = request.add_course("CS-1", 25, williams);
/// request.add_classroom("SIMP-120", 30);
///
/// assert_eq!(request.instructors[williams].courses, vec![cs1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableRequest {
    /// Courses to place.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Available classrooms.
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    /// Instructors.
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    /// Weekly slot geometry.
    #[serde(default)]
    pub layout: WeekLayout,
}

impl TimetableRequest {
    /// Creates an empty request with the two-day layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the week layout.
    pub fn with_layout(mut self, layout: WeekLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Adds an instructor and returns its id.
    pub fn add_instructor(&mut self, name: impl Into<String>) -> InstructorId {
        self.instructors.push(Instructor::new(name));
        self.instructors.len() - 1
    }

    /// Adds a course taught by `instructor` and returns its id.
    ///
    /// The course is also appended to the instructor's course list when the
    /// instructor exists; dangling ids are left for validation to report.
    pub fn add_course(
        &mut self,
        name: impl Into<String>,
        enrolled: u32,
        instructor: InstructorId,
    ) -> CourseId {
        let id = self.courses.len();
        self.courses.push(Course::new(name, enrolled, instructor));
        if let Some(teacher) = self.instructors.get_mut(instructor) {
            teacher.courses.push(id);
        }
        id
    }

    /// Adds a classroom and returns its id.
    pub fn add_classroom(&mut self, name: impl Into<String>, size: u32) -> ClassroomId {
        self.classrooms.push(Classroom::new(name, size));
        self.classrooms.len() - 1
    }
}
