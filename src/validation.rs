//! Input validation for timetabling problems.
//!
//! Checks structural integrity of courses, classrooms, and instructors
//! before a search starts. Detects:
//! - Duplicate classroom or instructor names
//! - Courses pointing at unknown instructors
//! - Instructors listing unknown courses
//! - Instructor course lists that disagree with the courses themselves,
//!   in either direction
//!
//! Empty lists and courses too large for every room are not errors: the
//! search degrades gracefully and reports them through fitness penalties.

use std::collections::HashSet;

use crate::models::TimetableRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two classrooms or two instructors share a name.
    DuplicateName,
    /// A course references an instructor that doesn't exist.
    InvalidInstructorReference,
    /// An instructor lists a course that doesn't exist.
    InvalidCourseReference,
    /// An instructor lists a course assigned to someone else.
    InconsistentInstructor,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate classroom names
/// 2. No duplicate instructor names
/// 3. Every course's instructor exists and lists the course
/// 4. Every course listed by an instructor exists
/// 5. Every course listed by an instructor names that instructor back
///
/// Course names may repeat; sections of one course share a title.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(request: &TimetableRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_names = HashSet::new();
    for room in &request.classrooms {
        if !room_names.insert(room.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate classroom name: {}", room.name),
            ));
        }
    }

    let mut instructor_names = HashSet::new();
    for instructor in &request.instructors {
        if !instructor_names.insert(instructor.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate instructor name: {}", instructor.name),
            ));
        }
    }

    for (id, course) in request.courses.iter().enumerate() {
        match request.instructors.get(course.instructor) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInstructorReference,
                format!(
                    "Course '{}' references unknown instructor #{}",
                    course.name, course.instructor
                ),
            )),
            Some(instructor) if !instructor.teaches(id) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InconsistentInstructor,
                    format!(
                        "Course '{}' is not listed by its instructor '{}'",
                        course.name, instructor.name
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    for (id, instructor) in request.instructors.iter().enumerate() {
        for &course_id in &instructor.courses {
            match request.courses.get(course_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCourseReference,
                    format!(
                        "Instructor '{}' references unknown course #{course_id}",
                        instructor.name
                    ),
                )),
                Some(course) if course.instructor != id => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InconsistentInstructor,
                        format!(
                            "Instructor '{}' lists course '{}' taught by instructor #{}",
                            instructor.name, course.name, course.instructor
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
