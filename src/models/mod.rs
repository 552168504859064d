//! Timetabling domain models.
//!
//! Passive records handed over by a data loader, plus the weekly slot
//! geometry. Records are immutable once a problem is built; genomes refer
//! to them by index.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Course | Task |
//! | Classroom | Resource (capacity = seats) |
//! | Instructor | Secondary resource shared across rooms |
//! | WeekLayout | Calendar |

mod classroom;
mod course;
mod instructor;
mod layout;
mod request;

pub use classroom::{Classroom, ClassroomId};
pub use course::{Course, CourseId};
pub use instructor::{Instructor, InstructorId};
pub use layout::{DayGroup, MeetingPattern, MeetingPosition, WeekLayout};
pub use request::TimetableRequest;
