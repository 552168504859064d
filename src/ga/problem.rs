//! Timetabling GA problem definition.
//!
//! Bridges the domain models (courses, classrooms, instructors, week layout)
//! to the genome and scores genomes. Fitness is maximized:
//!
//! ```text
//! fitness = 1 / rooms_used
//!         - instructor_conflicts
//!         - missing_courses
//!         - day_splits
//! ```
//!
//! A genome that uses no room at all gets a usage reward of `0.0`.

use rand::Rng;

use super::chromosome::Timetable;
use crate::error::{Result, TimetableError};
use crate::models::{
    Classroom, ClassroomId, Course, Instructor, InstructorId, TimetableRequest, WeekLayout,
};
use crate::validation::validate_input;

/// The four additive fitness terms of a genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitnessBreakdown {
    /// Rooms with at least one occupied slot.
    pub classrooms_used: usize,
    /// (instructor, slot) pairs with more than one of the instructor's courses.
    pub instructor_conflicts: usize,
    /// Courses absent from every room.
    pub missing_courses: usize,
    /// Same-course slot pairs across incompatible meeting patterns in one room.
    pub day_splits: usize,
}

impl FitnessBreakdown {
    /// `1 / classrooms_used`, or `0.0` when no room is used.
    pub fn usage_reward(&self) -> f64 {
        if self.classrooms_used == 0 {
            0.0
        } else {
            1.0 / self.classrooms_used as f64
        }
    }

    /// Sum of all penalty points.
    pub fn penalty(&self) -> usize {
        self.instructor_conflicts + self.missing_courses + self.day_splits
    }

    /// Final score (reward minus penalties, unbounded below).
    pub fn score(&self) -> f64 {
        self.usage_reward() - self.penalty() as f64
    }
}

/// GA problem definition for course timetabling.
///
/// Holds the read-only inputs shared by every genome. Built from a
/// [`TimetableRequest`] after validation.
///
/// # Example
/// ```
/// use u_timetable::ga::{Timetable, TimetableProblem};
/// use u_timetable::models::TimetableRequest;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut request = TimetableRequest::new();
/// let a = request.add_instructor("A");
/// request.add_course("CS-1", 20, a);
/// request.add_classroom("SIMP-120", 30);
///
/// let problem = TimetableProblem::new(request).unwrap();
/// let mut rng = SmallRng::seed_from_u64(42);
/// let mut genome = Timetable::random(&problem, 10, &mut rng);
/// assert_eq!(problem.evaluate(&mut genome), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    /// Courses to place.
    pub courses: Vec<Course>,
    /// Available classrooms.
    pub classrooms: Vec<Classroom>,
    /// Instructors.
    pub instructors: Vec<Instructor>,
    /// Weekly slot geometry.
    pub layout: WeekLayout,
    /// course → instructors listing it.
    course_owners: Vec<Vec<InstructorId>>,
}

impl TimetableProblem {
    /// Validates the request and builds the problem.
    pub fn new(request: TimetableRequest) -> Result<Self> {
        request.layout.validate()?;
        validate_input(&request).map_err(TimetableError::InvalidInput)?;

        let mut course_owners = vec![Vec::new(); request.courses.len()];
        for (id, instructor) in request.instructors.iter().enumerate() {
            for &course in &instructor.courses {
                course_owners[course].push(id);
            }
        }

        Ok(Self {
            courses: request.courses,
            classrooms: request.classrooms,
            instructors: request.instructors,
            layout: request.layout,
            course_owners,
        })
    }

    /// Seat capacity of a classroom (0 for unknown ids).
    pub fn seats(&self, classroom: ClassroomId) -> u32 {
        self.classrooms.get(classroom).map_or(0, |c| c.size)
    }

    /// Creates a random individual (see [`Timetable::random`]).
    pub fn create_individual<R: Rng>(&self, attempts: usize, rng: &mut R) -> Timetable {
        Timetable::random(self, attempts, rng)
    }

    /// Returns the memoized fitness, computing and storing it if needed.
    pub fn evaluate(&self, timetable: &mut Timetable) -> f64 {
        if let Some(fitness) = timetable.fitness() {
            return fitness;
        }
        let fitness = self.score(timetable);
        timetable.set_fitness(fitness);
        fitness
    }

    /// Computes fitness without touching the memo.
    pub fn score(&self, timetable: &Timetable) -> f64 {
        self.breakdown(timetable).score()
    }

    /// Computes the individual fitness terms.
    pub fn breakdown(&self, timetable: &Timetable) -> FitnessBreakdown {
        FitnessBreakdown {
            classrooms_used: timetable.used_rooms(),
            instructor_conflicts: self.instructor_conflicts(timetable),
            missing_courses: self.missing_courses(timetable),
            day_splits: self.day_splits(timetable),
        }
    }

    /// Counts (instructor, slot) pairs where the instructor teaches more than once.
    fn instructor_conflicts(&self, timetable: &Timetable) -> usize {
        let mut conflicts = 0;
        let mut load = vec![0usize; self.instructors.len()];

        for slot in 0..self.layout.total_slots() {
            load.fill(0);
            for room in &timetable.rooms {
                let Some(Some(course)) = room.slots.get(slot) else {
                    continue;
                };
                for &owner in self.course_owners.get(*course).into_iter().flatten() {
                    load[owner] += 1;
                }
            }
            conflicts += load.iter().filter(|&&n| n > 1).count();
        }
        conflicts
    }

    fn missing_courses(&self, timetable: &Timetable) -> usize {
        let mut present = vec![false; self.courses.len()];
        for course in timetable.rooms.iter().flat_map(|r| r.slots.iter().flatten()) {
            if let Some(seen) = present.get_mut(*course) {
                *seen = true;
            }
        }
        present.iter().filter(|&&seen| !seen).count()
    }

    /// Counts same-course pairs between an earlier pattern's anchor group and
    /// any group of a later pattern, per room.
    ///
    /// With the two-day layout this is every (Monday slot, Tuesday slot) pair
    /// holding the same course.
    fn day_splits(&self, timetable: &Timetable) -> usize {
        let patterns = &self.layout.patterns;
        let mut splits = 0;

        for room in &timetable.rooms {
            for (p, first) in patterns.iter().enumerate() {
                let anchor = self.layout.group_range(first.groups[0]);
                for later in &patterns[p + 1..] {
                    for a in anchor.clone() {
                        let Some(Some(course)) = room.slots.get(a) else {
                            continue;
                        };
                        splits += later
                            .groups
                            .iter()
                            .flat_map(|&g| self.layout.group_range(g))
                            .filter(|&b| room.slots.get(b) == Some(&Some(*course)))
                            .count();
                    }
                }
            }
        }
        splits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeetingPosition;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn mwf(offset: usize) -> MeetingPosition {
        MeetingPosition { pattern: 0, offset }
    }

    fn tth(offset: usize) -> MeetingPosition {
        MeetingPosition { pattern: 1, offset }
    }

    fn shared_instructor_problem(layout: WeekLayout) -> TimetableProblem {
        let mut req = TimetableRequest::new().with_layout(layout);
        let a = req.add_instructor("A");
        let b = req.add_instructor("B");
        req.add_course("CS-1", 20, a);
        req.add_course("CS-2", 20, a);
        req.add_course("CS-3", 20, b);
        req.add_classroom("SIMP-120", 30);
        req.add_classroom("SIMP-200", 30);
        TimetableProblem::new(req).unwrap()
    }

    #[test]
    fn test_single_room_single_course_scores_one() {
        let mut req = TimetableRequest::new();
        let a = req.add_instructor("A");
        req.add_course("CS-1", 20, a);
        req.add_classroom("SIMP-120", 30);
        let problem = TimetableProblem::new(req).unwrap();

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10 {
            let mut t = problem.create_individual(10, &mut rng);
            assert!(t.contains_course(0));
            assert_eq!(problem.evaluate(&mut t), 1.0);
            assert_eq!(problem.breakdown(&t), FitnessBreakdown {
                classrooms_used: 1,
                ..FitnessBreakdown::default()
            });
        }
    }

    #[test]
    fn test_instructor_conflict_same_slot() {
        let problem = shared_instructor_problem(WeekLayout::two_day());
        let layout = &problem.layout;
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(layout, 0, mwf(3), 0));
        assert!(t.assign(layout, 1, mwf(3), 1));
        assert!(t.assign(layout, 0, tth(0), 2));

        let b = problem.breakdown(&t);
        assert_eq!(b.instructor_conflicts, 1);
        assert_eq!(b.missing_courses, 0);
        assert_eq!(b.day_splits, 0);
        assert!((problem.score(&t) - (0.5 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_conflict_counts_every_meeting_slot() {
        // MWF meetings clash on Monday, Wednesday and Friday
        let problem = shared_instructor_problem(WeekLayout::five_day());
        let layout = &problem.layout;
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(layout, 0, mwf(0), 0));
        assert!(t.assign(layout, 1, mwf(0), 1));
        assert!(t.assign(layout, 1, tth(0), 2));

        assert_eq!(problem.breakdown(&t).instructor_conflicts, 3);
    }

    #[test]
    fn test_different_instructors_no_conflict() {
        let problem = shared_instructor_problem(WeekLayout::two_day());
        let layout = &problem.layout;
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(layout, 0, mwf(3), 0));
        assert!(t.assign(layout, 1, mwf(3), 2));
        assert!(t.assign(layout, 1, mwf(4), 1));

        assert_eq!(problem.breakdown(&t).instructor_conflicts, 0);
    }

    #[test]
    fn test_missing_course_costs_one() {
        let problem = shared_instructor_problem(WeekLayout::two_day());
        let layout = &problem.layout;
        let mut full = Timetable::empty(&problem);
        assert!(full.assign(layout, 0, mwf(0), 0));
        assert!(full.assign(layout, 0, mwf(1), 1));
        assert!(full.assign(layout, 0, mwf(2), 2));

        let mut partial = Timetable::empty(&problem);
        assert!(partial.assign(layout, 0, mwf(0), 0));
        assert!(partial.assign(layout, 0, mwf(1), 1));

        let diff = problem.evaluate(&mut full) - problem.evaluate(&mut partial);
        assert!((diff - 1.0).abs() < 1e-12);
        assert_eq!(problem.breakdown(&partial).missing_courses, 1);
    }

    #[test]
    fn test_day_split_penalty() {
        let problem = shared_instructor_problem(WeekLayout::two_day());
        let layout = &problem.layout;
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(layout, 0, mwf(0), 0));
        assert!(t.assign(layout, 0, tth(2), 0));
        assert!(t.assign(layout, 1, mwf(0), 1));
        assert!(t.assign(layout, 1, mwf(1), 2));

        let b = problem.breakdown(&t);
        assert_eq!(b.day_splits, 1);
        assert_eq!(b.instructor_conflicts, 1);
    }

    #[test]
    fn test_day_split_five_day_counts_mirror_groups() {
        let problem = shared_instructor_problem(WeekLayout::five_day());
        let layout = &problem.layout;
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(layout, 0, mwf(0), 2));
        assert!(t.assign(layout, 0, tth(1), 2));

        // Monday slot vs Tuesday and Thursday slots
        assert_eq!(problem.breakdown(&t).day_splits, 2);
    }

    #[test]
    fn test_valid_mwf_meeting_is_not_split() {
        let problem = shared_instructor_problem(WeekLayout::five_day());
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(&problem.layout, 0, mwf(4), 0));
        assert_eq!(problem.breakdown(&t).day_splits, 0);
    }

    #[test]
    fn test_no_rooms_used_guard() {
        let problem = shared_instructor_problem(WeekLayout::two_day());
        let t = Timetable::empty(&problem);
        let b = problem.breakdown(&t);
        assert_eq!(b.usage_reward(), 0.0);
        assert_eq!(b.missing_courses, 3);
        assert_eq!(problem.score(&t), -3.0);

        let empty = TimetableProblem::new(TimetableRequest::new()).unwrap();
        let mut genome = Timetable::empty(&empty);
        assert_eq!(empty.evaluate(&mut genome), 0.0);
        assert_eq!(genome.fitness(), Some(0.0));
    }

    #[test]
    fn test_evaluate_is_memoized() {
        let problem = shared_instructor_problem(WeekLayout::two_day());
        let mut t = Timetable::empty(&problem);
        assert!(t.assign(&problem.layout, 0, mwf(0), 0));
        let first = problem.evaluate(&mut t);
        assert_eq!(problem.evaluate(&mut t), first);

        // editing rooms directly without invalidating keeps the stale memo
        t.rooms[1].slots[0] = Some(1);
        assert_eq!(problem.evaluate(&mut t), first);
        t.invalidate_fitness();
        assert!(problem.evaluate(&mut t) < first);
    }

    #[test]
    fn test_fitness_upper_bound() {
        let problem = shared_instructor_problem(WeekLayout::five_day());
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let t = problem.create_individual(10, &mut rng);
            let b = problem.breakdown(&t);
            assert!(problem.score(&t) <= 1.0 - b.penalty() as f64);
            assert_eq!(problem.score(&t), problem.score(&t));
        }
    }

    #[test]
    fn test_invalid_request_rejected() {
        let mut req = TimetableRequest::new();
        req.add_course("CS-1", 20, 3);
        assert!(matches!(
            TimetableProblem::new(req),
            Err(TimetableError::InvalidInput(_))
        ));

        let bad_layout = TimetableRequest::new().with_layout(WeekLayout {
            groups: vec![],
            patterns: vec![],
        });
        assert!(matches!(
            TimetableProblem::new(bad_layout),
            Err(TimetableError::InvalidLayout(_))
        ));
    }
}
