//! Classroom-owned slot genome for timetabling.
//!
//! # Encoding
//!
//! A [`Timetable`] holds one [`RoomSchedule`] per classroom. Each room owns
//! a slot vector of length `T` (the week layout's total slots) where every
//! entry is either empty or a [`CourseId`]. Courses occupy whole meetings:
//! all slots of a meeting pattern at one offset, filled and vacated together.
//!
//! Cloning a genome deep-copies every slot vector, so offspring never
//! share occupancy state with their parents.
//!
//! # Operators
//!
//! - [`single_point_crossover`] / [`crossover_at`]: recombine whole rooms
//! - [`consolidation_mutation`]: move a meeting from a sparse room to a dense one
//! - [`slot_swap_mutation`]: exchange two meetings of one pattern inside a room

use log::{debug, trace};
use rand::Rng;
use rand::prelude::IndexedRandom;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::TimetableProblem;
use crate::models::{ClassroomId, CourseId, MeetingPosition, WeekLayout};

/// Occupancy of one classroom across the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSchedule {
    /// Classroom this vector belongs to.
    pub classroom: ClassroomId,
    /// One entry per weekly slot; `None` = empty.
    pub slots: Vec<Option<CourseId>>,
}

impl RoomSchedule {
    /// Creates an empty room schedule with `slot_count` slots.
    pub fn empty(classroom: ClassroomId, slot_count: usize) -> Self {
        Self {
            classroom,
            slots: vec![None; slot_count],
        }
    }

    /// Whether any slot is occupied.
    pub fn is_used(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Number of empty slots.
    pub fn empty_count(&self) -> usize {
        self.slots.len() - self.occupied_count()
    }

    /// Whether the course appears in any slot.
    pub fn contains(&self, course: CourseId) -> bool {
        self.slots.contains(&Some(course))
    }

    /// Whether every listed slot exists and is empty.
    pub fn is_free(&self, slots: &[usize]) -> bool {
        slots
            .iter()
            .all(|&s| matches!(self.slots.get(s), Some(None)))
    }

    /// The course holding every listed slot, if one course holds them all.
    pub fn meeting_course(&self, slots: &[usize]) -> Option<CourseId> {
        let (&first, rest) = slots.split_first()?;
        let course = (*self.slots.get(first)?)?;
        rest.iter()
            .all(|&s| self.slots.get(s) == Some(&Some(course)))
            .then_some(course)
    }

    fn fill(&mut self, slots: &[usize], course: CourseId) {
        for &s in slots {
            self.slots[s] = Some(course);
        }
    }

    fn vacate(&mut self, slots: &[usize]) {
        for &s in slots {
            self.slots[s] = None;
        }
    }
}

/// Outcome of a bounded placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The course now occupies `position` in room `room`.
    Placed {
        /// Index into [`Timetable::rooms`].
        room: usize,
        /// Meeting position used.
        position: MeetingPosition,
    },
    /// No valid room/meeting was found within the attempt budget.
    Unplaced,
}

/// A candidate timetable (one GA individual).
///
/// Higher fitness = better (maximization convention). The fitness memo is
/// `None` until evaluated; anything that edits `rooms` after evaluation
/// must call [`Timetable::invalidate_fitness`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// One occupancy vector per classroom.
    pub rooms: Vec<RoomSchedule>,
    fitness: Option<f64>,
    /// Share of the population's total fitness (diagnostic only).
    #[serde(default)]
    pub selection_prob: f64,
}

impl Timetable {
    /// Builds an unevaluated genome from room vectors.
    pub fn from_rooms(rooms: Vec<RoomSchedule>) -> Self {
        Self {
            rooms,
            fitness: None,
            selection_prob: 0.0,
        }
    }

    /// Creates a genome with every classroom empty.
    pub fn empty(problem: &TimetableProblem) -> Self {
        let slot_count = problem.layout.total_slots();
        Self::from_rooms(
            (0..problem.classrooms.len())
                .map(|c| RoomSchedule::empty(c, slot_count))
                .collect(),
        )
    }

    /// Creates a random genome, placing courses in list order.
    ///
    /// Each course gets `attempts` tries; courses that find no room are
    /// left out and later cost a missing-course penalty.
    pub fn random<R: Rng>(problem: &TimetableProblem, attempts: usize, rng: &mut R) -> Self {
        let mut timetable = Self::empty(problem);
        let unplaced = (0..problem.courses.len())
            .filter(|&course| {
                timetable.place_course(problem, course, attempts, rng) == Placement::Unplaced
            })
            .count();
        if unplaced > 0 {
            debug!(
                "{unplaced} of {} courses left unplaced after {attempts} attempts each",
                problem.courses.len()
            );
        }
        timetable
    }

    /// Tries up to `attempts` random (room, meeting) pairs for `course`.
    ///
    /// A pair is accepted when the room seats the course's enrollment and
    /// every slot of the meeting is empty. Earlier placements are never
    /// revisited.
    pub fn place_course<R: Rng>(
        &mut self,
        problem: &TimetableProblem,
        course: CourseId,
        attempts: usize,
        rng: &mut R,
    ) -> Placement {
        let Some(enrolled) = problem.courses.get(course).map(|c| c.enrolled) else {
            return Placement::Unplaced;
        };
        let positions = problem.layout.position_count();
        if self.rooms.is_empty() || positions == 0 {
            return Placement::Unplaced;
        }

        for _ in 0..attempts {
            let room = rng.random_range(0..self.rooms.len());
            let Some(position) = problem.layout.nth_position(rng.random_range(0..positions))
            else {
                continue;
            };
            if problem.seats(self.rooms[room].classroom) < enrolled {
                continue;
            }
            let slots = problem.layout.meeting_slots(position.pattern, position.offset);
            if self.rooms[room].is_free(&slots) {
                self.rooms[room].fill(&slots, course);
                self.fitness = None;
                return Placement::Placed { room, position };
            }
        }
        Placement::Unplaced
    }

    /// Places `course` at an exact position if the slots are free.
    ///
    /// Capacity is not checked.
    pub fn assign(
        &mut self,
        layout: &WeekLayout,
        room: usize,
        position: MeetingPosition,
        course: CourseId,
    ) -> bool {
        let slots = layout.meeting_slots(position.pattern, position.offset);
        match self.rooms.get_mut(room) {
            Some(schedule) if schedule.is_free(&slots) => {
                schedule.fill(&slots, course);
                self.fitness = None;
                true
            }
            _ => false,
        }
    }

    /// Memoized fitness, `None` if not evaluated since the last change.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Whether a fitness value is memoized.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Stores an evaluated fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Discards the memoized fitness.
    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Number of rooms with at least one occupied slot.
    pub fn used_rooms(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_used()).count()
    }

    /// Total occupied slots across all rooms.
    pub fn occupied_slots(&self) -> usize {
        self.rooms.iter().map(RoomSchedule::occupied_count).sum()
    }

    /// Whether the course appears anywhere.
    pub fn contains_course(&self, course: CourseId) -> bool {
        self.rooms.iter().any(|r| r.contains(course))
    }

    /// Intact meetings in a room: positions whose slots all hold one course.
    pub fn meetings_in(&self, layout: &WeekLayout, room: usize) -> Vec<(MeetingPosition, CourseId)> {
        let Some(schedule) = self.rooms.get(room) else {
            return Vec::new();
        };
        layout
            .positions()
            .into_iter()
            .filter_map(|position| {
                let slots = layout.meeting_slots(position.pattern, position.offset);
                schedule.meeting_course(&slots).map(|course| (position, course))
            })
            .collect()
    }

    /// Meeting positions with every slot empty in a room.
    pub fn free_positions(&self, layout: &WeekLayout, room: usize) -> Vec<MeetingPosition> {
        let Some(schedule) = self.rooms.get(room) else {
            return Vec::new();
        };
        layout
            .positions()
            .into_iter()
            .filter(|p| schedule.is_free(&layout.meeting_slots(p.pattern, p.offset)))
            .collect()
    }
}

// ======================== Crossover operators ========================

/// Single-point crossover at classroom granularity.
///
/// With probability `1 - rate` the child is a copy of `p1`; otherwise a cut
/// `c` is drawn from `[0, rooms)` and the child is [`crossover_at`]`(p1, p2, c)`.
/// The child is always unevaluated.
pub fn single_point_crossover<R: Rng>(
    p1: &Timetable,
    p2: &Timetable,
    rate: f64,
    rng: &mut R,
) -> Timetable {
    if rng.random::<f64>() >= rate || p1.rooms.is_empty() {
        return Timetable::from_rooms(p1.rooms.clone());
    }
    let cut = rng.random_range(0..p1.rooms.len());
    crossover_at(p1, p2, cut)
}

/// Child with `p1`'s rooms before `cut` and `p2`'s rooms from `cut` on.
///
/// Rooms are copied whole; no slot vector is ever split.
pub fn crossover_at(p1: &Timetable, p2: &Timetable, cut: usize) -> Timetable {
    let cut = cut.min(p1.rooms.len());
    let mut rooms = p1.rooms[..cut].to_vec();
    rooms.extend(p2.rooms.iter().skip(cut).cloned());
    Timetable::from_rooms(rooms)
}

// ======================== Mutation operators ========================

/// Consolidation mutation: moves one meeting toward the denser of two used rooms.
///
/// Picks two distinct used rooms; the one with more empty slots gives up a
/// random meeting whose course fits the other room's seats, which receives
/// it at a random free meeting position. Returns `false` (no-op) when fewer
/// than two rooms are used or no movable meeting / free position exists.
pub fn consolidation_mutation<R: Rng>(
    timetable: &mut Timetable,
    problem: &TimetableProblem,
    rng: &mut R,
) -> bool {
    let used: Vec<usize> = (0..timetable.rooms.len())
        .filter(|&r| timetable.rooms[r].is_used())
        .collect();
    if used.len() < 2 {
        trace!("consolidation skipped: {} used room(s)", used.len());
        return false;
    }

    let picked = index::sample(rng, used.len(), 2).into_vec();
    let (a, b) = (used[picked[0]], used[picked[1]]);
    let (sparse, dense) = if timetable.rooms[a].empty_count() > timetable.rooms[b].empty_count() {
        (a, b)
    } else {
        (b, a)
    };

    let layout = &problem.layout;
    let seats = problem.seats(timetable.rooms[dense].classroom);
    let movable: Vec<(MeetingPosition, CourseId)> = timetable
        .meetings_in(layout, sparse)
        .into_iter()
        .filter(|&(_, course)| problem.courses.get(course).is_some_and(|c| c.fits(seats)))
        .collect();
    let targets = timetable.free_positions(layout, dense);

    let (Some(&(from, course)), Some(&to)) = (movable.choose(rng), targets.choose(rng)) else {
        trace!("consolidation skipped: nothing movable into room {dense}");
        return false;
    };

    let from_slots = layout.meeting_slots(from.pattern, from.offset);
    let to_slots = layout.meeting_slots(to.pattern, to.offset);
    timetable.rooms[sparse].vacate(&from_slots);
    timetable.rooms[dense].fill(&to_slots, course);
    timetable.invalidate_fitness();
    true
}

/// Slot-swap mutation: exchanges two meetings of one pattern within a room.
///
/// Empty meetings swap too, so a course can drift to a free offset. Every
/// slot of both meetings is exchanged, keeping patterns intact. Returns
/// whether any slot changed.
pub fn slot_swap_mutation<R: Rng>(
    timetable: &mut Timetable,
    layout: &WeekLayout,
    rng: &mut R,
) -> bool {
    if timetable.rooms.is_empty() {
        return false;
    }
    let eligible: Vec<usize> = (0..layout.patterns.len())
        .filter(|&p| layout.offsets(p) >= 2)
        .collect();
    let Some(&pattern) = eligible.choose(rng) else {
        return false;
    };

    let room = rng.random_range(0..timetable.rooms.len());
    let picked = index::sample(rng, layout.offsets(pattern), 2).into_vec();
    let first = layout.meeting_slots(pattern, picked[0]);
    let second = layout.meeting_slots(pattern, picked[1]);

    let slots = &mut timetable.rooms[room].slots;
    let changed = first.iter().zip(&second).any(|(&x, &y)| slots[x] != slots[y]);
    for (&x, &y) in first.iter().zip(&second) {
        slots.swap(x, y);
    }
    if changed {
        timetable.invalidate_fitness();
    }
    changed
}
