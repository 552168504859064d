//! Classroom model.
//!
//! A classroom carries only its identity and seat capacity. The occupancy
//! vector lives in each genome (see `ga::RoomSchedule`) so that no two
//! individuals ever share mutable slot state.

use serde::{Deserialize, Serialize};

/// Index of a classroom in the problem's classroom list.
pub type ClassroomId = usize;

/// A classroom with a fixed number of seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique room name (e.g., "SIMP-120").
    pub name: String,
    /// Seat capacity.
    pub size: u32,
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}
