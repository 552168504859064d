//! Weekly time-slot geometry.
//!
//! A week is a sequence of named day groups laid out back to back in each
//! classroom's slot vector. A meeting pattern links groups that are occupied
//! together: a course meeting at offset `o` under the MWF pattern holds slot
//! `o` of Monday, Wednesday and Friday at once.
//!
//! # Presets
//!
//! | Layout | Groups | Patterns |
//! |--------|--------|----------|
//! | [`WeekLayout::two_day`] | Monday 10, Tuesday 7 | MWF = Mon, TTh = Tue |
//! | [`WeekLayout::five_day`] | Mon 9, Tue 4, Wed 9, Thu 4, Fri 9 | MWF = Mon+Wed+Fri, TTh = Tue+Thu |
//!
//! ```
//! use u_timetable::models::WeekLayout;
//!
//! let week = WeekLayout::five_day();
//! assert_eq!(week.total_slots(), 35);
//! // MWF at offset 2: Monday 2, Wednesday 15, Friday 28
//! assert_eq!(week.meeting_slots(0, 2), vec![2, 15, 28]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// A named block of consecutive slots (one teaching day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    /// Day name, e.g. "Monday".
    pub name: String,
    /// Number of slots in the day.
    pub len: usize,
}

/// Day groups that a single meeting occupies together.
///
/// The first group is the anchor: meeting offsets range over its slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPattern {
    /// Pattern name, e.g. "MWF".
    pub name: String,
    /// Indices into [`WeekLayout::groups`], anchor first.
    pub groups: Vec<usize>,
}

/// One placement position: a pattern and an offset inside its anchor group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeetingPosition {
    /// Pattern index.
    pub pattern: usize,
    /// Offset within each of the pattern's groups.
    pub offset: usize,
}

/// Day-pattern table describing a week of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLayout {
    /// Day groups in slot order.
    pub groups: Vec<DayGroup>,
    /// Meeting patterns.
    pub patterns: Vec<MeetingPattern>,
}

impl Default for WeekLayout {
    fn default() -> Self {
        Self::two_day()
    }
}

impl WeekLayout {
    /// Creates a layout and validates it.
    pub fn new(groups: Vec<DayGroup>, patterns: Vec<MeetingPattern>) -> Result<Self> {
        let layout = Self { groups, patterns };
        layout.validate()?;
        Ok(layout)
    }

    /// Monday/Tuesday block model: every meeting is a single slot.
    pub fn two_day() -> Self {
        Self {
            groups: vec![DayGroup::new("Monday", 10), DayGroup::new("Tuesday", 7)],
            patterns: vec![
                MeetingPattern::new("MWF", vec![0]),
                MeetingPattern::new("TTh", vec![1]),
            ],
        }
    }

    /// Full week with Wednesday/Friday mirroring Monday and Thursday mirroring Tuesday.
    pub fn five_day() -> Self {
        Self {
            groups: vec![
                DayGroup::new("Monday", 9),
                DayGroup::new("Tuesday", 4),
                DayGroup::new("Wednesday", 9),
                DayGroup::new("Thursday", 4),
                DayGroup::new("Friday", 9),
            ],
            patterns: vec![
                MeetingPattern::new("MWF", vec![0, 2, 4]),
                MeetingPattern::new("TTh", vec![1, 3]),
            ],
        }
    }

    /// Checks the structural rules of the table.
    ///
    /// Every pattern needs at least one group, groups must exist and belong
    /// to at most one pattern, and no group may be shorter than its
    /// pattern's anchor.
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(TimetableError::InvalidLayout("no day groups".into()));
        }
        if self.patterns.is_empty() {
            return Err(TimetableError::InvalidLayout("no meeting patterns".into()));
        }

        let mut owner: Vec<Option<usize>> = vec![None; self.groups.len()];
        for (p, pattern) in self.patterns.iter().enumerate() {
            let Some(&anchor) = pattern.groups.first() else {
                return Err(TimetableError::InvalidLayout(format!(
                    "pattern '{}' has no day groups",
                    pattern.name
                )));
            };
            for &g in &pattern.groups {
                if g >= self.groups.len() {
                    return Err(TimetableError::InvalidLayout(format!(
                        "pattern '{}' references unknown group {g}",
                        pattern.name
                    )));
                }
                if let Some(prev) = owner[g].replace(p) {
                    return Err(TimetableError::InvalidLayout(format!(
                        "group '{}' is shared by patterns '{}' and '{}'",
                        self.groups[g].name, self.patterns[prev].name, pattern.name
                    )));
                }
            }
            let anchor_len = self.groups[anchor].len;
            if anchor_len == 0 {
                return Err(TimetableError::InvalidLayout(format!(
                    "anchor group '{}' of pattern '{}' is empty",
                    self.groups[anchor].name, pattern.name
                )));
            }
            if let Some(&short) = pattern
                .groups
                .iter()
                .find(|&&g| self.groups[g].len < anchor_len)
            {
                return Err(TimetableError::InvalidLayout(format!(
                    "group '{}' is shorter than anchor '{}' of pattern '{}'",
                    self.groups[short].name, self.groups[anchor].name, pattern.name
                )));
            }
        }
        Ok(())
    }

    /// Total number of weekly slots (`T`).
    pub fn total_slots(&self) -> usize {
        self.groups.iter().map(|g| g.len).sum()
    }

    /// First slot index of a group.
    pub fn group_start(&self, group: usize) -> usize {
        self.groups[..group].iter().map(|g| g.len).sum()
    }

    /// Slot range of a group.
    pub fn group_range(&self, group: usize) -> std::ops::Range<usize> {
        let start = self.group_start(group);
        start..start + self.groups[group].len
    }

    /// Number of offsets available to a pattern (its anchor's length).
    pub fn offsets(&self, pattern: usize) -> usize {
        self.groups[self.patterns[pattern].groups[0]].len
    }

    /// Slot indices occupied by a meeting of `pattern` at `offset`.
    pub fn meeting_slots(&self, pattern: usize, offset: usize) -> Vec<usize> {
        self.patterns[pattern]
            .groups
            .iter()
            .map(|&g| self.group_start(g) + offset)
            .collect()
    }

    /// Number of distinct meeting positions across all patterns.
    pub fn position_count(&self) -> usize {
        (0..self.patterns.len()).map(|p| self.offsets(p)).sum()
    }

    /// Maps a flat index in `0..position_count()` to a meeting position.
    pub fn nth_position(&self, mut n: usize) -> Option<MeetingPosition> {
        for pattern in 0..self.patterns.len() {
            let offsets = self.offsets(pattern);
            if n < offsets {
                return Some(MeetingPosition { pattern, offset: n });
            }
            n -= offsets;
        }
        None
    }

    /// All meeting positions in pattern order.
    pub fn positions(&self) -> Vec<MeetingPosition> {
        (0..self.patterns.len())
            .flat_map(|pattern| {
                (0..self.offsets(pattern)).map(move |offset| MeetingPosition { pattern, offset })
            })
            .collect()
    }
}

impl DayGroup {
    /// Creates a day group.
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }
}

impl MeetingPattern {
    /// Creates a meeting pattern (anchor group first).
    pub fn new(name: impl Into<String>, groups: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            groups,
        }
    }
}
