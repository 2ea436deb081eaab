//! Calendar models: date ranges, daily time slots, and the weekday partition.
//!
//! # Time Model
//! Dates are civil dates (`NaiveDate`); slots are wall-clock windows
//! (`NaiveTime`) repeated every day. A lesson is identified by its date and
//! the start time of its slot.
//!
//! # Day Partition
//! The configured workdays are split into lecture days and practice days.
//! The two sets are disjoint and their union is the full workday set.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Standard daily slots as `(start_h, start_m, end_h, end_m)`.
const STANDARD_SLOTS: [(u32, u32, u32, u32); 7] = [
    (9, 0, 10, 20),
    (10, 30, 11, 50),
    (12, 10, 13, 30),
    (13, 40, 15, 0),
    (15, 10, 16, 30),
    (16, 40, 18, 0),
    (18, 10, 19, 30),
];

/// Monday through Friday.
pub const WORK_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// An inclusive range of dates `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First date (inclusive).
    pub start: NaiveDate,
    /// Last date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a date range. Does not check ordering; see [`is_valid`](Self::is_valid).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `start <= end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Whether a date falls within the range.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the range (0 if invalid).
    pub fn len_days(&self) -> i64 {
        if self.is_valid() {
            (self.end - self.start).num_days() + 1
        } else {
            0
        }
    }

    /// Iterates the dates of the range in calendar order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// A daily time window `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    /// Slot start (inclusive).
    pub start: NaiveTime,
    /// Slot end (exclusive).
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a time slot.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Creates a slot from hours and minutes. `None` if any component is out of range.
    pub fn from_hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start_h, start_m, 0)?,
            end: NaiveTime::from_hms_opt(end_h, end_m, 0)?,
        })
    }

    /// Slot length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether a wall-clock time falls within this slot.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two slots overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The seven standard daily slots, 09:00–10:20 through 18:10–19:30.
pub fn default_time_slots() -> Vec<TimeSlot> {
    STANDARD_SLOTS
        .iter()
        .filter_map(|&(sh, sm, eh, em)| TimeSlot::from_hm(sh, sm, eh, em))
        .collect()
}

/// Split of the workdays into lecture days and practice days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayPartition {
    /// Weekdays hosting lectures, Monday first.
    pub lecture_days: Vec<Weekday>,
    /// Weekdays hosting practices, Monday first.
    pub practice_days: Vec<Weekday>,
}

impl DayPartition {
    /// Draws `lecture_count` random lecture days from `work_days`.
    ///
    /// The remaining workdays become practice days. `lecture_count` is
    /// clamped to the number of workdays.
    pub fn random<R: Rng + ?Sized>(work_days: &[Weekday], lecture_count: usize, rng: &mut R) -> Self {
        let lecture_days: Vec<Weekday> = work_days
            .choose_multiple(rng, lecture_count.min(work_days.len()))
            .copied()
            .collect();
        Self::fixed(work_days, &lecture_days)
    }

    /// Uses the given lecture days; every other workday is a practice day.
    ///
    /// Lecture days outside `work_days` are ignored.
    pub fn fixed(work_days: &[Weekday], lecture_days: &[Weekday]) -> Self {
        let mut lectures: Vec<Weekday> = work_days
            .iter()
            .copied()
            .filter(|d| lecture_days.contains(d))
            .collect();
        let mut practices: Vec<Weekday> = work_days
            .iter()
            .copied()
            .filter(|d| !lecture_days.contains(d))
            .collect();
        lectures.sort_by_key(Weekday::num_days_from_monday);
        lectures.dedup();
        practices.sort_by_key(Weekday::num_days_from_monday);
        practices.dedup();
        Self {
            lecture_days: lectures,
            practice_days: practices,
        }
    }

    /// Whether the date falls on a lecture day.
    #[inline]
    pub fn is_lecture_day(&self, date: NaiveDate) -> bool {
        self.lecture_days.contains(&date.weekday())
    }

    /// Whether the date falls on a practice day.
    #[inline]
    pub fn is_practice_day(&self, date: NaiveDate) -> bool {
        self.practice_days.contains(&date.weekday())
    }
}
