//! Timetable (generation result) model.
//!
//! Groups lessons by subgroup, then by date. Lessons within a date are kept
//! in the order they were supplied, which is chronological when built from
//! a store range query.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Lesson, SubgroupId};

/// Lessons for one subgroup, keyed by date.
pub type SubgroupSchedule = BTreeMap<NaiveDate, Vec<Lesson>>;

/// Subgroup → date → ordered lessons.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Timetable {
    entries: BTreeMap<SubgroupId, SubgroupSchedule>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a timetable from lessons, preserving their relative order.
    pub fn from_lessons<I>(lessons: I) -> Self
    where
        I: IntoIterator<Item = Lesson>,
    {
        let mut timetable = Self::new();
        for lesson in lessons {
            timetable.push(lesson);
        }
        timetable
    }

    /// Appends a lesson under its subgroup and date.
    pub fn push(&mut self, lesson: Lesson) {
        self.entries
            .entry(lesson.subgroup_id)
            .or_default()
            .entry(lesson.date)
            .or_default()
            .push(lesson);
    }

    /// Whether the timetable holds no lessons.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of lessons.
    pub fn lesson_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Subgroups with at least one lesson, ascending.
    pub fn subgroups(&self) -> impl Iterator<Item = SubgroupId> + '_ {
        self.entries.keys().copied()
    }

    /// Per-date lessons of a subgroup.
    pub fn schedule_for(&self, subgroup_id: SubgroupId) -> Option<&SubgroupSchedule> {
        self.entries.get(&subgroup_id)
    }

    /// Lessons of a subgroup on a date (empty if none).
    pub fn lessons_on(&self, subgroup_id: SubgroupId, date: NaiveDate) -> &[Lesson] {
        self.entries
            .get(&subgroup_id)
            .and_then(|days| days.get(&date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All lessons, by subgroup, then date, then supplied order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .flatten()
    }

    /// Iterates `(subgroup, schedule)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SubgroupId, &SubgroupSchedule)> {
        self.entries.iter().map(|(id, days)| (*id, days))
    }
}
