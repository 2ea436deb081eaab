//! In-memory lesson store.
//!
//! Keeps lessons in a `Vec`, enforces uniqueness of
//! `(subgroup, date, start_time)` on insert, and can be saved to or loaded
//! from a JSON file for the command-line driver.

use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{LessonFilter, LessonStore, SubgroupScope};
use crate::error::{Result, TimetableError};
use crate::models::{DateRange, Lesson, SubgroupId};

/// Lesson store backed by memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryLessonStore {
    lessons: Vec<Lesson>,
}

impl InMemoryLessonStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with lessons (no uniqueness check).
    pub fn with_lessons(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Loads a store from a JSON file. A missing file yields an empty store.
    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TimetableError::store(format!("cannot read '{}': {e}", path.display())))
    }

    /// Writes the store to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Number of stored lessons.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// All stored lessons in insertion order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }
}

type SlotKey = (SubgroupId, NaiveDate, NaiveTime);

fn slot_key(lesson: &Lesson) -> SlotKey {
    (lesson.subgroup_id, lesson.date, lesson.start_time)
}

impl LessonStore for InMemoryLessonStore {
    fn exists(&self, filter: &LessonFilter) -> Result<bool> {
        Ok(self.lessons.iter().any(|l| filter.matches(l)))
    }

    fn bulk_insert(&mut self, lessons: Vec<Lesson>) -> Result<usize> {
        let mut occupied: HashSet<SlotKey> = self.lessons.iter().map(slot_key).collect();
        for lesson in &lessons {
            if !occupied.insert(slot_key(lesson)) {
                return Err(TimetableError::store(format!(
                    "subgroup {} already has a lesson on {} at {}; batch of {} rejected",
                    lesson.subgroup_id,
                    lesson.date,
                    lesson.start_time,
                    lessons.len()
                )));
            }
        }

        let count = lessons.len();
        self.lessons.extend(lessons);
        Ok(count)
    }

    fn range_query(&self, range: &DateRange, scope: &SubgroupScope) -> Result<Vec<Lesson>> {
        let mut found: Vec<Lesson> = self
            .lessons
            .iter()
            .filter(|l| range.contains(l.date) && scope.includes(l.subgroup_id))
            .cloned()
            .collect();
        // Stable: insertion order is kept within a slot.
        found.sort_by_key(Lesson::chronological_key);
        Ok(found)
    }

    fn delete_all(&mut self, scope: &SubgroupScope) -> Result<usize> {
        let before = self.lessons.len();
        self.lessons.retain(|l| !scope.includes(l.subgroup_id));
        Ok(before - self.lessons.len())
    }
}
