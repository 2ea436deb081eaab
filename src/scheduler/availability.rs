//! Availability index and staged lesson batch.
//!
//! The index answers the three conflict questions of the placement passes
//! with hash lookups instead of scanning already-placed lessons:
//!
//! | Question | Key |
//! |----------|-----|
//! | Is the teacher free? | `(teacher, date, start)` → session |
//! | Does the subgroup already have a lesson? | `(subgroup, date, start)` |
//! | How many lessons does the subgroup have that day? | `(subgroup, date)` → count |
//!
//! It is seeded from lessons already in the store, then updated for every
//! lesson staged during the run.
//!
//! A lecture session is one lesson row per attending subgroup, all taught by
//! the same teacher at the same slot. The teacher slot therefore remembers
//! which session holds it, and further lecture rows of that course join the
//! session instead of conflicting with it.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::error::{Result, TimetableError};
use crate::models::{CourseId, DateRange, Lesson, LessonType, SubgroupId, TeacherId};
use crate::store::{LessonFilter, LessonStore, SubgroupScope};

use super::CatalogSnapshot;

/// Constant-time conflict lookups for one generation run.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    teacher_slots: HashMap<(TeacherId, NaiveDate, NaiveTime), (CourseId, LessonType)>,
    subgroup_slots: HashSet<(SubgroupId, NaiveDate, NaiveTime)>,
    daily_load: HashMap<(SubgroupId, NaiveDate), u32>,
}

impl AvailabilityIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from lessons already persisted within `range`.
    ///
    /// Covers every subgroup, not only the snapshot's, so teachers shared
    /// with other study plans keep their persisted bookings. Lessons of
    /// courses unknown to the catalog occupy their subgroup but no teacher.
    pub fn seeded<S>(store: &S, range: &DateRange, snapshot: &CatalogSnapshot) -> Result<Self>
    where
        S: LessonStore + ?Sized,
    {
        let mut index = Self::new();
        if !store.exists(&LessonFilter::in_range(*range))? {
            return Ok(index);
        }

        let persisted = store.range_query(range, &SubgroupScope::All)?;
        for lesson in &persisted {
            let teacher = snapshot.teacher_of(lesson.course_id);
            if teacher.is_none() {
                warn!(
                    course_id = lesson.course_id,
                    date = %lesson.date,
                    "Persisted lesson references a course missing from the catalog"
                );
            }
            index.absorb(lesson, teacher);
        }
        debug!(count = persisted.len(), "Seeded availability index");
        Ok(index)
    }

    /// True iff the teacher has no lesson at `(date, start)`.
    #[inline]
    pub fn is_teacher_free(&self, teacher: TeacherId, date: NaiveDate, start: NaiveTime) -> bool {
        !self.teacher_slots.contains_key(&(teacher, date, start))
    }

    /// True iff the subgroup already holds a lesson at `(date, start)`.
    #[inline]
    pub fn has_lesson_at(&self, subgroup: SubgroupId, date: NaiveDate, start: NaiveTime) -> bool {
        self.subgroup_slots.contains(&(subgroup, date, start))
    }

    /// Number of lessons the subgroup holds on `date`.
    #[inline]
    pub fn daily_load(&self, subgroup: SubgroupId, date: NaiveDate) -> u32 {
        self.daily_load.get(&(subgroup, date)).copied().unwrap_or(0)
    }

    /// Records a lesson taught by `teacher`.
    ///
    /// Fails without modifying the index if the subgroup is already booked
    /// at that slot, or if the teacher is booked for anything other than a
    /// lecture of the same course (another attendee of the same session).
    pub fn record(&mut self, lesson: &Lesson, teacher: TeacherId) -> Result<()> {
        if self.has_lesson_at(lesson.subgroup_id, lesson.date, lesson.start_time) {
            return Err(TimetableError::generation(format!(
                "subgroup {} already has a lesson on {} at {}",
                lesson.subgroup_id, lesson.date, lesson.start_time
            )));
        }
        if let Some(&held) = self
            .teacher_slots
            .get(&(teacher, lesson.date, lesson.start_time))
        {
            let joins_session = lesson.is_lecture()
                && held == (lesson.course_id, LessonType::Lecture);
            if !joins_session {
                return Err(TimetableError::generation(format!(
                    "teacher {teacher} already teaches course {} on {} at {}",
                    held.0, lesson.date, lesson.start_time
                )));
            }
        }
        self.absorb(lesson, Some(teacher));
        Ok(())
    }

    fn absorb(&mut self, lesson: &Lesson, teacher: Option<TeacherId>) {
        if let Some(teacher) = teacher {
            self.teacher_slots
                .entry((teacher, lesson.date, lesson.start_time))
                .or_insert((lesson.course_id, lesson.lesson_type));
        }
        if self
            .subgroup_slots
            .insert((lesson.subgroup_id, lesson.date, lesson.start_time))
        {
            *self
                .daily_load
                .entry((lesson.subgroup_id, lesson.date))
                .or_insert(0) += 1;
        }
    }
}

/// Lessons staged by a run, with the index they were checked against.
///
/// Nothing reaches the store until the run hands the batch over for a
/// single bulk insert; dropping the batch discards the run.
#[derive(Debug, Clone, Default)]
pub struct StagedLessons {
    index: AvailabilityIndex,
    lessons: Vec<Lesson>,
}

impl StagedLessons {
    /// Starts a batch on top of a (possibly seeded) index.
    pub fn new(index: AvailabilityIndex) -> Self {
        Self {
            index,
            lessons: Vec::new(),
        }
    }

    /// Conflict lookups including everything staged so far.
    #[inline]
    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    /// Checks and stages a lesson.
    pub fn stage(&mut self, lesson: Lesson, teacher: TeacherId) -> Result<()> {
        self.index.record(&lesson, teacher)?;
        self.lessons.push(lesson);
        Ok(())
    }

    /// Staged lessons in placement order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Number of staged lessons.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether nothing was staged.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Releases the staged lessons for commit.
    pub fn into_lessons(self) -> Vec<Lesson> {
        self.lessons
    }
}
