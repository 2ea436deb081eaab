//! Lesson model.
//!
//! A lesson is one scheduled occurrence of a course for one subgroup at a
//! given date and slot start time. Lessons are created by the placement
//! passes and never mutated afterwards.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{CourseId, SubgroupId};

/// Kind of session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    /// Shared by every subgroup in scope.
    Lecture,
    /// Held per subgroup.
    Practice,
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lecture => write!(f, "Lecture"),
            Self::Practice => write!(f, "Practice"),
        }
    }
}

/// A scheduled lesson.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Course taught.
    pub course_id: CourseId,
    /// Attending subgroup.
    pub subgroup_id: SubgroupId,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of the slot.
    pub start_time: NaiveTime,
    /// Lecture or practice.
    pub lesson_type: LessonType,
}

impl Lesson {
    /// Creates a lesson.
    pub fn new(
        course_id: CourseId,
        subgroup_id: SubgroupId,
        date: NaiveDate,
        start_time: NaiveTime,
        lesson_type: LessonType,
    ) -> Self {
        Self {
            course_id,
            subgroup_id,
            date,
            start_time,
            lesson_type,
        }
    }

    /// Creates a lecture lesson.
    pub fn lecture(
        course_id: CourseId,
        subgroup_id: SubgroupId,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Self {
        Self::new(course_id, subgroup_id, date, start_time, LessonType::Lecture)
    }

    /// Creates a practice lesson.
    pub fn practice(
        course_id: CourseId,
        subgroup_id: SubgroupId,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Self {
        Self::new(course_id, subgroup_id, date, start_time, LessonType::Practice)
    }

    /// Whether this is a lecture.
    #[inline]
    pub fn is_lecture(&self) -> bool {
        self.lesson_type == LessonType::Lecture
    }

    /// Sort key: date, then start time.
    #[inline]
    pub fn chronological_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.start_time)
    }
}
