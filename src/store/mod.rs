//! Lesson persistence boundary.
//!
//! The generator depends only on the narrow [`LessonStore`] interface:
//! an existence check used while seeding the availability index, an atomic
//! bulk insert, an ordered range query, and a scoped wipe.

mod memory;

pub use memory::InMemoryLessonStore;

use chrono::{NaiveDate, NaiveTime};

use crate::error::Result;
use crate::models::{CourseId, DateRange, Lesson, SubgroupId};

/// Which subgroups an operation covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubgroupScope {
    /// Every subgroup.
    #[default]
    All,
    /// Only the listed subgroups.
    Only(Vec<SubgroupId>),
}

impl SubgroupScope {
    /// Whether the scope includes a subgroup.
    pub fn includes(&self, subgroup_id: SubgroupId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&subgroup_id),
        }
    }
}

/// Criteria for [`LessonStore::exists`].
///
/// Unset criteria match every lesson.
#[derive(Debug, Clone, Default)]
pub struct LessonFilter {
    /// Restrict to dates within this range.
    pub date_range: Option<DateRange>,
    /// Restrict to these subgroups.
    pub subgroups: SubgroupScope,
    /// Restrict to one course.
    pub course_id: Option<CourseId>,
    /// Restrict to one slot start time.
    pub start_time: Option<NaiveTime>,
}

impl LessonFilter {
    /// Matches every lesson.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lessons within a date range.
    pub fn in_range(range: DateRange) -> Self {
        Self::new().with_date_range(range)
    }

    /// Restricts to a date range.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restricts to a single date.
    pub fn on_date(self, date: NaiveDate) -> Self {
        self.with_date_range(DateRange::new(date, date))
    }

    /// Restricts to a subgroup scope.
    pub fn with_subgroups(mut self, scope: SubgroupScope) -> Self {
        self.subgroups = scope;
        self
    }

    /// Restricts to a course.
    pub fn with_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    /// Restricts to a slot start time.
    pub fn at_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Whether a lesson satisfies every set criterion.
    pub fn matches(&self, lesson: &Lesson) -> bool {
        self.date_range.map_or(true, |r| r.contains(lesson.date))
            && self.subgroups.includes(lesson.subgroup_id)
            && self.course_id.map_or(true, |c| c == lesson.course_id)
            && self.start_time.map_or(true, |t| t == lesson.start_time)
    }
}

/// Storage for committed lessons.
///
/// Implementations must make [`bulk_insert`](Self::bulk_insert) atomic:
/// either every lesson of the batch is persisted or none is.
pub trait LessonStore {
    /// Whether any stored lesson matches the filter.
    fn exists(&self, filter: &LessonFilter) -> Result<bool>;

    /// Persists a batch of lessons atomically. Returns the number inserted.
    fn bulk_insert(&mut self, lessons: Vec<Lesson>) -> Result<usize>;

    /// Lessons within the range for the scoped subgroups, ordered by date
    /// then start time.
    fn range_query(&self, range: &DateRange, scope: &SubgroupScope) -> Result<Vec<Lesson>>;

    /// Deletes every lesson of the scoped subgroups. Returns the number deleted.
    fn delete_all(&mut self, scope: &SubgroupScope) -> Result<usize>;
}
