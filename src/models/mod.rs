//! Timetable domain models.
//!
//! Provides the reference data read by the generator (study plans, courses,
//! teachers, groups, subgroups), the calendar primitives it walks, and the
//! lessons and timetable it produces.
//!
//! # Domain Mappings
//!
//! | u-timetable | Scheduling term |
//! |-------------|-----------------|
//! | Course | Task with a session quota |
//! | Teacher | Unary resource |
//! | Subgroup | Unary resource with a daily capacity |
//! | Lesson | Assignment |
//! | TimeSlot | Discrete time bucket |

mod calendar;
mod catalog;
mod lesson;
mod timetable;

pub use calendar::{default_time_slots, DateRange, DayPartition, TimeSlot, WORK_DAYS};
pub use catalog::{
    Catalog, Course, CourseId, Group, GroupId, StudyPlan, StudyPlanId, Subgroup, SubgroupId,
    Teacher, TeacherId,
};
pub use lesson::{Lesson, LessonType};
pub use timetable::{SubgroupSchedule, Timetable};
