//! Academic timetable generation.
//!
//! Assigns lecture and practice sessions to student subgroups and teachers
//! over a date range, producing a conflict-free timetable.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Catalog` (study plans, teachers, courses,
//!   groups, subgroups), `DateRange`, `TimeSlot`, `DayPartition`, `Lesson`,
//!   `Timetable`
//! - **`store`**: The `LessonStore` persistence boundary and an in-memory
//!   implementation
//! - **`scheduler`**: Availability index, lecture and practice placement
//!   passes, schedule assembly, and the `TimetableGenerator` run
//! - **`validation`**: Catalog integrity checks and request validation
//! - **`config`**: `GeneratorConfig` (workdays, slots, daily ceiling, seed)
//!
//! # Guarantees
//!
//! For every generated lesson set:
//! - no subgroup holds two lessons at the same date and start time;
//! - no teacher teaches two lessons at the same date and start time;
//! - no subgroup exceeds the daily ceiling (4 by default);
//! - no course exceeds its lecture or practice session quota.
//!
//! A run commits all of its lessons or none of them.

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{Result, TimetableError};
