//! Greedy timetable generation.
//!
//! A run loads a [`CatalogSnapshot`], seeds an [`AvailabilityIndex`] from
//! persisted lessons, then runs two single forward passes over the calendar:
//!
//! - **Lecture pass**: on lecture days, at most one course per slot,
//!   attended by every subgroup of the plan that is free and below its
//!   daily ceiling.
//! - **Practice pass**: on practice days, per-subgroup sessions, several
//!   courses per slot as long as teachers and subgroups don't collide.
//!
//! Lessons are staged in memory and committed in one bulk insert; the
//! [`assemble`]d timetable is then read back from the store.
//!
//! The passes never backtrack. A course that runs out of calendar stays
//! short; [`QuotaReport`] measures by how much.

mod assembler;
mod availability;
mod context;
mod generator;
mod lecture;
mod practice;
mod report;
mod snapshot;

pub use assembler::assemble;
pub use availability::{AvailabilityIndex, StagedLessons};
pub use context::PlacementContext;
pub use generator::{GenerationOutcome, GenerationRequest, GenerationState, TimetableGenerator};
pub use lecture::{place_lectures, LectureSummary};
pub use practice::{place_practices, PracticeSummary};
pub use report::{CourseQuota, PairQuota, QuotaReport, Shortfall, SubgroupTally};
pub use snapshot::CatalogSnapshot;
