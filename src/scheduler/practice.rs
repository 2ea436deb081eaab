//! Practice placement pass.
//!
//! # Algorithm
//!
//! 1. Walk the range day by day; skip days that are not practice days.
//! 2. For each slot in order, shuffle the practice courses.
//! 3. For each course, for each subgroup of the course's study plan, stage
//!    one practice unless the pair's quota is met, the subgroup is busy at
//!    that slot, the teacher is busy at that slot, or the subgroup reached
//!    its daily ceiling.
//!
//! Quotas are tracked per `(course, subgroup)` pair: each pair needs
//! `practice_hours / 2` sessions. Several courses may share a slot as long
//! as they go to different subgroups and teachers.
//!
//! # Complexity
//! O(d * s * c * g) where d=days, s=slots/day, c=courses, g=subgroups.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::models::{CourseId, Lesson, SubgroupId, TeacherId};

use super::{PlacementContext, StagedLessons};

/// What the practice pass placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeSummary {
    /// Practice lessons staged.
    pub lessons: usize,
    /// Practice lessons per teacher. Advisory; not enforced as a cap.
    pub teacher_workload: HashMap<TeacherId, u32>,
}

/// Runs the practice pass, staging lessons into `staged`.
pub fn place_practices<R>(
    ctx: &PlacementContext<'_>,
    staged: &mut StagedLessons,
    rng: &mut R,
) -> Result<PracticeSummary>
where
    R: Rng + ?Sized,
{
    let mut summary = PracticeSummary::default();
    let mut courses = ctx.snapshot.practice_courses();
    if courses.is_empty() {
        return Ok(summary);
    }

    let mut remaining: HashMap<(CourseId, SubgroupId), u32> = courses
        .iter()
        .flat_map(|course| {
            ctx.snapshot
                .subgroups_of_plan(course.study_plan_id)
                .map(move |s| ((course.id, s.id), course.practice_sessions()))
        })
        .collect();

    for date in ctx
        .range
        .days()
        .filter(|d| ctx.partition.is_practice_day(*d))
    {
        debug!(%date, "Placing practices");

        for slot in ctx.slots {
            courses.shuffle(rng);

            for course in &courses {
                for subgroup in ctx.snapshot.subgroups_of_plan(course.study_plan_id) {
                    let key = (course.id, subgroup.id);
                    if remaining.get(&key).map_or(true, |&left| left == 0) {
                        continue;
                    }

                    let index = staged.index();
                    if index.has_lesson_at(subgroup.id, date, slot.start)
                        || !index.is_teacher_free(course.teacher_id, date, slot.start)
                        || index.daily_load(subgroup.id, date) >= ctx.max_daily_lessons
                    {
                        continue;
                    }

                    staged.stage(
                        Lesson::practice(course.id, subgroup.id, date, slot.start),
                        course.teacher_id,
                    )?;
                    if let Some(left) = remaining.get_mut(&key) {
                        *left -= 1;
                    }
                    *summary
                        .teacher_workload
                        .entry(course.teacher_id)
                        .or_insert(0) += 1;
                    summary.lessons += 1;
                }
            }
        }
    }

    Ok(summary)
}
