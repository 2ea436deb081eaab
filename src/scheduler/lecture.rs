//! Lecture placement pass.
//!
//! # Algorithm
//!
//! 1. Walk the range day by day; skip days that are not lecture days.
//! 2. For each slot in order, shuffle the lecture courses.
//! 3. Collect the subgroups that can attend: below the daily ceiling and
//!    free at that slot. If none can, the slot stays empty.
//! 4. Take the first course that still needs sessions and whose teacher is
//!    free; stage one lecture per attending subgroup.
//! 5. At most one course per slot; continue with the next slot.
//!
//! A course needs `lecture_hours / 2` sessions. There is no backtracking:
//! a course that never finds a slot stays short.
//!
//! # Complexity
//! O(d * s * (c + g)) where d=days, s=slots/day, c=courses, g=subgroups.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::models::{CourseId, Lesson, SubgroupId};

use super::{PlacementContext, StagedLessons};

/// What the lecture pass placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LectureSummary {
    /// Lecture sessions (course × slot) placed.
    pub sessions: usize,
    /// Lecture lessons staged (one per attending subgroup).
    pub lessons: usize,
}

/// Runs the lecture pass, staging lessons into `staged`.
pub fn place_lectures<R>(
    ctx: &PlacementContext<'_>,
    staged: &mut StagedLessons,
    rng: &mut R,
) -> Result<LectureSummary>
where
    R: Rng + ?Sized,
{
    let mut summary = LectureSummary::default();
    let mut courses = ctx.snapshot.lecture_courses();
    if courses.is_empty() {
        return Ok(summary);
    }

    let mut remaining: HashMap<CourseId, u32> = courses
        .iter()
        .map(|c| (c.id, c.lecture_sessions()))
        .collect();

    for date in ctx.range.days().filter(|d| ctx.partition.is_lecture_day(*d)) {
        debug!(%date, "Placing lectures");

        for slot in ctx.slots {
            courses.shuffle(rng);

            let index = staged.index();
            let attendees: Vec<SubgroupId> = ctx
                .snapshot
                .subgroups
                .iter()
                .map(|s| s.id)
                .filter(|&id| {
                    index.daily_load(id, date) < ctx.max_daily_lessons
                        && !index.has_lesson_at(id, date, slot.start)
                })
                .collect();
            if attendees.is_empty() {
                continue;
            }

            let Some(course) = courses.iter().copied().find(|c| {
                remaining.get(&c.id).is_some_and(|&left| left > 0)
                    && index.is_teacher_free(c.teacher_id, date, slot.start)
            }) else {
                continue;
            };

            for subgroup_id in attendees {
                staged.stage(
                    Lesson::lecture(course.id, subgroup_id, date, slot.start),
                    course.teacher_id,
                )?;
                summary.lessons += 1;
            }
            if let Some(left) = remaining.get_mut(&course.id) {
                *left -= 1;
            }
            summary.sessions += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Catalog, Course, DateRange, DayPartition, Group, StudyPlan, Subgroup, Teacher, TimeSlot,
        WORK_DAYS,
    };
    use crate::scheduler::{AvailabilityIndex, CatalogSnapshot};
    use chrono::{Datelike, NaiveDate, Weekday};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn base_catalog() -> Catalog {
        Catalog::new()
            .with_study_plan(StudyPlan::new(1, "CS"))
            .with_teacher(Teacher::new(1, "T1"))
            .with_teacher(Teacher::new(2, "T2"))
            .with_group(Group::new(1, 1, "CS-1"))
            .with_subgroup(Subgroup::new(1, 1, 1))
            .with_subgroup(Subgroup::new(2, 1, 2))
    }

    fn mon_thu() -> DayPartition {
        DayPartition::fixed(&WORK_DAYS, &[Weekday::Mon, Weekday::Thu])
    }

    fn run(
        snapshot: &CatalogSnapshot,
        range: DateRange,
        partition: &DayPartition,
        slots: &[TimeSlot],
        staged: &mut StagedLessons,
    ) -> LectureSummary {
        let ctx = PlacementContext::new(snapshot, range, partition, slots);
        let mut rng = StdRng::seed_from_u64(1);
        place_lectures(&ctx, staged, &mut rng).unwrap()
    }

    #[test]
    fn test_quota_and_weekdays() {
        let catalog = base_catalog().with_course(Course::new(1, 1, "Algebra", 1).with_hours(5, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slots = crate::models::default_time_slots();
        let mut staged = StagedLessons::new(AvailabilityIndex::new());

        // 2025-01-20 (Mon) .. 2025-02-02 (Sun)
        let range = DateRange::new(date(20), NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
        let summary = run(&snap, range, &partition, &slots, &mut staged);

        // 5 hours → 2 sessions, shared by both subgroups
        assert_eq!(summary.sessions, 2);
        assert_eq!(summary.lessons, 4);
        for lesson in staged.lessons() {
            assert!(lesson.is_lecture());
            assert!(partition.lecture_days.contains(&lesson.date.weekday()));
        }
    }

    #[test]
    fn test_session_stages_every_attendee() {
        let catalog = base_catalog().with_course(Course::new(1, 1, "Algebra", 1).with_hours(4, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slots = crate::models::default_time_slots();
        let mut staged = StagedLessons::new(AvailabilityIndex::new());
        let ctx = PlacementContext::new(&snap, DateRange::new(date(20), date(20)), &partition, &slots);
        let mut rng = StdRng::seed_from_u64(1);

        let summary = place_lectures(&ctx, &mut staged, &mut rng).unwrap();

        // Both subgroups share one teacher slot per session
        assert_eq!(summary.sessions, 2);
        assert_eq!(summary.lessons, 4);
        for lesson in staged.lessons() {
            let peers = staged
                .lessons()
                .iter()
                .filter(|l| l.start_time == lesson.start_time)
                .count();
            assert_eq!(peers, 2);
        }
        assert!(!staged.index().is_teacher_free(1, date(20), slots[0].start));
    }

    #[test]
    fn test_one_course_per_slot() {
        let catalog = base_catalog()
            .with_course(Course::new(1, 1, "Algebra", 1).with_hours(2, 0))
            .with_course(Course::new(2, 1, "Physics", 2).with_hours(2, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slots = vec![TimeSlot::from_hm(9, 0, 10, 20).unwrap()];
        let mut staged = StagedLessons::new(AvailabilityIndex::new());

        let summary = run(&snap, DateRange::new(date(20), date(20)), &partition, &slots, &mut staged);
        assert_eq!(summary.sessions, 1);

        let courses: HashSet<_> = staged.lessons().iter().map(|l| l.course_id).collect();
        assert_eq!(courses.len(), 1);
    }

    #[test]
    fn test_shared_teacher_blocks_second_course() {
        let catalog = base_catalog()
            .with_course(Course::new(1, 1, "Algebra", 1).with_hours(2, 0))
            .with_course(Course::new(2, 1, "Geometry", 1).with_hours(2, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slot = TimeSlot::from_hm(9, 0, 10, 20).unwrap();
        let mut index = AvailabilityIndex::new();
        // Subgroups are free but the shared teacher already teaches elsewhere
        index
            .record(&Lesson::lecture(99, 50, date(20), slot.start), 1)
            .unwrap();
        let mut staged = StagedLessons::new(index);

        let summary = run(&snap, DateRange::new(date(20), date(20)), &partition, &[slot], &mut staged);
        assert_eq!(summary.sessions, 0);
        assert!(staged.is_empty());
    }

    #[test]
    fn test_daily_ceiling_skips_subgroup() {
        let catalog = base_catalog().with_course(Course::new(1, 1, "Algebra", 1).with_hours(40, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slots = crate::models::default_time_slots();
        let mut index = AvailabilityIndex::new();
        // Subgroup 1 already has 4 lessons on Monday from other courses
        for (i, slot) in slots.iter().take(4).enumerate() {
            index
                .record(&Lesson::practice(50, 1, date(20), slot.start), 100 + i as u32)
                .unwrap();
        }
        let mut staged = StagedLessons::new(index);

        run(&snap, DateRange::new(date(20), date(20)), &partition, &slots, &mut staged);

        assert!(staged.lessons().iter().all(|l| l.subgroup_id == 2));
        // Subgroup 2 fills up to the ceiling
        assert_eq!(staged.index().daily_load(2, date(20)), 4);
        assert_eq!(staged.index().daily_load(1, date(20)), 4);
    }

    #[test]
    fn test_no_lecture_days_in_range() {
        let catalog = base_catalog().with_course(Course::new(1, 1, "Algebra", 1).with_hours(4, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slots = crate::models::default_time_slots();
        let mut staged = StagedLessons::new(AvailabilityIndex::new());

        // Tue..Wed only
        let summary = run(&snap, DateRange::new(date(21), date(22)), &partition, &slots, &mut staged);
        assert_eq!(summary, LectureSummary::default());
    }

    #[test]
    fn test_single_hour_course_never_scheduled() {
        let catalog = base_catalog().with_course(Course::new(1, 1, "Seminar", 1).with_hours(1, 0));
        let snap = CatalogSnapshot::load(&catalog, 1, 1).unwrap();
        let partition = mon_thu();
        let slots = crate::models::default_time_slots();
        let mut staged = StagedLessons::new(AvailabilityIndex::new());

        let summary = run(&snap, DateRange::new(date(20), date(31)), &partition, &slots, &mut staged);
        assert_eq!(summary.sessions, 0);
    }
}
