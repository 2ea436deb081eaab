//! Post-run audits.
//!
//! Generation never raises under-fulfillment: a course that runs out of
//! calendar stays short. These reports let callers measure it.
//!
//! - [`QuotaReport`] compares required and placed sessions per lecture
//!   course and per practice `(course, subgroup)` pair.
//! - [`SubgroupTally`] counts lecture and practice lessons per subgroup.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::{CourseId, Lesson, LessonType, SubgroupId, Timetable};

use super::CatalogSnapshot;

/// Required vs placed lecture sessions of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseQuota {
    /// Lecture course.
    pub course_id: CourseId,
    /// Sessions the course needs (`lecture_hours / 2`).
    pub required: u32,
    /// Distinct sessions placed.
    pub placed: u32,
}

/// Required vs placed practice sessions of one `(course, subgroup)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairQuota {
    /// Practice course.
    pub course_id: CourseId,
    /// Subgroup taking the practice.
    pub subgroup_id: SubgroupId,
    /// Sessions the pair needs (`practice_hours / 2`).
    pub required: u32,
    /// Practice lessons placed for the pair.
    pub placed: u32,
}

/// A quota that was not reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    /// Course left short.
    pub course_id: CourseId,
    /// `None` for lecture quotas, which are shared by all subgroups.
    pub subgroup_id: Option<SubgroupId>,
    /// Lecture or practice quota.
    pub lesson_type: LessonType,
    /// Sessions required.
    pub required: u32,
    /// Sessions placed.
    pub placed: u32,
}

impl Shortfall {
    /// Sessions still missing.
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.placed)
    }
}

/// Quota fulfillment of one study plan and semester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuotaReport {
    /// One entry per course with lecture hours.
    pub lectures: Vec<CourseQuota>,
    /// One entry per practice course and subgroup of its plan.
    pub practices: Vec<PairQuota>,
}

impl QuotaReport {
    /// Measures `lessons` against the snapshot's quotas.
    ///
    /// A lecture session is one `(course, date, start)`, however many
    /// subgroups attended it. Lessons of other courses are ignored.
    pub fn calculate(snapshot: &CatalogSnapshot, lessons: &[Lesson]) -> Self {
        let mut lecture_sessions: HashSet<_> = HashSet::new();
        let mut lecture_counts: HashMap<CourseId, u32> = HashMap::new();
        let mut practice_counts: BTreeMap<(CourseId, SubgroupId), u32> = BTreeMap::new();

        for lesson in lessons {
            match lesson.lesson_type {
                LessonType::Lecture => {
                    if lecture_sessions.insert((lesson.course_id, lesson.date, lesson.start_time))
                    {
                        *lecture_counts.entry(lesson.course_id).or_insert(0) += 1;
                    }
                }
                LessonType::Practice => {
                    *practice_counts
                        .entry((lesson.course_id, lesson.subgroup_id))
                        .or_insert(0) += 1;
                }
            }
        }

        let lectures = snapshot
            .lecture_courses()
            .into_iter()
            .map(|course| CourseQuota {
                course_id: course.id,
                required: course.lecture_sessions(),
                placed: lecture_counts.get(&course.id).copied().unwrap_or(0),
            })
            .collect();

        let practices = snapshot
            .practice_courses()
            .into_iter()
            .flat_map(|course| {
                snapshot
                    .subgroups_of_plan(course.study_plan_id)
                    .map(|subgroup| PairQuota {
                        course_id: course.id,
                        subgroup_id: subgroup.id,
                        required: course.practice_sessions(),
                        placed: practice_counts
                            .get(&(course.id, subgroup.id))
                            .copied()
                            .unwrap_or(0),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            lectures,
            practices,
        }
    }

    /// Quotas with fewer placed than required sessions.
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        let lectures = self
            .lectures
            .iter()
            .filter(|q| q.placed < q.required)
            .map(|q| Shortfall {
                course_id: q.course_id,
                subgroup_id: None,
                lesson_type: LessonType::Lecture,
                required: q.required,
                placed: q.placed,
            });
        let practices = self
            .practices
            .iter()
            .filter(|q| q.placed < q.required)
            .map(|q| Shortfall {
                course_id: q.course_id,
                subgroup_id: Some(q.subgroup_id),
                lesson_type: LessonType::Practice,
                required: q.required,
                placed: q.placed,
            });
        lectures.chain(practices).collect()
    }

    /// Whether every quota was met.
    pub fn is_fulfilled(&self) -> bool {
        self.lectures.iter().all(|q| q.placed >= q.required)
            && self.practices.iter().all(|q| q.placed >= q.required)
    }
}

/// Lesson counts of one subgroup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubgroupTally {
    /// Lecture lessons.
    pub lectures: u32,
    /// Practice lessons.
    pub practices: u32,
}

impl SubgroupTally {
    /// Counts lessons per subgroup, ascending by subgroup.
    pub fn from_timetable(timetable: &Timetable) -> BTreeMap<SubgroupId, Self> {
        let mut tallies: BTreeMap<SubgroupId, Self> = BTreeMap::new();
        for lesson in timetable.lessons() {
            let tally = tallies.entry(lesson.subgroup_id).or_default();
            match lesson.lesson_type {
                LessonType::Lecture => tally.lectures += 1,
                LessonType::Practice => tally.practices += 1,
            }
        }
        tallies
    }

    /// Lectures plus practices.
    pub fn total(&self) -> u32 {
        self.lectures + self.practices
    }
}
