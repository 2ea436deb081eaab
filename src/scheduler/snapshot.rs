//! Read-only catalog view for one generation run.

use std::collections::HashMap;

use crate::error::{Result, TimetableError};
use crate::models::{
    Catalog, Course, CourseId, StudyPlan, StudyPlanId, Subgroup, SubgroupId, TeacherId,
};

/// The slice of the catalog a run works on.
///
/// Holds the study plan, its courses for the requested semester, and the
/// subgroups of its groups. The course → teacher map covers the whole
/// catalog so that lessons persisted by other study plans can be attributed
/// to their teachers when the availability index is seeded.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Study plan being scheduled.
    pub study_plan: StudyPlan,
    /// Semester being scheduled.
    pub semester: u8,
    /// Courses of the plan in that semester, in catalog order.
    pub courses: Vec<Course>,
    /// Subgroups of the plan's groups, in catalog order.
    pub subgroups: Vec<Subgroup>,
    subgroup_plan: HashMap<SubgroupId, StudyPlanId>,
    teacher_of: HashMap<CourseId, TeacherId>,
}

impl CatalogSnapshot {
    /// Extracts the snapshot for a study plan and semester.
    pub fn load(catalog: &Catalog, study_plan_id: StudyPlanId, semester: u8) -> Result<Self> {
        let study_plan = catalog
            .study_plan(study_plan_id)
            .cloned()
            .ok_or_else(|| {
                TimetableError::invalid_input(format!("study plan {study_plan_id} not found"))
            })?;

        let courses: Vec<Course> = catalog
            .courses
            .iter()
            .filter(|c| c.study_plan_id == study_plan_id && c.semester == semester)
            .cloned()
            .collect();

        let subgroups: Vec<Subgroup> = catalog
            .subgroups_of_plan(study_plan_id)
            .into_iter()
            .cloned()
            .collect();

        let subgroup_plan = subgroups
            .iter()
            .map(|s| (s.id, study_plan_id))
            .collect();

        let teacher_of = catalog
            .courses
            .iter()
            .map(|c| (c.id, c.teacher_id))
            .collect();

        Ok(Self {
            study_plan,
            semester,
            courses,
            subgroups,
            subgroup_plan,
            teacher_of,
        })
    }

    /// Courses with lecture hours.
    pub fn lecture_courses(&self) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.lecture_hours > 0).collect()
    }

    /// Courses with practice hours.
    pub fn practice_courses(&self) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.practice_hours > 0).collect()
    }

    /// Whether any course has lecture or practice hours.
    pub fn has_schedulable_courses(&self) -> bool {
        self.courses
            .iter()
            .any(|c| c.lecture_hours > 0 || c.practice_hours > 0)
    }

    /// Subgroups belonging to a study plan.
    pub fn subgroups_of_plan(&self, plan_id: StudyPlanId) -> impl Iterator<Item = &Subgroup> {
        self.subgroups
            .iter()
            .filter(move |s| self.subgroup_plan.get(&s.id) == Some(&plan_id))
    }

    /// IDs of every subgroup in scope.
    pub fn subgroup_ids(&self) -> Vec<SubgroupId> {
        self.subgroups.iter().map(|s| s.id).collect()
    }

    /// Teacher of any catalog course.
    pub fn teacher_of(&self, course_id: CourseId) -> Option<TeacherId> {
        self.teacher_of.get(&course_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Teacher};

    fn catalog() -> Catalog {
        Catalog::new()
            .with_study_plan(StudyPlan::new(1, "CS").with_semesters(2))
            .with_study_plan(StudyPlan::new(2, "Math").with_semesters(2))
            .with_teacher(Teacher::new(1, "T1"))
            .with_teacher(Teacher::new(2, "T2"))
            .with_course(Course::new(1, 1, "Lectures only", 1).with_hours(20, 0))
            .with_course(Course::new(2, 1, "Practice only", 2).with_hours(0, 20))
            .with_course(
                Course::new(3, 1, "Other semester", 1)
                    .with_hours(20, 20)
                    .with_semester(2),
            )
            .with_course(Course::new(4, 2, "Other plan", 2).with_hours(20, 20))
            .with_group(Group::new(1, 1, "CS-1"))
            .with_group(Group::new(2, 2, "M-1"))
            .with_subgroup(Subgroup::new(1, 1, 1))
            .with_subgroup(Subgroup::new(2, 1, 2))
            .with_subgroup(Subgroup::new(3, 2, 1))
    }

    #[test]
    fn test_load_scopes_plan_and_semester() {
        let snap = CatalogSnapshot::load(&catalog(), 1, 1).unwrap();
        let ids: Vec<_> = snap.courses.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(snap.subgroup_ids(), vec![1, 2]);
        assert_eq!(snap.lecture_courses().len(), 1);
        assert_eq!(snap.practice_courses().len(), 1);
        assert!(snap.has_schedulable_courses());
    }

    #[test]
    fn test_teacher_map_covers_whole_catalog() {
        let snap = CatalogSnapshot::load(&catalog(), 1, 1).unwrap();
        assert_eq!(snap.teacher_of(4), Some(2));
        assert_eq!(snap.teacher_of(99), None);
    }

    #[test]
    fn test_subgroups_of_plan() {
        let snap = CatalogSnapshot::load(&catalog(), 1, 1).unwrap();
        assert_eq!(snap.subgroups_of_plan(1).count(), 2);
        assert_eq!(snap.subgroups_of_plan(2).count(), 0);
    }

    #[test]
    fn test_empty_semester() {
        let snap = CatalogSnapshot::load(&catalog(), 2, 2).unwrap();
        assert!(snap.courses.is_empty());
        assert!(!snap.has_schedulable_courses());
    }

    #[test]
    fn test_missing_plan() {
        let err = CatalogSnapshot::load(&catalog(), 9, 1).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
