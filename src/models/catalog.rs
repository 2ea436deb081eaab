//! Reference data consumed by timetable generation.
//!
//! Study plans own courses and groups; groups own subgroups. A subgroup is
//! the unit that attends a lesson. The engine only reads these records.
//!
//! # Hours
//! Course hours are academic hours. One lesson covers a 2-hour block, so a
//! course needs `hours / 2` sessions; an odd trailing hour is never scheduled.

use serde::{Deserialize, Serialize};

/// Study plan identifier.
pub type StudyPlanId = u32;
/// Teacher identifier.
pub type TeacherId = u32;
/// Course identifier.
pub type CourseId = u32;
/// Group identifier.
pub type GroupId = u32;
/// Subgroup identifier.
pub type SubgroupId = u32;

/// A curriculum spanning one or more semesters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Unique identifier.
    pub id: StudyPlanId,
    /// Human-readable name.
    pub name: String,
    /// Year the plan takes effect.
    pub year_of_effect: u32,
    /// Number of semesters (>= 1).
    pub semester_count: u8,
    /// Author of the plan.
    #[serde(default)]
    pub plan_author: String,
}

/// An instructor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique identifier.
    pub id: TeacherId,
    /// Full name.
    pub full_name: String,
    /// Academic position (e.g. "Assistant", "Professor").
    #[serde(default)]
    pub position: String,
    /// Allowed teaching hours. Informational only.
    #[serde(default)]
    pub allowed_hours: u32,
    /// Employment rate (0.0..=1.0).
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_rate() -> f64 {
    1.0
}

/// A subject with lecture/practice hour totals and one assigned teacher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier.
    pub id: CourseId,
    /// Owning study plan.
    pub study_plan_id: StudyPlanId,
    /// Course name.
    pub name: String,
    /// Total lecture hours.
    pub lecture_hours: u32,
    /// Total practice hours.
    pub practice_hours: u32,
    /// Semester within the study plan (1-based).
    pub semester: u8,
    /// ECTS credits.
    #[serde(default)]
    pub credits: u32,
    /// Assigned teacher.
    pub teacher_id: TeacherId,
}

/// A student cohort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique identifier.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Major / speciality.
    #[serde(default)]
    pub major: String,
    /// Year of study.
    pub year: u8,
    /// Owning study plan.
    pub study_plan_id: StudyPlanId,
}

/// A part of a group. The unit that attends lessons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subgroup {
    /// Unique identifier.
    pub id: SubgroupId,
    /// Owning group.
    pub group_id: GroupId,
    /// Sequence number within the group.
    pub number: u8,
}

/// Complete reference data supplied by the external catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Study plans.
    #[serde(default)]
    pub study_plans: Vec<StudyPlan>,
    /// Teachers.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Courses.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Groups.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Subgroups.
    #[serde(default)]
    pub subgroups: Vec<Subgroup>,
}

impl StudyPlan {
    /// Creates a single-semester study plan.
    pub fn new(id: StudyPlanId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            year_of_effect: 0,
            semester_count: 1,
            plan_author: String::new(),
        }
    }

    /// Sets the year the plan takes effect.
    pub fn with_year(mut self, year: u32) -> Self {
        self.year_of_effect = year;
        self
    }

    /// Sets the number of semesters.
    pub fn with_semesters(mut self, count: u8) -> Self {
        self.semester_count = count;
        self
    }

    /// Whether `semester` lies within this plan.
    pub fn has_semester(&self, semester: u8) -> bool {
        (1..=self.semester_count).contains(&semester)
    }
}

impl Teacher {
    /// Creates a teacher.
    pub fn new(id: TeacherId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            position: String::new(),
            allowed_hours: 0,
            rate: 1.0,
        }
    }

    /// Sets the academic position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Sets the allowed teaching hours.
    pub fn with_allowed_hours(mut self, hours: u32) -> Self {
        self.allowed_hours = hours;
        self
    }
}

impl Course {
    /// Creates a course in semester 1 with no hours.
    pub fn new(
        id: CourseId,
        study_plan_id: StudyPlanId,
        name: impl Into<String>,
        teacher_id: TeacherId,
    ) -> Self {
        Self {
            id,
            study_plan_id,
            name: name.into(),
            lecture_hours: 0,
            practice_hours: 0,
            semester: 1,
            credits: 0,
            teacher_id,
        }
    }

    /// Sets lecture and practice hour totals.
    pub fn with_hours(mut self, lecture_hours: u32, practice_hours: u32) -> Self {
        self.lecture_hours = lecture_hours;
        self.practice_hours = practice_hours;
        self
    }

    /// Sets the semester.
    pub fn with_semester(mut self, semester: u8) -> Self {
        self.semester = semester;
        self
    }

    /// Sets the credits.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Lecture sessions required (`lecture_hours / 2`).
    #[inline]
    pub fn lecture_sessions(&self) -> u32 {
        self.lecture_hours / 2
    }

    /// Practice sessions required per subgroup (`practice_hours / 2`).
    #[inline]
    pub fn practice_sessions(&self) -> u32 {
        self.practice_hours / 2
    }
}

impl Group {
    /// Creates a first-year group.
    pub fn new(id: GroupId, study_plan_id: StudyPlanId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            major: String::new(),
            year: 1,
            study_plan_id,
        }
    }

    /// Sets the year of study.
    pub fn with_year(mut self, year: u8) -> Self {
        self.year = year;
        self
    }
}

impl Subgroup {
    /// Creates a subgroup.
    pub fn new(id: SubgroupId, group_id: GroupId, number: u8) -> Self {
        Self {
            id,
            group_id,
            number,
        }
    }
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a study plan.
    pub fn with_study_plan(mut self, plan: StudyPlan) -> Self {
        self.study_plans.push(plan);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a subgroup.
    pub fn with_subgroup(mut self, subgroup: Subgroup) -> Self {
        self.subgroups.push(subgroup);
        self
    }

    /// Finds a study plan by ID.
    pub fn study_plan(&self, id: StudyPlanId) -> Option<&StudyPlan> {
        self.study_plans.iter().find(|p| p.id == id)
    }

    /// Finds a teacher by ID.
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Finds a course by ID.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Finds a group by ID.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Subgroups whose group belongs to the given study plan.
    pub fn subgroups_of_plan(&self, plan_id: StudyPlanId) -> Vec<&Subgroup> {
        self.subgroups
            .iter()
            .filter(|s| {
                self.group(s.group_id)
                    .is_some_and(|g| g.study_plan_id == plan_id)
            })
            .collect()
    }

    /// Display label for a subgroup: `"<group name>/<number>"`.
    pub fn subgroup_label(&self, subgroup: &Subgroup) -> String {
        match self.group(subgroup.group_id) {
            Some(group) => format!("{}/{}", group.name, subgroup.number),
            None => format!("?/{}", subgroup.number),
        }
    }
}
